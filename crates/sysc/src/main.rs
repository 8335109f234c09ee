use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use clap::{CommandFactory, FromArgMatches, Parser};
use color_eyre::eyre::Result;
use sysc_config::Config;
use sysc_core::{EffectKind, Theme};
use sysc_effects::{AnimationState, wrap_text};

mod app;
mod logging;
mod raw;

use app::App;

/// Terminal animation effects.
#[derive(Debug, Parser)]
#[command(name = "sysc", version, about, long_about = None)]
struct Cli {
    /// Effect to run: fire, matrix, rain, fireworks, decrypt, pour, print or beams
    #[arg(short, long, value_name = "EFFECT")]
    effect: Option<EffectKind>,

    /// Color theme
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Seconds to run for, 0 runs until quit
    #[arg(short, long, value_name = "SECS")]
    duration: Option<u64>,

    /// Text file for decrypt, pour, print and beams
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Fixed random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write ANSI frames straight to stdout instead of running the UI
    #[arg(long)]
    raw: bool,

    /// Use this config file instead of the default one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    init: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command line flags on top of the config file.
    fn merge(&self, config: Config) -> Config {
        Config {
            effect: self.effect.unwrap_or(config.effect),
            theme: self.theme.clone().unwrap_or(config.theme),
            duration: self.duration.unwrap_or(config.duration),
            file: self.file.clone().or(config.file),
            seed: self.seed.or(config.seed),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let matches = Cli::command().after_help(theme_help()).get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    if cli.init {
        let path = Config::write_default()?;
        println!("Default configuration file created at: {}", path.display());
        return Ok(());
    }

    logging::init(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let settings = cli.merge(config);

    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    let text = load_text(settings.file.as_deref(), width);
    let deadline =
        (settings.duration > 0).then(|| Instant::now() + Duration::from_secs(settings.duration));
    let state = AnimationState::new(
        settings.effect,
        settings.theme,
        text,
        width,
        height,
        settings.seed,
    );

    if cli.raw {
        return raw::run(state, deadline);
    }

    let terminal = ratatui::init();
    let result = App::new(state, deadline).run(terminal);
    ratatui::restore();
    result
}

/// Theme list appended to `--help`.
fn theme_help() -> String {
    let mut help = String::from("Themes:\n");
    for theme in Theme::ALL {
        help.push_str(&format!("  {:<16}{}\n", theme.name(), theme.description()));
    }
    help
}

/// Read and wrap the text for the text effects.
///
/// An empty result makes each effect fall back to its own placeholder.
fn load_text(path: Option<&Path>, width: u16) -> String {
    let Some(path) = path else {
        return String::new();
    };
    match fs::read_to_string(path) {
        Ok(text) => wrap_text(&text, width.saturating_sub(10).max(1) as usize),
        Err(err) => {
            tracing::warn!(path = %path.display(), "could not read text file: {err}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::parse_from(["sysc", "-e", "matrix", "--seed", "4"]);
        let config = Config {
            effect: EffectKind::Rain,
            theme: "nord".to_string(),
            duration: 30,
            file: Some(PathBuf::from("banner.txt")),
            seed: Some(1),
        };
        let merged = cli.merge(config);
        assert_eq!(merged.effect, EffectKind::Matrix);
        assert_eq!(merged.theme, "nord");
        assert_eq!(merged.duration, 30);
        assert_eq!(merged.file, Some(PathBuf::from("banner.txt")));
        assert_eq!(merged.seed, Some(4));
    }

    #[test]
    fn no_flags_keeps_config() {
        let cli = Cli::parse_from(["sysc"]);
        assert_eq!(cli.merge(Config::default()), Config::default());
    }

    #[test]
    fn unknown_effect_is_rejected() {
        assert!(Cli::try_parse_from(["sysc", "--effect", "lasers"]).is_err());
    }

    #[test]
    fn help_lists_every_theme() {
        let help = theme_help();
        assert!(Theme::ALL.iter().all(|t| help.contains(t.name())));
    }

    #[test]
    fn missing_text_file_gives_placeholder() {
        let text = load_text(Some(Path::new("/definitely/not/here.txt")), 80);
        assert!(text.is_empty());
        assert!(load_text(None, 80).is_empty());
    }

    #[test]
    fn text_file_is_wrapped_to_terminal() {
        let path = std::env::temp_dir().join(format!("sysc-text-{}.txt", std::process::id()));
        fs::write(&path, "alpha beta gamma delta").unwrap();
        let text = load_text(Some(&path), 22);
        let _ = fs::remove_file(&path);
        assert_eq!(text, "alpha beta\ngamma delta");
    }
}
