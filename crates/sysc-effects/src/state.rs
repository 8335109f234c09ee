//! Running effect state management.

use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Frame, widgets::Paragraph};
use sysc_core::{EffectKind, Theme};

use crate::animations::{
    Animation,
    beams::{BeamsConfig, BeamsEffect},
    decrypt::{DecryptConfig, DecryptEffect},
    fire::{FireConfig, FireEffect},
    fireworks::{FireworksConfig, FireworksEffect},
    matrix::{MatrixConfig, MatrixEffect},
    pour::{PourConfig, PourEffect},
    print::{PrintConfig, PrintEffect},
    rain::{RainConfig, RainEffect},
};

/// Build an effect with its theme defaults.
///
/// `text` only matters for the text effects; an empty string selects the
/// effect's placeholder.
pub fn build_effect(
    kind: EffectKind,
    theme: &str,
    text: &str,
    width: u16,
    height: u16,
    rng: StdRng,
) -> Box<dyn Animation> {
    match kind {
        EffectKind::Fire => Box::new(FireEffect::new(FireConfig::for_theme(width, height, theme), rng)),
        EffectKind::Matrix => Box::new(MatrixEffect::new(
            MatrixConfig::for_theme(width, height, theme),
            rng,
        )),
        EffectKind::Rain => Box::new(RainEffect::new(RainConfig::for_theme(width, height, theme), rng)),
        EffectKind::Fireworks => Box::new(FireworksEffect::new(
            FireworksConfig::for_theme(width, height, theme),
            rng,
        )),
        EffectKind::Decrypt => {
            let config = DecryptConfig {
                text: text.to_string(),
                ..DecryptConfig::for_theme(width, height, theme)
            };
            Box::new(DecryptEffect::new(config, rng))
        }
        EffectKind::Pour => {
            let config = PourConfig {
                text: text.to_string(),
                ..PourConfig::for_theme(width, height, theme)
            };
            Box::new(PourEffect::new(config, rng))
        }
        EffectKind::Print => {
            let config = PrintConfig {
                text: text.to_string(),
                ..PrintConfig::for_theme(width, height, theme)
            };
            Box::new(PrintEffect::new(config, rng))
        }
        EffectKind::Beams => {
            let config = BeamsConfig {
                text: text.to_string(),
                ..BeamsConfig::for_theme(width, height, theme)
            };
            Box::new(BeamsEffect::new(config, rng))
        }
    }
}

/// The effect currently on screen plus what is needed to rebuild it.
#[derive(Debug)]
pub struct AnimationState {
    kind: EffectKind,
    theme: String,
    text: String,
    width: u16,
    height: u16,
    /// Fixed seed for reproducible runs.
    seed: Option<u64>,
    animation: Box<dyn Animation>,
}

impl AnimationState {
    /// Create the state and build the first effect.
    pub fn new(
        kind: EffectKind,
        theme: impl Into<String>,
        text: impl Into<String>,
        width: u16,
        height: u16,
        seed: Option<u64>,
    ) -> Self {
        let theme = theme.into();
        let text = text.into();
        let animation = build_effect(kind, &theme, &text, width, height, make_rng(seed));
        tracing::info!(effect = %kind, theme = %theme, width, height, "effect started");
        Self {
            kind,
            theme,
            text,
            width,
            height,
            seed,
            animation,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn animation(&self) -> &dyn Animation {
        self.animation.as_ref()
    }

    fn rebuild(&mut self) {
        self.animation = build_effect(
            self.kind,
            &self.theme,
            &self.text,
            self.width,
            self.height,
            make_rng(self.seed),
        );
        tracing::info!(
            effect = %self.kind,
            theme = %self.theme,
            width = self.width,
            height = self.height,
            "effect rebuilt"
        );
    }

    /// Rebuild for a new terminal size. A no-op if the size is unchanged.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.rebuild();
    }

    /// Switch to the next theme. Unknown theme names restart the cycle.
    pub fn cycle_theme(&mut self) {
        let next = Theme::from_name(&self.theme).map_or_else(Theme::default, Theme::next);
        self.theme = next.name().to_string();
        self.rebuild();
    }

    /// Switch to the next effect.
    pub fn cycle_effect(&mut self) {
        self.kind = self.kind.next();
        self.rebuild();
    }

    pub fn reset(&mut self) {
        self.animation.reset();
    }

    pub fn update(&mut self) {
        self.animation.update();
    }

    pub fn is_complete(&self) -> bool {
        self.animation.is_complete()
    }

    /// Time to wait between updates.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.kind.frame_interval_ms())
    }

    /// Current frame as ANSI-colored text.
    pub fn render_ansi(&self) -> String {
        self.animation.render()
    }

    /// Draw the current frame over the whole terminal.
    pub fn draw(&self, frame: &mut Frame) {
        let lines = self.animation.canvas().lines();
        frame.render_widget(Paragraph::new(lines), frame.area());
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}
