//! Fireworks (physics particles).
//!
//! Rockets and sparks live in one flat list and are told apart by
//! [`ParticleKind`]. Every particle loses one tick of life per update and is
//! dropped with `swap_remove` in the same pass that moves it. A rocket that
//! reaches its apex or burns its fuse is replaced by a burst of sparks, staged
//! in a scratch buffer that is reused from tick to tick.

use std::f32::consts::TAU;

use rand::{Rng, rngs::StdRng};
use ratatui::style::Color;

use super::{Animation, grid_size};
use crate::canvas::Canvas;
use crate::chars::{ROCKET_CHAR, SPARK_CHARS};
use crate::color::dim;
use crate::palette::{Palette, PaletteFamily};

/// Fireworks settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FireworksConfig {
    pub width: u16,
    pub height: u16,
    /// Spark colors, drawn uniformly.
    pub palette: Palette,
    /// Shortest wait between launches, in ticks.
    pub launch_min: u32,
    /// Longest wait between launches, in ticks.
    pub launch_max: u32,
    pub sparks_min: u32,
    pub sparks_max: u32,
    /// Downward acceleration per tick.
    pub gravity: f32,
    /// Velocity multiplier per tick.
    pub drag: f32,
    pub spark_life_min: u32,
    pub spark_life_max: u32,
    /// Total particle cap.
    pub max_particles: usize,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            palette: Palette::resolve(PaletteFamily::Fireworks, ""),
            launch_min: 6,
            launch_max: 22,
            sparks_min: 24,
            sparks_max: 40,
            gravity: 0.035,
            drag: 0.94,
            spark_life_min: 14,
            spark_life_max: 32,
            max_particles: 800,
        }
    }
}

impl FireworksConfig {
    /// Default settings with the theme's fireworks palette.
    pub fn for_theme(width: u16, height: u16, theme: &str) -> Self {
        Self {
            width,
            height,
            palette: Palette::resolve(PaletteFamily::Fireworks, theme),
            ..Self::default()
        }
    }
}

/// Phase of a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    /// Ascending shell that bursts at row `apex`.
    Rocket { apex: f32 },
    /// Burning fragment of a burst.
    Spark,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Unique, monotonically assigned identifier.
    pub id: u64,
    pub kind: ParticleKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining ticks; never zero while in the list.
    pub life: u32,
    pub max_life: u32,
    pub color: Color,
}

impl Particle {
    pub fn is_spark(&self) -> bool {
        matches!(self.kind, ParticleKind::Spark)
    }
}

#[derive(Debug, Clone, Copy)]
struct Burst {
    x: f32,
    y: f32,
}

/// Rockets launched from the bottom edge that burst into fading sparks.
#[derive(Debug)]
pub struct FireworksEffect {
    config: FireworksConfig,
    particles: Vec<Particle>,
    bursts: Vec<Burst>,
    next_id: u64,
    /// Ticks until the next launch.
    cooldown: u32,
    rng: StdRng,
    canvas: Canvas,
}

impl FireworksEffect {
    pub fn new(mut config: FireworksConfig, rng: StdRng) -> Self {
        let (width, height) = grid_size(config.width, config.height);
        config.width = width;
        config.height = height;
        config.launch_max = config.launch_max.max(config.launch_min);
        config.sparks_max = config.sparks_max.max(config.sparks_min);
        config.spark_life_min = config.spark_life_min.max(1);
        config.spark_life_max = config.spark_life_max.max(config.spark_life_min);

        let capacity = config.max_particles;
        let mut fireworks = Self {
            config,
            particles: Vec::with_capacity(capacity),
            bursts: Vec::new(),
            next_id: 0,
            cooldown: 0,
            rng,
            canvas: Canvas::new(width, height),
        };
        tracing::debug!(width, height, capacity, "fireworks effect created");
        fireworks.paint();
        fireworks
    }

    /// Particles in flight.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn launch(&mut self) {
        let w = self.config.width as f32;
        let h = self.config.height as f32;
        let x = self.rng.gen_range(w / 6.0..=w * 5.0 / 6.0);
        let y = h - 1.0;
        let apex = self.rng.gen_range(h * 0.15..=h * 0.5);
        let speed = self.rng.gen_range(0.5..1.0);
        let ticks = ((y - apex) / speed).ceil().max(1.0) as u32;
        let fuse = self.rng.gen_range(ticks * 3 / 4..=ticks + 2).max(1);
        let id = self.next_id();
        let color = self.config.palette.pick(&mut self.rng);
        self.particles.push(Particle {
            id,
            kind: ParticleKind::Rocket { apex },
            x,
            y,
            vx: self.rng.gen_range(-0.15..=0.15),
            vy: -speed,
            life: fuse,
            max_life: fuse,
            color,
        });
        tracing::trace!(id, x, apex, "rocket launched");
    }

    fn explode(&mut self, burst: Burst) {
        let room = self.config.max_particles.saturating_sub(self.particles.len());
        let count = self
            .rng
            .gen_range(self.config.sparks_min..=self.config.sparks_max) as usize;
        let count = count.min(room);
        tracing::trace!(x = burst.x, y = burst.y, count, "rocket burst");
        for _ in 0..count {
            let angle = self.rng.gen_range(0.0..TAU);
            let speed = self.rng.gen_range(0.2..1.1);
            let life = self
                .rng
                .gen_range(self.config.spark_life_min..=self.config.spark_life_max);
            let id = self.next_id();
            let color = self.config.palette.pick(&mut self.rng);
            self.particles.push(Particle {
                id,
                kind: ParticleKind::Spark,
                x: burst.x,
                y: burst.y,
                // Cells are about twice as tall as wide
                vx: angle.cos() * speed * 2.0,
                vy: angle.sin() * speed,
                life,
                max_life: life,
                color,
            });
        }
    }

    /// Age, move and expire every particle in one pass.
    fn step(&mut self) {
        let FireworksConfig { gravity, drag, .. } = self.config;
        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];
            p.life -= 1;
            match p.kind {
                ParticleKind::Rocket { apex } => {
                    p.x += p.vx;
                    p.y += p.vy;
                    if p.y <= apex || p.life == 0 {
                        self.bursts.push(Burst { x: p.x, y: p.y });
                        self.particles.swap_remove(i);
                        continue;
                    }
                }
                ParticleKind::Spark => {
                    p.vy += gravity;
                    p.vx *= drag;
                    p.vy *= drag;
                    p.x += p.vx;
                    p.y += p.vy;
                    if p.life == 0 {
                        self.particles.swap_remove(i);
                        continue;
                    }
                }
            }
            i += 1;
        }

        let mut bursts = std::mem::take(&mut self.bursts);
        for burst in bursts.drain(..) {
            self.explode(burst);
        }
        self.bursts = bursts;
    }

    fn paint(&mut self) {
        self.canvas.clear();
        for p in &self.particles {
            let (x, y) = (p.x.round() as i32, p.y.round() as i32);
            match p.kind {
                ParticleKind::Rocket { .. } => {
                    self.canvas.paint(x, y, ROCKET_CHAR, Some(p.color));
                }
                ParticleKind::Spark => {
                    let remaining = p.life as f32 / p.max_life.max(1) as f32;
                    let color = dim(p.color, 0.35 + 0.65 * remaining);
                    self.canvas.paint(x, y, spark_glyph(p.life, p.max_life), Some(color));
                }
            }
        }
    }
}

/// Glyph for a spark with `life` of `max_life` ticks left.
fn spark_glyph(life: u32, max_life: u32) -> char {
    let max_life = max_life.max(1);
    let spent = max_life - life.min(max_life);
    let idx = spent as usize * SPARK_CHARS.len() / max_life as usize;
    SPARK_CHARS[idx.min(SPARK_CHARS.len() - 1)]
}

impl Animation for FireworksEffect {
    fn update(&mut self) {
        if self.cooldown == 0 {
            if self.particles.len() < self.config.max_particles {
                self.launch();
            }
            self.cooldown = self
                .rng
                .gen_range(self.config.launch_min..=self.config.launch_max);
        } else {
            self.cooldown -= 1;
        }
        self.step();
        self.paint();
    }

    fn reset(&mut self) {
        self.particles.clear();
        self.bursts.clear();
        self.cooldown = 0;
        tracing::debug!("fireworks reset");
        self.paint();
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}
