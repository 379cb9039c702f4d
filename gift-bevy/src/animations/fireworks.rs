//! Fireworks and unlock celebrations.
//!
//! Particles live in normalized screen space (0..1 on both axes, y down) and
//! are painted by the UI layer on top of the 3D view.

use bevy::prelude::*;
use gift_core::world::StarId;
use rand::Rng;

use super::AnimationLifetime;
use crate::state::GiftState;

/// Palette of the fireworks show.
pub const FIREWORK_COLORS: [Color; 7] = [
    Color::srgb(1.0, 0.42, 0.62),
    Color::srgb(0.31, 0.80, 0.77),
    Color::srgb(1.0, 0.90, 0.43),
    Color::srgb(1.0, 0.55, 0.58),
    Color::srgb(0.66, 0.90, 0.81),
    Color::srgb(1.0, 0.28, 0.34),
    Color::srgb(0.48, 0.93, 0.62),
];

/// Bursts fired back to back when a show starts.
const OPENING_BURSTS: u32 = 5;
const OPENING_INTERVAL: f32 = 0.5;
const BURST_INTERVAL: f32 = 1.5;
const BURST_CHANCE: f64 = 0.7;
const GRAVITY: f32 = 0.12;

/// A single spark.
#[derive(Component)]
pub struct FireworkParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
    pub age: f32,
    pub life: f32,
    pub radius: f32,
}

impl FireworkParticle {
    /// Opacity from 1 at birth to 0 at end of life.
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.life).clamp(0.0, 1.0)
    }
}

/// Scheduling state of the running show.
#[derive(Resource, Default)]
pub struct FireworksShow {
    running: bool,
    bursts_fired: u32,
    until_next: f32,
}

impl FireworksShow {
    /// Advance the schedule; returns how many bursts to fire now.
    pub fn tick(&mut self, dt: f32, roll: f64) -> u32 {
        if !self.running {
            self.running = true;
            self.bursts_fired = 0;
            self.until_next = 0.0;
        }
        self.until_next -= dt;
        if self.until_next > 0.0 {
            return 0;
        }

        if self.bursts_fired < OPENING_BURSTS {
            self.bursts_fired += 1;
            self.until_next = OPENING_INTERVAL;
            1
        } else {
            self.until_next = BURST_INTERVAL;
            u32::from(roll < BURST_CHANCE)
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Spawn one burst of 20-35 sparks around `center`.
fn spawn_burst(commands: &mut Commands, rng: &mut impl Rng, center: Vec2, color: Color) {
    let count = rng.gen_range(20..35);
    for i in 0..count {
        let angle = i as f32 / count as f32 * std::f32::consts::TAU;
        let speed = 0.08 + rng.gen::<f32>() * 0.12;
        let life = 1.2 + rng.gen::<f32>() * 0.8;
        commands.spawn((
            FireworkParticle {
                position: center,
                velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                age: 0.0,
                life,
                radius: 2.0 + rng.gen::<f32>() * 2.0,
            },
            AnimationLifetime { remaining: life },
        ));
    }
}

/// System to fire bursts while the session's fireworks show is on.
pub fn drive_fireworks(
    mut commands: Commands,
    state: Res<GiftState>,
    mut show: ResMut<FireworksShow>,
    time: Res<Time>,
) {
    if !state.session.fireworks_active() {
        if show.is_running() {
            debug!("fireworks show over");
            show.stop();
        }
        return;
    }

    let mut rng = rand::thread_rng();
    let bursts = show.tick(time.delta_secs(), rng.gen());
    for _ in 0..bursts {
        let center = Vec2::new(0.1 + rng.gen::<f32>() * 0.8, 0.1 + rng.gen::<f32>() * 0.5);
        let color = FIREWORK_COLORS[rng.gen_range(0..FIREWORK_COLORS.len())];
        spawn_burst(&mut commands, &mut rng, center, color);
    }
}

/// Celebrate an unlock with a single burst in the middle of the screen.
pub fn spawn_heart_burst(commands: &mut Commands, hue: f32) {
    let mut rng = rand::thread_rng();
    let color = Color::hsl(hue * 360.0, 0.85, 0.65);
    spawn_burst(commands, &mut rng, Vec2::new(0.5, 0.4), color);
}

/// System to move sparks.
pub fn animate_fireworks(time: Res<Time>, mut query: Query<&mut FireworkParticle>) {
    let dt = time.delta_secs();
    for mut particle in query.iter_mut() {
        particle.velocity.y += GRAVITY * dt;
        particle.velocity *= 1.0 - 0.8 * dt;
        let step = particle.velocity * dt;
        particle.position += step;
        particle.age += dt;
    }
}

/// Pulse on a freshly revealed star.
#[derive(Component)]
pub struct StarReveal {
    pub star: StarId,
    pub elapsed: f32,
    pub duration: f32,
}

impl StarReveal {
    /// Scale multiplier: swells then settles back to 1.
    pub fn scale(&self) -> f32 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        1.0 + 2.0 * (t * std::f32::consts::PI).sin()
    }
}

pub fn spawn_star_reveal(commands: &mut Commands, star: StarId) {
    let duration = 2.0;
    commands.spawn((
        StarReveal {
            star,
            elapsed: 0.0,
            duration,
        },
        AnimationLifetime {
            remaining: duration + 0.1,
        },
    ));
}

/// System to advance reveal pulses.
pub fn animate_star_reveals(time: Res<Time>, mut query: Query<&mut StarReveal>) {
    for mut reveal in query.iter_mut() {
        reveal.elapsed += time.delta_secs();
    }
}
