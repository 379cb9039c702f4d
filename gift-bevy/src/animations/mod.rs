//! Cosmetic animations.
//!
//! Short-lived effects carry an [`AnimationLifetime`] and are despawned by
//! [`cleanup_finished_animations`]. Ambient motion (sway, float, twinkle,
//! fireflies) runs for the life of the scene.

pub mod ambient;
pub mod fireworks;

use bevy::prelude::*;

pub use ambient::{
    animate_fireflies, animate_float, animate_sway, animate_twinkle, FireflyDrift, Float, Sway,
    Twinkle,
};
pub use fireworks::{
    animate_fireworks, animate_star_reveals, drive_fireworks, spawn_heart_burst,
    spawn_star_reveal, FireworkParticle, FireworksShow, StarReveal,
};

/// Remaining time before an animation entity is despawned.
#[derive(Component)]
pub struct AnimationLifetime {
    pub remaining: f32,
}

/// System to despawn animations whose lifetime ran out.
pub fn cleanup_finished_animations(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut AnimationLifetime)>,
) {
    for (entity, mut lifetime) in query.iter_mut() {
        lifetime.remaining -= time.delta_secs();
        if lifetime.remaining <= 0.0 {
            commands.entity(entity).despawn_recursive();
        }
    }
}
