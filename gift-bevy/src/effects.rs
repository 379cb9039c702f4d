//! Effect-to-animation mapping.
//!
//! Translates session responses into toasts, status lines and cosmetic
//! animations.

use bevy::prelude::*;
use gift_core::secret::Reward;
use gift_core::session::SessionResponse;
use gift_core::Effect;

use crate::animations;
use crate::state::GiftState;

/// Route everything a session call produced.
pub fn process_response(
    state: &mut GiftState,
    response: &SessionResponse,
    commands: &mut Commands,
    time: f64,
) {
    for effect in &response.effects {
        process_effect(state, effect, commands, time);
    }
    for notice in &response.notices {
        state.push_toast(notice.clone(), time);
    }
}

/// Process a store effect and trigger appropriate animations.
pub fn process_effect(state: &mut GiftState, effect: &Effect, commands: &mut Commands, time: f64) {
    match effect {
        Effect::SceneChanged { from, to } => {
            debug!(%from, %to, "scene changed");
        }

        Effect::NightModeChanged(night) => {
            let message = if *night {
                "Night falls over the island"
            } else {
                "Good morning, sunshine"
            };
            state.set_status(message, time);
        }

        Effect::SecretUnlocked { code, reward } => {
            info!(%code, %reward, "secret unlocked");
            let hue = match reward {
                Reward::Fireworks => 0.95,
                Reward::Star => 0.14,
                Reward::Letter => 0.85,
            };
            animations::spawn_heart_burst(commands, hue);
        }

        Effect::StarRevealed(id) => {
            state.set_status("A new star shines for us!", time);
            animations::spawn_star_reveal(commands, id.clone());
        }

        Effect::BuildingSelected(id) => {
            debug!(building = ?id, "building selection");
        }

        Effect::StarSelected(id) => {
            debug!(star = ?id, "star selection");
        }

        Effect::CameraMoved(_) | Effect::KeyRecorded(_) => {}
    }
}
