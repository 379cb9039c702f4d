//! Application state and the action channel.
//!
//! The [`GiftState`] resource owns the session. Input systems never touch it
//! directly: they send [`GiftAction`] events, and [`apply_actions`] drains
//! them once per frame, applies them, and routes the results to effects.

use bevy::prelude::*;
use gift_core::session::{Action, Notice};
use gift_core::GiftSession;

use crate::effects;

/// How long a toast stays on screen, in seconds.
pub const TOAST_SECONDS: f64 = 3.0;

/// Top-level phase of the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, States)]
pub enum Phase {
    /// Title screen over the world
    #[default]
    Opening,
    /// Free exploration
    Exploring,
    /// Closing message
    Final,
}

impl Phase {
    /// The phase a session is currently in.
    pub fn of(session: &GiftSession) -> Self {
        if session.showing_opening() {
            Phase::Opening
        } else if session.showing_final() {
            Phase::Final
        } else {
            Phase::Exploring
        }
    }
}

/// A user action on its way to the session.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct GiftAction(pub Action);

/// A notice being displayed.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: f64,
}

/// Main application state resource.
#[derive(Resource)]
pub struct GiftState {
    /// The running session.
    pub session: GiftSession,
    /// Toasts currently on screen, oldest first.
    pub toasts: Vec<Toast>,
    /// Contents of the secret code field.
    pub code_input: String,
    /// Status line in the navigation bar.
    pub status_message: Option<String>,
    /// When the status message was set (for auto-clear).
    pub status_set_time: Option<f64>,
}

impl GiftState {
    pub fn new(session: GiftSession) -> Self {
        Self {
            session,
            toasts: Vec::new(),
            code_input: String::new(),
            status_message: None,
            status_set_time: None,
        }
    }

    pub fn push_toast(&mut self, notice: Notice, time: f64) {
        self.toasts.push(Toast {
            notice,
            shown_at: time,
        });
        // Keep the stack short
        if self.toasts.len() > 4 {
            self.toasts.remove(0);
        }
    }

    /// Drop toasts older than [`TOAST_SECONDS`].
    pub fn expire_toasts(&mut self, time: f64) {
        self.toasts.retain(|t| time - t.shown_at <= TOAST_SECONDS);
    }

    /// Set a status message (with timestamp for auto-clear).
    pub fn set_status(&mut self, message: impl Into<String>, current_time: f64) {
        self.status_message = Some(message.into());
        self.status_set_time = Some(current_time);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_set_time = None;
    }
}

/// System to drain queued actions into the session.
pub fn apply_actions(
    mut actions: EventReader<GiftAction>,
    mut state: ResMut<GiftState>,
    mut commands: Commands,
    time: Res<Time>,
) {
    for GiftAction(action) in actions.read() {
        let response = state.session.perform(action.clone());
        effects::process_response(&mut state, &response, &mut commands, time.elapsed_secs_f64());
    }
}

/// System to keep the Bevy phase in step with the session.
pub fn sync_phase(
    state: Res<GiftState>,
    phase: Res<State<Phase>>,
    mut next_phase: ResMut<NextState<Phase>>,
) {
    let wanted = Phase::of(&state.session);
    if *phase.get() != wanted {
        info!(from = ?phase.get(), to = ?wanted, "phase change");
        next_phase.set(wanted);
    }
}

/// System to advance session timers.
pub fn tick_session(mut state: ResMut<GiftState>, time: Res<Time>) {
    state.session.advance(time.delta_secs());
}

/// System to clear old toasts and status messages.
pub fn clear_old_status(mut state: ResMut<GiftState>, time: Res<Time>) {
    let now = time.elapsed_secs_f64();
    state.expire_toasts(now);
    if let Some(set_time) = state.status_set_time {
        if now - set_time > TOAST_SECONDS {
            state.clear_status();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gift_core::WorldConfig;

    fn state() -> GiftState {
        GiftState::new(GiftSession::new(WorldConfig::new().with_seed(3)))
    }

    #[test]
    fn test_phase_follows_session() {
        let mut state = state();
        assert_eq!(Phase::of(&state.session), Phase::Opening);
        state.session.start();
        assert_eq!(Phase::of(&state.session), Phase::Exploring);
        state.session.show_final();
        assert_eq!(Phase::of(&state.session), Phase::Final);
        state.session.replay();
        assert_eq!(Phase::of(&state.session), Phase::Exploring);
    }

    #[test]
    fn test_toasts_expire() {
        let mut state = state();
        state.push_toast(Notice::info("a", "b"), 0.0);
        state.push_toast(Notice::info("c", "d"), 2.0);
        state.expire_toasts(3.5);
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].notice.title, "c");
    }

    #[test]
    fn test_toast_stack_bounded() {
        let mut state = state();
        for i in 0..10 {
            state.push_toast(Notice::success(format!("{i}"), ""), 0.0);
        }
        assert_eq!(state.toasts.len(), 4);
        assert_eq!(state.toasts[0].notice.title, "6");
    }
}
