//! Keyboard shortcuts and the secret key listener.

use bevy::app::AppExit;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use gift_core::session::Action;

use crate::state::GiftAction;

/// Handle keyboard input for shortcuts and secret codes.
pub fn handle_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut keyboard: EventReader<KeyboardInput>,
    mut contexts: EguiContexts,
    mut actions: EventWriter<GiftAction>,
    mut exit: EventWriter<AppExit>,
) {
    let ctx = contexts.ctx_mut();

    // Ctrl+Q / Cmd+Q to quit (works anywhere)
    let ctrl_pressed = keys.pressed(KeyCode::ControlLeft)
        || keys.pressed(KeyCode::ControlRight)
        || keys.pressed(KeyCode::SuperLeft)
        || keys.pressed(KeyCode::SuperRight);

    if ctrl_pressed && keys.just_pressed(KeyCode::KeyQ) {
        exit.send(AppExit::Success);
        return;
    }

    if keys.just_pressed(KeyCode::Escape) {
        actions.send(GiftAction(Action::Dismiss));
    }

    // Keystrokes typed into the code field are submitted from there
    if ctx.wants_keyboard_input() || ctrl_pressed {
        keyboard.clear();
        return;
    }

    for event in keyboard.read() {
        if event.state != ButtonState::Pressed || event.repeat {
            continue;
        }
        if let Key::Character(text) = &event.logical_key {
            for ch in text.chars().filter(char::is_ascii_alphabetic) {
                actions.send(GiftAction(Action::TypeKey(ch)));
            }
        }
    }
}
