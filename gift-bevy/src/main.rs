//! Our Living Little World - an interactive 3D keepsake built with Bevy.
//!
//! A floating island holds a tree that grows one leaf cluster per hundred
//! days together, a building for every shared memory, and a constellation
//! of past and future moments overhead. It features:
//! - Opening and closing screens
//! - Scene navigation with an easing camera
//! - Day and night modes with fireflies
//! - Clickable buildings, stars and milestone branches
//! - Secret codes that unlock fireworks, a hidden star and a letter

mod animations;
mod effects;
mod scene;
mod state;
mod ui;

use anyhow::Context;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::animations::FireworksShow;
use crate::state::{GiftAction, GiftState, Phase};
use crate::ui::WorldLabels;
use gift_core::{GiftSession, WorldConfig};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = WorldConfig::from_env().context("invalid world configuration")?;
    let session = GiftSession::new(config);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Our Living Little World".into(),
                resolution: (1280., 800.).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((EguiPlugin, MeshPickingPlugin))
        // App state
        .init_state::<Phase>()
        .add_event::<GiftAction>()
        .insert_resource(GiftState::new(session))
        .init_resource::<WorldLabels>()
        .init_resource::<FireworksShow>()
        // Startup systems
        .add_systems(Startup, scene::setup_world)
        // Update systems - UI
        .add_systems(
            Update,
            (
                ui::handle_keyboard_input,
                ui::collect_world_labels,
                ui::main_ui_system,
            )
                .chain(),
        )
        // Update systems - session
        .add_systems(
            Update,
            (
                state::apply_actions,
                state::sync_phase,
                state::tick_session,
                state::clear_old_status,
            )
                .chain()
                .after(ui::main_ui_system),
        )
        // Update systems - world
        .add_systems(
            Update,
            (
                scene::camera::ease_camera,
                scene::camera::orbit_camera,
                scene::apply_night_mode,
                scene::buildings::highlight_selected_building,
                scene::sky::sync_star_kinds,
                scene::sky::draw_constellation,
                scene::sky::pulse_revealed_stars.after(animations::animate_twinkle),
            ),
        )
        // Update systems - animations
        .add_systems(
            Update,
            (
                animations::animate_sway,
                animations::animate_float,
                animations::animate_twinkle,
                animations::animate_fireflies,
                animations::drive_fireworks,
                animations::animate_fireworks,
                animations::animate_star_reveals,
                animations::cleanup_finished_animations,
            ),
        )
        .run();

    Ok(())
}
