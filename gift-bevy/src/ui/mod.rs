//! UI module - egui screens, navigation and dialogs.

mod input;
mod overlays;
mod panels;

pub use input::handle_keyboard_input;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use gift_core::session::Action;

use crate::animations::FireworkParticle;
use crate::scene::buildings::BuildingMarker;
use crate::state::{GiftAction, GiftState, Phase};

/// A label pinned above something in the 3D world.
#[derive(Debug, Clone)]
pub struct WorldLabel {
    pub screen: egui::Pos2,
    pub text: String,
}

/// Building labels projected to the screen this frame.
#[derive(Resource, Default)]
pub struct WorldLabels(pub Vec<WorldLabel>);

/// Main UI system - renders all egui panels.
pub fn main_ui_system(
    mut contexts: EguiContexts,
    mut state: ResMut<GiftState>,
    phase: Res<State<Phase>>,
    labels: Res<WorldLabels>,
    particles: Query<&FireworkParticle>,
    mut actions: EventWriter<GiftAction>,
) {
    let ctx = contexts.ctx_mut();

    // Configure egui style
    configure_style(ctx);

    let mut queued: Vec<Action> = Vec::new();

    match phase.get() {
        Phase::Opening => {
            panels::render_opening(ctx, &mut queued);
        }
        Phase::Exploring => {
            // Panels first so windows float above them
            panels::render_navigation(ctx, &mut state, &mut queued);
            overlays::render_world_labels(ctx, &labels.0);

            let dialogs = state.session.dialogs().clone();
            if let Some(id) = &dialogs.memory {
                if let Some(memory) = state.session.store().memory(id) {
                    overlays::render_memory_dialog(ctx, memory, &mut queued);
                }
            }
            if let Some(id) = &dialogs.star {
                overlays::render_star_dialog(ctx, &state.session, id, &mut queued);
            }
            if let Some(reward) = dialogs.secret {
                overlays::render_secret_dialog(ctx, reward, &mut queued);
            }
        }
        Phase::Final => {
            panels::render_final(ctx, state.session.days_together(), &mut queued);
        }
    }

    overlays::render_fireworks(ctx, particles.iter());
    overlays::render_toasts(ctx, &state.toasts);

    for action in queued {
        actions.send(GiftAction(action));
    }
}

/// System to project building labels into screen space.
pub fn collect_world_labels(
    mut labels: ResMut<WorldLabels>,
    state: Res<GiftState>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    buildings: Query<(&BuildingMarker, &GlobalTransform)>,
) {
    labels.0.clear();
    let scene = state.session.scene().current_scene;
    if scene != gift_core::Scene::Island && scene != gift_core::Scene::Building {
        return;
    }
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    for (building, transform) in buildings.iter() {
        let anchor = transform.translation() + Vec3::Y * 2.4;
        if let Ok(screen) = camera.world_to_viewport(camera_transform, anchor) {
            labels.0.push(WorldLabel {
                screen: egui::pos2(screen.x, screen.y),
                text: format!("{} {}", building.icon, building.title),
            });
        }
    }
}

/// Configure egui visual style.
fn configure_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    // Increase default font sizes
    use egui::{FontId, TextStyle};
    style.text_styles = [
        (TextStyle::Small, FontId::proportional(13.0)),
        (TextStyle::Body, FontId::proportional(16.0)),
        (TextStyle::Monospace, FontId::monospace(15.0)),
        (TextStyle::Button, FontId::proportional(16.0)),
        (TextStyle::Heading, FontId::proportional(24.0)),
    ]
    .into();

    // Night-sky theme with rose accents
    let visuals = &mut style.visuals;
    visuals.dark_mode = true;
    visuals.override_text_color = Some(egui::Color32::from_rgb(245, 235, 245));
    visuals.window_fill = egui::Color32::from_rgba_unmultiplied(22, 18, 40, 235);
    visuals.panel_fill = egui::Color32::from_rgba_unmultiplied(16, 14, 32, 220);
    visuals.faint_bg_color = egui::Color32::from_rgb(40, 34, 64);
    visuals.extreme_bg_color = egui::Color32::from_rgb(12, 10, 26);
    visuals.window_rounding = egui::Rounding::same(12.0);

    visuals.selection.bg_fill = egui::Color32::from_rgb(200, 70, 130);
    visuals.hyperlink_color = egui::Color32::from_rgb(255, 150, 200);

    visuals.widgets.noninteractive.bg_fill = egui::Color32::from_rgb(36, 30, 58);
    visuals.widgets.inactive.bg_fill = egui::Color32::from_rgb(52, 44, 82);
    visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(110, 60, 120);
    visuals.widgets.hovered.bg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(255, 150, 200));
    visuals.widgets.active.bg_fill = egui::Color32::from_rgb(200, 70, 130);
    visuals.widgets.active.bg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(255, 200, 230));

    ctx.set_style(style);
}

/// Color of a toast or accent by notice level.
pub(crate) fn notice_color(level: gift_core::NoticeLevel) -> egui::Color32 {
    match level {
        gift_core::NoticeLevel::Success => egui::Color32::from_rgb(255, 150, 200),
        gift_core::NoticeLevel::Info => egui::Color32::from_rgb(140, 200, 255),
    }
}
