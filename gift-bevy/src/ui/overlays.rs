//! Dialogs, toasts, labels and screen-space particles drawn over the world.

use bevy_egui::egui;
use gift_core::session::Action;
use gift_core::world::{Memory, StarId, StarKind};
use gift_core::{GiftSession, Reward};

use super::{notice_color, WorldLabel};
use crate::animations::FireworkParticle;
use crate::state::Toast;

const ROSE: egui::Color32 = egui::Color32::from_rgb(255, 120, 180);
const GOLD: egui::Color32 = egui::Color32::from_rgb(255, 215, 120);
const CYAN: egui::Color32 = egui::Color32::from_rgb(120, 220, 245);

fn dialog(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([380.0, 0.0])
}

/// Render the detail card of a building's memory.
pub fn render_memory_dialog(ctx: &egui::Context, memory: &Memory, queued: &mut Vec<Action>) {
    dialog("Memory").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(&memory.icon).size(40.0));
            ui.heading(egui::RichText::new(&memory.title).color(ROSE));
            match memory.date {
                Some(date) => {
                    ui.label(
                        egui::RichText::new(date.format("%B %-d, %Y").to_string())
                            .color(egui::Color32::GRAY),
                    );
                }
                None => {
                    ui.label(egui::RichText::new("Someday").italics().color(CYAN));
                }
            }
        });

        ui.separator();
        ui.label(&memory.description);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(memory.kind.name()).small().color(GOLD));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    queued.push(Action::CloseMemory);
                }
            });
        });
    });
}

/// Render the detail card of a constellation star.
pub fn render_star_dialog(
    ctx: &egui::Context,
    session: &GiftSession,
    id: &StarId,
    queued: &mut Vec<Action>,
) {
    let Some(star) = session.store().star(id) else {
        return;
    };

    dialog("Star").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            let (glyph, color) = match star.kind {
                StarKind::Unlocked => ("★", GOLD),
                StarKind::Future => ("✦", CYAN),
                StarKind::Locked => ("☆", egui::Color32::GRAY),
                StarKind::Secret => ("♥", ROSE),
            };
            ui.label(egui::RichText::new(glyph).size(40.0).color(color));
            ui.heading(egui::RichText::new(star.display_label()).color(color));
        });

        ui.separator();
        match star.kind {
            StarKind::Unlocked => {
                let memory = star.memory.as_ref().and_then(|m| session.store().memory(m));
                match memory {
                    Some(memory) => {
                        ui.label(egui::RichText::new(&memory.title).strong());
                        ui.label(&memory.description);
                    }
                    None => {
                        ui.label("A moment we already lived, shining forever.");
                    }
                }
            }
            StarKind::Future => {
                ui.label("A moment still waiting for us.");
                let now = chrono::Local::now().naive_local();
                if let Some(countdown) = session.star_countdown(id, now) {
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(format!("Only {countdown} to go"))
                            .monospace()
                            .color(CYAN),
                    );
                }
            }
            StarKind::Locked => {
                ui.label("This one is still a mystery.");
            }
            StarKind::Secret => {
                ui.label("You found the star that only shows itself to those who know the word.");
            }
        }

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.button("Close").clicked() {
                queued.push(Action::CloseStar);
            }
        });
    });
}

/// Render the reward dialog after a code unlocks.
pub fn render_secret_dialog(ctx: &egui::Context, reward: Reward, queued: &mut Vec<Action>) {
    let (title, body) = match reward {
        Reward::Fireworks => (
            "Fireworks of Love!",
            "Close this and look up. The sky is about to celebrate us.",
        ),
        Reward::Star => (
            "Secret Star Unlocked!",
            "A new star has joined our constellation. Find it in the sky.",
        ),
        Reward::Letter => (
            "A Secret Letter",
            "If you are reading this, you know me well enough to guess the word. \
             Every day with you adds another leaf to our tree, and I can't wait \
             to see how tall it grows.",
        ),
    };

    dialog("Secret").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("♥").size(44.0).color(ROSE));
            ui.heading(egui::RichText::new(title).color(ROSE));
        });
        ui.separator();
        ui.label(egui::RichText::new(body).italics());
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.button("♥ Close").clicked() {
                queued.push(Action::CloseSecret);
            }
        });
    });
}

/// Render the stacked toasts in the top right corner.
pub fn render_toasts(ctx: &egui::Context, toasts: &[Toast]) {
    for (i, toast) in toasts.iter().enumerate() {
        let accent = notice_color(toast.notice.level);
        egui::Area::new(egui::Id::new(("toast", i)))
            .anchor(egui::Align2::RIGHT_TOP, [-16.0, 56.0 + i as f32 * 72.0])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.5, accent))
                    .show(ui, |ui| {
                        ui.set_max_width(260.0);
                        ui.label(egui::RichText::new(&toast.notice.title).strong().color(accent));
                        ui.label(egui::RichText::new(&toast.notice.detail).small());
                    });
            });
    }
}

/// Render building labels at their projected screen positions.
pub fn render_world_labels(ctx: &egui::Context, labels: &[WorldLabel]) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    for label in labels {
        painter.text(
            label.screen,
            egui::Align2::CENTER_BOTTOM,
            &label.text,
            egui::FontId::proportional(15.0),
            egui::Color32::WHITE,
        );
    }
}

/// Paint firework sparks, stored in normalized screen coordinates.
pub fn render_fireworks<'a>(
    ctx: &egui::Context,
    particles: impl Iterator<Item = &'a FireworkParticle>,
) {
    let rect = ctx.screen_rect();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("fireworks"),
    ));

    for particle in particles {
        let srgba = particle.color.to_srgba();
        let alpha = (particle.alpha() * 255.0) as u8;
        let color = egui::Color32::from_rgba_unmultiplied(
            (srgba.red * 255.0) as u8,
            (srgba.green * 255.0) as u8,
            (srgba.blue * 255.0) as u8,
            alpha,
        );
        let center = egui::pos2(
            rect.left() + particle.position.x * rect.width(),
            rect.top() + particle.position.y * rect.height(),
        );
        painter.circle_filled(center, particle.radius, color);
    }
}
