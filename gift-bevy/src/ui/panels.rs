//! Full-screen pages and the navigation bar.

use bevy_egui::egui;
use gift_core::session::Action;
use gift_core::Scene;

use crate::state::GiftState;

const ROSE: egui::Color32 = egui::Color32::from_rgb(255, 120, 180);
const LAVENDER: egui::Color32 = egui::Color32::from_rgb(190, 160, 255);

/// Render the opening title screen.
pub fn render_opening(ctx: &egui::Context, queued: &mut Vec<Action>) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::from_rgba_unmultiplied(8, 6, 22, 230)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.2);

                ui.heading(egui::RichText::new("Our Living").size(52.0).color(ROSE));
                ui.heading(egui::RichText::new("Little World").size(52.0));

                ui.add_space(24.0);
                ui.label(
                    egui::RichText::new(
                        "\"This is the world we've been building...\nmoment by moment.\"",
                    )
                    .size(20.0)
                    .italics()
                    .color(egui::Color32::LIGHT_GRAY),
                );

                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new(
                        "Explore our floating island, visit the tree that grows with us, \
                         the places where memories were made, and the stars of our journey.",
                    )
                    .color(egui::Color32::GRAY),
                );

                ui.add_space(40.0);
                let start = egui::Button::new(egui::RichText::new("♥  Enter Our World").size(20.0))
                    .fill(egui::Color32::from_rgb(200, 70, 130))
                    .rounding(24.0);
                if ui.add_sized([240.0, 48.0], start).clicked() {
                    queued.push(Action::Start);
                }
            });
        });
}

/// Render the navigation bar while exploring.
pub fn render_navigation(ctx: &egui::Context, state: &mut GiftState, queued: &mut Vec<Action>) {
    let scene = state.session.scene().clone();

    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new("Our Little World").color(ROSE));
            ui.separator();
            ui.label(
                egui::RichText::new(format!("{} days together", state.session.days_together()))
                    .color(LAVENDER),
            );

            if let Some(ref message) = state.status_message {
                ui.separator();
                ui.label(egui::RichText::new(message).italics());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button("Finale ♥")
                    .on_hover_text("A last word before you go")
                    .clicked()
                {
                    queued.push(Action::ShowFinal);
                }

                let (icon, hint) = if scene.night_mode {
                    ("☀", "Switch to day")
                } else {
                    ("☾", "Switch to night")
                };
                if ui.button(icon).on_hover_text(hint).clicked() {
                    queued.push(Action::ToggleNightMode);
                }
            });
        });
    });

    egui::TopBottomPanel::bottom("nav_bar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            for target in Scene::navigable() {
                let selected = scene.current_scene == target;
                if ui
                    .add_sized([90.0, 30.0], egui::SelectableLabel::new(selected, target.name()))
                    .clicked()
                    && !selected
                {
                    queued.push(Action::Navigate(target));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));

                let unlock = ui.button("Unlock");
                let response = ui.add_sized(
                    [140.0, 26.0],
                    egui::TextEdit::singleline(&mut state.code_input).hint_text("secret word..."),
                );

                let submitted = unlock.clicked() || (enter_pressed && response.lost_focus());
                if submitted && !state.code_input.trim().is_empty() {
                    let code = std::mem::take(&mut state.code_input);
                    queued.push(Action::EnterCode(code));
                }
            });
        });
        ui.add_space(4.0);
    });
}

/// Render the closing screen.
pub fn render_final(ctx: &egui::Context, days_together: u32, queued: &mut Vec<Action>) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::from_rgba_unmultiplied(12, 6, 28, 235)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.18);

                ui.label(egui::RichText::new("♥").size(64.0).color(ROSE));
                ui.add_space(12.0);
                ui.heading(
                    egui::RichText::new("\"We didn't just share moments...")
                        .size(34.0)
                        .italics(),
                );
                ui.heading(
                    egui::RichText::new("we built a world.\"")
                        .size(34.0)
                        .italics()
                        .color(ROSE),
                );

                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new("And I want to keep living in it, with you.")
                        .size(20.0)
                        .color(LAVENDER),
                );

                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new(format!("{days_together} days and counting"))
                        .color(egui::Color32::GRAY),
                );

                ui.add_space(40.0);
                if ui
                    .add_sized([200.0, 44.0], egui::Button::new("Explore Again"))
                    .clicked()
                {
                    queued.push(Action::Replay);
                }
            });
        });
}
