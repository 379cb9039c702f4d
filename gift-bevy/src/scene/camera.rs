//! Camera easing and orbit controls.
//!
//! The session decides where the camera should be; this module eases toward
//! that target and lets the user orbit around it with the mouse.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use gift_core::session::Action;
use gift_core::CameraTarget;

use super::{point3, vec3};
use crate::state::{GiftAction, GiftState, Phase};

/// Easing rate toward the target, per second.
const EASE_RATE: f32 = 2.5;
/// Distance under which the camera counts as arrived.
const SETTLE_DISTANCE: f32 = 0.05;

/// Camera state that is not part of the session.
#[derive(Component)]
pub struct CameraRig {
    /// Point the camera currently looks at.
    pub look_at: Vec3,
    /// User orbit around the target, radians.
    pub yaw: f32,
    /// User zoom factor applied to the target distance.
    pub zoom: f32,
    /// Target the camera last settled at.
    settled_at: Option<Vec3>,
}

impl CameraRig {
    /// Desired eye position after user orbit and zoom.
    pub fn eye_for(&self, target: &CameraTarget) -> Vec3 {
        let look_at = vec3(target.look_at);
        let offset = vec3(target.position) - look_at;
        look_at + Quat::from_rotation_y(self.yaw) * offset * self.zoom
    }
}

pub fn spawn_camera(commands: &mut Commands, target: CameraTarget) {
    let look_at = vec3(target.look_at);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(vec3(target.position)).looking_at(look_at, Vec3::Y),
        CameraRig {
            look_at,
            yaw: 0.0,
            zoom: 1.0,
            settled_at: None,
        },
    ));
}

/// System to ease the camera toward the session's target.
pub fn ease_camera(
    time: Res<Time>,
    state: Res<GiftState>,
    mut actions: EventWriter<GiftAction>,
    mut query: Query<(&mut Transform, &mut CameraRig)>,
) {
    let target = state.session.camera_target();
    let factor = 1.0 - (-EASE_RATE * time.delta_secs()).exp();

    for (mut transform, mut rig) in query.iter_mut() {
        let eye = rig.eye_for(&target);
        let look_at = vec3(target.look_at);

        transform.translation = transform.translation.lerp(eye, factor);
        rig.look_at = rig.look_at.lerp(look_at, factor);
        let focus = rig.look_at;
        transform.look_at(focus, Vec3::Y);

        let arrived = transform.translation.distance(eye) < SETTLE_DISTANCE;
        if arrived && rig.settled_at != Some(eye) {
            rig.settled_at = Some(eye);
            actions.send(GiftAction(Action::SetCameraPosition(point3(eye))));
        }
    }
}

/// System for drag-to-orbit and scroll-to-zoom while exploring.
pub fn orbit_camera(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    phase: Res<State<Phase>>,
    mut contexts: EguiContexts,
    mut query: Query<&mut CameraRig>,
) {
    let drag: Vec2 = motion.read().map(|m| m.delta).sum();
    let scroll: f32 = wheel.read().map(|w| w.y).sum();

    if *phase.get() != Phase::Exploring || contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    for mut rig in query.iter_mut() {
        if buttons.pressed(MouseButton::Left) {
            rig.yaw -= drag.x * 0.005;
        }
        if scroll != 0.0 {
            rig.zoom = (rig.zoom - scroll * 0.08).clamp(0.5, 2.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gift_core::world::Point3;

    fn rig() -> CameraRig {
        CameraRig {
            look_at: Vec3::ZERO,
            yaw: 0.0,
            zoom: 1.0,
            settled_at: None,
        }
    }

    #[test]
    fn test_eye_without_orbit_is_target() {
        let target = CameraTarget::new(Point3::new(8.0, 8.0, 12.0), Point3::ORIGIN);
        assert!(rig().eye_for(&target).distance(Vec3::new(8.0, 8.0, 12.0)) < 1e-4);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let target = CameraTarget::new(Point3::new(3.0, 4.0, 5.0), Point3::new(0.0, 2.0, 0.0));
        let mut rig = rig();
        rig.yaw = 1.2;
        let eye = rig.eye_for(&target);
        let expected = vec3(target.position).distance(vec3(target.look_at));
        assert!((eye.distance(vec3(target.look_at)) - expected).abs() < 1e-4);

        rig.zoom = 0.5;
        let eye = rig.eye_for(&target);
        assert!((eye.distance(vec3(target.look_at)) - expected * 0.5).abs() < 1e-4);
    }
}
