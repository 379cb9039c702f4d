//! The 3D world: island, tree, buildings, sky and camera.

pub mod buildings;
pub mod camera;
pub mod island;
pub mod sky;
pub mod tree;

use bevy::prelude::*;
use gift_core::world::Point3;

use crate::state::{GiftState, Phase};

/// Convert a domain point into a Bevy vector.
pub fn vec3(p: Point3) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

pub fn point3(v: Vec3) -> Point3 {
    Point3::new(v.x, v.y, v.z)
}

/// Transform that stretches a unit-height Y-aligned mesh from `start` to `end`.
pub fn segment_transform(start: Vec3, end: Vec3) -> Transform {
    let delta = end - start;
    let direction = delta.try_normalize().unwrap_or(Vec3::Y);
    Transform::from_translation((start + end) / 2.0)
        .with_rotation(Quat::from_rotation_arc(Vec3::Y, direction))
        .with_scale(Vec3::new(1.0, delta.length().max(0.001), 1.0))
}

/// Whether pointer clicks on the world should be handled.
pub fn accepts_clicks(phase: &State<Phase>) -> bool {
    *phase.get() == Phase::Exploring
}

/// Marker for the sun/moon light.
#[derive(Component)]
pub struct SkyLight;

/// Startup system that builds the whole world from the session.
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<GiftState>,
) {
    let session = &state.session;

    camera::spawn_camera(&mut commands, session.camera_target());

    commands.spawn((
        DirectionalLight {
            illuminance: light_consts::lux::OVERCAST_DAY,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        SkyLight,
    ));

    island::spawn_island(&mut commands, &mut meshes, &mut materials);
    tree::spawn_tree(&mut commands, &mut meshes, &mut materials, session.tree());
    buildings::spawn_buildings(
        &mut commands,
        &mut meshes,
        &mut materials,
        session.store().memories(),
    );
    sky::spawn_sky(&mut commands, &mut meshes, &mut materials, session.store().stars());

    info!(
        branches = session.tree().branches.len(),
        memories = session.store().memories().len(),
        stars = session.store().stars().len(),
        "world spawned"
    );
}

/// System to switch lighting and night-only decorations.
pub fn apply_night_mode(
    state: Res<GiftState>,
    mut clear_color: ResMut<ClearColor>,
    mut ambient: ResMut<AmbientLight>,
    mut lights: Query<&mut DirectionalLight, With<SkyLight>>,
    mut fireflies: Query<
        &mut Visibility,
        (With<tree::FireflyMarker>, Without<sky::BackgroundStar>),
    >,
    mut background: Query<
        &mut Visibility,
        (With<sky::BackgroundStar>, Without<tree::FireflyMarker>),
    >,
) {
    let scene = state.session.scene();
    let night = scene.night_mode;

    let (clear, ambient_brightness, sun) = if night {
        (Color::srgb(0.03, 0.03, 0.09), 60.0, 600.0)
    } else {
        (
            Color::srgb(0.55, 0.62, 0.86),
            400.0,
            light_consts::lux::OVERCAST_DAY,
        )
    };
    clear_color.0 = clear;
    ambient.brightness = ambient_brightness;
    for mut light in lights.iter_mut() {
        light.illuminance = sun;
    }

    let firefly_visibility = if night {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in fireflies.iter_mut() {
        *visibility = firefly_visibility;
    }

    let show_background = night || scene.current_scene == gift_core::Scene::Sky;
    let background_visibility = if show_background {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in background.iter_mut() {
        *visibility = background_visibility;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_transform_spans_endpoints() {
        let start = Vec3::new(0.0, 1.0, 0.0);
        let end = Vec3::new(1.0, 2.0, 0.0);
        let transform = segment_transform(start, end);

        // Unit-height mesh ends sit at +-0.5 along local Y
        let top = transform.transform_point(Vec3::new(0.0, 0.5, 0.0));
        let bottom = transform.transform_point(Vec3::new(0.0, -0.5, 0.0));
        assert!(top.distance(end) < 1e-4);
        assert!(bottom.distance(start) < 1e-4);
    }

    #[test]
    fn test_degenerate_segment_is_finite() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let transform = segment_transform(p, p);
        assert!(transform.translation.is_finite());
        assert!(transform.rotation.is_finite());
    }

    #[test]
    fn test_point_conversion_round_trip() {
        let p = Point3::new(1.5, -2.0, 3.25);
        assert_eq!(point3(vec3(p)), p);
    }
}
