//! The floating island.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

pub const ISLAND_RADIUS: f32 = 6.0;

/// Root of the island hierarchy.
#[derive(Component)]
pub struct Island;

pub fn spawn_island(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let grass = materials.add(StandardMaterial {
        base_color: Color::srgb(0.42, 0.72, 0.42),
        perceptual_roughness: 0.9,
        ..default()
    });
    let rock = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.34, 0.28),
        perceptual_roughness: 1.0,
        ..default()
    });
    let petal_colors = [
        Color::srgb(1.0, 0.6, 0.75),
        Color::srgb(1.0, 0.85, 0.4),
        Color::srgb(0.8, 0.6, 1.0),
    ]
    .map(|color| {
        materials.add(StandardMaterial {
            base_color: color,
            emissive: LinearRgba::from(color) * 0.2,
            ..default()
        })
    });
    let petal = meshes.add(Sphere::new(0.08));

    let mut rng = rand::thread_rng();

    commands
        .spawn((Island, Transform::default(), Visibility::default()))
        .with_children(|island| {
            island.spawn((
                Mesh3d(meshes.add(Cylinder::new(ISLAND_RADIUS, 0.6))),
                MeshMaterial3d(grass),
                Transform::from_xyz(0.0, -0.3, 0.0),
            ));
            island.spawn((
                Mesh3d(meshes.add(Cone {
                    radius: ISLAND_RADIUS,
                    height: 4.0,
                })),
                MeshMaterial3d(rock),
                Transform::from_xyz(0.0, -2.6, 0.0).with_rotation(Quat::from_rotation_x(PI)),
            ));

            // Wildflowers scattered near the rim
            for i in 0..40 {
                let angle = rng.gen::<f32>() * TAU;
                let radius = ISLAND_RADIUS * (0.55 + rng.gen::<f32>() * 0.4);
                island.spawn((
                    Mesh3d(petal.clone()),
                    MeshMaterial3d(petal_colors[i % petal_colors.len()].clone()),
                    Transform::from_xyz(angle.cos() * radius, 0.05, angle.sin() * radius),
                ));
            }
        });
}
