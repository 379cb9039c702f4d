//! One building per memory, shaped by the memory's kind.

use bevy::picking::events::{Click, Pointer};
use bevy::prelude::*;
use gift_core::session::Action;
use gift_core::world::{BuildingShape, Memory, MemoryId, MemoryKind};

use super::accepts_clicks;
use crate::animations::Float;
use crate::state::{GiftAction, GiftState, Phase};

/// Scale of the selected building.
const SELECTED_SCALE: f32 = 1.2;

/// Root entity of a memory's building.
#[derive(Component)]
pub struct BuildingMarker {
    pub id: MemoryId,
    pub title: String,
    pub icon: String,
}

/// Accent color of a memory kind.
pub fn kind_color(kind: MemoryKind) -> Color {
    match kind {
        MemoryKind::Meeting => Color::srgb(1.0, 0.55, 0.70),
        MemoryKind::Date => Color::srgb(0.85, 0.55, 0.35),
        MemoryKind::Hangout => Color::srgb(0.45, 0.80, 0.50),
        MemoryKind::Chat => Color::srgb(0.45, 0.65, 1.0),
        MemoryKind::Milestone => Color::srgb(1.0, 0.82, 0.30),
    }
}

/// Shared meshes and materials for buildings.
struct Kit {
    wall: Handle<StandardMaterial>,
    accent: Handle<StandardMaterial>,
    glow: Handle<StandardMaterial>,
}

pub fn spawn_buildings(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    memories: &[Memory],
) {
    let wall = materials.add(StandardMaterial {
        base_color: Color::srgb(0.96, 0.93, 0.88),
        perceptual_roughness: 0.8,
        ..default()
    });

    for (index, memory) in memories.iter().enumerate() {
        let color = kind_color(memory.kind);
        let kit = Kit {
            wall: wall.clone(),
            accent: materials.add(StandardMaterial {
                base_color: color,
                ..default()
            }),
            glow: materials.add(StandardMaterial {
                base_color: color,
                emissive: LinearRgba::from(color) * 1.5,
                ..default()
            }),
        };

        let id = memory.id.clone();
        commands
            .spawn((
                BuildingMarker {
                    id: memory.id.clone(),
                    title: memory.title.clone(),
                    icon: memory.icon.clone(),
                },
                Transform::from_xyz(memory.position.x, 0.0, memory.position.z),
                Visibility::default(),
                Float {
                    base_y: 0.0,
                    amplitude: 0.05,
                    speed: 1.2,
                    phase: index as f32 * 1.3,
                },
            ))
            .with_children(|parent| {
                spawn_shape(parent, meshes, &kit, memory.kind.building());
            })
            .observe(
                move |_: Trigger<Pointer<Click>>,
                      phase: Res<State<Phase>>,
                      mut actions: EventWriter<GiftAction>| {
                    if accepts_clicks(&phase) {
                        actions.send(GiftAction(Action::ClickBuilding(id.clone())));
                    }
                },
            );
    }
}

fn spawn_shape(
    parent: &mut ChildBuilder,
    meshes: &mut Assets<Mesh>,
    kit: &Kit,
    shape: BuildingShape,
) {
    match shape {
        BuildingShape::House => {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.0, 0.8, 1.0))),
                MeshMaterial3d(kit.wall.clone()),
                Transform::from_xyz(0.0, 0.4, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cone {
                    radius: 0.8,
                    height: 0.6,
                })),
                MeshMaterial3d(kit.accent.clone()),
                Transform::from_xyz(0.0, 1.1, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.25, 0.4, 0.02))),
                MeshMaterial3d(kit.glow.clone()),
                Transform::from_xyz(0.0, 0.2, 0.51),
            ));
        }
        BuildingShape::Cafe => {
            parent.spawn((
                Mesh3d(meshes.add(Cylinder::new(0.6, 0.8))),
                MeshMaterial3d(kit.wall.clone()),
                Transform::from_xyz(0.0, 0.4, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cylinder::new(0.7, 0.1))),
                MeshMaterial3d(kit.accent.clone()),
                Transform::from_xyz(0.0, 0.85, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.0, 0.05, 0.4))),
                MeshMaterial3d(kit.accent.clone()),
                Transform::from_xyz(0.0, 0.6, 0.65).with_rotation(Quat::from_rotation_x(0.3)),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Sphere::new(0.12))),
                MeshMaterial3d(kit.glow.clone()),
                Transform::from_xyz(0.0, 1.0, 0.0),
            ));
        }
        BuildingShape::Gazebo => {
            parent.spawn((
                Mesh3d(meshes.add(Cylinder::new(0.8, 0.1))),
                MeshMaterial3d(kit.wall.clone()),
                Transform::from_xyz(0.0, 0.05, 0.0),
            ));
            let pillar = meshes.add(Cylinder::new(0.05, 0.9));
            for (x, z) in [(0.55, 0.55), (-0.55, 0.55), (0.55, -0.55), (-0.55, -0.55)] {
                parent.spawn((
                    Mesh3d(pillar.clone()),
                    MeshMaterial3d(kit.wall.clone()),
                    Transform::from_xyz(x, 0.55, z),
                ));
            }
            parent.spawn((
                Mesh3d(meshes.add(Cone {
                    radius: 1.0,
                    height: 0.5,
                })),
                MeshMaterial3d(kit.accent.clone()),
                Transform::from_xyz(0.0, 1.25, 0.0),
            ));
        }
        BuildingShape::Tower => {
            parent.spawn((
                Mesh3d(meshes.add(Cylinder::new(0.35, 1.8))),
                MeshMaterial3d(kit.wall.clone()),
                Transform::from_xyz(0.0, 0.9, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cone {
                    radius: 0.45,
                    height: 0.5,
                })),
                MeshMaterial3d(kit.accent.clone()),
                Transform::from_xyz(0.0, 2.05, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Torus::new(0.36, 0.42))),
                MeshMaterial3d(kit.glow.clone()),
                Transform::from_xyz(0.0, 1.5, 0.0),
            ));
        }
        BuildingShape::Monument => {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.9, 0.3, 0.9))),
                MeshMaterial3d(kit.wall.clone()),
                Transform::from_xyz(0.0, 0.15, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.3, 1.4, 0.3))),
                MeshMaterial3d(kit.accent.clone()),
                Transform::from_xyz(0.0, 1.0, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Sphere::new(0.25))),
                MeshMaterial3d(kit.glow.clone()),
                Transform::from_xyz(0.0, 1.95, 0.0),
            ));
        }
    }
}

/// System to enlarge the selected building.
pub fn highlight_selected_building(
    state: Res<GiftState>,
    time: Res<Time>,
    mut query: Query<(&BuildingMarker, &mut Transform)>,
) {
    let selected = state.session.scene().selected_building.as_ref();
    let factor = 1.0 - (-6.0 * time.delta_secs()).exp();
    for (building, mut transform) in query.iter_mut() {
        let wanted = if selected == Some(&building.id) {
            SELECTED_SCALE
        } else {
            1.0
        };
        let scale = transform.scale.x + (wanted - transform.scale.x) * factor;
        transform.scale = Vec3::splat(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_colors_distinct() {
        let colors: Vec<_> = MemoryKind::all()
            .iter()
            .map(|k| kind_color(*k).to_srgba())
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
