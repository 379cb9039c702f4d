//! Meshes for the generated tree.

use bevy::picking::events::{Click, Pointer};
use bevy::prelude::*;
use gift_core::session::Action;
use gift_core::tree::Tree;

use super::{accepts_clicks, segment_transform, vec3};
use crate::animations::{FireflyDrift, Sway};
use crate::state::{GiftAction, Phase};

/// Root of the tree hierarchy.
#[derive(Component)]
pub struct TreeRoot;

/// A milestone branch; clicking it announces the milestone.
#[derive(Component)]
pub struct BranchMarker {
    pub id: String,
}

#[derive(Component)]
pub struct FireflyMarker;

pub fn spawn_tree(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    tree: &Tree,
) {
    let bark = materials.add(StandardMaterial {
        base_color: Color::srgb(0.40, 0.26, 0.16),
        perceptual_roughness: 0.95,
        ..default()
    });
    let milestone_bark = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.36, 0.20),
        emissive: LinearRgba::rgb(0.25, 0.15, 0.02),
        ..default()
    });
    let leaf = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.55, 0.70),
        emissive: LinearRgba::rgb(0.08, 0.02, 0.04),
        ..default()
    });
    let blossom = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.92, 0.55),
        emissive: LinearRgba::rgb(0.4, 0.35, 0.1),
        ..default()
    });
    let glow = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.95, 0.5),
        emissive: LinearRgba::rgb(4.0, 3.6, 1.2),
        unlit: true,
        ..default()
    });

    let limb = meshes.add(Cylinder::new(1.0, 1.0));
    let leaf_mesh = meshes.add(Sphere::new(0.12));
    let flower_mesh = meshes.add(Sphere::new(0.09));
    let firefly_mesh = meshes.add(Sphere::new(0.04));

    commands
        .spawn((
            TreeRoot,
            Transform::default(),
            Visibility::default(),
            Sway {
                amplitude: 0.03,
                speed: 0.8,
            },
        ))
        .with_children(|root| {
            for branch in &tree.branches {
                let mut transform = segment_transform(vec3(branch.start), vec3(branch.end));
                transform.scale.x = branch.radius();
                transform.scale.z = branch.radius();

                if branch.milestone.is_some() {
                    root.spawn((
                        Mesh3d(limb.clone()),
                        MeshMaterial3d(milestone_bark.clone()),
                        transform,
                        BranchMarker {
                            id: branch.id.clone(),
                        },
                    ))
                    .observe(
                        |trigger: Trigger<Pointer<Click>>,
                         markers: Query<&BranchMarker>,
                         phase: Res<State<Phase>>,
                         mut actions: EventWriter<GiftAction>| {
                            let Ok(marker) = markers.get(trigger.entity()) else {
                                return;
                            };
                            if accepts_clicks(&phase) {
                                actions.send(GiftAction(Action::ClickBranch(marker.id.clone())));
                            }
                        },
                    );
                } else {
                    root.spawn((Mesh3d(limb.clone()), MeshMaterial3d(bark.clone()), transform));
                }
            }

            for l in &tree.leaves {
                root.spawn((
                    Mesh3d(leaf_mesh.clone()),
                    MeshMaterial3d(leaf.clone()),
                    Transform::from_translation(vec3(l.position)),
                ));
            }

            for flower in &tree.flowers {
                root.spawn((
                    Mesh3d(flower_mesh.clone()),
                    MeshMaterial3d(blossom.clone()),
                    Transform::from_translation(vec3(flower.position)),
                ));
            }

            for firefly in &tree.fireflies {
                let home = vec3(firefly.home);
                root.spawn((
                    Mesh3d(firefly_mesh.clone()),
                    MeshMaterial3d(glow.clone()),
                    Transform::from_translation(home),
                    Visibility::Hidden,
                    FireflyMarker,
                    FireflyDrift {
                        home,
                        phase: firefly.phase,
                    },
                ));
            }
        });
}
