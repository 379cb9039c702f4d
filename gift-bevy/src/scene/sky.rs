//! Constellation stars, their links, and the background starfield.

use bevy::picking::events::{Click, Pointer};
use bevy::prelude::*;
use gift_core::session::Action;
use gift_core::sky;
use gift_core::world::{Star, StarId, StarKind};
use gift_core::Scene;
use rand::Rng;

use super::{accepts_clicks, vec3};
use crate::animations::{StarReveal, Twinkle};
use crate::state::{GiftAction, GiftState, Phase};

/// World units per unit of star size.
const STAR_SCALE: f32 = 0.06;
const BACKGROUND_STARS: usize = 400;

/// A constellation star, with the kind it is currently drawn as.
#[derive(Component)]
pub struct StarMarker {
    pub id: StarId,
    pub kind: StarKind,
    pub size: f32,
}

/// A decorative star far behind the constellation.
#[derive(Component)]
pub struct BackgroundStar;

/// One material per star kind.
#[derive(Resource)]
pub struct StarMaterials {
    pub unlocked: Handle<StandardMaterial>,
    pub future: Handle<StandardMaterial>,
    pub locked: Handle<StandardMaterial>,
    pub secret: Handle<StandardMaterial>,
}

impl StarMaterials {
    pub fn for_kind(&self, kind: StarKind) -> Handle<StandardMaterial> {
        match kind {
            StarKind::Unlocked => self.unlocked.clone(),
            StarKind::Future => self.future.clone(),
            StarKind::Locked => self.locked.clone(),
            StarKind::Secret => self.secret.clone(),
        }
    }
}

/// Link color by the kinds at each end.
pub fn link_color(a: StarKind, b: StarKind) -> Color {
    if a == StarKind::Locked || b == StarKind::Locked {
        Color::srgba(0.5, 0.5, 0.55, 0.3)
    } else if a == StarKind::Future || b == StarKind::Future {
        Color::srgba(0.4, 0.9, 0.95, 0.6)
    } else {
        Color::srgba(1.0, 0.85, 0.45, 0.8)
    }
}

fn star_material(color: Color, glow: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        emissive: LinearRgba::from(color) * glow,
        unlit: true,
        ..default()
    }
}

pub fn spawn_sky(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    stars: &[Star],
) {
    let palette = StarMaterials {
        unlocked: materials.add(star_material(Color::srgb(1.0, 0.88, 0.5), 3.0)),
        future: materials.add(star_material(Color::srgb(0.45, 0.9, 1.0), 2.0)),
        locked: materials.add(star_material(Color::srgb(0.4, 0.4, 0.4), 0.2)),
        secret: materials.add(star_material(Color::srgb(1.0, 0.45, 0.85), 4.0)),
    };
    let sphere = meshes.add(Sphere::new(1.0));

    for star in stars {
        let scale = star.size * STAR_SCALE;
        let visibility = if star.kind == StarKind::Secret {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };

        let mut entity = commands.spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(palette.for_kind(star.kind)),
            Transform::from_translation(vec3(sky::project(star))).with_scale(Vec3::splat(scale)),
            visibility,
            StarMarker {
                id: star.id.clone(),
                kind: star.kind,
                size: star.size,
            },
        ));
        if star.kind.twinkles() {
            entity.insert(Twinkle {
                base_scale: scale,
                speed: 1.5 + star.size * 0.2,
                phase: star.position.x * 0.01,
            });
        }

        let id = star.id.clone();
        entity.observe(
            move |_: Trigger<Pointer<Click>>,
                  phase: Res<State<Phase>>,
                  mut actions: EventWriter<GiftAction>| {
                if accepts_clicks(&phase) {
                    actions.send(GiftAction(Action::ClickStar(id.clone())));
                }
            },
        );
    }

    let mut rng = rand::thread_rng();
    let speck = meshes.add(Sphere::new(0.08));
    let speck_material = materials.add(star_material(Color::WHITE, 1.5));
    for _ in 0..BACKGROUND_STARS {
        let direction = Vec3::new(
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 1.2 - 0.2,
            rng.gen::<f32>() * 2.0 - 1.0,
        )
        .try_normalize()
        .unwrap_or(Vec3::Y);
        let distance = 45.0 + rng.gen::<f32>() * 15.0;
        commands.spawn((
            Mesh3d(speck.clone()),
            MeshMaterial3d(speck_material.clone()),
            Transform::from_translation(direction * distance),
            Visibility::Hidden,
            BackgroundStar,
        ));
    }

    commands.insert_resource(palette);
}

/// System to restyle stars whose kind changed in the store.
pub fn sync_star_kinds(
    state: Res<GiftState>,
    palette: Res<StarMaterials>,
    mut commands: Commands,
    mut query: Query<(
        Entity,
        &mut StarMarker,
        &mut Visibility,
        &mut MeshMaterial3d<StandardMaterial>,
    )>,
) {
    for (entity, mut marker, mut visibility, mut material) in query.iter_mut() {
        let Some(star) = state.session.store().star(&marker.id) else {
            continue;
        };
        if star.kind == marker.kind {
            continue;
        }
        debug!(star = %marker.id, from = %marker.kind, to = %star.kind, "star restyled");
        marker.kind = star.kind;
        material.0 = palette.for_kind(star.kind);
        *visibility = if star.kind == StarKind::Secret {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        if star.kind.twinkles() {
            let base_scale = marker.size * STAR_SCALE;
            commands.entity(entity).insert(Twinkle {
                base_scale,
                speed: 2.5,
                phase: 0.0,
            });
        }
    }
}

/// System to swell freshly revealed stars.
pub fn pulse_revealed_stars(
    reveals: Query<&StarReveal>,
    mut stars: Query<(&StarMarker, &mut Transform)>,
) {
    for reveal in reveals.iter() {
        for (marker, mut transform) in stars.iter_mut() {
            if marker.id == reveal.star {
                transform.scale *= reveal.scale();
            }
        }
    }
}

/// System to draw constellation links in the sky scene and at night.
pub fn draw_constellation(mut gizmos: Gizmos, state: Res<GiftState>) {
    let scene = state.session.scene();
    if scene.current_scene != Scene::Sky && !scene.night_mode {
        return;
    }

    let store = state.session.store();
    for (from, to) in sky::connections(store.stars()) {
        let (Some(a), Some(b)) = (store.star(&from), store.star(&to)) else {
            continue;
        };
        if a.kind == StarKind::Secret || b.kind == StarKind::Secret {
            continue;
        }
        gizmos.line(
            vec3(sky::project(a)),
            vec3(sky::project(b)),
            link_color(a.kind, b.kind),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_links_are_dim() {
        let locked = link_color(StarKind::Future, StarKind::Locked).to_srgba();
        let bright = link_color(StarKind::Unlocked, StarKind::Unlocked).to_srgba();
        assert!(locked.alpha < bright.alpha);
    }
}
