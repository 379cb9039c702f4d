//! Ambient motion for the living scene.

use bevy::prelude::*;

/// Gentle rocking around the Z axis (tree crown).
#[derive(Component)]
pub struct Sway {
    pub amplitude: f32,
    pub speed: f32,
}

/// Bobbing up and down around a rest height (buildings).
#[derive(Component)]
pub struct Float {
    pub base_y: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
}

/// Pulsing scale (stars).
#[derive(Component)]
pub struct Twinkle {
    pub base_scale: f32,
    pub speed: f32,
    pub phase: f32,
}

impl Twinkle {
    pub fn scale_at(&self, t: f32) -> f32 {
        self.base_scale * (1.0 + 0.25 * (t * self.speed + self.phase).sin())
    }
}

/// A firefly drifting around its home point.
#[derive(Component)]
pub struct FireflyDrift {
    pub home: Vec3,
    pub phase: f32,
}

impl FireflyDrift {
    pub fn position_at(&self, t: f32) -> Vec3 {
        let t = t * 0.6 + self.phase;
        self.home
            + Vec3::new(
                (t * 1.3).sin() * 0.4,
                (t * 2.1).sin() * 0.2,
                (t * 0.9).cos() * 0.4,
            )
    }
}

pub fn animate_sway(time: Res<Time>, mut query: Query<(&Sway, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (sway, mut transform) in query.iter_mut() {
        transform.rotation = Quat::from_rotation_z((t * sway.speed).sin() * sway.amplitude);
    }
}

pub fn animate_float(time: Res<Time>, mut query: Query<(&Float, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (float, mut transform) in query.iter_mut() {
        transform.translation.y =
            float.base_y + (t * float.speed + float.phase).sin() * float.amplitude;
    }
}

pub fn animate_twinkle(time: Res<Time>, mut query: Query<(&Twinkle, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (twinkle, mut transform) in query.iter_mut() {
        transform.scale = Vec3::splat(twinkle.scale_at(t));
    }
}

pub fn animate_fireflies(time: Res<Time>, mut query: Query<(&FireflyDrift, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (firefly, mut transform) in query.iter_mut() {
        transform.translation = firefly.position_at(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firefly_stays_near_home() {
        let firefly = FireflyDrift {
            home: Vec3::new(1.0, 2.0, 3.0),
            phase: 0.7,
        };
        for step in 0..200 {
            let p = firefly.position_at(step as f32 * 0.1);
            assert!(p.distance(firefly.home) < 0.7);
        }
    }

    #[test]
    fn test_twinkle_bounds() {
        let twinkle = Twinkle {
            base_scale: 2.0,
            speed: 3.0,
            phase: 0.0,
        };
        for step in 0..100 {
            let s = twinkle.scale_at(step as f32 * 0.05);
            assert!((1.5..=2.5).contains(&s));
        }
    }
}
