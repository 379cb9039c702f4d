//! Projection of the flat constellation canvas onto the sky dome.

use crate::world::{CanvasPosition, Point3, Star, StarId};
use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

/// Width of the constellation canvas.
pub const CANVAS_WIDTH: f32 = 800.0;
/// Height of the constellation canvas.
pub const CANVAS_HEIGHT: f32 = 200.0;
/// Radius of the sky sphere stars are placed on.
pub const SKY_RADIUS: f32 = 15.0;

/// Map a canvas position onto the upper band of the sky sphere.
///
/// The canvas x axis wraps once around the vertical axis; larger canvas y
/// values sit closer to the zenith.
pub fn project_position(position: CanvasPosition) -> Point3 {
    let theta = position.x / CANVAS_WIDTH * TAU;
    let phi = (1.0 - position.y / CANVAS_HEIGHT) * 0.3 * PI + 0.1 * PI;
    Point3::new(
        SKY_RADIUS * phi.sin() * theta.cos(),
        SKY_RADIUS * phi.cos(),
        SKY_RADIUS * phi.sin() * theta.sin(),
    )
}

pub fn project(star: &Star) -> Point3 {
    project_position(star.position)
}

/// One segment per link whose target exists.
pub fn connections(stars: &[Star]) -> Vec<(StarId, StarId)> {
    let known: HashSet<&StarId> = stars.iter().map(|s| &s.id).collect();
    stars
        .iter()
        .flat_map(|star| {
            star.connected_to
                .iter()
                .filter(|target| known.contains(target))
                .map(move |target| (star.id.clone(), target.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;

    #[test]
    fn test_projection_on_sphere() {
        for star in content::stars() {
            let p = project(&star);
            assert!(p.is_finite());
            assert!((p.distance(Point3::ORIGIN) - SKY_RADIUS).abs() < 1e-3);
            assert!(p.y > 0.0, "{} projected below the horizon", star.id);
        }
    }

    #[test]
    fn test_canvas_y_raises_toward_zenith() {
        let top = project_position(CanvasPosition { x: 100.0, y: 0.0 });
        let bottom = project_position(CanvasPosition { x: 100.0, y: 200.0 });
        assert!(top.y < bottom.y);
    }

    #[test]
    fn test_connections_follow_links() {
        let links = connections(&content::stars());
        assert!(links.contains(&(StarId::from("star-1"), StarId::from("star-2"))));
        assert!(links.contains(&(StarId::from("star-6"), StarId::from("star-7"))));
        assert_eq!(links.len(), 6);
    }

    #[test]
    fn test_dangling_links_skipped() {
        let mut stars = content::stars();
        stars[0].connected_to.push(StarId::from("ghost"));
        assert_eq!(connections(&stars).len(), 6);
    }
}
