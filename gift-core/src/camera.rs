//! Where the camera should be for each scene.

use crate::world::{Memory, Point3, Scene};
use serde::{Deserialize, Serialize};

/// A camera placement: eye position plus the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    pub position: Point3,
    pub look_at: Point3,
}

impl CameraTarget {
    pub const fn new(position: Point3, look_at: Point3) -> Self {
        Self { position, look_at }
    }

    /// Camera for `scene`, framing `selected` when a building is open.
    pub fn for_scene(scene: Scene, selected: Option<&Memory>) -> Self {
        match scene {
            Scene::Opening => Self::new(Point3::new(0.0, 15.0, 20.0), Point3::ORIGIN),
            Scene::Island => Self::new(Point3::new(8.0, 8.0, 12.0), Point3::ORIGIN),
            Scene::Tree => Self::new(Point3::new(3.0, 4.0, 5.0), Point3::new(0.0, 2.0, 0.0)),
            Scene::Building => match selected {
                Some(memory) => {
                    let (x, z) = (memory.position.x, memory.position.z);
                    Self::new(Point3::new(x + 3.0, 3.0, z + 3.0), Point3::new(x, 1.0, z))
                }
                None => Self::new(Point3::new(5.0, 5.0, 8.0), Point3::ORIGIN),
            },
            Scene::Sky => Self::new(Point3::new(0.0, 12.0, 5.0), Point3::new(0.0, 15.0, 0.0)),
            Scene::Final => Self::new(Point3::new(0.0, 20.0, 15.0), Point3::ORIGIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;

    #[test]
    fn test_building_frames_selected_memory() {
        let memories = content::memories();
        let meeting = &memories[0];
        let target = CameraTarget::for_scene(Scene::Building, Some(meeting));
        assert_eq!(target.look_at, Point3::new(-3.0, 1.0, -2.0));
        assert_eq!(target.position, Point3::new(0.0, 3.0, 1.0));
    }

    #[test]
    fn test_building_without_selection_uses_overview() {
        let target = CameraTarget::for_scene(Scene::Building, None);
        assert_eq!(target.position, Point3::new(5.0, 5.0, 8.0));
        assert_eq!(target.look_at, Point3::ORIGIN);
    }

    #[test]
    fn test_opening_matches_default_camera() {
        let target = CameraTarget::for_scene(Scene::Opening, None);
        assert_eq!(
            target.position,
            crate::world::SceneState::default().camera_position
        );
    }
}
