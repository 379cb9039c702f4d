//! Living World domain types.
//!
//! Contains the static records (memories, stars), the closed category enums
//! consumed by the renderer, and the mutable [`SceneState`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ID Types
// ============================================================================

/// Identifier of a memory (and of the building that shows it).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryId(pub String);

impl MemoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MemoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a constellation star.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarId(pub String);

impl StarId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StarId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, dx: f32, dy: f32, dz: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn distance(self, other: Point3) -> f32 {
        let (dx, dy, dz) = (other.x - self.x, other.y - self.y, other.z - self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Placement of a building on the island ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundPosition {
    pub x: f32,
    pub z: f32,
}

/// Placement of a star on the flat constellation canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPosition {
    pub x: f32,
    pub y: f32,
}

// ============================================================================
// Memories
// ============================================================================

/// Category of a memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    Meeting,
    Date,
    Hangout,
    Chat,
    Milestone,
}

impl MemoryKind {
    pub fn name(&self) -> &'static str {
        match self {
            MemoryKind::Meeting => "Meeting",
            MemoryKind::Date => "Date",
            MemoryKind::Hangout => "Hangout",
            MemoryKind::Chat => "Chat",
            MemoryKind::Milestone => "Milestone",
        }
    }

    /// The building that represents this kind of memory on the island.
    pub fn building(&self) -> BuildingShape {
        match self {
            MemoryKind::Meeting => BuildingShape::House,
            MemoryKind::Date => BuildingShape::Cafe,
            MemoryKind::Hangout => BuildingShape::Gazebo,
            MemoryKind::Chat => BuildingShape::Tower,
            MemoryKind::Milestone => BuildingShape::Monument,
        }
    }

    pub fn all() -> [MemoryKind; 5] {
        [
            MemoryKind::Meeting,
            MemoryKind::Date,
            MemoryKind::Hangout,
            MemoryKind::Chat,
            MemoryKind::Milestone,
        ]
    }
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Building silhouettes used for memories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingShape {
    House,
    Cafe,
    Gazebo,
    Tower,
    Monument,
}

/// A static timeline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: MemoryId,
    pub title: String,
    pub description: String,
    /// Undated memories are promises that have not happened yet.
    pub date: Option<NaiveDate>,
    pub kind: MemoryKind,
    pub icon: String,
    pub position: GroundPosition,
    pub unlocked: bool,
}

// ============================================================================
// Stars
// ============================================================================

/// Unlock category of a constellation star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarKind {
    Unlocked,
    Future,
    Locked,
    Secret,
}

impl StarKind {
    pub fn name(&self) -> &'static str {
        match self {
            StarKind::Unlocked => "Unlocked",
            StarKind::Future => "Future",
            StarKind::Locked => "Locked",
            StarKind::Secret => "Secret",
        }
    }

    /// Whether clicking the star opens its detail dialog.
    pub fn is_clickable(&self) -> bool {
        match self {
            StarKind::Unlocked | StarKind::Future => true,
            StarKind::Locked | StarKind::Secret => false,
        }
    }

    /// Locked stars do not twinkle.
    pub fn twinkles(&self) -> bool {
        !matches!(self, StarKind::Locked)
    }
}

impl fmt::Display for StarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A node of the constellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: StarId,
    pub position: CanvasPosition,
    pub size: f32,
    pub kind: StarKind,
    pub memory: Option<MemoryId>,
    pub connected_to: Vec<StarId>,
    pub label: Option<String>,
    pub date: Option<NaiveDate>,
}

impl Star {
    /// Label shown in dialogs, falling back to a kind-based title.
    pub fn display_label(&self) -> &str {
        match &self.label {
            Some(label) => label,
            None => match self.kind {
                StarKind::Unlocked => "Memory Star",
                StarKind::Future => "Future Star",
                StarKind::Locked => "Mystery Star",
                StarKind::Secret => "Secret Star",
            },
        }
    }
}

// ============================================================================
// Scene State
// ============================================================================

/// The named views the camera and UI can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    #[default]
    Opening,
    Island,
    Tree,
    Building,
    Sky,
    Final,
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Opening => "Opening",
            Scene::Island => "Island",
            Scene::Tree => "Tree",
            Scene::Building => "Places",
            Scene::Sky => "Stars",
            Scene::Final => "Final",
        }
    }

    /// Scenes offered by the navigation bar.
    pub fn navigable() -> [Scene; 4] {
        [Scene::Island, Scene::Tree, Scene::Building, Scene::Sky]
    }

    /// Whether the 3D world is visible in this scene.
    pub fn shows_world(&self) -> bool {
        !matches!(self, Scene::Opening | Scene::Final)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The only mutable shared state of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub current_scene: Scene,
    pub selected_building: Option<MemoryId>,
    pub selected_star: Option<StarId>,
    pub night_mode: bool,
    pub secret_unlocked: bool,
    pub camera_position: Point3,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            current_scene: Scene::Opening,
            selected_building: None,
            selected_star: None,
            night_mode: false,
            secret_unlocked: false,
            camera_position: Point3::new(0.0, 15.0, 20.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_state() {
        let state = SceneState::default();
        assert_eq!(state.current_scene, Scene::Opening);
        assert!(state.selected_building.is_none());
        assert!(state.selected_star.is_none());
        assert!(!state.night_mode);
        assert!(!state.secret_unlocked);
        assert_eq!(state.camera_position, Point3::new(0.0, 15.0, 20.0));
    }

    #[test]
    fn test_every_memory_kind_has_a_distinct_building() {
        let shapes: std::collections::HashSet<_> =
            MemoryKind::all().iter().map(|k| k.building()).collect();
        assert_eq!(shapes.len(), MemoryKind::all().len());
    }

    #[test]
    fn test_star_clickability() {
        assert!(StarKind::Unlocked.is_clickable());
        assert!(StarKind::Future.is_clickable());
        assert!(!StarKind::Locked.is_clickable());
        assert!(!StarKind::Secret.is_clickable());
    }

    #[test]
    fn test_tags_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Scene::Sky).unwrap(), "\"sky\"");
        assert_eq!(
            serde_json::to_string(&StarKind::Secret).unwrap(),
            "\"secret\""
        );
        assert_eq!(
            serde_json::to_string(&MemoryKind::Milestone).unwrap(),
            "\"milestone\""
        );
    }

    #[test]
    fn test_point_distance() {
        let a = Point3::ORIGIN;
        let b = Point3::new(3.0, 4.0, 0.0);
        assert!((a.distance(b) - 5.0).abs() < f32::EPSILON);
    }
}
