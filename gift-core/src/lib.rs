//! Living World: the domain of an interactive 3D gift.
//!
//! This crate provides:
//! - The memory and constellation catalog
//! - An Intent/Effect store for the scene state
//! - The secret-code matcher
//! - Procedural tree generation, sky projection and camera targets
//! - A session facade that front-ends drive
//!
//! # Quick Start
//!
//! ```
//! use gift_core::{GiftSession, Scene, WorldConfig};
//!
//! let mut session = GiftSession::new(WorldConfig::new().with_seed(7));
//! session.start();
//! assert_eq!(session.scene().current_scene, Scene::Island);
//!
//! for key in "love".chars() {
//!     session.type_key(key);
//! }
//! assert!(session.scene().secret_unlocked);
//! ```

pub mod camera;
pub mod config;
pub mod content;
pub mod secret;
pub mod session;
pub mod sky;
pub mod store;
pub mod timeline;
pub mod tree;
pub mod world;

// Primary public API
pub use camera::CameraTarget;
pub use config::{ConfigError, WorldConfig};
pub use content::{Catalog, CatalogError};
pub use secret::{Reward, SecretMatcher};
pub use session::{
    Action, Dialogs, GiftSession, Notice, NoticeLevel, SessionResponse, WorldSnapshot,
};
pub use store::{Effect, Intent, WorldStore};
pub use tree::{Tree, TreeGenerator};
pub use world::{Memory, MemoryId, MemoryKind, Point3, Scene, SceneState, Star, StarId, StarKind};
