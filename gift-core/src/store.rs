//! Scene store with an Intent/Effect pipeline.
//!
//! Every state change follows the same path:
//! 1. The UI sends an [`Intent`] (what the user asked for)
//! 2. [`WorldStore::resolve`] turns it into [`Effect`]s without mutating
//! 3. [`WorldStore::apply_effect`] applies each effect to the state
//!
//! Effects carry every change, including keystrokes and code latches, so
//! applying the effects of a resolution is all a caller needs to do.
//! Setters are total: unknown ids are stored as-is and simply match nothing.

use crate::content::{Catalog, SECRET_STAR_ID};
use crate::secret::{Reward, SecretMatcher};
use crate::world::{Memory, MemoryId, Point3, Scene, SceneState, Star, StarId, StarKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A requested state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Switch to a named scene
    SetScene(Scene),
    /// Select a building, or clear the selection
    SelectBuilding(Option<MemoryId>),
    /// Select a star, or clear the selection
    SelectStar(Option<StarId>),
    /// Flip between day and night
    ToggleNightMode,
    /// A key typed anywhere on the page
    TypeKey(char),
    /// A full code submitted from the secret field
    EnterCode(String),
    /// The camera settled at a new position
    SetCameraPosition(Point3),
}

/// A concrete state change produced by resolving an intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    SceneChanged { from: Scene, to: Scene },
    BuildingSelected(Option<MemoryId>),
    StarSelected(Option<StarId>),
    NightModeChanged(bool),
    /// A secret code latched
    SecretUnlocked { code: String, reward: Reward },
    /// The secret star became a regular unlocked star
    StarRevealed(StarId),
    CameraMoved(Point3),
    /// A keystroke entered the secret key buffer
    KeyRecorded(char),
}

/// The result of resolving an intent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub effects: Vec<Effect>,
}

impl Resolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Session state: the scene view-model plus the static content it refers to.
#[derive(Debug, Clone)]
pub struct WorldStore {
    scene: SceneState,
    memories: Vec<Memory>,
    stars: Vec<Star>,
    secrets: SecretMatcher,
}

impl Default for WorldStore {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl WorldStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            scene: SceneState::default(),
            memories: catalog.memories,
            stars: catalog.stars,
            secrets: SecretMatcher::new(catalog.secret_codes),
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn secrets(&self) -> &SecretMatcher {
        &self.secrets
    }

    pub fn memory(&self, id: &MemoryId) -> Option<&Memory> {
        self.memories.iter().find(|m| &m.id == id)
    }

    pub fn star(&self, id: &StarId) -> Option<&Star> {
        self.stars.iter().find(|s| &s.id == id)
    }

    pub fn selected_memory(&self) -> Option<&Memory> {
        self.scene
            .selected_building
            .as_ref()
            .and_then(|id| self.memory(id))
    }

    pub fn selected_star(&self) -> Option<&Star> {
        self.scene.selected_star.as_ref().and_then(|id| self.star(id))
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve an intent into effects without touching the store.
    pub fn resolve(&self, intent: Intent) -> Resolution {
        match intent {
            Intent::SetScene(to) => Resolution::new().with_effect(Effect::SceneChanged {
                from: self.scene.current_scene,
                to,
            }),
            Intent::SelectBuilding(id) => {
                Resolution::new().with_effect(Effect::BuildingSelected(id))
            }
            Intent::SelectStar(id) => Resolution::new().with_effect(Effect::StarSelected(id)),
            Intent::ToggleNightMode => {
                Resolution::new().with_effect(Effect::NightModeChanged(!self.scene.night_mode))
            }
            Intent::TypeKey(key) => {
                if !key.is_ascii_alphabetic() {
                    return Resolution::new();
                }
                let recorded =
                    Resolution::new().with_effect(Effect::KeyRecorded(key.to_ascii_lowercase()));
                match self.secrets.match_key(key) {
                    Some(unlock) => self.resolve_unlock(recorded, unlock.code, unlock.reward),
                    None => recorded,
                }
            }
            Intent::EnterCode(input) => match self.secrets.match_code(&input) {
                Some(unlock) => self.resolve_unlock(Resolution::new(), unlock.code, unlock.reward),
                None => Resolution::new(),
            },
            Intent::SetCameraPosition(position) => {
                Resolution::new().with_effect(Effect::CameraMoved(position))
            }
        }
    }

    fn resolve_unlock(&self, resolution: Resolution, code: String, reward: Reward) -> Resolution {
        let mut resolution = resolution.with_effect(Effect::SecretUnlocked { code, reward });
        if reward == Reward::Star {
            let secret_star = StarId::from(SECRET_STAR_ID);
            if self
                .star(&secret_star)
                .is_some_and(|s| s.kind == StarKind::Secret)
            {
                resolution = resolution.with_effect(Effect::StarRevealed(secret_star));
            }
        }
        resolution
    }

    // ========================================================================
    // Application
    // ========================================================================

    pub fn apply_effects(&mut self, effects: &[Effect]) {
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    /// Apply a single effect to the store.
    pub fn apply_effect(&mut self, effect: &Effect) {
        match effect {
            Effect::SceneChanged { from, to } => {
                debug!(%from, %to, "scene changed");
                self.scene.current_scene = *to;
            }
            Effect::BuildingSelected(id) => {
                debug!(building = ?id, "building selection");
                self.scene.selected_building = id.clone();
            }
            Effect::StarSelected(id) => {
                debug!(star = ?id, "star selection");
                self.scene.selected_star = id.clone();
            }
            Effect::NightModeChanged(night) => {
                debug!(night, "night mode");
                self.scene.night_mode = *night;
            }
            Effect::SecretUnlocked { code, .. } => {
                self.secrets.latch_code(code);
                self.scene.secret_unlocked = true;
            }
            Effect::StarRevealed(id) => {
                if let Some(star) = self.stars.iter_mut().find(|s| &s.id == id) {
                    if star.kind == StarKind::Secret {
                        info!(star = %id, "secret star revealed");
                        star.kind = StarKind::Unlocked;
                    }
                }
            }
            Effect::CameraMoved(position) => {
                self.scene.camera_position = *position;
            }
            Effect::KeyRecorded(key) => {
                self.secrets.record_key(*key);
            }
        }
    }

    /// Resolve and apply in one step.
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        let resolution = self.resolve(intent);
        self.apply_effects(&resolution.effects);
        resolution.effects
    }

    // ========================================================================
    // Setters
    // ========================================================================

    pub fn set_scene(&mut self, scene: Scene) -> Vec<Effect> {
        self.dispatch(Intent::SetScene(scene))
    }

    pub fn select_building(&mut self, id: Option<MemoryId>) -> Vec<Effect> {
        self.dispatch(Intent::SelectBuilding(id))
    }

    pub fn select_star(&mut self, id: Option<StarId>) -> Vec<Effect> {
        self.dispatch(Intent::SelectStar(id))
    }

    pub fn toggle_night_mode(&mut self) -> Vec<Effect> {
        self.dispatch(Intent::ToggleNightMode)
    }

    pub fn type_key(&mut self, key: char) -> Vec<Effect> {
        self.dispatch(Intent::TypeKey(key))
    }

    pub fn enter_code(&mut self, code: impl Into<String>) -> Vec<Effect> {
        self.dispatch(Intent::EnterCode(code.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked_rewards(effects: &[Effect]) -> Vec<Reward> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::SecretUnlocked { reward, .. } => Some(*reward),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_scene_tracks_latest_call() {
        let mut store = WorldStore::default();
        let sequence = [
            Scene::Island,
            Scene::Sky,
            Scene::Sky,
            Scene::Tree,
            Scene::Final,
            Scene::Building,
        ];
        for scene in sequence {
            store.set_scene(scene);
            assert_eq!(store.scene().current_scene, scene);
        }
    }

    #[test]
    fn test_scene_change_reports_previous() {
        let mut store = WorldStore::default();
        let effects = store.set_scene(Scene::Tree);
        assert_eq!(
            effects,
            vec![Effect::SceneChanged {
                from: Scene::Opening,
                to: Scene::Tree
            }]
        );
    }

    #[test]
    fn test_selections_are_independent() {
        let mut store = WorldStore::default();
        store.select_building(Some(MemoryId::from("meeting")));
        store.select_star(Some(StarId::from("star-2")));
        assert_eq!(
            store.scene().selected_building,
            Some(MemoryId::from("meeting"))
        );
        assert_eq!(store.scene().selected_star, Some(StarId::from("star-2")));

        store.select_building(None);
        assert!(store.scene().selected_building.is_none());
        assert_eq!(store.scene().selected_star, Some(StarId::from("star-2")));

        store.select_star(None);
        assert!(store.scene().selected_star.is_none());
    }

    #[test]
    fn test_unknown_selection_resolves_to_nothing() {
        let mut store = WorldStore::default();
        store.select_building(Some(MemoryId::from("missing")));
        assert!(store.selected_memory().is_none());
    }

    #[test]
    fn test_night_mode_round_trip() {
        let mut store = WorldStore::default();
        let original = store.scene().night_mode;
        store.toggle_night_mode();
        assert_ne!(store.scene().night_mode, original);
        store.toggle_night_mode();
        assert_eq!(store.scene().night_mode, original);
    }

    #[test]
    fn test_resolve_does_not_mutate() {
        let store = WorldStore::default();
        let resolution = store.resolve(Intent::ToggleNightMode);
        assert_eq!(resolution.effects, vec![Effect::NightModeChanged(true)]);
        assert!(!store.scene().night_mode);
    }

    #[test]
    fn test_typing_love_reveals_secret_star() {
        let mut store = WorldStore::default();
        let secret = StarId::from(SECRET_STAR_ID);
        assert_eq!(store.star(&secret).unwrap().kind, StarKind::Secret);

        let mut effects = Vec::new();
        for c in "love".chars() {
            effects.extend(store.type_key(c));
        }

        assert_eq!(unlocked_rewards(&effects), vec![Reward::Star]);
        assert!(effects.contains(&Effect::StarRevealed(secret.clone())));
        assert_eq!(store.star(&secret).unwrap().kind, StarKind::Unlocked);
        assert!(store.scene().secret_unlocked);
    }

    #[test]
    fn test_typing_forever_twice_unlocks_once() {
        let mut store = WorldStore::default();
        let mut effects = Vec::new();
        for c in "foreverforever".chars() {
            effects.extend(store.type_key(c));
        }
        assert_eq!(unlocked_rewards(&effects), vec![Reward::Fireworks]);
    }

    #[test]
    fn test_non_letter_key_produces_no_effect() {
        let mut store = WorldStore::default();
        assert!(store.type_key('7').is_empty());
        assert_eq!(store.type_key('a'), vec![Effect::KeyRecorded('a')]);
    }

    #[test]
    fn test_applying_resolved_effects_latches_codes() {
        let mut store = WorldStore::default();
        let mut effects = Vec::new();
        for c in "foreverforever".chars() {
            let resolution = store.resolve(Intent::TypeKey(c));
            store.apply_effects(&resolution.effects);
            effects.extend(resolution.effects);
        }
        assert_eq!(unlocked_rewards(&effects), vec![Reward::Fireworks]);
        assert!(store.secrets().is_unlocked(Reward::Fireworks));
        assert_eq!(store.secrets().buffer().as_string(), "verforever");

        let love = store.resolve(Intent::EnterCode("love".into()));
        store.apply_effects(&love.effects);
        assert_eq!(unlocked_rewards(&love.effects), vec![Reward::Star]);
        assert!(store.secrets().is_unlocked(Reward::Star));
        assert!(store.resolve(Intent::EnterCode("love".into())).is_empty());
    }

    #[test]
    fn test_unlock_keystroke_is_recorded() {
        let mut store = WorldStore::default();
        let mut last = Vec::new();
        for c in "LOVE".chars() {
            last = store.type_key(c);
        }
        assert_eq!(last[0], Effect::KeyRecorded('e'));
        assert_eq!(store.secrets().buffer().as_string(), "love");
    }

    #[test]
    fn test_enter_code() {
        let mut store = WorldStore::default();
        assert!(store.enter_code("nope").is_empty());
        let effects = store.enter_code("Us");
        assert_eq!(unlocked_rewards(&effects), vec![Reward::Letter]);
        assert!(store.secrets().is_unlocked(Reward::Letter));
        // Letter reward leaves the secret star alone
        assert_eq!(
            store.star(&StarId::from(SECRET_STAR_ID)).unwrap().kind,
            StarKind::Secret
        );
    }

    #[test]
    fn test_camera_position() {
        let mut store = WorldStore::default();
        store.dispatch(Intent::SetCameraPosition(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(store.scene().camera_position, Point3::new(1.0, 2.0, 3.0));
    }
}
