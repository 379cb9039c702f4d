//! Session facade for driving the gift.
//!
//! [`GiftSession`] owns the store, the generated tree and the presentation
//! state around it: which dialog is open, whether the opening or closing
//! screen is up, and whether a fireworks show is running. Front-ends call
//! its methods (or [`GiftSession::perform`]) and render the returned
//! [`Notice`]s as toasts.

use crate::camera::CameraTarget;
use crate::config::WorldConfig;
use crate::content::{Catalog, CatalogError};
use crate::secret::Reward;
use crate::store::{Effect, Intent, WorldStore};
use crate::timeline::{self, Countdown};
use crate::tree::{Tree, TreeGenerator};
use crate::world::{MemoryId, Point3, Scene, SceneState, StarId, StarKind};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Length of a fireworks show, in seconds.
pub const FIREWORKS_DURATION: f32 = 5.0;

// ============================================================================
// Notices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Info,
}

/// A transient toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub detail: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Everything one session call produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionResponse {
    /// Store effects, in application order.
    pub effects: Vec<Effect>,
    pub notices: Vec<Notice>,
}

impl SessionResponse {
    fn effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            notices: Vec::new(),
        }
    }

    fn merge(&mut self, other: SessionResponse) {
        self.effects.extend(other.effects);
        self.notices.extend(other.notices);
    }

    fn notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.notices.is_empty()
    }

    /// Rewards unlocked during this call.
    pub fn unlocked(&self) -> impl Iterator<Item = Reward> + '_ {
        self.effects.iter().filter_map(|e| match e {
            Effect::SecretUnlocked { reward, .. } => Some(*reward),
            _ => None,
        })
    }
}

// ============================================================================
// Dialogs and Actions
// ============================================================================

/// Which detail dialogs are open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogs {
    pub memory: Option<MemoryId>,
    pub star: Option<StarId>,
    pub secret: Option<Reward>,
}

impl Dialogs {
    pub fn any_open(&self) -> bool {
        self.memory.is_some() || self.star.is_some() || self.secret.is_some()
    }
}

/// A user action, as sent by a front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Start,
    ClickBuilding(MemoryId),
    ClickStar(StarId),
    ClickBranch(String),
    Navigate(Scene),
    ShowFinal,
    Replay,
    CloseMemory,
    CloseStar,
    CloseSecret,
    /// Close whichever dialog is on top
    Dismiss,
    TypeKey(char),
    EnterCode(String),
    ToggleNightMode,
    SetCameraPosition(Point3),
}

// ============================================================================
// Snapshot
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarStatus {
    pub id: StarId,
    pub kind: StarKind,
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub scene: SceneState,
    pub days_together: u32,
    pub showing_opening: bool,
    pub showing_final: bool,
    pub dialogs: Dialogs,
    pub fireworks: bool,
    pub unlocked_rewards: Vec<Reward>,
    pub stars: Vec<StarStatus>,
    pub branches: usize,
    pub leaves: usize,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Session
// ============================================================================

/// One run of the gift.
pub struct GiftSession {
    config: WorldConfig,
    store: WorldStore,
    tree: Tree,
    days_together: u32,
    showing_opening: bool,
    showing_final: bool,
    dialogs: Dialogs,
    /// Seconds left in the current fireworks show.
    fireworks: Option<f32>,
}

impl GiftSession {
    /// Session over the compiled-in catalog.
    pub fn new(config: WorldConfig) -> Self {
        Self::build(config, WorldStore::default())
    }

    /// Session over a custom catalog, validated first.
    pub fn with_catalog(config: WorldConfig, catalog: Catalog) -> Result<Self, CatalogError> {
        catalog.validate()?;
        Ok(Self::build(config, WorldStore::new(catalog)))
    }

    fn build(config: WorldConfig, store: WorldStore) -> Self {
        let days_together = timeline::days_together(config.start_date, config.today());
        let tree = match config.seed {
            Some(seed) => TreeGenerator::from_seed(seed).generate(days_together),
            None => TreeGenerator::from_entropy().generate(days_together),
        };
        info!(
            days_together,
            seed = ?config.seed,
            memories = store.memories().len(),
            stars = store.stars().len(),
            "gift session created"
        );
        Self {
            config,
            store,
            tree,
            days_together,
            showing_opening: true,
            showing_final: false,
            dialogs: Dialogs::default(),
            fireworks: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn store(&self) -> &WorldStore {
        &self.store
    }

    pub fn scene(&self) -> &SceneState {
        self.store.scene()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn days_together(&self) -> u32 {
        self.days_together
    }

    pub fn dialogs(&self) -> &Dialogs {
        &self.dialogs
    }

    pub fn showing_opening(&self) -> bool {
        self.showing_opening
    }

    pub fn showing_final(&self) -> bool {
        self.showing_final
    }

    pub fn fireworks_active(&self) -> bool {
        self.fireworks.is_some()
    }

    /// Where the camera should head for the current scene.
    pub fn camera_target(&self) -> CameraTarget {
        CameraTarget::for_scene(self.scene().current_scene, self.store.selected_memory())
    }

    /// Countdown to a dated star, if it is still in the future.
    pub fn star_countdown(&self, id: &StarId, now: NaiveDateTime) -> Option<Countdown> {
        let date = self.store.star(id)?.date?;
        timeline::countdown(date, now)
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Dispatch an action to the matching method.
    pub fn perform(&mut self, action: Action) -> SessionResponse {
        debug!(?action, "perform");
        match action {
            Action::Start => self.start(),
            Action::ClickBuilding(id) => self.click_building(&id),
            Action::ClickStar(id) => self.click_star(&id),
            Action::ClickBranch(id) => self.click_branch(&id),
            Action::Navigate(scene) => self.navigate(scene),
            Action::ShowFinal => self.show_final(),
            Action::Replay => self.replay(),
            Action::CloseMemory => self.close_memory(),
            Action::CloseStar => self.close_star(),
            Action::CloseSecret => self.close_secret(),
            Action::Dismiss => self.dismiss(),
            Action::TypeKey(key) => self.type_key(key),
            Action::EnterCode(code) => self.enter_code(&code),
            Action::ToggleNightMode => self.toggle_night_mode(),
            Action::SetCameraPosition(position) => SessionResponse::effects(
                self.store.dispatch(Intent::SetCameraPosition(position)),
            ),
        }
    }

    /// Leave the opening screen for the island.
    pub fn start(&mut self) -> SessionResponse {
        self.showing_opening = false;
        SessionResponse::effects(self.store.set_scene(Scene::Island)).notice(Notice::success(
            "Welcome to our world!",
            "Drag to explore, click to discover memories",
        ))
    }

    /// Open a memory's building. Unknown ids are ignored.
    pub fn click_building(&mut self, id: &MemoryId) -> SessionResponse {
        if self.store.memory(id).is_none() {
            debug!(building = %id, "click on unknown building");
            return SessionResponse::default();
        }
        self.dialogs.memory = Some(id.clone());
        let mut response = SessionResponse::effects(self.store.select_building(Some(id.clone())));
        response.merge(SessionResponse::effects(
            self.store.set_scene(Scene::Building),
        ));
        response
    }

    /// Open a star's dialog if its kind is clickable.
    ///
    /// Locked stars, and the secret star until it is revealed, only answer
    /// with a notice.
    pub fn click_star(&mut self, id: &StarId) -> SessionResponse {
        let kind = match self.store.star(id) {
            Some(star) => star.kind,
            None => return SessionResponse::default(),
        };
        if !kind.is_clickable() {
            debug!(star = %id, %kind, "star not clickable");
            return SessionResponse::default().notice(Notice::info(
                "This star is not yet unlocked",
                "Our story is still growing...",
            ));
        }

        self.dialogs.star = Some(id.clone());
        SessionResponse::effects(self.store.select_star(Some(id.clone())))
    }

    /// Milestone branches announce themselves; other branches do nothing.
    pub fn click_branch(&mut self, id: &str) -> SessionResponse {
        match self.tree.branch(id) {
            Some(branch) if branch.milestone.is_some() => SessionResponse::default().notice(
                Notice::success(
                    "Tree milestone discovered!",
                    "Every branch represents a moment in our journey",
                ),
            ),
            _ => SessionResponse::default(),
        }
    }

    /// Switch scenes from the navigation bar, dropping any selection.
    pub fn navigate(&mut self, scene: Scene) -> SessionResponse {
        self.dialogs.memory = None;
        self.dialogs.star = None;
        let mut response = SessionResponse::effects(self.store.set_scene(scene));
        response.merge(SessionResponse::effects(self.store.select_building(None)));
        response.merge(SessionResponse::effects(self.store.select_star(None)));
        response
    }

    pub fn show_final(&mut self) -> SessionResponse {
        self.showing_final = true;
        SessionResponse::effects(self.store.set_scene(Scene::Final))
    }

    /// Leave the closing screen and start over on the island.
    pub fn replay(&mut self) -> SessionResponse {
        self.showing_final = false;
        self.fireworks = None;
        SessionResponse::effects(self.store.set_scene(Scene::Island))
    }

    pub fn close_memory(&mut self) -> SessionResponse {
        self.dialogs.memory = None;
        SessionResponse::effects(self.store.select_building(None))
    }

    pub fn close_star(&mut self) -> SessionResponse {
        self.dialogs.star = None;
        SessionResponse::effects(self.store.select_star(None))
    }

    /// Close the reward dialog; a fireworks reward then sets off a show.
    pub fn close_secret(&mut self) -> SessionResponse {
        if self.dialogs.secret.take() == Some(Reward::Fireworks) {
            info!("fireworks show started");
            self.fireworks = Some(FIREWORKS_DURATION);
        }
        SessionResponse::default()
    }

    /// Close the topmost dialog: reward, then star, then memory.
    pub fn dismiss(&mut self) -> SessionResponse {
        if self.dialogs.secret.is_some() {
            self.close_secret()
        } else if self.dialogs.star.is_some() {
            self.close_star()
        } else if self.dialogs.memory.is_some() {
            self.close_memory()
        } else {
            SessionResponse::default()
        }
    }

    pub fn type_key(&mut self, key: char) -> SessionResponse {
        let effects = self.store.type_key(key);
        self.after_secret_input(effects)
    }

    pub fn enter_code(&mut self, code: &str) -> SessionResponse {
        let effects = self.store.enter_code(code);
        self.after_secret_input(effects)
    }

    fn after_secret_input(&mut self, effects: Vec<Effect>) -> SessionResponse {
        let response = SessionResponse::effects(effects);
        if let Some(reward) = response.unlocked().last() {
            self.dialogs.secret = Some(reward);
        }
        response
    }

    pub fn toggle_night_mode(&mut self) -> SessionResponse {
        SessionResponse::effects(self.store.toggle_night_mode())
    }

    /// Advance session timers by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if let Some(remaining) = self.fireworks.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                debug!("fireworks show ended");
                self.fireworks = None;
            }
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let secrets = self.store.secrets();
        WorldSnapshot {
            scene: self.scene().clone(),
            days_together: self.days_together,
            showing_opening: self.showing_opening,
            showing_final: self.showing_final,
            dialogs: self.dialogs.clone(),
            fireworks: self.fireworks_active(),
            unlocked_rewards: secrets
                .codes()
                .iter()
                .filter(|c| c.unlocked)
                .map(|c| c.reward)
                .collect(),
            stars: self
                .store
                .stars()
                .iter()
                .map(|s| StarStatus {
                    id: s.id.clone(),
                    kind: s.kind,
                })
                .collect(),
            branches: self.tree.branches.len(),
            leaves: self.tree.leaves.len(),
        }
    }
}
