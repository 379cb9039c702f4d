//! End-to-end flows through the session facade, as a front-end drives it.

use chrono::NaiveDate;
use gift_core::content::SECRET_STAR_ID;
use gift_core::session::FIREWORKS_DURATION;
use gift_core::{
    Action, Effect, GiftSession, MemoryId, NoticeLevel, Reward, Scene, StarId, StarKind,
    WorldConfig,
};

fn new_session() -> GiftSession {
    let config = WorldConfig::new()
        .with_seed(2024)
        .with_today(NaiveDate::from_ymd_opt(2025, 12, 22).unwrap());
    GiftSession::new(config)
}

fn type_text(session: &mut GiftSession, text: &str) -> Vec<Reward> {
    text.chars()
        .flat_map(|c| session.perform(Action::TypeKey(c)).unlocked().collect::<Vec<_>>())
        .collect()
}

// =============================================================================
// SCENE FLOW
// =============================================================================

#[test]
fn test_full_visit() {
    let mut session = new_session();
    assert!(session.showing_opening());

    let welcome = session.perform(Action::Start);
    assert_eq!(welcome.notices[0].level, NoticeLevel::Success);
    assert_eq!(session.scene().current_scene, Scene::Island);

    session.perform(Action::ClickBuilding(MemoryId::from("milestone")));
    assert_eq!(session.scene().current_scene, Scene::Building);
    assert_eq!(
        session.store().selected_memory().map(|m| m.title.as_str()),
        Some("One Year Together")
    );
    session.perform(Action::CloseMemory);
    assert!(session.scene().selected_building.is_none());

    session.perform(Action::Navigate(Scene::Sky));
    session.perform(Action::ClickStar(StarId::from("star-3")));
    assert_eq!(session.scene().selected_star, Some(StarId::from("star-3")));
    session.perform(Action::Dismiss);
    assert!(session.scene().selected_star.is_none());

    session.perform(Action::ShowFinal);
    assert!(session.showing_final());
    assert_eq!(session.scene().current_scene, Scene::Final);

    session.perform(Action::Replay);
    assert!(!session.showing_final());
    assert_eq!(session.scene().current_scene, Scene::Island);
}

#[test]
fn test_scene_always_reflects_last_navigation() {
    let mut session = new_session();
    let order = [
        Scene::Tree,
        Scene::Island,
        Scene::Sky,
        Scene::Building,
        Scene::Building,
        Scene::Tree,
    ];
    for scene in order {
        session.perform(Action::Navigate(scene));
        assert_eq!(session.scene().current_scene, scene);
    }
}

#[test]
fn test_night_mode_toggles_back() {
    let mut session = new_session();
    let before = session.scene().night_mode;
    session.perform(Action::ToggleNightMode);
    assert_eq!(
        session.snapshot().scene.night_mode,
        !before
    );
    session.perform(Action::ToggleNightMode);
    assert_eq!(session.scene().night_mode, before);
}

#[test]
fn test_camera_follows_selection() {
    let mut session = new_session();
    session.perform(Action::Start);
    let overview = session.camera_target();

    session.perform(Action::ClickBuilding(MemoryId::from("chats")));
    let close_up = session.camera_target();
    assert_ne!(overview, close_up);
    assert_eq!(close_up.look_at.x, 2.0);
    assert_eq!(close_up.look_at.z, 2.0);

    let settled = close_up.position;
    let response = session.perform(Action::SetCameraPosition(settled));
    assert_eq!(response.effects, vec![Effect::CameraMoved(settled)]);
    assert_eq!(session.scene().camera_position, settled);
}

// =============================================================================
// SECRETS
// =============================================================================

#[test]
fn test_forever_after_noise_unlocks_fireworks_once() {
    let mut session = new_session();
    assert_eq!(type_text(&mut session, "hellothereforever"), vec![Reward::Fireworks]);
    assert!(type_text(&mut session, "forever").is_empty());

    session.perform(Action::CloseSecret);
    assert!(session.fireworks_active());
    session.advance(FIREWORKS_DURATION + 0.1);
    assert!(!session.fireworks_active());
}

#[test]
fn test_love_reveals_secret_star() {
    let mut session = new_session();
    let secret = StarId::from(SECRET_STAR_ID);

    session.perform(Action::ClickStar(secret.clone()));
    assert!(session.scene().selected_star.is_none());

    assert_eq!(type_text(&mut session, "love"), vec![Reward::Star]);
    assert_eq!(session.store().star(&secret).map(|s| s.kind), Some(StarKind::Unlocked));
    session.perform(Action::CloseSecret);
    assert!(!session.fireworks_active());

    session.perform(Action::ClickStar(secret.clone()));
    assert_eq!(session.scene().selected_star, Some(secret));
}

#[test]
fn test_all_codes_unlock_independently() {
    let mut session = new_session();
    session.perform(Action::EnterCode("US".to_string()));
    session.perform(Action::CloseSecret);
    type_text(&mut session, "forever");
    session.perform(Action::CloseSecret);
    type_text(&mut session, "love");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.unlocked_rewards.len(), 3);
    assert!(snapshot.scene.secret_unlocked);
    assert_eq!(snapshot.dialogs.secret, Some(Reward::Star));
}
