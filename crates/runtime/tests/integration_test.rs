//! End-to-end runtime tests on tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use game_core::{AttackKind, ConstantRng, EnemyId, GameConfig, GameEvent, Intent, ItemKind, ZoneId};
use runtime::{
    Event, FileSnapshotRepository, InMemorySnapshotRepository, Runtime, SessionEvent, Topic,
};
use tokio::time::sleep;

async fn wake_up(runtime: &Runtime) {
    let intro = runtime.handle().query_config().await.unwrap().timings.introduction_ms;
    sleep(Duration::from_millis(intro + 10)).await;
}

#[tokio::test(start_paused = true)]
async fn introduction_fires_on_its_own() {
    let runtime = Runtime::builder()
        .repository(InMemorySnapshotRepository::new())
        .seed(7)
        .build()
        .await
        .unwrap();
    assert!(matches!(
        runtime.started(),
        SessionEvent::Started { resumed: false, .. }
    ));
    let mut game_rx = runtime.subscribe(Topic::Game);

    wake_up(&runtime).await;

    let mut saw_intro = false;
    while let Ok(event) = game_rx.try_recv() {
        if matches!(event, Event::Game(GameEvent::IntroductionCompleted)) {
            saw_intro = true;
        }
    }
    assert!(saw_intro);

    let state = runtime.handle().query_state().await.unwrap();
    assert_eq!(state.player.hp, state.player.max_hp);
    assert_eq!(state.game_seed, 7);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn ambush_is_fought_to_victory_on_real_timers() {
    let runtime = Runtime::builder()
        .game_config(GameConfig::default().with_encounter_chance(1.0))
        .rng(ConstantRng(0))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    wake_up(&runtime).await;

    let events = handle.submit(Intent::travel(ZoneId::Streets)).await.unwrap();
    assert!(
        events
            .iter()
            .any(|event| matches!(event, GameEvent::EncounterStarted { .. }))
    );

    let mut swings = 0;
    while handle.query_state().await.unwrap().enemies.any_alive() {
        handle
            .submit(Intent::attack(AttackKind::Melee, EnemyId(1)))
            .await
            .unwrap();
        // Long enough for the counter-attack to land.
        sleep(Duration::from_millis(500)).await;
        swings += 1;
        assert!(swings < 20, "battle never ended");
    }

    // Retire, declare, complete, settle.
    sleep(Duration::from_secs(3)).await;
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.zone.current, ZoneId::Streets);
    assert_eq!(state.player_inventory.bat, 1);
    assert!(!state.zone.settling);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn rejected_intent_is_reported_and_harmless() {
    let runtime = Runtime::builder().build().await.unwrap();
    let handle = runtime.handle();
    wake_up(&runtime).await;
    let mut game_rx = handle.subscribe(Topic::Game);
    let before = handle.query_state().await.unwrap();

    let err = handle.submit(Intent::buy(ItemKind::Bat)).await.unwrap_err();
    assert_eq!(err.code(), "INTENT_SERVICE_UNAVAILABLE");
    assert!(err.rejection().is_some());

    match game_rx.recv().await.unwrap() {
        Event::Rejected(rejected) => {
            assert_eq!(rejected.code, "INTENT_SERVICE_UNAVAILABLE");
            assert_eq!(rejected.intent, Intent::buy(ItemKind::Bat));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(handle.query_state().await.unwrap(), before);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn saved_game_resumes_where_it_left_off() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::default().with_encounter_chance(0.0);

    let runtime = Runtime::builder()
        .game_config(config.clone())
        .repository(FileSnapshotRepository::new(dir.path(), "test").unwrap())
        .build()
        .await
        .unwrap();
    wake_up(&runtime).await;
    runtime
        .handle()
        .submit(Intent::travel(ZoneId::Streets))
        .await
        .unwrap();
    sleep(Duration::from_secs(1)).await;
    let saved = runtime.handle().query_state().await.unwrap();
    runtime.shutdown().await.unwrap();

    let runtime = Runtime::builder()
        .game_config(config)
        .repository(FileSnapshotRepository::new(dir.path(), "test").unwrap())
        .build()
        .await
        .unwrap();
    assert!(matches!(
        runtime.started(),
        SessionEvent::Started { resumed: true, .. }
    ));
    let resumed = runtime.handle().query_state().await.unwrap();
    assert_eq!(resumed.zone.current, ZoneId::Streets);
    assert_eq!(resumed.nonce, saved.nonce);
    assert_eq!(resumed.player, saved.player);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn config_reload_validates_and_applies() {
    let runtime = Runtime::builder().build().await.unwrap();
    let handle = runtime.handle();
    let mut session_rx = handle.subscribe(Topic::Session);

    let err = handle
        .reload_config(GameConfig::default().with_encounter_chance(3.0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_CONFIG");

    let mut cheaper = GameConfig::default();
    cheaper.prices.heal = 1;
    handle.reload_config(cheaper.clone()).await.unwrap();
    assert_eq!(handle.query_config().await.unwrap(), cheaper);
    assert!(matches!(
        session_rx.recv().await.unwrap(),
        Event::Session(SessionEvent::ConfigReloaded)
    ));
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn new_game_replaces_the_save() {
    let runtime = Runtime::builder()
        .game_config(GameConfig::default().with_encounter_chance(0.0))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    wake_up(&runtime).await;
    handle.submit(Intent::travel(ZoneId::Streets)).await.unwrap();

    handle.new_game(Some(99)).await.unwrap();
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.game_seed, 99);
    assert_eq!(state.nonce, 0);
    assert_eq!(state.zone.current, ZoneId::Hospital);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_saves_and_stops_the_worker() {
    let repository = Arc::new(InMemorySnapshotRepository::new());
    let runtime = Runtime::builder()
        .shared_repository(repository.clone())
        .seed(3)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    assert!(repository.saved().is_none());

    runtime.shutdown().await.unwrap();

    let saved = repository.saved().expect("shutdown saves the game");
    assert_eq!(saved.nonce, 0);
    assert!(matches!(
        handle.query_state().await,
        Err(runtime::RuntimeError::CommandChannelClosed)
    ));
}
