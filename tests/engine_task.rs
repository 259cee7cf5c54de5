use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{broadcast::error::TryRecvError, watch},
    time::sleep,
};

use pomodoro_timer::{
    services::NotificationPermission,
    state::AppState,
    tasks::{presentation_task, spawn_timer_engine, stop_timer_tasks, PresentationConfig, TimerCommand},
    timer::{DurationPresets, Mode, TimerEvent, Variant, TICK_PERIOD},
};

#[tokio::test(start_paused = true)]
async fn counts_down_once_per_second() {
    let (timer, _task) = spawn_timer_engine(DurationPresets::default(), TICK_PERIOD);

    let snapshot = timer.send(TimerCommand::Start).await.unwrap();
    assert!(snapshot.running);

    sleep(Duration::from_millis(60_500)).await;

    let snapshot = timer.snapshot();
    assert_eq!(snapshot.remaining_seconds, 1440);
    assert_eq!(snapshot.clock, "24:00");
    assert!(snapshot.running);
}

#[tokio::test(start_paused = true)]
async fn second_start_does_not_double_speed() {
    let (timer, _task) = spawn_timer_engine(DurationPresets::default(), TICK_PERIOD);

    timer.send(TimerCommand::Start).await.unwrap();
    timer.send(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(10_500)).await;

    assert_eq!(timer.snapshot().remaining_seconds, 1490);
}

#[tokio::test(start_paused = true)]
async fn mode_switch_stops_pending_ticks() {
    let (timer, _task) = spawn_timer_engine(DurationPresets::default(), TICK_PERIOD);

    timer.send(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(5_500)).await;

    let snapshot = timer.send(TimerCommand::SetMode(Mode::ShortBreak)).await.unwrap();
    assert!(!snapshot.running);
    assert_eq!(snapshot.remaining_seconds, 300);

    sleep(Duration::from_secs(3)).await;
    assert_eq!(timer.snapshot().remaining_seconds, 300);
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_and_start_resumes() {
    let (timer, _task) = spawn_timer_engine(DurationPresets::default(), TICK_PERIOD);

    timer.send(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(3_500)).await;
    let paused = timer.send(TimerCommand::Pause).await.unwrap();
    assert_eq!(paused.remaining_seconds, 1497);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(timer.snapshot().remaining_seconds, 1497);

    timer.send(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(timer.snapshot().remaining_seconds, 1495);
}

#[tokio::test(start_paused = true)]
async fn completion_fires_once_and_idles() {
    let (timer, _task) = spawn_timer_engine(DurationPresets::new(1, 1, 1, 1, 1), TICK_PERIOD);
    let mut events = timer.subscribe();

    timer.send(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_secs(65)).await;

    let snapshot = timer.snapshot();
    assert_eq!(snapshot.remaining_seconds, 0);
    assert!(!snapshot.running);

    let mut completions = Vec::new();
    loop {
        match events.try_recv() {
            Ok(TimerEvent::Completed { variant }) => completions.push(variant),
            Ok(_) => {}
            Err(TryRecvError::Empty) => break,
            Err(e) => panic!("unexpected receive error: {:?}", e),
        }
    }
    assert_eq!(completions, vec![Variant::Work]);
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_mode_duration() {
    let (timer, _task) = spawn_timer_engine(DurationPresets::default(), TICK_PERIOD);

    timer.send(TimerCommand::SetMode(Mode::LongBreak)).await.unwrap();
    timer.send(TimerCommand::Start).await.unwrap();
    sleep(Duration::from_millis(4_500)).await;

    let snapshot = timer.send(TimerCommand::Reset).await.unwrap();
    assert_eq!(snapshot.remaining_seconds, 900);
    assert_eq!(snapshot.total_seconds, 900);
    assert!(!snapshot.running);
}

#[tokio::test]
async fn engine_stops_when_handles_drop() {
    let (timer, task) = spawn_timer_engine(DurationPresets::default(), TICK_PERIOD);
    timer.send(TimerCommand::Start).await.unwrap();
    drop(timer);
    task.await.unwrap();
}

#[tokio::test]
async fn shutdown_stops_engine_held_by_presentation() {
    let (timer, engine) = spawn_timer_engine(DurationPresets::default(), TICK_PERIOD);
    let (_permission_tx, permission_rx) = watch::channel(NotificationPermission::Denied);
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        "Pomodoro Timer".to_string(),
        timer,
        permission_rx,
    ));

    let config = PresentationConfig {
        title: "Pomodoro Timer".to_string(),
        sound: false,
        terminal: false,
    };
    let presentation = tokio::spawn(presentation_task(Arc::clone(&state), config));

    state.apply(TimerCommand::Start).await.unwrap();
    drop(state);

    stop_timer_tasks(presentation, engine, Duration::from_secs(5))
        .await
        .unwrap();
}
