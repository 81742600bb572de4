use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use drill_core::{
    IgnoredInput, Notice, RoundFilter, RoundState, RoundStatus, StatKind, WordEntry,
};
use runtime::{
    Clock, Event, InMemoryWordStore, RoundEvent, RoundHandle, Runtime, RuntimeConfig,
    RuntimeError, StatsEvent, Topic, WordFlag, WordStore,
};

/// Monotonic test clock: every read advances by one millisecond.
struct StepClock(AtomicI64);

impl Clock for StepClock {
    fn now_millis(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn pair() -> Vec<WordEntry> {
    vec![
        WordEntry::new("be", "kommen", "to receive", "Ich bekomme Post."),
        WordEntry::new("ver", "stehen", "to understand", "Ich verstehe."),
    ]
}

async fn setup(entries: Vec<WordEntry>, round_size: usize) -> (Runtime, Arc<InMemoryWordStore>) {
    let store = Arc::new(InMemoryWordStore::with_seed(7));
    store
        .insert_many(entries)
        .await
        .expect("seed words should insert");

    let mut config = RuntimeConfig::default();
    config.round = drill_core::RoundConfig::with_round_size(round_size);

    let runtime = Runtime::builder()
        .config(config)
        .store(store.clone())
        .clock(Arc::new(StepClock(AtomicI64::new(1_000))))
        .seed(42)
        .build()
        .await
        .expect("runtime should build");

    (runtime, store)
}

/// Picker indices of the current word's own prefix and root.
fn correct_indices(state: &RoundState) -> (usize, usize) {
    let word = state.next_word.as_ref().expect("a word should be current");
    let left = state
        .prefixes
        .items()
        .iter()
        .position(|p| *p == word.prefix)
        .expect("prefix should be offered");
    let right = state
        .roots
        .items()
        .iter()
        .position(|r| *r == word.root_label())
        .expect("root should be offered");
    (left, right)
}

/// Picker indices pairing the current root with some other prefix.
fn wrong_indices(state: &RoundState) -> (usize, usize) {
    let (left, right) = correct_indices(state);
    let other = (0..state.prefixes.len())
        .find(|&i| i != left)
        .expect("a second prefix should be offered");
    (other, right)
}

async fn stored(store: &InMemoryWordStore, state_word: &drill_core::Word) -> drill_core::Word {
    store
        .get_by_id(state_word.id)
        .await
        .expect("store read should succeed")
        .expect("word should exist")
}

#[tokio::test]
async fn start_round_emits_notice_and_snapshot_and_records_first_word() {
    let (runtime, store) = setup(pair(), 5).await;
    let handle = runtime.handle();
    let mut round_rx = handle.subscribe(Topic::Round);

    let state = handle.start_round(None).await.expect("round should start");
    assert_eq!(state.progress.max, 2);
    assert_eq!(state.progress.value, 0);
    assert!(!state.round_ended);
    assert_eq!(state.translation, "");

    match round_rx.recv().await.expect("notice event") {
        Event::Round(RoundEvent::Notice {
            notice: Notice::NewRound { next },
            ..
        }) => assert_eq!(Some(next), state.next_word.as_ref().map(|w| w.translation.clone())),
        other => panic!("unexpected event: {other:?}"),
    }
    match round_rx.recv().await.expect("snapshot event") {
        Event::Round(RoundEvent::Snapshot(snapshot)) => assert_eq!(snapshot, state),
        other => panic!("unexpected event: {other:?}"),
    }

    handle.settle().await.expect("settle");
    let first = stored(&store, state.next_word.as_ref().unwrap()).await;
    assert_eq!(first.stats.times_shown, 1);
    assert!(first.stats.last_shown_at > 1_000);

    let merged = handle.snapshot().await.expect("snapshot");
    assert_eq!(merged.next_word.map(|w| w.stats.times_shown), Some(1));
}

#[tokio::test]
async fn correct_answers_walk_the_round_to_done() {
    let (runtime, store) = setup(pair(), 5).await;
    let handle = runtime.handle();

    let mut state = handle.start_round(None).await.expect("round should start");
    let mut answered = Vec::new();

    while !state.round_ended {
        let current = state.next_word.clone().expect("current word");
        let (left, right) = correct_indices(&state);
        state = handle.combine(left, right).await.expect("combine");
        answered.push(current);
    }

    assert_eq!(answered.len(), 2);
    assert_eq!(state.status, RoundStatus::Done);
    assert!(state.next_word.is_none());
    let last = answered.last().unwrap();
    assert_eq!(state.last_word.as_ref().map(|w| w.id), Some(last.id));
    assert_eq!(
        state.translation,
        format!("{}\n{}", last.display_form(), last.translation)
    );
    assert_eq!(state.example, last.example);

    handle.settle().await.expect("settle");
    for word in &answered {
        let word = stored(&store, word).await;
        assert_eq!(word.stats.times_shown, 1);
        assert_eq!(word.stats.correct_count, 1);
        assert_eq!(word.stats.tries_count, 1);
        assert_eq!(word.stats.failed_count, 0);
    }
}

#[tokio::test]
async fn wrong_guesses_retry_then_force_advance() {
    let (runtime, store) = setup(pair(), 5).await;
    let handle = runtime.handle();

    let state = handle.start_round(None).await.expect("round should start");
    let first = state.next_word.clone().expect("current word");
    let (left, right) = wrong_indices(&state);

    let retry = handle.combine(left, right).await.expect("first wrong guess");
    assert!(matches!(retry.status, RoundStatus::Wrong { .. }));
    assert_eq!(retry.progress.value, 1);
    assert_eq!(retry.next_word.as_ref().map(|w| w.id), Some(first.id));
    assert!(retry.status_label.contains(&first.root_label()));

    let forced = handle.combine(left, right).await.expect("second wrong guess");
    assert_eq!(forced.status, RoundStatus::Forced);
    assert_eq!(forced.progress.value, 0);
    assert_eq!(forced.last_word.as_ref().map(|w| w.id), Some(first.id));
    assert_ne!(forced.next_word.as_ref().map(|w| w.id), Some(first.id));

    handle.settle().await.expect("settle");
    let first = stored(&store, &first).await;
    assert_eq!(first.stats.failed_count, 2);
    assert_eq!(first.stats.tries_count, 2);
    assert_eq!(first.stats.correct_count, 0);

    let second = stored(&store, forced.next_word.as_ref().unwrap()).await;
    assert_eq!(second.stats.times_shown, 1);
}

#[tokio::test]
async fn skip_counts_as_failure_and_advances() {
    let (runtime, store) = setup(pair(), 5).await;
    let handle = runtime.handle();

    let state = handle.start_round(None).await.expect("round should start");
    let first = state.next_word.clone().expect("current word");

    let skipped = handle.skip().await.expect("skip");
    assert_eq!(skipped.status, RoundStatus::Skipped);
    assert_eq!(skipped.last_word.as_ref().map(|w| w.id), Some(first.id));

    let done = handle.skip().await.expect("skip last");
    assert_eq!(done.status, RoundStatus::Done);
    assert!(done.round_ended);

    let err = handle.skip().await.expect_err("no word left to skip");
    assert!(matches!(
        err,
        RuntimeError::InputIgnored(IgnoredInput::NoActiveWord)
    ));

    handle.settle().await.expect("settle");
    assert_eq!(stored(&store, &first).await.stats.failed_count, 1);
}

#[tokio::test]
async fn out_of_range_input_is_ignored_without_events() {
    let (runtime, _store) = setup(pair(), 5).await;
    let handle = runtime.handle();

    let before = handle.start_round(None).await.expect("round should start");
    let mut round_rx = handle.subscribe(Topic::Round);

    let err = handle.combine(99, 0).await.expect_err("index out of range");
    assert!(matches!(
        err,
        RuntimeError::InputIgnored(IgnoredInput::PrefixOutOfRange { index: 99, .. })
    ));
    assert!(round_rx.try_recv().is_err());

    handle.settle().await.expect("settle");
    let after = handle.snapshot().await.expect("snapshot");
    assert_eq!(after.progress, before.progress);
    assert_eq!(after.status, before.status);
    assert_eq!(after.prefixes, before.prefixes);
    assert_eq!(
        after.next_word.map(|w| w.id),
        before.next_word.map(|w| w.id)
    );
}

#[tokio::test]
async fn empty_favorites_round_ends_immediately() {
    let (runtime, _store) = setup(pair(), 5).await;
    let handle = runtime.handle();

    let state = handle
        .start_round(Some(RoundFilter::favorites()))
        .await
        .expect("round should start");

    assert!(state.round_ended);
    assert_eq!(state.status, RoundStatus::NoWords);
    assert!(state.prefixes.is_empty());
    assert!(state.roots.is_empty());
    assert!(state.next_word.is_none());
    assert_eq!(
        handle.active_filter().await.expect("filter"),
        Some(RoundFilter::favorites())
    );

    let err = handle.combine(0, 0).await.expect_err("pickers are empty");
    assert!(matches!(
        err,
        RuntimeError::InputIgnored(IgnoredInput::EmptyPickers)
    ));
}

#[tokio::test]
async fn learned_words_only_reach_explicit_filters() {
    let (runtime, store) = setup(pair(), 5).await;
    let catalog = runtime.catalog();
    let handle = runtime.handle();

    let kommen = store
        .all_words()
        .await
        .expect("all words")
        .into_iter()
        .find(|w| w.root == "kommen")
        .expect("kommen");
    catalog
        .toggle_learned(kommen.id)
        .await
        .expect("toggle learned");

    let mixed = handle.start_round(None).await.expect("mixed round");
    assert_eq!(mixed.progress.max, 1);
    assert_eq!(mixed.next_word.map(|w| w.root), Some("stehen".to_string()));

    let by_prefix = handle
        .start_round(Some(RoundFilter::prefix("be")))
        .await
        .expect("prefix round");
    assert_eq!(by_prefix.next_word.map(|w| w.id), Some(kommen.id));
}

#[tokio::test]
async fn round_size_caps_working_list_and_restarts_on_change() {
    let entries = (0..12)
        .map(|i| WordEntry::new("an", format!("root{i}"), format!("t{i}"), ""))
        .collect();
    let (runtime, _store) = setup(entries, 3).await;
    let handle = runtime.handle();

    let state = handle.start_round(None).await.expect("round should start");
    assert_eq!(state.progress.max, 3);
    assert_eq!(state.prefixes.display(), &["an (x3)".to_string()]);

    let hard = handle
        .set_difficulty(drill_core::Difficulty::Hard)
        .await
        .expect("difficulty");
    assert_eq!(hard.progress.max, 10);

    let unchanged = handle.set_round_size(10).await.expect("same size");
    assert_eq!(unchanged.progress, hard.progress);
    assert_eq!(
        unchanged.next_word.map(|w| w.id),
        hard.next_word.map(|w| w.id)
    );
}

#[tokio::test]
async fn toggling_last_word_updates_store_and_snapshot() {
    let (runtime, store) = setup(pair(), 5).await;
    let handle = runtime.handle();

    handle.start_round(None).await.expect("round should start");
    let err = handle
        .toggle_favorite_last()
        .await
        .expect_err("nothing answered yet");
    assert!(matches!(err, RuntimeError::NoLastWord));

    let skipped = handle.skip().await.expect("skip");
    let last = skipped.last_word.expect("last word");

    let favorite = handle.toggle_favorite_last().await.expect("toggle favorite");
    assert!(favorite.is_favorite);
    assert_eq!(favorite.stats.failed_count, 1);
    assert!(stored(&store, &last).await.is_favorite);

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert!(snapshot.last_word.expect("last word").is_favorite);

    let favorites = handle
        .start_round(Some(RoundFilter::favorites()))
        .await
        .expect("favorites round");
    assert_eq!(favorites.next_word.map(|w| w.id), Some(last.id));
}

#[tokio::test]
async fn stat_writes_are_published() {
    let (runtime, _store) = setup(pair(), 5).await;
    let handle = runtime.handle();
    let mut stats_rx = handle.subscribe(Topic::Stats);

    let state = handle.start_round(None).await.expect("round should start");
    handle.settle().await.expect("settle");

    match stats_rx.recv().await.expect("stats event") {
        Event::Stats(StatsEvent::Recorded { word, kind }) => {
            assert_eq!(kind, StatKind::Shown);
            assert_eq!(Some(word.id), state.next_word.map(|w| w.id));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn shutdown_waits_for_worker() {
    let (runtime, store) = setup(pair(), 5).await;
    let handle: RoundHandle = runtime.handle();

    let state = handle.start_round(None).await.expect("round should start");
    drop(handle);

    runtime.shutdown().await.expect("shutdown");

    // Pending writes are drained before the worker exits.
    let first = stored(&store, state.next_word.as_ref().unwrap()).await;
    assert_eq!(first.stats.times_shown, 1);
}

#[tokio::test]
async fn earlier_history_words_can_be_flagged() {
    let entries = vec![
        WordEntry::new("be", "kommen", "to receive", ""),
        WordEntry::new("ver", "stehen", "to understand", ""),
        WordEntry::new("an", "rufen", "to call", ""),
    ];
    let (runtime, store) = setup(entries, 3).await;
    let handle = runtime.handle();

    handle.start_round(None).await.expect("round should start");
    handle.skip().await.expect("first skip");
    let state = handle.skip().await.expect("second skip");
    assert_eq!(state.history.len(), 2);
    let first = state.history[0].clone();

    let learned = handle
        .toggle_history(Some(0), WordFlag::Learned)
        .await
        .expect("toggle first word");
    assert_eq!(learned.id, first.id);
    assert!(learned.is_learned);
    assert!(stored(&store, &first).await.is_learned);

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert!(snapshot.history[0].is_learned);
    assert!(!snapshot.history[1].is_learned);

    let err = handle
        .toggle_history(Some(2), WordFlag::Favorite)
        .await
        .expect_err("only two words are finished");
    assert!(matches!(
        err,
        RuntimeError::HistoryOutOfRange { position: 2, len: 2 }
    ));

    drop(handle);
    runtime.shutdown().await.expect("shutdown");
}
