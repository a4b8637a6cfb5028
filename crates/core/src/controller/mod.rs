//! Session orchestration: player intents, the turn countdown and UI snapshots.
//!
//! The controller owns the current [`Session`] and is the only writer of it.
//! Background timers never touch the session themselves; they post
//! [`ControllerEvent`]s back to the owner, tagged with the countdown
//! generation or error instance they were started for, so a stale timer can
//! never act on a newer game or wipe a newer error.

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::sleep,
};
use tracing::{debug, info, warn};

use crate::{
    dictionary::{DictionaryError, WordStore},
    engine::{RuleEngine, StartError, TIMER_SECONDS},
    models::Difficulty,
    session::Session,
};

/// How long a rejected submission's message stays visible.
pub const ERROR_DISPLAY: Duration = Duration::from_secs(2);

const TICK: Duration = Duration::from_secs(1);
const EVENT_BUFFER: usize = 16;
/// Leading input positions `update_input` overwrites on every keystroke.
const FORCED_PREFIX_LEN: usize = 1;

/// Everything a frontend needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Current game, if one was started.
    pub session: Option<Session>,
    /// Dictionary still loading.
    pub loading: bool,
    /// Message to show; transient for rejected guesses, standing for load failures.
    pub error: Option<String>,
    /// The end-of-game dialog is visible.
    pub show_result: bool,
    /// Seconds left on the turn countdown.
    pub timer_seconds_remaining: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
            error: None,
            show_result: false,
            timer_seconds_remaining: TIMER_SECONDS,
        }
    }
}

/// Opaque notification from a background timer. Feed it to
/// [`SessionController::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerEvent(EventKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Tick { generation: u64, remaining: u32 },
    Expired { generation: u64 },
    ClearError { error_id: u64 },
}

/// Drives one session at a time on top of a [`RuleEngine`].
pub struct SessionController<S> {
    engine: RuleEngine<S>,
    snapshot: GameSnapshot,
    publisher: watch::Sender<GameSnapshot>,
    events_tx: mpsc::Sender<ControllerEvent>,
    events_rx: mpsc::Receiver<ControllerEvent>,
    countdown: Option<JoinHandle<()>>,
    countdown_generation: u64,
    error_seq: u64,
    pending_error: Option<u64>,
    load_failed: bool,
}

impl<S: WordStore + 'static> SessionController<S> {
    /// Build a controller over `store`. Call [`initialize`](Self::initialize) before playing.
    pub fn new(store: Arc<S>) -> Self {
        let snapshot = GameSnapshot::default();
        let (publisher, _) = watch::channel(snapshot.clone());
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        Self {
            engine: RuleEngine::new(store),
            snapshot,
            publisher,
            events_tx,
            events_rx,
            countdown: None,
            countdown_generation: 0,
            error_seq: 0,
            pending_error: None,
            load_failed: false,
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.publisher.subscribe()
    }

    /// Whether a turn countdown is running.
    pub fn countdown_active(&self) -> bool {
        self.countdown.is_some()
    }

    /// Load the dictionary off the async runtime, then clear `loading`.
    ///
    /// On failure the message stays up until a later call succeeds or
    /// [`clear_error`](Self::clear_error) is called.
    pub async fn initialize(&mut self) -> Result<(), DictionaryError> {
        self.snapshot.loading = true;
        self.publish();

        let store = Arc::clone(self.engine.store());
        let result = match tokio::task::spawn_blocking(move || store.load()).await {
            Ok(result) => result,
            Err(err) => Err(DictionaryError::LoadTask(err.to_string())),
        };

        self.snapshot.loading = false;
        match &result {
            Ok(()) => {
                if self.load_failed {
                    self.load_failed = false;
                    self.snapshot.error = None;
                }
            }
            Err(err) => {
                warn!(%err, "dictionary unavailable");
                self.load_failed = true;
                self.show_standing_error(format!("Failed to load dictionary: {err}"));
            }
        }
        self.publish();
        result
    }

    /// Start a game on a random word.
    pub fn start_game(
        &mut self,
        letter_count: usize,
        difficulty: Difficulty,
        timer_enabled: bool,
    ) -> Result<(), StartError> {
        self.ensure_ready()?;
        match self.engine.create(letter_count, difficulty, timer_enabled) {
            Ok(session) => self.begin(session),
            Err(err) => {
                self.report_start_failure(&err);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Start a game on the word of the day for `date`.
    pub fn start_daily_game(
        &mut self,
        letter_count: usize,
        difficulty: Difficulty,
        date: NaiveDate,
        timer_enabled: bool,
    ) -> Result<(), StartError> {
        self.ensure_ready()?;
        match self
            .engine
            .create_daily(letter_count, difficulty, date, timer_enabled)
        {
            Ok(session) => self.begin(session),
            Err(err) => {
                self.report_start_failure(&err);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Start a game on an explicit word.
    pub fn start_game_with_word(
        &mut self,
        word: &str,
        difficulty: Difficulty,
        timer_enabled: bool,
    ) -> Result<(), StartError> {
        self.ensure_ready()?;
        match self.engine.create_with_word(word, difficulty, timer_enabled) {
            Ok(session) => self.begin(session),
            Err(err) => {
                self.report_start_failure(&err);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Append a typed letter to the guess buffer.
    pub fn on_letter_input(&mut self, letter: char) {
        let Some(session) = self.active_session() else {
            return;
        };
        if !letter.is_alphabetic() {
            return;
        }

        let mut input = session.current_input.clone();
        input.push(letter);
        if input.chars().count() > session.letter_count {
            return;
        }

        let updated = self.engine.update_input(session, &input);
        self.replace_session(updated);
    }

    /// Remove the last letter. The forced first letter stays.
    pub fn on_backspace(&mut self) {
        let Some(session) = self.active_session() else {
            return;
        };

        let len = session.current_input.chars().count();
        if len <= FORCED_PREFIX_LEN {
            return;
        }

        let input: String = session.current_input.chars().take(len - 1).collect();
        let updated = self.engine.update_input(session, &input);
        self.replace_session(updated);
    }

    /// Submit the guess buffer. Incomplete guesses are ignored.
    pub fn on_submit(&mut self) {
        let Some(session) = self.active_session() else {
            return;
        };
        if session.current_input.chars().count() != session.letter_count {
            return;
        }

        match self.engine.submit(session, &session.current_input) {
            Ok(next) => {
                info!(
                    guess = %next.attempts.last().map(|a| a.word.as_str()).unwrap_or_default(),
                    phase = ?next.phase,
                    score = next.score,
                    "guess accepted"
                );
                let finished = next.is_game_over();
                let timer_enabled = next.timer_enabled;
                self.snapshot.session = Some(next);
                self.snapshot.show_result = finished;
                self.snapshot.timer_seconds_remaining = TIMER_SECONDS;
                if finished {
                    self.stop_countdown();
                } else if timer_enabled {
                    self.start_countdown();
                }
                self.publish();
            }
            Err(reason) => {
                debug!(?reason, input = %session.current_input, "guess rejected");
                self.show_transient_error(reason.to_string());
            }
        }
    }

    /// Hide the end-of-game dialog.
    pub fn dismiss_result(&mut self) {
        self.snapshot.show_result = false;
        self.publish();
    }

    /// Drop the current message, transient or standing.
    pub fn clear_error(&mut self) {
        self.pending_error = None;
        self.snapshot.error = None;
        self.publish();
    }

    /// Wait for the next timer notification.
    pub async fn next_event(&mut self) -> Option<ControllerEvent> {
        self.events_rx.recv().await
    }

    /// Wait for the next timer notification and apply it.
    pub async fn pump(&mut self) {
        if let Some(event) = self.next_event().await {
            self.handle_event(event);
        }
    }

    /// Apply a timer notification. Notifications from superseded timers are dropped.
    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event.0 {
            EventKind::Tick {
                generation,
                remaining,
            } if generation == self.countdown_generation => {
                self.snapshot.timer_seconds_remaining = remaining;
                self.publish();
            }
            EventKind::Expired { generation } if generation == self.countdown_generation => {
                self.expire_countdown();
            }
            EventKind::ClearError { error_id } if self.pending_error == Some(error_id) => {
                self.pending_error = None;
                self.snapshot.error = None;
                self.publish();
            }
            stale => debug!(?stale, "stale controller event ignored"),
        }
    }

    fn ensure_ready(&self) -> Result<(), StartError> {
        if self.engine.store().is_ready() {
            return Ok(());
        }
        warn!("start requested before the dictionary is ready");
        Err(DictionaryError::NotLoaded.into())
    }

    fn report_start_failure(&mut self, err: &StartError) {
        warn!(%err, "could not start a game");
        self.show_standing_error(err.to_string());
        self.publish();
    }

    fn begin(&mut self, session: Session) {
        info!(
            letter_count = session.letter_count,
            difficulty = %session.difficulty,
            timer = session.timer_enabled,
            "game started"
        );
        let timer_enabled = session.timer_enabled;
        self.stop_countdown();
        self.snapshot.session = Some(session);
        self.snapshot.show_result = false;
        self.snapshot.error = None;
        self.pending_error = None;
        self.snapshot.timer_seconds_remaining = TIMER_SECONDS;
        if timer_enabled {
            self.start_countdown();
        }
        self.publish();
    }

    fn active_session(&self) -> Option<&Session> {
        self.snapshot
            .session
            .as_ref()
            .filter(|session| !session.is_game_over())
    }

    fn replace_session(&mut self, session: Session) {
        self.snapshot.session = Some(session);
        self.publish();
    }

    fn start_countdown(&mut self) {
        self.stop_countdown();
        let generation = self.countdown_generation;
        let seconds = self
            .snapshot
            .session
            .as_ref()
            .map(|session| session.timer_seconds)
            .unwrap_or(TIMER_SECONDS);
        self.snapshot.timer_seconds_remaining = seconds;
        debug!(generation, seconds, "countdown started");
        self.countdown = Some(tokio::spawn(run_countdown(
            self.events_tx.clone(),
            generation,
            seconds,
        )));
    }

    fn stop_countdown(&mut self) {
        self.countdown_generation += 1;
        if let Some(handle) = self.countdown.take() {
            debug!("countdown stopped");
            handle.abort();
        }
    }

    fn expire_countdown(&mut self) {
        self.stop_countdown();
        let Some(session) = self.active_session() else {
            return;
        };
        info!("turn timed out");
        let timed_out = self.engine.handle_timeout(session);
        self.snapshot.session = Some(timed_out);
        self.snapshot.show_result = true;
        self.snapshot.timer_seconds_remaining = 0;
        self.publish();
    }

    fn show_transient_error(&mut self, message: String) {
        self.error_seq += 1;
        let error_id = self.error_seq;
        self.pending_error = Some(error_id);
        self.snapshot.error = Some(message);

        let sender = self.events_tx.clone();
        tokio::spawn(async move {
            sleep(ERROR_DISPLAY).await;
            let _ = sender
                .send(ControllerEvent(EventKind::ClearError { error_id }))
                .await;
        });
        self.publish();
    }

    fn show_standing_error(&mut self, message: String) {
        self.pending_error = None;
        self.snapshot.error = Some(message);
    }

    fn publish(&self) {
        self.publisher.send_replace(self.snapshot.clone());
    }
}

impl<S> Drop for SessionController<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }
}

async fn run_countdown(sender: mpsc::Sender<ControllerEvent>, generation: u64, seconds: u32) {
    let mut remaining = seconds;
    while remaining > 0 {
        sleep(TICK).await;
        remaining -= 1;
        let event = if remaining == 0 {
            EventKind::Expired { generation }
        } else {
            EventKind::Tick {
                generation,
                remaining,
            }
        };
        if sender.send(ControllerEvent(event)).await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dictionary::{
            loader::{pool_path, vocabulary_path},
            FileWordStore, StaticWordStore, LETTER_COUNTS,
        },
        engine::MAX_ATTEMPTS,
        models::GamePhase,
    };
    use anyhow::Result;
    use tokio::time::{timeout, Instant};

    const GUESSES: [&str; 7] = [
        "POULETS", "PENDANT", "PRESQUE", "PASSION", "PLAFOND", "PISCINE", "PZZZZZZ",
    ];

    async fn controller() -> SessionController<StaticWordStore> {
        let store = StaticWordStore::new(&GUESSES[..6]).with_pool(7, Difficulty::Easy, ["POISSON"]);
        let mut controller = SessionController::new(Arc::new(store));
        controller
            .initialize()
            .await
            .expect("static store always loads");
        controller
    }

    fn type_word<S: WordStore + 'static>(controller: &mut SessionController<S>, word: &str) {
        for letter in word.chars() {
            controller.on_letter_input(letter);
        }
    }

    fn session<S>(controller: &SessionController<S>) -> &Session {
        controller
            .snapshot
            .session
            .as_ref()
            .expect("a game is running")
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_clears_loading() {
        let store = Arc::new(StaticWordStore::default());
        let mut controller = SessionController::new(store);
        assert!(controller.snapshot().loading);
        controller.initialize().await.unwrap();
        assert!(!controller.snapshot().loading);
        assert_eq!(controller.snapshot().error, None);
    }

    #[tokio::test]
    async fn load_failure_blocks_start_until_retry_succeeds() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let store = Arc::new(FileWordStore::new(temp.path()));
        let mut controller = SessionController::new(Arc::clone(&store));

        assert!(controller.initialize().await.is_err());
        assert!(!controller.snapshot().loading);
        let message = controller.snapshot().error.clone().unwrap_or_default();
        assert!(message.starts_with("Failed to load dictionary"));
        assert!(matches!(
            controller.start_game(7, Difficulty::Easy, false),
            Err(StartError::Dictionary(DictionaryError::NotLoaded))
        ));

        for letter_count in LETTER_COUNTS {
            std::fs::write(vocabulary_path(temp.path(), letter_count), "")?;
            for difficulty in Difficulty::ALL {
                std::fs::write(pool_path(temp.path(), letter_count, difficulty), "")?;
            }
        }
        std::fs::write(pool_path(temp.path(), 7, Difficulty::Easy), "poisson\n")?;

        controller.initialize().await?;
        assert_eq!(controller.snapshot().error, None);
        controller.start_game(7, Difficulty::Easy, false)?;
        assert_eq!(session(&controller).target_word, "POISSON");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn start_game_publishes_a_fresh_session() {
        let mut controller = controller().await;
        let mut updates = controller.subscribe();

        controller.start_game(7, Difficulty::Easy, true).unwrap();

        assert!(updates.has_changed().unwrap());
        let published = updates.borrow_and_update().clone();
        assert_eq!(published, *controller.snapshot());
        let session = published.session.expect("session published");
        assert_eq!(session.phase, GamePhase::Playing);
        assert!(!published.show_result);
        assert_eq!(published.timer_seconds_remaining, TIMER_SECONDS);
        assert!(controller.countdown_active());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_pool_surfaces_an_error() {
        let mut controller = controller().await;
        let result = controller.start_game(9, Difficulty::Hard, false);
        assert!(matches!(
            result,
            Err(StartError::Dictionary(DictionaryError::NoWords { .. }))
        ));
        assert!(controller.snapshot().error.is_some());
        assert!(controller.snapshot().session.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn successful_start_clears_a_previous_start_failure() {
        let mut controller = controller().await;
        assert!(controller.start_game(9, Difficulty::Hard, true).is_err());
        assert!(controller.snapshot().error.is_some());

        controller.start_game(7, Difficulty::Easy, true).unwrap();
        assert_eq!(controller.snapshot().error, None);
        assert_eq!(session(&controller).phase, GamePhase::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn new_game_drops_a_pending_transient_error() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, false).unwrap();
        type_word(&mut controller, "PZZZZZZ");
        controller.on_submit();
        assert!(controller.snapshot().error.is_some());

        controller.start_game(7, Difficulty::Easy, false).unwrap();
        assert_eq!(controller.snapshot().error, None);
        // The scheduled clear from the old game is ignored.
        controller.pump().await;
        assert_eq!(controller.snapshot().error, None);
    }

    #[test]
    fn explicit_word_waits_for_the_dictionary() {
        let store = Arc::new(FileWordStore::new("/nonexistent"));
        let mut controller = SessionController::new(store);
        assert!(matches!(
            controller.start_game_with_word("POISSON", Difficulty::Easy, false),
            Err(StartError::Dictionary(DictionaryError::NotLoaded))
        ));
        assert!(controller.snapshot().session.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn typing_forces_first_letter_and_caps_length() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, false).unwrap();

        controller.on_letter_input('x');
        assert_eq!(session(&controller).current_input, "P");
        controller.on_letter_input('1');
        assert_eq!(session(&controller).current_input, "P");

        type_word(&mut controller, "assionnaire");
        assert_eq!(session(&controller).current_input, "PASSION");
    }

    #[tokio::test(start_paused = true)]
    async fn backspace_keeps_only_the_first_letter() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, false).unwrap();

        type_word(&mut controller, "PA");
        controller.on_backspace();
        assert_eq!(session(&controller).current_input, "P");
        controller.on_backspace();
        assert_eq!(session(&controller).current_input, "P");
    }

    #[tokio::test(start_paused = true)]
    async fn backspace_erases_a_mistyped_confirmed_position() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, false).unwrap();

        type_word(&mut controller, "POULETS");
        controller.on_submit();
        assert_eq!(session(&controller).next_attempt_prefill().get(&1), Some(&'O'));

        // Position 1 is known to be O; the player typed A there.
        type_word(&mut controller, "PA");
        controller.on_backspace();
        assert_eq!(session(&controller).current_input, "P");
        type_word(&mut controller, "O");
        assert_eq!(session(&controller).current_input, "PO");
    }

    #[tokio::test(start_paused = true)]
    async fn incomplete_guess_is_ignored() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, false).unwrap();

        type_word(&mut controller, "PAS");
        controller.on_submit();
        assert_eq!(controller.snapshot().error, None);
        assert!(session(&controller).attempts.is_empty());
        assert_eq!(session(&controller).current_input, "PAS");
    }

    #[tokio::test(start_paused = true)]
    async fn winning_stops_the_countdown() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, true).unwrap();

        type_word(&mut controller, "POISSON");
        controller.on_submit();

        let snapshot = controller.snapshot();
        let session = snapshot.session.as_ref().unwrap();
        assert_eq!(session.phase, GamePhase::Won);
        assert_eq!(session.score, 50);
        assert!(snapshot.show_result);
        assert!(!controller.countdown_active());
        assert!(timeout(Duration::from_secs(30), controller.next_event())
            .await
            .is_err());

        controller.dismiss_result();
        assert!(!controller.snapshot().show_result);
        // Input after the game ends changes nothing.
        controller.on_letter_input('A');
        assert_eq!(controller.snapshot().session.as_ref().unwrap().current_input, "");
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_expires_into_timeout() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, true).unwrap();
        let started = Instant::now();

        for expected in (1..TIMER_SECONDS).rev() {
            controller.pump().await;
            assert_eq!(controller.snapshot().timer_seconds_remaining, expected);
            assert_eq!(session(&controller).phase, GamePhase::Playing);
        }

        controller.pump().await;
        assert!(started.elapsed() >= Duration::from_secs(u64::from(TIMER_SECONDS)));
        assert_eq!(session(&controller).phase, GamePhase::Timeout);
        assert!(controller.snapshot().show_result);
        assert_eq!(controller.snapshot().timer_seconds_remaining, 0);
        assert!(!controller.countdown_active());
    }

    #[tokio::test(start_paused = true)]
    async fn accepted_guess_restarts_the_countdown() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, true).unwrap();

        for _ in 0..3 {
            controller.pump().await;
        }
        assert_eq!(controller.snapshot().timer_seconds_remaining, 5);

        type_word(&mut controller, "POULETS");
        controller.on_submit();
        assert_eq!(session(&controller).attempts.len(), 1);
        assert_eq!(controller.snapshot().timer_seconds_remaining, TIMER_SECONDS);

        controller.pump().await;
        assert_eq!(
            controller.snapshot().timer_seconds_remaining,
            TIMER_SECONDS - 1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn new_game_ignores_ticks_from_the_previous_one() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, true).unwrap();

        // Let the first countdown queue a tick without applying it.
        sleep(Duration::from_millis(1500)).await;
        controller.start_game(7, Difficulty::Easy, true).unwrap();

        controller.pump().await;
        assert_eq!(controller.snapshot().timer_seconds_remaining, TIMER_SECONDS);
        controller.pump().await;
        assert_eq!(
            controller.snapshot().timer_seconds_remaining,
            TIMER_SECONDS - 1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_guess_error_clears_after_delay() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, false).unwrap();
        let started = Instant::now();

        type_word(&mut controller, "PZZZZZZ");
        controller.on_submit();
        assert_eq!(
            controller.snapshot().error.as_deref(),
            Some("Not in word list")
        );
        assert!(session(&controller).attempts.is_empty());

        controller.pump().await;
        assert!(started.elapsed() >= ERROR_DISPLAY);
        assert_eq!(controller.snapshot().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_clear_does_not_wipe_newer_error() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, false).unwrap();

        type_word(&mut controller, "PZZZZZZ");
        controller.on_submit();
        sleep(Duration::from_secs(1)).await;
        controller.on_submit();

        // First clear fires at 2s and must leave the second error alone.
        controller.pump().await;
        assert!(controller.snapshot().error.is_some());

        controller.pump().await;
        assert_eq!(controller.snapshot().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_error_is_immediate() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, false).unwrap();
        type_word(&mut controller, "PZZZZZZ");
        controller.on_submit();

        controller.clear_error();
        assert_eq!(controller.snapshot().error, None);
        // The scheduled clear arrives later and is a no-op.
        controller.pump().await;
        assert_eq!(controller.snapshot().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn six_misses_show_the_loss() {
        let mut controller = controller().await;
        controller.start_game(7, Difficulty::Easy, true).unwrap();

        for guess in &GUESSES[..MAX_ATTEMPTS] {
            type_word(&mut controller, guess);
            controller.on_submit();
        }

        assert_eq!(session(&controller).phase, GamePhase::Lost);
        assert_eq!(session(&controller).attempts.len(), MAX_ATTEMPTS);
        assert!(controller.snapshot().show_result);
        assert!(!controller.countdown_active());
    }

    #[tokio::test(start_paused = true)]
    async fn daily_and_explicit_starts() {
        let mut controller = controller().await;
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        controller
            .start_daily_game(7, Difficulty::Easy, date, false)
            .unwrap();
        assert_eq!(session(&controller).target_word, "POISSON");

        controller
            .start_game_with_word("pendant", Difficulty::Hard, false)
            .unwrap();
        assert_eq!(session(&controller).target_word, "PENDANT");
        assert!(!controller.countdown_active());
    }
}
