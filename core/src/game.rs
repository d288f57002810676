use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Playing (first click)
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Idle (start, restart, difficulty change)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Board armed, mines not placed yet
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// One play session: owns the board, the clock and the record store.
///
/// Player actions never fail. Input that does not apply to the current state is ignored without
/// emitting any event.
#[derive(Debug)]
pub struct Game<C: Clock, S: RecordStore> {
    board: Board,
    clock: C,
    store: S,
    status: GameStatus,
    difficulty: Difficulty,
    records: BestTimes,
    rng: SmallRng,
    observers: Observers,
}

impl<C: Clock, S: RecordStore> Game<C, S> {
    pub fn new(difficulty: Difficulty, clock: C, store: S) -> Self {
        Self::with_rng(difficulty, clock, store, SmallRng::from_os_rng())
    }

    /// Same as [`Game::new`] but with reproducible mine placement.
    pub fn with_seed(difficulty: Difficulty, clock: C, store: S, seed: u64) -> Self {
        Self::with_rng(difficulty, clock, store, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: Difficulty, clock: C, store: S, rng: SmallRng) -> Self {
        let records = load_or_default(&store);
        Self {
            board: Board::for_difficulty(difficulty),
            clock,
            store,
            status: GameStatus::Idle,
            difficulty,
            records,
            rng,
            observers: Observers::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.subscribe(observer);
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn records(&self) -> &BestTimes {
        &self.records
    }

    /// Best time for the active difficulty.
    pub fn current_record(&self) -> u32 {
        self.records[self.difficulty]
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs()
    }

    pub fn remaining_flags(&self) -> isize {
        self.board.remaining_flags()
    }

    /// Begins a fresh round on the current board dimensions. Mines are not placed and the clock
    /// is not started until the first click.
    pub fn start(&mut self) {
        self.board.reset();
        self.clock.reset();
        self.observers.emit(GameEvent::TimerTick(0));
        self.set_status(GameStatus::Idle);
        self.observers.emit(GameEvent::BoardUpdated);
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        log::debug!("difficulty {:?} -> {:?}", self.difficulty, difficulty);
        self.difficulty = difficulty;
        self.board = Board::for_difficulty(difficulty);
        self.start();
    }

    /// Places the mines around `coords`, starts the clock and opens the clicked cell.
    pub fn first_click(&mut self, coords: Coord2) {
        if !self.status.is_idle() {
            log::debug!("first click at {:?} ignored in {:?}", coords, self.status);
            return;
        }
        if let Err(err) = self.board.place_mines(coords, &mut self.rng) {
            log::debug!("first click at {:?} ignored: {}", coords, err);
            return;
        }

        self.clock.start();
        self.set_status(GameStatus::Playing);
        self.click_cell(coords);
    }

    pub fn click_cell(&mut self, coords: Coord2) {
        if !self.status.is_playing() {
            return;
        }
        let Some(&cell) = self.board.get_cell(coords) else {
            return;
        };
        if !cell.is_hidden() {
            return;
        }

        if cell.is_mine() {
            log::debug!("mine hit at {:?}", coords);
            self.lose();
            return;
        }

        let revealed = self.board.reveal_region(coords);
        log::debug!("click at {:?} revealed {} cells", coords, revealed.len());
        self.observers.emit(GameEvent::BoardUpdated);

        if self.board.check_victory() {
            self.win();
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) {
        if !self.status.is_playing() {
            return;
        }
        if !self.board.toggle_flag(coords) {
            return;
        }
        self.observers.emit(GameEvent::BoardUpdated);

        if self.board.check_victory() {
            self.win();
        }
    }

    /// Forwards the host's periodic signal to the clock.
    pub fn tick(&mut self) {
        if let Some(secs) = self.clock.poll() {
            self.observers.emit(GameEvent::TimerTick(secs));
        }
    }

    fn lose(&mut self) {
        self.clock.stop();
        self.board.reveal_all_mines();
        self.set_status(GameStatus::Lost);
        self.observers.emit(GameEvent::BoardUpdated);
    }

    fn win(&mut self) {
        self.clock.stop();

        let secs = self.clock.elapsed_secs();
        if self.records.offer(self.difficulty, secs) {
            log::info!("new best time for {}: {}s", self.difficulty.name(), secs);
            save_or_log(&mut self.store, &self.records);
        }

        self.set_status(GameStatus::Won);
    }

    fn set_status(&mut self, status: GameStatus) {
        log::debug!("status {:?} -> {:?}", self.status, status);
        self.status = status;
        self.observers.emit(GameEvent::StatusChanged(status));
    }
}
