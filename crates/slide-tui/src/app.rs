use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use slide_core::{Board, Move, PairSync, ShuffleConfig, SyncedPair, Transition};
use std::time::Duration;
use tracing::warn;

const MIN_TICK: Duration = Duration::from_millis(20);
const MAX_TICK: Duration = Duration::from_millis(2000);

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// The interactive two-board screen
pub struct App {
    pub pair: SyncedPair,
    config: ShuffleConfig,
    seed: Option<u64>,
    workers: usize,
    /// Whether the automatic rebuild is paused
    pub paused: bool,
    tick_rate: Duration,
    /// Rebuild ticks since the last shuffle
    pub ticks: usize,
    /// Most recent transition per board, for highlighting
    pub last_one: Option<Transition>,
    pub last_two: Option<Transition>,
    /// Set once board one has been moved by hand
    pub manual: bool,
    pub message: Option<String>,
    pub theme: Theme,
}

impl App {
    pub fn new(
        config: ShuffleConfig,
        seed: Option<u64>,
        workers: usize,
        lead: Board,
        delta: usize,
        tick_rate: Duration,
    ) -> anyhow::Result<Self> {
        let pair = select_pair(&config, seed, workers, lead, delta)?;
        Ok(Self {
            pair,
            config,
            seed,
            workers,
            paused: false,
            tick_rate: tick_rate.clamp(MIN_TICK, MAX_TICK),
            ticks: 0,
            last_one: None,
            last_two: None,
            manual: false,
            message: None,
            theme: Theme::default(),
        })
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    /// Advance the rebuild unless paused
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.step();
    }

    fn step(&mut self) {
        if self.pair.is_built() {
            return;
        }
        let (one, two) = self.pair.step_both();
        self.last_one = one;
        self.last_two = two;
        self.ticks += 1;
        if self.pair.is_built() {
            self.message = Some(if self.manual {
                "Rebuild finished (board 1 was moved by hand)".to_string()
            } else {
                "Both boards rebuilt".to_string()
            });
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
            }
            KeyCode::Char('n') | KeyCode::Char('.') => {
                if self.paused {
                    self.step();
                }
            }
            KeyCode::Char('r') => self.reshuffle(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.tick_rate = (self.tick_rate / 2).max(MIN_TICK);
            }
            KeyCode::Char('-') => {
                self.tick_rate = (self.tick_rate * 2).min(MAX_TICK);
            }
            KeyCode::Up => self.manual_move(Move::Up),
            KeyCode::Down => self.manual_move(Move::Down),
            KeyCode::Left => self.manual_move(Move::Left),
            KeyCode::Right => self.manual_move(Move::Right),
            _ => {}
        }
        AppAction::Continue
    }

    /// Move board one's empty tile by hand. The recorded rebuild continues
    /// from wherever the board ends up, so it no longer lands on solved.
    fn manual_move(&mut self, mv: Move) {
        self.paused = true;
        self.manual = true;
        self.last_one = Some(self.pair.one.arrangement.apply_move(mv));
        self.message = Some(format!("Moved board 1 {} by hand", mv));
    }

    /// Draw a fresh pair with a random lead and delta
    fn reshuffle(&mut self) {
        let mut rng = rand::thread_rng();
        let lead = if rng.gen_bool(0.5) { Board::One } else { Board::Two };
        let delta = rng.gen_range(1..=4).min(self.config.moves.saturating_sub(1));
        // A fixed seed would redraw the same pair every time
        let seed = self.seed.map(|s| s.wrapping_add(self.ticks as u64 + 1));

        match select_pair(&self.config, seed, self.workers, lead, delta) {
            Ok(pair) => {
                self.pair = pair;
                self.seed = seed;
                self.ticks = 0;
                self.last_one = None;
                self.last_two = None;
                self.manual = false;
                self.message = Some("Reshuffled".to_string());
            }
            Err(e) => {
                warn!(error = %e, "reshuffle failed");
                self.message = Some(format!("Reshuffle failed: {}", e));
            }
        }
    }
}

fn select_pair(
    config: &ShuffleConfig,
    seed: Option<u64>,
    workers: usize,
    lead: Board,
    delta: usize,
) -> slide_core::Result<SyncedPair> {
    let mut sync = PairSync::new(config.clone()).with_workers(workers);
    if let Some(seed) = seed {
        sync = sync.with_seed(seed);
    }
    sync.select(lead, delta)
}
