//! Terminal front end for the toroidal sliding-tile engine.
//!
//! `slide shuffle` and `slide pair` print selections; `slide play` shows two
//! synchronized boards rebuilding themselves one step per tick.

mod app;
mod render;
mod report;
mod theme;

use anyhow::{bail, Result};
use app::{App, AppAction};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::Rng;
use slide_core::{Board, PairSync, Preset, ShuffleConfig, TrialSelector};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slide")]
#[command(about = "Toroidal sliding-tile puzzle shuffles and step-by-step rebuilds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the best of many shuffles and print it.
    Shuffle {
        #[command(flatten)]
        board: BoardArgs,
        /// Misplaced count to look for before falling back to the hardest shuffle
        #[arg(long)]
        target: Option<usize>,
        /// Print the selection as JSON
        #[arg(long)]
        json: bool,
        /// Print every rebuild step after the selection
        #[arg(long)]
        replay: bool,
    },

    /// Select two shuffles that finish their rebuild `delta` steps apart.
    Pair {
        #[command(flatten)]
        board: BoardArgs,
        #[command(flatten)]
        sync: SyncArgs,
        /// Print the pair as JSON
        #[arg(long)]
        json: bool,
    },

    /// Watch two synchronized boards rebuild themselves.
    Play {
        #[command(flatten)]
        board: BoardArgs,
        #[command(flatten)]
        sync: SyncArgs,
        /// Milliseconds between rebuild steps
        #[arg(long, default_value = "250")]
        tick_ms: u64,
    },
}

#[derive(Args, Clone)]
struct BoardArgs {
    /// Shuffle strength
    #[arg(short, long, value_enum, default_value_t = PresetArg::Medium)]
    preset: PresetArg,
    /// Board dimension N (overrides the preset)
    #[arg(short = 'n', long)]
    dimension: Option<usize>,
    /// Moves per shuffle trial (overrides the preset)
    #[arg(short, long)]
    moves: Option<usize>,
    /// Number of shuffle trials (overrides the preset)
    #[arg(short, long)]
    trials: Option<usize>,
    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads for running trials
    #[arg(short, long, default_value = "1")]
    workers: usize,
}

impl BoardArgs {
    fn config(&self) -> ShuffleConfig {
        let mut config = Preset::from(self.preset).config();
        if let Some(dimension) = self.dimension {
            config = config.with_dimension(dimension);
        }
        if let Some(moves) = self.moves {
            config = config.with_moves(moves);
        }
        if let Some(trials) = self.trials {
            config = config.with_trials(trials);
        }
        config
    }
}

#[derive(Args, Clone)]
struct SyncArgs {
    /// Steps by which the follower finishes early (random 1-4 if omitted)
    #[arg(short, long)]
    delta: Option<usize>,
    /// Board that takes the hardest shuffle (random if omitted)
    #[arg(short, long, value_enum)]
    lead: Option<LeadArg>,
}

impl SyncArgs {
    /// Fill in a random lead and a delta in 1..=4 when they are omitted
    fn resolve(&self, moves: usize) -> Result<(Board, usize)> {
        let mut rng = rand::thread_rng();
        let lead = match self.lead {
            Some(lead) => lead.into(),
            None if rng.gen_bool(0.5) => Board::One,
            None => Board::Two,
        };
        let delta = match self.delta {
            Some(delta) => delta,
            None if moves > 1 => rng.gen_range(1..=4).min(moves - 1),
            None => bail!("a synchronized pair needs at least two moves per shuffle"),
        };
        Ok((lead, delta))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Easy,
    Medium,
    Hard,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Easy => Preset::Easy,
            PresetArg::Medium => Preset::Medium,
            PresetArg::Hard => Preset::Hard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LeadArg {
    One,
    Two,
}

impl From<LeadArg> for Board {
    fn from(l: LeadArg) -> Self {
        match l {
            LeadArg::One => Board::One,
            LeadArg::Two => Board::Two,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Shuffle {
            board,
            target,
            json,
            replay,
        } => {
            let config = board.config().with_target(target);
            debug!(?config, workers = board.workers, "selecting shuffle");
            let mut selector = TrialSelector::new(config.clone());
            if let Some(seed) = board.seed {
                selector = selector.with_seed(seed);
            }
            let mut selection = if board.workers > 1 {
                selector.select_best_parallel(board.workers)?
            } else {
                selector.select_best()?
            };

            report::print_selection(&config, &selection, json)?;
            if replay {
                report::print_replay(&mut selection.arrangement);
            }
        }

        Commands::Pair { board, sync, json } => {
            let config = board.config();
            let (lead, delta) = sync.resolve(config.moves)?;
            debug!(?config, %lead, delta, "selecting synchronized pair");
            let mut pair_sync = PairSync::new(config).with_workers(board.workers);
            if let Some(seed) = board.seed {
                pair_sync = pair_sync.with_seed(seed);
            }
            let pair = pair_sync.select(lead, delta)?;
            report::print_pair(&pair, json)?;
        }

        Commands::Play {
            board,
            sync,
            tick_ms,
        } => {
            let config = board.config();
            let (lead, delta) = sync.resolve(config.moves)?;
            let app = App::new(
                config,
                board.seed,
                board.workers,
                lead,
                delta,
                Duration::from_millis(tick_ms),
            )?;
            play(app)?;
        }
    }

    Ok(())
}

fn play(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    result
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = app.tick_rate().saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate() {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
