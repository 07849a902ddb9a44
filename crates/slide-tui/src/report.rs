//! Plain-text and JSON printouts for the non-interactive subcommands.

use anyhow::Result;
use serde::Serialize;
use slide_core::{Arrangement, Board, Selection, ShuffleConfig, Snapshot, SyncedPair};

#[derive(Serialize)]
struct SelectionReport<'a> {
    board_id: &'a str,
    seed: u64,
    trial: usize,
    valid_trials: usize,
    discarded_trials: usize,
    target: Option<usize>,
    target_met: bool,
    board: Snapshot,
}

impl<'a> SelectionReport<'a> {
    fn new(board_id: &'a str, target: Option<usize>, selection: &Selection) -> Self {
        Self {
            board_id,
            seed: selection.seed,
            trial: selection.trial,
            valid_trials: selection.valid_trials,
            discarded_trials: selection.discarded_trials,
            target,
            target_met: selection.target_met,
            board: selection.arrangement.snapshot(),
        }
    }
}

#[derive(Serialize)]
struct PairReport<'a> {
    lead: Board,
    delta: usize,
    in_sync: bool,
    one: SelectionReport<'a>,
    two: SelectionReport<'a>,
}

pub fn print_selection(config: &ShuffleConfig, selection: &Selection, json: bool) -> Result<()> {
    if json {
        let report = SelectionReport::new(&config.board_id, config.target_misplaced, selection);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {}x{}, {} moves, {} trials",
        config.board_id, config.dimension, config.dimension, config.moves, config.trials
    );
    print_summary(selection);
    if let Some(target) = config.target_misplaced {
        let verdict = if selection.target_met { "met" } else { "not met" };
        println!("Target {} misplaced: {}", target, verdict);
    }
    Ok(())
}

fn print_summary(selection: &Selection) {
    let board = &selection.arrangement;
    println!("{}", board);
    println!(
        "Trial {} of seed {} | misplaced {} | empty tile {} at {} | {} steps to rebuild",
        selection.trial,
        selection.seed,
        selection.misplaced(),
        board.empty_tile(),
        board.empty_coord(),
        board.remaining_steps()
    );
    println!(
        "Valid trials: {}, discarded: {}",
        selection.valid_trials, selection.discarded_trials
    );
}

/// Undo the recorded shuffle one step at a time, printing each transition
pub fn print_replay(board: &mut Arrangement) {
    println!();
    let mut step = 0;
    while let Some(t) = board.step_build() {
        step += 1;
        let kind = if t.wraps { "wraps" } else { "slides" };
        println!(
            "{:>3}. empty {:<5} tile {:>2} {} {} -> {}   misplaced {}",
            step,
            t.mv,
            t.tile,
            kind,
            t.from,
            t.to,
            board.misplaced().unwrap_or(0)
        );
    }
    println!();
    println!("{}", board);
    if board.is_solved() {
        println!("Solved after {} steps", step);
    }
}

pub fn print_pair(pair: &SyncedPair, json: bool) -> Result<()> {
    if json {
        let report = PairReport {
            lead: pair.lead,
            delta: pair.delta,
            in_sync: pair.in_sync(),
            one: SelectionReport::new("board 1", None, &pair.one),
            two: SelectionReport::new("board 2", None, &pair.two),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for board in [Board::One, Board::Two] {
        let role = if board == pair.lead { "lead" } else { "follower" };
        println!("== Board {} ({}) ==", board.number(), role);
        print_summary(pair.board(board));
        println!();
    }

    let lead_steps = pair.board(pair.lead).arrangement.remaining_steps();
    let follower_steps = pair.board(pair.follower()).arrangement.remaining_steps();
    println!(
        "Delta {}: follower rebuilds in {} steps, lead in {}",
        pair.delta, follower_steps, lead_steps
    );
    if !pair.in_sync() {
        println!("Follower could not match the lead's misplaced count; using its hardest shuffle");
    }
    Ok(())
}
