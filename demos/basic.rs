//! Basic example of using the sliding-tile engine

use slide_core::{Board, PairSync, ShuffleConfig, TrialSelector};

fn main() {
    // Pick the hardest of 100 shuffles
    println!("Selecting a 4x4 shuffle...\n");
    let config = ShuffleConfig::default().with_dimension(4).with_moves(30);
    let mut selection = match TrialSelector::new(config).select_best() {
        Ok(selection) => selection,
        Err(e) => {
            println!("No usable shuffle: {}", e);
            return;
        }
    };

    println!("Selected trial {} (seed {}):", selection.trial, selection.seed);
    println!("{}", selection.arrangement);
    println!("Misplaced tiles: {}", selection.misplaced());
    println!(
        "Valid trials: {}, discarded: {}",
        selection.valid_trials, selection.discarded_trials
    );

    // Rebuild it one step at a time
    println!("\nRebuilding...\n");
    let board = &mut selection.arrangement;
    while let Some(step) = board.step_build() {
        let kind = if step.wraps { "wraps" } else { "slides" };
        println!("tile {:>2} {} {} -> {}", step.tile, kind, step.from, step.to);
    }
    println!("\nSolved:");
    println!("{}", board);

    // Two boards that finish three steps apart
    println!("--- Synchronized pair ---\n");
    let config = ShuffleConfig::default().with_moves(20);
    match PairSync::new(config).select(Board::One, 3) {
        Ok(pair) => {
            println!("Board 1 (lead):\n{}", pair.one.arrangement);
            println!("Board 2 (follower):\n{}", pair.two.arrangement);
            println!("In sync: {}", pair.in_sync());
        }
        Err(e) => println!("Pair selection failed: {}", e),
    }
}
