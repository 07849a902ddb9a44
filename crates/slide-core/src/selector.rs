use crate::arrangement::Arrangement;
use crate::config::ShuffleConfig;
use crate::shuffle::{derive_seed, entropy_seed, Shuffler};
use crate::{PuzzleError, Result};
use std::thread;
use tracing::{debug, info, warn};

/// The winning trial of a selection batch
#[derive(Debug, Clone)]
pub struct Selection {
    /// The selected board, shuffled and ready to be rebuilt
    pub arrangement: Arrangement,
    /// Index of the selected trial within the batch
    pub trial: usize,
    /// Trials that did not re-solve themselves
    pub valid_trials: usize,
    /// Trials discarded because they re-solved themselves
    pub discarded_trials: usize,
    /// Whether the configured target misplaced count was met exactly
    pub target_met: bool,
    /// Batch seed; the same seed and configuration reproduce this selection
    pub seed: u64,
}

impl Selection {
    pub fn misplaced(&self) -> usize {
        self.arrangement.misplaced().unwrap_or(0)
    }
}

/// Runs independent shuffle trials and keeps the best one.
///
/// A trial whose misplaced count equals the configured target wins
/// immediately (first one in trial order). Otherwise the hardest valid trial
/// wins, ties going to the earliest.
#[derive(Debug, Clone)]
pub struct TrialSelector {
    config: ShuffleConfig,
    seed: Option<u64>,
}

impl TrialSelector {
    pub fn new(config: ShuffleConfig) -> Self {
        Self { config, seed: None }
    }

    /// Fix the batch seed for reproducible selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Run every trial on the current thread
    pub fn select_best(&self) -> Result<Selection> {
        self.config.validate()?;
        let seed = self.batch_seed();

        let mut reducer = Reducer::new(self.config.target_misplaced);
        for index in 0..self.config.trials {
            reducer.offer(index, run_trial(&self.config, seed, index)?);
        }
        self.finish(reducer, seed)
    }

    /// Run the trials on up to `workers` scoped threads.
    ///
    /// Every trial is seeded from the batch seed and its index, and results
    /// are folded in trial order after all workers join, so this returns the
    /// same selection as [`TrialSelector::select_best`] for the same seed.
    pub fn select_best_parallel(&self, workers: usize) -> Result<Selection> {
        self.config.validate()?;
        let seed = self.batch_seed();
        let trials = self.config.trials;
        let workers = workers.clamp(1, trials);
        let chunk = trials.div_ceil(workers);
        let config = &self.config;

        let batches: Vec<Vec<Arrangement>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..trials)
                .step_by(chunk)
                .map(|start| {
                    let end = (start + chunk).min(trials);
                    scope.spawn(move || {
                        (start..end)
                            .map(|index| run_trial(config, seed, index))
                            .collect::<Result<Vec<_>>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect::<Result<Vec<_>>>()
        })?;

        let mut reducer = Reducer::new(self.config.target_misplaced);
        for (index, arrangement) in batches.into_iter().flatten().enumerate() {
            reducer.offer(index, arrangement);
        }
        self.finish(reducer, seed)
    }

    fn batch_seed(&self) -> u64 {
        self.seed.unwrap_or_else(entropy_seed)
    }

    fn finish(&self, reducer: Reducer, seed: u64) -> Result<Selection> {
        let Reducer {
            best,
            target_met,
            valid,
            discarded,
            ..
        } = reducer;

        let Some((trial, arrangement)) = best else {
            warn!(
                board = %self.config.board_id,
                trials = self.config.trials,
                moves = self.config.moves,
                "every shuffle trial re-solved itself"
            );
            return Err(PuzzleError::NoValidTrial {
                trials: self.config.trials,
                moves: self.config.moves,
            });
        };

        info!(
            board = %self.config.board_id,
            misplaced = ?arrangement.misplaced(),
            trial,
            valid,
            discarded,
            target = ?self.config.target_misplaced,
            target_met,
            "selected shuffle variety"
        );

        Ok(Selection {
            arrangement,
            trial,
            valid_trials: valid,
            discarded_trials: discarded,
            target_met,
            seed,
        })
    }
}

/// Shuffle one fresh board with the trial's own random source
fn run_trial(config: &ShuffleConfig, batch_seed: u64, index: usize) -> Result<Arrangement> {
    let mut shuffler = Shuffler::with_seed(derive_seed(batch_seed, index as u64));
    let arrangement = shuffler.shuffled(config.dimension, config.moves)?;
    debug!(
        board = %config.board_id,
        trial = index,
        misplaced = ?arrangement.misplaced(),
        "shuffle trial finished"
    );
    Ok(arrangement)
}

/// Sequential fold over trial results, offered in trial order
struct Reducer {
    target: Option<usize>,
    best: Option<(usize, Arrangement)>,
    target_met: bool,
    valid: usize,
    discarded: usize,
}

impl Reducer {
    fn new(target: Option<usize>) -> Self {
        Self {
            target,
            best: None,
            target_met: false,
            valid: 0,
            discarded: 0,
        }
    }

    fn offer(&mut self, index: usize, arrangement: Arrangement) {
        let Some(misplaced) = arrangement.misplaced() else {
            self.discarded += 1;
            return;
        };
        self.valid += 1;
        if self.target_met {
            return;
        }

        if self.target == Some(misplaced) {
            self.best = Some((index, arrangement));
            self.target_met = true;
            return;
        }

        let better = match &self.best {
            Some((_, best)) => misplaced > best.misplaced().unwrap_or(0),
            None => true,
        };
        if better {
            self.best = Some((index, arrangement));
        }
    }
}

/// Select with an explicit trial count, move count and optional target
pub fn select_best(
    dimension: usize,
    trials: usize,
    moves: usize,
    target_misplaced: Option<usize>,
) -> Result<Selection> {
    let config = ShuffleConfig::default()
        .with_dimension(dimension)
        .with_trials(trials)
        .with_moves(moves)
        .with_target(target_misplaced);
    TrialSelector::new(config).select_best()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_trials(config: &ShuffleConfig, seed: u64) -> Vec<Option<usize>> {
        (0..config.trials)
            .map(|i| run_trial(config, seed, i).unwrap().misplaced())
            .collect()
    }

    #[test]
    fn test_selects_hardest_without_target() {
        let config = ShuffleConfig::default().with_dimension(4).with_moves(20).with_trials(40);
        let selection = TrialSelector::new(config.clone()).with_seed(5).select_best().unwrap();

        let results = all_trials(&config, 5);
        let max = results.iter().flatten().copied().max().unwrap();
        let first_max = results.iter().position(|&m| m == Some(max)).unwrap();

        assert_eq!(selection.misplaced(), max);
        assert_eq!(selection.trial, first_max);
        assert!(!selection.target_met);
        assert_eq!(selection.valid_trials + selection.discarded_trials, 40);
        assert_eq!(selection.seed, 5);
    }

    #[test]
    fn test_selects_first_target_match() {
        let base = ShuffleConfig::default().with_dimension(4).with_moves(20).with_trials(60);
        let results = all_trials(&base, 99);

        // Pick a count that some trial reaches but that is not the first trial's
        let target = results
            .iter()
            .flatten()
            .copied()
            .find(|&m| Some(m) != results[0])
            .unwrap();
        let first_match = results.iter().position(|&m| m == Some(target)).unwrap();

        let selection = TrialSelector::new(base.with_target(Some(target)))
            .with_seed(99)
            .select_best()
            .unwrap();
        assert!(selection.target_met);
        assert_eq!(selection.misplaced(), target);
        assert_eq!(selection.trial, first_match);
    }

    #[test]
    fn test_unmet_target_falls_back_to_hardest() {
        let config = ShuffleConfig::default()
            .with_dimension(3)
            .with_moves(15)
            .with_trials(30)
            .with_target(Some(1000));
        let selection = TrialSelector::new(config.clone()).with_seed(8).select_best().unwrap();
        let max = all_trials(&config, 8).into_iter().flatten().max().unwrap();
        assert!(!selection.target_met);
        assert_eq!(selection.misplaced(), max);
    }

    #[test]
    fn test_all_discarded_is_an_error() {
        let config = ShuffleConfig::default().with_moves(0).with_trials(5);
        let err = TrialSelector::new(config).with_seed(1).select_best().unwrap_err();
        assert_eq!(err, PuzzleError::NoValidTrial { trials: 5, moves: 0 });
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ShuffleConfig::default().with_trials(0);
        assert!(matches!(
            TrialSelector::new(config).select_best(),
            Err(PuzzleError::InvalidConfig(_))
        ));
        let config = ShuffleConfig::default().with_dimension(1);
        assert_eq!(
            TrialSelector::new(config).select_best_parallel(4).unwrap_err(),
            PuzzleError::DimensionTooSmall(1)
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = ShuffleConfig::default().with_dimension(4).with_moves(25).with_trials(37);
        let selector = TrialSelector::new(config).with_seed(31337);
        let sequential = selector.select_best().unwrap();
        for workers in [1, 2, 3, 8, 64] {
            let parallel = selector.select_best_parallel(workers).unwrap();
            assert_eq!(parallel.trial, sequential.trial);
            assert_eq!(parallel.arrangement.cells(), sequential.arrangement.cells());
            assert_eq!(parallel.arrangement.history(), sequential.arrangement.history());
            assert_eq!(parallel.valid_trials, sequential.valid_trials);
        }
    }

    #[test]
    fn test_free_function() {
        let selection = select_best(3, 10, 20, None).unwrap();
        assert!(selection.misplaced() > 0);
        assert_eq!(selection.arrangement.dimension(), 3);
    }
}
