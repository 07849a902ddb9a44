use crate::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named shuffle strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Easy,
    Medium,
    Hard,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[Preset::Easy, Preset::Medium, Preset::Hard]
    }

    pub fn config(self) -> ShuffleConfig {
        match self {
            Preset::Easy => ShuffleConfig::easy(),
            Preset::Medium => ShuffleConfig::medium(),
            Preset::Hard => ShuffleConfig::hard(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Easy => write!(f, "Easy"),
            Preset::Medium => write!(f, "Medium"),
            Preset::Hard => write!(f, "Hard"),
        }
    }
}

/// Configuration for shuffle selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleConfig {
    /// Board dimension N
    pub dimension: usize,
    /// Moves per shuffle trial
    pub moves: usize,
    /// Independent trials to run
    pub trials: usize,
    /// Misplaced count to look for; the hardest trial wins when unset or unmet
    pub target_misplaced: Option<usize>,
    /// Label used in log output
    pub board_id: String,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self::medium()
    }
}

impl ShuffleConfig {
    pub fn easy() -> Self {
        Self {
            dimension: 3,
            moves: 12,
            trials: 50,
            target_misplaced: None,
            board_id: "board".to_string(),
        }
    }

    pub fn medium() -> Self {
        Self {
            dimension: 3,
            moves: 20,
            trials: 100,
            target_misplaced: None,
            board_id: "board".to_string(),
        }
    }

    pub fn hard() -> Self {
        Self {
            dimension: 4,
            moves: 40,
            trials: 200,
            target_misplaced: None,
            board_id: "board".to_string(),
        }
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_moves(mut self, moves: usize) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_target(mut self, target: Option<usize>) -> Self {
        self.target_misplaced = target;
        self
    }

    pub fn with_board_id(mut self, board_id: impl Into<String>) -> Self {
        self.board_id = board_id.into();
        self
    }

    /// Check the configuration can produce a selection
    pub fn validate(&self) -> Result<()> {
        if self.dimension < 2 {
            return Err(PuzzleError::DimensionTooSmall(self.dimension));
        }
        if self.trials == 0 {
            return Err(PuzzleError::InvalidConfig(
                "trial count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in Preset::all() {
            let config = preset.config();
            assert!(config.validate().is_ok(), "{} preset invalid", preset);
            assert!(config.moves > 0);
        }
        assert_eq!(ShuffleConfig::default(), ShuffleConfig::medium());
    }

    #[test]
    fn test_presets_increase_in_strength() {
        let easy = ShuffleConfig::easy();
        let hard = ShuffleConfig::hard();
        assert!(easy.moves < ShuffleConfig::medium().moves);
        assert!(ShuffleConfig::medium().moves < hard.moves);
        assert!(easy.dimension <= hard.dimension);
    }

    #[test]
    fn test_builders() {
        let config = ShuffleConfig::easy()
            .with_dimension(5)
            .with_moves(33)
            .with_trials(7)
            .with_target(Some(12))
            .with_board_id("left");
        assert_eq!(config.dimension, 5);
        assert_eq!(config.moves, 33);
        assert_eq!(config.trials, 7);
        assert_eq!(config.target_misplaced, Some(12));
        assert_eq!(config.board_id, "left");
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            ShuffleConfig::default().with_dimension(1).validate(),
            Err(PuzzleError::DimensionTooSmall(1))
        );
        assert!(matches!(
            ShuffleConfig::default().with_trials(0).validate(),
            Err(PuzzleError::InvalidConfig(_))
        ));
        assert!(ShuffleConfig::default().with_moves(0).validate().is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = ShuffleConfig::hard().with_target(Some(9));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"target_misplaced\":9"));
        let back: ShuffleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
