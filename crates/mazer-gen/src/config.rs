//! Generation parameters bundled for callers that keep them around.

use mazer_core::Grid;

use crate::maze::{DEFAULT_EXTRA_OPEN_FRACTION, GenError, generate};

/// Everything needed to reproduce a maze.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    /// Share of the area tried for loop injection, in `[0, 1]`.
    pub extra_open_fraction: f64,
    /// `None` draws from the thread-local RNG.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: 21,
            cols: 21,
            extra_open_fraction: DEFAULT_EXTRA_OPEN_FRACTION,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Default parameters at the given size.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Generate a maze from these parameters.
    pub fn generate(&self) -> Result<Grid, GenError> {
        generate(self.rows, self.cols, self.extra_open_fraction, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_config_is_reproducible() {
        let cfg = MazeConfig {
            seed: Some(42),
            ..MazeConfig::with_size(12, 16)
        };
        let a = cfg.generate().unwrap();
        assert_eq!((a.rows(), a.cols()), (13, 17));
        assert_eq!(a, cfg.generate().unwrap());
        assert_eq!(a, generate(12, 16, DEFAULT_EXTRA_OPEN_FRACTION, Some(42)).unwrap());
    }

    #[test]
    fn invalid_size_propagates() {
        let cfg = MazeConfig::with_size(0, 4);
        assert_eq!(
            cfg.generate(),
            Err(GenError::InvalidDimensions { rows: 0, cols: 4 })
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = MazeConfig {
            seed: Some(7),
            ..MazeConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: MazeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
