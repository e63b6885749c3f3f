//! Cost model: a linear gap penalty plus a 4x4 substitution cost table.
//!
//! The model is pure data. The reference deployment values are the
//! `Default`, and alternative models can be loaded from JSON so the
//! table is configuration rather than a constant baked into the engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ALPHABET, ALPHABET_LEN};

/// Errors raised while loading or validating a cost model
#[derive(Debug, Error)]
pub enum CostModelError {
    #[error("substitution cost of {0} against itself must be zero")]
    NonZeroDiagonal(char),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gap penalty and substitution costs, indexed by base index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    /// Cost of aligning one symbol against a gap.
    pub gap: u32,
    /// `sub[i][j]` is the cost of aligning base `i` against base `j`.
    pub sub: [[u32; ALPHABET_LEN]; ALPHABET_LEN],
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            gap: 30,
            sub: [
                [0, 110, 48, 94],
                [110, 0, 118, 48],
                [48, 118, 0, 110],
                [94, 48, 110, 0],
            ],
        }
    }
}

impl CostModel {
    /// Check the zero-diagonal invariant. Asymmetric tables are legal
    /// but worth flagging, since alignment costs then stop commuting.
    pub fn validate(&self) -> Result<(), CostModelError> {
        for (i, row) in self.sub.iter().enumerate() {
            if row[i] != 0 {
                return Err(CostModelError::NonZeroDiagonal(ALPHABET[i] as char));
            }
        }
        if !self.is_symmetric() {
            log::warn!("substitution cost table is asymmetric; align(x, y) and align(y, x) may differ in cost");
        }
        Ok(())
    }

    pub fn is_symmetric(&self) -> bool {
        (0..ALPHABET_LEN).all(|i| (0..ALPHABET_LEN).all(|j| self.sub[i][j] == self.sub[j][i]))
    }

    /// Load and validate a model from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CostModelError> {
        let data = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&data)?;
        model.validate()?;
        Ok(model)
    }
}
