//! Global alignment engine
//!
//! Bottom-up fill of a dense (m+1) x (n+1) cost table followed by a
//! deterministic top-down traceback. The table is a flattened `Vec<u64>`
//! indexed by `i * (n + 1) + j`; all arithmetic is exact integer, so
//! the optimal cost is bit-reproducible.

use thiserror::Error;

use crate::cost::CostModel;
use crate::types::{base_index, GAP};

/// Errors raised by the alignment engine before the table is built
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("invalid byte {byte:#04x} at index {index} of sequence {which}; expected one of A, C, G, T")]
    InvalidBase { byte: u8, index: usize, which: usize },

    #[error("DP table of {cells} cells exceeds the configured maximum of {max}")]
    TableTooLarge { cells: u64, max: u64 },
}

/// Default ceiling on expanded sequence length, in symbols.
pub const DEFAULT_MAX_SEQ_LEN: usize = 1 << 26;

/// Default ceiling on DP table cells; 2^28 u64 cells is about 2 GiB.
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 1 << 28;

/// Resource ceilings, enforced before any allocation.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Maximum expanded sequence length, in symbols.
    pub max_seq_len: usize,
    /// Maximum number of DP table cells, (m + 1) * (n + 1).
    pub max_table_cells: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }
}

/// One optimal global alignment and its cost.
///
/// The rows have equal length; stripping gap markers from `row1`
/// reproduces the first input sequence exactly, likewise `row2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub cost: u64,
    pub row1: Vec<u8>,
    pub row2: Vec<u8>,
}

/// Compute the minimum alignment cost of `seq1` against `seq2` and
/// reconstruct one optimal alignment achieving it.
///
/// Ties during traceback are broken in the fixed order diagonal, up,
/// left, so the emitted alignment is deterministic across runs when
/// multiple optimal paths exist.
pub fn align(
    seq1: &[u8],
    seq2: &[u8],
    model: &CostModel,
    limits: &Limits,
) -> Result<Alignment, AlignError> {
    let x = indices_of(seq1, 1)?;
    let y = indices_of(seq2, 2)?;
    let (m, n) = (x.len(), y.len());

    let cells = (m as u64 + 1).saturating_mul(n as u64 + 1);
    if cells > limits.max_table_cells {
        return Err(AlignError::TableTooLarge {
            cells,
            max: limits.max_table_cells,
        });
    }

    let gap = model.gap as u64;
    let width = n + 1;
    let mut dp = vec![0u64; (m + 1) * width];
    for i in 1..=m {
        dp[i * width] = gap * i as u64;
    }
    for j in 1..=n {
        dp[j] = gap * j as u64;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = cell_cost(&dp, &x, &y, model, gap, width, i, j);
            dp[i * width + j] = cost;
        }
    }

    // Traceback, collected back-to-front and reversed once at the end.
    let mut row1 = Vec::with_capacity(m + n);
    let mut row2 = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        let here = dp[i * width + j];
        let diagonal = if x[i - 1] == y[j - 1] {
            dp[(i - 1) * width + (j - 1)]
        } else {
            dp[(i - 1) * width + (j - 1)] + model.sub[x[i - 1]][y[j - 1]] as u64
        };
        if here == diagonal {
            row1.push(seq1[i - 1]);
            row2.push(seq2[j - 1]);
            i -= 1;
            j -= 1;
        } else if here == dp[(i - 1) * width + j] + gap {
            row1.push(seq1[i - 1]);
            row2.push(GAP);
            i -= 1;
        } else {
            row1.push(GAP);
            row2.push(seq2[j - 1]);
            j -= 1;
        }
    }
    while i > 0 {
        row1.push(seq1[i - 1]);
        row2.push(GAP);
        i -= 1;
    }
    while j > 0 {
        row1.push(GAP);
        row2.push(seq2[j - 1]);
        j -= 1;
    }
    row1.reverse();
    row2.reverse();

    Ok(Alignment {
        cost: dp[m * width + n],
        row1,
        row2,
    })
}

#[inline]
fn cell_cost(
    dp: &[u64],
    x: &[usize],
    y: &[usize],
    model: &CostModel,
    gap: u64,
    width: usize,
    i: usize,
    j: usize,
) -> u64 {
    if x[i - 1] == y[j - 1] {
        // Identical symbols cost nothing; the diagonal of the table is zero.
        dp[(i - 1) * width + (j - 1)]
    } else {
        let subst = dp[(i - 1) * width + (j - 1)] + model.sub[x[i - 1]][y[j - 1]] as u64;
        let up = dp[(i - 1) * width + j] + gap;
        let left = dp[i * width + (j - 1)] + gap;
        subst.min(up).min(left)
    }
}

fn indices_of(seq: &[u8], which: usize) -> Result<Vec<usize>, AlignError> {
    seq.iter()
        .enumerate()
        .map(|(index, &byte)| {
            base_index(byte).ok_or(AlignError::InvalidBase { byte, index, which })
        })
        .collect()
}
