//! nwalign Core Library
//!
//! Sequence expansion, cost model, and the minimum-cost global
//! alignment engine.

pub mod align;
pub mod cost;
pub mod expand;
pub mod types;

// Re-export commonly used types and functions
pub use align::{
    align, AlignError, Alignment, Limits, DEFAULT_MAX_SEQ_LEN, DEFAULT_MAX_TABLE_CELLS,
};
pub use cost::{CostModel, CostModelError};
pub use expand::{expand, parse_input, Description, ExpandError};
pub use types::{base_index, GAP};

/// Version information for the nwalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
