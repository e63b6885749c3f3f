//! Sequence expander
//!
//! Reconstructs the two full input sequences from their compact
//! descriptions: a short base string plus an ordered list of
//! self-insertion positions. Each in-range step splices a copy of the
//! current string into itself, doubling its length; an out-of-range
//! position falls back to appending the base string instead.

use std::io::BufRead;

use thiserror::Error;

/// Errors raised while parsing the input artifact or expanding a
/// description
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("input is missing the first base string")]
    MissingBaseString,

    #[error("second description has no base string")]
    TruncatedDescription,

    #[error("unexpected extra line after the second description: {0:?}")]
    TrailingContent(String),

    #[error("insertion position {0:?} is out of range for this platform")]
    BadPosition(String),

    #[error("expansion needs {needed} symbols, exceeding the configured maximum of {max}")]
    SequenceTooLong { needed: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One compact sequence description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub base: Vec<u8>,
    pub positions: Vec<usize>,
}

impl Description {
    pub fn expand(&self, max_len: usize) -> Result<Vec<u8>, ExpandError> {
        expand(&self.base, &self.positions, max_len)
    }
}

/// Parse the two-description input artifact.
///
/// A non-empty line of ASCII digits is an insertion position for the
/// most recent base string; any other non-blank line starts a new
/// description. The boundary between the two descriptions is found
/// purely by this scan, never by a fixed line offset. Blank lines are
/// skipped.
pub fn parse_input<R: BufRead>(reader: R) -> Result<(Description, Description), ExpandError> {
    let mut descriptions: Vec<Description> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.bytes().all(|b| b.is_ascii_digit()) {
            let position: usize = line
                .parse()
                .map_err(|_| ExpandError::BadPosition(line.to_string()))?;
            match descriptions.last_mut() {
                Some(desc) => desc.positions.push(position),
                None => return Err(ExpandError::MissingBaseString),
            }
        } else {
            if descriptions.len() == 2 {
                return Err(ExpandError::TrailingContent(line.to_string()));
            }
            descriptions.push(Description {
                base: line.as_bytes().to_vec(),
                positions: Vec::new(),
            });
        }
    }

    let second = descriptions.pop().ok_or(ExpandError::MissingBaseString)?;
    let first = descriptions.pop().ok_or(ExpandError::TruncatedDescription)?;
    Ok((first, second))
}

/// Expand `base` by applying each insertion step in order.
///
/// A position `p` with `p < len` splices a copy of the current string
/// immediately after index `p`; otherwise the base string is appended.
/// The post-step length is checked against `max_len` before the step
/// allocates anything.
pub fn expand(base: &[u8], positions: &[usize], max_len: usize) -> Result<Vec<u8>, ExpandError> {
    if base.len() > max_len {
        return Err(ExpandError::SequenceTooLong {
            needed: base.len(),
            max: max_len,
        });
    }

    let mut current = base.to_vec();
    for &p in positions {
        let in_range = p < current.len();
        let grown = if in_range {
            current.len() * 2
        } else {
            current.len() + base.len()
        };
        if grown > max_len {
            return Err(ExpandError::SequenceTooLong {
                needed: grown,
                max: max_len,
            });
        }

        if in_range {
            let mut next = Vec::with_capacity(grown);
            next.extend_from_slice(&current[..=p]);
            next.extend_from_slice(&current);
            next.extend_from_slice(&current[p + 1..]);
            current = next;
        } else {
            current.extend_from_slice(base);
        }
    }
    Ok(current)
}
