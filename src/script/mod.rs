//! Operation scripts - JSON Lines recordings of host calls.
//!
//! Each non-blank line is one operation object tagged by `op`, for example:
//!
//! ```text
//! {"op": "add", "index": 0, "sizes": [{"width": 40, "height": 10}]}
//! {"op": "set_content_area_width", "width": 70}
//! {"op": "line_counts"}
//! ```
//!
//! Lines starting with `#` are comments. Scripts let a host bug report be
//! replayed against the cache outside the host framework.

pub mod replay;

use crate::flow::ItemSize;
use serde::Deserialize;
use std::io::BufRead;
use thiserror::Error;

pub use replay::{replay, Outcome};

/// Errors raised while reading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A script line is not a valid operation.
    #[error("Invalid operation on script line {line}: {reason}")]
    Parse {
        /// 1-based script line number.
        line: usize,
        /// Parse error details.
        reason: String,
    },

    /// Reading the script or writing results failed.
    #[error("Script I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A query result could not be encoded as JSON.
    #[error("Failed to encode query result: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One recorded call against a [`FlowCache`](crate::flow::FlowCache).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Insert measured items.
    Add {
        /// First inserted index.
        index: usize,
        /// Sizes to insert, in order.
        sizes: Vec<ItemSize>,
    },
    /// Insert unmeasured slots.
    AddBlank {
        /// First inserted index.
        index: usize,
        /// Number of slots.
        count: usize,
    },
    /// Forget measured sizes without shifting.
    InvalidateSizes {
        /// First affected index.
        index: usize,
        /// Number of items.
        count: usize,
    },
    /// Remove items and close the gap.
    Remove {
        /// First removed index.
        index: usize,
        /// Number of items.
        count: usize,
    },
    /// Replace one item's size.
    SetItem {
        /// Item index.
        index: usize,
        /// New size.
        size: ItemSize,
    },
    /// Move a block of items.
    Move {
        /// First index of the block.
        from: usize,
        /// Index the block starts at afterwards.
        to: usize,
        /// Block length.
        count: usize,
    },
    /// Change the content area width.
    SetContentAreaWidth {
        /// New width.
        width: u32,
    },
    /// Drop all sizes and lines.
    Clear,
    /// Query item counts per line.
    LineCounts,
    /// Query the line holding an item.
    ItemLineIndex {
        /// Item index.
        item: usize,
    },
    /// Query the line record holding an item.
    ContainingLine {
        /// Item index.
        item: usize,
    },
    /// Query the first item of a line.
    FirstItemIndex {
        /// Line index.
        line: usize,
    },
    /// Query a line record.
    Line {
        /// Line index.
        line: usize,
    },
    /// Query whether the previous line is cached.
    HasPreviousLineCached {
        /// Item index.
        item: usize,
    },
    /// Query whether the next line is cached.
    HasNextLineCached {
        /// Item index.
        item: usize,
    },
    /// Query the vertical offset of a line.
    LineTop {
        /// Line index.
        line: usize,
    },
    /// Query the line at a vertical offset.
    LineAtOffset {
        /// Vertical offset.
        offset: u64,
    },
    /// Print the diagnostic dump.
    Dump,
    /// Print the cache snapshot as JSON.
    Snapshot,
}

impl Operation {
    /// Script name of this operation, as written in the `op` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::AddBlank { .. } => "add_blank",
            Self::InvalidateSizes { .. } => "invalidate_sizes",
            Self::Remove { .. } => "remove",
            Self::SetItem { .. } => "set_item",
            Self::Move { .. } => "move",
            Self::SetContentAreaWidth { .. } => "set_content_area_width",
            Self::Clear => "clear",
            Self::LineCounts => "line_counts",
            Self::ItemLineIndex { .. } => "item_line_index",
            Self::ContainingLine { .. } => "containing_line",
            Self::FirstItemIndex { .. } => "first_item_index",
            Self::Line { .. } => "line",
            Self::HasPreviousLineCached { .. } => "has_previous_line_cached",
            Self::HasNextLineCached { .. } => "has_next_line_cached",
            Self::LineTop { .. } => "line_top",
            Self::LineAtOffset { .. } => "line_at_offset",
            Self::Dump => "dump",
            Self::Snapshot => "snapshot",
        }
    }
}

/// Parse a single script line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_line(line_number: usize, text: &str) -> Result<Option<Operation>, ScriptError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| ScriptError::Parse {
            line: line_number,
            reason: e.to_string(),
        })
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns the first unreadable or invalid line.
pub fn parse_script(reader: impl BufRead) -> Result<Vec<Operation>, ScriptError> {
    let mut operations = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        if let Some(op) = parse_line(i + 1, &line?)? {
            operations.push(op);
        }
    }
    Ok(operations)
}
