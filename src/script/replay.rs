//! Replays parsed operations against a cache.

use super::{Operation, ScriptError};
use crate::flow::FlowCache;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;
use tracing::{debug, info};

/// Result of applying one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A mutation ran; nothing to report.
    Mutated,
    /// A query answered with a JSON value (`null` for not found).
    Answer(Value),
    /// The diagnostic dump text.
    Dump(String),
}

/// One line of replay output.
#[derive(Debug, Serialize)]
struct Answer<'a> {
    op: &'a str,
    result: &'a Value,
}

impl Operation {
    /// Apply this operation to `cache`.
    pub fn apply(&self, cache: &mut FlowCache) -> Outcome {
        match self {
            Self::Add { index, sizes } => cache.add(*index, sizes.iter().copied()),
            Self::AddBlank { index, count } => cache.add_blank(*index, *count),
            Self::InvalidateSizes { index, count } => cache.invalidate_sizes(*index, *count),
            Self::Remove { index, count } => cache.remove(*index, *count),
            Self::SetItem { index, size } => cache.set_item(*index, *size),
            Self::Move { from, to, count } => cache.move_items(*from, *to, *count),
            Self::SetContentAreaWidth { width } => cache.set_content_area_width(*width),
            Self::Clear => cache.clear(),
            Self::LineCounts => return Outcome::Answer(json!(cache.line_counts())),
            Self::ItemLineIndex { item } => {
                return Outcome::Answer(json!(cache.item_line_index(*item)))
            }
            Self::ContainingLine { item } => {
                return Outcome::Answer(json!(cache.containing_line(*item)))
            }
            Self::FirstItemIndex { line } => {
                return Outcome::Answer(json!(cache.first_item_index(*line)))
            }
            Self::Line { line } => return Outcome::Answer(json!(cache.line(*line))),
            Self::HasPreviousLineCached { item } => {
                return Outcome::Answer(json!(cache.has_previous_line_cached(*item)))
            }
            Self::HasNextLineCached { item } => {
                return Outcome::Answer(json!(cache.has_next_line_cached(*item)))
            }
            Self::LineTop { line } => return Outcome::Answer(json!(cache.line_top(*line))),
            Self::LineAtOffset { offset } => {
                return Outcome::Answer(json!(cache.line_at_offset(*offset)))
            }
            Self::Dump => return Outcome::Dump(cache.dump_cache()),
            Self::Snapshot => return Outcome::Answer(json!(cache.snapshot())),
        }
        Outcome::Mutated
    }
}

/// Apply `operations` in order, writing one line per query answer to `out`.
///
/// Answers are JSON objects `{"op": ..., "result": ...}`; dumps are written
/// as plain text.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn replay<W: Write>(
    operations: &[Operation],
    cache: &mut FlowCache,
    mut out: W,
) -> Result<(), ScriptError> {
    info!(
        operations = operations.len(),
        width = cache.content_area_width(),
        items_per_line = cache.items_per_line(),
        "Replaying script"
    );

    for op in operations {
        debug!(op = op.name(), "Applying operation");
        match op.apply(cache) {
            Outcome::Mutated => {}
            Outcome::Answer(result) => {
                serde_json::to_writer(
                    &mut out,
                    &Answer {
                        op: op.name(),
                        result: &result,
                    },
                )?;
                writeln!(out)?;
            }
            Outcome::Dump(text) => write!(out, "{}", text)?,
        }
    }

    out.flush()?;
    Ok(())
}
