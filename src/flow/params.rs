//! Packing parameters for line formation.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Parameters that determine how items are packed into lines.
///
/// Used for invalidation: lines packed under different params are not
/// interchangeable, so a width change drops every cached line.
///
/// # Equality Semantics
/// Two FlowParams are equal if they would produce identical lines from
/// identical item sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowParams {
    /// Available width for each line. Zero means the cache is inactive.
    pub content_area_width: u32,
    /// Maximum items per line. `None` means no cap.
    pub items_per_line: Option<NonZeroUsize>,
}

impl FlowParams {
    /// Create new flow params. An `items_per_line` of 0 means no cap.
    pub fn new(items_per_line: usize, content_area_width: u32) -> Self {
        Self {
            content_area_width,
            items_per_line: NonZeroUsize::new(items_per_line),
        }
    }

    /// Whether lines can be packed at all.
    pub fn is_active(&self) -> bool {
        self.content_area_width > 0
    }

    /// Check whether a line of `count` items would exceed the cap.
    pub(crate) fn exceeds_cap(&self, count: usize) -> bool {
        self.items_per_line.is_some_and(|cap| count > cap.get())
    }
}
