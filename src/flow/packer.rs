//! Greedy line packing.
//!
//! Items are fed left to right. Each item joins the current line when the
//! running width stays within the content area (`<=`) and the item count
//! stays within the cap; otherwise the current line is closed and the item
//! starts a new one. An item arriving on an empty line always joins it, so a
//! single over-wide item forms its own line.

use super::params::FlowParams;
use super::types::{ItemSize, Line};

/// Incremental packing state for one rebuild pass.
#[derive(Debug, Clone)]
pub struct LinePacker {
    params: FlowParams,
    line_width: u64,
    current: Line,
}

impl LinePacker {
    /// Create a packer with an empty current line.
    pub fn new(params: FlowParams) -> Self {
        Self {
            params,
            line_width: 0,
            current: Line::default(),
        }
    }

    /// Feed the item at absolute `index`.
    ///
    /// Returns the line closed by this item, if the item did not fit.
    pub fn push(&mut self, index: usize, size: ItemSize) -> Option<Line> {
        let width = u64::from(size.width);
        let fits = self.line_width + width <= u64::from(self.params.content_area_width)
            && !self.params.exceeds_cap(self.current.item_count + 1);

        if fits || self.current.is_empty() {
            self.line_width += width;
            self.current.push(index, size);
            return None;
        }

        let closed = std::mem::take(&mut self.current);
        self.current.push(index, size);
        self.line_width = width;
        Some(closed)
    }

    /// Finish the pass, returning the in-progress line if it holds any item.
    pub fn finish(self) -> Option<Line> {
        (!self.current.is_empty()).then_some(self.current)
    }
}

/// Pack a complete run of sizes from scratch, starting at item `first_index`.
pub fn pack<I>(params: FlowParams, first_index: usize, sizes: I) -> Vec<Line>
where
    I: IntoIterator<Item = ItemSize>,
{
    let mut packer = LinePacker::new(params);
    let mut lines = Vec::new();
    for (offset, size) in sizes.into_iter().enumerate() {
        if let Some(line) = packer.push(first_index + offset, size) {
            lines.push(line);
        }
    }
    lines.extend(packer.finish());
    lines
}
