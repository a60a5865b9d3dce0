//! Core flow-layout value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Measured size of one item. Supplied by the host once the item is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ItemSize {
    /// Width in layout units.
    pub width: u32,
    /// Height in layout units.
    pub height: u32,
}

impl ItemSize {
    /// Create a new item size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for ItemSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for ItemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A run of consecutive items packed onto one row.
///
/// A line is fully determined by the item sizes it covers and the packing
/// parameters. `max_height_index` is an absolute item index; when several
/// items share the maximum height it names the last of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Line {
    /// Number of consecutive items on this line.
    pub item_count: usize,
    /// Sum of the widths of the items on this line.
    pub total_width: u32,
    /// Tallest item height on this line.
    pub max_height: u32,
    /// Absolute index of the (last) item reaching `max_height`.
    pub max_height_index: usize,
}

impl Line {
    /// Add an item to the end of this line.
    pub(crate) fn push(&mut self, index: usize, size: ItemSize) {
        self.item_count += 1;
        self.total_width = self.total_width.saturating_add(size.width);
        if size.height >= self.max_height {
            self.max_height = size.height;
            self.max_height_index = index;
        }
    }

    /// Check if the line holds no items.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "items={} width={} max_height={} (item {})",
            self.item_count, self.total_width, self.max_height, self.max_height_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_accumulates_count_and_width() {
        let mut line = Line::default();
        line.push(4, ItemSize::new(10, 3));
        line.push(5, ItemSize::new(15, 2));

        assert_eq!(line.item_count, 2);
        assert_eq!(line.total_width, 25);
        assert_eq!(line.max_height, 3);
        assert_eq!(line.max_height_index, 4);
    }

    #[test]
    fn max_height_tie_goes_to_last_item() {
        let mut line = Line::default();
        for (i, h) in [3, 5, 5, 2].into_iter().enumerate() {
            line.push(i, ItemSize::new(1, h));
        }

        assert_eq!(line.max_height, 5);
        assert_eq!(line.max_height_index, 2, "second item of height 5 wins");
    }

    #[test]
    fn zero_height_first_item_still_records_index() {
        let mut line = Line::default();
        line.push(7, ItemSize::new(1, 0));
        assert_eq!(line.max_height_index, 7);
    }

    #[test]
    fn total_width_saturates() {
        let mut line = Line::default();
        line.push(0, ItemSize::new(u32::MAX, 1));
        line.push(1, ItemSize::new(5, 1));
        assert_eq!(line.total_width, u32::MAX);
    }

    #[test]
    fn item_size_from_tuple_and_display() {
        let size = ItemSize::from((40, 12));
        assert_eq!(size, ItemSize::new(40, 12));
        assert_eq!(size.to_string(), "40x12");
    }

    #[test]
    fn line_display_lists_fields() {
        let line = Line {
            item_count: 2,
            total_width: 80,
            max_height: 10,
            max_height_index: 1,
        };
        assert_eq!(line.to_string(), "items=2 width=80 max_height=10 (item 1)");
    }
}
