//! Point-in-time copy of a cache, for diagnostics.

use super::params::FlowParams;
use super::types::{ItemSize, Line};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Copy of a [`FlowCache`](super::cache::FlowCache) after a rebuild.
///
/// `Display` renders the dump text returned by `dump_cache`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Packing params in effect.
    pub params: FlowParams,
    /// Item sizes, `None` for unmeasured slots.
    pub sizes: Vec<Option<ItemSize>>,
    /// Cached lines.
    pub lines: Vec<Line>,
}

impl fmt::Display for CacheSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cap = self.params.items_per_line.map_or(0, |cap| cap.get());
        writeln!(f, "area width = {}", self.params.content_area_width)?;
        writeln!(f, "items per line = {}", cap)?;
        writeln!(f, "cached items = {}", self.sizes.len())?;
        for (i, size) in self.sizes.iter().enumerate() {
            match size {
                Some(size) => writeln!(f, "item {} = {}", i, size)?,
                None => writeln!(f, "item {} = unmeasured", i)?,
            }
        }
        writeln!(f)?;
        writeln!(f, "cached lines = {}", self.lines.len())?;
        for (i, line) in self.lines.iter().enumerate() {
            writeln!(f, "line {}: {}", i, line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::cache::FlowCache;

    #[test]
    fn dump_lists_sizes_holes_and_lines() {
        let mut cache = FlowCache::new(0, 100);
        cache.add(0, [ItemSize::new(40, 10), ItemSize::new(40, 12)]);
        cache.add_blank(2, 1);
        cache.add(3, [ItemSize::new(30, 8)]);

        insta::assert_snapshot!(cache.dump_cache(), @r"
        area width = 100
        items per line = 0
        cached items = 4
        item 0 = 40x10
        item 1 = 40x12
        item 2 = unmeasured
        item 3 = 30x8

        cached lines = 1
        line 0: items=2 width=80 max_height=12 (item 1)
        ");
    }

    #[test]
    fn snapshot_serializes_holes_as_null() {
        let mut cache = FlowCache::new(2, 50);
        cache.add_blank(0, 1);
        cache.set_item(1, ItemSize::new(5, 6));

        let json = serde_json::to_value(cache.snapshot()).expect("snapshot serializes");
        assert_eq!(json["params"]["content_area_width"], 50);
        assert_eq!(json["params"]["items_per_line"], 2);
        assert!(json["sizes"][0].is_null());
        assert_eq!(json["sizes"][1]["width"], 5);
        assert_eq!(json["lines"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut cache = FlowCache::new(0, 100);
        cache.add(0, [ItemSize::new(60, 1), ItemSize::new(60, 2)]);
        let snapshot = cache.snapshot();

        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: CacheSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, snapshot);
    }
}
