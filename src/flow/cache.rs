//! Size/line cache for flow layouts.

use super::height_index::HeightIndex;
use super::packer::LinePacker;
use super::params::FlowParams;
use super::snapshot::CacheSnapshot;
use super::types::{ItemSize, Line};
use tracing::{debug, trace, warn};

/// Incremental cache of item sizes and the lines they pack into.
///
/// Contains:
/// - Measured item sizes, one slot per item (`None` for unmeasured holes)
/// - Cached lines covering a prefix of the items
/// - A height index kept in lockstep with the cached lines
///
/// # Invalidation
/// Every mutation drops the line containing the affected item and every line
/// after it. Lines before the affected one are never recomputed. If the item
/// lies beyond the cached lines only the trailing line is dropped, because it
/// may still be open.
///
/// # Rebuild
/// Lines are rebuilt lazily at the start of each query, resuming from the
/// first uncovered item and stopping at the first hole.
///
/// # Inactive cache
/// While the content area width is zero every mutation is a no-op and every
/// query reports nothing.
///
/// # Oversized indices
/// A mutation whose index arithmetic overflows, or that would need more item
/// slots than can be allocated, logs a warning and leaves the cache untouched.
#[derive(Debug, Clone, Default)]
pub struct FlowCache {
    params: FlowParams,
    sizes: Vec<Option<ItemSize>>,
    lines: Vec<Line>,
    line_heights: HeightIndex,
}

impl FlowCache {
    /// Create an empty cache. An `items_per_line` of 0 means no cap.
    pub fn new(items_per_line: usize, content_area_width: u32) -> Self {
        Self::with_params(FlowParams::new(items_per_line, content_area_width))
    }

    /// Create an empty cache from packing params.
    pub fn with_params(params: FlowParams) -> Self {
        Self {
            params,
            sizes: Vec::new(),
            lines: Vec::new(),
            line_heights: HeightIndex::new(0),
        }
    }

    // === Accessors ===

    /// Whether the cache has a positive content area width.
    pub fn is_active(&self) -> bool {
        self.params.is_active()
    }

    /// Current packing params.
    pub fn params(&self) -> FlowParams {
        self.params
    }

    /// Current content area width.
    pub fn content_area_width(&self) -> u32 {
        self.params.content_area_width
    }

    /// Items-per-line cap, 0 when uncapped.
    pub fn items_per_line(&self) -> usize {
        self.params.items_per_line.map_or(0, |cap| cap.get())
    }

    /// Number of item slots, holes included.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Check if no item slots exist.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Measured size at `index`, if any.
    pub fn item_size(&self, index: usize) -> Option<ItemSize> {
        self.sizes.get(index).copied().flatten()
    }

    /// Number of lines cached right now, without rebuilding.
    pub fn cached_line_count(&self) -> usize {
        self.lines.len()
    }

    // === Mutations ===

    /// Insert measured items at `start`, shifting later items forward.
    pub fn add<I>(&mut self, start: usize, sizes: I)
    where
        I: IntoIterator<Item = ItemSize>,
    {
        if !self.is_active() {
            return;
        }
        let sizes = sizes.into_iter();
        let len = start.max(self.sizes.len()).checked_add(sizes.size_hint().0);
        if !self.reserve_len("add", len) {
            return;
        }
        self.invalidate_from(start);
        self.pad_to(start);
        let before = self.sizes.len();
        self.sizes.splice(start..start, sizes.map(Some));
        debug!(start, count = self.sizes.len() - before, "Inserted item sizes");
    }

    /// Insert `count` unmeasured slots at `start`, shifting later items forward.
    pub fn add_blank(&mut self, start: usize, count: usize) {
        if !self.is_active() {
            return;
        }
        let len = start.max(self.sizes.len()).checked_add(count);
        if !self.reserve_len("add_blank", len) {
            return;
        }
        self.invalidate_from(start);
        self.pad_to(start);
        self.sizes.splice(start..start, std::iter::repeat(None).take(count));
        debug!(start, count, "Inserted unmeasured slots");
    }

    /// Forget measured sizes in range without shifting, leaving holes.
    pub fn invalidate_sizes(&mut self, index: usize, count: usize) {
        if !self.is_active() {
            return;
        }
        self.invalidate_from(index);
        let count = self.clamped_count(index, count);
        if count > 0 {
            self.sizes[index..index + count].fill(None);
        }
        debug!(index, count, "Invalidated item sizes");
    }

    /// Remove items in range and shift later items back to close the gap.
    ///
    /// The count is clamped to the slots available from `index`.
    pub fn remove(&mut self, index: usize, count: usize) {
        if !self.is_active() {
            return;
        }
        self.invalidate_from(index);
        let count = self.clamped_count(index, count);
        if count > 0 {
            self.sizes.drain(index..index + count);
        }
        debug!(index, count, "Removed items");
    }

    /// Replace the size at `index`.
    ///
    /// Setting the size already cached is a no-op and invalidates nothing.
    pub fn set_item(&mut self, index: usize, size: ItemSize) {
        if !self.is_active() {
            return;
        }
        if self.item_size(index) == Some(size) {
            return;
        }
        if !self.reserve_len("set_item", index.checked_add(1)) {
            return;
        }
        self.invalidate_from(index);
        self.pad_to(index + 1);
        self.sizes[index] = Some(size);
    }

    /// Move `count` items starting at `from` so the block starts at `to`.
    ///
    /// Items between the two positions shift to fill the gap. Callers are
    /// responsible for passing an in-range move; slots a move reaches past the
    /// end are padded with holes.
    pub fn move_items(&mut self, from: usize, to: usize, count: usize) {
        if !self.is_active() || from == to || count == 0 {
            return;
        }
        let Some(end) = from.max(to).checked_add(count) else {
            warn!(from, to, count, "Move range overflows; ignoring");
            return;
        };
        if !self.reserve_len("move", Some(end)) {
            return;
        }
        self.invalidate_from(from.min(to));

        if end > self.sizes.len() {
            warn!(from, to, count, len = self.sizes.len(), "Move reaches past the last item");
            self.pad_to(end);
        }

        if from < to {
            self.sizes[from..end].rotate_left(count);
        } else {
            self.sizes[to..end].rotate_right(count);
        }
        debug!(from, to, count, "Moved items");
    }

    /// Change the content area width. Drops every cached line and repacks.
    pub fn set_content_area_width(&mut self, width: u32) {
        self.params.content_area_width = width;
        self.lines.clear();
        self.line_heights.clear();
        debug!(width, "Content area width changed");
        self.refresh();
    }

    /// Drop all sizes and lines.
    pub fn clear(&mut self) {
        self.sizes.clear();
        self.lines.clear();
        self.line_heights.clear();
    }

    // === Queries ===

    /// Item count of every cached line, in line order.
    pub fn line_counts(&mut self) -> Vec<usize> {
        if !self.is_active() {
            return Vec::new();
        }
        self.refresh();
        self.lines.iter().map(|line| line.item_count).collect()
    }

    /// Number of lines after bringing the cache up to date.
    pub fn line_count(&mut self) -> usize {
        if !self.is_active() {
            return 0;
        }
        self.refresh();
        self.lines.len()
    }

    /// Index of the line holding `item`, if that line is cached.
    pub fn item_line_index(&mut self, item: usize) -> Option<usize> {
        if !self.is_active() {
            return None;
        }
        self.refresh();
        self.cached_line_index(item)
    }

    /// Line at `line_index`.
    pub fn line(&mut self, line_index: usize) -> Option<&Line> {
        if !self.is_active() {
            return None;
        }
        self.refresh();
        self.lines.get(line_index)
    }

    /// Line holding `item`.
    pub fn containing_line(&mut self, item: usize) -> Option<&Line> {
        let line_index = self.item_line_index(item)?;
        self.lines.get(line_index)
    }

    /// Index of the first item on `line_index`.
    ///
    /// `line_index == line_count()` yields the number of covered items.
    pub fn first_item_index(&mut self, line_index: usize) -> Option<usize> {
        if !self.is_active() {
            return None;
        }
        self.refresh();
        if line_index > self.lines.len() {
            return None;
        }
        Some(self.lines[..line_index].iter().map(|l| l.item_count).sum())
    }

    /// Whether a line before the one holding `item` is cached.
    pub fn has_previous_line_cached(&mut self, item: usize) -> bool {
        self.item_line_index(item).is_some_and(|line| line > 0)
    }

    /// Whether a line after the one holding `item` is cached.
    pub fn has_next_line_cached(&mut self, item: usize) -> bool {
        self.item_line_index(item)
            .is_some_and(|line| line + 1 < self.lines.len())
    }

    /// Vertical offset of the top of `line_index`.
    ///
    /// `line_index == line_count()` yields the bottom of the last line.
    pub fn line_top(&mut self, line_index: usize) -> Option<u64> {
        if !self.is_active() {
            return None;
        }
        self.refresh();
        self.line_heights.offset_of(line_index)
    }

    /// Index of the line covering vertical offset `offset`.
    pub fn line_at_offset(&mut self, offset: u64) -> Option<usize> {
        if !self.is_active() {
            return None;
        }
        self.refresh();
        self.line_heights.lower_bound(offset)
    }

    /// Sum of all cached line heights.
    pub fn content_height(&mut self) -> u64 {
        if !self.is_active() {
            return 0;
        }
        self.refresh();
        self.line_heights.total()
    }

    /// Serializable copy of the cache contents.
    pub fn snapshot(&mut self) -> CacheSnapshot {
        self.refresh();
        CacheSnapshot {
            params: self.params,
            sizes: self.sizes.clone(),
            lines: self.lines.clone(),
        }
    }

    /// Human-readable listing of width, sizes and lines for debugging.
    pub fn dump_cache(&mut self) -> String {
        self.snapshot().to_string()
    }

    // === Internals ===

    /// Line index of `item` among the lines cached right now.
    fn cached_line_index(&self, item: usize) -> Option<usize> {
        let mut covered = 0;
        for (i, line) in self.lines.iter().enumerate() {
            covered += line.item_count;
            if covered > item {
                return Some(i);
            }
        }
        None
    }

    /// Number of items covered by cached lines.
    fn covered_items(&self) -> usize {
        self.lines.iter().map(|line| line.item_count).sum()
    }

    /// Drop the line holding `item` and every later line.
    fn invalidate_from(&mut self, item: usize) {
        let keep = match self.cached_line_index(item) {
            Some(line_index) => line_index,
            None => self.lines.len().saturating_sub(1),
        };
        if keep < self.lines.len() {
            debug!(
                item,
                dropped = self.lines.len() - keep,
                kept = keep,
                "Invalidated cached lines"
            );
            self.lines.truncate(keep);
            self.line_heights.truncate(keep);
        }
    }

    /// Pack lines from the first uncovered item up to the first hole.
    fn refresh(&mut self) {
        if !self.is_active() {
            return;
        }
        let start = self.covered_items();
        let mut packer = LinePacker::new(self.params);
        let mut index = start;
        let before = self.lines.len();

        while let Some(Some(size)) = self.sizes.get(index) {
            if let Some(line) = packer.push(index, *size) {
                self.append_line(line);
            }
            index += 1;
        }
        if let Some(line) = packer.finish() {
            self.append_line(line);
        }

        if self.lines.len() > before {
            debug!(
                start,
                end = index,
                appended = self.lines.len() - before,
                "Rebuilt cached lines"
            );
        }
    }

    fn append_line(&mut self, line: Line) {
        trace!(line_index = self.lines.len(), %line, "Packed line");
        self.line_heights.push(line.max_height);
        self.lines.push(line);
    }

    /// Make room for `len` item slots.
    ///
    /// Returns `false` when `len` overflowed or cannot be allocated; the
    /// caller then leaves the cache untouched.
    fn reserve_len(&mut self, op: &'static str, len: Option<usize>) -> bool {
        let Some(len) = len else {
            warn!(op, "Item index overflows; ignoring mutation");
            return false;
        };
        let additional = len.saturating_sub(self.sizes.len());
        if let Err(error) = self.sizes.try_reserve(additional) {
            warn!(op, len, %error, "Cannot grow item slots; ignoring mutation");
            return false;
        }
        true
    }

    fn pad_to(&mut self, len: usize) {
        if self.sizes.len() < len {
            self.sizes.resize(len, None);
        }
    }

    fn clamped_count(&self, index: usize, count: usize) -> usize {
        count.min(self.sizes.len().saturating_sub(index))
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
