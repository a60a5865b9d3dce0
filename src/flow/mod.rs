//! Flow layout cache - item sizes packed into width-bounded lines
//!
//! The host framework reports measured item sizes as items become visible and
//! asks which line each item sits on. Lines are derived greedily from the
//! sizes and cached; mutations drop only the lines from the affected item
//! onward, and queries repack only the missing suffix.
//!
//! # Module Structure
//!
//! - `types`: ItemSize and Line value types
//! - `params`: FlowParams - content area width and items-per-line cap
//! - `packer`: LinePacker - greedy line formation
//! - `height_index`: HeightIndex - O(log n) vertical offsets of cached lines
//! - `cache`: FlowCache - sizes, lines, invalidation and queries
//! - `snapshot`: CacheSnapshot - serializable copy and dump text

pub mod cache;
pub mod height_index;
pub mod packer;
pub mod params;
pub mod snapshot;
pub mod types;

pub use cache::FlowCache;
pub use params::FlowParams;
pub use snapshot::CacheSnapshot;
pub use types::{ItemSize, Line};
