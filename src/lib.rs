//! flowcache
//!
//! Incremental line-packing cache for flow (wrap-style) layouts.
//!
//! The host reports measured item sizes; the cache groups consecutive items
//! into lines that fit a content area width (optionally capped by an
//! items-per-line limit) and keeps that grouping current under inserts,
//! removals, resizes and moves, repacking only the lines a change touched.
//!
//! ```
//! use flowcache::flow::{FlowCache, ItemSize};
//!
//! let mut cache = FlowCache::new(0, 100);
//! cache.add(0, [40, 40, 40, 30].map(|w| ItemSize::new(w, 10)));
//! assert_eq!(cache.line_counts(), vec![2, 2]);
//!
//! cache.set_content_area_width(70);
//! assert_eq!(cache.line_counts(), vec![1, 1, 2]);
//! ```
//!
//! The `flow` module is the library proper. `config`, `logging`, `script`
//! and `error` support the `flowcache` script-replay binary.

pub mod config;
pub mod error;
pub mod flow;
pub mod logging;
pub mod script;
