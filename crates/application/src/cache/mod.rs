//! Read-through cache for read-mostly resources.

mod entry;
mod layer;

pub use layer::{CacheLayer, ReadOptions};
