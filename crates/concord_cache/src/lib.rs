//! Content-addressed parse cache for Concord artifacts.
//!
//! Turning artifact source into an AST is the most expensive step of a
//! check, so parse results are memoized at two levels: an in-process map
//! for repeated lookups within one session, and on-disk JSON files that
//! survive across invocations. Entries are keyed by the content hash of
//! the source text, so a changed document is a miss and its stale siblings
//! are evicted on the next write.

#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod key;

pub use cache::{CacheSource, CachedParse, ParseCache};
pub use error::CacheError;
pub use key::CacheIdentity;
