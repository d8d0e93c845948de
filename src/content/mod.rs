//! Content sourcing: the provider seam, the static fallback pool, and the
//! bounded recent-items cache

pub mod cache;
pub mod fallback;
pub mod provider;

pub use cache::ContentCache;
pub use fallback::StaticPool;
pub use provider::{fetch_with_fallback, ContentProvider, QuizQuestion};
