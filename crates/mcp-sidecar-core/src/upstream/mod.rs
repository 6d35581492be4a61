//! Adapters for upstream services consumed through narrow interfaces.
//!
//! Both adapters share the same contract: they never let a transport-level
//! fault escape to the dispatcher. Failures come back as descriptive text.

pub mod post;
pub mod search;

pub use post::PostClient;
pub use search::TavilyClient;
