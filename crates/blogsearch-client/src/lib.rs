//! Blogsearch Client
//!
//! Browser-side HTTP client for the hosted search service.
//!
//! The service owns indexing, ranking, and query parsing; this crate only
//! sends queries and forwards click events. Two endpoints are involved:
//!
//! - the query endpoint, returning one page of [`Hit`]s for a query string;
//! - the insights endpoint, receiving click events emitted from the result
//!   list.
//!
//! Request building and response parsing are kept separate from the network
//! calls so they can be unit tested on the native target.
//!
//! [`Hit`]: blogsearch_core::Hit

pub mod client;
pub mod error;
pub mod insights;

pub use client::{SearchClient, SearchResponse};
pub use error::ClientError;
pub use insights::{EventKind, EventSink, InsightsClient, NullSink, RecordingSink};
