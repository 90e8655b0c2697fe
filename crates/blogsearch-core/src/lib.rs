//! Blogsearch Core
//!
//! Shared types for the Blogsearch frontend: the deployment configuration,
//! the result-document model, and the error types used across the workspace.
//!
//! The document schema ([`Hit`]) is an external contract owned by the hosted
//! search index; this crate deserializes it leniently and never validates it.

pub mod config;
pub mod error;
pub mod hit;

pub use config::SearchConfig;
pub use error::{CoreError, Result};
pub use hit::{Hit, HitField, HitHighlight};
