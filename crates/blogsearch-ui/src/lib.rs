//! Blogsearch UI
//!
//! Leptos widgets for the blog search page.
//!
//! # Components
//!
//! - [`SearchBox`] - Text input updating the query on every keystroke
//! - [`Hits`] - Result list rendered through the item template
//! - [`Pagination`] - Page navigation driven by the current response
//! - [`ClearRefinements`] - Optional reset control (not in the default set)
//!
//! All widgets share one [`SearchSession`], the single stateful object of the
//! page: it owns the query string, the page position, and the current
//! response, and dispatches queries to the hosted service as they change.
//! Widgets are mounted independently into named DOM containers via
//! [`attach_widgets`]; a missing container skips that widget only.
//!
//! # Example
//!
//! ```ignore
//! use blogsearch_client::{InsightsClient, SearchClient};
//! use blogsearch_core::SearchConfig;
//! use blogsearch_ui::{attach_widgets, SearchSession, WidgetKind};
//!
//! let config = SearchConfig::new("APP123", "search-only-key", "blogpost");
//! let sink = std::rc::Rc::new(InsightsClient::new(config.clone()));
//! let session = SearchSession::new(SearchClient::new(config));
//!
//! attach_widgets(&session, sink, WidgetKind::default_set());
//! session.start();
//! ```

pub mod attach;
pub mod highlight;
pub mod pagination;
pub mod results;
pub mod search_box;
pub mod session;

pub use attach::{AttachError, WidgetKind, attach_plan, attach_widgets};
pub use highlight::{HighlightFormat, Highlighter, QueryHighlighter};
pub use pagination::Pagination;
pub use results::{ClearRefinements, Hits};
pub use search_box::SearchBox;
pub use session::{Dispatch, SearchSession, SessionState};
