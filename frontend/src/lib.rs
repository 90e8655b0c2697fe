//! Blogsearch page entry point.
//!
//! Runs at module load in the host page: builds the search session from the
//! deployment constants, attaches the widgets to their containers, and
//! dispatches the initial empty query so the result list is populated
//! immediately.
//!
//! The host page markup must carry the widget containers:
//!
//! ```html
//! <div id="searchbox"></div>
//! <div id="hits"></div>
//! <div id="clear-refinements"></div> <!-- control currently disabled -->
//! <div id="pagination"></div>
//! ```

use std::rc::Rc;

use blogsearch_client::{EventSink, InsightsClient, NullSink, SearchClient};
use blogsearch_core::SearchConfig;
use blogsearch_ui::{SearchSession, WidgetKind, attach_widgets};
use wasm_bindgen::prelude::*;

/// Hosted search application this deployment queries.
const APP_ID: &str = "BLG2X9KQ4Z";

/// Search-only API key, restricted to read-only queries.
const SEARCH_ONLY_API_KEY: &str = "6f2a81c94d07be315ffa8e2dc1b6d4a9";

/// Index holding the blog posts.
const INDEX_NAME: &str = "blogpost";

/// The configuration this deployment runs with.
fn deployment_config() -> SearchConfig {
    SearchConfig::new(APP_ID, SEARCH_ONLY_API_KEY, INDEX_NAME)
}

/// Module entry point: set up logging and start the search page.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    bootstrap();
}

/// Build the session, attach the default widget set, and dispatch the
/// initial query.
pub fn bootstrap() {
    let config = deployment_config();

    let sink: Rc<dyn EventSink> = if config.insights {
        Rc::new(InsightsClient::new(config.clone()))
    } else {
        Rc::new(NullSink)
    };

    let session = SearchSession::new(SearchClient::new(config));

    attach_widgets(&session, sink, WidgetKind::default_set());
    session.start();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_config_is_valid() {
        assert!(deployment_config().validate().is_ok());
    }

    #[test]
    fn test_page_size_is_three() {
        // The page size is a static parameter of the deployment
        assert_eq!(deployment_config().hits_per_page, 3);
    }

    #[test]
    fn test_index_name() {
        assert_eq!(deployment_config().index_name, "blogpost");
    }
}
