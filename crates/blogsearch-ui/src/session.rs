//! The search session shared by all widgets.
//!
//! One session is constructed at page bootstrap and passed explicitly to
//! every widget; it owns the query string, the page position, and the latest
//! response. Query dispatch is asynchronous: each dispatch carries a
//! generation number, and a response belonging to a superseded generation is
//! discarded, so a new keystroke always wins over an in-flight query.
//!
//! The state transitions live in [`SessionState`], free of any reactive or
//! network machinery, so they can be tested on the native target.

use std::{cell::RefCell, rc::Rc};

use blogsearch_client::{SearchClient, SearchResponse};
use leptos::prelude::*;

/// One query dispatch: what to ask the service, tagged with the generation
/// that must still be current when the response lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Query string to send.
    pub query: String,

    /// Zero-based page to request.
    pub page: usize,

    /// Generation this dispatch belongs to.
    pub generation: u64,
}

/// Pure session state: query, page position, and dispatch bookkeeping.
#[derive(Debug, Default)]
pub struct SessionState {
    query: String,
    page: usize,
    nb_pages: usize,
    generation: u64,
}

impl SessionState {
    /// Create the state for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current zero-based page position.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Page count reported by the last accepted response.
    pub fn nb_pages(&self) -> usize {
        self.nb_pages
    }

    /// Whether a generation is still the current one.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Replace the query. Resets the page position to the first page and
    /// supersedes any in-flight dispatch.
    pub fn set_query(&mut self, query: &str) -> Dispatch {
        self.query = query.to_string();
        self.page = 0;
        self.next_dispatch()
    }

    /// Move to another result page. Returns `None` when there is nowhere to
    /// move: no pages are known yet, or the clamped target is the current
    /// page already.
    pub fn set_page(&mut self, page: usize) -> Option<Dispatch> {
        if self.nb_pages == 0 {
            return None;
        }

        let clamped = page.min(self.nb_pages - 1);
        if clamped == self.page {
            return None;
        }

        self.page = clamped;
        Some(self.next_dispatch())
    }

    /// The initial dispatch: the empty query, populating the list on page
    /// load. Returns `None` if any dispatch has already happened, so starting
    /// is effective exactly once.
    pub fn start(&mut self) -> Option<Dispatch> {
        if self.generation > 0 {
            return None;
        }
        Some(self.next_dispatch())
    }

    /// Record a response. Returns `false` (and changes nothing) when the
    /// response belongs to a superseded dispatch.
    pub fn accept(&mut self, generation: u64, response: &SearchResponse) -> bool {
        if generation != self.generation {
            return false;
        }

        self.nb_pages = response.nb_pages;
        self.page = response.page;
        true
    }

    fn next_dispatch(&mut self) -> Dispatch {
        self.generation += 1;
        Dispatch {
            query: self.query.clone(),
            page: self.page,
            generation: self.generation,
        }
    }
}

/// The session object binding widgets to the hosted search client.
///
/// Cheap to clone; all clones share the same state and signals.
#[derive(Clone)]
pub struct SearchSession {
    client: Rc<SearchClient>,
    state: Rc<RefCell<SessionState>>,
    query: RwSignal<String>,
    response: RwSignal<SearchResponse>,
    loading: RwSignal<bool>,
}

impl SearchSession {
    /// Create a session for a client. No query is dispatched until
    /// [`start`](Self::start) or a widget interaction.
    pub fn new(client: SearchClient) -> Self {
        Self {
            client: Rc::new(client),
            state: Rc::new(RefCell::new(SessionState::new())),
            query: RwSignal::new(String::new()),
            response: RwSignal::new(SearchResponse::empty("")),
            loading: RwSignal::new(false),
        }
    }

    /// The client's deployment configuration.
    pub fn config(&self) -> blogsearch_core::SearchConfig {
        self.client.config().clone()
    }

    /// Reactive query string, as typed into the search box.
    pub fn query(&self) -> RwSignal<String> {
        self.query
    }

    /// Reactive latest accepted response.
    pub fn response(&self) -> RwSignal<SearchResponse> {
        self.response
    }

    /// Whether a dispatch is in flight.
    pub fn loading(&self) -> Signal<bool> {
        self.loading.into()
    }

    /// Replace the query, e.g. on a search-box keystroke.
    pub fn set_query(&self, query: &str) {
        self.query.set(query.to_string());
        let dispatch = self.state.borrow_mut().set_query(query);
        self.dispatch(dispatch);
    }

    /// Move to another result page.
    pub fn set_page(&self, page: usize) {
        let dispatch = self.state.borrow_mut().set_page(page);
        if let Some(dispatch) = dispatch {
            self.dispatch(dispatch);
        }
    }

    /// Trigger the initial empty query so the list is populated on page
    /// load. Effective exactly once.
    pub fn start(&self) {
        let dispatch = self.state.borrow_mut().start();
        if let Some(dispatch) = dispatch {
            self.dispatch(dispatch);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn dispatch(&self, dispatch: Dispatch) {
        use log::{debug, warn};

        let client = Rc::clone(&self.client);
        let state = Rc::clone(&self.state);
        let response_signal = self.response;
        let loading = self.loading;

        loading.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            let result = client.search(&dispatch.query, dispatch.page).await;

            match result {
                Ok(response) => {
                    let accepted = state.borrow_mut().accept(dispatch.generation, &response);
                    if accepted {
                        response_signal.set(response);
                        loading.set(false);
                    } else {
                        debug!("discarding superseded response for {:?}", dispatch.query);
                    }
                }
                // Failures are silent beyond the log: the list simply keeps
                // its previous contents.
                Err(e) => {
                    warn!("query {:?} failed: {e}", dispatch.query);
                    if state.borrow().is_current(dispatch.generation) {
                        loading.set(false);
                    }
                }
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn dispatch(&self, _dispatch: Dispatch) {
        self.loading.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(page: usize, nb_pages: usize) -> SearchResponse {
        SearchResponse {
            hits: Vec::new(),
            nb_hits: nb_pages * 3,
            page,
            nb_pages,
            hits_per_page: 3,
            query: String::new(),
        }
    }

    #[test]
    fn test_start_dispatches_empty_query_once() {
        let mut state = SessionState::new();

        let dispatch = state.start().expect("first start dispatches");
        assert_eq!(dispatch.query, "");
        assert_eq!(dispatch.page, 0);

        assert!(state.start().is_none());
    }

    #[test]
    fn test_start_is_noop_after_any_dispatch() {
        let mut state = SessionState::new();
        state.set_query("rust");

        assert!(state.start().is_none());
    }

    #[test]
    fn test_set_query_resets_page() {
        let mut state = SessionState::new();
        state.start();
        state.accept(1, &response(0, 5));
        state.set_page(3);
        state.accept(2, &response(3, 5));

        let dispatch = state.set_query("rust");
        assert_eq!(dispatch.query, "rust");
        assert_eq!(dispatch.page, 0);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut state = SessionState::new();
        let first = state.set_query("ru");
        let second = state.set_query("rust");

        // The slow first response lands after the second dispatch
        assert!(!state.accept(first.generation, &response(0, 9)));
        assert_eq!(state.nb_pages(), 0);

        assert!(state.accept(second.generation, &response(0, 2)));
        assert_eq!(state.nb_pages(), 2);
    }

    #[test]
    fn test_set_page_requires_known_pages() {
        let mut state = SessionState::new();
        assert!(state.set_page(1).is_none());
    }

    #[test]
    fn test_set_page_clamps_to_last_page() {
        let mut state = SessionState::new();
        state.set_query("rust");
        state.accept(1, &response(0, 3));

        let dispatch = state.set_page(99).expect("clamped dispatch");
        assert_eq!(dispatch.page, 2);
    }

    #[test]
    fn test_set_page_noop_on_same_page() {
        let mut state = SessionState::new();
        state.set_query("rust");
        state.accept(1, &response(0, 3));

        assert!(state.set_page(0).is_none());
    }

    #[test]
    fn test_accept_tracks_service_page_position() {
        let mut state = SessionState::new();
        state.set_query("rust");

        // Service clamped the requested page itself
        assert!(state.accept(1, &response(1, 2)));
        assert_eq!(state.page(), 1);
    }
}
