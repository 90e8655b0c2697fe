//! Result list widget and the per-result item template.
//!
//! The item markup is the page's one exposed contract: a `<li>` fragment with
//! a heading link to the hit's permalink wrapping the highlighted title, a
//! paragraph with the highlighted description, and a trailing
//! "Continue reading" link to the same permalink. Both links emit a named
//! click event, synchronously, before the browser follows the link.

use std::rc::Rc;

use blogsearch_client::{EventKind, EventSink};
use blogsearch_core::{Hit, HitField};
use leptos::prelude::*;

use crate::highlight::{Highlighter, QueryHighlighter};
use crate::session::SearchSession;

/// Event label for a click on the heading link.
pub const TITLE_CLICKED: &str = "Title Clicked";

/// Event label for a click on the continue-reading link.
pub const CONTINUE_READING_CLICKED: &str = "Continue-Reading Clicked";

/// Pre-rendered pieces of one item fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFragment {
    /// Highlighted title, markup-safe HTML.
    pub title_html: String,

    /// Highlighted description, markup-safe HTML.
    pub desc_html: String,

    /// Navigation target of both links.
    pub permalink: String,
}

impl ItemFragment {
    /// Render the highlighted pieces of a hit.
    pub fn render(hit: &Hit, highlighter: &dyn Highlighter) -> Self {
        Self {
            title_html: highlighter.highlight(hit, HitField::Title),
            desc_html: highlighter.highlight(hit, HitField::Desc),
            permalink: hit.permalink.clone(),
        }
    }
}

/// Handler body for a click on the heading link.
fn emit_title_click(sink: &dyn EventSink, hit: &Hit) {
    sink.emit(EventKind::Click, hit, TITLE_CLICKED);
}

/// Handler body for a click on the continue-reading link.
fn emit_continue_reading_click(sink: &dyn EventSink, hit: &Hit) {
    sink.emit(EventKind::Click, hit, CONTINUE_READING_CLICKED);
}

/// Result list widget.
#[component]
pub fn Hits(
    /// The shared search session.
    session: SearchSession,
    /// Sink receiving the click events emitted from item links.
    sink: Rc<dyn EventSink>,
) -> impl IntoView {
    let response = session.response();
    let sink = StoredValue::new_local(sink);

    view! {
      <div class="hits">
        <Show
          when=move || !response.get().hits.is_empty()
          fallback=move || {
            let query = response.get().query;
            if query.is_empty() {
              view! { <div class="hits-empty"></div> }.into_any()
            } else {
              view! { <div class="hits-no-results">"No results found for \"" {query} "\""</div> }
                .into_any()
            }
          }
        >

          <ol class="hits-list">
            <For
              each=move || response.get().hits
              key=|hit| hit.permalink.clone()
              children=move |hit| {
                let query = response.with_untracked(|r| r.query.clone());
                view! { <HitItem hit=hit query=query sink=sink.get_value() /> }
              }
            />

          </ol>
        </Show>
      </div>
    }
}

/// One rendered result item.
#[component]
fn HitItem(
    /// The hit to render.
    hit: Hit,
    /// Query the hit was retrieved for, used for highlighting.
    query: String,
    /// Sink receiving the click events.
    sink: Rc<dyn EventSink>,
) -> impl IntoView {
    let highlighter = QueryHighlighter::new(&query);
    let fragment = ItemFragment::render(&hit, &highlighter);

    let title_hit = hit.clone();
    let title_sink = Rc::clone(&sink);
    // Emit synchronously and let the default navigation proceed.
    let on_title_click = move |_| emit_title_click(title_sink.as_ref(), &title_hit);

    let read_hit = hit.clone();
    let on_read_click = move |_| emit_continue_reading_click(sink.as_ref(), &read_hit);

    view! {
      <li class="media">
        <div class="media-body">
          <h3 class="mt-0 mb-1">
            <a
              href=fragment.permalink.clone()
              on:click=on_title_click
              inner_html=fragment.title_html.clone()
            ></a>
          </h3>
          <p inner_html=fragment.desc_html.clone()></p>
          <a class="continue-read" href=fragment.permalink.clone() on:click=on_read_click>
            "Continue reading"
          </a>
          <hr />
        </div>
      </li>
    }
}

/// Optional widget resetting the session to the empty query.
///
/// Not part of the default widget set; deployments that expose refinements
/// can attach it next to the search box.
#[component]
pub fn ClearRefinements(
    /// The shared search session.
    session: SearchSession,
    /// Button label.
    #[prop(default = "Clear".to_string())]
    label: String,
) -> impl IntoView {
    let query = session.query();

    view! {
      <button
        class="clear-refinements-button"
        disabled=move || query.get().is_empty()
        on:click=move |_| session.set_query("")
      >
        {label}
      </button>
    }
}

#[cfg(test)]
mod tests {
    use blogsearch_client::RecordingSink;

    use super::*;

    fn sample_hit() -> Hit {
        Hit::new("Hello", "World", "/p/1")
    }

    #[test]
    fn test_fragment_links_share_permalink() {
        let hit = sample_hit();
        let highlighter = QueryHighlighter::new("");
        let fragment = ItemFragment::render(&hit, &highlighter);

        // Both the heading link and the continue-reading link navigate here
        assert_eq!(fragment.permalink, "/p/1");
    }

    #[test]
    fn test_fragment_highlights_title_and_desc() {
        let hit = sample_hit();
        let highlighter = QueryHighlighter::new("hello world");
        let fragment = ItemFragment::render(&hit, &highlighter);

        assert_eq!(fragment.title_html, "<mark>Hello</mark>");
        assert_eq!(fragment.desc_html, "<mark>World</mark>");
    }

    #[test]
    fn test_fragment_is_markup_safe() {
        let hit = Hit::new("<script>x</script>", "a & b", "/p/1");
        let highlighter = QueryHighlighter::new("");
        let fragment = ItemFragment::render(&hit, &highlighter);

        assert_eq!(fragment.title_html, "&lt;script&gt;x&lt;/script&gt;");
        assert_eq!(fragment.desc_html, "a &amp; b");
    }

    #[test]
    fn test_title_click_emits_exactly_one_event() {
        let sink = RecordingSink::new();
        let hit = sample_hit();

        emit_title_click(&sink, &hit);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, EventKind::Click);
        assert_eq!(events[0].1, hit);
        assert_eq!(events[0].2, "Title Clicked");
    }

    #[test]
    fn test_continue_reading_click_emits_exactly_one_event() {
        let sink = RecordingSink::new();
        let hit = sample_hit();

        emit_continue_reading_click(&sink, &hit);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, EventKind::Click);
        assert_eq!(events[0].1, hit);
        assert_eq!(events[0].2, "Continue-Reading Clicked");
    }

    #[test]
    fn test_event_labels() {
        assert_eq!(TITLE_CLICKED, "Title Clicked");
        assert_eq!(CONTINUE_READING_CLICKED, "Continue-Reading Clicked");
    }
}
