//! Widget attachment to named DOM containers.
//!
//! Each widget kind maps to one container element id that must pre-exist in
//! the host page markup. Attachments are independent: a missing container is
//! fatal for that widget only and the remaining widgets still attach.

use std::{fmt, rc::Rc};

use blogsearch_client::EventSink;
use leptos::mount::mount_to;
use leptos::prelude::*;
use log::{debug, warn};
use thiserror::Error;
use wasm_bindgen::JsCast;

use crate::pagination::Pagination;
use crate::results::{ClearRefinements, Hits};
use crate::search_box::SearchBox;
use crate::session::SearchSession;

/// The widget kinds the page can attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Query input.
    SearchBox,
    /// Result list.
    Hits,
    /// Page navigation.
    Pagination,
    /// Optional reset control.
    ClearRefinements,
}

impl WidgetKind {
    /// Container element id this widget mounts into.
    pub fn container_id(self) -> &'static str {
        match self {
            WidgetKind::SearchBox => "searchbox",
            WidgetKind::Hits => "hits",
            WidgetKind::Pagination => "pagination",
            WidgetKind::ClearRefinements => "clear-refinements",
        }
    }

    /// The widget set the blog page attaches by default.
    ///
    /// `ClearRefinements` is deliberately absent: the deployment keeps its
    /// container in the markup but leaves the control disabled.
    pub fn default_set() -> Vec<WidgetKind> {
        vec![
            WidgetKind::SearchBox,
            WidgetKind::Hits,
            WidgetKind::Pagination,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            WidgetKind::SearchBox => "search box",
            WidgetKind::Hits => "hits",
            WidgetKind::Pagination => "pagination",
            WidgetKind::ClearRefinements => "clear refinements",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error attaching one widget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    /// The container element is absent from the host page.
    #[error("container #{container} not found for the {widget} widget")]
    ContainerMissing {
        widget: &'static str,
        container: &'static str,
    },
}

/// Resolve which widgets can attach, given a container-existence predicate.
///
/// Pure counterpart of [`attach_widgets`]; one entry per requested widget, in
/// order, with the failures that would occur.
pub fn attach_plan(
    widgets: &[WidgetKind],
    exists: impl Fn(&str) -> bool,
) -> Vec<(WidgetKind, Result<(), AttachError>)> {
    widgets
        .iter()
        .map(|&kind| {
            let container = kind.container_id();
            let result = if exists(container) {
                Ok(())
            } else {
                Err(missing(kind))
            };
            (kind, result)
        })
        .collect()
}

fn missing(kind: WidgetKind) -> AttachError {
    AttachError::ContainerMissing {
        widget: kind.name(),
        container: kind.container_id(),
    }
}

/// Mount widgets into their containers in the current document.
///
/// Returns one entry per requested widget. A widget whose container is
/// missing is skipped with a warning; the others attach regardless.
pub fn attach_widgets(
    session: &SearchSession,
    sink: Rc<dyn EventSink>,
    widgets: Vec<WidgetKind>,
) -> Vec<(WidgetKind, Result<(), AttachError>)> {
    let document = web_sys::window().and_then(|w| w.document());

    widgets
        .into_iter()
        .map(|kind| {
            let container = document
                .as_ref()
                .and_then(|d| d.get_element_by_id(kind.container_id()))
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

            let result = match container {
                Some(el) => {
                    mount_widget(kind, el, session, &sink);
                    debug!("attached {kind} widget to #{}", kind.container_id());
                    Ok(())
                }
                None => {
                    let err = missing(kind);
                    warn!("{err}; skipping");
                    Err(err)
                }
            };

            (kind, result)
        })
        .collect()
}

/// Mount one widget for the page's lifetime.
fn mount_widget(
    kind: WidgetKind,
    container: web_sys::HtmlElement,
    session: &SearchSession,
    sink: &Rc<dyn EventSink>,
) {
    match kind {
        WidgetKind::SearchBox => {
            let session = session.clone();
            mount_to(container, move || view! { <SearchBox session=session /> }).forget();
        }
        WidgetKind::Hits => {
            let session = session.clone();
            let sink = Rc::clone(sink);
            mount_to(container, move || view! { <Hits session=session sink=sink /> }).forget();
        }
        WidgetKind::Pagination => {
            let session = session.clone();
            mount_to(container, move || view! { <Pagination session=session /> }).forget();
        }
        WidgetKind::ClearRefinements => {
            let session = session.clone();
            mount_to(container, move || {
                view! { <ClearRefinements session=session /> }
            })
            .forget();
        }
    }
}
