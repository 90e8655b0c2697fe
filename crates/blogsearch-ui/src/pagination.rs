//! Pagination widget.

use leptos::prelude::*;

use crate::session::SearchSession;

/// How many numbered page links are shown at most.
const PAGE_WINDOW: usize = 7;

/// Page navigation driven by the current response.
///
/// Renders previous/next controls and a window of numbered page links;
/// selecting a page re-queries the service through the shared session and the
/// result list follows.
#[component]
pub fn Pagination(
    /// The shared search session.
    session: SearchSession,
) -> impl IntoView {
    let response = session.response();
    let nb_pages = Memo::new(move |_| response.get().nb_pages);
    let current = Memo::new(move |_| response.get().page);
    let session = StoredValue::new_local(session);

    view! {
      <Show when=move || { nb_pages.get() > 1 }>
        <ul class="pagination">
          <li class="pagination-item">
            <button
              class="pagination-link pagination-prev"
              disabled=move || { current.get() == 0 }
              on:click=move |_| {
                let page = current.get_untracked();
                if page > 0 {
                  session.get_value().set_page(page - 1);
                }
              }
            >
              "\u{2039}"
            </button>
          </li>

          <For
            each=move || visible_pages(current.get(), nb_pages.get(), PAGE_WINDOW)
            key=|page| *page
            children=move |page| {
              let is_current = Memo::new(move |_| current.get() == page);
              view! {
                <li class="pagination-item" class:active=is_current>
                  <button
                    class="pagination-link"
                    aria-current=move || { if is_current.get() { Some("page") } else { None } }
                    on:click=move |_| session.get_value().set_page(page)
                  >
                    {page + 1}
                  </button>
                </li>
              }
            }
          />

          <li class="pagination-item">
            <button
              class="pagination-link pagination-next"
              disabled=move || { current.get() + 1 >= nb_pages.get() }
              on:click=move |_| {
                let page = current.get_untracked();
                session.get_value().set_page(page + 1);
              }
            >
              "\u{203a}"
            </button>
          </li>
        </ul>
      </Show>
    }
}

/// The window of page numbers to display, centered on the current page.
pub fn visible_pages(current: usize, nb_pages: usize, window: usize) -> Vec<usize> {
    if nb_pages == 0 || window == 0 {
        return Vec::new();
    }

    if nb_pages <= window {
        return (0..nb_pages).collect();
    }

    let half = window / 2;
    let start = if current <= half {
        0
    } else {
        (current - half).min(nb_pages - window)
    };

    (start..start + window).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_pages_all_fit() {
        assert_eq!(visible_pages(0, 3, 7), vec![0, 1, 2]);
    }

    #[test]
    fn test_visible_pages_empty() {
        assert!(visible_pages(0, 0, 7).is_empty());
    }

    #[test]
    fn test_visible_pages_window_at_start() {
        assert_eq!(visible_pages(1, 20, 5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_visible_pages_window_centered() {
        assert_eq!(visible_pages(10, 20, 5), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_visible_pages_window_at_end() {
        assert_eq!(visible_pages(19, 20, 5), vec![15, 16, 17, 18, 19]);
    }

    #[test]
    fn test_visible_pages_contains_current() {
        for nb_pages in 1..15 {
            for current in 0..nb_pages {
                let pages = visible_pages(current, nb_pages, 7);
                assert!(pages.contains(&current), "page {current} of {nb_pages}");
            }
        }
    }
}
