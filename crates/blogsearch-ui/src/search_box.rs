//! Search box widget.

use leptos::prelude::*;

use crate::session::SearchSession;

/// Text input driving the session query.
///
/// Updates the query on every keystroke; dispatch to the service is handled
/// by the session.
#[component]
pub fn SearchBox(
    /// The shared search session.
    session: SearchSession,
    /// Placeholder text for the input.
    #[prop(default = "Search posts...".to_string())]
    placeholder: String,
) -> impl IntoView {
    let query = session.query();
    let loading = session.loading();
    let on_input_session = session.clone();

    view! {
      <div class="searchbox">
        <input
          type="search"
          class="searchbox-input"
          placeholder=placeholder
          prop:value=move || query.get()
          on:input=move |ev| {
            let value = event_target_value(&ev);
            on_input_session.set_query(&value);
          }
        />
        <Show when=move || loading.get()>
          <span class="searchbox-spinner" aria-label="Loading"></span>
        </Show>
      </div>
    }
}
