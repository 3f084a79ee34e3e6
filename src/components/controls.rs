//! Analysis controls: the date pair, buffer radius and run actions.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::mock;
use crate::model::RequestDraft;
use crate::session::{AnalysisSession, SessionStatus, LAYER_BURN_SEVERITY};

#[component]
pub fn AnalysisControls(draft: RwSignal<RequestDraft>) -> impl IntoView {
    let session = expect_context::<AnalysisSession>();
    let (validation, set_validation) = signal::<Option<String>>(None);

    let on_run = move |_| {
        let state = session.state().get_untracked();
        let Some(location) = state.selected_location else {
            set_validation.set(Some(String::from("Click the map to pick a point first")));
            return;
        };
        match draft.get_untracked().to_request(location) {
            Ok(request) => {
                set_validation.set(None);
                session.run_analysis(request);
            }
            Err(message) => set_validation.set(Some(message)),
        }
    };

    // Degraded/demo mode: feed the bundled fixture through the session,
    // centered on the selected point when there is one.
    let on_sample = move |_| {
        let state = session.state().get_untracked();
        let request = state
            .selected_location
            .and_then(|location| draft.get_untracked().to_request(location).ok())
            .unwrap_or_else(mock::sample_request);
        session.use_mock_result(mock::sample_result(&request));
        set_validation.set(None);
    };

    let on_clear = move |_| {
        session.clear();
        set_validation.set(None);
    };

    view! {
        <section class="panel controls">
            <h3>"Analysis"</h3>
            <p class="hint">
                {move || match session.state().get().selected_location {
                    Some(loc) => format!("Selected point: {:.4}, {:.4}", loc.latitude, loc.longitude),
                    None => String::from("Click the map to pick a point"),
                }}
            </p>

            <label class="field">
                "Pre-fire date"
                <input
                    type="date"
                    class="input"
                    prop:value=move || draft.get().pre_fire_date
                    on:change=move |ev| {
                        let value = input_value(&ev);
                        draft.update(|d| d.pre_fire_date = value);
                    }
                />
            </label>

            <label class="field">
                "Post-fire date"
                <input
                    type="date"
                    class="input"
                    prop:value=move || draft.get().post_fire_date
                    on:change=move |ev| {
                        let value = input_value(&ev);
                        draft.update(|d| d.post_fire_date = value);
                    }
                />
            </label>

            <label class="field">
                "Buffer radius (km)"
                <input
                    type="number"
                    class="input"
                    min="0.5"
                    step="0.5"
                    prop:value=move || draft.get().buffer_km
                    on:change=move |ev| {
                        let value = input_value(&ev);
                        draft.update(|d| d.buffer_km = value);
                    }
                />
            </label>

            {move || validation.get().map(|message| view! {
                <p class="validation-error">{message}</p>
            })}

            <div class="action-buttons">
                <button
                    class="btn btn-primary"
                    on:click=on_run
                    disabled=move || session.state().get().status == SessionStatus::Running
                >
                    "Run Analysis"
                </button>
                <button class="btn btn-secondary" on:click=on_sample>
                    "Load Sample Data"
                </button>
                <button class="btn btn-secondary" on:click=on_clear>
                    "Clear"
                </button>
            </div>

            <label class="layer-toggle">
                <input
                    type="checkbox"
                    prop:checked=move || session.state().get().layer_visible(LAYER_BURN_SEVERITY)
                    on:change=move |_| session.toggle_layer(LAYER_BURN_SEVERITY)
                />
                "Show severity markers"
            </label>
        </section>
    }
}

/// Helper to get the value of an input element from a change event.
fn input_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|el| el.value())
        .unwrap_or_default()
}
