//! Error banner shown when the last run failed.
//!
//! The previous successful result stays visible below it; the user
//! recovers by re-running or picking a new location.

use leptos::prelude::*;

use crate::session::AnalysisSession;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let session = expect_context::<AnalysisSession>();

    view! {
        {move || {
            let state = session.state().get();
            let has_stale_result = state.result.is_some();
            state.error_message.map(|message| view! {
                <div class="error-banner">
                    <strong>"Analysis failed: "</strong>
                    <span>{message}</span>
                    {has_stale_result.then(|| view! {
                        <p class="hint">"Showing the last successful analysis below."</p>
                    })}
                </div>
            })
        }}
    }
}
