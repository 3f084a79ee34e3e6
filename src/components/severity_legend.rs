//! Fixed severity legend matching the service's classification contract.

use leptos::prelude::*;

use crate::severity::Severity;

#[component]
pub fn SeverityLegend() -> impl IntoView {
    let entries = Severity::CLASSES
        .iter()
        .copied()
        .chain(std::iter::once(Severity::Unknown))
        .map(|class| {
            view! {
                <li>
                    <span
                        class="swatch"
                        style=format!("background:{}", class.color())
                    ></span>
                    {class.label()}
                </li>
            }
        })
        .collect_view();

    view! {
        <section class="panel legend">
            <h3>"Severity classes"</h3>
            <ul class="legend-list">{entries}</ul>
        </section>
    }
}
