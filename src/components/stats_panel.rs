//! Result statistics: burned area, severity buckets and NBR indices.

use leptos::prelude::*;

use crate::session::AnalysisSession;
use crate::severity::Severity;

#[component]
pub fn StatsPanel() -> impl IntoView {
    let session = expect_context::<AnalysisSession>();

    view! {
        {move || session.state().get().result.map(|result| {
            let buckets = Severity::CLASSES
                .iter()
                .map(|&class| {
                    let area = result.burn_severity_stats.bucket(class);
                    view! {
                        <li class="bucket-row">
                            <span
                                class="swatch"
                                style=format!("background:{}", class.color())
                            ></span>
                            <span class="bucket-label">{class.label()}</span>
                            <span class="bucket-value">{format!("{area:.2} km²")}</span>
                        </li>
                    }
                })
                .collect_view();

            let nbr = result.nbr_stats;
            view! {
                <section class="panel stats">
                    <h3>"Burn Severity"</h3>
                    <p class="data-source">{result.data_source.clone()}</p>
                    <p class="date-range">
                        {format!("{} to {}", result.pre_fire_date, result.post_fire_date)}
                    </p>
                    <p class="total-area">
                        <strong>{format!("{:.2} km²", result.total_burned_area)}</strong>
                        " total burned area"
                    </p>
                    <ul class="bucket-list">{buckets}</ul>

                    <h4>"NBR indices"</h4>
                    <ul class="nbr-list">
                        <li>{format!("Pre-fire average: {:.3}", nbr.pre_fire_avg)}</li>
                        <li>{format!("Post-fire average: {:.3}", nbr.post_fire_avg)}</li>
                        <li>{format!("Average delta: {:.3}", nbr.avg_delta)}</li>
                        <li>{format!("Max delta: {:.3}", nbr.max_delta)}</li>
                    </ul>
                </section>
            }
        })}
    }
}
