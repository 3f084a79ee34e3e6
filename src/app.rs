use leptos::prelude::*;

use crate::components::controls::AnalysisControls;
use crate::components::error_banner::ErrorBanner;
use crate::components::image_gallery::ImageGallery;
use crate::components::severity_legend::SeverityLegend;
use crate::components::stats_panel::StatsPanel;
use crate::config::AppConfig;
use crate::map::MapView;
use crate::model::RequestDraft;
use crate::session::AnalysisSession;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_window();

    // The one live session, injected through context so every surface
    // observes the same state.
    let session = AnalysisSession::new(config.api_base_url.clone());
    provide_context(session);

    let draft = RwSignal::new(RequestDraft::default());

    view! {
        <div class="app-layout">
            <style>{include_str!("app.css")}</style>
            <header class="app-header">
                <h1>"Burn Severity Explorer"</h1>
                <p>"Pick a point, set a pre/post-fire date pair, and run a satellite burn-severity analysis."</p>
            </header>
            <main class="content">
                <MapView config=config draft=draft />
                <aside class="sidebar">
                    <AnalysisControls draft=draft />
                    <ErrorBanner />
                    <StatsPanel />
                    <ImageGallery />
                    <SeverityLegend />
                </aside>
            </main>
        </div>
    }
}
