//! Gallery for the opaque image locators returned with a result.
//!
//! Locators are displayed verbatim as `src` attributes; the client does
//! not interpret or validate their content.

use leptos::prelude::*;

use crate::session::AnalysisSession;

#[component]
pub fn ImageGallery() -> impl IntoView {
    let session = expect_context::<AnalysisSession>();

    view! {
        {move || {
            session.state().get().result.and_then(|result| {
                if result.images.is_empty() {
                    return None;
                }
                // Stable display order regardless of map iteration order.
                let mut images: Vec<(String, String)> = result.images.into_iter().collect();
                images.sort_by(|a, b| a.0.cmp(&b.0));

                Some(view! {
                    <section class="panel gallery">
                        <h3>"Imagery"</h3>
                        <div class="image-grid">
                            {images
                                .into_iter()
                                .map(|(name, locator)| view! {
                                    <figure>
                                        <img src=locator alt=name.clone() loading="lazy" />
                                        <figcaption>{name}</figcaption>
                                    </figure>
                                })
                                .collect_view()}
                        </div>
                    </section>
                })
            })
        }}
    }
}
