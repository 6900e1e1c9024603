use leptos::*;

use crate::presentation::router::{Link, Route};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Portfolio Optimizer Pro"</h1>
            <p class="hero-tagline">"Advanced Portfolio Optimization with Risk Constraints"</p>
            <div class="hero-actions">
                <Link to=Route::Optimize class="cta">"Start Optimizing"</Link>
                <Link to=Route::Analytics class="cta secondary">"📊 Analytics"</Link>
            </div>
        </div>
    }
}
