use leptos::*;

use crate::config::AppConfig;
use crate::domain::logging::{LogComponent, get_logger};
use crate::presentation::pages::{AnalyticsPage, HomePage, NotFoundPage, OptimizePage};
use crate::presentation::router::{Link, Navigator, Route};

/// 🦀 Root component: navigation bar plus the page for the current route.
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    get_logger().info(
        LogComponent::Presentation("App"),
        &format!("🚀 Mounting dashboard against {}", config.api_base_url),
    );
    provide_context(config);

    let navigator = Navigator::from_location();
    navigator.listen_popstate();
    provide_context(navigator);

    let route = navigator.route();
    create_effect(move |_| {
        let title = route.get().title();
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            document.set_title(&format!("{title} · Portfolio Optimizer Pro"));
        }
    });

    view! {
        <style>{STYLES}</style>
        <div class="portfolio-app">
            <NavBar/>
            <main>
                {move || match route.get() {
                    Route::Home => view! { <HomePage/> }.into_view(),
                    Route::Analytics => view! { <AnalyticsPage/> }.into_view(),
                    Route::Optimize => view! { <OptimizePage/> }.into_view(),
                    Route::NotFound => view! { <NotFoundPage/> }.into_view(),
                }}
            </main>
        </div>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    let route = use_context::<Navigator>().map(|navigator| navigator.route());
    let active = move |target: Route| {
        move || {
            let current = route.map(|route| route.get());
            if current == Some(target) { "nav-link active" } else { "nav-link" }
        }
    };

    view! {
        <nav class="navbar">
            <Link to=Route::Home class="brand">"📈 Portfolio Optimizer Pro"</Link>
            <div class="nav-links">
                <span class=active(Route::Home)><Link to=Route::Home>"Accueil"</Link></span>
                <span class=active(Route::Analytics)><Link to=Route::Analytics>"Analytics"</Link></span>
                <span class=active(Route::Optimize)><Link to=Route::Optimize>"Optimiser"</Link></span>
            </div>
        </nav>
    }
}

const STYLES: &str = r#"
.portfolio-app {
    font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
    background: #f5f7fb;
    min-height: 100vh;
    color: #333;
}

.navbar {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 14px 28px;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    box-shadow: 0 2px 10px rgba(0, 0, 0, 0.15);
}

.navbar a {
    color: white;
    text-decoration: none;
}

.brand {
    font-size: 20px;
    font-weight: 700;
}

.nav-links {
    display: flex;
    gap: 18px;
}

.nav-link {
    padding: 6px 12px;
    border-radius: 8px;
}

.nav-link.active {
    background: rgba(255, 255, 255, 0.2);
}

main {
    max-width: 1200px;
    margin: 0 auto;
    padding: 24px;
}

.hero {
    text-align: center;
    padding: 80px 20px;
}

.hero h1 {
    font-size: 44px;
    margin-bottom: 12px;
}

.hero p {
    font-size: 18px;
    color: #666;
}

.cta, .hero a.cta {
    display: inline-block;
    margin: 24px 8px 0;
    padding: 12px 28px;
    border: none;
    border-radius: 10px;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    font-weight: 600;
    text-decoration: none;
    cursor: pointer;
}

.cta:disabled {
    opacity: 0.6;
    cursor: wait;
}

.secondary {
    color: #667eea;
}

.card {
    background: white;
    border-radius: 15px;
    padding: 20px;
    margin-bottom: 20px;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.06);
}

.card h2 {
    margin-top: 0;
    font-size: 18px;
}

.grid {
    display: grid;
    gap: 16px;
}

.grid.two {
    grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
}

.grid.three {
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
}

.stat-card {
    border-radius: 12px;
    padding: 16px;
    color: white;
}

.tone-blue { background: linear-gradient(135deg, #4facfe 0%, #00f2fe 100%); }
.tone-green { background: linear-gradient(135deg, #43e97b 0%, #38f9d7 100%); }
.tone-purple { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); }
.tone-red { background: linear-gradient(135deg, #f5576c 0%, #f093fb 100%); }

.stat-label {
    margin: 0;
    font-size: 13px;
    opacity: 0.85;
}

.stat-value {
    margin: 6px 0 0;
    font-size: 26px;
    font-weight: 700;
}

.stat-row {
    display: flex;
    justify-content: space-between;
    padding: 6px 0;
}

.stat-row-value {
    font-family: 'Courier New', monospace;
    font-weight: 600;
}

.details {
    margin-top: 18px;
}

.stat-group h3 {
    margin: 0 0 6px;
    font-size: 15px;
    color: #555;
}

.total {
    border-top: 1px solid #eee;
    margin-top: 6px;
}

.pickers {
    display: flex;
    flex-wrap: wrap;
    gap: 20px;
    margin-bottom: 16px;
}

.chart-canvas {
    max-width: 100%;
}

.loading {
    display: flex;
    flex-direction: column;
    align-items: center;
    padding: 60px;
    color: #666;
}

.spinner {
    width: 40px;
    height: 40px;
    border: 4px solid #e0e0e0;
    border-top-color: #667eea;
    border-radius: 50%;
    animation: spin 1s linear infinite;
}

@keyframes spin {
    to { transform: rotate(360deg); }
}

.failure {
    border-left: 4px solid #f5576c;
}

.failure-reason, .muted, .footnote {
    color: #888;
    font-size: 13px;
}

.optimize-form label {
    display: flex;
    flex-direction: column;
    gap: 6px;
    margin-bottom: 12px;
    font-size: 14px;
}

.optimize-form input, .optimize-form select, .pickers select {
    padding: 8px 10px;
    border: 1px solid #ddd;
    border-radius: 8px;
    font-size: 14px;
}

.backend-status {
    font-size: 14px;
}

.weights {
    width: 100%;
    margin-top: 16px;
    border-collapse: collapse;
}

.weights th, .weights td {
    padding: 8px;
    border-bottom: 1px solid #eee;
    text-align: left;
}

.numeric {
    font-family: 'Courier New', monospace;
    text-align: right;
}

.not-found {
    text-align: center;
    padding: 80px 20px;
}
"#;
