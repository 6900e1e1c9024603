use leptos::html::Canvas;
use leptos::*;
use wasm_bindgen::JsValue;

use crate::domain::analytics::{ChartPoint, NamedValue, PerformanceBar};
use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::rendering::CanvasRenderer;

#[component]
pub fn LoadingSpinner(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner"></div>
            <p>{message}</p>
        </div>
    }
}

/// Inline note shown in place of a section whose fetch failed.
#[component]
pub fn SectionFailure(title: &'static str, #[prop(into)] reason: String) -> impl IntoView {
    view! {
        <div class="card failure">
            <h2>{title}</h2>
            <p class="failure-reason">"⚠️ Données indisponibles: " {reason}</p>
        </div>
    }
}

#[component]
pub fn StatCard(
    label: &'static str,
    #[prop(into)] value: String,
    #[prop(default = "blue")] tone: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("stat-card tone-{tone}")>
            <p class="stat-label">{label}</p>
            <p class="stat-value">{value}</p>
        </div>
    }
}

#[component]
pub fn StatRow(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="stat-row">
            <span class="stat-row-label">{label}</span>
            <span class="stat-row-value">{value}</span>
        </div>
    }
}

fn paint(canvas_ref: NodeRef<Canvas>, draw: impl FnOnce(&CanvasRenderer) -> Result<(), JsValue>) {
    let Some(canvas) = canvas_ref.get() else {
        return;
    };
    let result = CanvasRenderer::new(&canvas).and_then(|renderer| draw(&renderer));
    if let Err(error) = result {
        get_logger().error(
            LogComponent::Presentation("Chart"),
            &format!("❌ Canvas render failed: {error:?}"),
        );
    }
}

#[component]
pub fn PieChart(#[prop(into)] data: Signal<Vec<NamedValue>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    create_effect(move |_| {
        let slices = data.get();
        paint(canvas_ref, |renderer| renderer.render_pie(&slices));
    });

    view! { <canvas node_ref=canvas_ref class="chart-canvas" width="520" height="300"/> }
}

#[component]
pub fn BarChart(#[prop(into)] data: Signal<Vec<PerformanceBar>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    create_effect(move |_| {
        let bars = data.get();
        paint(canvas_ref, |renderer| renderer.render_bars(&bars));
    });

    view! { <canvas node_ref=canvas_ref class="chart-canvas" width="900" height="300"/> }
}

#[component]
pub fn LineChart(#[prop(into)] data: Signal<Vec<ChartPoint>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    create_effect(move |_| {
        let points = data.get();
        paint(canvas_ref, |renderer| renderer.render_line(&points));
    });

    view! { <canvas node_ref=canvas_ref class="chart-canvas" width="900" height="300"/> }
}
