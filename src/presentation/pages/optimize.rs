use leptos::*;
use std::rc::Rc;
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::application::OptimizeService;
use crate::domain::analytics::Section;
use crate::domain::analytics::format::{fraction_as_percent, ratio};
use crate::domain::errors::ApiError;
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::optimization::{OptimizationMethod, OptimizationOutcome, OptimizeForm};
use crate::presentation::components::{LoadingSpinner, SectionFailure, StatCard};
use crate::presentation::{api_client, use_config};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Checking,
    Online,
    Offline,
}

#[component]
pub fn OptimizePage() -> impl IntoView {
    let config = use_config();
    let service = Rc::new(OptimizeService::new(api_client(&config)));
    let form = create_rw_signal(OptimizeForm::default());
    let result = create_rw_signal(Section::<OptimizationOutcome>::Idle);
    let backend = create_rw_signal(Backend::Checking);

    {
        let service = Rc::clone(&service);
        spawn_local(async move {
            let status = match service.client().health().await {
                Ok(health) if health.is_healthy() => Backend::Online,
                Ok(health) => {
                    get_logger().warn(
                        LogComponent::Presentation("OptimizePage"),
                        &format!("Backend reports status '{}'", health.status),
                    );
                    Backend::Offline
                }
                Err(error) => {
                    get_logger().warn(
                        LogComponent::Presentation("OptimizePage"),
                        &format!("Health check failed: {error}"),
                    );
                    Backend::Offline
                }
            };
            backend.try_set(status);
        });
    }

    let on_submit = {
        let service = Rc::clone(&service);
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let submitted = form.get_untracked();
            result.set(Section::Loading);
            let service = Rc::clone(&service);
            spawn_local(async move {
                match service.submit(&submitted).await {
                    Err(ApiError::Cancelled) => {}
                    outcome => {
                        result.try_set(Section::from_result(outcome));
                    }
                }
            });
        }
    };
    on_cleanup(move || service.cancel_pending());

    let on_method_change = move |ev: ev::Event| {
        match OptimizationMethod::from_str(&event_target_value(&ev)) {
            Ok(method) => form.update(|form| form.method = method),
            Err(_) => get_logger().warn(
                LogComponent::Presentation("OptimizePage"),
                "Ignoring unknown optimization method",
            ),
        }
    };

    view! {
        <div class="page optimize">
            <h1>"⚙️ Optimisation de portefeuille"</h1>
            <p class="backend-status">
                {move || match backend.get() {
                    Backend::Checking => "⏳ Vérification du serveur...",
                    Backend::Online => "🟢 Serveur en ligne",
                    Backend::Offline => "🔴 Serveur injoignable",
                }}
            </p>

            <form class="card optimize-form" on:submit=on_submit>
                <label>
                    "Actions (séparées par des virgules)"
                    <input
                        type="text"
                        placeholder="ATW, IAM, BCP"
                        prop:value=move || form.with(|form| form.symbols.clone())
                        on:input=move |ev| form.update(|form| form.symbols = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Méthode"
                    <select on:change=on_method_change>
                        {OptimizationMethod::iter()
                            .map(|method| {
                                let selected = move || form.with(|form| form.method == method);
                                view! {
                                    <option value=method.as_ref().to_string() prop:selected=selected>
                                        {method.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <div class="grid two">
                    <label>
                        "Poids minimum"
                        <input
                            type="text"
                            inputmode="decimal"
                            prop:value=move || form.with(|form| form.min_weight.clone())
                            on:input=move |ev| form.update(|form| form.min_weight = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Poids maximum"
                        <input
                            type="text"
                            inputmode="decimal"
                            prop:value=move || form.with(|form| form.max_weight.clone())
                            on:input=move |ev| form.update(|form| form.max_weight = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Rendement cible (optionnel)"
                        <input
                            type="text"
                            inputmode="decimal"
                            placeholder="max Sharpe"
                            prop:value=move || form.with(|form| form.target_return.clone())
                            on:input=move |ev| form.update(|form| form.target_return = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Historique (jours)"
                        <input
                            type="text"
                            inputmode="numeric"
                            prop:value=move || form.with(|form| form.lookback_period.clone())
                            on:input=move |ev| form.update(|form| form.lookback_period = event_target_value(&ev))
                        />
                    </label>
                </div>
                <button type="submit" class="cta" disabled=move || result.with(Section::is_loading)>
                    "Optimiser"
                </button>
            </form>

            {move || outcome_view(result.get())}
        </div>
    }
}

fn outcome_view(section: Section<OptimizationOutcome>) -> View {
    match section {
        Section::Idle => ().into_view(),
        Section::Loading => view! { <LoadingSpinner message="Optimisation en cours..."/> }.into_view(),
        Section::Failed(reason) => view! { <SectionFailure title="Résultat" reason=reason/> }.into_view(),
        Section::Loaded(outcome) => {
            let response = &outcome.response;
            let optional = |value: Option<f64>, show: fn(f64) -> String| {
                value.map(show).unwrap_or_else(|| "n/d".to_string())
            };
            let rows = outcome
                .allocations()
                .into_iter()
                .map(|allocation| {
                    view! {
                        <tr>
                            <td>{allocation.symbol}</td>
                            <td class="numeric">{fraction_as_percent(allocation.weight)}</td>
                        </tr>
                    }
                })
                .collect_view();

            view! {
                <div class="card">
                    <h2>{format!("Résultat · {}", response.method_used)}</h2>
                    <div class="grid three">
                        <StatCard label="Rendement attendu" value=fraction_as_percent(response.expected_return) tone="green"/>
                        <StatCard label="Volatilité" value=fraction_as_percent(response.volatility)/>
                        <StatCard label="Sharpe Ratio" value=optional(response.sharpe_ratio, ratio) tone="purple"/>
                        <StatCard label="CVaR" value=optional(response.cvar, fraction_as_percent) tone="red"/>
                        <StatCard label="VaR" value=optional(response.var, fraction_as_percent) tone="red"/>
                        <StatCard label="Diversification" value=optional(response.diversification_ratio, ratio)/>
                    </div>
                    <table class="weights">
                        <thead>
                            <tr><th>"Action"</th><th>"Poids"</th></tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                </div>
            }
            .into_view()
        }
    }
}
