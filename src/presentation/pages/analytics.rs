use leptos::*;
use std::rc::Rc;
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::application::AnalyticsService;
use crate::domain::analytics::format::{billions_mad, fraction_as_percent, millions, percent, ratio, signed_percent};
use crate::domain::analytics::{
    AnalyticsState, MarketOverview, NamedValue, OpcvmSummary, PerformanceBar, Period, Section,
    StockStatistics, StocksSummary, Symbol, statistics_groups,
};
use crate::domain::logging::{LogComponent, get_logger};
use crate::presentation::components::{
    BarChart, LineChart, LoadingSpinner, PieChart, SectionFailure, StatCard, StatRow,
};
use crate::presentation::{api_client, use_config};

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let config = use_config();
    let service = Rc::new(AnalyticsService::new(api_client(&config)));
    let state = create_rw_signal(AnalyticsState::new(config.initial_selection()));

    // Bulk batch, once per mount.
    state.update(|state| state.begin_overview());
    {
        let service = Rc::clone(&service);
        spawn_local(async move {
            let batch = service.load_overview().await;
            state.try_update(|state| state.apply_overview(batch));
        });
    }

    // Per-symbol batch, whenever the selection actually changes.
    let selection = create_memo(move |_| state.with(|state| state.selection().clone()));
    {
        let service = Rc::clone(&service);
        create_effect(move |_| {
            let selection = selection.get();
            state.update(|state| {
                state.begin_symbol();
            });
            let service = Rc::clone(&service);
            spawn_local(async move {
                if let Some(batch) = service.load_symbol(selection).await {
                    state.try_update(|state| state.apply_symbol(batch));
                }
            });
        });
    }
    on_cleanup(move || service.cancel_pending());

    let on_symbol_change = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        match Symbol::new(&value) {
            Ok(symbol) => state.update(|state| {
                state.select_symbol(symbol);
            }),
            Err(error) => get_logger().warn(
                LogComponent::Presentation("AnalyticsPage"),
                &format!("Ignoring symbol '{value}': {error}"),
            ),
        }
    };
    let on_period_change = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        match Period::from_str(&value) {
            Ok(period) => state.update(|state| {
                state.select_period(period);
            }),
            Err(_) => get_logger().warn(
                LogComponent::Presentation("AnalyticsPage"),
                &format!("Ignoring unknown period '{value}'"),
            ),
        }
    };

    let loading = create_memo(move |_| state.with(AnalyticsState::is_loading));
    let market_overview = create_memo(move |_| state.with(|state| state.market_overview.clone()));
    let stocks_summary = create_memo(move |_| state.with(|state| state.stocks_summary.clone()));
    let opcvm_summary = create_memo(move |_| state.with(|state| state.opcvm_summary.clone()));
    let statistics = create_memo(move |_| state.with(|state| state.statistics.clone()));
    let sector_slices = create_memo(move |_| state.with(AnalyticsState::sector_slices));
    let performer_bars = create_memo(move |_| state.with(AnalyticsState::performer_bars));
    let chart_points = create_memo(move |_| state.with(AnalyticsState::chart_points));
    let symbol_options = create_memo(move |_| state.with(AnalyticsState::symbol_options));

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! { <LoadingSpinner message="Chargement des données..."/> }
        >
            <div class="page analytics">
                <h1>"📊 Analytics & Visualisations"</h1>

                {move || market_overview_card(market_overview.get())}

                <div class="grid two">
                    {move || sector_card(stocks_summary.get(), sector_slices.into())}
                    {move || market_cap_card(stocks_summary.get())}
                </div>

                <div class="card">
                    <h2>"Analyse d'action"</h2>
                    <div class="pickers">
                        <label>
                            "Sélectionner une action: "
                            <select on:change=on_symbol_change>
                                <For
                                    each=move || symbol_options.get()
                                    key=|symbol| symbol.clone()
                                    children=move |symbol| {
                                        let selected = {
                                            let symbol = symbol.clone();
                                            move || selection.with(|s| s.symbol.value() == symbol)
                                        };
                                        view! {
                                            <option value=symbol.clone() prop:selected=selected>{symbol.clone()}</option>
                                        }
                                    }
                                />
                            </select>
                        </label>
                        <label>
                            "Période: "
                            <select on:change=on_period_change>
                                {Period::iter()
                                    .map(|period| {
                                        let selected = move || selection.with(|s| s.period == period);
                                        view! {
                                            <option value=period.label() prop:selected=selected>{period.label()}</option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </label>
                    </div>

                    <Show when=move || !chart_points.with(Vec::is_empty)>
                        <h3>
                            "Évolution du prix - "
                            {move || selection.with(|s| s.symbol.to_string())}
                        </h3>
                        <LineChart data=chart_points/>
                    </Show>

                    {move || statistics_cards(statistics.get())}
                </div>

                {move || performance_card(opcvm_summary.get(), performer_bars.into())}
            </div>
        </Show>
    }
}

fn market_overview_card(section: Section<MarketOverview>) -> View {
    match section {
        Section::Loaded(overview) => view! {
            <div class="card">
                <h2>"Vue d'ensemble du marché"</h2>
                <div class="grid three">
                    <StatCard
                        label="Actions listées"
                        value=overview.market_statistics.total_listed_stocks.to_string()
                    />
                    <StatCard
                        label="Couverture données"
                        value=percent(overview.market_statistics.coverage_percentage, 1)
                        tone="green"
                    />
                    <StatCard
                        label="Volume 30 jours"
                        value=millions(overview.trading_activity.last_30_days_volume)
                        tone="purple"
                    />
                </div>
            </div>
        }
        .into_view(),
        Section::Failed(reason) => {
            view! { <SectionFailure title="Vue d'ensemble du marché" reason=reason/> }.into_view()
        }
        Section::Idle | Section::Loading => ().into_view(),
    }
}

fn sector_card(section: Section<StocksSummary>, slices: Signal<Vec<NamedValue>>) -> View {
    match section {
        Section::Loaded(summary) if !summary.sectors.is_empty() => view! {
            <div class="card">
                <h2>"Répartition par secteur"</h2>
                <PieChart data=slices/>
            </div>
        }
        .into_view(),
        Section::Failed(reason) => {
            view! { <SectionFailure title="Répartition par secteur" reason=reason/> }.into_view()
        }
        _ => ().into_view(),
    }
}

fn market_cap_card(section: Section<StocksSummary>) -> View {
    let Some(stats) = section.loaded().and_then(|summary| summary.market_cap_statistics.clone()) else {
        return ().into_view();
    };
    view! {
        <div class="card">
            <h2>"Capitalisation boursière"</h2>
            <StatRow label="Moyenne:" value=billions_mad(stats.mean)/>
            <StatRow label="Médiane:" value=billions_mad(stats.median)/>
            <StatRow label="Min:" value=billions_mad(stats.min)/>
            <StatRow label="Max:" value=billions_mad(stats.max)/>
            <div class="total">
                <StatRow label="Total:" value=billions_mad(stats.sum)/>
            </div>
        </div>
    }
    .into_view()
}

fn statistics_cards(section: Section<StockStatistics>) -> View {
    match section {
        Section::Loaded(stats) => {
            let change = stats.price_trend.change_percent;
            let tone = if change >= 0.0 { "green" } else { "red" };
            let groups = statistics_groups(&stats)
                .into_iter()
                .map(|group| {
                    view! {
                        <div class="stat-group">
                            <h3>{group.title}</h3>
                            {group
                                .rows
                                .into_iter()
                                .map(|row| view! { <StatRow label=row.label value=row.value/> })
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view();
            view! {
                <div class="grid three">
                    <StatCard
                        label="Rendement total"
                        value=signed_percent(change)
                        tone=tone
                    />
                    <StatCard
                        label="Volatilité annualisée"
                        value=fraction_as_percent(stats.returns_statistics.volatility_annualized)
                        tone="green"
                    />
                    <StatCard
                        label="Sharpe Ratio"
                        value=ratio(stats.returns_statistics.sharpe_ratio)
                        tone="purple"
                    />
                </div>
                <div class="grid two details">{groups}</div>
            }
            .into_view()
        }
        Section::Loading => view! { <p class="muted">"Chargement..."</p> }.into_view(),
        Section::Failed(reason) => {
            view! { <SectionFailure title="Statistiques" reason=reason/> }.into_view()
        }
        Section::Idle => ().into_view(),
    }
}

fn performance_card(section: Section<OpcvmSummary>, bars: Signal<Vec<PerformanceBar>>) -> View {
    match section {
        Section::Loaded(summary) if !summary.best_performers_1y.is_empty() => view! {
            <div class="card">
                <h2>"Performance OPCVM (1 an)"</h2>
                <BarChart data=bars/>
            </div>
        }
        .into_view(),
        Section::Failed(reason) => {
            view! { <SectionFailure title="Performance OPCVM (1 an)" reason=reason/> }.into_view()
        }
        _ => ().into_view(),
    }
}
