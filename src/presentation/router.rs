//! Path-based routing over the History API.

use leptos::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Event};

use crate::domain::logging::{LogComponent, get_logger};
use crate::log_debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Analytics,
    Optimize,
    NotFound,
}

impl Route {
    /// Match a location path. Query string, fragment and a trailing slash are
    /// ignored; unknown paths map to [`Route::NotFound`].
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/analytics" => Self::Analytics,
            "/optimize" => Self::Optimize,
            _ => Self::NotFound,
        }
    }

    /// Canonical path. `NotFound` has none of its own and points home.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home | Self::NotFound => "/",
            Self::Analytics => "/analytics",
            Self::Optimize => "/optimize",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Accueil",
            Self::Analytics => "Analytics",
            Self::Optimize => "Optimiser",
            Self::NotFound => "Page introuvable",
        }
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Current route plus navigation, shared through Leptos context.
#[derive(Debug, Clone, Copy)]
pub struct Navigator {
    route: RwSignal<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self { route: create_rw_signal(initial) }
    }

    pub fn from_location() -> Self {
        Self::new(Route::from_path(&current_path()))
    }

    pub fn route(&self) -> Signal<Route> {
        self.route.into()
    }

    /// Push `route` onto the history stack and switch to it.
    pub fn navigate(&self, route: Route) {
        if self.route.get_untracked() == route {
            return;
        }
        let pushed = web_sys::window()
            .and_then(|window| window.history().ok())
            .map(|history| history.push_state_with_url(&JsValue::NULL, "", Some(route.path())));
        if !matches!(pushed, Some(Ok(()))) {
            get_logger().warn(
                LogComponent::Presentation("Router"),
                &format!("History API unavailable, {} not recorded", route.path()),
            );
        }
        log_debug!(
            LogComponent::Presentation("Router"),
            "🧭 {:?} -> {:?}",
            self.route.get_untracked(),
            route
        );
        self.route.set(route);
    }

    /// Re-read the route from `location`, e.g. after back/forward.
    pub fn sync_with_location(&self) {
        self.route.set(Route::from_path(&current_path()));
    }

    /// Follow back/forward navigation until the owning scope is disposed.
    pub fn listen_popstate(&self) {
        let navigator = *self;
        let listener = PopstateListener::attach(move || navigator.sync_with_location());
        on_cleanup(move || listener.detach());
    }
}

/// Passive `popstate` listener on `window`. Keeps its closure alive until
/// [`detach`](Self::detach), which `leptos::window_event_listener` can't do
/// from `on_cleanup`.
pub struct PopstateListener {
    callback: Closure<dyn FnMut(Event)>,
}

impl PopstateListener {
    pub fn attach(mut on_pop: impl FnMut() + 'static) -> Self {
        let callback = Closure::wrap(Box::new(move |_: Event| on_pop()) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);

        let attached = web_sys::window().map(|window| {
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "popstate",
                callback.as_ref().unchecked_ref(),
                &options,
            )
        });
        if !matches!(attached, Some(Ok(()))) {
            get_logger().warn(
                LogComponent::Presentation("Router"),
                "Could not listen for popstate, back/forward will not update the page",
            );
        }
        Self { callback }
    }

    pub fn detach(self) {
        if let Some(window) = web_sys::window() {
            let _ = window
                .remove_event_listener_with_callback("popstate", self.callback.as_ref().unchecked_ref());
        }
    }
}

pub fn use_navigator() -> Navigator {
    use_context::<Navigator>().unwrap_or_else(|| {
        get_logger().warn(
            LogComponent::Presentation("Router"),
            "No navigator in context, falling back to a detached one",
        );
        Navigator::from_location()
    })
}

/// In-app link. Plain clicks navigate without reloading; modified clicks are
/// left to the browser.
#[component]
pub fn Link(
    to: Route,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let navigator = use_navigator();
    let on_click = move |event: ev::MouseEvent| {
        if event.button() != 0 || event.ctrl_key() || event.meta_key() || event.shift_key() || event.alt_key() {
            return;
        }
        event.prevent_default();
        navigator.navigate(to);
    };

    view! {
        <a href=to.path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
