use leptos::*;

use crate::presentation::router::{Link, Route};

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"Cette page n'existe pas."</p>
            <Link to=Route::Home class="cta">"Retour à l'accueil"</Link>
        </div>
    }
}
