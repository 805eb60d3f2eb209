use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod cta;
mod error;
mod reveal;
mod components {
    pub mod hero_stats;
    pub mod navbar;
}
mod pages {
    pub mod landing;
}

use pages::landing::Landing;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Landing,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        // Single page; anything else lands on it too.
        Route::Landing | Route::NotFound => html! { <Landing /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("anita landing starting");
    yew::Renderer::<App>::new().render();
}
