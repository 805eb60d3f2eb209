use yew::prelude::*;

use crate::cta::CtaDispatcher;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub scrolled: bool,
    pub cta: CtaDispatcher,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    html! {
        <nav class={classes!("navbar", props.scrolled.then_some("scrolled"))}>
            <div class="nav-container">
                <div class="nav-logo">
                    <span class="logo-text">{"ANITA"}</span>
                    <span class="logo-subtitle">{"Personal Finance Assistant"}</span>
                </div>
                <div class="nav-links">
                    <a href="#features" class="nav-link">{"Features"}</a>
                    <a href="#how-it-works" class="nav-link">{"How It Works"}</a>
                    <button
                        class="nav-cta"
                        onclick={props.cta.onclick()}
                        ontouchend={props.cta.ontouchend()}
                    >
                        {"Get Started"}
                    </button>
                </div>
            </div>
        </nav>
    }
}
