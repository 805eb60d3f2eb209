use yew::prelude::*;

use crate::reveal::counter::HEADLINE;

#[derive(Properties, PartialEq)]
pub struct HeroStatsProps {
    /// Current counter values, in `HEADLINE` order.
    pub values: Vec<u32>,
    pub node: NodeRef,
}

#[function_component(HeroStats)]
pub fn hero_stats(props: &HeroStatsProps) -> Html {
    html! {
        <div class="hero-stats" ref={props.node.clone()}>
            { for HEADLINE.iter().enumerate().map(|(index, (label, _, suffix))| {
                let value = props.values.get(index).copied().unwrap_or(0);
                html! {
                    <div class="stat-item">
                        <div class="stat-number">{format!("{}{}", value, suffix)}</div>
                        <div class="stat-label">{*label}</div>
                    </div>
                }
            }) }
        </div>
    }
}
