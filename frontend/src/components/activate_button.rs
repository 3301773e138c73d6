use shared::{ClientConfig, LinkTarget};
use yew::prelude::*;

use crate::hooks::use_activate::use_activate;

#[derive(Properties, PartialEq)]
pub struct ActivateButtonProps {
    /// `button` for controls, `a` for inline links inside lesson blocks
    #[prop_or("button")]
    pub tag: &'static str,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub aria_label: Option<AttrValue>,
    /// Mirrored into `data-teacher` / `data-group`
    #[prop_or_default]
    pub link: Option<LinkTarget>,
    pub on_activate: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

/// Element that reacts to click, touch and pointer input, once per tap.
#[function_component(ActivateButton)]
pub fn activate_button(props: &ActivateButtonProps) -> Html {
    let handlers = use_activate(
        ClientConfig::default().activation_window_ms,
        props.on_activate.clone(),
    );

    let data = props
        .link
        .as_ref()
        .map(|target| (target.data_attribute(), target.data_value()));
    let data_for = |attribute: &str| {
        data.as_ref()
            .filter(|(name, _)| *name == attribute)
            .map(|(_, value)| value.clone())
    };
    let href = (props.tag == "a").then_some("#");
    let role = (props.tag != "button").then_some("button");

    html! {
        <@{props.tag}
            class={props.class.clone()}
            href={href}
            role={role}
            tabindex="0"
            aria-label={props.aria_label.clone()}
            data-teacher={data_for("data-teacher")}
            data-group={data_for("data-group")}
            onclick={handlers.onclick}
            ontouchstart={handlers.ontouchstart}
            onpointerdown={handlers.onpointerdown}
        >
            { props.children.clone() }
        </@>
    }
}
