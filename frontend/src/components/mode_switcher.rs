use shared::ScheduleMode;
use yew::prelude::*;

use super::activate_button::ActivateButton;

#[derive(Properties, PartialEq)]
pub struct ModeSwitcherProps {
    pub mode: ScheduleMode,
    pub on_change: Callback<ScheduleMode>,
}

fn mode_label(mode: ScheduleMode) -> &'static str {
    match mode {
        ScheduleMode::Groups => "Группы",
        ScheduleMode::Teachers => "Преподаватели",
    }
}

#[function_component(ModeSwitcher)]
pub fn mode_switcher(props: &ModeSwitcherProps) -> Html {
    let button = |mode: ScheduleMode| {
        let on_change = props.on_change.clone();
        let active = props.mode == mode;
        html! {
            <ActivateButton
                class={classes!("mode-btn", active.then_some("active"))}
                aria_label={AttrValue::from(mode_label(mode))}
                on_activate={Callback::from(move |_: ()| on_change.emit(mode))}
            >
                { mode_label(mode) }
            </ActivateButton>
        }
    };

    html! {
        <div class="mode-switcher" role="tablist">
            { button(ScheduleMode::Groups) }
            { button(ScheduleMode::Teachers) }
        </div>
    }
}
