use yew::prelude::*;

use super::activate_button::ActivateButton;

#[derive(Properties, PartialEq)]
pub struct DayNavigatorProps {
    pub on_shift: Callback<i64>,
    pub on_open_picker: Callback<()>,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(DayNavigator)]
pub fn day_navigator(props: &DayNavigatorProps) -> Html {
    let previous = {
        let on_shift = props.on_shift.clone();
        Callback::from(move |_: ()| on_shift.emit(-1))
    };
    let next = {
        let on_shift = props.on_shift.clone();
        Callback::from(move |_: ()| on_shift.emit(1))
    };

    html! {
        <nav class="day-navigator">
            <ActivateButton class="nav-btn" aria_label="Предыдущий день" on_activate={previous}>
                {"←"}
            </ActivateButton>
            <ActivateButton class="nav-btn date-btn" aria_label="Выбрать дату" on_activate={props.on_open_picker.clone()}>
                {"📅"}
            </ActivateButton>
            <ActivateButton class="nav-btn" aria_label="Следующий день" on_activate={next}>
                {"→"}
            </ActivateButton>
            if props.loading {
                <span class="loading-indicator" aria-live="polite">{"Загрузка..."}</span>
            }
        </nav>
    }
}
