use shared::PickerOptions;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EntityPickerProps {
    pub picker: PickerOptions,
    pub on_pick: Callback<String>,
}

/// Group/teacher `<select>`. The first option is the prompt.
#[function_component(EntityPicker)]
pub fn entity_picker(props: &EntityPickerProps) -> Html {
    let select_ref = use_node_ref();

    // Keep the DOM value in sync when options are replaced
    {
        let select_ref = select_ref.clone();
        let selected = props.picker.selected.clone().unwrap_or_default();
        use_effect_with(props.picker.clone(), move |_| {
            if let Some(select) = select_ref.cast::<HtmlSelectElement>() {
                select.set_value(&selected);
            }
            || ()
        });
    }

    let onchange = {
        let on_pick = props.on_pick.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e
                .target()
                .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            let value = select.value();
            if !value.is_empty() {
                on_pick.emit(value);
            }
        })
    };

    let selected = props.picker.selected.as_deref();

    html! {
        <select
            id="groupSelect"
            class="entity-picker"
            ref={select_ref}
            aria-label={props.picker.prompt()}
            {onchange}
        >
            <option value="" selected={selected.is_none()}>{props.picker.prompt()}</option>
            { for props.picker.options.iter().map(|option| html! {
                <option
                    value={option.value.clone()}
                    selected={selected == Some(option.value.as_str())}
                >
                    {option.label.clone()}
                </option>
            }) }
        </select>
    }
}
