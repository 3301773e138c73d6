use chrono::{Datelike, NaiveDate};
use shared::dates::{clamped_date, month_name};
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::activate_button::ActivateButton;

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    /// Date the selects start at
    pub current_date: NaiveDate,
    pub on_confirm: Callback<NaiveDate>,
    pub on_cancel: Callback<()>,
}

fn select_value(e: &Event) -> Option<u32> {
    e.target()
        .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
        .and_then(|select| select.value().parse().ok())
}

/// Modal with day, month and year selects
#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
    let day = use_state(|| props.current_date.day());
    let month = use_state(|| props.current_date.month());
    let year = use_state(|| props.current_date.year());

    let on_day = {
        let day = day.clone();
        Callback::from(move |e: Event| {
            if let Some(value) = select_value(&e) {
                day.set(value);
            }
        })
    };

    let on_month = {
        let month = month.clone();
        Callback::from(move |e: Event| {
            if let Some(value) = select_value(&e) {
                month.set(value);
            }
        })
    };

    let on_year = {
        let year = year.clone();
        Callback::from(move |e: Event| {
            if let Some(value) = select_value(&e) {
                year.set(value as i32);
            }
        })
    };

    let confirm = {
        let on_confirm = props.on_confirm.clone();
        let (day, month, year) = (*day, *month, *year);
        Callback::from(move |_: ()| match clamped_date(year, month, day) {
            Some(date) => on_confirm.emit(date),
            None => log::warn!("Invalid date picked: {}-{}-{}", year, month, day),
        })
    };

    let this_year = props.current_date.year();

    html! {
        <div class="modal-overlay">
            <div class="modal date-picker" role="dialog" aria-label="Выбор даты">
                <div class="date-picker-selects">
                    <select id="daySelect" aria-label="День" onchange={on_day}>
                        { for (1..=31u32).map(|d| html! {
                            <option value={d.to_string()} selected={d == *day}>{d}</option>
                        }) }
                    </select>
                    <select id="monthSelect" aria-label="Месяц" onchange={on_month}>
                        { for (1..=12u32).map(|m| html! {
                            <option value={m.to_string()} selected={m == *month}>{month_name(m)}</option>
                        }) }
                    </select>
                    <select id="yearSelect" aria-label="Год" onchange={on_year}>
                        { for (this_year - 1..=this_year + 1).map(|y| html! {
                            <option value={y.to_string()} selected={y == *year}>{y}</option>
                        }) }
                    </select>
                </div>
                <div class="modal-actions">
                    <ActivateButton class="btn btn-secondary" on_activate={props.on_cancel.clone()}>
                        {"Отмена"}
                    </ActivateButton>
                    <ActivateButton class="btn btn-primary" on_activate={confirm}>
                        {"Выбрать"}
                    </ActivateButton>
                </div>
            </div>
        </div>
    }
}
