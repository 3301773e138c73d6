use shared::calendar::{schedule_href, upcoming_weekday_links, QuickLinks, WEEKDAY_HEADERS};
use shared::dates::format_readable;
use yew::prelude::*;

use crate::hooks::use_calendar::use_calendar;
use crate::services::date_utils::today;

/// Days covered by the "upcoming" link list
const UPCOMING_DAYS: u32 = 30;

/// Standalone month view; every weekday cell links to the schedule page.
#[function_component(CalendarPage)]
pub fn calendar_page() -> Html {
    let calendar = use_calendar();
    let month = &calendar.state.month;

    let calendar_days = month.days.iter().map(|day| {
        match (day.href(), day.date) {
            (Some(href), Some(date)) => html! {
                <a class={day.css_class()} href={href} aria-label={day.aria_label()}>
                    <span class="day-number">{date.format("%-d").to_string()}</span>
                </a>
            },
            _ => html! { <div class={day.css_class()} aria-hidden="true"></div> },
        }
    });

    let today = today();
    let quick = QuickLinks::for_today(today);
    let upcoming = upcoming_weekday_links(today, UPCOMING_DAYS);

    html! {
        <div class="calendar-page">
            <div class="calendar-header">
                <button class="nav-btn" aria-label="Предыдущий месяц" onclick={calendar.actions.prev_month}>
                    {"‹"}
                </button>
                <h2 class="calendar-title">{calendar.state.cursor.title()}</h2>
                <button class="nav-btn" aria-label="Следующий месяц" onclick={calendar.actions.next_month}>
                    {"›"}
                </button>
            </div>

            <div class="calendar-grid" role="grid">
                { for WEEKDAY_HEADERS.iter().map(|name| html! {
                    <div class="calendar-weekday">{*name}</div>
                }) }
                { for calendar_days }
            </div>

            <div class="quick-links">
                <a href={schedule_href(quick.tomorrow)}>{"Завтра"}</a>
                <a href={schedule_href(quick.this_week)}>{"Эта неделя"}</a>
                <a href={schedule_href(quick.next_week)}>{"Следующая неделя"}</a>
            </div>

            <ul class="upcoming-links">
                { for upcoming.into_iter().map(|link| html! {
                    <li>
                        <a href={link.href} title={format_readable(link.date)}>{link.text}</a>
                    </li>
                }) }
            </ul>
        </div>
    }
}
