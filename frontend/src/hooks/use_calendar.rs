use shared::calendar::{CalendarMonth, MonthCursor};
use yew::prelude::*;
use crate::services::date_utils::today;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub cursor: MonthCursor,
    pub month: CalendarMonth,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
}

/// Month navigation for the calendar page. Purely local: changing the month
/// never touches the network.
#[hook]
pub fn use_calendar() -> UseCalendarResult {
    let cursor = use_state(|| MonthCursor::containing(today()));

    let prev_month = {
        let cursor = cursor.clone();
        Callback::from(move |_: MouseEvent| cursor.set(cursor.previous()))
    };

    let next_month = {
        let cursor = cursor.clone();
        Callback::from(move |_: MouseEvent| cursor.set(cursor.next()))
    };

    // Regenerated whenever the cursor moves
    let month = use_memo(*cursor, |cursor| CalendarMonth::generate(*cursor, today()));

    let state = CalendarState {
        cursor: *cursor,
        month: (*month).clone(),
    };

    let actions = UseCalendarActions {
        prev_month,
        next_month,
    };

    UseCalendarResult { state, actions }
}
