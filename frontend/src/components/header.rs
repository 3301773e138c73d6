use yew::prelude::*;

use shared::dates::format_today_label;
use crate::services::date_utils::today;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    /// "Ваш ID: …" or the "open through the bot" hint; `None` while loading
    pub user_line: Option<String>,
    pub app_version: Option<String>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Расписание занятий"}</h1>
                <div class="header-right">
                    <span class="today-label">{format_today_label(today())}</span>
                    if let Some(line) = &props.user_line {
                        <span class="user-info">{line.clone()}</span>
                    }
                    if let Some(version) = &props.app_version {
                        <span class="app-version">{format!("v{}", version)}</span>
                    }
                </div>
            </div>
        </header>
    }
}
