use log::LevelFilter;
use shared::{LaunchParams, Page};
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::calendar::CalendarPage;
use components::date_picker::DatePicker;
use components::day_navigator::DayNavigator;
use components::entity_picker::EntityPicker;
use components::header::Header;
use components::mode_switcher::ModeSwitcher;
use components::recovery_notice::RecoveryNotice;
use components::schedule_panel::SchedulePanel;
use components::web_banner::WebBanner;
use hooks::use_schedule::use_schedule;
use services::logging::Logger;
use services::telegram::{launch_params, redirect_to_web_mode, TelegramWebApp};

#[derive(Properties, PartialEq)]
struct AppProps {
    launch: LaunchParams,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let schedule = use_schedule(props.launch.date);
    let state = &schedule.state;
    let actions = &schedule.actions;

    let picker_open = use_state(|| false);

    let open_picker = {
        let picker_open = picker_open.clone();
        Callback::from(move |_: ()| picker_open.set(true))
    };

    let close_picker = {
        let picker_open = picker_open.clone();
        Callback::from(move |_: ()| picker_open.set(false))
    };

    let confirm_date = {
        let picker_open = picker_open.clone();
        let set_date = actions.set_date.clone();
        Callback::from(move |date| {
            picker_open.set(false);
            set_date.emit(date);
        })
    };

    html! {
        <>
            <Header
                user_line={state.user_line.clone()}
                app_version={state.public_config.app_version.clone()}
            />
            if props.launch.web {
                <WebBanner public_config={state.public_config.clone()} />
            }
            <main class="container">
                <ModeSwitcher mode={state.selection.mode()} on_change={actions.set_mode.clone()} />
                <EntityPicker picker={state.picker.clone()} on_pick={actions.pick.clone()} />
                <DayNavigator
                    on_shift={actions.shift_day.clone()}
                    on_open_picker={open_picker}
                    loading={state.loading}
                />
                if state.reopen_required {
                    <RecoveryNotice public_config={state.public_config.clone()} />
                } else {
                    <SchedulePanel
                        view={state.view.clone()}
                        mode={state.selection.mode()}
                        on_follow={actions.follow_link.clone()}
                    />
                }
            </main>
            if *picker_open {
                <DatePicker
                    current_date={state.selection.current_date()}
                    on_confirm={confirm_date}
                    on_cancel={close_picker}
                />
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
struct RootProps {
    launch: LaunchParams,
}

#[function_component(Root)]
fn root(props: &RootProps) -> Html {
    match props.launch.page {
        Page::Calendar => html! { <CalendarPage /> },
        Page::Schedule => html! { <App launch={props.launch.clone()} /> },
    }
}

fn main() {
    let launch = launch_params();
    Logger::init(if launch.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let host = TelegramWebApp::detect();
    if host.is_telegram() {
        host.ready();
        host.expand();
    } else if !launch.web && launch.page == Page::Schedule {
        match redirect_to_web_mode() {
            Ok(()) => return,
            Err(e) => log::error!("{:#}", e),
        }
    }

    Logger::info_with_component("startup", &format!("Launching with {:?}", launch));
    yew::Renderer::<Root>::with_props(RootProps { launch }).render();
}
