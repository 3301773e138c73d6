use chrono::NaiveDate;
use shared::activation::ActivationGuard;
use shared::{
    ClientConfig, LinkTarget, PickerOptions, PublicConfig, ReopenReason, ScheduleController,
    ScheduleLoad, ScheduleMode, ScheduleView, SelectionState,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::browser_client;
use crate::services::date_utils::{now_ms, today};

pub const NOT_AUTHORIZED_LINE: &str = "Откройте через бота, чтобы авторизоваться";

#[derive(Clone, PartialEq)]
pub struct ScheduleState {
    pub selection: SelectionState,
    pub picker: PickerOptions,
    /// `None` until something is selected
    pub view: Option<ScheduleView>,
    pub loading: bool,
    pub reopen_required: bool,
    pub public_config: PublicConfig,
    pub user_line: Option<String>,
}

pub struct UseScheduleResult {
    pub state: ScheduleState,
    pub actions: UseScheduleActions,
}

#[derive(Clone)]
pub struct UseScheduleActions {
    pub set_mode: Callback<ScheduleMode>,
    /// Raw `<select>` value
    pub pick: Callback<String>,
    pub follow_link: Callback<LinkTarget>,
    pub shift_day: Callback<i64>,
    pub set_date: Callback<NaiveDate>,
}

#[derive(Clone)]
struct Setters {
    selection: UseStateSetter<SelectionState>,
    picker: UseStateSetter<PickerOptions>,
    view: UseStateSetter<Option<ScheduleView>>,
    loading: UseStateSetter<bool>,
}

impl Setters {
    fn apply(&self, controller: &ScheduleController, load: ScheduleLoad) {
        self.selection.set(controller.selection());
        match load {
            // A newer request owns the view and the spinner
            ScheduleLoad::Superseded => {}
            ScheduleLoad::Idle => {
                self.view.set(None);
                self.loading.set(false);
            }
            ScheduleLoad::Rendered(view) => {
                self.view.set(Some(view));
                self.loading.set(false);
            }
        }
    }
}

/// Wires the selection controller into Yew state and runs the startup
/// sequence: public config, launch date, last selection (or the group
/// index), whoami.
#[hook]
pub fn use_schedule(launch_date: Option<NaiveDate>) -> UseScheduleResult {
    let reopen_required = use_state(|| false);

    let controller = {
        let reopen = reopen_required.setter();
        use_memo((), move |_| {
            let on_reopen = Callback::from(move |reason: ReopenReason| {
                log::warn!("Showing reopen instructions ({:?})", reason);
                reopen.set(true);
            });
            ScheduleController::new(browser_client(ClientConfig::default(), on_reopen), today())
        })
    };

    let selection = use_state(|| controller.selection());
    let picker = use_state(|| PickerOptions::empty(ScheduleMode::Groups));
    let view = use_state(|| Option::<ScheduleView>::None);
    let loading = use_state(|| false);
    let public_config = use_state(PublicConfig::default);
    let user_line = use_state(|| Option::<String>::None);

    // Mode switches and link follows reload an index; ignore new ones until
    // the current one lands.
    let in_flight = use_mut_ref(|| ActivationGuard::new(0));

    let setters = Setters {
        selection: selection.setter(),
        picker: picker.setter(),
        view: view.setter(),
        loading: loading.setter(),
    };

    {
        let controller = controller.clone();
        let setters = setters.clone();
        let public_config = public_config.setter();
        let user_line = user_line.setter();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match controller.client().public_config().await {
                    Ok(config) => public_config.set(config),
                    Err(e) => log::warn!("Failed to load public config: {}", e),
                }

                let (options, load) = controller.start(launch_date).await;
                setters.picker.set(options);
                setters.apply(&controller, load);

                if controller.client().reopen_required() {
                    user_line.set(Some(NOT_AUTHORIZED_LINE.to_string()));
                    return;
                }

                match controller.client().whoami().await {
                    Ok(who) => user_line.set(Some(who.display_line())),
                    Err(e) => {
                        log::debug!("whoami failed: {}", e);
                        user_line.set(Some(NOT_AUTHORIZED_LINE.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let set_mode = {
        let controller = controller.clone();
        let setters = setters.clone();
        let in_flight = in_flight.clone();
        Callback::from(move |mode: ScheduleMode| {
            if !in_flight.borrow_mut().try_begin(now_ms()) {
                log::debug!("Mode switch ignored, previous action still running");
                return;
            }
            let controller = controller.clone();
            let setters = setters.clone();
            let in_flight = in_flight.clone();
            spawn_local(async move {
                let options = controller.set_mode(mode).await;
                setters.picker.set(options);
                setters.selection.set(controller.selection());
                if controller.selection().selection().is_none() {
                    setters.view.set(None);
                }
                // The in-flight schedule request, if any, was invalidated
                setters.loading.set(false);
                in_flight.borrow_mut().finish();
            });
        })
    };

    let pick = {
        let controller = controller.clone();
        let setters = setters.clone();
        let current = (*picker).clone();
        Callback::from(move |value: String| {
            let controller = controller.clone();
            let setters = setters.clone();
            let current = current.clone();
            spawn_local(async move {
                setters.loading.set(true);
                let load = controller.pick(&current, &value).await;
                setters.apply(&controller, load);
            });
        })
    };

    let follow_link = {
        let controller = controller.clone();
        let setters = setters.clone();
        Callback::from(move |target: LinkTarget| {
            if !in_flight.borrow_mut().try_begin(now_ms()) {
                log::debug!("Link ignored, previous action still running");
                return;
            }
            let controller = controller.clone();
            let setters = setters.clone();
            let in_flight = in_flight.clone();
            spawn_local(async move {
                setters.loading.set(true);
                let (options, load) = controller.follow_link(&target).await;
                setters.picker.set(options);
                setters.apply(&controller, load);
                in_flight.borrow_mut().finish();
            });
        })
    };

    let shift_day = {
        let controller = controller.clone();
        let setters = setters.clone();
        Callback::from(move |days: i64| {
            let controller = controller.clone();
            let setters = setters.clone();
            spawn_local(async move {
                setters.loading.set(true);
                let load = controller.shift_date(days).await;
                setters.apply(&controller, load);
            });
        })
    };

    let set_date = {
        let controller = controller.clone();
        Callback::from(move |date: NaiveDate| {
            let controller = controller.clone();
            let setters = setters.clone();
            spawn_local(async move {
                setters.loading.set(true);
                let load = controller.set_date(date).await;
                setters.apply(&controller, load);
            });
        })
    };

    let state = ScheduleState {
        selection: (*selection).clone(),
        picker: (*picker).clone(),
        view: (*view).clone(),
        loading: *loading,
        reopen_required: *reopen_required,
        public_config: (*public_config).clone(),
        user_line: (*user_line).clone(),
    };

    let actions = UseScheduleActions {
        set_mode,
        pick,
        follow_link,
        shift_day,
        set_date,
    };

    UseScheduleResult { state, actions }
}
