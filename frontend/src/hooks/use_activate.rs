use std::rc::Rc;
use shared::activation::{ActivationGuard, Trigger};
use yew::prelude::*;
use crate::services::date_utils::now_ms;

/// Handlers for one interactive control
#[derive(Clone)]
pub struct ActivateHandlers {
    pub onclick: Callback<MouseEvent>,
    pub ontouchstart: Callback<TouchEvent>,
    pub onpointerdown: Callback<PointerEvent>,
}

/// Normalized "activate" event.
///
/// Telegram Desktop does not always synthesize `click`, so the control
/// listens to click, touchstart and pointerdown. The guard makes sure a
/// single tap (which may fire all three) emits `on_activate` once, even when
/// the press is held past the debounce window.
#[hook]
pub fn use_activate(window_ms: u32, on_activate: Callback<()>) -> ActivateHandlers {
    let guard = use_mut_ref(move || ActivationGuard::new(window_ms));

    let activate: Rc<dyn Fn(Trigger)> = {
        let guard = guard.clone();
        Rc::new(move |trigger: Trigger| {
            let fired = {
                let mut guard = guard.borrow_mut();
                let fired = guard.try_activate(now_ms(), trigger);
                guard.finish();
                fired
            };
            if fired {
                on_activate.emit(());
            }
        })
    };

    let onclick = {
        let activate = activate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            activate(Trigger::Click);
        })
    };

    let ontouchstart = {
        let activate = activate.clone();
        Callback::from(move |e: TouchEvent| {
            e.stop_propagation();
            activate(Trigger::Press);
        })
    };

    let onpointerdown = Callback::from(move |e: PointerEvent| {
        e.stop_propagation();
        activate(Trigger::Press);
    });

    ActivateHandlers {
        onclick,
        ontouchstart,
        onpointerdown,
    }
}
