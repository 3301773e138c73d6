//! Selection controller: owns the selection state and the group index and
//! keeps them in sync with the backend.
//!
//! State lives in `RefCell`s that are only borrowed between awaits, so the
//! controller can be shared by every UI callback through an `Rc`.

use crate::api::{ApiError, DataClient, Endpoint};
use crate::models::{GroupId, Schedule, SelectionUpdate, Teacher};
use crate::request_tracker::RequestTracker;
use crate::schedule_view::ScheduleView;
use crate::selection::{
    GroupIndex, LinkTarget, PickerOptions, ScheduleMode, Selection, SelectionState,
};
use chrono::NaiveDate;
use std::cell::RefCell;

/// Outcome of a schedule reload
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleLoad {
    /// Nothing selected, nothing fetched
    Idle,
    /// A newer request was issued while this one was in flight
    Superseded,
    Rendered(ScheduleView),
}

impl ScheduleLoad {
    pub fn view(self) -> Option<ScheduleView> {
        match self {
            ScheduleLoad::Rendered(view) => Some(view),
            _ => None,
        }
    }
}

pub struct ScheduleController {
    client: DataClient,
    state: RefCell<SelectionState>,
    groups: RefCell<GroupIndex>,
    requests: RequestTracker,
}

impl ScheduleController {
    pub fn new(client: DataClient, today: NaiveDate) -> Self {
        Self {
            client,
            state: RefCell::new(SelectionState::new(today)),
            groups: RefCell::new(GroupIndex::default()),
            requests: RequestTracker::new(),
        }
    }

    pub fn client(&self) -> &DataClient {
        &self.client
    }

    pub fn selection(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    /// Switch between groups and teachers. Clears the selection of the other
    /// mode, reloads the matching index and resets the picker; the schedule
    /// is not fetched until something is picked.
    pub async fn set_mode(&self, mode: ScheduleMode) -> PickerOptions {
        self.state.borrow_mut().set_mode(mode);
        self.requests.invalidate();
        log::info!("Switched to {:?} mode", mode);

        let mut picker = self.load_picker(mode).await;
        picker.selected = None;
        picker
    }

    pub async fn select_group(&self, id: GroupId) -> ScheduleLoad {
        self.state.borrow_mut().select_group(id);
        self.persist_selection().await;
        self.load_schedule().await
    }

    pub async fn select_teacher(&self, name: String) -> ScheduleLoad {
        self.state.borrow_mut().select_teacher(name);
        self.persist_selection().await;
        self.load_schedule().await
    }

    /// A value picked in the entity `<select>`
    pub async fn pick(&self, picker: &PickerOptions, value: &str) -> ScheduleLoad {
        match picker.selection_for(value) {
            Some(Selection::Group(id)) => self.select_group(id).await,
            Some(Selection::Teacher(name)) => self.select_teacher(name).await,
            None => ScheduleLoad::Idle,
        }
    }

    /// Teacher/group link inside a lesson block
    pub async fn follow_link(&self, target: &LinkTarget) -> (PickerOptions, ScheduleLoad) {
        log::info!("Following lesson link to {:?}", target);
        self.state.borrow_mut().follow(target);
        self.persist_selection().await;

        let mode = self.state.borrow().mode();
        let picker = self.load_picker(mode).await;
        let load = self.load_schedule().await;
        (picker, load)
    }

    pub async fn shift_date(&self, days: i64) -> ScheduleLoad {
        self.state.borrow_mut().shift_days(days);
        self.load_schedule().await
    }

    pub async fn set_date(&self, date: NaiveDate) -> ScheduleLoad {
        self.state.borrow_mut().set_date(date);
        self.load_schedule().await
    }

    /// Populate the picker for the current mode, keeping the current
    /// selection highlighted.
    pub async fn current_picker(&self) -> PickerOptions {
        let mode = self.state.borrow().mode();
        self.load_picker(mode).await
    }

    /// Startup: apply the launch date, then restore the saved selection or
    /// fill the picker for the default mode. The entity index is fetched once.
    pub async fn start(&self, launch_date: Option<NaiveDate>) -> (PickerOptions, ScheduleLoad) {
        if let Some(date) = launch_date {
            log::info!("Starting at {}", date);
            self.state.borrow_mut().set_date(date);
        }
        match self.restore_last_selection().await {
            Some(restored) => restored,
            None => (self.current_picker().await, ScheduleLoad::Idle),
        }
    }

    /// One-time restore of the selection saved on the backend. Errors are
    /// swallowed; `None` means nothing was restored.
    pub async fn restore_last_selection(&self) -> Option<(PickerOptions, ScheduleLoad)> {
        let stored = match self.client.stored_selection().await {
            Ok(stored) => stored,
            Err(e) => {
                log::debug!("No stored selection: {}", e);
                return None;
            }
        };

        {
            let mut state = self.state.borrow_mut();
            if let Some(id) = stored.last_selected_group_id {
                state.select_group(id);
            } else if let Some(teacher) = stored.last_selected_teacher.filter(|t| !t.is_empty()) {
                state.select_teacher(teacher);
            } else {
                return None;
            }
        }
        log::info!("Restored last selection: {:?}", self.state.borrow().selection());

        let picker = self.current_picker().await;
        let load = self.load_schedule().await;
        Some((picker, load))
    }

    /// Fetch and build the schedule for the current selection and date.
    /// Failures degrade to the "no lessons" view.
    pub async fn load_schedule(&self) -> ScheduleLoad {
        let snapshot = self.selection();
        let endpoint = match snapshot.selection() {
            None => return ScheduleLoad::Idle,
            Some(Selection::Group(id)) => Endpoint::GroupSchedule {
                id: *id,
                date: snapshot.current_date(),
            },
            Some(Selection::Teacher(name)) => Endpoint::TeacherSchedule {
                name: name.clone(),
                date: snapshot.current_date(),
            },
        };

        let token = self.requests.issue();
        let result = self.client.schedule(&endpoint).await;
        if !self.requests.is_latest(token) {
            log::debug!("Dropping stale response for {}", endpoint.path());
            return ScheduleLoad::Superseded;
        }

        let schedule = match result {
            Ok(schedule) => Some(schedule),
            Err(e) => {
                log_schedule_error(&endpoint, &e);
                None
            }
        };

        ScheduleLoad::Rendered(self.render(schedule.as_ref(), &snapshot))
    }

    fn render(&self, schedule: Option<&Schedule>, state: &SelectionState) -> ScheduleView {
        ScheduleView::build(schedule, state.current_date(), state, &self.groups.borrow())
    }

    async fn load_picker(&self, mode: ScheduleMode) -> PickerOptions {
        match mode {
            ScheduleMode::Groups => {
                self.reload_groups().await;
                let selected = self.state.borrow().selected_group_id();
                PickerOptions::for_groups(&self.groups.borrow(), selected)
            }
            ScheduleMode::Teachers => {
                let teachers = self.load_teachers().await;
                let state = self.state.borrow();
                PickerOptions::for_teachers(&teachers, state.selected_teacher_name())
            }
        }
    }

    /// Rebuild the group index; on failure the previous index is kept
    pub async fn reload_groups(&self) {
        match self.client.groups().await {
            Ok(groups) => {
                log::debug!("Loaded {} groups", groups.len());
                *self.groups.borrow_mut() = GroupIndex::from_groups(&groups);
            }
            Err(e) => log::error!("Failed to load groups: {}", e),
        }
    }

    async fn load_teachers(&self) -> Vec<Teacher> {
        match self.client.teachers().await {
            Ok(teachers) => teachers,
            Err(e) => {
                log::error!("Failed to load teachers: {}", e);
                Vec::new()
            }
        }
    }

    /// Best-effort; the outcome never reaches the user
    async fn persist_selection(&self) {
        let update = {
            let state = self.state.borrow();
            SelectionUpdate {
                group_id: state.selected_group_id(),
                teacher: state.selected_teacher_name().map(str::to_string),
            }
        };
        if let Err(e) = self.client.save_selection(&update).await {
            log::debug!("Could not save last selection: {}", e);
        }
    }
}

fn log_schedule_error(endpoint: &Endpoint, error: &ApiError) {
    match error {
        ApiError::Status(404) => log::info!("No schedule at {}", endpoint.path()),
        e if e.needs_reopen() => log::warn!("Schedule request rejected: {}", e),
        e => log::error!("Failed to load schedule from {}: {}", endpoint.path(), e),
    }
}
