//! Platform-independent core of the schedule Mini App: wire models, the
//! selection state machine, the authenticated data client and the pure view
//! models painted by the Yew frontend.

pub mod activation;
pub mod api;
pub mod calendar;
pub mod config;
pub mod controller;
pub mod dates;
pub mod models;
pub mod request_tracker;
pub mod schedule_view;
pub mod selection;

pub use api::{ApiError, AuthSource, DataClient, RecoveryNotifier, ReopenReason, Transport};
pub use config::{ClientConfig, LaunchParams, Page};
pub use controller::{ScheduleController, ScheduleLoad};
pub use models::*;
pub use schedule_view::{LessonView, LinkView, ScheduleBody, ScheduleView};
pub use selection::{GroupIndex, LinkTarget, PickerOptions, ScheduleMode, Selection, SelectionState};
