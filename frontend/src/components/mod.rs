pub mod activate_button;
pub mod calendar;
pub mod date_picker;
pub mod day_navigator;
pub mod entity_picker;
pub mod header;
pub mod mode_switcher;
pub mod recovery_notice;
pub mod schedule_panel;
pub mod web_banner;
