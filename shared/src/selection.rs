use crate::models::{Group, GroupId, Teacher};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

/// Which kind of schedule the user is browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleMode {
    Groups,
    Teachers,
}

impl ScheduleMode {
    /// First, empty option of the entity picker
    pub fn picker_prompt(self) -> &'static str {
        match self {
            ScheduleMode::Groups => "Выберите группу",
            ScheduleMode::Teachers => "Выберите преподавателя",
        }
    }
}

/// The chosen group or teacher. Being an enum, a group and a teacher can
/// never be selected at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Group(GroupId),
    Teacher(String),
}

impl Selection {
    pub fn mode(&self) -> ScheduleMode {
        match self {
            Selection::Group(_) => ScheduleMode::Groups,
            Selection::Teacher(_) => ScheduleMode::Teachers,
        }
    }
}

/// Single source of truth for what the schedule view shows.
///
/// Invariant: when a selection exists its kind matches `mode`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    mode: ScheduleMode,
    selection: Option<Selection>,
    current_date: NaiveDate,
}

impl SelectionState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: ScheduleMode::Groups,
            selection: None,
            current_date: today,
        }
    }

    pub fn mode(&self) -> ScheduleMode {
        self.mode
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn selected_group_id(&self) -> Option<GroupId> {
        match self.selection {
            Some(Selection::Group(id)) => Some(id),
            _ => None,
        }
    }

    pub fn selected_teacher_name(&self) -> Option<&str> {
        match &self.selection {
            Some(Selection::Teacher(name)) => Some(name),
            _ => None,
        }
    }

    /// Switch mode, dropping a selection that belongs to the other mode.
    pub fn set_mode(&mut self, mode: ScheduleMode) {
        self.mode = mode;
        if self.selection.as_ref().is_some_and(|s| s.mode() != mode) {
            self.selection = None;
        }
    }

    pub fn select_group(&mut self, id: GroupId) {
        self.apply(Selection::Group(id));
    }

    pub fn select_teacher(&mut self, name: impl Into<String>) {
        self.apply(Selection::Teacher(name.into()));
    }

    /// Apply a selection coming from a lesson link
    pub fn follow(&mut self, target: &LinkTarget) {
        match target {
            LinkTarget::Teacher(name) => self.select_teacher(name.clone()),
            LinkTarget::Group(id) => self.select_group(*id),
        }
    }

    fn apply(&mut self, selection: Selection) {
        self.mode = selection.mode();
        self.selection = Some(selection);
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.current_date = date;
    }

    pub fn shift_days(&mut self, days: i64) {
        if let Some(date) = self.current_date.checked_add_signed(Duration::days(days)) {
            self.current_date = date;
        }
    }
}

/// Group id → display name, rebuilt from every `GET /groups/` response
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupIndex {
    names: HashMap<GroupId, String>,
    order: Vec<GroupId>,
}

impl GroupIndex {
    pub fn from_groups(groups: &[Group]) -> Self {
        let mut index = GroupIndex::default();
        for group in groups {
            if index.names.insert(group.id, group.name.clone()).is_none() {
                index.order.push(group.id);
            }
        }
        index
    }

    pub fn name(&self, id: GroupId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Groups in backend order
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &str)> {
        self.order
            .iter()
            .filter_map(|id| self.names.get(id).map(|name| (*id, name.as_str())))
    }
}

/// What a lesson link switches to when activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Teacher(String),
    Group(GroupId),
}

impl LinkTarget {
    /// Name of the `data-*` attribute carrying the value
    pub fn data_attribute(&self) -> &'static str {
        match self {
            LinkTarget::Teacher(_) => "data-teacher",
            LinkTarget::Group(_) => "data-group",
        }
    }

    /// Percent-encoded value for the `data-*` attribute
    pub fn data_value(&self) -> String {
        match self {
            LinkTarget::Teacher(name) => urlencoding::encode(name).into_owned(),
            LinkTarget::Group(id) => id.to_string(),
        }
    }

    /// Inverse of [`LinkTarget::data_attribute`] + [`LinkTarget::data_value`]
    pub fn from_data(attribute: &str, raw: &str) -> Option<Self> {
        match attribute {
            "data-teacher" => {
                let name = urlencoding::decode(raw).ok()?;
                let name = name.trim();
                (!name.is_empty()).then(|| LinkTarget::Teacher(name.to_string()))
            }
            "data-group" => raw.trim().parse().ok().map(LinkTarget::Group),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
}

/// Contents of the group/teacher `<select>`
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    pub mode: ScheduleMode,
    pub options: Vec<PickerOption>,
    /// `None` shows the prompt option
    pub selected: Option<String>,
}

impl PickerOptions {
    pub fn empty(mode: ScheduleMode) -> Self {
        Self {
            mode,
            options: Vec::new(),
            selected: None,
        }
    }

    pub fn for_groups(index: &GroupIndex, selected: Option<GroupId>) -> Self {
        Self {
            mode: ScheduleMode::Groups,
            options: index
                .iter()
                .map(|(id, name)| PickerOption {
                    value: id.to_string(),
                    label: name.to_string(),
                })
                .collect(),
            selected: selected.map(|id| id.to_string()),
        }
    }

    pub fn for_teachers(teachers: &[Teacher], selected: Option<&str>) -> Self {
        Self {
            mode: ScheduleMode::Teachers,
            options: teachers
                .iter()
                .map(|teacher| PickerOption {
                    value: teacher.name.clone(),
                    label: teacher.name.clone(),
                })
                .collect(),
            selected: selected.map(str::to_string),
        }
    }

    pub fn prompt(&self) -> &'static str {
        self.mode.picker_prompt()
    }

    /// Turn a picked `<option>` value into a selection for this picker's mode.
    /// The empty prompt value yields `None`.
    pub fn selection_for(&self, value: &str) -> Option<Selection> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match self.mode {
            ScheduleMode::Groups => value.parse().ok().map(Selection::Group),
            ScheduleMode::Teachers => Some(Selection::Teacher(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn assert_consistent(state: &SelectionState) {
        assert!(!(state.selected_group_id().is_some() && state.selected_teacher_name().is_some()));
        if let Some(selection) = state.selection() {
            assert_eq!(selection.mode(), state.mode());
        }
    }

    #[test]
    fn test_select_sets_mode_and_clears_other() {
        let mut state = SelectionState::new(today());
        state.select_group(42);
        assert_eq!(state.mode(), ScheduleMode::Groups);
        assert_eq!(state.selected_group_id(), Some(42));

        state.select_teacher("Иванов И.И.");
        assert_eq!(state.mode(), ScheduleMode::Teachers);
        assert_eq!(state.selected_teacher_name(), Some("Иванов И.И."));
        assert_eq!(state.selected_group_id(), None);
        assert_consistent(&state);
    }

    #[test]
    fn test_set_mode_never_leaves_both_fields_set() {
        let mut state = SelectionState::new(today());
        state.select_group(42);

        state.set_mode(ScheduleMode::Groups);
        assert_eq!(state.selected_group_id(), Some(42));
        assert_consistent(&state);

        state.set_mode(ScheduleMode::Teachers);
        assert_eq!(state.mode(), ScheduleMode::Teachers);
        assert_eq!(state.selected_group_id(), None);
        assert_consistent(&state);

        state.select_teacher("Петров П.П.");
        state.set_mode(ScheduleMode::Teachers);
        assert_eq!(state.selected_teacher_name(), Some("Петров П.П."));
        assert_consistent(&state);
    }

    #[test]
    fn test_follow_teacher_link_from_groups_mode() {
        let mut state = SelectionState::new(today());
        state.select_group(42);

        let link = LinkTarget::Teacher("Иванов И.И.".to_string());
        let decoded = LinkTarget::from_data(link.data_attribute(), &link.data_value()).unwrap();
        state.follow(&decoded);

        assert_eq!(state.mode(), ScheduleMode::Teachers);
        assert_eq!(state.selected_teacher_name(), Some("Иванов И.И."));
        assert_eq!(state.selected_group_id(), None);
    }

    #[test]
    fn test_link_data_values_are_encoded() {
        let link = LinkTarget::Teacher("Smith J. & Co".to_string());
        assert_eq!(link.data_value(), "Smith%20J.%20%26%20Co");
        assert_eq!(LinkTarget::from_data("data-group", "17"), Some(LinkTarget::Group(17)));
        assert_eq!(LinkTarget::from_data("data-group", "x"), None);
        assert_eq!(LinkTarget::from_data("data-teacher", ""), None);
        assert_eq!(LinkTarget::from_data("data-room", "1"), None);
    }

    #[test]
    fn test_shift_days() {
        let mut state = SelectionState::new(today());
        state.shift_days(1);
        assert_eq!(state.current_date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
        state.shift_days(-16);
        assert_eq!(state.current_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_group_index_keeps_backend_order() {
        let groups = vec![
            Group { id: 2, name: "ПИ-21".to_string() },
            Group { id: 1, name: "ИСТ-101".to_string() },
        ];
        let index = GroupIndex::from_groups(&groups);
        assert_eq!(index.name(1), Some("ИСТ-101"));
        assert_eq!(index.name(3), None);
        let ids: Vec<_> = index.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_picker_selection_for() {
        let groups = PickerOptions::empty(ScheduleMode::Groups);
        assert_eq!(groups.selection_for("42"), Some(Selection::Group(42)));
        assert_eq!(groups.selection_for(""), None);
        assert_eq!(groups.selection_for("abc"), None);

        let teachers = PickerOptions::empty(ScheduleMode::Teachers);
        assert_eq!(
            teachers.selection_for("Иванов И.И."),
            Some(Selection::Teacher("Иванов И.И.".to_string()))
        );
        assert_eq!(teachers.prompt(), "Выберите преподавателя");
    }
}
