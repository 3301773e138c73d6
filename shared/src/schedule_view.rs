//! Pure view model for the schedule panel.
//!
//! `ScheduleView::build` takes everything the panel depends on and returns
//! plain data; the Yew component only paints it, so the same inputs always
//! produce the same markup.

use crate::dates::format_day_label;
use crate::models::{Lesson, Schedule};
use crate::selection::{GroupIndex, LinkTarget, ScheduleMode, SelectionState};
use chrono::NaiveDate;

pub const NO_LESSONS_TEXT: &str = "Нет занятий в этот день";

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleView {
    pub header: String,
    pub body: ScheduleBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleBody {
    /// Exactly one "no lessons" node
    Placeholder(&'static str),
    Lessons(Vec<LessonView>),
}

/// A clickable teacher or group name
#[derive(Debug, Clone, PartialEq)]
pub struct LinkView {
    pub label: String,
    pub target: LinkTarget,
    pub aria_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonView {
    pub time: String,
    pub subject: String,
    pub kind: String,
    pub classroom: String,
    pub teacher: String,
    /// Set in groups mode
    pub teacher_link: Option<LinkView>,
    /// Set in teachers mode when the group is known
    pub group_link: Option<LinkView>,
    pub aria_label: String,
}

impl ScheduleView {
    pub fn build(
        schedule: Option<&Schedule>,
        date: NaiveDate,
        state: &SelectionState,
        groups: &GroupIndex,
    ) -> Self {
        let header = header_text(schedule, date, state, groups);
        let lessons = schedule.map(|s| s.lessons.as_slice()).unwrap_or_default();

        let body = if lessons.is_empty() {
            ScheduleBody::Placeholder(NO_LESSONS_TEXT)
        } else {
            ScheduleBody::Lessons(
                sorted_by_time(lessons)
                    .into_iter()
                    .enumerate()
                    .map(|(position, lesson)| lesson_view(position, lesson, state.mode(), groups))
                    .collect(),
            )
        };

        Self { header, body }
    }

    pub fn lessons(&self) -> &[LessonView] {
        match &self.body {
            ScheduleBody::Lessons(lessons) => lessons,
            ScheduleBody::Placeholder(_) => &[],
        }
    }
}

/// Key comparing "9:00" and "09:00" equally
pub fn time_sort_key(time: &str) -> String {
    let time = time.trim();
    match time.split_once(':') {
        Some((hours, minutes)) if hours.len() < 2 => format!("{:0>2}:{}", hours, minutes),
        _ => time.to_string(),
    }
}

/// Stable sort by zero-padded start time; equal times keep backend order.
pub fn sorted_by_time(lessons: &[Lesson]) -> Vec<&Lesson> {
    let mut sorted: Vec<&Lesson> = lessons.iter().collect();
    sorted.sort_by_key(|lesson| time_sort_key(&lesson.time));
    sorted
}

fn header_text(
    schedule: Option<&Schedule>,
    date: NaiveDate,
    state: &SelectionState,
    groups: &GroupIndex,
) -> String {
    let mut header = match schedule {
        Some(schedule) if !schedule.date.trim().is_empty() => schedule.date.clone(),
        _ => format_day_label(date),
    };

    let label = match state.mode() {
        ScheduleMode::Groups => state.selected_group_id().and_then(|id| groups.name(id)),
        ScheduleMode::Teachers => state.selected_teacher_name(),
    };
    if let Some(label) = label {
        header.push_str(" — ");
        header.push_str(label);
    }
    header
}

fn lesson_view(position: usize, lesson: &Lesson, mode: ScheduleMode, groups: &GroupIndex) -> LessonView {
    let teacher_link = (mode == ScheduleMode::Groups && !lesson.teacher.trim().is_empty()).then(|| LinkView {
        label: lesson.teacher.clone(),
        target: LinkTarget::Teacher(lesson.teacher.clone()),
        aria_label: format!("Переключиться на расписание преподавателя {}", lesson.teacher),
    });

    let group_link = match (mode, lesson.group_id) {
        (ScheduleMode::Teachers, Some(id)) => groups.name(id).map(|name| LinkView {
            label: name.to_string(),
            target: LinkTarget::Group(id),
            aria_label: format!("Переключиться на расписание группы {}", name),
        }),
        _ => None,
    };

    LessonView {
        time: lesson.time.clone(),
        subject: lesson.subject.clone(),
        kind: lesson.kind.clone(),
        classroom: lesson.classroom.clone(),
        teacher: lesson.teacher.clone(),
        teacher_link,
        group_link,
        aria_label: format!("Занятие {}: {}", position + 1, lesson.subject),
    }
}
