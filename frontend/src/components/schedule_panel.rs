use shared::{LessonView, LinkTarget, LinkView, ScheduleBody, ScheduleMode, ScheduleView};
use yew::prelude::*;

use super::activate_button::ActivateButton;

#[derive(Properties, PartialEq)]
pub struct SchedulePanelProps {
    /// `None` until a group or teacher is selected
    pub view: Option<ScheduleView>,
    pub mode: ScheduleMode,
    pub on_follow: Callback<LinkTarget>,
}

#[function_component(SchedulePanel)]
pub fn schedule_panel(props: &SchedulePanelProps) -> Html {
    let Some(view) = &props.view else {
        return html! {
            <section id="schedule" class="schedule-panel">
                <p class="schedule-hint">{props.mode.picker_prompt()}</p>
            </section>
        };
    };

    let body = match &view.body {
        ScheduleBody::Placeholder(text) => html! {
            <div class="no-lessons">{*text}</div>
        },
        ScheduleBody::Lessons(lessons) => html! {
            { for lessons.iter().map(|lesson| lesson_block(lesson, &props.on_follow)) }
        },
    };

    html! {
        <section id="schedule" class="schedule-panel" aria-live="polite">
            <h2 class="schedule-header">{view.header.clone()}</h2>
            { body }
        </section>
    }
}

fn lesson_block(lesson: &LessonView, on_follow: &Callback<LinkTarget>) -> Html {
    let teacher = match &lesson.teacher_link {
        Some(link) => link_control(link, on_follow),
        None => html! { {lesson.teacher.clone()} },
    };

    html! {
        <article class="lesson" aria-label={lesson.aria_label.clone()}>
            <div class="lesson-time">{lesson.time.clone()}</div>
            <div class="lesson-subject">{lesson.subject.clone()}</div>
            <div class="lesson-details">
                <span class="lesson-type">{lesson.kind.clone()}</span>
                <span class="lesson-room">{format!("Аудитория: {}", lesson.classroom)}</span>
                <span class="lesson-teacher">{"Преподаватель: "}{teacher}</span>
                if let Some(link) = &lesson.group_link {
                    <span class="lesson-group">{"Группа: "}{link_control(link, on_follow)}</span>
                }
            </div>
        </article>
    }
}

fn link_control(link: &LinkView, on_follow: &Callback<LinkTarget>) -> Html {
    let class = match link.target {
        LinkTarget::Teacher(_) => "teacher-link",
        LinkTarget::Group(_) => "group-link",
    };
    let on_activate = {
        let on_follow = on_follow.clone();
        let target = link.target.clone();
        Callback::from(move |_: ()| on_follow.emit(target.clone()))
    };

    html! {
        <ActivateButton
            tag="a"
            class={class}
            aria_label={link.aria_label.clone()}
            link={link.target.clone()}
            {on_activate}
        >
            {link.label.clone()}
        </ActivateButton>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use shared::schedule_view::NO_LESSONS_TEXT;
    use wasm_bindgen_test::*;
    use web_sys::Element;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn render(view: ScheduleView, mode: ScheduleMode) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        let props = SchedulePanelProps {
            view: Some(view),
            mode,
            on_follow: Callback::noop(),
        };
        yew::Renderer::<SchedulePanel>::with_root_and_props(root.clone(), props).render();
        // Let the scheduler flush the first render
        TimeoutFuture::new(0).await;
        root
    }

    #[wasm_bindgen_test]
    async fn test_placeholder_renders_single_node() {
        let view = ScheduleView {
            header: "Пятница 15.03.2024".to_string(),
            body: ScheduleBody::Placeholder(NO_LESSONS_TEXT),
        };

        let root = render(view, ScheduleMode::Groups).await;

        assert_eq!(root.query_selector_all(".no-lessons").unwrap().length(), 1);
        assert_eq!(root.query_selector_all(".lesson").unwrap().length(), 0);
    }

    #[wasm_bindgen_test]
    async fn test_teacher_link_carries_encoded_name() {
        let target = LinkTarget::Teacher("Иванов И.И.".to_string());
        let lesson = LessonView {
            time: "09:00".to_string(),
            subject: "Математика".to_string(),
            kind: "Лекция".to_string(),
            classroom: "301".to_string(),
            teacher: "Иванов И.И.".to_string(),
            teacher_link: Some(LinkView {
                label: "Иванов И.И.".to_string(),
                target: target.clone(),
                aria_label: "Переключиться на расписание преподавателя Иванов И.И.".to_string(),
            }),
            group_link: None,
            aria_label: "Занятие 1: Математика".to_string(),
        };
        let view = ScheduleView {
            header: "Пятница 15.03.2024 — IST-101".to_string(),
            body: ScheduleBody::Lessons(vec![lesson]),
        };

        let root = render(view, ScheduleMode::Groups).await;

        let link = root.query_selector("a.teacher-link").unwrap().unwrap();
        let raw = link.get_attribute("data-teacher").unwrap();
        assert_eq!(LinkTarget::from_data("data-teacher", &raw), Some(target));
        assert_eq!(root.query_selector_all(".lesson").unwrap().length(), 1);
    }
}
