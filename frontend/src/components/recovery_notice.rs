use shared::PublicConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RecoveryNoticeProps {
    pub public_config: PublicConfig,
}

/// Shown instead of the schedule once the backend refused our init data
#[function_component(RecoveryNotice)]
pub fn recovery_notice(props: &RecoveryNoticeProps) -> Html {
    html! {
        <section id="schedule" class="schedule-panel recovery" role="alert">
            <p>{"Авторизация через Telegram не пройдена."}</p>
            <p>{"Закройте приложение и откройте его снова через бота."}</p>
            if let Some(link) = props.public_config.reopen_link() {
                <a class="btn btn-primary" href={link}>{"Открыть в Telegram"}</a>
            }
        </section>
    }
}
