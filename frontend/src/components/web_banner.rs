use shared::PublicConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WebBannerProps {
    pub public_config: PublicConfig,
}

/// Browser mode: point the user at the bot
#[function_component(WebBanner)]
pub fn web_banner(props: &WebBannerProps) -> Html {
    html! {
        <div class="web-banner">
            <span>{"Для полного доступа откройте приложение в Telegram."}</span>
            if let Some(link) = props.public_config.reopen_link() {
                <a href={link} target="_blank" rel="noopener">{"Открыть бота"}</a>
            }
            if let Some(link) = props.public_config.web_client_link() {
                <a href={link} target="_blank" rel="noopener">{"Telegram Web"}</a>
            }
        </div>
    }
}
