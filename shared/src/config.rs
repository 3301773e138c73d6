use crate::dates::parse_iso;
use chrono::NaiveDate;

/// Headers that carry Telegram `initData`; the backend accepts any of them
pub const INIT_DATA_HEADERS: [&str; 3] = [
    "X-Telegram-InitData",
    "Telegram-Init-Data",
    "X-Telegram-Web-App-Data",
];

/// JSON field added to every POST body
pub const INIT_DATA_BODY_FIELD: &str = "initData";

/// Client-side settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix for every endpoint path; empty means same origin
    pub base_url: String,
    /// Repeated activations of one control inside this window are dropped
    pub activation_window_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            activation_window_ms: 400,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Which page the binary renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Schedule,
    Calendar,
}

/// Options read from the page query string
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaunchParams {
    /// `web=1`: opened in a regular browser
    pub web: bool,
    /// `date=YYYY-MM-DD`
    pub date: Option<NaiveDate>,
    /// `view=calendar`
    pub page: Page,
    /// `debug=1`
    pub debug: bool,
}

impl LaunchParams {
    /// Parse `location.search`, with or without the leading `?`
    pub fn from_query(search: &str) -> Self {
        let mut params = LaunchParams::default();
        let query = search.trim_start_matches('?');

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(value).map(|v| v.into_owned()).unwrap_or_default();
            match key {
                "web" => params.web = value == "1",
                "date" => params.date = parse_iso(&value),
                "view" if value == "calendar" => params.page = Page::Calendar,
                "debug" => params.debug = value == "1",
                _ => {}
            }
        }

        params
    }

    /// Query string for the browser-mode reload, keeping unrelated parameters
    pub fn with_web_flag(search: &str) -> String {
        let query = search.trim_start_matches('?');
        let mut pairs: Vec<&str> = query
            .split('&')
            .filter(|pair| !pair.is_empty() && pair.split('=').next() != Some("web"))
            .collect();
        pairs.push("web=1");
        format!("?{}", pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "");
        assert_eq!(config.activation_window_ms, 400);
        assert_eq!(config.url("/groups/"), "/groups/");

        let remote = ClientConfig::with_base_url("https://raspisanie.space/");
        assert_eq!(remote.url("/whoami"), "https://raspisanie.space/whoami");
    }

    #[test]
    fn test_launch_params() {
        let params = LaunchParams::from_query("?web=1&date=2024-03-15&view=calendar&debug=1");
        assert!(params.web);
        assert!(params.debug);
        assert_eq!(params.page, Page::Calendar);
        assert_eq!(params.date, NaiveDate::from_ymd_opt(2024, 3, 15));

        let params = LaunchParams::from_query("date=tomorrow&web=0");
        assert_eq!(params, LaunchParams::default());
    }

    #[test]
    fn test_with_web_flag() {
        assert_eq!(LaunchParams::with_web_flag(""), "?web=1");
        assert_eq!(LaunchParams::with_web_flag("?date=2024-03-15"), "?date=2024-03-15&web=1");
        assert_eq!(LaunchParams::with_web_flag("?web=0&x=1"), "?x=1&web=1");
    }
}
