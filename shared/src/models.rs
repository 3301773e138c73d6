use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of a student group
pub type GroupId = i64;

/// Student group as listed by `GET /groups/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// Teacher as listed by `GET /teachers/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: String,
}

/// A single class session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Start time, "HH:MM" (the backend sometimes drops the leading zero)
    pub time: String,
    pub subject: String,
    /// Lecture, practice, lab...
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub classroom: String,
    #[serde(default)]
    pub teacher: String,
    /// Only present in teacher schedules
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

/// One day of lessons for a group or a teacher
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Display string chosen by the backend, may be empty
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// Response of `GET /user/selection`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredSelection {
    #[serde(default)]
    pub last_selected_group_id: Option<GroupId>,
    #[serde(default)]
    pub last_selected_teacher: Option<String>,
}

/// Body of `POST /user/selection`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
}

/// The backend answers with a numeric Telegram id, or "public" when
/// anonymous access is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Numeric(id) => write!(f, "{}", id),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

/// Response of `GET /whoami`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhoAmI {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
}

impl WhoAmI {
    /// Line shown under the page header, e.g. "Ваш ID: 1234 @ivan"
    pub fn display_line(&self) -> String {
        let id = self
            .user_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "—".to_string());
        match self.username.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => format!("Ваш ID: {} @{}", id, name),
            None => format!("Ваш ID: {} ", id),
        }
    }
}

/// Response of `GET /config-public`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PublicConfig {
    #[serde(default)]
    pub bot_username: Option<String>,
    #[serde(default)]
    pub app_version: Option<String>,
}

impl PublicConfig {
    fn bot(&self) -> Option<&str> {
        self.bot_username.as_deref().filter(|name| !name.is_empty())
    }

    /// Deep link that opens the Mini App inside Telegram
    pub fn reopen_link(&self) -> Option<String> {
        self.bot().map(|bot| format!("https://t.me/{}?startapp=go", bot))
    }

    /// Link to the bot in Telegram Web
    pub fn web_client_link(&self) -> Option<String> {
        self.bot().map(|bot| format!("https://web.telegram.org/k/#@{}", bot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_decodes_type_field() {
        let json = r#"{"time":"09:00","subject":"Физика","type":"Лекция","classroom":"301","teacher":"Иванов И.И.","id":7}"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.kind, "Лекция");
        assert_eq!(lesson.group_id, None);
    }

    #[test]
    fn test_schedule_tolerates_missing_fields() {
        let schedule: Schedule = serde_json::from_str("{}").unwrap();
        assert!(schedule.lessons.is_empty());
        assert_eq!(schedule.date, "");
    }

    #[test]
    fn test_selection_update_omits_absent_fields() {
        let body = SelectionUpdate {
            group_id: Some(42),
            teacher: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"group_id":42}"#);
    }

    #[test]
    fn test_whoami_display_line() {
        let me: WhoAmI = serde_json::from_str(r#"{"user_id":1234,"username":"ivan"}"#).unwrap();
        assert_eq!(me.display_line(), "Ваш ID: 1234 @ivan");

        let public: WhoAmI = serde_json::from_str(r#"{"user_id":"public"}"#).unwrap();
        assert_eq!(public.display_line(), "Ваш ID: public ");
    }

    #[test]
    fn test_public_config_links() {
        let config = PublicConfig {
            bot_username: Some("rasp_bot".to_string()),
            app_version: None,
        };
        assert_eq!(config.reopen_link().as_deref(), Some("https://t.me/rasp_bot?startapp=go"));
        assert_eq!(
            config.web_client_link().as_deref(),
            Some("https://web.telegram.org/k/#@rasp_bot")
        );
        assert_eq!(PublicConfig::default().reopen_link(), None);
    }
}
