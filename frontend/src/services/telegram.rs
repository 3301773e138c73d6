use anyhow::{anyhow, Result};
use js_sys::{Function, Reflect};
use shared::{AuthSource, LaunchParams};
use wasm_bindgen::{JsCast, JsValue};

/// Handle on `window.Telegram.WebApp`, if the page runs inside Telegram
pub struct TelegramWebApp {
    web_app: Option<JsValue>,
}

impl TelegramWebApp {
    pub fn detect() -> Self {
        let web_app = web_sys::window()
            .and_then(|window| property(&window.into(), &["Telegram", "WebApp"]).ok())
            .filter(|value| value.is_object());
        Self { web_app }
    }

    /// Signed launch data; `None` outside Telegram or when empty
    pub fn init_data(&self) -> Option<String> {
        let web_app = self.web_app.as_ref()?;
        property(web_app, &["initData"])
            .ok()?
            .as_string()
            .filter(|data| !data.is_empty())
    }

    /// Same test the Telegram clients support: `initData` is defined at all
    pub fn is_telegram(&self) -> bool {
        self.web_app
            .as_ref()
            .and_then(|web_app| property(web_app, &["initData"]).ok())
            .is_some_and(|data| !data.is_undefined())
    }

    pub fn ready(&self) {
        if let Err(e) = self.call("ready") {
            log::warn!("WebApp.ready failed: {}", e);
        }
    }

    pub fn expand(&self) {
        if let Err(e) = self.call("expand") {
            log::warn!("WebApp.expand failed: {}", e);
        }
    }

    fn call(&self, method: &str) -> Result<()> {
        let web_app = self
            .web_app
            .as_ref()
            .ok_or_else(|| anyhow!("Telegram WebApp is not available"))?;
        let function: Function = property(web_app, &[method])?
            .dyn_into()
            .map_err(|_| anyhow!("WebApp.{} is not a function", method))?;
        function
            .call0(web_app)
            .map_err(|e| anyhow!("WebApp.{} threw: {:?}", method, e))?;
        Ok(())
    }
}

/// Reads init data from the host on every request
pub struct TelegramAuth;

impl AuthSource for TelegramAuth {
    fn init_data(&self) -> Option<String> {
        TelegramWebApp::detect().init_data()
    }
}

fn property(root: &JsValue, path: &[&str]) -> Result<JsValue> {
    let mut current = root.clone();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key))
            .map_err(|e| anyhow!("Cannot read {}: {:?}", key, e))?;
        if current.is_undefined() || current.is_null() {
            return Err(anyhow!("{} is not set", key));
        }
    }
    Ok(current)
}

fn location_search() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

pub fn launch_params() -> LaunchParams {
    LaunchParams::from_query(&location_search())
}

/// Reload the page with `web=1` so a browser user gets the web banner
pub fn redirect_to_web_mode() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("No window"))?;
    let search = LaunchParams::with_web_flag(&location_search());
    window
        .location()
        .set_search(&search)
        .map_err(|e| anyhow!("Cannot redirect to web mode: {:?}", e))
}
