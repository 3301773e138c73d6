use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards `log` records to the browser console, prefixed with the
/// component (record target) that produced them.
pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    /// Install the console logger. Calling it again only changes the level.
    pub fn init(level: LevelFilter) {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(level);
    }

    /// Log under an explicit component name instead of the module path
    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{}", message);
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_init_is_repeatable() {
        Logger::init(LevelFilter::Info);
        Logger::init(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        Logger::info_with_component("logging-test", "console logger installed");
    }
}
