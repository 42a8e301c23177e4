use wasm_bindgen::JsValue;
use web_sys::console;


// Routes `log` records to the browser developer console, one console method per level.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => console::error_1(&message),
            log::Level::Warn => console::warn_1(&message),
            log::Level::Info => console::info_1(&message),
            log::Level::Debug | log::Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

// Safe to call more than once: later calls only change the level.
pub fn init_logger(level: log::LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
