use std::str::FromStr;

use serde::Deserialize;

use crate::rust_error;
use crate::web_error_handling::JsResult;


// Settings passed by the host page as a JSON object. Every field is optional.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default)]
pub struct WebClientConfig {
    pub board_selector: String,
    // Derived from the page location when absent.
    pub socket_url: Option<String>,
    pub log_level: String,
}

impl Default for WebClientConfig {
    fn default() -> Self {
        WebClientConfig {
            board_selector: ".chessboard".to_owned(),
            socket_url: None,
            log_level: "info".to_owned(),
        }
    }
}

impl WebClientConfig {
    // Empty or whitespace-only input means "all defaults".
    pub fn from_json(json: &str) -> JsResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|err| rust_error!("Invalid client config: {err}"))
    }

    pub fn log_level_filter(&self) -> JsResult<log::LevelFilter> {
        log::LevelFilter::from_str(&self.log_level)
            .map_err(|_| rust_error!("Invalid log level: \"{}\"", self.log_level))
    }

    pub fn resolve_socket_url(&self, location: &web_sys::Location) -> JsResult<String> {
        match &self.socket_url {
            Some(url) => Ok(url.clone()),
            None => Ok(default_socket_url(&location.protocol()?, &location.host()?)),
        }
    }
}

pub fn default_socket_url(page_protocol: &str, host: &str) -> String {
    let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}/ws")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_url_follows_page_protocol() {
        assert_eq!(default_socket_url("https:", "chess.example.org"), "wss://chess.example.org/ws");
        assert_eq!(default_socket_url("http:", "localhost:8080"), "ws://localhost:8080/ws");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: WebClientConfig = serde_json::from_str(r#"{"log_level":"debug"}"#).unwrap();
        assert_eq!(config.board_selector, ".chessboard");
        assert_eq!(config.socket_url, None);
        assert_eq!(config.log_level, "debug");
    }
}
