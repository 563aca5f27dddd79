use log::{debug, info, warn};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{Result, ScrapeError};
use crate::http::Transport;

/// Messages the API puts in `{"message": ...}` when the cookie needs renewing.
pub const TOKEN_INVALID_MESSAGES: &[&str] = &["The cookie is expired", "The cookie is missing"];

/// True when `body` is the API telling us to fetch a new cookie.
pub fn is_token_invalid(body: &Value) -> bool {
    body.get("message")
        .and_then(Value::as_str)
        .map_or(false, |msg| TOKEN_INVALID_MESSAGES.contains(&msg))
}

fn check_token(body: Value) -> Result<Value> {
    if is_token_invalid(&body) {
        let msg = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(ScrapeError::AuthExpired(msg));
    }
    Ok(body)
}

pub struct Gateway<S: Transport> {
    session: S,
    cookie_url: String,
}

impl<S: Transport> Gateway<S> {
    /// Takes ownership of the session; its cookie jar is the token.
    pub fn new(session: S, api: &ApiConfig) -> Self {
        Gateway {
            session,
            cookie_url: api.cookie_url(),
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// GET `url` and parse the body as JSON, renewing the cookie at most once.
    pub fn fetch(&self, url: &str) -> Result<Value> {
        match self.get_json(url).and_then(check_token) {
            Err(ScrapeError::AuthExpired(msg)) => {
                warn!("Token rejected for {} ({}). Refreshing cookie.", url, msg);
                self.refresh()?;
                self.get_json(url)
            }
            other => other,
        }
    }

    /// Ask the API for a new cookie. The session stores it as a side effect.
    pub fn refresh(&self) -> Result<()> {
        let resp = self.session.get(&self.cookie_url)?;
        info!("Cookie refreshed (status {}).", resp.status);
        Ok(())
    }

    // Cookie messages arrive with a 403, so the body is checked before the status.
    fn get_json(&self, url: &str) -> Result<Value> {
        let resp = self.session.get(url)?;
        debug!("{} answered {}", url, resp.status);

        let parsed: std::result::Result<Value, _> = serde_json::from_str(&resp.body);
        match parsed {
            Ok(body) if is_token_invalid(&body) => Ok(body),
            _ if !resp.is_success() => {
                Err(ScrapeError::transport(url, format!("HTTP status {}", resp.status)))
            }
            Ok(body) => Ok(body),
            Err(e) => Err(ScrapeError::malformed(url, format!("body is not JSON: {}", e))),
        }
    }
}
