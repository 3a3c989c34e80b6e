pub mod guild;
pub mod token;
pub mod user;
pub mod webhook;

/// OAuth2 scopes requested from Discord. `guilds.join` is what lets the bot
/// add the user to the guild with their own access token.
pub const SCOPES: &str = "identify connections guilds.join";

/// Discord REST client. One instance is built at startup and shared by every
/// request; it holds no mutable state.
#[derive(Debug)]
#[non_exhaustive]
pub struct Discord {
    client: reqwest::Client,
    api_base: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    guild_id: u64,
    role_id: u64,
    bot_token: String,
    log_webhook_id: u64,
    log_webhook_token: String,
}

impl Discord {
    pub fn new(config: &crate::config::Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            guild_id: config.guild_id,
            role_id: config.role_id,
            bot_token: config.bot_token.clone(),
            log_webhook_id: config.log_webhook_id,
            log_webhook_token: config.log_webhook_token.clone(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{path}", self.api_base)
    }

    fn bot_auth(&self) -> String {
        format!("Bot {}", self.bot_token)
    }

    /// Error shape shared by every endpoint outside the OAuth2 token
    /// exchange: a JSON body carrying a human-readable `message`.
    fn api_error(status: reqwest::StatusCode, body: &[u8]) -> ::anyhow::Error {
        match serde_json::from_slice::<ApiFailure>(body)
            .ok()
            .and_then(|failure| failure.message)
        {
            Some(message) => ::anyhow::Error::msg(message),
            None => match core::str::from_utf8(body) {
                Ok(v) => ::anyhow::format_err!("Discord request failed: Status code: {status}, Body: {v}"),
                Err(_) => ::anyhow::format_err!("Discord request failed: Status code: {status}"),
            },
        }
    }

    /// Decode a success body, keeping the status and body text around as
    /// context when the shape is off.
    fn decode<T: serde::de::DeserializeOwned>(status: reqwest::StatusCode, body: &[u8]) -> ::anyhow::Result<T> {
        serde_json::from_slice::<T>(body).map_err(|err| {
            match core::str::from_utf8(body) {
                Ok(v) => ::anyhow::Error::new(err).context(format!("Response Status code: {status}, Response Body: {v}")),
                Err(utf8_err) => ::anyhow::Error::new(err).context(format!("Response Status code: {status}, Response Body: {body:?} ({utf8_err})")),
            }
        })
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[non_exhaustive]
struct ApiFailure {
    message: Option<String>,
    #[allow(dead_code)]
    code: Option<u64>,
}
