use anyhow::Context;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";
pub const DEFAULT_STEAM_BASE: &str = "https://steamcommunity.com";

/// Everything the linking flow needs, read from the environment once at
/// startup. The upstream bases default to the real services and exist so
/// tests can point the handler at a local mock.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    /// The registered OAuth2 redirect URI. Also shown on error pages as the
    /// retry link.
    pub redirect_uri: String,
    pub guild_id: u64,
    pub role_id: u64,
    pub bot_token: String,
    pub log_webhook_id: u64,
    pub log_webhook_token: String,
    pub api_base: String,
    pub steam_base: String,
}

impl Config {
    pub fn from_env() -> ::anyhow::Result<Self> {
        Ok(Self {
            client_id: var("DISCORD_CLIENT_ID")?,
            client_secret: var("DISCORD_CLIENT_SECRET")?,
            redirect_uri: var("OAUTH_REDIRECT_URI")?,
            guild_id: numeric_var("GUILD_ID")?,
            role_id: numeric_var("ROLE_ID")?,
            bot_token: var("DISCORD_BOT_TOKEN")?,
            log_webhook_id: numeric_var("LOG_WEBHOOK_ID")?,
            log_webhook_token: var("LOG_WEBHOOK_TOKEN")?,
            api_base: var("DISCORD_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            steam_base: var("STEAM_COMMUNITY_BASE").unwrap_or_else(|_| DEFAULT_STEAM_BASE.to_string()),
        })
    }
}

fn var(name: &str) -> ::anyhow::Result<String> {
    ::dotenvy::var(name).with_context(|| format!("missing environment variable {name}"))
}

fn numeric_var(name: &str) -> ::anyhow::Result<u64> {
    var(name)?
        .parse()
        .with_context(|| format!("{name} must be a numeric id"))
}
