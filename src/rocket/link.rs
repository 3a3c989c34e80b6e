use rocket::http::Status;
use rocket::response::content::RawText;

use crate::config::Config;
use crate::discord::guild::GuildAdd;
use crate::discord::Discord;
use crate::steam::{Steam, SteamId, DESKTOP_INSTANCE};

const AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";

#[derive(rocket::response::Responder)]
pub(in super) enum Responder {
    Page(RawText<String>),
    Err((Status, RawText<String>)),
}

/// The provider sent the user back with an OAuth2 error instead of a code.
#[rocket::get("/?<error>&<error_description>", rank = 0)]
pub(in super) async fn oauth_err(error: &str, error_description: Option<&str>, config: &rocket::State<Config>) -> (Status, RawText<String>) {
    error_page(config, error_description.unwrap_or(error))
}

/// OAuth2 result callback: run the full linking chain.
#[rocket::get("/?<code>", rank = 1)]
pub(in super) async fn oauth_code(
    code: &str,
    config: &rocket::State<Config>,
    discord: &rocket::State<Discord>,
    steam: &rocket::State<Steam>,
) -> Responder {
    match link(code, discord.inner(), steam.inner()).await {
        Ok(linked) => {
            tracing::info!("linked <@{}> to {}", linked.user_id, linked.profile_url);
            Responder::Page(RawText(SUCCESS_PAGE.to_string()))
        }
        Err(err) => {
            tracing::warn!("Failed to link Steam account: {err:#}");
            Responder::Err(error_page(config, &err.root_cause().to_string()))
        }
    }
}

/// Not an OAuth2 result at all: send the user into the authorization flow.
#[rocket::get("/", rank = 2)]
pub(in super) async fn oauth_start(config: &rocket::State<Config>) -> rocket::response::Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", crate::discord::SCOPES)
        .finish();
    rocket::response::Redirect::temporary(format!("{AUTHORIZE_URL}?{query}"))
}

struct Linked {
    user_id: String,
    profile_url: String,
}

/// The sequential linking chain. Every call depends on the result of the one
/// before it, so each is awaited in turn and the first failure aborts the
/// rest.
async fn link(code: &str, discord: &Discord, steam: &Steam) -> ::anyhow::Result<Linked> {
    let token = discord.exchange_code(code).await?;
    let user = discord.current_user(&token.access_token).await?;
    let connections = discord.connections(&token.access_token).await?;
    let connection = connections
        .into_iter()
        .find(|connection| connection.kind == "steam")
        .ok_or_else(|| ::anyhow::format_err!("You must link your Steam account in your Discord settings"))?;

    // Discord hands out the raw community id; force the desktop instance to
    // get the canonical 64-bit id before talking to Steam.
    let steam_id = connection
        .id
        .parse::<SteamId>()
        .map_err(|_| ::anyhow::format_err!("Invalid Steam account id"))?
        .with_instance(DESKTOP_INSTANCE);
    steam.verify_public_profile(steam_id).await?;
    let profile_url = steam.profile_url(steam_id);

    if discord.add_guild_member(&user.id, &token.access_token).await? == GuildAdd::AlreadyMember {
        discord.add_member_role(&user.id).await?;
    }
    discord.log_link(&user.id, &profile_url).await?;

    Ok(Linked {
        user_id: user.id,
        profile_url,
    })
}

const SUCCESS_PAGE: &str = r#"
    ~ Guild Gate ~

    Authentication was successful
"#;

fn error_page(config: &Config, message: &str) -> (Status, RawText<String>) {
    (
        Status::BadRequest,
        RawText(format!(
            r#"
    ~ Guild Gate ~

    Ran into an error:
        {message}

    It's very possible that trying again will fix it:
        {redirect_uri}

    If it doesn't, please contact administrators
"#,
            redirect_uri = config.redirect_uri
        )),
    )
}
