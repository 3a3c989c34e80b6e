use super::Discord;

/// Form body of the OAuth2 token exchange. Discord wants the client
/// credentials inside the form alongside the grant itself.
#[derive(Debug, Copy, Clone, serde::Serialize)]
#[non_exhaustive]
#[serde(tag = "grant_type", rename_all = "snake_case")]
pub enum TokenRequest<'a> {
    AuthorizationCode {
        client_id: &'a str,
        client_secret: &'a str,
        code: &'a str,
        redirect_uri: &'a str,
        scope: &'a str,
    },
}

#[derive(Debug, Copy, Clone, serde::Deserialize, serde::Serialize, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum TokenType {
    #[serde(alias = "bearer")]
    Bearer,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[non_exhaustive]
pub struct Token {
    pub access_token: String,
    pub token_type: TokenType,
    pub expires_in: u64,
    pub refresh_token: String,
    pub scope: String,
}

/// The token endpoint reports failures as `error`/`error_description`, not
/// the `message` shape the rest of the API uses.
#[derive(Debug, Clone, serde::Deserialize)]
struct TokenFailure {
    error: Option<String>,
    error_description: Option<String>,
}

impl<'a> TokenRequest<'a> {
    pub(crate) async fn request_token(&self, discord: &Discord) -> ::anyhow::Result<Token> {
        let response = discord
            .client
            .post(discord.api_url("oauth2/token"))
            .form(self)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let failure = serde_json::from_slice::<TokenFailure>(&body).ok();
            return Err(match failure.and_then(|failure| failure.error_description.or(failure.error)) {
                Some(description) => ::anyhow::Error::msg(description),
                None => ::anyhow::format_err!("token exchange failed: Status code: {status}"),
            });
        }
        Discord::decode(status, &body)
    }
}

impl Discord {
    /// Exchange an authorization code for a user access token.
    pub async fn exchange_code(&self, code: &str) -> ::anyhow::Result<Token> {
        TokenRequest::AuthorizationCode {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            code,
            redirect_uri: &self.redirect_uri,
            scope: super::SCOPES,
        }
        .request_token(self)
        .await
    }
}
