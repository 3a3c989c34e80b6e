use super::Discord;

/// The slice of the authenticated user this service needs.
#[derive(Debug, Clone, serde::Deserialize)]
#[non_exhaustive]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

/// A third-party account linked to the user's Discord profile.
#[derive(Debug, Clone, serde::Deserialize)]
#[non_exhaustive]
pub struct Connection {
    /// The ID of the account on the other side of this connection.
    pub id: String,
    /// The username of the account on the other side of this connection.
    pub name: String,
    /// The service this connection represents (e.g. steam, twitch).
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the user has proven they own the account.
    #[serde(default)]
    pub verified: bool,
}

impl Discord {
    pub async fn current_user(&self, access_token: &str) -> ::anyhow::Result<CurrentUser> {
        self.get_bearer("users/@me", access_token).await
    }

    pub async fn connections(&self, access_token: &str) -> ::anyhow::Result<Vec<Connection>> {
        self.get_bearer("users/@me/connections", access_token).await
    }

    async fn get_bearer<T: serde::de::DeserializeOwned>(&self, path: &str, access_token: &str) -> ::anyhow::Result<T> {
        let response = self
            .client
            .get(self.api_url(path))
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }
        Self::decode(status, &body)
    }
}
