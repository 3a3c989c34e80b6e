use super::Discord;

/// Outcome of the guild-member add call, decided by HTTP status: 204 means
/// Discord kept an existing member record untouched, so the role has to be
/// granted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildAdd {
    Joined,
    AlreadyMember,
}

#[derive(Debug, Clone, serde::Serialize)]
struct AddGuildMember<'a> {
    access_token: &'a str,
    roles: [String; 1],
}

impl Discord {
    /// Add the user to the configured guild with the linked role, using their
    /// own access token plus the bot credential.
    pub async fn add_guild_member(&self, user_id: &str, access_token: &str) -> ::anyhow::Result<GuildAdd> {
        let response = self
            .client
            .put(self.api_url(&format!("guilds/{}/members/{user_id}", self.guild_id)))
            .header(reqwest::header::AUTHORIZATION, self.bot_auth())
            .json(&AddGuildMember {
                access_token,
                roles: [self.role_id.to_string()],
            })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(Self::api_error(status, &body));
        }
        if status == reqwest::StatusCode::NO_CONTENT {
            Ok(GuildAdd::AlreadyMember)
        } else {
            Ok(GuildAdd::Joined)
        }
    }

    /// Grant the linked role to a user who was already a guild member.
    pub async fn add_member_role(&self, user_id: &str) -> ::anyhow::Result<()> {
        let response = self
            .client
            .put(self.api_url(&format!(
                "guilds/{}/members/{user_id}/roles/{}",
                self.guild_id, self.role_id
            )))
            .header(reqwest::header::AUTHORIZATION, self.bot_auth())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(Self::api_error(status, &body));
        }
        Ok(())
    }
}
