use super::Discord;

#[derive(Debug, Copy, Clone, serde::Serialize)]
struct ExecuteWebhook<'a> {
    content: &'a str,
}

impl Discord {
    /// Post the audit message to the logging webhook. Webhook auth lives in
    /// the URL, not in a header.
    pub async fn log_link(&self, user_id: &str, profile_url: &str) -> ::anyhow::Result<()> {
        let content = format!("<@{user_id}> linked to <{profile_url}>");
        let response = self
            .client
            .post(self.api_url(&format!(
                "webhooks/{}/{}",
                self.log_webhook_id, self.log_webhook_token
            )))
            .json(&ExecuteWebhook { content: &content })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(::anyhow::Error::msg(body));
        }
        Ok(())
    }
}
