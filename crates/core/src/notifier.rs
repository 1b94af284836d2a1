use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::errors::CoreError;

const POST_URL: &str = "https://api.groupme.com/v3/bots/post";

/// Wire body of a bot post. GroupMe expects exactly these two fields.
#[derive(Debug, Serialize)]
pub struct BotPost<'a> {
    pub bot_id: &'a str,
    pub text: &'a str,
}

/// Posts pre-formatted report text to a GroupMe bot endpoint.
///
/// The core hands this already-formatted text; message layout and emoji
/// belong to the chat glue. GroupMe acknowledges a bot post with 202.
pub struct GroupMeNotifier {
    client: Client,
    bot_id: String,
}

impl GroupMeNotifier {
    pub fn new(bot_id: String) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            bot_id,
        }
    }

    /// Post a message. Any status other than 202 Accepted is an error.
    pub async fn post(&self, text: &str) -> Result<(), CoreError> {
        let response = self
            .client
            .post(POST_URL)
            .json(&BotPost {
                bot_id: &self.bot_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 202 {
            return Err(CoreError::Api {
                provider: "GroupMe".into(),
                message: format!("Bot post rejected with status {status}"),
            });
        }
        Ok(())
    }
}
