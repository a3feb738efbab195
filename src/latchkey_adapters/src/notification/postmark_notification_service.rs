use latchkey_core::{Email, Notification, NotificationError, NotificationService};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use super::templates::RenderedNotification;

/// Delivers notifications as email through the Postmark HTTP API.
#[derive(Clone)]
pub struct PostmarkNotificationService {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkNotificationService {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait::async_trait]
impl NotificationService for PostmarkNotificationService {
    #[tracing::instrument(name = "Sending notification email", skip_all, fields(user = %notification.user))]
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        let rendered = RenderedNotification::render(&notification)?;

        let base = Url::parse(&self.base_url).map_err(delivery)?;
        let url = base.join("/email").map_err(delivery)?;

        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: notification.email.as_ref().expose_secret(),
            subject: rendered.subject,
            html_body: &rendered.html_body,
            text_body: &rendered.text_body,
            message_stream: MESSAGE_STREAM,
        };

        self.http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(delivery)?
            .error_for_status()
            .map_err(delivery)?;

        Ok(())
    }
}

fn delivery(e: impl std::fmt::Display) -> NotificationError {
    NotificationError::Delivery(e.to_string())
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
