use askama::Template;
use latchkey_core::{Notification, NotificationError, NotificationKind};

#[derive(Template)]
#[template(path = "registration.html")]
struct RegistrationHtml<'a> {
    user: &'a str,
    token_url: &'a str,
}

#[derive(Template)]
#[template(path = "registration.txt")]
struct RegistrationText<'a> {
    user: &'a str,
    token_url: &'a str,
}

#[derive(Template)]
#[template(path = "forgot_password.html")]
struct ForgotPasswordHtml<'a> {
    user: &'a str,
    token_url: &'a str,
}

#[derive(Template)]
#[template(path = "forgot_password.txt")]
struct ForgotPasswordText<'a> {
    user: &'a str,
    token_url: &'a str,
}

/// Subject and bodies of an outgoing notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub subject: &'static str,
    pub html_body: String,
    pub text_body: String,
}

fn render(template: &impl Template) -> Result<String, NotificationError> {
    template
        .render()
        .map_err(|e| NotificationError::Template(e.to_string()))
}

impl RenderedNotification {
    pub fn render(notification: &Notification) -> Result<Self, NotificationError> {
        let user = notification.user.as_str();
        let token_url = notification.token_url.as_str();

        match notification.kind {
            NotificationKind::Registration => Ok(Self {
                subject: "Set your password",
                html_body: render(&RegistrationHtml { user, token_url })?,
                text_body: render(&RegistrationText { user, token_url })?,
            }),
            NotificationKind::ForgotPassword => Ok(Self {
                subject: "Reset your password",
                html_body: render(&ForgotPasswordHtml { user, token_url })?,
                text_body: render(&ForgotPasswordText { user, token_url })?,
            }),
        }
    }
}
