use super::{email::Email, user_id::UserId};

/// Which message a notification carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Sent on registration; the link sets the account's first password.
    Registration,
    /// Sent on a forgot-password request.
    ForgotPassword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub user: UserId,
    pub email: Email,
    pub token_url: String,
    pub kind: NotificationKind,
}
