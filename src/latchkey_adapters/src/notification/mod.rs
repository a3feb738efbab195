pub mod mock_notification_service;
pub mod postmark_notification_service;
pub mod templates;

pub use mock_notification_service::MockNotificationService;
pub use postmark_notification_service::PostmarkNotificationService;
pub use templates::RenderedNotification;
