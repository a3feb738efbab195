pub mod clock;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use clock::{Clock, fixed_clock, system_clock};

pub use domain::{
    claims::{Category, CategoryError, Claims},
    credentials::{Credentials, UpdatePasswordPayload},
    email::{Email, EmailError},
    notification::{Notification, NotificationKind},
    password::Password,
    token::{Token, TokenDetails},
    user_entry::{PasswordHash, UserEntry},
    user_id::{UserId, UserIdError},
};

pub use ports::{
    repositories::{TokenStore, TokenStoreError, UserStore, UserStoreError},
    services::{NotificationError, NotificationService},
};
