pub mod claims;
pub mod credentials;
pub mod email;
pub mod notification;
pub mod password;
pub mod token;
pub mod user_entry;
pub mod user_id;
