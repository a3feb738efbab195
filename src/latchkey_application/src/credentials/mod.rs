pub mod cred_store;
pub mod password_hash;
pub mod password_policy;
