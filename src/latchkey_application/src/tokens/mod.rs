pub mod reset_token_factory;
pub mod token_details_factory;
pub mod token_factory;
