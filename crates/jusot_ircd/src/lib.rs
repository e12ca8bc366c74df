pub mod channels_models;
pub mod config;
pub mod constants;
pub mod errors;
pub mod handlers;
pub mod message;
pub mod message_models;
pub mod replies;
pub mod server_state;
pub mod types;
pub mod user_state;
