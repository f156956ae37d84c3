pub mod pbkdf2_password_hasher;
pub mod request_tracker;
pub mod reqwest_api_client;
