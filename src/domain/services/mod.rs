pub mod api_service;
pub mod password_policy;
pub mod password_service;
pub mod response_normalizer;
