//! Client core of the couple planner.
//!
//! - [`domain::services::response_normalizer`] turns backend response
//!   envelopes into payloads or errors and translates transport failures
//! - [`infrastructure::pbkdf2_password_hasher`] and
//!   [`domain::services::password_policy`] hash, generate and score passwords
//! - [`infrastructure::reqwest_api_client`] and [`usecase::planner_usecase`]
//!   reach the planner collections over HTTP

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod usecase;
