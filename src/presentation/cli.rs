//! Command line front end.
//!
//! ```bash
//! couple-planner strength 'Str0ng!Pass123'
//! couple-planner hash 'Str0ng!Pass123'
//! COUPLE_API_BASE_URL=https://api.example.com/api couple-planner list reminders
//! ```

use std::error::Error;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

use crate::{
    config::{BASE_URL_VAR, ClientConfig},
    domain::{
        error::DomainError,
        models::{
            password::PasswordHashResult,
            planner::{DatePlan, Event, Gift, Message, Note, Reminder, Resource},
        },
        services::{
            password_policy::{
                DEFAULT_PASSWORD_LENGTH, generate_secure_password, password_strength_level,
                validate_password_strength,
            },
            password_service::PasswordHasher,
        },
    },
    infrastructure::{
        pbkdf2_password_hasher::Pbkdf2PasswordHasher, reqwest_api_client::ReqwestApiClient,
    },
    presentation::relative_time::relative_time,
    usecase::{credential_usecase::CredentialUsecase, planner_usecase::PlannerUsecase},
};

#[derive(Debug, Parser)]
#[command(name = "couple-planner")]
#[command(about = "Client tools for the couple planner backend")]
#[command(version)]
pub struct Cli {
    /// Root of the backend API.
    #[arg(long, global = true, env = BASE_URL_VAR)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Hash a password with PBKDF2-SHA256
    Hash {
        password: String,
        /// Reuse an existing salt instead of generating one
        #[arg(long)]
        salt: Option<String>,
        /// Skip the strength check
        #[arg(long)]
        allow_weak: bool,
    },
    /// Check a password against a stored hash and salt
    Verify {
        password: String,
        hash: String,
        salt: String,
    },
    /// Generate a random password
    Generate {
        #[arg(long, default_value_t = DEFAULT_PASSWORD_LENGTH)]
        length: usize,
    },
    /// Score a password
    Strength { password: String },
    /// List a planner collection
    List { resource: ResourceKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Dates,
    Events,
    Gifts,
    Reminders,
    Notes,
    Messages,
}

impl Cli {
    /// Load `.env` before parsing so its values act as argument defaults.
    pub fn init() -> Self {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
        Self::parse()
    }
}

/// Execute a command and return what should be printed.
pub async fn run(cli: Cli) -> Result<String, Box<dyn Error>> {
    match cli.command {
        Command::Hash {
            password,
            salt,
            allow_weak,
        } => {
            let hasher = Pbkdf2PasswordHasher::new();
            let result = if allow_weak {
                hasher.hash(&password, salt.as_deref()).await?
            } else {
                CredentialUsecase::new(hasher)
                    .prepare(&password, salt.as_deref())
                    .await?
            };
            Ok(serde_json::to_string_pretty(&result)?)
        }
        Command::Verify {
            password,
            hash,
            salt,
        } => {
            let usecase = CredentialUsecase::new(Pbkdf2PasswordHasher::new());
            let stored = PasswordHashResult::new(hash, salt);
            if usecase.check(&password, &stored).await {
                Ok("Password matches".to_string())
            } else {
                Err("Password does not match".into())
            }
        }
        Command::Generate { length } => Ok(generate_secure_password(length)),
        Command::Strength { password } => {
            let report = validate_password_strength(&password);
            let level = password_strength_level(report.score);
            let output = json!({
                "isValid": report.is_valid,
                "score": report.score,
                "level": level.label(),
                "feedback": report.feedback,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        Command::List { resource } => {
            let config = load_config(cli.base_url)?;
            let planner = PlannerUsecase::new(ReqwestApiClient::new(config)?);
            let now = Utc::now();

            let rendered = match resource {
                ResourceKind::Dates => render_list(&planner.list::<DatePlan>().await?, now),
                ResourceKind::Events => render_list(&planner.list::<Event>().await?, now),
                ResourceKind::Gifts => render_list(&planner.list::<Gift>().await?, now),
                ResourceKind::Reminders => render_list(&planner.list::<Reminder>().await?, now),
                ResourceKind::Notes => render_list(&planner.list::<Note>().await?, now),
                ResourceKind::Messages => render_list(&planner.list::<Message>().await?, now),
            };
            Ok(rendered)
        }
    }
}

fn load_config(base_url: Option<String>) -> Result<ClientConfig, DomainError> {
    match base_url {
        Some(base_url) => ClientConfig::from_lookup(|key| {
            if key == BASE_URL_VAR {
                Some(base_url.clone())
            } else {
                dotenvy::var(key).ok()
            }
        }),
        None => ClientConfig::from_env(),
    }
}

/// One line per item: id, label and, when the item has a date, how far away it is.
pub fn render_list<R: Resource>(items: &[R], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return "(sin elementos)".to_string();
    }

    items
        .iter()
        .map(|item| match item.occurs_at() {
            Some(at) => format!("{}  {}  ({})", item.id(), item.label(), relative_time(at, now)),
            None => format!("{}  {}", item.id(), item.label()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
