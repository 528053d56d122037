pub mod config;
pub mod error;
pub mod rules;
pub mod types;

pub use config::Config;
pub use error::{ProctorError, Result};
pub use rules::{message_for, risk_of, DEFAULT_WARNING_MESSAGE, HIGH_RISK_MESSAGE};
pub use types::*;
