// Receipt Points - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod error;
pub mod fields;
pub mod ids;
pub mod receipt;
pub mod rules;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use error::{FieldError, FieldKind, ScoreError, StoreError};
pub use fields::{parse_currency, parse_date, parse_day_of_month, parse_time, Amount};
pub use ids::{IdGenerator, SequentialGenerator, UuidGenerator};
pub use receipt::{Item, Receipt};
pub use rules::{compute_score, Breakdown, RuleContribution, RuleEngine, ScoringRule};
pub use store::ScoreStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
