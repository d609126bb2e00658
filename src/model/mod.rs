pub mod config;
pub mod row;
pub mod taxonomy;

pub use config::Config;
pub use row::{AttackSurfaceRow, Field, RowSnapshot, Threat};
pub use taxonomy::{ThreatCategory, CATEGORIES};
