//! Attack-surface threat classification core.
//!
//! Holds an editable grid of attack-surface rows, renders the grid into a
//! single classification prompt, submits it to an OpenAI-compatible
//! completion endpoint, and reconciles the returned JSON back onto the rows
//! by index. The rendering surface (grid widget, credential input) is an
//! external collaborator: embed [`GridController`] and wire its command
//! handlers to whatever surface is in use.

pub mod controller;
pub mod model;
pub mod service;
pub mod store;

pub use controller::{GridController, ResultRow};
pub use model::config::Config;
pub use model::row::{AttackSurfaceRow, Field, RowSnapshot, Threat};
pub use model::taxonomy::{ThreatCategory, CATEGORIES};
pub use service::classification::{
    ClassificationCoordinator, ClassificationError, SubmissionPhase,
};
pub use store::{RowStore, StoreError};
