//! # Opslot Model
//!
//! Multinomial mixture topic model over hour-slot token counts, fitted by
//! expectation maximization in log space. Exposes:
//! - the EM engine itself (`em::fit` and the E/M update steps),
//! - a backend capability trait so alternative fitting methods can supply
//!   the same (priors, word distributions) pair,
//! - JSON persistence of fitted models.

pub mod backend;
pub mod em;
pub mod error;
pub mod persist;

pub use backend::{EmBackend, TopicBackend, TopicDistributions};
pub use em::{fit, EmConfig, MixtureModel, DEFAULT_ITERATIONS, DEFAULT_SEED};
pub use error::{ModelError, Result};
pub use persist::{load_model, save_model};
