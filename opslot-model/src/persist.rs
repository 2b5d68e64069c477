//! Fitted model persistence
//!
//! Models are written as pretty JSON so they can be inspected and diffed.

use crate::em::MixtureModel;
use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write a fitted model to `path` as JSON
pub fn save_model<P: AsRef<Path>>(path: P, model: &MixtureModel) -> Result<()> {
    let json = serde_json::to_string_pretty(model)?;
    fs::write(path.as_ref(), json)?;
    info!("Saved fitted model to {}", path.as_ref().display());
    Ok(())
}

/// Read a fitted model back from `path`
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<MixtureModel> {
    let json = fs::read_to_string(path.as_ref())?;
    let model = serde_json::from_str(&json)?;
    Ok(model)
}
