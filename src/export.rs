use {
    crate::{error::MarketError, pages::SnapshotView},
    serde::Serialize,
    std::{fs, path::Path},
};

/// Snapshot document written by the `market_snapshot` binary
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotExport<'a> {
    pub generated_at: i64,
    pub database: String,
    #[serde(flatten)]
    pub view: &'a SnapshotView,
}

impl<'a> SnapshotExport<'a> {
    pub fn new(view: &'a SnapshotView, database: &Path) -> Self {
        Self {
            generated_at: chrono::Utc::now().timestamp(),
            database: database.display().to_string(),
            view,
        }
    }

    pub fn to_json(&self) -> Result<String, MarketError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Save a snapshot document to a JSON file
pub fn save_snapshot(export: &SnapshotExport<'_>, file_path: &Path) -> Result<(), MarketError> {
    let json = export.to_json()?;
    fs::write(file_path, json)?;

    log::info!("💾 Saved snapshot to {}", file_path.display());
    Ok(())
}
