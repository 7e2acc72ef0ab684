use std::path::PathBuf;

/// Returns the qrhire data directory under the platform-local data dir
///
/// - **macOS**: `~/Library/Application Support/qrhire`
/// - **Linux**: `~/.local/share/qrhire`
/// - **Windows**: `%LOCALAPPDATA%\qrhire`
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("qrhire"))
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    Ok(get_data_dir()?.join("applicants.db"))
}

pub fn default_local_store_path() -> anyhow::Result<PathBuf> {
    Ok(get_data_dir()?.join("applicants.json"))
}
