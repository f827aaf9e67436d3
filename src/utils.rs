use crate::error::Result;
pub use crate::log_info;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn save_html(content: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;

    log_info!("[utils] Saved HTML content to {:?}", path);
    Ok(())
}

pub fn save_json(data: &impl serde::Serialize, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let json_string = serde_json::to_string_pretty(data)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;

    log_info!("[utils] Saved JSON to {:?}", path);
    Ok(())
}
