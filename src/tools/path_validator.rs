use crate::error::ConfigError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn validate_directory_exists(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::InputDirMissing(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ConfigError::InputNotDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// 給 clap 使用的輸入資料夾驗證
pub fn parse_existing_directory(value: &str) -> Result<PathBuf, ConfigError> {
    let path = PathBuf::from(value);
    validate_directory_exists(&path)?;
    Ok(path)
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("無法建立資料夾: {}", path.display()))?;
    }
    Ok(())
}

/// 資料夾是否已經有任何內容
pub fn is_non_empty_directory(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("無法讀取資料夾: {}", path.display()))?;
    Ok(entries.next().is_some())
}
