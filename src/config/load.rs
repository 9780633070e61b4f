use crate::config::types::{ExtractionConfig, FileTypeTable};
use crate::error::ConfigError;
use anyhow::{Context, Result};

/// 編譯時嵌入的影片副檔名清單（不需要外部檔案）
const FILE_TYPE_TABLE_JSON: &str = include_str!("data/file_type_table.json");

impl FileTypeTable {
    /// 從編譯時嵌入的 JSON 載入檔案類型表
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(FILE_TYPE_TABLE_JSON).context("無法解析嵌入的檔案類型設定")
    }
}

impl ExtractionConfig {
    /// 檢查數值範圍，命令列解析之外的程式呼叫也會經過這裡
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames_per_video == 0 {
            return Err(ConfigError::InvalidValue {
                name: "frames_per_video",
                reason: "必須大於 0".to_string(),
            });
        }
        if self.max_workers == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_workers",
                reason: "必須大於 0".to_string(),
            });
        }
        if self.command_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidValue {
                name: "command_timeout",
                reason: "必須大於 0 秒".to_string(),
            });
        }
        Ok(())
    }
}
