use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 單一影片處理過程中的錯誤
///
/// 這些錯誤只會在影片層級被捕捉並記錄，不會中斷整個批次
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("無法取得影片資訊 {}: {reason}", .path.display())]
    Probe { path: PathBuf, reason: String },

    #[error("裁切偵測失敗 {} @ {timestamp:.3}s: {source}", .path.display())]
    CropDetect {
        path: PathBuf,
        timestamp: f64,
        #[source]
        source: io::Error,
    },

    #[error("影格擷取失敗 {} @ {timestamp:.3}s: {reason}", .path.display())]
    Capture {
        path: PathBuf,
        timestamp: f64,
        reason: String,
    },
}

impl ExtractError {
    pub fn probe(path: &Path, reason: impl Into<String>) -> Self {
        Self::Probe {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn capture(path: &Path, timestamp: f64, reason: impl Into<String>) -> Self {
        Self::Capture {
            path: path.to_path_buf(),
            timestamp,
            reason: reason.into(),
        }
    }
}

/// 命令列參數驗證錯誤，在開始處理前就會回報
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("路徑不存在: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error("路徑不是資料夾: {}", .0.display())]
    InputNotDirectory(PathBuf),

    #[error("參數 {name} 無效: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}
