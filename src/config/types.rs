use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_FRAMES_PER_VIDEO: u32 = 100;
pub const DEFAULT_MAX_WORKERS: usize = 4;
pub const DEFAULT_SKIP_START: u32 = 6;
pub const DEFAULT_SKIP_END: u32 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTypeTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
}

impl FileTypeTable {
    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        self.video_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        let video_extensions = self.video_extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| video_extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

/// 單張影格擷取失敗時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureFailurePolicy {
    /// 放棄整部影片剩餘的時間點
    #[default]
    AbortVideo,
    /// 記錄錯誤後繼續擷取下一個時間點
    SkipFrame,
}

/// 擷取設定，建立後在所有 worker 之間唯讀共用
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub frames_per_video: u32,
    /// 影片開頭略過的秒數
    pub skip_start: u32,
    /// 影片結尾略過的秒數
    pub skip_end: u32,
    pub crop_enabled: bool,
    /// 每個時間點隨機偏移的最大秒數，`None` 或 0 代表關閉
    pub jitter_bound: Option<u32>,
    pub max_workers: usize,
    pub capture_failure_policy: CaptureFailurePolicy,
    /// 單次外部命令的逾時時間
    pub command_timeout: Option<Duration>,
    /// 固定亂數種子，方便重現抖動與隨機抽樣結果
    pub seed: Option<u64>,
    pub show_progress: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            frames_per_video: DEFAULT_FRAMES_PER_VIDEO,
            skip_start: DEFAULT_SKIP_START,
            skip_end: DEFAULT_SKIP_END,
            crop_enabled: false,
            jitter_bound: None,
            max_workers: DEFAULT_MAX_WORKERS,
            capture_failure_policy: CaptureFailurePolicy::AbortVideo,
            command_timeout: None,
            seed: None,
            show_progress: true,
        }
    }
}

impl ExtractionConfig {
    /// 抖動是否啟用（上限為 0 視同關閉）
    #[must_use]
    pub fn effective_jitter(&self) -> Option<u32> {
        self.jitter_bound.filter(|&bound| bound > 0)
    }
}

/// 要處理哪些影片
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoSelection {
    pub limit: Option<usize>,
    pub random_sample: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FileTypeTable {
        FileTypeTable {
            video_file: vec![".mkv".to_string(), ".mp4".to_string()],
        }
    }

    #[test]
    fn test_is_video_file() {
        let table = table();
        assert!(table.is_video_file(Path::new("/videos/a.mkv")));
        assert!(table.is_video_file(Path::new("/videos/b.MP4")));
        assert!(!table.is_video_file(Path::new("/videos/c.avi")));
        assert!(!table.is_video_file(Path::new("/videos/no_extension")));
    }

    #[test]
    fn test_effective_jitter() {
        let mut config = ExtractionConfig::default();
        assert_eq!(config.effective_jitter(), None);

        config.jitter_bound = Some(0);
        assert_eq!(config.effective_jitter(), None);

        config.jitter_bound = Some(3);
        assert_eq!(config.effective_jitter(), Some(3));
    }

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.frames_per_video, 100);
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.skip_start, 6);
        assert_eq!(config.skip_end, 60);
        assert_eq!(config.capture_failure_policy, CaptureFailurePolicy::AbortVideo);
    }
}
