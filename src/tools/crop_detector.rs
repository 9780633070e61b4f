use crate::error::ExtractError;
use crate::tools::CommandRunner;
use regex::Regex;
use std::path::Path;
use std::sync::{Arc, LazyLock};

/// cropdetect 濾鏡參數：limit=24, round=16, reset=0
const CROPDETECT_FILTER: &str = "cropdetect=24:16:0";

/// 送進 cropdetect 的影格數；新版 ffmpeg 預設會略過前 2 張影格不輸出
const CROPDETECT_FRAMES: u32 = 5;

static CROP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"crop=\d+:\d+:\d+:\d+").unwrap_or_else(|e| panic!("無效的裁切正規表示式: {e}"))
});

/// 偵測黑邊的外部能力
///
/// 找不到裁切區域時回傳 `Ok(None)`，只有外部工具無法執行時才回傳錯誤
pub trait CropDetector: Send + Sync {
    fn detect_crop(&self, video_path: &Path, timestamp: f64) -> Result<Option<String>, ExtractError>;
}

/// 使用 ffmpeg cropdetect 濾鏡偵測黑邊
pub struct FfmpegCropDetector {
    runner: Arc<dyn CommandRunner>,
}

impl FfmpegCropDetector {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn build_args(video_path: &Path, timestamp: f64) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-nostdin".to_string(),
            "-ss".to_string(),
            format!("{timestamp:.3}"),
            "-i".to_string(),
            video_path.to_string_lossy().to_string(),
            "-vf".to_string(),
            CROPDETECT_FILTER.to_string(),
            "-frames:v".to_string(),
            CROPDETECT_FRAMES.to_string(),
            "-f".to_string(),
            "null".to_string(),
            "-".to_string(),
        ]
    }
}

impl CropDetector for FfmpegCropDetector {
    fn detect_crop(&self, video_path: &Path, timestamp: f64) -> Result<Option<String>, ExtractError> {
        let output = self
            .runner
            .run("ffmpeg", &Self::build_args(video_path, timestamp))
            .map_err(|source| ExtractError::CropDetect {
                path: video_path.to_path_buf(),
                timestamp,
                source,
            })?;

        // cropdetect 輸出在 stderr；結束碼不影響判斷
        Ok(parse_crop_output(&output.stderr))
    }
}

/// 從 cropdetect 輸出中取出最後一個 `crop=w:h:x:y`
///
/// reset=0 時每行都是累積結果，最後一行涵蓋所有送入的影格
fn parse_crop_output(stderr: &str) -> Option<String> {
    CROP_PATTERN
        .find_iter(stderr)
        .last()
        .map(|m| m.as_str().to_string())
}

/// 不做裁切偵測時使用
pub struct NoCropDetector;

impl CropDetector for NoCropDetector {
    fn detect_crop(&self, _video_path: &Path, _timestamp: f64) -> Result<Option<String>, ExtractError> {
        Ok(None)
    }
}
