use crate::error::ExtractError;
use crate::tools::CommandRunner;
use log::debug;
use std::path::Path;
use std::sync::Arc;

/// 擷取單張影格並寫成圖片的外部能力
pub trait FrameCapture: Send + Sync {
    fn capture(
        &self,
        video_path: &Path,
        timestamp: f64,
        crop: Option<&str>,
        output_path: &Path,
    ) -> Result<(), ExtractError>;
}

/// 使用 ffmpeg 擷取單張最高品質 JPEG
pub struct FfmpegFrameCapture {
    runner: Arc<dyn CommandRunner>,
}

impl FfmpegFrameCapture {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn build_args(
        video_path: &Path,
        timestamp: f64,
        crop: Option<&str>,
        output_path: &Path,
    ) -> Vec<String> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-nostdin".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-ss".to_string(),
            format!("{timestamp:.3}"),
            "-i".to_string(),
            video_path.to_string_lossy().to_string(),
        ];

        // 裁切參數原樣交給 -vf
        if let Some(crop) = crop {
            args.push("-vf".to_string());
            args.push(crop.to_string());
        }

        args.extend([
            "-frames:v".to_string(),
            "1".to_string(),
            "-q:v".to_string(),
            "1".to_string(),
            "-y".to_string(),
            output_path.to_string_lossy().to_string(),
        ]);
        args
    }
}

impl FrameCapture for FfmpegFrameCapture {
    fn capture(
        &self,
        video_path: &Path,
        timestamp: f64,
        crop: Option<&str>,
        output_path: &Path,
    ) -> Result<(), ExtractError> {
        debug!(
            "擷取影格: {} @ {timestamp:.3}s -> {}",
            video_path.display(),
            output_path.display()
        );

        let output = self
            .runner
            .run("ffmpeg", &Self::build_args(video_path, timestamp, crop, output_path))
            .map_err(|e| ExtractError::capture(video_path, timestamp, format!("無法執行 ffmpeg: {e}")))?;

        if !output.success() {
            return Err(ExtractError::capture(
                video_path,
                timestamp,
                format!("ffmpeg 執行失敗: {}", output.stderr.trim()),
            ));
        }

        // 確認輸出檔案存在
        if !output_path.exists() {
            return Err(ExtractError::capture(
                video_path,
                timestamp,
                format!("影格檔案未建立: {}", output_path.display()),
            ));
        }

        Ok(())
    }
}
