use super::timestamp_sampler::{compute_timestamps, frame_file_name};
use crate::config::{CaptureFailurePolicy, ExtractionConfig};
use crate::error::ExtractError;
use crate::tools::{
    CommandRunner, CropDetector, FfmpegCropDetector, FfmpegFrameCapture, FfprobeProbe,
    FrameCapture, MediaProbe, NoCropDetector, SystemCommandRunner,
};
use log::{debug, error, info, warn};
use rand::Rng;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 單部影片的擷取任務
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoJob {
    pub source_path: PathBuf,
    pub output_dir: PathBuf,
    pub index: usize,
}

/// 單部影片的處理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoOutcome {
    Extracted {
        frames_written: usize,
        frames_failed: usize,
    },
    /// 扣除略過區段後長度不足
    TooShort,
    Failed {
        reason: String,
    },
    /// 收到中斷信號，尚未開始處理
    Cancelled,
}

/// 單部影片的影格擷取器
///
/// 流程：取得影片資訊 → 計算時間點 → 逐一（選擇性偵測黑邊後）擷取影格
pub struct FrameExtractor {
    config: ExtractionConfig,
    probe: Arc<dyn MediaProbe>,
    crop_detector: Arc<dyn CropDetector>,
    capture: Arc<dyn FrameCapture>,
}

impl FrameExtractor {
    pub fn new(
        config: ExtractionConfig,
        probe: Arc<dyn MediaProbe>,
        crop_detector: Arc<dyn CropDetector>,
        capture: Arc<dyn FrameCapture>,
    ) -> Self {
        Self {
            config,
            probe,
            crop_detector,
            capture,
        }
    }

    /// 使用系統上的 ffprobe / ffmpeg
    #[must_use]
    pub fn with_ffmpeg(config: ExtractionConfig) -> Self {
        let runner: Arc<dyn CommandRunner> =
            Arc::new(SystemCommandRunner::new(config.command_timeout));
        let crop_detector: Arc<dyn CropDetector> = if config.crop_enabled {
            Arc::new(FfmpegCropDetector::new(Arc::clone(&runner)))
        } else {
            Arc::new(NoCropDetector)
        };

        Self::new(
            config,
            Arc::new(FfprobeProbe::new(Arc::clone(&runner))),
            crop_detector,
            Arc::new(FfmpegFrameCapture::new(runner)),
        )
    }

    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// 處理單部影片，所有錯誤都在這裡記錄並轉成結果，不會往外傳
    pub fn extract<R: Rng + ?Sized>(&self, job: &VideoJob, rng: &mut R) -> VideoOutcome {
        info!("處理影片: {}", job.source_path.display());

        match self.try_extract(job, rng) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("處理影片失敗 {}: {e}", job.source_path.display());
                VideoOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_extract<R: Rng + ?Sized>(
        &self,
        job: &VideoJob,
        rng: &mut R,
    ) -> Result<VideoOutcome, ExtractError> {
        let info = self.probe.probe(&job.source_path)?;
        debug!(
            "影片資訊 {}: {:.3}s, {:.3} fps",
            job.source_path.display(),
            info.duration_seconds,
            info.frame_rate
        );

        let Some(timestamps) = compute_timestamps(
            info.duration_seconds,
            f64::from(self.config.skip_start),
            f64::from(self.config.skip_end),
            self.config.frames_per_video,
            self.config.effective_jitter(),
            rng,
        ) else {
            warn!(
                "略過 {}：扣除開頭 {} 秒與結尾 {} 秒後長度不足（{:.1} 秒）",
                job.source_path.display(),
                self.config.skip_start,
                self.config.skip_end,
                info.duration_seconds
            );
            return Ok(VideoOutcome::TooShort);
        };

        let video_stem = video_stem(&job.source_path);
        let mut produced_names = HashSet::new();
        let mut frames_written = 0;
        let mut frames_failed = 0;

        for timestamp in timestamps {
            let file_name = frame_file_name(&video_stem, timestamp, info.frame_rate);
            // 抖動後可能落在同一張影格
            if !produced_names.insert(file_name.clone()) {
                debug!("略過重複影格 {file_name} @ {timestamp:.3}s");
                continue;
            }

            let output_path = job.output_dir.join(file_name);
            match self.capture_frame(&job.source_path, timestamp, &output_path) {
                Ok(()) => frames_written += 1,
                Err(e) => match self.config.capture_failure_policy {
                    CaptureFailurePolicy::AbortVideo => {
                        if frames_written > 0 {
                            warn!(
                                "{} 已寫入 {frames_written} 張影格，其餘放棄",
                                job.source_path.display()
                            );
                        }
                        return Err(e);
                    }
                    CaptureFailurePolicy::SkipFrame => {
                        warn!("略過影格: {e}");
                        frames_failed += 1;
                    }
                },
            }
        }

        info!(
            "完成 {}：寫入 {frames_written} 張影格",
            job.source_path.display()
        );

        Ok(VideoOutcome::Extracted {
            frames_written,
            frames_failed,
        })
    }

    fn capture_frame(
        &self,
        source_path: &Path,
        timestamp: f64,
        output_path: &Path,
    ) -> Result<(), ExtractError> {
        let crop = if self.config.crop_enabled {
            self.crop_detector.detect_crop(source_path, timestamp)?
        } else {
            None
        };

        self.capture
            .capture(source_path, timestamp, crop.as_deref(), output_path)
    }
}

fn video_stem(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "video".to_string(), |s| s.to_string_lossy().to_string())
}
