use crate::config::{
    CaptureFailurePolicy, DEFAULT_FRAMES_PER_VIDEO, DEFAULT_SKIP_END, DEFAULT_SKIP_START,
    ExtractionConfig, VideoSelection,
};
use crate::tools::parse_existing_directory;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// 從資料夾中的每部影片均勻擷取影格
#[derive(Parser, Debug)]
#[command(version)]
pub struct Cli {
    /// 擷取結果的根目錄
    #[arg(long, value_name = "DIR", required = true)]
    pub output_dir: PathBuf,

    /// 每部影片擷取的影格數
    #[arg(long, default_value_t = DEFAULT_FRAMES_PER_VIDEO, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames_per_video: u32,

    /// 同時處理的影片數量上限
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_workers: u32,

    /// 影片開頭略過的秒數
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_SKIP_START)]
    pub skip_start: u32,

    /// 影片結尾略過的秒數
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_SKIP_END)]
    pub skip_end: u32,

    /// 最多處理幾部影片
    #[arg(long)]
    pub limit: Option<usize>,

    /// 搭配 --limit 時隨機抽樣影片
    #[arg(long)]
    pub random_sample: bool,

    /// 偵測並裁切黑邊
    #[arg(long)]
    pub crop: bool,

    /// 每個時間點隨機偏移 -N 到 N 秒（整數），例如 2 代表 -2、-1、0、1、2
    #[arg(long, value_name = "SECONDS")]
    pub interval_jitter: Option<u32>,

    /// 固定亂數種子，讓抖動與抽樣結果可重現
    #[arg(long)]
    pub seed: Option<u64>,

    /// 單張影格擷取失敗時只略過該影格，繼續處理同一部影片
    #[arg(long)]
    pub continue_on_capture_error: bool,

    /// 每次 ffprobe / ffmpeg 呼叫的逾時秒數
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub command_timeout: Option<u64>,

    /// 不顯示進度條
    #[arg(long)]
    pub no_progress: bool,

    /// 顯示更多記錄（-v: debug，-vv: trace）
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// 要掃描的影片資料夾（遞迴）
    #[arg(value_name = "INPUT_DIR", value_parser = parse_existing_directory)]
    pub input_dir: PathBuf,
}

impl Cli {
    #[must_use]
    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            frames_per_video: self.frames_per_video,
            skip_start: self.skip_start,
            skip_end: self.skip_end,
            crop_enabled: self.crop,
            jitter_bound: self.interval_jitter,
            max_workers: self.max_workers as usize,
            capture_failure_policy: if self.continue_on_capture_error {
                CaptureFailurePolicy::SkipFrame
            } else {
                CaptureFailurePolicy::AbortVideo
            },
            command_timeout: self.command_timeout.map(Duration::from_secs),
            seed: self.seed,
            show_progress: !self.no_progress,
        }
    }

    #[must_use]
    pub const fn video_selection(&self) -> VideoSelection {
        VideoSelection {
            limit: self.limit,
            random_sample: self.random_sample,
        }
    }
}
