//! 影片影格擷取元件
//!
//! 流程：
//! A. 掃描輸入資料夾中的影片，依上限／隨機抽樣選取
//! B. 取得影片長度與幀率（ffprobe）
//! C. 扣除開頭與結尾後均分時間點（可加入隨機抖動）
//! D. 逐一擷取影格（可選擇先偵測黑邊）
//!
//! 多部影片以固定大小的執行緒池平行處理

mod extractor;
mod main;
mod timestamp_sampler;
mod video_selector;

pub use extractor::{FrameExtractor, VideoJob, VideoOutcome};
pub use main::{BatchReport, BatchRunner};
pub use timestamp_sampler::{compute_timestamps, frame_file_name};
pub use video_selector::select_videos;
