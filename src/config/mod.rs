pub mod load;
pub mod types;

pub use types::{
    CaptureFailurePolicy, DEFAULT_FRAMES_PER_VIDEO, DEFAULT_MAX_WORKERS, DEFAULT_SKIP_END,
    DEFAULT_SKIP_START, ExtractionConfig, FileTypeTable, VideoSelection,
};
