mod command_runner;
mod crop_detector;
mod ffprobe_info;
mod frame_capture;
mod path_validator;
mod video_scanner;

pub use command_runner::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use crop_detector::{CropDetector, FfmpegCropDetector, NoCropDetector};
pub use ffprobe_info::{FfprobeProbe, MediaProbe, ProbeResult};
pub use frame_capture::{FfmpegFrameCapture, FrameCapture};
pub use path_validator::{
    ensure_directory_exists, is_non_empty_directory, parse_existing_directory,
    validate_directory_exists,
};
pub use video_scanner::scan_video_files;
