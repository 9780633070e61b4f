use crate::error::ExtractError;
use crate::tools::CommandRunner;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// 影片的長度與平均幀率
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub duration_seconds: f64,
    pub frame_rate: f64,
}

/// 取得影片資訊的外部能力
pub trait MediaProbe: Send + Sync {
    fn probe(&self, video_path: &Path) -> Result<ProbeResult, ExtractError>;
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    r_frame_rate: Option<String>,
}

/// 使用 ffprobe 取得影片資訊
pub struct FfprobeProbe {
    runner: Arc<dyn CommandRunner>,
}

impl FfprobeProbe {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn build_args(video_path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-select_streams".to_string(),
            "v:0".to_string(),
            "-show_entries".to_string(),
            "format=duration:stream=r_frame_rate".to_string(),
            "-of".to_string(),
            "json".to_string(),
            video_path.to_string_lossy().to_string(),
        ]
    }
}

impl MediaProbe for FfprobeProbe {
    fn probe(&self, video_path: &Path) -> Result<ProbeResult, ExtractError> {
        let output = self
            .runner
            .run("ffprobe", &Self::build_args(video_path))
            .map_err(|e| ExtractError::probe(video_path, format!("無法執行 ffprobe: {e}")))?;

        if !output.success() {
            return Err(ExtractError::probe(
                video_path,
                format!("ffprobe 執行失敗: {}", output.stderr.trim()),
            ));
        }

        parse_probe_output(&output.stdout).map_err(|reason| ExtractError::probe(video_path, reason))
    }
}

/// 解析 ffprobe 的 JSON 輸出
fn parse_probe_output(stdout: &str) -> Result<ProbeResult, String> {
    let probe: FfprobeOutput =
        serde_json::from_str(stdout).map_err(|e| format!("無法解析 ffprobe 輸出: {e}"))?;

    let duration_text = probe
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| "無法取得影片長度".to_string())?;
    let duration_seconds: f64 = duration_text
        .trim()
        .parse()
        .map_err(|_| format!("影片長度格式錯誤: {duration_text}"))?;
    if !duration_seconds.is_finite() || duration_seconds < 0.0 {
        return Err(format!("影片長度無效: {duration_text}"));
    }

    let rate_text = probe
        .streams
        .as_ref()
        .and_then(|streams| streams.first())
        .and_then(|s| s.r_frame_rate.as_deref())
        .ok_or_else(|| "找不到視訊串流".to_string())?;
    let frame_rate = parse_frame_rate(rate_text)?;

    Ok(ProbeResult {
        duration_seconds,
        frame_rate,
    })
}

/// 解析幀率字串（格式必須是 "30/1" 或 "30000/1001"）
///
/// 分母為 0 時回傳 1.0，而不是錯誤
fn parse_frame_rate(rate: &str) -> Result<f64, String> {
    let (num_str, den_str) = rate
        .trim()
        .split_once('/')
        .ok_or_else(|| format!("幀率格式錯誤: {rate}"))?;
    let num: i64 = num_str
        .parse()
        .map_err(|_| format!("幀率格式錯誤: {rate}"))?;
    let den: i64 = den_str
        .parse()
        .map_err(|_| format!("幀率格式錯誤: {rate}"))?;

    if den == 0 {
        return Ok(1.0);
    }
    Ok(num as f64 / den as f64)
}
