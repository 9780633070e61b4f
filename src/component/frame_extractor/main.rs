use super::extractor::{FrameExtractor, VideoJob, VideoOutcome};
use super::video_selector::select_videos;
use crate::config::{FileTypeTable, VideoSelection};
use crate::tools::{ensure_directory_exists, is_non_empty_directory, scan_video_files};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 批次擷取結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    /// 輸出資料夾已有內容，整批略過
    pub skipped_existing: bool,
    pub total_videos: usize,
    pub extracted: usize,
    pub too_short: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub frames_written: usize,
}

impl BatchReport {
    fn from_outcomes(output_dir: PathBuf, outcomes: &[VideoOutcome]) -> Self {
        let mut report = Self {
            output_dir,
            total_videos: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome {
                VideoOutcome::Extracted { frames_written, .. } => {
                    report.extracted += 1;
                    report.frames_written += frames_written;
                }
                VideoOutcome::TooShort => report.too_short += 1,
                VideoOutcome::Failed { .. } => report.failed += 1,
                VideoOutcome::Cancelled => report.cancelled += 1,
            }
        }

        report
    }
}

/// 批次影格擷取
///
/// 每個輸入資料夾對應一個輸出資料夾 `{output_root}/{資料夾名稱}`，
/// 資料夾內的影片以固定大小的執行緒池平行處理，單一影片失敗不影響其他影片
pub struct BatchRunner {
    extractor: FrameExtractor,
    file_type_table: FileTypeTable,
    shutdown_signal: Arc<AtomicBool>,
}

impl BatchRunner {
    pub const fn new(
        extractor: FrameExtractor,
        file_type_table: FileTypeTable,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            extractor,
            file_type_table,
            shutdown_signal,
        }
    }

    pub fn run(
        &self,
        input_dir: &Path,
        output_root: &Path,
        selection: &VideoSelection,
    ) -> Result<BatchReport> {
        let name = directory_name(input_dir)?;
        let output_dir = output_root.join(&name);
        ensure_directory_exists(&output_dir)?;

        if is_non_empty_directory(&output_dir)? {
            info!("略過 {name}：輸出資料夾已有內容 {}", output_dir.display());
            return Ok(BatchReport {
                output_dir,
                skipped_existing: true,
                ..BatchReport::default()
            });
        }

        info!("處理資料夾: {name}");

        let videos = scan_video_files(input_dir, &self.file_type_table);
        let found = videos.len();
        let seed = self.extractor.config().seed;
        let selected = select_videos(videos, selection, &mut rng_for(seed, 0));
        info!("找到 {found} 個影片檔案，選取 {} 個", selected.len());

        let jobs: Vec<VideoJob> = selected
            .into_iter()
            .enumerate()
            .map(|(index, source_path)| VideoJob {
                source_path,
                output_dir: output_dir.clone(),
                index,
            })
            .collect();

        let outcomes = self.dispatch(&jobs)?;
        let report = BatchReport::from_outcomes(output_dir, &outcomes);

        info!(
            "批次完成 - 成功: {}, 太短: {}, 失敗: {}, 取消: {}, 影格: {}",
            report.extracted, report.too_short, report.failed, report.cancelled, report.frames_written
        );

        Ok(report)
    }

    /// 以 `max_workers` 個執行緒平行處理，每部影片一個任務
    fn dispatch(&self, jobs: &[VideoJob]) -> Result<Vec<VideoOutcome>> {
        let config = self.extractor.config();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_workers)
            .thread_name(|i| format!("frame-worker-{i}"))
            .build()
            .context("無法建立工作執行緒池")?;

        let progress_bar = create_progress_bar(jobs.len(), config.show_progress);
        let seed = config.seed;

        let outcomes = pool.install(|| {
            jobs.par_iter()
                .with_max_len(1)
                .map(|job| {
                    // 中斷後不再開始新的影片，進行中的影片會跑完
                    if self.shutdown_signal.load(Ordering::SeqCst) {
                        return VideoOutcome::Cancelled;
                    }

                    let mut rng = rng_for(seed, job.index as u64 + 1);
                    let outcome = self.extractor.extract(job, &mut rng);
                    progress_bar.inc(1);
                    outcome
                })
                .collect::<Vec<_>>()
        });

        progress_bar.finish_and_clear();

        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷信號，未開始的影片已略過");
        }

        Ok(outcomes)
    }

    pub fn print_summary(&self, report: &BatchReport) {
        println!();
        println!("{}", style("=== 影格擷取摘要 ===").cyan().bold());
        println!("  輸出: {}", report.output_dir.display());

        if report.skipped_existing {
            println!("  {}", style("輸出資料夾已有內容，略過此資料夾").yellow());
            return;
        }

        println!("  總計: {} 個影片", report.total_videos);
        println!("  成功: {} 個", style(report.extracted).green());
        println!("  影格: {} 張", report.frames_written);

        if report.too_short > 0 {
            println!("  太短: {} 個", style(report.too_short).yellow());
        }

        if report.failed > 0 {
            println!("  失敗: {} 個", style(report.failed).red());
        }

        if report.cancelled > 0 {
            println!("  取消: {} 個", style(report.cancelled).yellow());
        }
    }
}

/// 取得輸入資料夾名稱；`.` 之類的相對路徑先轉成絕對路徑
fn directory_name(input_dir: &Path) -> Result<String> {
    if let Some(name) = input_dir.file_name() {
        return Ok(name.to_string_lossy().to_string());
    }

    let absolute = input_dir
        .canonicalize()
        .with_context(|| format!("無法解析資料夾路徑: {}", input_dir.display()))?;
    absolute
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .with_context(|| format!("無法取得資料夾名稱: {}", input_dir.display()))
}

/// 有種子時每個 stream 得到固定的亂數序列，否則使用系統亂數
fn rng_for(seed: Option<u64>, stream: u64) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, |seed| {
        StdRng::seed_from_u64(seed.wrapping_add(stream))
    })
}

fn create_progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress_bar = ProgressBar::new(len as u64);
    if let Ok(progress_style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
    {
        progress_bar.set_style(progress_style.progress_chars("#>-"));
    }
    progress_bar.set_message("擷取影格中...");
    progress_bar
}
