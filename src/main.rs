use anyhow::Result;
use clap::Parser;
use log::info;
use video_frame_sampler::cli::Cli;
use video_frame_sampler::component::{BatchRunner, FrameExtractor};
use video_frame_sampler::config::FileTypeTable;
use video_frame_sampler::init;
use video_frame_sampler::signal::setup_shutdown_signal;
use video_frame_sampler::tools::ensure_directory_exists;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init::init(cli.verbose);

    let config = cli.extraction_config();
    config.validate()?;

    let shutdown_signal = setup_shutdown_signal()?;
    let file_type_table = FileTypeTable::embedded()?;
    ensure_directory_exists(&cli.output_dir)?;

    let runner = BatchRunner::new(
        FrameExtractor::with_ffmpeg(config),
        file_type_table,
        shutdown_signal,
    );

    // 個別影片失敗只會記錄，不影響結束碼
    let report = runner.run(&cli.input_dir, &cli.output_dir, &cli.video_selection())?;
    runner.print_summary(&report);

    info!("程式正常結束");
    Ok(())
}
