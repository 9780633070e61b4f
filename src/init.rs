use env_logger::Env;
use log::LevelFilter;

/// 設定全域記錄器，只在程式進入點呼叫一次
///
/// 預設等級為 info，`-v` 為 debug，`-vv` 以上為 trace；`RUST_LOG` 會覆蓋這些設定
pub fn init(verbosity: u8) {
    let level = level_for(verbosity);

    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_timestamp_secs()
        .format_target(false)
        .init();
}

const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
