use crate::config::FileTypeTable;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 遞迴掃描目錄下的影片檔案
///
/// 依檔名排序走訪，確保同一個資料夾每次掃描的順序一致
#[must_use]
pub fn scan_video_files(directory: &Path, file_type_table: &FileTypeTable) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| file_type_table.is_video_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect()
}
