use crate::config::VideoSelection;
use rand::Rng;
use rand::seq::SliceRandom;

/// 依照數量上限與是否隨機抽樣，決定要處理的影片
///
/// - 只有上限：取走訪順序的前 `limit` 個
/// - 隨機抽樣：不重複地均勻抽出 `min(limit, 總數)` 個（沒有上限時為全部，順序打亂）
#[must_use]
pub fn select_videos<T: Clone, R: Rng + ?Sized>(
    mut videos: Vec<T>,
    selection: &VideoSelection,
    rng: &mut R,
) -> Vec<T> {
    let amount = selection.limit.map_or(videos.len(), |limit| limit.min(videos.len()));

    if selection.random_sample {
        return videos.choose_multiple(rng, amount).cloned().collect();
    }

    videos.truncate(amount);
    videos
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    fn videos() -> Vec<String> {
        (0..10).map(|i| format!("video_{i:02}.mkv")).collect()
    }

    #[test]
    fn test_limit_takes_first_in_order() {
        let selection = VideoSelection {
            limit: Some(5),
            random_sample: false,
        };
        let selected = select_videos(videos(), &selection, &mut StdRng::seed_from_u64(0));
        assert_eq!(selected, videos()[..5].to_vec());
    }

    #[test]
    fn test_no_limit_keeps_everything() {
        let selected = select_videos(
            videos(),
            &VideoSelection::default(),
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(selected, videos());
    }

    #[test]
    fn test_limit_larger_than_count() {
        let selection = VideoSelection {
            limit: Some(50),
            random_sample: true,
        };
        let selected = select_videos(videos(), &selection, &mut StdRng::seed_from_u64(0));
        assert_eq!(selected.len(), 10);
    }

    #[test]
    fn test_random_sample_without_duplicates() {
        let selection = VideoSelection {
            limit: Some(5),
            random_sample: true,
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let selected = select_videos(videos(), &selection, &mut rng);
            assert_eq!(selected.len(), 5);
            let unique: HashSet<_> = selected.iter().collect();
            assert_eq!(unique.len(), 5);
        }
    }

    #[test]
    fn test_random_sample_covers_all_videos() {
        // 多次抽樣後每部影片都應該被選到，且次數大致平均
        let selection = VideoSelection {
            limit: Some(5),
            random_sample: true,
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts: HashMap<String, usize> = HashMap::new();
        let trials = 2000;
        for _ in 0..trials {
            for video in select_videos(videos(), &selection, &mut rng) {
                *counts.entry(video).or_default() += 1;
            }
        }

        assert_eq!(counts.len(), 10);
        // 期望值 1000 次
        for count in counts.values() {
            assert!((800..=1200).contains(count), "count {count}");
        }
    }

    #[test]
    fn test_random_sample_without_limit_is_permutation() {
        let selection = VideoSelection {
            limit: None,
            random_sample: true,
        };
        let mut selected = select_videos(videos(), &selection, &mut StdRng::seed_from_u64(5));
        selected.sort();
        assert_eq!(selected, videos());
    }
}
