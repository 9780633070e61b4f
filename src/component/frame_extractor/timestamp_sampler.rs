use rand::Rng;

/// 計算一部影片要擷取的時間點
///
/// 策略：
/// 1. 可用長度 = 影片長度 - 結尾略過秒數
/// 2. 可用長度 <= 開頭略過秒數時，影片太短，回傳 `None`
/// 3. 在 [開頭略過, 可用長度) 之間均分 `frame_count` 個時間點（四捨五入到毫秒）
/// 4. 有設定抖動時，每個時間點各自加上 [-jitter, +jitter] 的整數秒偏移，
///    再限制在 [1, 可用長度 - 1] 之內
#[must_use]
pub fn compute_timestamps<R: Rng + ?Sized>(
    duration: f64,
    skip_start: f64,
    skip_end: f64,
    frame_count: u32,
    jitter_bound: Option<u32>,
    rng: &mut R,
) -> Option<Vec<f64>> {
    let usable_end = duration - skip_end;
    if usable_end <= skip_start {
        return None;
    }

    let interval = (usable_end - skip_start) / f64::from(frame_count.max(1));
    let jitter = jitter_bound.filter(|&bound| bound > 0).map(i64::from);

    let timestamps = (0..frame_count)
        .map(|i| {
            let base = round_millis(skip_start + interval * f64::from(i));
            match jitter {
                Some(bound) => {
                    let offset = rng.gen_range(-bound..=bound) as f64;
                    // 先套下限再套上限，上限優先
                    (base + offset).max(1.0).min(usable_end - 1.0)
                }
                None => base,
            }
        })
        .collect();

    Some(timestamps)
}

/// 輸出檔名：`{影片檔名}_frame_{影格編號}.jpg`
#[must_use]
pub fn frame_file_name(video_stem: &str, timestamp: f64, frame_rate: f64) -> String {
    let frame_number = (timestamp * frame_rate).round() as i64;
    format!("{video_stem}_frame_{frame_number}.jpg")
}

/// 以十進位字串四捨五入到毫秒，避免 `value * 1000.0` 在二進位邊界上的誤差
fn round_millis(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn no_jitter(duration: f64, skip_start: f64, skip_end: f64, count: u32) -> Option<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(0);
        compute_timestamps(duration, skip_start, skip_end, count, None, &mut rng)
    }

    #[test]
    fn test_reference_scenario() {
        let timestamps = no_jitter(120.0, 6.0, 60.0, 4).unwrap();
        assert_eq!(timestamps, vec![6.0, 19.5, 33.0, 46.5]);
    }

    #[test]
    fn test_too_short_is_rejected() {
        // 50 秒影片扣掉 60 秒結尾
        assert!(no_jitter(50.0, 6.0, 60.0, 4).is_none());
        // 可用長度剛好等於開頭略過
        assert!(no_jitter(66.0, 6.0, 60.0, 4).is_none());
        assert!(no_jitter(0.0, 0.0, 0.0, 4).is_none());
    }

    #[test]
    fn test_rejection_property() {
        for duration in [0.0, 10.0, 59.9, 65.0, 66.0] {
            for skip_start in [0.0, 6.0, 30.0] {
                for skip_end in [0.0, 60.0] {
                    let result = no_jitter(duration, skip_start, skip_end, 10);
                    if duration - skip_end <= skip_start {
                        assert!(result.is_none(), "{duration} {skip_start} {skip_end}");
                    } else {
                        assert!(result.is_some(), "{duration} {skip_start} {skip_end}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_timestamps_within_range_and_increasing() {
        for (duration, skip_start, skip_end, count) in [
            (120.0, 6.0, 60.0, 100),
            (3600.0, 6.0, 60.0, 100),
            (7.5, 0.0, 0.0, 3),
            (90.25, 10.0, 5.0, 17),
        ] {
            let timestamps = no_jitter(duration, skip_start, skip_end, count).unwrap();
            assert_eq!(timestamps.len(), count as usize);
            for t in &timestamps {
                assert!(*t >= skip_start && *t <= duration - skip_end);
            }
            for i in 1..timestamps.len() {
                assert!(timestamps[i] > timestamps[i - 1]);
            }
        }
    }

    #[test]
    fn test_no_jitter_is_deterministic() {
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        let a = compute_timestamps(1000.0, 6.0, 60.0, 50, None, &mut rng_a);
        let b = compute_timestamps(1000.0, 6.0, 60.0, 50, Some(0), &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_jitter_stays_within_clamp() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let timestamps =
                compute_timestamps(120.0, 6.0, 60.0, 20, Some(5), &mut rng).unwrap();
            assert_eq!(timestamps.len(), 20);
            for t in timestamps {
                assert!((1.0..=59.0).contains(&t), "timestamp {t} out of range");
            }
        }
    }

    #[test]
    fn test_jitter_clamps_to_lower_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let timestamps = compute_timestamps(120.0, 0.0, 60.0, 10, Some(30), &mut rng).unwrap();
        assert!(timestamps.iter().all(|&t| t >= 1.0));
    }

    #[test]
    fn test_jitter_reproducible_with_same_seed() {
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = compute_timestamps(600.0, 6.0, 60.0, 30, Some(2), &mut rng_a);
        let b = compute_timestamps(600.0, 6.0, 60.0, 30, Some(2), &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_round_millis_uses_decimal_value() {
        // 1.0005 實際上是 1.000499999...，應捨去
        assert_eq!(round_millis(1.0005), 1.0);
        assert_eq!(round_millis(19.5), 19.5);
        assert_eq!(round_millis(33.333_333), 33.333);
        assert_eq!(round_millis(2.0006), 2.001);
    }

    #[test]
    fn test_frame_file_name() {
        assert_eq!(frame_file_name("movie", 19.5, 30.0), "movie_frame_585.jpg");
        assert_eq!(frame_file_name("movie", 6.0, 24.0), "movie_frame_144.jpg");
        assert_eq!(
            frame_file_name("movie", 19.5, 30.0),
            frame_file_name("movie", 19.5, 30.0)
        );
    }

    #[test]
    fn test_frame_file_name_rounds() {
        // 33.0 * 29.97 = 989.01
        assert_eq!(frame_file_name("ep01", 33.0, 29.97), "ep01_frame_989.jpg");
        // 1.25 * 23.976 = 29.97
        assert_eq!(frame_file_name("ep01", 1.25, 23.976), "ep01_frame_30.jpg");
    }
}
