//! Price levels and volume statistics.

/// Percentile used for the support level.
pub const SUPPORT_PERCENTILE: f64 = 0.2;
/// Percentile used for the resistance level.
pub const RESISTANCE_PERCENTILE: f64 = 0.8;

/// Support and resistance from the distribution of closes.
///
/// Support is the 20th percentile and resistance the 80th, by nearest-rank
/// on the sorted closes (`sorted[floor(n * p)]`). Returns `None` for an
/// empty input.
pub fn support_resistance(closes: &[f64]) -> Option<(f64, f64)> {
    if closes.is_empty() {
        return None;
    }

    let mut sorted = closes.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pick = |p: f64| {
        let idx = (sorted.len() as f64 * p).floor() as usize;
        sorted[idx.min(sorted.len() - 1)]
    };

    Some((pick(SUPPORT_PERCENTILE), pick(RESISTANCE_PERCENTILE)))
}

/// Volume of the last point versus the mean over all points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeStats {
    pub current: f64,
    pub average: f64,
    /// `current / average`, 0 when the average is 0
    pub ratio: f64,
}

impl VolumeStats {
    pub fn from_volumes(volumes: &[f64]) -> Option<Self> {
        let current = *volumes.last()?;
        let average = volumes.iter().sum::<f64>() / volumes.len() as f64;
        let ratio = if average > 0.0 { current / average } else { 0.0 };
        Some(Self {
            current,
            average,
            ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_resistance_percentiles() {
        // Unsorted 1..=10
        let closes = vec![5.0, 3.0, 9.0, 1.0, 7.0, 2.0, 10.0, 4.0, 8.0, 6.0];
        let (support, resistance) = support_resistance(&closes).unwrap();

        // floor(10 * 0.2) = 2 -> 3.0, floor(10 * 0.8) = 8 -> 9.0
        assert_eq!(support, 3.0);
        assert_eq!(resistance, 9.0);
    }

    #[test]
    fn test_support_resistance_single_point() {
        assert_eq!(support_resistance(&[42.0]), Some((42.0, 42.0)));
        assert_eq!(support_resistance(&[]), None);
    }

    #[test]
    fn test_volume_stats() {
        let stats = VolumeStats::from_volumes(&[100.0, 100.0, 100.0, 300.0]).unwrap();
        assert_eq!(stats.current, 300.0);
        assert_eq!(stats.average, 150.0);
        assert_eq!(stats.ratio, 2.0);
    }

    #[test]
    fn test_volume_stats_zero_average() {
        let stats = VolumeStats::from_volumes(&[0.0, 0.0]).unwrap();
        assert_eq!(stats.ratio, 0.0);
        assert!(VolumeStats::from_volumes(&[]).is_none());
    }
}
