use std::time::Duration;

/// Order statistics over a set of timed trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    pub count: usize,
    pub min: Duration,
    pub median: Duration,
    pub mean: Duration,
    pub max: Duration,
}

impl TimingSummary {
    /// `None` for an empty sample.
    pub fn from_durations(samples: &[Duration]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2
        } else {
            sorted[mid]
        };
        let total: Duration = sorted.iter().sum();
        // Trial counts are far below u32::MAX.
        let divisor = u32::try_from(count).unwrap_or(u32::MAX);

        Some(Self {
            count,
            min: sorted[0],
            median,
            mean: total / divisor,
            max: sorted[count - 1],
        })
    }

    pub fn min_ms(&self) -> f64 {
        ms(self.min)
    }

    pub fn median_ms(&self) -> f64 {
        ms(self.median)
    }

    pub fn mean_ms(&self) -> f64 {
        ms(self.mean)
    }

    pub fn max_ms(&self) -> f64 {
        ms(self.max)
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(v: &[u64]) -> Vec<Duration> {
        v.iter().map(|&x| Duration::from_millis(x)).collect()
    }

    #[test]
    fn test_odd_count() {
        let s = TimingSummary::from_durations(&millis(&[9, 1, 5])).unwrap();
        assert_eq!(s.min, Duration::from_millis(1));
        assert_eq!(s.median, Duration::from_millis(5));
        assert_eq!(s.mean, Duration::from_millis(5));
        assert_eq!(s.max, Duration::from_millis(9));
    }

    #[test]
    fn test_even_count_median_is_midpoint() {
        let s = TimingSummary::from_durations(&millis(&[4, 1, 2, 10])).unwrap();
        assert_eq!(s.median, Duration::from_millis(3));
        assert!((s.mean_ms() - 4.25).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample() {
        let s = TimingSummary::from_durations(&millis(&[7])).unwrap();
        assert_eq!((s.min, s.median, s.max), (s.mean, s.mean, s.mean));
    }

    #[test]
    fn test_empty() {
        assert!(TimingSummary::from_durations(&[]).is_none());
    }
}
