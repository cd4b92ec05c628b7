//! Frame timing statistics

use std::time::{Duration, Instant};

/// Default interval between frame-rate reports.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Summary of the frames drawn since the previous report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frames drawn in the window.
    pub frames: u64,
    /// Length of the window.
    pub elapsed: Duration,
    /// `frames / elapsed`.
    pub fps: f64,
}

/// Counts frames and emits a [`FrameReport`] at most once per interval.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    window_start: Option<Instant>,
    frames: u64,
    total_frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_INTERVAL)
    }
}

impl FrameStats {
    /// Report every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_start: None,
            frames: 0,
            total_frames: 0,
        }
    }

    /// Frames recorded since creation.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Record a frame presented at `now`.
    ///
    /// The first call only opens the window. Returns a report once `interval`
    /// has elapsed since the window opened, then starts a new window at `now`.
    pub fn record(&mut self, now: Instant) -> Option<FrameReport> {
        self.total_frames += 1;

        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return None;
        };

        self.frames += 1;
        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.interval || elapsed.is_zero() {
            return None;
        }

        let report = FrameReport {
            frames: self.frames,
            elapsed,
            fps: self.frames as f64 / elapsed.as_secs_f64(),
        };
        self.window_start = Some(now);
        self.frames = 0;
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_opens_window() {
        let mut stats = FrameStats::default();
        assert!(stats.record(Instant::now()).is_none());
        assert_eq!(stats.total_frames(), 1);
    }

    #[test]
    fn test_reports_after_interval() {
        let mut stats = FrameStats::new(Duration::from_secs(1));
        let start = Instant::now();
        assert!(stats.record(start).is_none());

        for i in 1..60 {
            let at = start + Duration::from_millis(i * 1000 / 60);
            assert!(stats.record(at).is_none(), "frame {i} reported early");
        }

        let report = stats.record(start + Duration::from_secs(1)).unwrap();
        assert_eq!(report.frames, 60);
        assert_eq!(report.elapsed, Duration::from_secs(1));
        assert!((report.fps - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_window_restarts_after_report() {
        let mut stats = FrameStats::new(Duration::from_millis(100));
        let start = Instant::now();
        stats.record(start);
        assert!(stats.record(start + Duration::from_millis(100)).is_some());

        assert!(stats.record(start + Duration::from_millis(150)).is_none());
        let report = stats.record(start + Duration::from_millis(200)).unwrap();
        assert_eq!(report.frames, 2);
        assert_eq!(stats.total_frames(), 4);
    }

    #[test]
    fn test_zero_interval_never_divides_by_zero() {
        let mut stats = FrameStats::new(Duration::ZERO);
        let now = Instant::now();
        stats.record(now);
        assert!(stats.record(now).is_none());
        assert!(stats.record(now + Duration::from_millis(5)).is_some());
    }
}
