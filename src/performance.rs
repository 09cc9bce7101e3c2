use crate::settings;
use std::collections::VecDeque;
use std::time::Duration;

/// Frame times over the last `AVERAGE_FRAME_HISTORY_SIZE` frames, shown in development mode.
#[derive(Default)]
pub struct FrameInfo {
    frame_times: VecDeque<Duration>,
    total: Duration,
}

impl FrameInfo {
    pub fn record_frame_time(&mut self, frame_time: Duration) {
        self.frame_times.push_back(frame_time);
        self.total += frame_time;
        while self.frame_times.len() > settings::AVERAGE_FRAME_HISTORY_SIZE {
            if let Some(old) = self.frame_times.pop_front() {
                self.total = self.total.saturating_sub(old);
            }
        }
    }

    pub fn average(&self) -> Option<Duration> {
        let n = u32::try_from(self.frame_times.len()).ok().filter(|&n| n > 0)?;
        Some(self.total / n)
    }

    /// Slowest frame in the window; a spike here usually means a catch-up tick burst.
    pub fn worst(&self) -> Option<Duration> {
        self.frame_times.iter().max().copied()
    }

    pub fn summary(&self) -> String {
        match (self.average(), self.worst()) {
            (Some(avg), Some(worst)) => format!(
                "frame {:.2} ms avg, {:.2} ms worst (last {})",
                avg.as_secs_f64() * 1000.0,
                worst.as_secs_f64() * 1000.0,
                self.frame_times.len()
            ),
            _ => "frame --".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_and_worst_over_bounded_history() {
        let mut info = FrameInfo::default();
        assert_eq!(info.average(), None);
        assert_eq!(info.summary(), "frame --");
        for _ in 0..settings::AVERAGE_FRAME_HISTORY_SIZE {
            info.record_frame_time(Duration::from_millis(100));
        }
        assert_eq!(info.worst(), Some(Duration::from_millis(100)));
        for _ in 0..settings::AVERAGE_FRAME_HISTORY_SIZE {
            info.record_frame_time(Duration::from_millis(4));
        }
        assert_eq!(info.average(), Some(Duration::from_millis(4)));
        assert_eq!(info.worst(), Some(Duration::from_millis(4)));
    }
}
