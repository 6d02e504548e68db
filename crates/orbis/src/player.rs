//! Blocking frame loop for headless hosts.

use std::time::{Duration, Instant};

use orbis_chart::{BubbleChart, RenderSink};
use orbis_core::profiling::{new_frame, profile_function};

/// Blocking frame loop for hosts without their own animation-frame callback.
///
/// Drives a chart's sweep to completion, sleeping between frames to hold the
/// target rate.
///
/// # Example
/// ```ignore
/// let mut chart = BubbleChart::new(store, ChartConfig::default(), sink)?;
/// let frames = Player::new(Duration::from_millis(16)).play(&mut chart);
/// ```
#[derive(Debug, Clone)]
pub struct Player {
    /// Target time between frames
    frame_interval: Duration,
    /// Frames presented by the last `play`
    frame_count: u64,
}

impl Player {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            frame_count: 0,
        }
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Start the sweep and run frames until it finishes or is superseded.
    ///
    /// Returns the number of frames presented. A chart that is already running
    /// continues its current sweep.
    pub fn play<S: RenderSink>(&mut self, chart: &mut BubbleChart<S>) -> u64 {
        profile_function!();

        self.frame_count = 0;
        let mut ticket = chart.start().or(chart.pending_frame());

        while let Some(current) = ticket {
            let frame_start = Instant::now();
            new_frame();

            ticket = chart.on_frame(current);
            self.frame_count += 1;

            if ticket.is_some() {
                let spent = frame_start.elapsed();
                if let Some(remaining) = self.frame_interval.checked_sub(spent) {
                    std::thread::sleep(remaining);
                }
            }
        }

        tracing::debug!(
            "Played {} frames, stopped at {:.2}",
            self.frame_count,
            chart.state().current_year
        );
        self.frame_count
    }
}

impl Default for Player {
    /// Roughly 60 frames per second.
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbis_chart::{AnimationPhase, ChartConfig};
    use orbis_test_utils::{RecordingSink, fixtures};

    #[test]
    fn test_play_runs_sweep_to_end() {
        let sink = RecordingSink::new();
        let config = ChartConfig::default().with_sweep_duration(Duration::from_millis(40));
        let mut chart = BubbleChart::new(fixtures::store(), config, sink.clone()).unwrap();

        let frames = Player::new(Duration::from_millis(5)).play(&mut chart);

        assert!(frames >= 2);
        assert_eq!(sink.frame_count() as u64, frames);
        assert_eq!(sink.last().unwrap().display_year, fixtures::END_YEAR);
        assert_eq!(chart.state().phase, AnimationPhase::Finished);
    }

    #[test]
    fn test_zero_duration_is_one_frame() {
        let sink = RecordingSink::new();
        let config = ChartConfig::default().with_sweep_duration(Duration::ZERO);
        let mut chart = BubbleChart::new(fixtures::store(), config, sink.clone()).unwrap();

        let mut player = Player::default();
        assert_eq!(player.play(&mut chart), 1);
        assert_eq!(player.frame_count(), 1);
    }
}
