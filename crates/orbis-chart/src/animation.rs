//! Year sweep state machine.
//!
//! The controller maps wall-clock progress onto the chart's year range. A
//! sweep always runs for the configured duration, from whatever year is
//! current to the end year, so resuming late in the range moves slower.
//!
//! # Example
//!
//! ```ignore
//! use orbis_chart::*;
//!
//! let mut controller = AnimationController::new(years, duration, ResetPolicy::Restart, clock);
//!
//! // Start a sweep; the ticket identifies it
//! let mut ticket = controller.start();
//!
//! // Once per animation frame
//! while let Some(t) = ticket {
//!     match controller.advance(t) {
//!         FrameOutcome::Tick { year, next } => {
//!             redraw(year);
//!             ticket = next;
//!         }
//!         FrameOutcome::Stale => break,
//!     }
//! }
//! ```

use std::time::Duration;

use crate::clock::Clock;
use crate::config::{ResetPolicy, YearRange};

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// Not started yet, or rewound
    Idle,
    /// A sweep is in flight
    Running,
    /// Sweep cancelled, year frozen
    Paused,
    /// The sweep reached the end year and holds there
    Finished,
}

/// Snapshot of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Year of the last computed frame
    pub current_year: f64,
    /// First year of the range
    pub start_year: f64,
    /// Last year of the range
    pub end_year: f64,
    /// Wall-clock length of one sweep
    pub duration: Duration,
    /// Current phase
    pub phase: AnimationPhase,
}

/// Permission to apply one frame of a specific sweep.
///
/// Tickets from a sweep that was paused, reset or restarted are rejected, so a
/// frame callback scheduled before the change can never apply a stale year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket {
    generation: u64,
}

/// Result of presenting a ticket to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The ticket belongs to a superseded sweep; nothing changed.
    Stale,
    /// The year advanced.
    Tick {
        /// Year for this frame
        year: f64,
        /// Ticket for the next frame, `None` once the end year is reached
        next: Option<FrameTicket>,
    },
}

#[derive(Debug, Clone, Copy)]
struct Sweep {
    from_year: f64,
    started_at: Duration,
}

/// Clock-driven sweep over a year range with start/pause/reset controls.
#[derive(Debug)]
pub struct AnimationController {
    state: AnimationState,
    reset_policy: ResetPolicy,
    clock: Box<dyn Clock>,
    sweep: Option<Sweep>,
    generation: u64,
}

impl AnimationController {
    /// Create an idle controller positioned at the start year.
    pub fn new(
        years: YearRange,
        duration: Duration,
        reset_policy: ResetPolicy,
        clock: Box<dyn Clock>,
    ) -> Self {
        let start_year = years.start() as f64;
        Self {
            state: AnimationState {
                current_year: start_year,
                start_year,
                end_year: years.end() as f64,
                duration,
                phase: AnimationPhase::Idle,
            },
            reset_policy,
            clock,
            sweep: None,
            generation: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[inline]
    pub fn current_year(&self) -> f64 {
        self.state.current_year
    }

    #[inline]
    pub fn phase(&self) -> AnimationPhase {
        self.state.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.phase == AnimationPhase::Running
    }

    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// Ticket for the next frame of the running sweep, if any.
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.sweep.map(|_| FrameTicket {
            generation: self.generation,
        })
    }

    /// Begin or resume a sweep from the current year to the end year.
    ///
    /// Returns `None` without changing anything when a sweep is already running.
    pub fn start(&mut self) -> Option<FrameTicket> {
        if self.is_running() {
            tracing::debug!("start() ignored: sweep already running");
            return None;
        }

        self.generation = self.generation.wrapping_add(1);
        self.sweep = Some(Sweep {
            from_year: self.state.current_year,
            started_at: self.clock.now(),
        });
        self.state.phase = AnimationPhase::Running;

        tracing::debug!(
            "Sweep {} started: {:.2} -> {} over {:?}",
            self.generation,
            self.state.current_year,
            self.state.end_year,
            self.state.duration
        );

        self.pending_frame()
    }

    /// Cancel the running sweep, freezing the year at the last computed frame.
    pub fn pause(&mut self) {
        if !self.is_running() {
            tracing::debug!("pause() ignored: phase is {:?}", self.state.phase);
            return;
        }

        self.cancel();
        self.state.phase = AnimationPhase::Paused;
        tracing::debug!("Sweep paused at {:.2}", self.state.current_year);
    }

    /// Rewind to the start year, then restart or idle according to the reset policy.
    pub fn reset(&mut self) -> Option<FrameTicket> {
        self.cancel();
        self.state.current_year = self.state.start_year;
        self.state.phase = AnimationPhase::Idle;

        match self.reset_policy {
            ResetPolicy::Restart => self.start(),
            ResetPolicy::Rewind => None,
        }
    }

    /// Compute the year for the current wall-clock time.
    ///
    /// The fraction `elapsed / duration` is clamped to `[0, 1]`; reaching 1
    /// finishes the sweep at exactly the end year.
    pub fn advance(&mut self, ticket: FrameTicket) -> FrameOutcome {
        if ticket.generation != self.generation {
            tracing::trace!(
                "Dropping frame of sweep {} (current {})",
                ticket.generation,
                self.generation
            );
            return FrameOutcome::Stale;
        }
        let Some(sweep) = self.sweep else {
            return FrameOutcome::Stale;
        };

        let fraction = self.fraction(sweep);
        if fraction >= 1.0 {
            self.state.current_year = self.state.end_year;
            self.cancel();
            self.state.phase = AnimationPhase::Finished;
            tracing::debug!("Sweep finished at {}", self.state.end_year);
            return FrameOutcome::Tick {
                year: self.state.end_year,
                next: None,
            };
        }

        let year = sweep.from_year + (self.state.end_year - sweep.from_year) * fraction;
        self.state.current_year = year;
        FrameOutcome::Tick {
            year,
            next: Some(ticket),
        }
    }

    fn fraction(&self, sweep: Sweep) -> f64 {
        if self.state.duration.is_zero() {
            return 1.0;
        }
        let elapsed = self.clock.now().saturating_sub(sweep.started_at);
        (elapsed.as_secs_f64() / self.state.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Invalidate every outstanding ticket.
    fn cancel(&mut self) {
        self.sweep = None;
        self.generation = self.generation.wrapping_add(1);
    }
}
