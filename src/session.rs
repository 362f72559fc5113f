//! Session controller
//!
//! Owns the game state and the two loops that drive it. A session goes
//! Idle -> Active on `start`, and back to Idle when the clock runs out.
//! Every state change is queued as a `GameEvent` for the HUD and audio
//! layers to pick up.

use std::fmt;

use crate::consts::SESSION_DURATIONS;
use crate::platform::{LoopHandle, LoopKind, ManualScheduler, Scheduler};
use crate::sim::{self, Direction, GameState, TickInput};

/// Something the outside world should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A session began with this many seconds on the clock
    Started { duration: u32 },
    /// The clock ticked
    TimeChanged { remaining: u32 },
    /// A piece was collected
    Collected { index: usize, score: u32 },
    /// Time ran out
    Ended { final_score: u32 },
}

/// Why a session could not start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// Only the fixed session lengths are allowed
    InvalidDuration { input: String },
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration { .. } => {
                write!(f, "Invalid choice! Please select 30 or 60 seconds.")
            }
        }
    }
}

impl std::error::Error for StartError {}

/// Parse a duration typed into the start prompt
///
/// Only the literal answers `30` and `60` are accepted (surrounding
/// whitespace aside). A cancelled prompt (`None`) is rejected like any
/// other bad answer.
pub fn parse_duration(input: Option<&str>) -> Result<u32, StartError> {
    let raw = input.unwrap_or_default();
    let answer = raw.trim();
    SESSION_DURATIONS
        .iter()
        .copied()
        .find(|d| d.to_string() == answer)
        .ok_or_else(|| StartError::InvalidDuration {
            input: raw.to_string(),
        })
}

/// Drives one game session at a time
pub struct SessionController<S: Scheduler> {
    state: GameState,
    scheduler: S,
    frame_loop: Option<LoopHandle>,
    timer_loop: Option<LoopHandle>,
    input: TickInput,
    events: Vec<GameEvent>,
}

impl<S: Scheduler> SessionController<S> {
    pub fn new(seed: u64, scheduler: S) -> Self {
        Self {
            state: GameState::new(seed),
            scheduler,
            frame_loop: None,
            timer_loop: None,
            input: TickInput::default(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Switch demo mode for the next session
    ///
    /// Locked while a session runs, so a live score is always played by hand.
    /// Returns whether the switch took effect.
    pub fn set_autopilot(&mut self, enabled: bool) -> bool {
        if self.state.is_active() {
            log::debug!("Autopilot locked during a session");
            return false;
        }
        self.input.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
        true
    }

    /// Start (or restart) a session
    ///
    /// Rejected durations leave everything untouched. Loops from a session
    /// still running are cancelled before new ones are scheduled.
    pub fn start(&mut self, duration: u32) -> Result<(), StartError> {
        if !SESSION_DURATIONS.contains(&duration) {
            log::warn!("Rejected session length {}", duration);
            return Err(StartError::InvalidDuration {
                input: duration.to_string(),
            });
        }

        self.cancel_loops();
        self.state.begin(duration);
        self.frame_loop = Some(self.scheduler.schedule(LoopKind::Frame));
        self.timer_loop = Some(self.scheduler.schedule(LoopKind::Timer));
        self.events.push(GameEvent::Started { duration });

        log::info!("Session started ({}s)", duration);
        Ok(())
    }

    /// Start from the raw answer to the duration prompt
    pub fn start_from_prompt(&mut self, input: Option<&str>) -> Result<(), StartError> {
        let duration = parse_duration(input)?;
        self.start(duration)
    }

    /// One second on the session clock
    pub fn tick(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let expired = sim::countdown(&mut self.state);
        self.events.push(GameEvent::TimeChanged {
            remaining: self.state.time_remaining,
        });
        if expired {
            self.end();
        }
    }

    /// One display frame
    pub fn advance_frame(&mut self) {
        if !self.state.is_active() {
            return;
        }
        sim::tick(&mut self.state, &self.input);
        if self.input.autopilot {
            self.collect();
        }
    }

    /// Try to grab garbage within reach; at most one piece per call
    pub fn collect(&mut self) -> Option<usize> {
        let index = sim::collect(&mut self.state)?;
        log::debug!("Collected piece {} (score {})", index, self.state.score);
        self.events.push(GameEvent::Collected {
            index,
            score: self.state.score,
        });
        Some(index)
    }

    /// Steer the player; ignored between sessions
    pub fn set_direction(&mut self, dir: Direction) {
        if self.state.is_active() {
            self.state.player.set_direction(dir);
        }
    }

    /// Finish the session and stop both loops
    pub fn end(&mut self) {
        if !self.state.is_active() {
            return;
        }
        self.cancel_loops();
        self.state.finish();
        self.events.push(GameEvent::Ended {
            final_score: self.state.score,
        });
        log::info!("Session over - final score {}", self.state.score);
    }

    /// Handle a loop firing reported by the scheduler
    ///
    /// Returns false for handles this controller no longer owns.
    pub fn on_loop(&mut self, handle: LoopHandle) -> bool {
        if Some(handle) == self.frame_loop {
            self.advance_frame();
            true
        } else if Some(handle) == self.timer_loop {
            self.tick();
            true
        } else {
            log::debug!("Ignoring stale loop {:?}", handle);
            false
        }
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn cancel_loops(&mut self) {
        if let Some(handle) = self.frame_loop.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.timer_loop.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl SessionController<ManualScheduler> {
    /// Deliver one firing to every live loop of the given kind
    ///
    /// Returns how many loops fired.
    pub fn fire(&mut self, kind: LoopKind) -> usize {
        let handles = self.scheduler.active(kind);
        let mut fired = 0;
        for handle in handles {
            // An earlier firing may have cancelled this one
            if self.scheduler.is_active(handle) && self.on_loop(handle) {
                fired += 1;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::GamePhase;
    use glam::Vec2;

    fn controller() -> SessionController<ManualScheduler> {
        SessionController::new(2024, ManualScheduler::new())
    }

    #[test]
    fn test_start_resets_state() {
        let mut c = controller();
        c.start(30).unwrap();
        let state = c.state();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_remaining, 30);
        assert_eq!(state.player.pos, Vec2::new(10.0, 200.0));
        assert!(state.garbage.iter().all(|g| g.pos.x == GARBAGE_SPAWN_X));
        assert_eq!(c.drain_events(), vec![GameEvent::Started { duration: 30 }]);
    }

    #[test]
    fn test_invalid_duration_changes_nothing() {
        let mut c = controller();
        let before = c.state().garbage.clone();
        let err = c.start_from_prompt(Some("45")).unwrap_err();
        assert_eq!(err, StartError::InvalidDuration { input: "45".into() });
        assert_eq!(err.to_string(), "Invalid choice! Please select 30 or 60 seconds.");
        assert_eq!(c.state().phase, GamePhase::Idle);
        assert_eq!(c.state().garbage, before);
        assert!(c.scheduler().active(LoopKind::Frame).is_empty());
        assert!(c.scheduler().active(LoopKind::Timer).is_empty());
        assert!(c.drain_events().is_empty());

        assert!(c.start(45).is_err());
        assert!(c.start_from_prompt(None).is_err());
        assert!(c.start_from_prompt(Some("thirty")).is_err());
        assert_eq!(c.state().phase, GamePhase::Idle);
    }

    #[test]
    fn test_invalid_restart_keeps_running_session() {
        let mut c = controller();
        c.start(60).unwrap();
        c.fire(LoopKind::Timer);
        assert!(c.start(10).is_err());
        assert_eq!(c.state().time_remaining, 59);
        assert!(c.is_active());
    }

    #[test]
    fn test_prompt_parsing() {
        assert_eq!(parse_duration(Some("30")), Ok(30));
        assert_eq!(parse_duration(Some(" 60\n")), Ok(60));
        assert!(parse_duration(Some("45")).is_err());
        assert!(parse_duration(Some("")).is_err());
        assert!(parse_duration(Some("-30")).is_err());
        assert!(parse_duration(None).is_err());
    }

    #[test]
    fn test_prompt_rejects_non_literal_numbers() {
        for answer in ["030", "+30", "0060", "+60", "30.0", "3 0"] {
            assert_eq!(
                parse_duration(Some(answer)),
                Err(StartError::InvalidDuration {
                    input: answer.to_string()
                }),
                "{:?} should be rejected",
                answer
            );
        }

        let mut c = controller();
        assert!(c.start_from_prompt(Some("+30")).is_err());
        assert!(!c.is_active());
        assert!(c.scheduler().active(LoopKind::Frame).is_empty());
    }

    #[test]
    fn test_autopilot_locked_during_session() {
        let mut c = controller();
        c.start(30).unwrap();
        assert!(!c.set_autopilot(true));
        assert!(!c.autopilot());

        // Standing next to garbage, nothing is collected without a key press
        c.state.garbage[0].pos = Vec2::new(55.0, 260.0);
        c.fire(LoopKind::Frame);
        assert_eq!(c.state().score, 0);

        c.end();
        assert!(c.set_autopilot(true));
        assert!(c.autopilot());
    }

    #[test]
    fn test_clock_runs_out_once() {
        let mut c = controller();
        c.start(30).unwrap();
        for _ in 0..29 {
            assert_eq!(c.fire(LoopKind::Timer), 1);
        }
        assert_eq!(c.state().time_remaining, 1);
        assert!(c.is_active());
        c.drain_events();

        c.fire(LoopKind::Timer);
        assert_eq!(c.state().time_remaining, 0);
        assert_eq!(c.state().phase, GamePhase::Idle);
        assert_eq!(
            c.drain_events(),
            vec![
                GameEvent::TimeChanged { remaining: 0 },
                GameEvent::Ended { final_score: 0 }
            ]
        );

        // Loops are gone, and direct ticks while idle do nothing
        assert_eq!(c.fire(LoopKind::Timer), 0);
        assert_eq!(c.fire(LoopKind::Frame), 0);
        c.tick();
        assert_eq!(c.state().time_remaining, 0);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn test_restart_replaces_loops() {
        let mut c = controller();
        c.start(30).unwrap();
        let old_frame = c.scheduler().active(LoopKind::Frame);
        c.fire(LoopKind::Timer);

        c.start(60).unwrap();
        assert_eq!(c.scheduler().active(LoopKind::Frame).len(), 1);
        assert_eq!(c.scheduler().active(LoopKind::Timer).len(), 1);
        assert_ne!(c.scheduler().active(LoopKind::Frame), old_frame);

        // One second after restart costs exactly one second
        assert_eq!(c.fire(LoopKind::Timer), 1);
        assert_eq!(c.state().time_remaining, 59);
    }

    #[test]
    fn test_stale_handles_ignored() {
        let mut c = controller();
        c.start(30).unwrap();
        let stale = c.scheduler().active(LoopKind::Timer)[0];
        c.start(30).unwrap();
        assert!(!c.on_loop(stale));
        assert_eq!(c.state().time_remaining, 30);
    }

    #[test]
    fn test_collect_scores_once_per_call() {
        let mut c = controller();
        c.start(30).unwrap();
        c.drain_events();
        {
            let state = &mut c.state;
            state.garbage[0].pos = Vec2::new(55.0, 260.0);
            state.garbage[2].pos = Vec2::new(50.0, 255.0);
        }

        assert_eq!(c.collect(), Some(0));
        assert_eq!(c.state().score, 1);
        assert_eq!(c.state().garbage[0].pos.x, GARBAGE_SPAWN_X);
        assert_eq!(c.state().garbage[2].pos, Vec2::new(50.0, 255.0));
        assert_eq!(
            c.drain_events(),
            vec![GameEvent::Collected { index: 0, score: 1 }]
        );
    }

    #[test]
    fn test_collect_when_idle_is_noop() {
        let mut c = controller();
        c.state.garbage[0].pos = Vec2::new(55.0, 260.0);
        assert_eq!(c.collect(), None);
        assert_eq!(c.state().score, 0);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn test_direction_ignored_when_idle() {
        let mut c = controller();
        c.set_direction(Direction::Right);
        assert_eq!(c.state().player.vel, Vec2::ZERO);

        c.start(30).unwrap();
        c.set_direction(Direction::Right);
        c.fire(LoopKind::Frame);
        assert_eq!(c.state().player.pos, Vec2::new(15.0, 200.0));
    }

    #[test]
    fn test_end_stops_player() {
        let mut c = controller();
        c.start(30).unwrap();
        c.set_direction(Direction::Down);
        c.end();
        assert_eq!(c.state().player.vel, Vec2::ZERO);
        assert!(c.scheduler().active(LoopKind::Frame).is_empty());

        // Ending twice reports once
        c.end();
        let ended = c
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Ended { .. }))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut c = controller();
        assert!(c.set_autopilot(true));
        c.start(30).unwrap();
        for _ in 0..30 {
            for _ in 0..60 {
                c.fire(LoopKind::Frame);
            }
            c.fire(LoopKind::Timer);
        }
        assert!(!c.is_active());
        assert!(c.state().score > 0);
    }
}
