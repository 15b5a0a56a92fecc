//! Play / pause / single-step control over the selected algorithm.
//!
//! The controller never owns a clock. It asks a [`Scheduler`] for a repeating timer and the host
//! delivers each tick back through [`Controller::tick`] with the timer's id. Ticks carrying an id
//! that is no longer current are dropped, and every state-changing action cancels the pending
//! timer before it touches the workspace, so at most one timer ever advances a run.

use crate::algorithms::{
    Algorithm, DONE, NO_PATH, Registry, RunOutcome, StepOutcome, Workspace,
};
use crate::error::{EngineError, Result};
use crate::util::{clog, cwarn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Source of cancellable repeating timers.
pub trait Scheduler {
    fn start(&mut self, period_ms: u32) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running {
        timer: TimerId,
        algorithm: String,
        speed_ms: u32,
    },
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// A repeating timer now drives the run.
    Started,
    /// Zero speed: the whole run happened inside the call.
    Completed(RunOutcome),
    AlreadySolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Stepped,
    /// The workspace was solved; the timer is gone.
    Completed,
    /// The algorithm gave up; the timer is gone.
    Exhausted,
    /// Tick from a timer that is no longer current.
    Ignored,
}

impl StartOutcome {
    /// Message the user should see for this outcome, if any.
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Started => None,
            Self::Completed(run) => run.notice(),
            Self::AlreadySolved => Some(DONE),
        }
    }
}

impl TickOutcome {
    /// A run that finishes on a tick ends quietly; only a dead end is reported.
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Exhausted => Some(NO_PATH),
            Self::Stepped | Self::Completed | Self::Ignored => None,
        }
    }
}

struct ActiveRun<W: Workspace> {
    key: String,
    algorithm: Box<dyn Algorithm<W>>,
}

pub struct Controller<W: Workspace, S: Scheduler> {
    registry: Registry<W>,
    scheduler: S,
    phase: Phase,
    active: Option<ActiveRun<W>>,
}

impl<W: Workspace, S: Scheduler> Controller<W, S> {
    pub fn new(registry: Registry<W>, scheduler: S) -> Self {
        Self {
            registry,
            scheduler,
            phase: Phase::Idle,
            active: None,
        }
    }

    pub fn registry(&self) -> &Registry<W> {
        &self.registry
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Key of the algorithm instance holding resume state, if any.
    pub fn active_key(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.key.as_str())
    }

    fn check(&self, key: &str) -> Result<()> {
        if self.active_key() == Some(key) || self.registry.contains(key) {
            Ok(())
        } else {
            cwarn(&format!("rejected algorithm key: {key}"));
            Err(EngineError::not_implemented(key))
        }
    }

    /// Reuse the live instance for `key` or build a fresh one. Nothing changes on error.
    fn resolve(&mut self, key: &str) -> Result<()> {
        if self.active_key() == Some(key) {
            return Ok(());
        }
        let algorithm = self.registry.create(key)?;
        self.active = Some(ActiveRun {
            key: key.to_string(),
            algorithm,
        });
        Ok(())
    }

    fn algorithm(&mut self) -> Option<&mut Box<dyn Algorithm<W>>> {
        self.active.as_mut().map(|a| &mut a.algorithm)
    }

    /// Start animating `key` every `speed_ms`. A speed of zero solves synchronously.
    pub fn start(&mut self, key: &str, speed_ms: u32, ws: &mut W) -> Result<StartOutcome> {
        ws.ready()?;
        self.check(key)?;
        self.stop();
        self.resolve(key)?;
        if ws.is_solved() {
            return Ok(StartOutcome::AlreadySolved);
        }
        if speed_ms == 0 {
            let outcome = match self.algorithm() {
                Some(alg) => alg.run(ws),
                None => RunOutcome::AlreadySolved,
            };
            clog(&format!("run {key}: {outcome:?}"));
            self.phase = Phase::Stopped;
            return Ok(StartOutcome::Completed(outcome));
        }
        let timer = self.scheduler.start(speed_ms);
        clog(&format!("start {key} every {speed_ms}ms"));
        self.phase = Phase::Running {
            timer,
            algorithm: key.to_string(),
            speed_ms,
        };
        Ok(StartOutcome::Started)
    }

    /// Handle one timer tick.
    pub fn tick(&mut self, timer: TimerId, ws: &mut W) -> TickOutcome {
        match &self.phase {
            Phase::Running { timer: current, .. } if *current == timer => {}
            _ => return TickOutcome::Ignored,
        }
        if ws.is_solved() {
            self.stop();
            clog("run complete");
            return TickOutcome::Completed;
        }
        let outcome = match self.algorithm() {
            Some(alg) => alg.step(ws),
            None => StepOutcome::Exhausted,
        };
        match outcome {
            StepOutcome::Advanced => TickOutcome::Stepped,
            StepOutcome::AlreadySolved => {
                self.stop();
                TickOutcome::Completed
            }
            StepOutcome::Exhausted => {
                self.stop();
                clog("run exhausted");
                TickOutcome::Exhausted
            }
        }
    }

    /// Cancel the running timer, if any. Safe to call at any time.
    pub fn stop(&mut self) {
        if let Phase::Running { timer, .. } = self.phase {
            self.scheduler.cancel(timer);
            self.phase = Phase::Stopped;
        }
    }

    /// Stop, then advance `key` by exactly one step.
    pub fn single_step(&mut self, key: &str, ws: &mut W) -> Result<StepOutcome> {
        ws.ready()?;
        self.check(key)?;
        self.stop();
        self.resolve(key)?;
        Ok(match self.algorithm() {
            Some(alg) => alg.step(ws),
            None => StepOutcome::Exhausted,
        })
    }

    /// Stop, then run `key` to completion synchronously.
    pub fn run_to_completion(&mut self, key: &str, ws: &mut W) -> Result<RunOutcome> {
        ws.ready()?;
        self.check(key)?;
        self.stop();
        self.resolve(key)?;
        Ok(match self.algorithm() {
            Some(alg) => alg.run(ws),
            None => RunOutcome::AlreadySolved,
        })
    }

    /// Restart a running animation with a new period. No effect when not running.
    pub fn change_speed(&mut self, speed_ms: u32, ws: &mut W) -> Result<Option<StartOutcome>> {
        let Phase::Running { algorithm, .. } = &self.phase else {
            return Ok(None);
        };
        let key = algorithm.clone();
        self.start(&key, speed_ms, ws).map(Some)
    }

    /// Stop and forget the algorithm's resume state; the workspace was replaced.
    pub fn invalidate(&mut self) {
        self.stop();
        self.active = None;
        self.phase = Phase::Idle;
    }
}

/// Scheduler that only records what it was asked to do. Ticks are delivered by hand.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    next_id: u64,
    pub live: Vec<(TimerId, u32)>,
    pub started: Vec<(TimerId, u32)>,
    pub cancelled: Vec<TimerId>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_timer(&self) -> Option<TimerId> {
        self.live.last().map(|(id, _)| *id)
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, period_ms: u32) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.live.push((id, period_ms));
        self.started.push((id, period_ms));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.live.retain(|(t, _)| *t != id);
        self.cancelled.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::sorting_registry;
    use crate::model::SortState;
    use crate::util::uniform;

    fn controller() -> Controller<SortState, ManualScheduler> {
        Controller::new(sorting_registry(), ManualScheduler::new())
    }

    fn shuffled() -> SortState {
        let mut s = SortState::ramp(20, 100);
        s.shuffle(uniform(1));
        s
    }

    #[test]
    fn start_creates_one_timer() {
        let mut c = controller();
        let mut s = shuffled();
        assert_eq!(c.start("bubble", 100, &mut s).unwrap(), StartOutcome::Started);
        assert!(c.is_running());
        assert_eq!(c.scheduler().live.len(), 1);
        // restarting never leaves two live timers
        c.start("bubble", 50, &mut s).unwrap();
        assert_eq!(c.scheduler().live, vec![(TimerId(2), 50)]);
    }

    #[test]
    fn unknown_key_leaves_running_state() {
        let mut c = controller();
        let mut s = shuffled();
        c.start("bubble", 100, &mut s).unwrap();
        let before = c.phase().clone();
        assert!(matches!(
            c.start("quick", 100, &mut s),
            Err(EngineError::NotImplemented { .. })
        ));
        assert!(matches!(
            c.single_step("quick", &mut s),
            Err(EngineError::NotImplemented { .. })
        ));
        assert_eq!(c.phase(), &before);
        assert_eq!(c.active_key(), Some("bubble"));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut c = controller();
        c.stop();
        assert_eq!(c.phase(), &Phase::Idle);
        let mut s = shuffled();
        c.start("bubble", 100, &mut s).unwrap();
        c.stop();
        c.stop();
        assert_eq!(c.phase(), &Phase::Stopped);
        assert_eq!(c.scheduler().cancelled.len(), 1);
    }

    #[test]
    fn tick_after_stop_is_ignored() {
        let mut c = controller();
        let mut s = shuffled();
        c.start("bubble", 100, &mut s).unwrap();
        let timer = c.scheduler().live_timer().unwrap();
        assert_eq!(c.tick(timer, &mut s), TickOutcome::Stepped);
        c.stop();
        let before = s.clone();
        assert_eq!(c.tick(timer, &mut s), TickOutcome::Ignored);
        assert_eq!(s, before);
        assert_eq!(c.phase(), &Phase::Stopped);
        assert!(c.scheduler().live.is_empty());
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let mut c = controller();
        let mut s = shuffled();
        c.start("bubble", 100, &mut s).unwrap();
        let old = c.scheduler().live_timer().unwrap();
        c.change_speed(30, &mut s).unwrap();
        let before = s.clone();
        assert_eq!(c.tick(old, &mut s), TickOutcome::Ignored);
        assert_eq!(s, before);
        let new = c.scheduler().live_timer().unwrap();
        assert_eq!(c.tick(new, &mut s), TickOutcome::Stepped);
    }

    #[test]
    fn change_speed_when_idle_does_nothing() {
        let mut c = controller();
        let mut s = shuffled();
        assert_eq!(c.change_speed(10, &mut s).unwrap(), None);
        assert!(c.scheduler().started.is_empty());
    }

    #[test]
    fn single_step_stops_the_timer() {
        let mut c = controller();
        let mut s = shuffled();
        c.start("bubble", 100, &mut s).unwrap();
        assert_eq!(c.single_step("bubble", &mut s).unwrap(), StepOutcome::Advanced);
        assert!(!c.is_running());
        assert!(c.scheduler().live.is_empty());
    }

    #[test]
    fn start_on_solved_input_schedules_nothing() {
        let mut c = controller();
        let mut s = SortState::ramp(10, 100);
        assert_eq!(
            c.start("bubble", 100, &mut s).unwrap(),
            StartOutcome::AlreadySolved
        );
        assert!(c.scheduler().started.is_empty());
    }

    #[test]
    fn solved_input_reports_done() {
        let mut c = controller();
        let mut s = SortState::ramp(10, 100);
        let start = c.start("bubble", 100, &mut s).unwrap();
        assert_eq!(start.notice(), Some(DONE));
        let zero_speed = c.start("bubble", 0, &mut s).unwrap();
        assert_eq!(zero_speed.notice(), Some(DONE));
        let step = c.single_step("bubble", &mut s).unwrap();
        assert_eq!(step.notice(), Some(DONE));
        let run = c.run_to_completion("bubble", &mut s).unwrap();
        assert_eq!(run.notice(), Some(DONE));
    }

    #[test]
    fn progress_is_not_reported() {
        let mut c = controller();
        let mut s = shuffled();
        assert_eq!(c.start("bubble", 100, &mut s).unwrap().notice(), None);
        let timer = c.scheduler().live_timer().unwrap();
        assert_eq!(c.tick(timer, &mut s).notice(), None);
        assert_eq!(c.run_to_completion("bubble", &mut s).unwrap().notice(), None);
        assert_eq!(TickOutcome::Completed.notice(), None);
        assert_eq!(TickOutcome::Exhausted.notice(), Some(NO_PATH));
    }

    #[test]
    fn invalidate_drops_resume_state() {
        let mut c = controller();
        let mut s = shuffled();
        c.single_step("bubble", &mut s).unwrap();
        assert_eq!(c.active_key(), Some("bubble"));
        c.invalidate();
        assert_eq!(c.active_key(), None);
        assert_eq!(c.phase(), &Phase::Idle);
    }
}
