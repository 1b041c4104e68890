//! Countdown timer driven by the host tick loop
//!
//! A [`TimerService`] counts down a duration in time units. The host calls
//! [`TimerService::advance`] once per host tick; every `ticks_per_unit` host
//! ticks one unit elapses and the handlers fire:
//!
//! - `on_tick` every unit while running
//! - `on_announce` on the announce cadence (never on the final unit)
//! - `on_complete` exactly once when the duration runs out
//!
//! The timer lives inside its owner (the context `C`) and is reached through a
//! slot accessor on every step, so a handler may cancel the very timer that is
//! calling it. Once cancelled or completed, nothing else fires.

/// Timer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Timer length and cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSpec {
    /// Total duration in time units
    pub duration: u32,
    /// Host ticks per time unit
    pub ticks_per_unit: u32,
    /// Announce when the remaining units are a multiple of this (0 disables)
    pub announce_every: u32,
    /// Announce every unit once remaining drops to this value
    pub final_stretch: u32,
}

impl TimerSpec {
    pub fn should_announce(&self, remaining: u32) -> bool {
        if remaining == 0 {
            return false;
        }
        remaining <= self.final_stretch
            || (self.announce_every > 0 && remaining % self.announce_every == 0)
    }
}

/// The three callbacks of a timer
pub struct TimerHandlers<C> {
    /// Fired every unit with the remaining units
    pub on_tick: fn(&mut C, u32),
    /// Fired on the announce cadence with the remaining units
    pub on_announce: fn(&mut C, u32),
    /// Fired once when the duration elapses
    pub on_complete: fn(&mut C),
}

impl<C> Clone for TimerHandlers<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for TimerHandlers<C> {}

/// Locates a timer inside its owner
pub type TimerSlot<C> = fn(&mut C) -> Option<&mut TimerService<C>>;

/// A single countdown instance
pub struct TimerService<C> {
    label: &'static str,
    spec: TimerSpec,
    handlers: TimerHandlers<C>,
    state: TimerState,
    remaining: u32,
    ticks_into_unit: u32,
}

impl<C> TimerService<C> {
    pub fn new(label: &'static str, spec: TimerSpec, handlers: TimerHandlers<C>) -> Self {
        Self {
            label,
            spec,
            handlers,
            state: TimerState::Idle,
            remaining: spec.duration,
            ticks_into_unit: 0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Remaining time units
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// `Idle -> Running`; returns false if the timer was already started
    pub fn start(&mut self) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// `Running -> Cancelled`. Idempotent; a finished timer ignores it.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            TimerState::Running | TimerState::Idle => {
                self.state = TimerState::Cancelled;
                true
            }
            TimerState::Completed | TimerState::Cancelled => false,
        }
    }

    /// Fire `on_announce` with the full remaining time, for start-of-timer notices
    pub fn announce_now(ctx: &mut C, slot: TimerSlot<C>) {
        let (remaining, handlers) = match slot(ctx) {
            Some(timer) if timer.is_running() => (timer.remaining, timer.handlers),
            _ => return,
        };
        (handlers.on_announce)(ctx, remaining);
    }

    /// Advance by one host tick
    pub fn advance(ctx: &mut C, slot: TimerSlot<C>) {
        let (remaining, handlers) = {
            let Some(timer) = slot(ctx) else {
                return;
            };
            if !timer.is_running() {
                return;
            }
            timer.ticks_into_unit += 1;
            if timer.ticks_into_unit < timer.spec.ticks_per_unit.max(1) {
                return;
            }
            timer.ticks_into_unit = 0;
            timer.remaining = timer.remaining.saturating_sub(1);
            (timer.remaining, timer.handlers)
        };

        (handlers.on_tick)(ctx, remaining);

        // on_tick may have cancelled us
        let announce = match slot(ctx) {
            Some(timer) if timer.is_running() => {
                if remaining == 0 {
                    timer.state = TimerState::Completed;
                    false
                } else {
                    timer.spec.should_announce(remaining)
                }
            }
            _ => return,
        };

        if remaining == 0 {
            (handlers.on_complete)(ctx);
        } else if announce {
            (handlers.on_announce)(ctx, remaining);
        }
    }
}

impl<C> std::fmt::Debug for TimerService<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerService")
            .field("label", &self.label)
            .field("state", &self.state)
            .field("remaining", &self.remaining)
            .finish()
    }
}
