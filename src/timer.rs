use std::time::Duration;

use instant::Instant;

/// Millisecond tick counter. Wraps like a 32-bit hardware tick count.
pub trait TickSource {
    fn ticks(&self) -> u32;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn ticks(&self) -> u32 {
        (**self).ticks()
    }
}

/// Wall-clock ticks since this source was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemTicks {
    epoch: Instant,
}

impl SystemTicks {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SystemTicks {
    fn ticks(&self) -> u32 {
        self.epoch.elapsed().as_millis() as u32
    }
}

/// Hand-advanced tick source for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualTicks(std::cell::Cell<u32>);

#[cfg(test)]
impl ManualTicks {
    pub fn at(ms: u32) -> Self {
        Self(std::cell::Cell::new(ms))
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

#[cfg(test)]
impl TickSource for ManualTicks {
    fn ticks(&self) -> u32 {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Stopped,
    /// Running since `start` ticks (shifted back over any paused span).
    Running { start: u32 },
    /// Frozen with `elapsed` ticks on the clock.
    Paused { elapsed: u32 },
}

/// Stopwatch over a [`TickSource`] with pause support.
///
/// Paused implies started: the state is a single enum, so a stopped timer
/// can never report itself paused.
#[derive(Debug)]
pub struct Timer<C: TickSource = SystemTicks> {
    clock: C,
    state: TimerState,
}

impl<C: TickSource> Timer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: TimerState::Stopped,
        }
    }

    /// Start (or restart) from zero. Always succeeds.
    pub fn start(&mut self) {
        self.state = TimerState::Running {
            start: self.clock.ticks(),
        };
    }

    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Freeze the elapsed count. No-op unless running.
    pub fn pause(&mut self) {
        if let TimerState::Running { start } = self.state {
            self.state = TimerState::Paused {
                elapsed: self.clock.ticks().wrapping_sub(start),
            };
        }
    }

    /// Resume counting from the frozen value. No-op unless paused.
    pub fn unpause(&mut self) {
        if let TimerState::Paused { elapsed } = self.state {
            self.state = TimerState::Running {
                start: self.clock.ticks().wrapping_sub(elapsed),
            };
        }
    }

    /// Elapsed milliseconds: 0 when stopped, frozen while paused.
    pub fn ticks(&self) -> u32 {
        match self.state {
            TimerState::Stopped => 0,
            TimerState::Running { start } => self.clock.ticks().wrapping_sub(start),
            TimerState::Paused { elapsed } => elapsed,
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.state, TimerState::Stopped)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, TimerState::Paused { .. })
    }
}

impl Default for Timer<SystemTicks> {
    fn default() -> Self {
        Self::new(SystemTicks::new())
    }
}

/// Time left in the frame budget, or `None` if the frame already used it up.
/// Overruns are not caught up.
pub fn frame_delay(elapsed_ms: u32, budget_ms: u32) -> Option<Duration> {
    (elapsed_ms < budget_ms).then(|| Duration::from_millis(u64::from(budget_ms - elapsed_ms)))
}
