#![cfg_attr(not(test), no_std)]

//! Click sequence detection for a single debounced button.
//!
//! [`SequenceTracker::check_sequence`] is polled from the main loop and
//! returns:
//!
//! * `0` while nothing has finished,
//! * `n` when a run of `n` short clicks ended because no further press
//!   arrived within the release interval,
//! * `-n` when `n` presses ended with the last one held past the long
//!   interval, a single long hold being `-1`.
//!
//! One tracker handles one button. Use one instance per button.

mod config;

pub use config::{
    ActiveLevel, SequenceConfig, DEFAULT_DEBOUNCE, DEFAULT_LONG_CLICK, DEFAULT_RELEASE,
};
pub use debounce::{
    check_interval, Debouncer, Detached, Error, FnSource, IntervalTooLong, PinSource, Sample,
};

use core::convert::Infallible;
use embedded_time::duration::Milliseconds;
use embedded_time::{clock, Clock, Instant};

enum Phase<C: Clock<T = u32>> {
    Idle,
    /// Pressed, timing for a long hold.
    Held { deadline: Instant<C> },
    /// Released mid sequence, waiting for another press.
    Released { deadline: Instant<C> },
}

pub struct SequenceTracker<'a, S, C: Clock<T = u32>> {
    debouncer: Debouncer<'a, S, C>,
    active_level: ActiveLevel,
    long_interval: Milliseconds<u32>,
    release_interval: Milliseconds<u32>,
    pressed: bool,
    click_count: i32,
    phase: Phase<C>,
}

impl<'a, S, C> SequenceTracker<'a, S, C>
where
    S: Sample,
    C: Clock<T = u32>,
{
    pub fn new(source: S, clock: &'a C, config: SequenceConfig) -> Result<Self, Error<S::Error>> {
        let debouncer = Debouncer::attach(source, clock, config.debounce_interval)?;
        Self::from_debouncer(debouncer, config).map_err(Error::Interval)
    }

    /// Sample the button and advance the sequence.
    pub fn check_sequence(&mut self) -> Result<i32, Error<S::Error>> {
        let value = self.debouncer.sample()?;
        let now = self.debouncer.clock().try_now()?;
        let changed = self.debouncer.update_at(value, now);
        Ok(self.advance(changed, now))
    }

    /// Drop any sequence in progress and re-arm from a fresh sample.
    pub fn reset(&mut self) -> Result<(), Error<S::Error>> {
        self.debouncer.start()?;
        self.clear();
        Ok(())
    }
}

impl<'a, C> SequenceTracker<'a, Detached, C>
where
    C: Clock<T = u32>,
{
    /// A tracker fed through [`SequenceTracker::check_sequence_with`].
    pub fn detached(
        clock: &'a C,
        initial: bool,
        config: SequenceConfig,
    ) -> Result<Self, Error<Infallible>> {
        let debouncer = Debouncer::detached(clock, initial, config.debounce_interval)?;
        Self::from_debouncer(debouncer, config).map_err(Error::Interval)
    }
}

impl<'a, S, C> SequenceTracker<'a, S, C>
where
    C: Clock<T = u32>,
{
    fn from_debouncer(
        debouncer: Debouncer<'a, S, C>,
        config: SequenceConfig,
    ) -> Result<Self, IntervalTooLong> {
        Ok(Self {
            pressed: config.active_level.is_active(debouncer.read()),
            debouncer,
            active_level: config.active_level,
            long_interval: check_interval::<C>(config.long_interval)?,
            release_interval: check_interval::<C>(config.release_interval)?,
            click_count: 0,
            phase: Phase::Idle,
        })
    }

    /// Advance the sequence with a raw level read by the caller.
    pub fn check_sequence_with(&mut self, value: bool) -> Result<i32, clock::Error> {
        let now = self.debouncer.clock().try_now()?;
        let changed = self.debouncer.update_at(value, now);
        Ok(self.advance(changed, now))
    }

    /// Drop any sequence in progress and re-arm from a passed raw level.
    pub fn reset_with(&mut self, value: bool) -> Result<(), clock::Error> {
        self.debouncer.start_with(value)?;
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.click_count = 0;
        self.phase = Phase::Idle;
        self.pressed = self.active_level.is_active(self.debouncer.read());
    }

    fn advance(&mut self, changed: bool, now: Instant<C>) -> i32 {
        // a debounced edge always wins over a timer expiring on the same call
        if changed {
            self.pressed = self.active_level.is_active(self.debouncer.read());

            if self.pressed {
                self.click_count = self.click_count.saturating_add(1);
                self.phase = Phase::Held {
                    deadline: now + self.long_interval,
                };
                log::trace!("press {}", self.click_count);
            } else if self.click_count > 0 {
                self.phase = Phase::Released {
                    deadline: now + self.release_interval,
                };
                log::trace!("release {}", self.click_count);
            }
            return 0;
        }

        let result = match self.phase {
            Phase::Idle => 0,
            Phase::Held { deadline } if now > deadline => -self.click_count,
            Phase::Released { deadline } if now > deadline => self.click_count,
            _ => 0,
        };

        if result != 0 {
            log::debug!("sequence complete {}", result);
            self.click_count = 0;
            self.phase = Phase::Idle;
        }
        result
    }

    /// Only affects long hold timers started after this call.
    ///
    /// An interval the clock cannot time is rejected and the current one kept.
    pub fn set_long_interval(&mut self, interval: Milliseconds<u32>) -> Result<(), IntervalTooLong> {
        self.long_interval = check_interval::<C>(interval)?;
        Ok(())
    }

    pub fn long_interval(&self) -> Milliseconds<u32> {
        self.long_interval
    }

    /// Only affects release timers started after this call.
    ///
    /// An interval the clock cannot time is rejected and the current one kept.
    pub fn set_release_interval(
        &mut self,
        interval: Milliseconds<u32>,
    ) -> Result<(), IntervalTooLong> {
        self.release_interval = check_interval::<C>(interval)?;
        Ok(())
    }

    pub fn release_interval(&self) -> Milliseconds<u32> {
        self.release_interval
    }

    pub fn active_level(&self) -> ActiveLevel {
        self.active_level
    }

    /// Presses counted so far in the sequence in progress.
    pub fn click_count(&self) -> i32 {
        self.click_count
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn in_progress(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    pub fn debouncer(&self) -> &Debouncer<'a, S, C> {
        &self.debouncer
    }

    pub fn debouncer_mut(&mut self) -> &mut Debouncer<'a, S, C> {
        &mut self.debouncer
    }
}
