#![cfg_attr(not(test), no_std)]

//! Time-window debouncing of a single digital signal.
//!
//! A new raw level has to hold, uninterrupted, for the whole debounce interval
//! before it is accepted. Any bounce restarts the window.

mod source;

pub use source::{Detached, FnSource, PinSource, Sample};

use core::convert::Infallible;
use embedded_time::duration::Milliseconds;
use embedded_time::{clock, Clock, Instant};

pub const DEFAULT_INTERVAL: Milliseconds<u32> = Milliseconds(50u32);

#[derive(Debug)]
pub enum Error<E> {
    /// The signal source failed to read.
    Source(E),
    Clock(clock::Error),
    Interval(IntervalTooLong),
}

impl<E> From<clock::Error> for Error<E> {
    fn from(e: clock::Error) -> Self {
        Error::Clock(e)
    }
}

impl<E> From<IntervalTooLong> for Error<E> {
    fn from(e: IntervalTooLong) -> Self {
        Error::Interval(e)
    }
}

/// The interval does not fit in half the clock's tick range, so a deadline
/// that far ahead could not be told apart from one in the past.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct IntervalTooLong;

/// Check that `interval` can be timed by `C`.
///
/// Every interval a debouncer or tracker arms has passed through here, so
/// `now + interval` cannot fail afterwards.
pub fn check_interval<C>(interval: Milliseconds<u32>) -> Result<Milliseconds<u32>, IntervalTooLong>
where
    C: Clock<T = u32>,
{
    Instant::<C>::new(0)
        .checked_add(interval)
        .map(|_| interval)
        .ok_or(IntervalTooLong)
}

pub struct Debouncer<'a, S, C: Clock<T = u32>> {
    source: S,
    clock: &'a C,
    interval: Milliseconds<u32>,
    deadline: Instant<C>,
    unstable: bool,
    stable: bool,
    changed: bool,
}

impl<'a, C> Debouncer<'a, Detached, C>
where
    C: Clock<T = u32>,
{
    /// A debouncer with no bound source, fed through [`Debouncer::update_with`].
    pub fn detached(
        clock: &'a C,
        initial: bool,
        interval: Milliseconds<u32>,
    ) -> Result<Self, Error<Infallible>> {
        let interval = check_interval::<C>(interval)?;
        let now = clock.try_now()?;
        Ok(Self {
            source: Detached,
            clock,
            interval,
            deadline: now + interval,
            unstable: initial,
            stable: initial,
            changed: false,
        })
    }
}

impl<'a, S, C> Debouncer<'a, S, C>
where
    S: Sample,
    C: Clock<T = u32>,
{
    /// Bind `source` and take the first sample as the stable level.
    pub fn attach(
        mut source: S,
        clock: &'a C,
        interval: Milliseconds<u32>,
    ) -> Result<Self, Error<S::Error>> {
        let interval = check_interval::<C>(interval)?;
        let initial = source.sample().map_err(Error::Source)?;
        let now = clock.try_now()?;

        Ok(Self {
            source,
            clock,
            interval,
            deadline: now + interval,
            unstable: initial,
            stable: initial,
            changed: false,
        })
    }

    /// Swap the signal source and re-arm from a fresh sample.
    ///
    /// The previous source is handed back.
    pub fn reattach(&mut self, source: S) -> Result<S, Error<S::Error>> {
        let previous = core::mem::replace(&mut self.source, source);
        self.start()?;
        Ok(previous)
    }

    /// Re-arm: seed the stable level from an immediate sample and restart the
    /// settle window.
    pub fn start(&mut self) -> Result<(), Error<S::Error>> {
        let value = self.sample()?;
        self.start_with(value)?;
        Ok(())
    }

    /// Read the raw signal without touching the debounce state.
    pub fn sample(&mut self) -> Result<bool, Error<S::Error>> {
        self.source.sample().map_err(Error::Source)
    }

    /// Sample the source and step the debouncer.
    ///
    /// Returns true if the stable level changed on this call.
    pub fn update(&mut self) -> Result<bool, Error<S::Error>> {
        let value = self.sample()?;
        let now = self.clock.try_now()?;
        Ok(self.update_at(value, now))
    }

    /// Update, then return the debounced level.
    pub fn update_read(&mut self) -> Result<bool, Error<S::Error>> {
        self.update()?;
        Ok(self.read())
    }

    /// Update, then test the debounced level for high.
    pub fn update_is_high(&mut self) -> Result<bool, Error<S::Error>> {
        self.update_read()
    }

    /// Update, then test the debounced level for low.
    pub fn update_is_low(&mut self) -> Result<bool, Error<S::Error>> {
        Ok(!self.update_read()?)
    }
}

impl<'a, S, C> Debouncer<'a, S, C>
where
    C: Clock<T = u32>,
{
    /// Re-arm from a passed value rather than a sample.
    pub fn start_with(&mut self, value: bool) -> Result<(), clock::Error> {
        let now = self.clock.try_now()?;
        self.unstable = value;
        self.stable = value;
        self.changed = false;
        self.deadline = now + self.interval;
        Ok(())
    }

    /// Only applies to settle windows started after this call.
    ///
    /// An interval the clock cannot time is rejected and the current one kept.
    pub fn set_interval(&mut self, interval: Milliseconds<u32>) -> Result<(), IntervalTooLong> {
        self.interval = check_interval::<C>(interval)?;
        Ok(())
    }

    pub fn interval(&self) -> Milliseconds<u32> {
        self.interval
    }

    /// Step the debouncer with a raw value passed by the caller.
    pub fn update_with(&mut self, value: bool) -> Result<bool, clock::Error> {
        let now = self.clock.try_now()?;
        Ok(self.update_at(value, now))
    }

    /// Step the debouncer with a raw value observed at `now`.
    pub fn update_at(&mut self, value: bool, now: Instant<C>) -> bool {
        self.changed = false;

        if value != self.unstable {
            // bounce, restart the settle window
            self.unstable = value;
            self.deadline = now + self.interval;
        } else if now >= self.deadline && self.stable != value {
            self.stable = value;
            self.changed = true;
            self.deadline = now + self.interval;
            log::trace!("debounced {}", if value { "high" } else { "low" });
        }

        self.changed
    }

    /// The debounced level, `true` for high.
    pub fn read(&self) -> bool {
        self.stable
    }

    /// Whether the last update changed the debounced level.
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn clock(&self) -> &'a C {
        self.clock
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S, C> embedded_hal::digital::v2::InputPin for Debouncer<'_, S, C>
where
    C: Clock<T = u32>,
{
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.stable)
    }
    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.stable)
    }
}
