use core::convert::Infallible;
use embedded_hal::digital::v2::InputPin;

/// A raw, undebounced signal.
pub trait Sample {
    type Error;

    /// Read the current raw level, `true` for logic high.
    fn sample(&mut self) -> Result<bool, Self::Error>;
}

/// Reads a GPIO pin directly.
///
/// The pin's input mode (pull-up, pull-down...) is set through the HAL before
/// it is wrapped, e.g. `pins.key1.into_pull_up_input()`.
pub struct PinSource<P> {
    pin: P,
}

impl<P> PinSource<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> Sample for PinSource<P>
where
    P: InputPin,
{
    type Error = P::Error;

    fn sample(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }
}

/// Reads the signal through a caller supplied function.
///
/// Any non-zero return value is treated as high, so the function can hand
/// back a register value or a raw pin read without converting it first.
pub struct FnSource<F> {
    read: F,
}

impl<F> FnSource<F>
where
    F: FnMut() -> i32,
{
    pub fn new(read: F) -> Self {
        Self { read }
    }

    pub fn into_inner(self) -> F {
        self.read
    }
}

impl<F> Sample for FnSource<F>
where
    F: FnMut() -> i32,
{
    type Error = Infallible;

    fn sample(&mut self) -> Result<bool, Self::Error> {
        Ok((self.read)() != 0)
    }
}

/// No bound source, values are passed in on every update.
pub struct Detached;
