use embedded_time::duration::Milliseconds;

pub const DEFAULT_DEBOUNCE: Milliseconds<u32> = debounce::DEFAULT_INTERVAL;
pub const DEFAULT_LONG_CLICK: Milliseconds<u32> = Milliseconds(5_000u32);
pub const DEFAULT_RELEASE: Milliseconds<u32> = Milliseconds(500u32);

/// Which signal level means "pressed".
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ActiveLevel {
    Low,
    High,
}

impl ActiveLevel {
    pub fn is_active(self, level: bool) -> bool {
        match self {
            ActiveLevel::Low => !level,
            ActiveLevel::High => level,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SequenceConfig {
    pub active_level: ActiveLevel,
    pub debounce_interval: Milliseconds<u32>,
    /// Hold time after which a press ends the sequence as a long click.
    pub long_interval: Milliseconds<u32>,
    /// Quiet time after a release that ends the sequence as short clicks.
    pub release_interval: Milliseconds<u32>,
}

impl SequenceConfig {
    pub const fn new() -> Self {
        Self {
            active_level: ActiveLevel::Low,
            debounce_interval: DEFAULT_DEBOUNCE,
            long_interval: DEFAULT_LONG_CLICK,
            release_interval: DEFAULT_RELEASE,
        }
    }

    pub const fn with_active_level(mut self, active_level: ActiveLevel) -> Self {
        self.active_level = active_level;
        self
    }

    pub const fn with_debounce_interval(mut self, interval: Milliseconds<u32>) -> Self {
        self.debounce_interval = interval;
        self
    }

    pub const fn with_long_interval(mut self, interval: Milliseconds<u32>) -> Self {
        self.long_interval = interval;
        self
    }

    pub const fn with_release_interval(mut self, interval: Milliseconds<u32>) -> Self {
        self.release_interval = interval;
        self
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::new()
    }
}
