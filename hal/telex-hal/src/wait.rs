//! Busy-poll wait primitives
//!
//! Polling a status flag is the only way this driver ever suspends. A "tick"
//! is one evaluation of the predicate, so a tick budget bounds the number of
//! register reads, not wall-clock time.

/// Default tick budget for bounded transmit and receive waits
pub const TIMEOUT_TICKS: u32 = 100_000;

/// A bounded wait ran out of ticks before its condition came true
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedOut;

/// How long to wait for a hardware condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wait {
    /// Poll until the condition holds, however long that takes
    Forever,
    /// Poll at most this many times
    Ticks(u32),
}

impl Default for Wait {
    fn default() -> Self {
        Wait::Ticks(TIMEOUT_TICKS)
    }
}

impl Wait {
    /// Poll `ready` according to this policy
    pub fn until<F: FnMut() -> bool>(self, ready: F) -> Result<(), TimedOut> {
        match self {
            Wait::Forever => {
                spin_until(ready);
                Ok(())
            }
            Wait::Ticks(ticks) => spin_until_bounded(ticks, ready),
        }
    }
}

/// Poll `ready` until it returns true
pub fn spin_until<F: FnMut() -> bool>(mut ready: F) {
    while !ready() {
        core::hint::spin_loop();
    }
}

/// Poll `ready` at most `ticks` times
///
/// A budget of zero never evaluates the predicate and times out at once.
pub fn spin_until_bounded<F: FnMut() -> bool>(ticks: u32, mut ready: F) -> Result<(), TimedOut> {
    for _ in 0..ticks {
        if ready() {
            return Ok(());
        }
        core::hint::spin_loop();
    }
    Err(TimedOut)
}
