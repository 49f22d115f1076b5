use std::time::Duration;

use crate::definitions::timer;

/// Represents a timer inside of the chip
/// infrastruture, it will count down to
/// zero from what ever number was given, once per tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.value > 0
    }

    /// Will count down by one, the timer stops at zero.
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// Delay timer: This timer is intended to be used for timing the events of games. Its value
/// can be set and read.
///
/// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
/// sound is made.
///
/// Both count down at the same rate, independent of how many instructions run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: Timer,
    pub sound: Timer,
}

impl Timers {
    pub fn new() -> Self {
        Timers::default()
    }

    pub fn tick(&mut self) {
        self.delay.tick();
        self.sound.tick();
    }

    pub fn reset(&mut self) {
        *self = Timers::default();
    }
}

/// The time between two ticks at the given rate.
pub fn interval(hertz: u32) -> Duration {
    Duration::from_secs(1) / hertz.max(1)
}

/// The time between two ticks at the nominal timer rate.
pub fn default_interval() -> Duration {
    interval(timer::HERTZ)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_stops_at_zero() {
        let mut timer = Timer::new(1);
        assert!(timer.is_running());

        timer.tick();
        assert_eq!(timer.get_value(), 0);
        assert!(!timer.is_running());

        timer.tick();
        assert_eq!(timer.get_value(), 0);
    }

    #[test]
    fn test_timers_tick_independently() {
        let mut timers = Timers::new();
        timers.delay.set_value(3);
        timers.sound.set_value(1);

        timers.tick();
        assert_eq!(timers.delay.get_value(), 2);
        assert_eq!(timers.sound.get_value(), 0);

        timers.tick();
        timers.tick();
        timers.tick();
        assert_eq!(timers.delay.get_value(), 0);
        assert_eq!(timers.sound.get_value(), 0);

        timers.sound.set_value(200);
        timers.reset();
        assert_eq!(timers, Timers::default());
    }

    #[test]
    fn test_interval() {
        assert_eq!(interval(1), Duration::from_secs(1));
        assert_eq!(interval(0), Duration::from_secs(1));
        assert_eq!(default_interval(), Duration::from_secs(1) / 60);
    }
}
