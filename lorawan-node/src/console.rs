//! Serial console helpers
//!
//! [`Console`] wraps the device's log sink (typically a UART implementing
//! [`core::fmt::Write`]) together with a delay source. It prints stack
//! results in a readable form and provides the fatal trap used when the
//! hardware cannot be brought up.

use core::fmt::{Display, Write};

use embedded_hal::blocking::delay::DelayMs;

use crate::status;

/// Line terminator of the serial console
pub const LINE_TERMINATOR: &str = "\r\n";

/// Log sink plus the delay used by the halt trap
pub struct Console<W, D>
where
    W: Write,
    D: DelayMs<u32>,
{
    out: W,
    delay: D,
}

impl<W, D> Console<W, D>
where
    W: Write,
    D: DelayMs<u32>,
{
    /// Create a console writing to `out`
    pub fn new(out: W, delay: D) -> Self {
        Self { out, delay }
    }

    /// Report a failed step.
    ///
    /// Does nothing unless `failed` is set. Otherwise writes
    /// `"<message> - <label> (<state>)"` and, if `halt` is set, never returns.
    pub fn debug(&mut self, failed: bool, message: &str, state: i16, halt: bool) {
        if !failed {
            return;
        }
        let label = status::decode(state);
        // A broken sink is not something the caller can act on.
        write!(
            self.out,
            "{} - {} ({}){}",
            message, label, state, LINE_TERMINATOR
        )
        .ok();
        error!("{} - {} ({})", message, label, state);
        if halt {
            self.halt();
        }
    }

    /// Write `buffer` as uppercase hex pairs followed by a line terminator
    pub fn array_dump(&mut self, buffer: &[u8]) {
        for b in buffer {
            write!(self.out, "{:02X}", b).ok();
        }
        self.out.write_str(LINE_TERMINATOR).ok();
    }

    /// Write a line of text
    pub fn println<T: Display>(&mut self, line: T) {
        write!(self.out, "{}{}", line, LINE_TERMINATOR).ok();
    }

    /// Fatal trap: park the device so its state can be inspected.
    ///
    /// There is no supervisor to restart into, so this spins on the delay
    /// source forever.
    pub fn halt(&mut self) -> ! {
        error!("halted");
        loop {
            self.delay.delay_ms(1);
        }
    }

    /// Wait on the console's delay source
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Borrow the log sink
    pub fn sink(&self) -> &W {
        &self.out
    }

    /// Release the sink and delay
    pub fn release(self) -> (W, D) {
        (self.out, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    struct NoDelay;

    impl DelayMs<u32> for NoDelay {
        fn delay_ms(&mut self, _ms: u32) {}
    }

    /// Stands in for the trap loop: the first wait unwinds the test
    struct TrapDelay;

    impl DelayMs<u32> for TrapDelay {
        fn delay_ms(&mut self, ms: u32) {
            panic!("trapped after delay_ms({})", ms);
        }
    }

    fn console() -> Console<String<256>, NoDelay> {
        Console::new(String::new(), NoDelay)
    }

    #[test]
    fn test_array_dump() {
        let mut c = console();
        c.array_dump(&[0x02, 0xAB, 0xFF]);
        assert_eq!(c.sink().as_str(), "02ABFF\r\n");
    }

    #[test]
    fn test_array_dump_empty() {
        let mut c = console();
        c.array_dump(&[]);
        assert_eq!(c.sink().as_str(), "\r\n");
    }

    #[test]
    fn test_debug_not_failed_is_silent() {
        let mut c = console();
        c.debug(false, "Join failed", -1116, true);
        c.debug(false, "Join failed", -1116, false);
        assert!(c.sink().is_empty());
    }

    #[test]
    fn test_debug_failed_without_halt_returns() {
        let mut c = console();
        c.debug(true, "Initialise radio failed", -2, false);
        assert_eq!(
            c.sink().as_str(),
            "Initialise radio failed - ERR_CHIP_NOT_FOUND (-2)\r\n"
        );
    }

    #[test]
    fn test_debug_unknown_code() {
        let mut c = console();
        c.debug(true, "sendReceive", -42, false);
        assert_eq!(
            c.sink().as_str(),
            "sendReceive - See https://jgromes.github.io/RadioLib/group__status__codes.html (-42)\r\n"
        );
    }

    #[test]
    #[should_panic(expected = "trapped after delay_ms(1)")]
    fn test_debug_failed_with_halt_never_returns() {
        let mut c: Console<String<256>, TrapDelay> = Console::new(String::new(), TrapDelay);
        c.debug(true, "Join failed", -1116, true);
        unreachable!("debug returned after a fatal failure");
    }

    #[test]
    #[should_panic(expected = "trapped")]
    fn test_halt_spins_on_delay() {
        let mut c: Console<String<256>, TrapDelay> = Console::new(String::new(), TrapDelay);
        c.halt();
    }
}
