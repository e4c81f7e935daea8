//! Signed decimal integers over the wire
//!
//! Input accepts an optional leading `-`, digits, and backspace edits, and
//! silently drops anything else. Accumulation wraps on overflow like the
//! two's-complement register it ends up in.

use heapless::Vec;
use telex_hal::uart::{FrameWrite, Terminal};

use crate::{echo, BACKSPACE, ERASE_SEQUENCE};

/// Decimal digits in `u32::MAX`
const MAX_DIGITS: usize = 10;

/// Outcome of feeding one byte to an [`IntegerParser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Digit accepted
    Digit(u8),
    /// Leading minus accepted
    Sign,
    /// Last digit or the sign removed
    Erased,
    /// Byte ignored
    Unchanged,
    /// Delimiter seen; the parsed value
    Done(i32),
}

/// Incremental decimal integer parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerParser {
    delimiter: u8,
    magnitude: i32,
    digits: u32,
    negative: bool,
}

impl IntegerParser {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            magnitude: 0,
            digits: 0,
            negative: false,
        }
    }

    /// Current value, as it would be returned by the delimiter
    pub fn value(&self) -> i32 {
        if self.negative {
            self.magnitude.wrapping_neg()
        } else {
            self.magnitude
        }
    }

    /// Feed one received byte
    pub fn feed(&mut self, byte: u8) -> Step {
        if byte == self.delimiter {
            return Step::Done(self.value());
        }

        match byte {
            b'-' if self.digits == 0 => {
                self.negative = true;
                Step::Sign
            }
            BACKSPACE => {
                if self.digits > 1 {
                    self.magnitude /= 10;
                    self.digits -= 1;
                } else if self.digits == 1 {
                    self.magnitude = 0;
                    self.digits = 0;
                } else if self.negative {
                    self.negative = false;
                } else {
                    return Step::Unchanged;
                }
                Step::Erased
            }
            b'0'..=b'9' => {
                self.magnitude = self
                    .magnitude
                    .wrapping_mul(10)
                    .wrapping_add(i32::from(byte - b'0'));
                self.digits = self.digits.saturating_add(1);
                Step::Digit(byte)
            }
            _ => Step::Unchanged,
        }
    }
}

/// Read a signed decimal integer terminated by `delimiter`
///
/// With `echo` set, accepted digits, the sign, and effective backspaces are
/// sent back. Blocks until the delimiter arrives.
pub fn read_ascii_int<T: Terminal + ?Sized>(io: &mut T, delimiter: u8, echo_input: bool) -> i32 {
    let mut parser = IntegerParser::new(delimiter);
    loop {
        match parser.feed(io.receive_byte()) {
            Step::Done(value) => return value,
            Step::Digit(digit) if echo_input => echo(io, &[digit]),
            Step::Sign if echo_input => echo(io, b"-"),
            Step::Erased if echo_input => echo(io, &ERASE_SEQUENCE),
            _ => {}
        }
    }
}

/// Send `value` as signed decimal ASCII, most significant digit first
///
/// No delimiter is appended. Stops at the first transmit failure.
pub fn send_ascii_int<W: FrameWrite + ?Sized>(io: &mut W, value: i32) -> Result<(), W::Error> {
    let mut digits: Vec<u8, MAX_DIGITS> = Vec::new();
    let mut magnitude = value.unsigned_abs();
    loop {
        // Cannot fail: a u32 has at most MAX_DIGITS digits
        let _ = digits.push(b'0' + (magnitude % 10) as u8);
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }

    if value < 0 {
        io.send_frame(u16::from(b'-'))?;
    }
    for &digit in digits.iter().rev() {
        io.send_frame(u16::from(digit))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Loopback, Script};
    use proptest::prelude::*;

    fn parse(input: &[u8]) -> i32 {
        read_ascii_int(&mut Script::new(input), b'\n', false)
    }

    fn format(value: i32) -> std::vec::Vec<u8> {
        let mut io = Script::new(b"");
        send_ascii_int(&mut io, value).unwrap();
        io.sent()
    }

    #[test]
    fn test_parse_scenarios() {
        assert_eq!(parse(b"-129\n"), -129);
        assert_eq!(parse(b"12\x083\n"), 13);
        assert_eq!(parse(b"1x2\n"), 12);
        assert_eq!(parse(b"\n"), 0);
    }

    #[test]
    fn test_minus_after_digits_ignored() {
        assert_eq!(parse(b"12-3\n"), 123);
    }

    #[test]
    fn test_backspace_clears_sign() {
        assert_eq!(parse(b"-5\x08\x087\n"), 7);
        assert_eq!(parse(b"-\x0842\n"), 42);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        assert_eq!(parse(b"\x08\x089\n"), 9);
    }

    #[test]
    fn test_accumulation_wraps() {
        assert_eq!(parse(b"2147483648\n"), i32::MIN);
        assert_eq!(parse(b"-2147483648\n"), i32::MIN);
    }

    #[test]
    fn test_echo_of_edits() {
        let mut io = Script::new(b"-1\x08\x08\x082\n");
        assert_eq!(read_ascii_int(&mut io, b'\n', true), 2);
        // '-', '1', erase digit, erase sign, third backspace silent, '2'
        assert_eq!(io.sent(), b"-1\x08 \x08\x08 \x082");
    }

    #[test]
    fn test_ignored_bytes_not_echoed() {
        let mut io = Script::new(b"a1b\n");
        assert_eq!(read_ascii_int(&mut io, b'\n', true), 1);
        assert_eq!(io.sent(), b"1");
    }

    #[test]
    fn test_no_echo_when_disabled() {
        let mut io = Script::new(b"-12\x08\n");
        assert_eq!(read_ascii_int(&mut io, b'\n', false), -1);
        assert!(io.sent().is_empty());
    }

    #[test]
    fn test_format_scenarios() {
        assert_eq!(format(0), b"0");
        assert_eq!(format(10), b"10");
        assert_eq!(format(929), b"929");
        assert_eq!(format(-129), b"-129");
        assert_eq!(format(i32::MAX), b"2147483647");
        assert_eq!(format(i32::MIN), b"-2147483648");
    }

    #[test]
    fn test_format_stops_at_first_failure() {
        let mut io = Script::new(b"").fail_sends_after(2);
        assert!(send_ascii_int(&mut io, -4567).is_err());
        assert_eq!(io.sent(), b"-4");
    }

    #[test]
    fn test_parser_value_tracks_edits() {
        let mut parser = IntegerParser::new(b'\r');
        for &byte in b"-42" {
            parser.feed(byte);
        }
        assert_eq!(parser.value(), -42);
        assert_eq!(parser.feed(BACKSPACE), Step::Erased);
        assert_eq!(parser.value(), -4);
        assert_eq!(parser.feed(b'\r'), Step::Done(-4));
    }

    proptest! {
        #[test]
        fn prop_loopback_round_trip(value in any::<i32>()) {
            let mut io = Loopback::default();
            send_ascii_int(&mut io, value).unwrap();
            io.inject(b'\n');
            prop_assert_eq!(read_ascii_int(&mut io, b'\n', false), value);
        }

        #[test]
        fn prop_format_matches_display(value in any::<i32>()) {
            prop_assert_eq!(format(value), value.to_string().into_bytes());
        }
    }
}
