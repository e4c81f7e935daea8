//! Line and value protocols for interactive serial terminals
//!
//! This crate turns a raw frame stream into something a human can type at:
//! delimiter-terminated lines with in-band backspace editing, optional local
//! echo, and signed decimal integers.
//!
//! # Wire conventions
//!
//! ```text
//! typed:   'a' 'b' BS 'c' '\n'
//! stored:  "ac\0"
//! echoed:  'a' 'b' BS ' ' BS 'c'
//! ```
//!
//! Every protocol reads one frame at a time through
//! [`FrameRead::receive_frame`](telex_hal::FrameRead::receive_frame) and may
//! block forever waiting for the delimiter. Nothing here allocates; buffers
//! are supplied by the caller.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod line;
pub mod number;

#[cfg(test)]
mod mock;

pub use line::{echo_until, read_until, Edit, LineEditor, LineOverflow};
pub use number::{read_ascii_int, send_ascii_int, IntegerParser, Step};

use telex_hal::uart::{FrameWrite, Terminal};

/// ASCII backspace
pub const BACKSPACE: u8 = 0x08;

/// Frames that visually erase the character left of a terminal cursor
pub const ERASE_SEQUENCE: [u8; 3] = [BACKSPACE, b' ', BACKSPACE];

/// Send local echo, ignoring transmit failures
///
/// Echo is cosmetic; losing it must not abort the read it belongs to.
fn echo<W: FrameWrite + ?Sized>(io: &mut W, bytes: &[u8]) {
    if io.send_bytes(bytes).is_err() {
        #[cfg(feature = "defmt")]
        defmt::trace!("echo dropped ({=usize} bytes)", bytes.len());
    }
}

/// The protocols as methods on any bidirectional transport
pub trait LineExt: Terminal {
    /// See [`line::read_until`]
    fn read_until(
        &mut self,
        delimiter: u8,
        buf: &mut [u8],
        keep_delimiter: bool,
        process_backspace: bool,
    ) -> Result<usize, LineOverflow> {
        line::read_until(self, delimiter, buf, keep_delimiter, process_backspace)
    }

    /// See [`line::echo_until`]
    fn echo_until(
        &mut self,
        delimiter: u8,
        buf: &mut [u8],
        keep_delimiter: bool,
    ) -> Result<usize, LineOverflow> {
        line::echo_until(self, delimiter, buf, keep_delimiter)
    }

    /// See [`number::read_ascii_int`]
    fn read_ascii_int(&mut self, delimiter: u8, echo: bool) -> i32 {
        number::read_ascii_int(self, delimiter, echo)
    }

    /// See [`number::send_ascii_int`]
    fn send_ascii_int(&mut self, value: i32) -> Result<(), Self::Error> {
        number::send_ascii_int(self, value)
    }
}

// Blanket implementation
impl<T: Terminal + ?Sized> LineExt for T {}
