//! Delimiter-terminated line input
//!
//! A [`LineEditor`] owns the caller's buffer for the length of one line and
//! is fed one byte at a time, the same way a frame parser would be. The
//! blocking readers below pump a transport into it.
//!
//! Buffer layout after a read, with `c` the usable capacity (`buf.len()`,
//! less one when the delimiter is kept):
//!
//! ```text
//! complete:  [b0 b1 .. bn-1 (delim) 0 ...]   n <= c - 2
//! overflow:  [b0 b1 .. bc-2 0 ...]           c - 1 bytes stored
//! ```

use telex_hal::uart::{FrameRead, Terminal};

use crate::{echo, BACKSPACE, ERASE_SEQUENCE};

/// A line did not fit in its buffer
///
/// `stored` bytes are in the buffer, followed by a NUL terminator when the
/// buffer had room for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineOverflow {
    pub stored: usize,
}

/// Outcome of feeding one byte to a [`LineEditor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edit {
    /// Byte appended to the line
    Stored(u8),
    /// Last byte removed by a backspace
    Erased,
    /// Nothing changed (backspace on an empty line, or the line is closed)
    Unchanged,
    /// Delimiter seen; the line holds this many bytes and is terminated
    Complete(usize),
    /// Byte appended and the buffer is now full
    Full(u8),
}

/// Single-line editor over a caller-supplied buffer
#[derive(Debug)]
pub struct LineEditor<'b> {
    buf: &'b mut [u8],
    /// Usable capacity: the delimiter slot is already subtracted
    limit: usize,
    cursor: usize,
    delimiter: u8,
    keep_delimiter: bool,
    process_backspace: bool,
    closed: bool,
}

impl<'b> LineEditor<'b> {
    /// Start a line in `buf`
    ///
    /// Fails immediately when the usable capacity is below two. A capacity of
    /// exactly one still writes the terminator; below one the buffer is left
    /// untouched.
    pub fn new(
        buf: &'b mut [u8],
        delimiter: u8,
        keep_delimiter: bool,
        process_backspace: bool,
    ) -> Result<Self, LineOverflow> {
        let limit = if keep_delimiter {
            buf.len().saturating_sub(1)
        } else {
            buf.len()
        };

        match limit {
            0 => return Err(LineOverflow { stored: 0 }),
            1 => {
                buf[0] = 0;
                return Err(LineOverflow { stored: 0 });
            }
            _ => {}
        }

        Ok(Self {
            buf,
            limit,
            cursor: 0,
            delimiter,
            keep_delimiter,
            process_backspace,
            closed: false,
        })
    }

    /// Number of bytes currently in the line
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Whether the line has completed or overflowed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Feed one received byte
    ///
    /// Once the line is closed further bytes are ignored and the buffer is
    /// not touched again.
    pub fn feed(&mut self, byte: u8) -> Edit {
        if self.closed {
            return Edit::Unchanged;
        }

        if byte == self.delimiter {
            if self.keep_delimiter {
                self.buf[self.cursor] = byte;
                self.cursor += 1;
            }
            self.buf[self.cursor] = 0;
            self.closed = true;
            return Edit::Complete(self.cursor);
        }

        if self.process_backspace && byte == BACKSPACE {
            if self.cursor == 0 {
                return Edit::Unchanged;
            }
            self.cursor -= 1;
            return Edit::Erased;
        }

        self.buf[self.cursor] = byte;
        self.cursor += 1;
        if self.cursor == self.limit - 1 {
            self.buf[self.cursor] = 0;
            self.closed = true;
            return Edit::Full(byte);
        }
        Edit::Stored(byte)
    }
}

/// Read bytes into `buf` until `delimiter` arrives
///
/// Returns the line length on success. The delimiter is stored before the
/// terminator when `keep_delimiter` is set, and backspace (0x08) removes the
/// previous byte when `process_backspace` is set. Blocks until the line
/// completes or the buffer fills.
pub fn read_until<R: FrameRead + ?Sized>(
    io: &mut R,
    delimiter: u8,
    buf: &mut [u8],
    keep_delimiter: bool,
    process_backspace: bool,
) -> Result<usize, LineOverflow> {
    let mut editor = LineEditor::new(buf, delimiter, keep_delimiter, process_backspace)?;
    loop {
        match editor.feed(io.receive_byte()) {
            Edit::Complete(len) => return Ok(len),
            Edit::Full(_) => return Err(overflowed(&editor)),
            _ => {}
        }
    }
}

/// Like [`read_until`] with local echo and backspace handling always on
///
/// Every stored byte is sent back, including the one that fills the
/// buffer. An effective backspace is echoed as backspace, space, backspace.
/// The delimiter itself is never echoed.
pub fn echo_until<T: Terminal + ?Sized>(
    io: &mut T,
    delimiter: u8,
    buf: &mut [u8],
    keep_delimiter: bool,
) -> Result<usize, LineOverflow> {
    let mut editor = LineEditor::new(buf, delimiter, keep_delimiter, true)?;
    loop {
        match editor.feed(io.receive_byte()) {
            Edit::Stored(byte) => echo(io, &[byte]),
            Edit::Erased => echo(io, &ERASE_SEQUENCE),
            Edit::Unchanged => {}
            Edit::Complete(len) => return Ok(len),
            Edit::Full(byte) => {
                echo(io, &[byte]);
                return Err(overflowed(&editor));
            }
        }
    }
}

fn overflowed(editor: &LineEditor<'_>) -> LineOverflow {
    #[cfg(feature = "defmt")]
    defmt::debug!("line overflow after {=usize} bytes", editor.len());
    LineOverflow {
        stored: editor.len(),
    }
}
