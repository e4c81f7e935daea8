//! `embedded-io` byte stream adapters
//!
//! Reads block for the first byte and then drain whatever is already
//! waiting. Writes wait for transmit-complete after every byte, so there is
//! never anything left to flush.

use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write, WriteReady};
use telex_hal::regs::UartRegisters;

use super::driver::{Error, Uart};

impl embedded_io::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::TransmitTimeout | Error::ReceiveTimeout | Error::AcknowledgeTimeout => {
                ErrorKind::TimedOut
            }
            Error::InvalidBaudRate => ErrorKind::InvalidInput,
        }
    }
}

impl<R: UartRegisters> ErrorType for Uart<R> {
    type Error = Error;
}

impl<R: UartRegisters> Read for Uart<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let Some((first, rest)) = buf.split_first_mut() else {
            return Ok(0);
        };

        *first = self.receive_frame() as u8;
        let mut count = 1;
        for slot in rest {
            if !self.has_input() {
                break;
            }
            *slot = self.read_frame() as u8;
            count += 1;
        }
        Ok(count)
    }
}

impl<R: UartRegisters> ReadReady for Uart<R> {
    fn read_ready(&mut self) -> Result<bool, Error> {
        Ok(self.has_input())
    }
}

impl<R: UartRegisters> Write for Uart<R> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        for (sent, &byte) in buf.iter().enumerate() {
            if let Err(err) = self.send_frame(u16::from(byte)) {
                // Report the partial write; the error resurfaces on the next call
                return if sent == 0 { Err(err) } else { Ok(sent) };
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<R: UartRegisters> WriteReady for Uart<R> {
    fn write_ready(&mut self) -> Result<bool, Error> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uart::sim::SimRegisters;
    use crate::uart::Timeouts;
    use embedded_io::Error as _;
    use telex_hal::Wait;

    fn uart() -> Uart<SimRegisters> {
        let mut uart = Uart::new(SimRegisters::new());
        uart.quick_enable(0, 115_200).unwrap();
        uart
    }

    #[test]
    fn test_read_drains_pending_bytes() {
        let mut uart = uart();
        uart.regs_mut().push_rx(&[0x61, 0x62, 0x63]);

        let mut buf = [0u8; 2];
        assert_eq!(Read::read(&mut uart, &mut buf), Ok(2));
        assert_eq!(&buf, b"ab");

        let mut buf = [0u8; 8];
        assert_eq!(Read::read(&mut uart, &mut buf), Ok(1));
        assert_eq!(buf[0], b'c');
    }

    #[test]
    fn test_read_empty_buffer() {
        let mut uart = uart();
        assert_eq!(Read::read(&mut uart, &mut []), Ok(0));
    }

    #[test]
    fn test_read_ready() {
        let mut uart = uart();
        assert_eq!(uart.read_ready(), Ok(false));
        uart.regs_mut().push_rx(&[1]);
        assert_eq!(uart.read_ready(), Ok(true));
    }

    #[test]
    fn test_write_all_and_flush() {
        let mut uart = uart();
        uart.write_all(b"hey").unwrap();
        uart.flush().unwrap();
        assert_eq!(uart.regs().sent(), [0x68, 0x65, 0x79]);
        assert_eq!(uart.write_ready(), Ok(true));
    }

    #[test]
    fn test_write_reports_timeout() {
        let timeouts = Timeouts {
            transmit: Wait::Ticks(4),
            ..Timeouts::default()
        };
        let mut uart = Uart::with_timeouts(SimRegisters::new(), timeouts);
        uart.regs_mut().tx_stalled = true;

        let err = Write::write(&mut uart, b"x").unwrap_err();
        assert_eq!(err, Error::TransmitTimeout);
        assert_eq!(err.kind(), ErrorKind::TimedOut);
        assert_eq!(Error::InvalidBaudRate.kind(), ErrorKind::InvalidInput);
    }
}
