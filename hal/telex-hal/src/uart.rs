//! UART frame transport abstractions
//!
//! Provides the traits the line protocols are written against. A frame is
//! carried as `u16` so 9-bit frames fit; byte-oriented users narrow it.

/// UART frame transmitter
pub trait FrameWrite {
    /// Error type for transmit operations
    type Error;

    /// Send one frame
    ///
    /// Bits above the configured frame length are ignored by the hardware.
    fn send_frame(&mut self, frame: u16) -> Result<(), Self::Error>;

    /// Send a run of bytes, stopping at the first failure
    fn send_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.send_frame(u16::from(byte))?;
        }
        Ok(())
    }
}

/// UART frame receiver
pub trait FrameRead {
    /// Wait for the next frame and return it
    ///
    /// Blocks until a frame arrives. There is no timeout.
    fn receive_frame(&mut self) -> u16;

    /// Wait for the next frame and narrow it to a byte
    fn receive_byte(&mut self) -> u8 {
        self.receive_frame() as u8
    }
}

/// Combined UART interface
///
/// For transports that provide both directions on a single peripheral.
pub trait Terminal: FrameRead + FrameWrite {}

// Blanket implementation
impl<T: FrameRead + FrameWrite> Terminal for T {}

impl<T: FrameWrite + ?Sized> FrameWrite for &mut T {
    type Error = T::Error;

    fn send_frame(&mut self, frame: u16) -> Result<(), Self::Error> {
        (**self).send_frame(frame)
    }
}

impl<T: FrameRead + ?Sized> FrameRead for &mut T {
    fn receive_frame(&mut self) -> u16 {
        (**self).receive_frame()
    }
}
