//! Modem control line abstractions
//!
//! Only the two lines the peripheral exposes directly are covered: DTR is an
//! output, DSR an input.

/// DTR/DSR access on a UART that has modem lines
pub trait ModemControl {
    /// Drive the data-terminal-ready output
    fn set_dtr(&mut self, ready: bool);

    /// Check if the data-terminal-ready output is asserted
    fn dtr(&self) -> bool;

    /// Check if the peer asserts data-set-ready
    fn dsr(&self) -> bool;
}

impl<T: ModemControl + ?Sized> ModemControl for &mut T {
    fn set_dtr(&mut self, ready: bool) {
        (**self).set_dtr(ready)
    }

    fn dtr(&self) -> bool {
        (**self).dtr()
    }

    fn dsr(&self) -> bool {
        (**self).dsr()
    }
}
