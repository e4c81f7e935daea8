//! UART/USART driver

mod driver;
mod io;
#[cfg(test)]
mod sim;

pub use driver::{Error, Timeouts, Uart};
