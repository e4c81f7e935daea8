//! Driver implementations
//!
//! This crate drives peripherals through the register traits defined in
//! telex-hal, so the same code runs on silicon and against a simulated
//! register block on the host:
//!
//! - UART/USART lifecycle (reset, configure, enable, disable)
//! - Blocking frame and buffer transport with tick-budget timeouts
//! - `embedded-io` byte stream adapters

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{Error, Timeouts, Uart};
