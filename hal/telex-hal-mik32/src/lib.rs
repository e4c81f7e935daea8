//! MIK32-specific HAL for the Telex UART driver
//!
//! This crate maps the MIK32 (Amur) USART register block onto the
//! `telex-hal` register model. It supports both USART instances:
//!
//! - USART_0 at `0x0008_1400`
//! - USART_1 at `0x0008_1800`
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Clock gating for the peripheral is the board's job and has to happen
//! before the handle is used, or the enable acknowledgement never arrives.
//!
//! ```no_run
//! use telex_hal_mik32::{UartAllocator, UartInstance};
//!
//! // Safety: this is the only allocator in the program
//! let mut uarts = unsafe { UartAllocator::new() };
//! let uart0 = uarts.take(UartInstance::Uart0).unwrap();
//! ```

#![no_std]

pub mod registers;
pub mod uart;

pub use uart::{MmioUart, RegisterBlock, UartAllocator, UartInstance};

// Re-export shared items from telex-hal
pub use telex_hal::config::DEFAULT_BASE_CLOCK_HZ as BASE_CLOCK_HZ;
