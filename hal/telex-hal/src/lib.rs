//! Telex Hardware Abstraction Layer
//!
//! This crate defines the seams between the UART driver and the hardware it
//! runs on. Chip-specific crates implement the register model, the driver
//! programs it, and the line protocols only ever see the frame transport.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  telex-protocol (line / value helpers)  │
//! └─────────────────────────────────────────┘
//!                     │  FrameRead / FrameWrite
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  telex-drivers (lifecycle + transport)  │
//! └─────────────────────────────────────────┘
//!                     │  UartRegisters
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ telex-hal-    │       │  simulated    │
//! │    mik32      │       │  registers    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`regs`] - named control fields and status flags of one peripheral
//! - [`config`] - the configuration record and its bit-pair encodings
//! - [`uart`] - frame-level transport traits used by the protocols
//! - [`wait`] - busy-poll primitives with and without a tick budget
//! - [`modem`] - DTR/DSR passthrough

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod modem;
pub mod regs;
pub mod uart;
pub mod wait;

// Re-export key items at crate root for convenience
pub use config::{
    BitOrder, ClockPhase, ClockPolarity, DataBits, Directions, FlowControl, Parity, Polarity,
    StopBits, SyncClock, UartConfig, DEFAULT_BASE_CLOCK_HZ,
};
pub use modem::ModemControl;
pub use regs::{ControlField, StatusFlag, UartRegisters};
pub use uart::{FrameRead, FrameWrite, Terminal};
pub use wait::{TimedOut, Wait, TIMEOUT_TICKS};
