//! Blocking UART driver
//!
//! Lifecycle:
//!
//! ```text
//! any state ──reset()──▶ cleared ──configure()/quick_enable()──▶ enabled
//!                                                                 │
//!                         configured, disabled ◀──disable()───────┘
//! ```
//!
//! The state lives only in the peripheral's enable field. Every wait is a
//! busy poll of a status flag governed by the driver's [`Timeouts`].

use telex_hal::config::baud_divisor;
use telex_hal::regs::{ControlField, StatusFlag, UartRegisters};
use telex_hal::uart::{FrameRead, FrameWrite};
use telex_hal::wait::{spin_until, spin_until_bounded, Wait, TIMEOUT_TICKS};
use telex_hal::{ModemControl, UartConfig};

/// UART driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Transmit-complete did not come up within the tick budget
    TransmitTimeout,
    /// No frame arrived within the tick budget
    ReceiveTimeout,
    /// A direction did not acknowledge enabling within the tick budget
    AcknowledgeTimeout,
    /// Baud rate of zero
    InvalidBaudRate,
}

/// Wait policies of one driver instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeouts {
    /// Wait for transmit-complete after each frame
    pub transmit: Wait,
    /// Per-frame budget of the buffered receive operations
    pub receive_ticks: u32,
    /// Wait for the enable acknowledgements
    pub enable_ack: Wait,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            transmit: Wait::Ticks(TIMEOUT_TICKS),
            receive_ticks: TIMEOUT_TICKS,
            enable_ack: Wait::Forever,
        }
    }
}

/// UART driver over a register model
pub struct Uart<R> {
    regs: R,
    timeouts: Timeouts,
}

impl<R: UartRegisters> Uart<R> {
    /// Wrap a register block with the default timeouts
    ///
    /// The hardware is not touched until a lifecycle method is called.
    pub fn new(regs: R) -> Self {
        Self::with_timeouts(regs, Timeouts::default())
    }

    pub fn with_timeouts(regs: R, timeouts: Timeouts) -> Self {
        Self { regs, timeouts }
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    pub fn set_timeouts(&mut self, timeouts: Timeouts) {
        self.timeouts = timeouts;
    }

    /// Access the register block
    pub fn regs(&self) -> &R {
        &self.regs
    }

    /// Mutable access to the register block
    pub fn regs_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Release the register block
    pub fn free(self) -> R {
        self.regs
    }

    // ========== Lifecycle ==========

    /// Disable, then clear every control field and the baud divider
    pub fn reset(&mut self) {
        self.disable();
        self.regs.clear_control();
        self.regs.set_divider(0);
    }

    /// Bring the peripheral up as 8N1 in both directions
    ///
    /// A zero `base_clock_hz` selects the default base clock.
    pub fn quick_enable(&mut self, base_clock_hz: u32, baudrate: u32) -> Result<(), Error> {
        let divisor = baud_divisor(base_clock_hz, baudrate).ok_or(Error::InvalidBaudRate)?;

        self.reset();
        self.regs.set_divider(divisor);
        self.regs.set(ControlField::RxEnable, true);
        self.regs.set(ControlField::TxEnable, true);
        self.regs.set(ControlField::Enable, true);

        self.wait_ack(StatusFlag::TransmitEnableAck)?;
        self.wait_ack(StatusFlag::ReceiveEnableAck)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("uart enabled, divider {=u32}", divisor);
        Ok(())
    }

    /// Reset and apply `config`, then enable the requested directions
    pub fn configure(&mut self, config: &UartConfig) -> Result<(), Error> {
        let divisor = config.divisor().ok_or(Error::InvalidBaudRate)?;

        self.reset();
        self.regs.set_divider(divisor);

        let (m0, m1) = config.data_bits.to_bits();
        self.regs.set(ControlField::FrameM0, m0);
        self.regs.set(ControlField::FrameM1, m1);

        let (pce, ps) = config.parity.to_bits();
        self.regs.set(ControlField::ParityEnable, pce);
        self.regs.set(ControlField::ParitySelect, ps);

        self.regs.set(
            ControlField::MsbFirst,
            config.bit_order == telex_hal::BitOrder::MsbFirst,
        );
        self.regs.set(ControlField::DataInvert, config.data_polarity.is_inverted());
        self.regs.set(ControlField::TxInvert, config.tx_polarity.is_inverted());
        self.regs.set(ControlField::RxInvert, config.rx_polarity.is_inverted());
        self.regs.set(ControlField::Swap, config.swap_pins);
        self.regs.set(
            ControlField::TwoStopBits,
            config.stop_bits == telex_hal::StopBits::Two,
        );

        let clock = &config.clock;
        self.regs.set(ControlField::ClockEnable, clock.enabled);
        self.regs.set(
            ControlField::ClockPolarity,
            clock.idle_polarity == telex_hal::ClockPolarity::IdleHigh,
        );
        self.regs.set(
            ControlField::ClockPhase,
            clock.phase == telex_hal::ClockPhase::FallingEdge,
        );
        self.regs.set(ControlField::LastClockPulse, clock.last_pulse);

        self.regs.set(ControlField::CtsEnable, config.flow_control.cts);
        self.regs.set(ControlField::RtsEnable, config.flow_control.rts);

        let directions = config.directions;
        if directions.has_rx() {
            self.regs.set(ControlField::RxEnable, true);
        }
        if directions.has_tx() {
            self.regs.set(ControlField::TxEnable, true);
        }
        self.regs.set(ControlField::Enable, true);

        if directions.has_rx() {
            self.wait_ack(StatusFlag::ReceiveEnableAck)?;
        }
        if directions.has_tx() {
            self.wait_ack(StatusFlag::TransmitEnableAck)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "uart configured: {=u32} baud, {}, {}",
            config.baudrate,
            config.data_bits,
            config.parity
        );
        Ok(())
    }

    /// Power down; every other setting is kept
    pub fn disable(&mut self) {
        self.regs.set(ControlField::Enable, false);
    }

    /// Whether the peripheral-enable field is set
    pub fn is_enabled(&self) -> bool {
        self.regs.get(ControlField::Enable)
    }

    fn wait_ack(&mut self, flag: StatusFlag) -> Result<(), Error> {
        let regs = &mut self.regs;
        self.timeouts.enable_ack.until(|| regs.flag(flag)).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("uart: no {} acknowledgement", flag);
            Error::AcknowledgeTimeout
        })
    }

    // ========== Transmit ==========

    /// Send one frame and wait for transmit-complete per [`Timeouts::transmit`]
    pub fn send_frame(&mut self, frame: u16) -> Result<(), Error> {
        self.regs.write_data(frame);
        let regs = &mut self.regs;
        self.timeouts
            .transmit
            .until(|| regs.flag(StatusFlag::TransmitComplete))
            .map_err(|_| {
                #[cfg(feature = "defmt")]
                defmt::warn!("uart: transmit timeout");
                Error::TransmitTimeout
            })
    }

    /// Send one frame and wait for transmit-complete however long it takes
    pub fn send_frame_blocking(&mut self, frame: u16) {
        self.regs.write_data(frame);
        let regs = &mut self.regs;
        spin_until(|| regs.flag(StatusFlag::TransmitComplete));
    }

    /// Send bytes, stopping at the first failure
    pub fn send_buffer8(&mut self, data: &[u8]) -> Result<(), Error> {
        data.iter()
            .try_for_each(|&byte| self.send_frame(u16::from(byte)))
    }

    /// Send 16-bit frames, stopping at the first failure
    pub fn send_buffer16(&mut self, data: &[u16]) -> Result<(), Error> {
        data.iter().try_for_each(|&frame| self.send_frame(frame))
    }

    /// Send bytes up to the first NUL, or the whole slice if there is none
    pub fn send_null_terminated(&mut self, data: &[u8]) -> Result<(), Error> {
        let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        self.send_buffer8(&data[..end])
    }

    pub fn send_str(&mut self, s: &str) -> Result<(), Error> {
        self.send_null_terminated(s.as_bytes())
    }

    // ========== Receive ==========

    /// Whether a received frame is waiting
    pub fn has_input(&mut self) -> bool {
        self.regs.flag(StatusFlag::ReceiveNotEmpty)
    }

    /// Read the receive data register without checking for input
    pub fn read_frame(&mut self) -> u16 {
        self.regs.read_data()
    }

    /// Wait for a frame with no timeout
    pub fn receive_frame(&mut self) -> u16 {
        let regs = &mut self.regs;
        spin_until(|| regs.flag(StatusFlag::ReceiveNotEmpty));
        self.regs.read_data()
    }

    /// Wait at most `ticks` polls for a frame
    pub fn receive_frame_timed(&mut self, ticks: u32) -> Result<u16, Error> {
        let regs = &mut self.regs;
        spin_until_bounded(ticks, || regs.flag(StatusFlag::ReceiveNotEmpty))
            .map_err(|_| Error::ReceiveTimeout)?;
        Ok(self.regs.read_data())
    }

    /// Fill `buf` with received bytes, giving up on the first frame that
    /// does not arrive within [`Timeouts::receive_ticks`]
    ///
    /// Frames wider than 8 bits are truncated.
    pub fn receive_buffer8(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let ticks = self.timeouts.receive_ticks;
        for slot in buf.iter_mut() {
            *slot = self.receive_frame_timed(ticks)? as u8;
        }
        Ok(())
    }

    /// Fill `buf` with received frames; see [`Uart::receive_buffer8`]
    pub fn receive_buffer16(&mut self, buf: &mut [u16]) -> Result<(), Error> {
        let ticks = self.timeouts.receive_ticks;
        for slot in buf.iter_mut() {
            *slot = self.receive_frame_timed(ticks)?;
        }
        Ok(())
    }
}

impl<R: UartRegisters + ModemControl> Uart<R> {
    /// Drive the DTR output
    pub fn set_dtr(&mut self, ready: bool) {
        self.regs.set_dtr(ready);
    }

    pub fn dtr(&self) -> bool {
        self.regs.dtr()
    }

    /// Whether the peer asserts DSR
    pub fn dsr(&self) -> bool {
        self.regs.dsr()
    }
}

impl<R: UartRegisters> FrameWrite for Uart<R> {
    type Error = Error;

    fn send_frame(&mut self, frame: u16) -> Result<(), Error> {
        Uart::send_frame(self, frame)
    }
}

impl<R: UartRegisters> FrameRead for Uart<R> {
    fn receive_frame(&mut self) -> u16 {
        Uart::receive_frame(self)
    }
}
