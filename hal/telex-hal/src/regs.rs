//! Register model of one UART peripheral
//!
//! The peripheral is seen as a set of independently writable one-bit
//! control fields, a handful of read-only status flags, a 32-bit baud
//! divider, and the transmit/receive data registers. How those map onto
//! actual memory is up to the implementation.

/// One-bit control fields, grouped as they are in the control registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ControlField {
    // Control register 1
    /// Peripheral enable (UE)
    Enable,
    /// Receiver enable (RE)
    RxEnable,
    /// Transmitter enable (TE)
    TxEnable,
    /// Parity select, set for odd parity (PS)
    ParitySelect,
    /// Parity control enable (PCE)
    ParityEnable,
    /// Frame length, low bit of the code (M0)
    FrameM0,
    /// Frame length, high bit of the code (M1)
    FrameM1,

    // Control register 2
    /// Last clock pulse is output on the clock pin (LBCL)
    LastClockPulse,
    /// Clock phase (CPHA)
    ClockPhase,
    /// Clock idle polarity (OCPL)
    ClockPolarity,
    /// Synchronous clock output enable (CLKEN)
    ClockEnable,
    /// Two stop bits (STOP)
    TwoStopBits,
    /// RX/TX pin swap (SWAP)
    Swap,
    /// RX line inversion (RXINV)
    RxInvert,
    /// TX line inversion (TXINV)
    TxInvert,
    /// Data bit inversion (DATAINV)
    DataInvert,
    /// Most significant bit first (MSBFIRST)
    MsbFirst,

    // Control register 3
    /// RTS flow control (RTSE)
    RtsEnable,
    /// CTS flow control (CTSE)
    CtsEnable,
}

impl ControlField {
    /// Every control field, in register order
    pub const ALL: [ControlField; 19] = [
        ControlField::Enable,
        ControlField::RxEnable,
        ControlField::TxEnable,
        ControlField::ParitySelect,
        ControlField::ParityEnable,
        ControlField::FrameM0,
        ControlField::FrameM1,
        ControlField::LastClockPulse,
        ControlField::ClockPhase,
        ControlField::ClockPolarity,
        ControlField::ClockEnable,
        ControlField::TwoStopBits,
        ControlField::Swap,
        ControlField::RxInvert,
        ControlField::TxInvert,
        ControlField::DataInvert,
        ControlField::MsbFirst,
        ControlField::RtsEnable,
        ControlField::CtsEnable,
    ];
}

/// Status flags polled by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StatusFlag {
    /// Last frame has left the shift register (TC)
    TransmitComplete,
    /// A received frame is waiting in the data register (RXNE)
    ReceiveNotEmpty,
    /// Transmitter has powered up (TEACK)
    TransmitEnableAck,
    /// Receiver has powered up (REACK)
    ReceiveEnableAck,
}

/// Field-level access to one UART register block
///
/// Reading a status flag or the receive data register may have side effects
/// on real hardware, so both take `&mut self`.
pub trait UartRegisters {
    /// Write a single control field
    fn set(&mut self, field: ControlField, value: bool);

    /// Read back a single control field
    fn get(&self, field: ControlField) -> bool;

    /// Zero every control register in one go
    fn clear_control(&mut self);

    /// Program the baud rate divider
    fn set_divider(&mut self, divider: u32);

    /// Read back the baud rate divider
    fn divider(&self) -> u32;

    /// Sample a status flag
    fn flag(&mut self, flag: StatusFlag) -> bool;

    /// Write one frame to the transmit data register
    fn write_data(&mut self, frame: u16);

    /// Read one frame from the receive data register
    fn read_data(&mut self) -> u16;
}

impl<T: UartRegisters + ?Sized> UartRegisters for &mut T {
    fn set(&mut self, field: ControlField, value: bool) {
        (**self).set(field, value)
    }

    fn get(&self, field: ControlField) -> bool {
        (**self).get(field)
    }

    fn clear_control(&mut self) {
        (**self).clear_control()
    }

    fn set_divider(&mut self, divider: u32) {
        (**self).set_divider(divider)
    }

    fn divider(&self) -> u32 {
        (**self).divider()
    }

    fn flag(&mut self, flag: StatusFlag) -> bool {
        (**self).flag(flag)
    }

    fn write_data(&mut self, frame: u16) {
        (**self).write_data(frame)
    }

    fn read_data(&mut self) -> u16 {
        (**self).read_data()
    }
}
