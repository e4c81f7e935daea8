//! UART configuration record
//!
//! Frame length and parity are each stored in hardware as a 2-bit code split
//! over two unrelated control fields. Callers only deal with the enums below;
//! the `to_bits`/`from_bits` pairs own the packing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Base clock assumed when a caller passes zero (Hz)
pub const DEFAULT_BASE_CLOCK_HZ: u32 = 32_000_000;

/// Compute the integer baud divider, truncating toward zero
///
/// A zero base clock selects [`DEFAULT_BASE_CLOCK_HZ`]. Returns `None` for a
/// zero baud rate.
pub fn baud_divisor(base_clock_hz: u32, baudrate: u32) -> Option<u32> {
    let base = if base_clock_hz == 0 {
        DEFAULT_BASE_CLOCK_HZ
    } else {
        base_clock_hz
    };
    base.checked_div(baudrate)
}

/// Directions to power up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Directions {
    /// Transmitter and receiver
    #[default]
    TxRx,
    /// Transmitter only
    TxOnly,
    /// Receiver only
    RxOnly,
}

impl Directions {
    /// Whether the transmitter is requested
    pub fn has_tx(self) -> bool {
        self != Directions::RxOnly
    }

    /// Whether the receiver is requested
    pub fn has_rx(self) -> bool {
        self != Directions::TxOnly
    }
}

/// Number of data bits per frame
///
/// With parity enabled the parity bit occupies the top data bit, so a 7-bit
/// payload with parity needs [`DataBits::Eight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    Seven,
    #[default]
    Eight,
    Nine,
}

impl DataBits {
    /// Hardware frame-length code (M1:M0)
    pub fn code(self) -> u8 {
        match self {
            DataBits::Eight => 0b00,
            DataBits::Nine => 0b01,
            DataBits::Seven => 0b10,
        }
    }

    /// Split the code into `(M0, M1)`
    pub fn to_bits(self) -> (bool, bool) {
        let code = self.code();
        (code & 0b01 != 0, code & 0b10 != 0)
    }

    /// Rebuild from `(M0, M1)`; the unused code `0b11` yields `None`
    pub fn from_bits(m0: bool, m1: bool) -> Option<Self> {
        match (m0, m1) {
            (false, false) => Some(DataBits::Eight),
            (true, false) => Some(DataBits::Nine),
            (false, true) => Some(DataBits::Seven),
            (true, true) => None,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    #[default]
    None,
    Even,
    Odd,
}

impl Parity {
    /// Hardware parity code (PS:PCE)
    pub fn code(self) -> u8 {
        match self {
            Parity::None => 0b00,
            Parity::Even => 0b01,
            Parity::Odd => 0b11,
        }
    }

    /// Split the code into `(PCE, PS)`
    pub fn to_bits(self) -> (bool, bool) {
        let code = self.code();
        (code & 0b01 != 0, code & 0b10 != 0)
    }

    /// Rebuild from `(PCE, PS)`; parity select is ignored while disabled
    pub fn from_bits(pce: bool, ps: bool) -> Self {
        match (pce, ps) {
            (false, _) => Parity::None,
            (true, false) => Parity::Even,
            (true, true) => Parity::Odd,
        }
    }
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BitOrder {
    #[default]
    LsbFirst,
    MsbFirst,
}

/// Signal polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    #[default]
    Normal,
    Inverted,
}

impl Polarity {
    pub fn is_inverted(self) -> bool {
        self == Polarity::Inverted
    }
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    #[default]
    One,
    Two,
}

/// Level of the synchronous clock line outside a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockPolarity {
    #[default]
    IdleLow,
    IdleHigh,
}

/// Edge the first clock tick lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockPhase {
    #[default]
    RisingEdge,
    FallingEdge,
}

/// Synchronous (USART) clock output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyncClock {
    /// Drive the clock pin
    pub enabled: bool,
    /// Clock level while idle
    pub idle_polarity: ClockPolarity,
    /// Sampling edge of the first tick
    pub phase: ClockPhase,
    /// Emit a clock pulse for the last data bit
    pub last_pulse: bool,
}

/// Hardware flow control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlowControl {
    /// Hold transmission while CTS is deasserted
    pub cts: bool,
    /// Drive RTS from receiver readiness
    pub rts: bool,
}

/// UART configuration
///
/// Consumed once when the peripheral is configured; the hardware fields are
/// the only place the settings live afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UartConfig {
    /// Peripheral clock in Hz (zero selects 32 MHz)
    pub base_clock_hz: u32,
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Directions to power up
    pub directions: Directions,
    /// Frame length
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Bit order
    pub bit_order: BitOrder,
    /// Data bit polarity
    pub data_polarity: Polarity,
    /// TX line polarity
    pub tx_polarity: Polarity,
    /// RX line polarity
    pub rx_polarity: Polarity,
    /// Exchange the RX and TX pins
    pub swap_pins: bool,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Synchronous clock settings
    pub clock: SyncClock,
    /// Flow control settings
    pub flow_control: FlowControl,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            base_clock_hz: DEFAULT_BASE_CLOCK_HZ,
            baudrate: 115_200,
            directions: Directions::TxRx,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            bit_order: BitOrder::LsbFirst,
            data_polarity: Polarity::Normal,
            tx_polarity: Polarity::Normal,
            rx_polarity: Polarity::Normal,
            swap_pins: false,
            stop_bits: StopBits::One,
            clock: SyncClock::default(),
            flow_control: FlowControl::default(),
        }
    }
}

impl UartConfig {
    /// 8N1 at the given baud rate, both directions
    pub fn new(baudrate: u32) -> Self {
        Self {
            baudrate,
            ..Self::default()
        }
    }

    /// Baud divider this configuration programs
    pub fn divisor(&self) -> Option<u32> {
        baud_divisor(self.base_clock_hz, self.baudrate)
    }
}
