//! Memory-mapped USART access for MIK32
//!
//! MIK32 has two USART peripherals (USART_0 and USART_1). This module maps
//! their register block onto [`UartRegisters`] and tracks which instances
//! have been handed out.

use core::marker::PhantomData;
use core::ptr::NonNull;

use tock_registers::fields::Field;
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::register_structs;
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};

use telex_hal::modem::ModemControl;
use telex_hal::regs::{ControlField, StatusFlag, UartRegisters};

use crate::registers::{CONTROL1, CONTROL2, CONTROL3, FLAGS, MODEM};

register_structs! {
    pub RegisterBlock {
        (0x00 => control1: ReadWrite<u32, CONTROL1::Register>),
        (0x04 => control2: ReadWrite<u32, CONTROL2::Register>),
        (0x08 => control3: ReadWrite<u32, CONTROL3::Register>),
        (0x0C => divider: ReadWrite<u32>),
        (0x10 => _reserved0),
        (0x1C => flags: ReadOnly<u32, FLAGS::Register>),
        (0x20 => _reserved1),
        (0x24 => rxdata: ReadOnly<u32>),
        (0x28 => txdata: WriteOnly<u32>),
        (0x2C => modem: ReadWrite<u32, MODEM::Register>),
        (0x30 => @END),
    }
}

/// USART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartInstance {
    Uart0,
    Uart1,
}

impl UartInstance {
    /// Base address of the instance's register block
    pub const fn base_address(self) -> usize {
        match self {
            UartInstance::Uart0 => 0x0008_1400,
            UartInstance::Uart1 => 0x0008_1800,
        }
    }
}

/// Hands out each USART instance at most once
pub struct UartAllocator {
    uart0_taken: bool,
    uart1_taken: bool,
}

impl UartAllocator {
    /// Create a new allocator
    ///
    /// # Safety
    ///
    /// Only one allocator may exist in the program, and nothing else may
    /// build an [`MmioUart`] for the same addresses.
    pub unsafe fn new() -> Self {
        Self {
            uart0_taken: false,
            uart1_taken: false,
        }
    }

    /// Take a USART instance, or `None` if it was already taken
    pub fn take(&mut self, id: UartInstance) -> Option<MmioUart<'static>> {
        let taken = match id {
            UartInstance::Uart0 => &mut self.uart0_taken,
            UartInstance::Uart1 => &mut self.uart1_taken,
        };
        if *taken {
            return None;
        }
        *taken = true;
        // Safety: the allocator is unique and hands out each address once
        Some(unsafe { MmioUart::from_base_address(id.base_address()) })
    }

    /// Check if an instance has been taken
    pub fn is_taken(&self, id: UartInstance) -> bool {
        match id {
            UartInstance::Uart0 => self.uart0_taken,
            UartInstance::Uart1 => self.uart1_taken,
        }
    }
}

/// Register handle for one USART instance
pub struct MmioUart<'a> {
    ptr: NonNull<RegisterBlock>,
    _block: PhantomData<&'a RegisterBlock>,
}

impl MmioUart<'static> {
    /// Build a handle from a raw base address
    ///
    /// # Safety
    ///
    /// `base` must point at a USART register block that stays mapped for the
    /// rest of the program, and no other handle may access it.
    pub unsafe fn from_base_address(base: usize) -> Self {
        Self {
            ptr: NonNull::new_unchecked(base as *mut RegisterBlock),
            _block: PhantomData,
        }
    }
}

impl<'a> MmioUart<'a> {
    /// Wrap an already borrowed register block
    pub fn new(regs: &'a RegisterBlock) -> Self {
        Self {
            ptr: NonNull::from(regs),
            _block: PhantomData,
        }
    }

    fn regs(&self) -> &RegisterBlock {
        // Safety: both constructors guarantee the block outlives 'a
        unsafe { self.ptr.as_ref() }
    }
}

enum Location {
    Control1(Field<u32, CONTROL1::Register>),
    Control2(Field<u32, CONTROL2::Register>),
    Control3(Field<u32, CONTROL3::Register>),
}

fn locate(field: ControlField) -> Location {
    use Location::*;

    match field {
        ControlField::Enable => Control1(CONTROL1::UE),
        ControlField::RxEnable => Control1(CONTROL1::RE),
        ControlField::TxEnable => Control1(CONTROL1::TE),
        ControlField::ParitySelect => Control1(CONTROL1::PS),
        ControlField::ParityEnable => Control1(CONTROL1::PCE),
        ControlField::FrameM0 => Control1(CONTROL1::M0),
        ControlField::FrameM1 => Control1(CONTROL1::M1),
        ControlField::LastClockPulse => Control2(CONTROL2::LBCL),
        ControlField::ClockPhase => Control2(CONTROL2::CPHA),
        ControlField::ClockPolarity => Control2(CONTROL2::OCPL),
        ControlField::ClockEnable => Control2(CONTROL2::CLKEN),
        ControlField::TwoStopBits => Control2(CONTROL2::STOP),
        ControlField::Swap => Control2(CONTROL2::SWAP),
        ControlField::RxInvert => Control2(CONTROL2::RXINV),
        ControlField::TxInvert => Control2(CONTROL2::TXINV),
        ControlField::DataInvert => Control2(CONTROL2::DATAINV),
        ControlField::MsbFirst => Control2(CONTROL2::MSBFIRST),
        ControlField::RtsEnable => Control3(CONTROL3::RTSE),
        ControlField::CtsEnable => Control3(CONTROL3::CTSE),
    }
}

impl UartRegisters for MmioUart<'_> {
    fn set(&mut self, field: ControlField, value: bool) {
        let value = u32::from(value);
        match locate(field) {
            Location::Control1(f) => self.regs().control1.modify(f.val(value)),
            Location::Control2(f) => self.regs().control2.modify(f.val(value)),
            Location::Control3(f) => self.regs().control3.modify(f.val(value)),
        }
    }

    fn get(&self, field: ControlField) -> bool {
        match locate(field) {
            Location::Control1(f) => self.regs().control1.is_set(f),
            Location::Control2(f) => self.regs().control2.is_set(f),
            Location::Control3(f) => self.regs().control3.is_set(f),
        }
    }

    fn clear_control(&mut self) {
        self.regs().control1.set(0);
        self.regs().control2.set(0);
        self.regs().control3.set(0);
    }

    fn set_divider(&mut self, divider: u32) {
        self.regs().divider.set(divider);
    }

    fn divider(&self) -> u32 {
        self.regs().divider.get()
    }

    fn flag(&mut self, flag: StatusFlag) -> bool {
        let field = match flag {
            StatusFlag::TransmitComplete => FLAGS::TC,
            StatusFlag::ReceiveNotEmpty => FLAGS::RXNE,
            StatusFlag::TransmitEnableAck => FLAGS::TEACK,
            StatusFlag::ReceiveEnableAck => FLAGS::REACK,
        };
        self.regs().flags.is_set(field)
    }

    fn write_data(&mut self, frame: u16) {
        self.regs().txdata.set(u32::from(frame));
    }

    fn read_data(&mut self) -> u16 {
        // Only the low 9 bits carry data
        (self.regs().rxdata.get() & 0x1FF) as u16
    }
}

impl ModemControl for MmioUart<'_> {
    fn set_dtr(&mut self, ready: bool) {
        self.regs().modem.modify(MODEM::DTR.val(u32::from(ready)));
    }

    fn dtr(&self) -> bool {
        self.regs().modem.is_set(MODEM::DTR)
    }

    fn dsr(&self) -> bool {
        self.regs().modem.is_set(MODEM::DSR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: usize = 12;

    // Index of each register in a word array
    const CONTROL1_IDX: usize = 0;
    const CONTROL2_IDX: usize = 1;
    const CONTROL3_IDX: usize = 2;
    const DIVIDER_IDX: usize = 3;
    const FLAGS_IDX: usize = 7;
    const RXDATA_IDX: usize = 9;
    const TXDATA_IDX: usize = 10;
    const MODEM_IDX: usize = 11;

    /// Run `f` against a register block backed by plain memory
    fn with_block<R>(init: [u32; WORDS], f: impl FnOnce(MmioUart<'_>, *mut u32) -> R) -> R {
        let mut mem = init;
        let base = mem.as_mut_ptr();
        // Safety: the block is exactly WORDS words long and only accessed
        // through `base` for the duration of `f`
        let regs = unsafe { &*(base as *const RegisterBlock) };
        f(MmioUart::new(regs), base)
    }

    fn word(base: *mut u32, idx: usize) -> u32 {
        // Safety: idx < WORDS
        unsafe { base.add(idx).read_volatile() }
    }

    #[test]
    fn test_block_size() {
        assert_eq!(core::mem::size_of::<RegisterBlock>(), WORDS * 4);
    }

    #[test]
    fn test_control1_bit_positions() {
        with_block([0; WORDS], |mut uart, base| {
            uart.set(ControlField::Enable, true);
            uart.set(ControlField::RxEnable, true);
            uart.set(ControlField::TxEnable, true);
            uart.set(ControlField::ParitySelect, true);
            uart.set(ControlField::ParityEnable, true);
            uart.set(ControlField::FrameM0, true);
            uart.set(ControlField::FrameM1, true);
            let expected = 1 | 1 << 2 | 1 << 3 | 1 << 9 | 1 << 10 | 1 << 12 | 1 << 28;
            assert_eq!(word(base, CONTROL1_IDX), expected);
        });
    }

    #[test]
    fn test_control2_bit_positions() {
        with_block([0; WORDS], |mut uart, base| {
            uart.set(ControlField::LastClockPulse, true);
            uart.set(ControlField::ClockPhase, true);
            uart.set(ControlField::ClockPolarity, true);
            uart.set(ControlField::ClockEnable, true);
            uart.set(ControlField::TwoStopBits, true);
            uart.set(ControlField::Swap, true);
            uart.set(ControlField::RxInvert, true);
            uart.set(ControlField::TxInvert, true);
            uart.set(ControlField::DataInvert, true);
            uart.set(ControlField::MsbFirst, true);
            let expected = 1 << 8
                | 1 << 9
                | 1 << 10
                | 1 << 11
                | 1 << 13
                | 1 << 15
                | 1 << 16
                | 1 << 17
                | 1 << 18
                | 1 << 19;
            assert_eq!(word(base, CONTROL2_IDX), expected);
        });
    }

    #[test]
    fn test_control3_bit_positions() {
        with_block([0; WORDS], |mut uart, base| {
            uart.set(ControlField::RtsEnable, true);
            uart.set(ControlField::CtsEnable, true);
            assert_eq!(word(base, CONTROL3_IDX), 1 << 8 | 1 << 9);
        });
    }

    #[test]
    fn test_set_preserves_other_fields() {
        let mut init = [0; WORDS];
        init[CONTROL1_IDX] = 0xFFFF_FFFF;
        with_block(init, |mut uart, base| {
            uart.set(ControlField::Enable, false);
            assert!(!uart.get(ControlField::Enable));
            assert!(uart.get(ControlField::RxEnable));
            assert_eq!(word(base, CONTROL1_IDX), 0xFFFF_FFFE);
        });
    }

    #[test]
    fn test_clear_control_and_divider() {
        let mut init = [0xA5A5_A5A5; WORDS];
        init[FLAGS_IDX] = 0;
        with_block(init, |mut uart, base| {
            uart.clear_control();
            uart.set_divider(277);
            assert_eq!(word(base, CONTROL1_IDX), 0);
            assert_eq!(word(base, CONTROL2_IDX), 0);
            assert_eq!(word(base, CONTROL3_IDX), 0);
            assert_eq!(word(base, DIVIDER_IDX), 277);
            assert_eq!(uart.divider(), 277);
        });
    }

    #[test]
    fn test_status_flags() {
        let mut init = [0; WORDS];
        init[FLAGS_IDX] = 1 << 6 | 1 << 22;
        with_block(init, |mut uart, _| {
            assert!(uart.flag(StatusFlag::TransmitComplete));
            assert!(!uart.flag(StatusFlag::ReceiveNotEmpty));
            assert!(!uart.flag(StatusFlag::TransmitEnableAck));
            assert!(uart.flag(StatusFlag::ReceiveEnableAck));
        });
    }

    #[test]
    fn test_data_registers() {
        let mut init = [0; WORDS];
        init[RXDATA_IDX] = 0xFE01;
        with_block(init, |mut uart, base| {
            uart.write_data(0x1AB);
            assert_eq!(word(base, TXDATA_IDX), 0x1AB);
            assert_eq!(uart.read_data(), 0x001);
        });
    }

    #[test]
    fn test_modem_lines() {
        let mut init = [0; WORDS];
        init[MODEM_IDX] = 1 << 5;
        with_block(init, |mut uart, base| {
            assert!(uart.dsr());
            assert!(!uart.dtr());
            uart.set_dtr(true);
            assert!(uart.dtr());
            assert_eq!(word(base, MODEM_IDX), 1 << 5 | 1 << 8);
        });
    }

    #[test]
    fn test_allocator_hands_out_once() {
        let mut uarts = unsafe { UartAllocator::new() };
        assert!(!uarts.is_taken(UartInstance::Uart1));
        assert!(uarts.take(UartInstance::Uart1).is_some());
        assert!(uarts.is_taken(UartInstance::Uart1));
        assert!(uarts.take(UartInstance::Uart1).is_none());
        assert!(!uarts.is_taken(UartInstance::Uart0));
    }
}
