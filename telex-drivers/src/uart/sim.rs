//! Simulated register block for host tests
//!
//! Control fields are kept as one bit each, indexed by the field's
//! discriminant. Status flags are derived from that state and counted every
//! time they are polled.

use std::collections::VecDeque;
use std::vec::Vec;

use telex_hal::regs::{ControlField, StatusFlag, UartRegisters};
use telex_hal::ModemControl;

pub struct SimRegisters {
    control: u32,
    divider: u32,
    rx: VecDeque<u16>,
    tx: Vec<u16>,
    polls: [u32; 4],
    acks: Vec<StatusFlag>,
    /// Transmit-complete never comes up
    pub tx_stalled: bool,
    /// Transmit-complete comes up on this poll (zero: immediately)
    pub tc_after: u32,
    pub tx_ack_stuck: bool,
    pub rx_ack_stuck: bool,
    /// Every transmitted frame is also received
    pub loopback: bool,
    pub dtr: bool,
    pub dsr: bool,
}

impl SimRegisters {
    pub fn new() -> Self {
        Self {
            control: 0,
            divider: 0,
            rx: VecDeque::new(),
            tx: Vec::new(),
            polls: [0; 4],
            acks: Vec::new(),
            tx_stalled: false,
            tc_after: 0,
            tx_ack_stuck: false,
            rx_ack_stuck: false,
            loopback: false,
            dtr: false,
            dsr: false,
        }
    }

    /// Power-on junk: every control bit set, nonzero divider
    pub fn fill_garbage(&mut self) {
        self.control = u32::MAX;
        self.divider = 0xDEAD_BEEF;
    }

    pub fn push_rx(&mut self, frames: &[u16]) {
        self.rx.extend(frames.iter().copied());
    }

    pub fn sent(&self) -> Vec<u16> {
        self.tx.clone()
    }

    pub fn polls(&self, flag: StatusFlag) -> u32 {
        self.polls[flag as usize]
    }

    /// Acknowledgement flags in the order they were first seen set
    pub fn ack_order(&self) -> Vec<StatusFlag> {
        self.acks.clone()
    }

    fn bit(field: ControlField) -> u32 {
        1 << field as u8
    }

    fn ack(&mut self, flag: StatusFlag, direction: ControlField, stuck: bool) -> bool {
        let up = !stuck && self.get(ControlField::Enable) && self.get(direction);
        if up && !self.acks.contains(&flag) {
            self.acks.push(flag);
        }
        up
    }
}

impl UartRegisters for SimRegisters {
    fn set(&mut self, field: ControlField, value: bool) {
        if value {
            self.control |= Self::bit(field);
        } else {
            self.control &= !Self::bit(field);
        }
    }

    fn get(&self, field: ControlField) -> bool {
        self.control & Self::bit(field) != 0
    }

    fn clear_control(&mut self) {
        self.control = 0;
    }

    fn set_divider(&mut self, divider: u32) {
        self.divider = divider;
    }

    fn divider(&self) -> u32 {
        self.divider
    }

    fn flag(&mut self, flag: StatusFlag) -> bool {
        self.polls[flag as usize] += 1;
        let polls = self.polls[flag as usize];
        match flag {
            StatusFlag::TransmitComplete => !self.tx_stalled && polls >= self.tc_after,
            StatusFlag::ReceiveNotEmpty => !self.rx.is_empty(),
            StatusFlag::TransmitEnableAck => {
                self.ack(flag, ControlField::TxEnable, self.tx_ack_stuck)
            }
            StatusFlag::ReceiveEnableAck => {
                self.ack(flag, ControlField::RxEnable, self.rx_ack_stuck)
            }
        }
    }

    fn write_data(&mut self, frame: u16) {
        self.tx.push(frame);
        if self.loopback {
            self.rx.push_back(frame);
        }
    }

    fn read_data(&mut self) -> u16 {
        self.rx.pop_front().unwrap_or(0)
    }
}

impl ModemControl for SimRegisters {
    fn set_dtr(&mut self, ready: bool) {
        self.dtr = ready;
    }

    fn dtr(&self) -> bool {
        self.dtr
    }

    fn dsr(&self) -> bool {
        self.dsr
    }
}
