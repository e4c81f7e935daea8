//! Scripted transports for protocol tests

use std::collections::VecDeque;
use std::vec::Vec;

use telex_hal::uart::{FrameRead, FrameWrite};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendFailed;

/// Replays a fixed input and records everything sent
pub struct Script {
    input: VecDeque<u16>,
    output: Vec<u16>,
    send_budget: Option<usize>,
}

impl Script {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().map(|&b| u16::from(b)).collect(),
            output: Vec::new(),
            send_budget: None,
        }
    }

    /// Accept `count` frames, then fail every send
    pub fn fail_sends_after(mut self, count: usize) -> Self {
        self.send_budget = Some(count);
        self
    }

    pub fn sent(&self) -> Vec<u8> {
        self.output.iter().map(|&f| f as u8).collect()
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl FrameRead for Script {
    fn receive_frame(&mut self) -> u16 {
        self.input.pop_front().expect("script exhausted")
    }
}

impl FrameWrite for Script {
    type Error = SendFailed;

    fn send_frame(&mut self, frame: u16) -> Result<(), SendFailed> {
        match &mut self.send_budget {
            Some(0) => return Err(SendFailed),
            Some(budget) => *budget -= 1,
            None => {}
        }
        self.output.push(frame);
        Ok(())
    }
}

/// TX wired straight to RX
#[derive(Default)]
pub struct Loopback {
    line: VecDeque<u16>,
}

impl Loopback {
    /// Place a byte on the line as if a peer had sent it
    pub fn inject(&mut self, byte: u8) {
        self.line.push_back(u16::from(byte));
    }
}

impl FrameRead for Loopback {
    fn receive_frame(&mut self) -> u16 {
        self.line.pop_front().expect("loopback empty")
    }
}

impl FrameWrite for Loopback {
    type Error = core::convert::Infallible;

    fn send_frame(&mut self, frame: u16) -> Result<(), Self::Error> {
        self.line.push_back(frame);
        Ok(())
    }
}
