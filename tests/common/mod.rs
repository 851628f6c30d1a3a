use core::convert::Infallible;
use std::collections::VecDeque;

use ds18b20_mini::{Address, OneWire};

/// One recorded bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Reset,
    ResetSearch,
    Search,
    Select([u8; 8]),
    Skip,
    Write(u8, bool),
    Read,
    ReadBit,
}

/// Scripted 1-Wire master: replays canned search results, scratchpad
/// bytes and conversion bits while recording every transaction it is
/// asked to perform. Exhausted read queues float high, like a bus
/// nobody drives.
#[derive(Default)]
pub struct ScriptedBus {
    pub ops: Vec<Op>,
    search_results: VecDeque<[u8; 8]>,
    read_bytes: VecDeque<u8>,
    read_bits: VecDeque<bool>,
}

impl ScriptedBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, address: [u8; 8]) -> Self {
        self.search_results.push_back(address);
        self
    }

    pub fn with_scratchpad(mut self, bytes: &[u8]) -> Self {
        self.read_bytes.extend(bytes.iter().copied());
        self
    }

    pub fn with_conversion_bits(mut self, bits: &[bool]) -> Self {
        self.read_bits.extend(bits.iter().copied());
        self
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// The bytes written since the last [`clear_ops`](Self::clear_ops)
    pub fn writes(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Write(byte, _) => Some(*byte),
                _ => None,
            })
            .collect()
    }
}

impl OneWire for ScriptedBus {
    type Error = Infallible;

    fn reset(&mut self) -> Result<(), Infallible> {
        self.ops.push(Op::Reset);
        Ok(())
    }

    fn reset_search(&mut self) -> Result<(), Infallible> {
        self.ops.push(Op::ResetSearch);
        Ok(())
    }

    fn search(&mut self, address: &mut Address) -> Result<bool, Infallible> {
        self.ops.push(Op::Search);
        match self.search_results.pop_front() {
            Some(found) => {
                *address = Address::from(found);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn select(&mut self, address: &Address) -> Result<(), Infallible> {
        self.ops.push(Op::Select((*address).into()));
        Ok(())
    }

    fn skip(&mut self) -> Result<(), Infallible> {
        self.ops.push(Op::Skip);
        Ok(())
    }

    fn write(&mut self, byte: u8, power: bool) -> Result<(), Infallible> {
        self.ops.push(Op::Write(byte, power));
        Ok(())
    }

    fn read(&mut self) -> Result<u8, Infallible> {
        self.ops.push(Op::Read);
        Ok(self.read_bytes.pop_front().unwrap_or(0xFF))
    }

    fn read_bit(&mut self) -> Result<bool, Infallible> {
        self.ops.push(Op::ReadBit);
        Ok(self.read_bits.pop_front().unwrap_or(true))
    }
}

/// Delay that only tallies the requested nanoseconds.
#[derive(Default)]
pub struct RecordingDelay {
    pub elapsed_ns: u64,
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}
