#![no_std]
#![doc = include_str!("../README.md")]

mod address;
mod bus;
mod command;
mod result;
mod sensor;

pub use address::Address;
pub use bus::OneWire;
pub use command::{Command, OpCode};
pub use result::Error;
pub use sensor::{
    split_temp, Ds18b20, Resolution, ScratchPad, DEVICE_DISCONNECTED_C, DEVICE_DISCONNECTED_F,
    SCRATCHPAD_BYTES,
};

/// CRC-8 with the Maxim/Dallas polynomial, continuing from `crc`.
///
/// Pass `0` as the initial value to checksum a single buffer.
pub fn compute_partial_crc8(crc: u8, data: &[u8]) -> u8 {
    let mut crc = crc;
    for byte in data.iter() {
        let mut byte = *byte;
        for _ in 0..8 {
            let mix = (crc ^ byte) & 0x01;
            crc >>= 1;
            if mix != 0x00 {
                crc ^= 0x8C;
            }
            byte >>= 1;
        }
    }
    crc
}
