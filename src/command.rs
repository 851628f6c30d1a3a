pub trait OpCode {
    fn op_code(&self) -> u8;
}

/// DS18B20 function commands, issued after a device was addressed.
#[derive(Clone, Copy, Debug)]
#[repr(u8)]
pub enum Command {
    Convert = 0x44,
    WriteScratchpad = 0x4E,
    ReadScratchpad = 0xBE,
    CopyScratchpad = 0x48,
    RecallE2 = 0xB8,
    ReadPowerSupply = 0xB4,
}

impl OpCode for Command {
    fn op_code(&self) -> u8 {
        *self as _
    }
}
