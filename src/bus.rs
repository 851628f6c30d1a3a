use crate::Address;
use core::fmt::Debug;

/// Bus transactions required of a 1-Wire master.
///
/// The sensor never owns its bus: every driver operation borrows an
/// implementation of this trait for the duration of one command
/// sequence, so one master can carry any number of sensor instances.
/// Masters are stateful (search cursor, select/skip addressing), which
/// means sequences must not interleave; serialize access externally
/// when more than one context touches the wire.
pub trait OneWire {
    type Error: Sized + Debug;

    /// Issue a reset pulse. Every command sequence starts with one.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Rewind the internal search cursor to the first device.
    fn reset_search(&mut self) -> Result<(), Self::Error>;

    /// Perform one discovery step. Writes the discovered address and
    /// returns `true`, or returns `false` with `address` untouched
    /// once the bus is exhausted.
    fn search(&mut self, address: &mut Address) -> Result<bool, Self::Error>;

    /// Address a single device for the commands that follow.
    fn select(&mut self, address: &Address) -> Result<(), Self::Error>;

    /// Broadcast the commands that follow to every device on the bus.
    fn skip(&mut self) -> Result<(), Self::Error>;

    /// Send one byte. `power` asks the master to keep the line
    /// strongly pulled up afterwards, for parasite-powered devices.
    fn write(&mut self, byte: u8, power: bool) -> Result<(), Self::Error>;

    /// Read one byte. An undriven bus floats high and reads `0xFF`.
    fn read(&mut self) -> Result<u8, Self::Error>;

    /// Read a single bit slot.
    fn read_bit(&mut self) -> Result<bool, Self::Error>;
}
