use core::fmt::Debug;

/// Error type
#[derive(Debug)]
pub enum Error<E: Sized + Debug> {
    /// Nothing answered the bus search
    NoDevice,
    /// Discovered address failed its checksum (computed, stored)
    CrcMismatch(u8, u8),
    /// The device read back as all ones
    Disconnected,
    PortError(E),
}

impl<E: Sized + Debug> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::PortError(e)
    }
}
