use byteorder::{ByteOrder, LittleEndian};
use embedded_hal::delay::DelayNs;

use crate::{Address, Command, Error, OneWire, OpCode};

/// Celsius reading reported for a device that answers as all ones.
pub const DEVICE_DISCONNECTED_C: f32 = -127.0;

/// Fahrenheit counterpart of [`DEVICE_DISCONNECTED_C`]. A sentinel of
/// its own, not the converted Celsius value.
pub const DEVICE_DISCONNECTED_F: f32 = -196.6;

/// The length of the on-device scratchpad in bytes
pub const SCRATCHPAD_BYTES: usize = 9;

/// Scratchpad image: temperature LSB, temperature MSB, alarm high,
/// alarm low, configuration, two reserved bytes, count remain, CRC.
/// This driver decodes the first two bytes only.
pub type ScratchPad = [u8; SCRATCHPAD_BYTES];

/// Raw register value read from an unresponsive (all ones) device.
const DISCONNECTED_RAW: i16 = -1;

/// One raw count at 12 bit is 1/16 °C. Applied whatever resolution is
/// configured, as the Arduino library this descends from does.
const CELSIUS_PER_LSB: f32 = 0.0625;

/// Measurement resolution as encoded in the configuration register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Resolution {
    Bits9 = 0x1F,
    Bits10 = 0x3F,
    Bits11 = 0x5F,
    Bits12 = 0x7F,
}

impl Resolution {
    /// Configuration register byte selecting this resolution
    pub fn config_byte(&self) -> u8 {
        *self as _
    }

    /// Worst-case conversion time in milliseconds
    pub fn time_ms(&self) -> u16 {
        match self {
            Resolution::Bits9 => 94,
            Resolution::Bits10 => 188,
            Resolution::Bits11 => 375,
            Resolution::Bits12 => 750,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Bits12
    }
}

/// Bit counts 10, 11 and 12 select their setting; 9 and every other
/// value fall back to the 9-bit setting, silently.
impl From<u8> for Resolution {
    fn from(bits: u8) -> Self {
        match bits {
            12 => Resolution::Bits12,
            11 => Resolution::Bits11,
            10 => Resolution::Bits10,
            _ => Resolution::Bits9,
        }
    }
}

/// DS18B20 digital thermometer on a borrowed 1-Wire bus.
///
/// Holds the discovered address, the configured resolution and a
/// `configured` flag; the bus itself is passed into every operation.
/// Readings taken before a successful [`begin`](Ds18b20::begin) run
/// against whatever address is stored and surface as the disconnect
/// sentinel rather than a dedicated error.
#[derive(Debug, Clone, Copy)]
pub struct Ds18b20 {
    address: Address,
    resolution: Resolution,
    configured: bool,
}

impl Default for Ds18b20 {
    fn default() -> Self {
        Ds18b20 {
            address: Address::default(),
            resolution: Resolution::default(),
            configured: false,
        }
    }
}

impl Ds18b20 {
    /// Family code of the DS18B20. Discovery does not filter on it;
    /// any device with a nonzero family and a sound checksum is
    /// accepted, which also covers the pin-compatible DS18S20/DS1822.
    pub const FAMILY_CODE: u8 = 0x28;

    pub fn new() -> Self {
        Self::default()
    }

    /// Discover the single device on the bus.
    ///
    /// Rewinds the search cursor and takes one search step into the
    /// stored address, which is overwritten whether or not the result
    /// validates. Returns (and latches) whether the discovered address
    /// has a nonzero family code and a matching checksum. May be
    /// called again to re-discover.
    pub fn begin<W: OneWire>(&mut self, bus: &mut W) -> Result<bool, W::Error> {
        self.address = Address::default();
        self.configured = false;
        bus.reset_search()?;
        bus.search(&mut self.address)?;
        self.configured = self.address.is_valid();
        Ok(self.configured)
    }

    /// [`begin`](Ds18b20::begin) with the failure classified: yields
    /// the discovered address, [`Error::NoDevice`] when nothing
    /// answered the search or [`Error::CrcMismatch`] for a corrupted
    /// address.
    pub fn try_begin<W: OneWire>(&mut self, bus: &mut W) -> Result<Address, Error<W::Error>> {
        if self.begin(bus)? {
            Ok(self.address)
        } else if self.address.family_code() == 0x00 {
            Err(Error::NoDevice)
        } else {
            Err(Error::CrcMismatch(
                self.address.checksum(),
                self.address.crc8(),
            ))
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// The discovered address, once [`begin`](Ds18b20::begin) succeeded
    pub fn address(&self) -> Option<&Address> {
        if self.configured {
            Some(&self.address)
        } else {
            None
        }
    }

    /// Copy the discovered address into `address` and report whether
    /// the sensor is configured. The buffer is left untouched when it
    /// is not; check the return value before trusting the contents.
    pub fn get_address(&self, address: &mut Address) -> bool {
        if self.configured {
            *address = self.address;
        }
        self.configured
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Write the configuration byte for `resolution` to the device
    /// scratchpad, together with placeholder alarm threshold bytes.
    /// The write is not read back for verification.
    pub fn set_resolution<W: OneWire>(
        &mut self,
        bus: &mut W,
        resolution: impl Into<Resolution>,
    ) -> Result<(), W::Error> {
        let resolution = resolution.into();
        bus.reset()?;
        bus.select(&self.address)?;
        bus.write(Command::WriteScratchpad.op_code(), false)?;
        // placeholder alarm thresholds, unused by this driver
        bus.write(0, false)?;
        bus.write(100, false)?;
        bus.write(resolution.config_byte(), false)?;
        bus.reset()?;
        self.resolution = resolution;
        Ok(())
    }

    /// Broadcast a convert command to every device on the bus and
    /// return without waiting for the conversion to finish.
    pub fn request_temperatures<W: OneWire>(&self, bus: &mut W) -> Result<(), W::Error> {
        bus.reset()?;
        bus.skip()?;
        bus.write(Command::Convert.op_code(), false)?;
        Ok(())
    }

    /// Whether a previously requested conversion has finished. A
    /// converting device holds its bit slot low; done reads high.
    /// Bounding the polling in time is the caller's responsibility.
    pub fn is_conversion_complete<W: OneWire>(&self, bus: &mut W) -> Result<bool, W::Error> {
        bus.read_bit()
    }

    /// Request a conversion and block for the worst-case conversion
    /// time of the configured resolution.
    pub fn convert_temperature<W: OneWire>(
        &self,
        bus: &mut W,
        delay: &mut impl DelayNs,
    ) -> Result<(), W::Error> {
        self.request_temperatures(bus)?;
        delay.delay_ms(u32::from(self.resolution.time_ms()));
        Ok(())
    }

    fn read_scratchpad<W: OneWire>(&self, bus: &mut W, dst: &mut [u8]) -> Result<(), W::Error> {
        bus.reset()?;
        bus.select(&self.address)?;
        bus.write(Command::ReadScratchpad.op_code(), false)?;
        for byte in dst.iter_mut() {
            *byte = bus.read()?;
        }
        bus.reset()
    }

    /// The last conversion result as the signed 16-bit register value,
    /// 1/16 °C per count at 12 bit. Reads `-1` from an unresponsive
    /// device.
    pub fn read_raw_temperature<W: OneWire>(&self, bus: &mut W) -> Result<i16, W::Error> {
        let mut scratchpad: ScratchPad = [0; SCRATCHPAD_BYTES];
        self.read_scratchpad(bus, &mut scratchpad[..2])?;
        Ok(LittleEndian::read_i16(&scratchpad[..2]))
    }

    /// The last conversion result in Celsius, or
    /// [`DEVICE_DISCONNECTED_C`] when the device did not answer.
    pub fn temperature_celsius<W: OneWire>(&self, bus: &mut W) -> Result<f32, W::Error> {
        let raw = self.read_raw_temperature(bus)?;
        if raw == DISCONNECTED_RAW {
            Ok(DEVICE_DISCONNECTED_C)
        } else {
            Ok(f32::from(raw) * CELSIUS_PER_LSB)
        }
    }

    /// The last conversion result in Fahrenheit, or
    /// [`DEVICE_DISCONNECTED_F`] when the device did not answer.
    pub fn temperature_fahrenheit<W: OneWire>(&self, bus: &mut W) -> Result<f32, W::Error> {
        let celsius = self.temperature_celsius(bus)?;
        if celsius == DEVICE_DISCONNECTED_C {
            Ok(DEVICE_DISCONNECTED_F)
        } else {
            Ok(celsius * 1.8 + 32.0)
        }
    }

    /// [`temperature_celsius`](Ds18b20::temperature_celsius) with the
    /// disconnect case as [`Error::Disconnected`] instead of the
    /// sentinel.
    pub fn try_temperature_celsius<W: OneWire>(
        &self,
        bus: &mut W,
    ) -> Result<f32, Error<W::Error>> {
        let raw = self.read_raw_temperature(bus)?;
        if raw == DISCONNECTED_RAW {
            Err(Error::Disconnected)
        } else {
            Ok(f32::from(raw) * CELSIUS_PER_LSB)
        }
    }
}

/// Split raw u16 value to two parts: integer and fraction N
/// Original value may be calculated as: integer + fraction/10000
pub fn split_temp(temperature: u16) -> (i16, i16) {
    if temperature < 0x8000 {
        (temperature as i16 >> 4, (temperature as i16 & 0xF) * 625)
    } else {
        let abs = -(temperature as i16);
        (-(abs >> 4), -625 * (abs & 0xF))
    }
}
