//! HDC1080 temperature and humidity sensor
//!
//! Register access only; measurements are returned as the raw 16-bit
//! register values.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Fixed 7-bit bus address
pub const ADDRESS: u8 = 0x40;

pub const REG_TEMPERATURE: u8 = 0x00;
pub const REG_HUMIDITY: u8 = 0x01;
pub const REG_CONFIG: u8 = 0x02;

/// Wait between pointer write and result read; covers a 14-bit conversion
pub const CONVERSION_MS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HygroError<E> {
    I2c(E),
}

pub struct Hdc1080<I, D> {
    i2c: I,
    delay: D,
}

impl<I: I2c, D: DelayNs> Hdc1080<I, D> {
    pub fn new(i2c: I, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Select independent temperature/humidity acquisition at 14-bit resolution
    pub fn init(&mut self) -> Result<(), HygroError<I::Error>> {
        self.write_register(REG_CONFIG, 0x0000)
    }

    /// Write a 16-bit register, MSB first
    pub fn write_register(&mut self, reg: u8, value: u16) -> Result<(), HygroError<I::Error>> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(ADDRESS, &[reg, hi, lo])
            .map_err(HygroError::I2c)
    }

    /// Point at `reg`, wait for the conversion, read two bytes
    pub fn read_register(&mut self, reg: u8) -> Result<u16, HygroError<I::Error>> {
        self.i2c.write(ADDRESS, &[reg]).map_err(HygroError::I2c)?;
        self.delay.delay_ms(CONVERSION_MS);

        let mut buf = [0u8; 2];
        self.i2c.read(ADDRESS, &mut buf).map_err(HygroError::I2c)?;
        Ok(u16::from_be_bytes(buf))
    }

    pub fn read_temperature_raw(&mut self) -> Result<u16, HygroError<I::Error>> {
        self.read_register(REG_TEMPERATURE)
    }

    pub fn read_humidity_raw(&mut self) -> Result<u16, HygroError<I::Error>> {
        self.read_register(REG_HUMIDITY)
    }

    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }
}
