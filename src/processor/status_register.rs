use std::convert::From;

use crate::utils;

// Bring local enum variants to scope
use StatusRegisterFlag::*;

// Bit 5 has no meaning but always reads back as 1
const UNUSED_BIT_MASK: u8 = 0b0010_0000;

#[derive(Copy, Clone)]
pub struct StatusRegister {
    sr: u8,
}

impl StatusRegister {
    pub fn new() -> Self {
        Self { sr: UNUSED_BIT_MASK }
    }

    pub fn reset(&mut self) {
        self.sr = UNUSED_BIT_MASK;
    }

    pub fn get(&self, flag: StatusRegisterFlag) -> bool {
        utils::bv(self.sr, flag as u8) > 0
    }

    pub fn set(&mut self, flag: StatusRegisterFlag) {
        self.sr = utils::set_bit(self.sr, flag as u8);
    }

    pub fn clear(&mut self, flag: StatusRegisterFlag) {
        self.sr = utils::clear_bit(self.sr, flag as u8);
    }

    pub fn set_value(&mut self, flag: StatusRegisterFlag, condition: bool) {
        match condition {
            true => self.set(flag),
            false => self.clear(flag),
        }
    }

    pub fn auto_set(&mut self, flag: StatusRegisterFlag, value: u8) {
        let condition = match flag {
            Zero => value == 0,
            Negative => (value as i8) < 0,
            _ => panic!("Auto set flag {flag:?} not implemented"),
        };

        self.set_value(flag, condition);
    }
}

impl Default for StatusRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u8> for StatusRegister {
    fn from(value: u8) -> Self {
        Self {
            sr: value | UNUSED_BIT_MASK,
        }
    }
}

impl From<StatusRegister> for u8 {
    fn from(value: StatusRegister) -> Self {
        value.sr
    }
}

#[derive(Copy, Clone, Debug)]
pub enum StatusRegisterFlag {
    Negative = 7,
    Overflow = 6,
    // bit 5 is unused and is always 1
    Break = 4,
    Decimal = 3, // decoded but with no effect on arithmetic in the NES
    InterruptDisable = 2,
    Zero = 1,
    Carry = 0,
}
