/// Return the bit value for `value` at bit position `bit`
pub fn bv(value: u8, bit: u8) -> u8 {
    (value >> bit) & 1
}

/// Return `value` with the bit at position `bit` set
pub fn set_bit(value: u8, bit: u8) -> u8 {
    value | (1 << bit)
}

/// Return `value` with the bit at position `bit` cleared
pub fn clear_bit(value: u8, bit: u8) -> u8 {
    value & !(1 << bit)
}

/// Combine two bytes, little-endian, into a 16-bit value
pub fn combine_le(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | (low as u16)
}

/// Split a 16-bit value into its (low, high) bytes
pub fn split_le(value: u16) -> (u8, u8) {
    (value as u8, (value >> 8) as u8)
}
