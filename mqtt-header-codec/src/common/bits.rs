//! Single bit access within a byte

/// Returns whether bit `n` (0 is the least significant) of `byte` is set.
#[inline]
pub const fn get_bit(byte: u8, n: u8) -> bool {
    debug_assert!(n < 8);
    (byte >> n) & 1 == 1
}

/// Returns `byte` with bit `n` set to `value`.
#[inline]
pub const fn set_bit(byte: u8, n: u8, value: bool) -> u8 {
    debug_assert!(n < 8);
    if value {
        byte | (1 << n)
    } else {
        byte & !(1 << n)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_bit() {
        assert!(get_bit(0b1000_0000, 7));
        assert!(!get_bit(0b1000_0000, 6));
        assert!(get_bit(0b0000_0001, 0));
        assert!(!get_bit(0xCE, 0));
        assert!(get_bit(0xCE, 1));
    }

    #[test]
    fn test_set_bit() {
        assert_eq!(set_bit(0, 3, true), 0b0000_1000);
        assert_eq!(set_bit(0xFF, 3, false), 0b1111_0111);
        assert_eq!(set_bit(0b0000_1000, 3, true), 0b0000_1000);
        assert_eq!(set_bit(0, 0, false), 0);
    }
}
