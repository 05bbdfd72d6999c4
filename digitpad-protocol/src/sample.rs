//! The 28×28 1bpp sample sent to the inference device.

/// Width and height of a sample in pixels
pub const SAMPLE_SIDE: usize = 28;

/// Packed size of a sample: 784 bits
pub const SAMPLE_BYTES: usize = SAMPLE_SIDE * SAMPLE_SIDE / 8;

/// Locate a pixel index in an MSB-first packed bitmap
///
/// Returns the byte index and the mask selecting the pixel's bit.
#[inline]
pub const fn bit_position(index: usize) -> (usize, u8) {
    (index / 8, 0x80 >> (index % 8))
}

/// A packed 28×28 raster
#[derive(Clone, PartialEq, Eq)]
pub struct Sample {
    bits: [u8; SAMPLE_BYTES],
}

impl Default for Sample {
    fn default() -> Self {
        Self::new()
    }
}

impl Sample {
    /// An all-blank sample
    pub const fn new() -> Self {
        Self {
            bits: [0; SAMPLE_BYTES],
        }
    }

    /// Build a sample by asking `ink` about every cell in row-major order
    pub fn from_fn(mut ink: impl FnMut(usize, usize) -> bool) -> Self {
        let mut sample = Self::new();
        for y in 0..SAMPLE_SIDE {
            for x in 0..SAMPLE_SIDE {
                if ink(x, y) {
                    sample.set(x, y, true);
                }
            }
        }
        sample
    }

    /// Set or clear a cell. Cells outside the 28×28 grid are ignored.
    pub fn set(&mut self, x: usize, y: usize, ink: bool) {
        if x >= SAMPLE_SIDE || y >= SAMPLE_SIDE {
            return;
        }
        let (byte, mask) = bit_position(y * SAMPLE_SIDE + x);
        if ink {
            self.bits[byte] |= mask;
        } else {
            self.bits[byte] &= !mask;
        }
    }

    /// Read a cell. Cells outside the grid read as blank.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= SAMPLE_SIDE || y >= SAMPLE_SIDE {
            return false;
        }
        let (byte, mask) = bit_position(y * SAMPLE_SIDE + x);
        self.bits[byte] & mask != 0
    }

    /// Number of inked cells
    pub fn ink_count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// Packed bytes, ready to be framed
    pub fn as_bytes(&self) -> &[u8; SAMPLE_BYTES] {
        &self.bits
    }
}

impl core::fmt::Debug for Sample {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Sample {{")?;
        for y in 0..SAMPLE_SIDE {
            for x in 0..SAMPLE_SIDE {
                f.write_str(if self.get(x, y) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Sample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Sample({=[u8]:x})", &self.bits[..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_98_bytes() {
        assert_eq!(SAMPLE_BYTES, 98);
        assert_eq!(Sample::new().as_bytes().len(), 98);
    }

    #[test]
    fn test_bit_position_msb_first() {
        assert_eq!(bit_position(0), (0, 0x80));
        assert_eq!(bit_position(7), (0, 0x01));
        assert_eq!(bit_position(8), (1, 0x80));
        assert_eq!(bit_position(783), (97, 0x01));
    }

    #[test]
    fn test_origin_cell_is_first_bit() {
        let mut sample = Sample::new();
        sample.set(0, 0, true);
        assert_eq!(sample.as_bytes()[0], 0x80);
        assert!(sample.as_bytes()[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_row_major_layout() {
        let mut sample = Sample::new();
        // Second row, first column: index 28 -> byte 3, bit 4 from the top
        sample.set(0, 1, true);
        assert_eq!(sample.as_bytes()[3], 0x08);
        assert!(sample.get(0, 1));
        assert!(!sample.get(1, 0));
    }

    #[test]
    fn test_set_false_clears() {
        let mut sample = Sample::new();
        sample.set(5, 5, true);
        sample.set(5, 5, false);
        assert_eq!(sample.ink_count(), 0);
    }

    #[test]
    fn test_out_of_grid_ignored() {
        let mut sample = Sample::new();
        sample.set(28, 0, true);
        sample.set(0, 28, true);
        assert_eq!(sample, Sample::new());
        assert!(!sample.get(100, 100));
    }

    #[test]
    fn test_from_fn_diagonal() {
        let sample = Sample::from_fn(|x, y| x == y);
        assert_eq!(sample.ink_count(), SAMPLE_SIDE as u32);
        assert!(sample.get(27, 27));
        assert!(!sample.get(27, 26));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_then_get(x in 0usize..SAMPLE_SIDE, y in 0usize..SAMPLE_SIDE) {
                let mut sample = Sample::new();
                sample.set(x, y, true);
                prop_assert!(sample.get(x, y));
                prop_assert_eq!(sample.ink_count(), 1);
            }
        }
    }
}
