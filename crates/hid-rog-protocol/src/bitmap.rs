//! Active-key bitmap and its two wire encodings.
//!
//! Keyboard-class reports describe the full set of currently held key codes,
//! not transitions. Two physical encodings exist:
//!
//! - **Sparse array** (6/8/9 bytes): every byte from a fixed starting offset
//!   is one active native key code; `0x00` marks an empty slot.
//! - **Dense bitmask** (17 bytes): the last 15 bytes are the bitmap packed
//!   big-endian, most significant byte first. The top byte of word 0 is
//!   structurally absent on the wire and always decodes as zero.
//!
//! Both decode into [`KeyStateBitmap`]: 4×32-bit words under a
//! most-significant-word-first ordering, so native code `c` lives in word
//! `KEY_STATE_WORDS - 1 - c/32`, bit `c % 32`.

/// Number of 32-bit words tracked per logical device.
pub const KEY_STATE_WORDS: usize = 4;

/// Bits per bitmap word.
pub const KEY_STATE_BITS: usize = 32;

/// Highest native code (exclusive) representable in the bitmap.
pub const KEY_STATE_CAPACITY: usize = KEY_STATE_WORDS * KEY_STATE_BITS;

/// Byte length of the dense bitmask report.
pub const DENSE_REPORT_LEN: usize = 17;

/// Word/bit coordinates of a native key code inside [`KeyStateBitmap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBitPosition {
    /// Physical word index (0 is the most significant word).
    pub word: usize,
    /// Bit index within the word, counted from the least significant bit.
    pub bit: u32,
}

/// Map a native key code to its bitmap coordinates.
///
/// Returns `None` for codes the bitmap cannot track (`code >=
/// KEY_STATE_CAPACITY`); such codes are dropped by every caller.
pub fn key_bit_position(code: u8) -> Option<KeyBitPosition> {
    let code = code as usize;
    if code >= KEY_STATE_CAPACITY {
        return None;
    }
    Some(KeyBitPosition {
        word: KEY_STATE_WORDS - 1 - code / KEY_STATE_BITS,
        bit: (code % KEY_STATE_BITS) as u32,
    })
}

/// Set of native key codes asserted by the most recent keyboard-class report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyStateBitmap {
    words: [u32; KEY_STATE_WORDS],
}

impl KeyStateBitmap {
    /// All-zero bitmap (no keys held).
    pub const fn empty() -> Self {
        Self {
            words: [0; KEY_STATE_WORDS],
        }
    }

    /// Decode a sparse active-key-array report.
    ///
    /// Bytes from `first_code_offset` to the end of the report each carry one
    /// active native code; zero bytes and untrackable codes are skipped.
    pub fn decode_sparse(data: &[u8], first_code_offset: usize) -> Self {
        let mut bitmap = Self::empty();
        for &code in data.iter().skip(first_code_offset) {
            if code == 0 {
                continue;
            }
            bitmap.set(code);
        }
        bitmap
    }

    /// Decode a dense 17-byte bitmask report.
    ///
    /// Bytes are consumed from the end of the report towards the front, most
    /// significant byte of each word first. Word 0 only receives three bytes;
    /// its top byte is not transmitted and stays zero.
    pub fn decode_dense(data: &[u8]) -> Self {
        let mut words = [0u32; KEY_STATE_WORDS];
        let mut bytes = data.iter().rev().copied();
        for (i, word) in words.iter_mut().enumerate() {
            let mut bit = if i == 0 { 8 } else { 0 };
            while bit < KEY_STATE_BITS {
                let byte = bytes.next().unwrap_or(0) as u32;
                *word |= byte << (KEY_STATE_BITS - 8 - bit);
                bit += 8;
            }
        }
        Self { words }
    }

    /// Encode into the dense bitmask wire form.
    ///
    /// Exact inverse of [`KeyStateBitmap::decode_dense`] for bitmaps whose
    /// word-0 top byte is zero (the wire cannot carry it). The two header
    /// bytes are left zero.
    pub fn encode_dense(&self) -> [u8; DENSE_REPORT_LEN] {
        let mut out = [0u8; DENSE_REPORT_LEN];
        let mut offset = DENSE_REPORT_LEN - 1;
        for (i, word) in self.words.iter().enumerate() {
            let mut bit = if i == 0 { 8 } else { 0 };
            while bit < KEY_STATE_BITS {
                out[offset] = (word >> (KEY_STATE_BITS - 8 - bit)) as u8;
                offset -= 1;
                bit += 8;
            }
        }
        out
    }

    /// Mark a native code as held. Untrackable codes are ignored.
    pub fn set(&mut self, code: u8) {
        if let Some(pos) = key_bit_position(code) {
            self.words[pos.word] |= 1 << pos.bit;
        }
    }

    /// Whether a native code is held.
    pub fn contains(&self, code: u8) -> bool {
        match key_bit_position(code) {
            Some(pos) => self.words[pos.word] & (1 << pos.bit) != 0,
            None => false,
        }
    }

    /// True when no key is held.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Raw word view, most significant word first.
    pub fn words(&self) -> &[u32; KEY_STATE_WORDS] {
        &self.words
    }

    /// Iterate the codes whose held state differs between `self` (previous)
    /// and `newer`, in ascending native-code order. Each item is `(code,
    /// held_in_newer)`.
    pub fn transitions(&self, newer: &KeyStateBitmap) -> Transitions {
        Transitions {
            previous: *self,
            newer: *newer,
            next_code: 0,
        }
    }
}

/// Iterator over per-code transitions between two bitmaps.
pub struct Transitions {
    previous: KeyStateBitmap,
    newer: KeyStateBitmap,
    next_code: usize,
}

impl Iterator for Transitions {
    type Item = (u8, bool);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_code < KEY_STATE_CAPACITY {
            let code = self.next_code as u8;
            self.next_code += 1;
            if self.previous.contains(code) != self.newer.contains(code) {
                return Some((code, self.newer.contains(code)));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_position_low_codes() {
        let pos = key_bit_position(5).expect("code 5 is trackable");
        assert_eq!(pos.word, 3);
        assert_eq!(pos.bit, 5);
    }

    #[test]
    fn bit_position_word_boundaries() {
        let pos = key_bit_position(31).expect("trackable");
        assert_eq!((pos.word, pos.bit), (3, 31));

        let pos = key_bit_position(32).expect("trackable");
        assert_eq!((pos.word, pos.bit), (2, 0));

        let pos = key_bit_position(127).expect("trackable");
        assert_eq!((pos.word, pos.bit), (0, 31));
    }

    #[test]
    fn bit_position_out_of_range() {
        assert_eq!(key_bit_position(128), None);
        assert_eq!(key_bit_position(255), None);
    }

    #[test]
    fn decode_sparse_skips_empty_slots() {
        let data = [0x00, 0x00, 0x00, 0x05, 0x00, 0x21, 0x00, 0x00, 0x00];
        let bitmap = KeyStateBitmap::decode_sparse(&data, 3);

        assert!(bitmap.contains(0x05));
        assert!(bitmap.contains(0x21));
        assert!(!bitmap.contains(0x00));
        assert_eq!(bitmap.transitions(&KeyStateBitmap::empty()).count(), 2);
    }

    #[test]
    fn decode_sparse_compact_offset() {
        // 8-byte firmware variant starts the code array at offset 2.
        let data = [0x00, 0x00, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00];
        let bitmap = KeyStateBitmap::decode_sparse(&data, 2);
        assert!(bitmap.contains(0x07));
    }

    #[test]
    fn decode_sparse_ignores_untrackable_codes() {
        let data = [0x00, 0x00, 0x00, 0xFF, 0x80, 0x05];
        let bitmap = KeyStateBitmap::decode_sparse(&data, 3);
        assert!(bitmap.contains(0x05));
        assert_eq!(bitmap.transitions(&KeyStateBitmap::empty()).count(), 1);
    }

    #[test]
    fn decode_dense_places_low_codes_in_last_word() {
        // Code 5 is bit 5 of the last word; its byte travels at offset 2.
        let mut data = [0u8; DENSE_REPORT_LEN];
        data[2] = 1 << 5;
        let bitmap = KeyStateBitmap::decode_dense(&data);
        assert!(bitmap.contains(5));

        // The last wire byte carries bits 16..24 of word 0.
        let mut data = [0u8; DENSE_REPORT_LEN];
        data[DENSE_REPORT_LEN - 1] = 0x01;
        let bitmap = KeyStateBitmap::decode_dense(&data);
        assert_eq!(bitmap.words()[0], 0x0001_0000);
    }

    #[test]
    fn decode_dense_word0_top_byte_is_absent() {
        // Even an all-0xFF report cannot assert the top 8 bits of word 0.
        let data = [0xFFu8; DENSE_REPORT_LEN];
        let bitmap = KeyStateBitmap::decode_dense(&data);
        assert_eq!(bitmap.words()[0], 0x00FF_FFFF);
        assert_eq!(bitmap.words()[1], 0xFFFF_FFFF);
        assert_eq!(bitmap.words()[3], 0xFFFF_FFFF);
    }

    #[test]
    fn dense_round_trip_matches_sparse() {
        let sparse = [0x00, 0x00, 0x00, 0x05, 0x2A, 0x3F, 0x00, 0x00, 0x00];
        let bitmap = KeyStateBitmap::decode_sparse(&sparse, 3);

        let wire = bitmap.encode_dense();
        assert_eq!(KeyStateBitmap::decode_dense(&wire), bitmap);
    }

    #[test]
    fn transitions_are_code_ordered() {
        let mut previous = KeyStateBitmap::empty();
        previous.set(0x50);

        let mut newer = KeyStateBitmap::empty();
        newer.set(0x03);
        newer.set(0x21);

        let transitions: Vec<_> = previous.transitions(&newer).collect();
        assert_eq!(
            transitions,
            vec![(0x03, true), (0x21, true), (0x50, false)]
        );
    }

    #[test]
    fn transitions_empty_when_unchanged() {
        let mut bitmap = KeyStateBitmap::empty();
        bitmap.set(0x05);
        bitmap.set(0x41);
        assert_eq!(bitmap.transitions(&bitmap).count(), 0);
    }
}
