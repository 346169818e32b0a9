/// Bits packed most significant first, used to store an encoding in an eighth of its text size.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitVec {

    /// The actual raw bits
    raw_data: Vec<u8>,
    /// How many bits of padding the last byte contains.
    /// Padding bits have no meaning
    last_byte_padding: u8

}

impl BitVec {

    pub fn new() -> Self {
        Self::default()
    }


    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw_data: Vec::with_capacity(least_bytes_repr_for_bits(capacity)),
            last_byte_padding: 0
        }
    }


    pub fn len_bits(&self) -> usize {
        self.raw_data.len() * 8 - self.last_byte_padding as usize
    }


    pub fn least_len_bytes(&self) -> usize {
        self.raw_data.len()
    }


    pub fn is_empty(&self) -> bool {
        self.raw_data.is_empty()
    }


    pub fn append_bit(&mut self, bit: bool) {

        if self.last_byte_padding > 0 {
            // An empty vec has no padding, so there is a last byte
            if let Some(last_byte) = self.raw_data.last_mut() {
                *last_byte |= (bit as u8) << (self.last_byte_padding - 1);
                self.last_byte_padding -= 1;
                return;
            }
        }

        self.raw_data.push((bit as u8) << 7);
        self.last_byte_padding = 7;
    }


    pub fn to_bit_string(&self) -> String {
        self.iter_bits()
            .map(|bit| if bit { '1' } else { '0' })
            .collect()
    }


    pub fn iter_bits(&self) -> BitIterator<'_> {
        BitIterator {
            bits: self,
            i: 0,
        }
    }


    /// The padding count followed by the raw bytes
    pub fn serialize(&self) -> Box<[u8]> {

        let mut buf = Vec::with_capacity(1 + self.least_len_bytes());

        buf.push(self.last_byte_padding);

        buf.extend_from_slice(&self.raw_data);

        buf.into_boxed_slice()
    }


    /// Returns `None` when the header byte is missing or claims more padding than a byte holds
    pub fn deserialize(input: &[u8]) -> Option<Self> {

        let (&last_byte_padding, raw_data) = input.split_first()?;

        if last_byte_padding > 7 || (raw_data.is_empty() && last_byte_padding != 0) {
            return None;
        }

        Some(Self {
            raw_data: raw_data.to_vec(),
            last_byte_padding
        })
    }

}


pub const fn least_bytes_repr_for_bits(bit_count: usize) -> usize {
    bit_count / 8 + (bit_count % 8 != 0) as usize
}


pub struct BitIterator<'a> {

    bits: &'a BitVec,
    i: usize

}

impl Iterator for BitIterator<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {

        if self.i >= self.bits.len_bits() {
            return None;
        }

        let byte = self.bits.raw_data[self.i / 8];
        let bit_in_byte_i = (self.i % 8) as u8;

        self.i += 1;

        Some(
            (byte & (1_u8 << (7 - bit_in_byte_i))) != 0
        )
    }
}
