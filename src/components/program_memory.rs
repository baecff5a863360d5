use crate::CpuError;

/// Flash, as the decoded 16-bit instruction stream. Immutable once built;
/// self-programming belongs to the execution engine, not this core.
pub struct ProgramMemory {
    words: Vec<u16>,
}

impl ProgramMemory {
    pub(crate) fn new(words: Vec<u16>) -> Self {
        Self { words }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn byte_count(&self) -> usize {
        self.words.len() * 2
    }

    pub fn word(&self, index: usize) -> Result<u16, CpuError> {
        self.words
            .get(index)
            .copied()
            .ok_or(CpuError::ProgramAddressOutOfRange {
                offset: index * 2,
                len: self.byte_count(),
            })
    }

    /// Byte view over the same words, packed little-endian: `byte(2i)` is the
    /// low byte of `word(i)`, `byte(2i + 1)` the high byte.
    pub fn byte(&self, offset: usize) -> Result<u8, CpuError> {
        let word = self
            .words
            .get(offset / 2)
            .copied()
            .ok_or(CpuError::ProgramAddressOutOfRange {
                offset,
                len: self.byte_count(),
            })?;
        Ok(if offset % 2 == 0 {
            word as u8
        } else {
            (word >> 8) as u8
        })
    }
}
