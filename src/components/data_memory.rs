use crate::components::sreg::SregFlags;
use crate::{CpuError, REGISTER_SPACE_SIZE, SP_OFFSET, SREG_OFFSET};

/// Unified data space: 32 general registers and the I/O file in the first
/// 256 bytes, SRAM above. One buffer, fixed at construction; every region is
/// an offset into it.
///
/// This layer is plain storage. Write hooks live in [`crate::Cpu`], so
/// everything here bypasses them, which is exactly what internal bookkeeping
/// (`reset`, the SP/SREG views) and peripheral hooks themselves need.
pub struct DataMemory {
    data: Vec<u8>,
}

impl DataMemory {
    pub(crate) fn new(sram_bytes: usize) -> Self {
        Self {
            data: vec![0; REGISTER_SPACE_SIZE + sram_bytes],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn read(&self, addr: u16) -> Result<u8, CpuError> {
        self.data
            .get(addr as usize)
            .copied()
            .ok_or(CpuError::DataAddressOutOfRange {
                addr,
                len: self.data.len(),
            })
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), CpuError> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(addr as usize)
            .ok_or(CpuError::DataAddressOutOfRange { addr, len })?;
        *slot = value;
        Ok(())
    }

    pub fn read_u16_le(&self, addr: u16) -> Result<u16, CpuError> {
        let low = self.read(addr)?;
        let high = self.read(self.next_addr(addr)?)?;
        Ok(u16::from_le_bytes([low, high]))
    }

    pub fn write_u16_le(&mut self, addr: u16, value: u16) -> Result<(), CpuError> {
        let [low, high] = value.to_le_bytes();
        self.write(addr, low)?;
        self.write(self.next_addr(addr)?, high)
    }

    fn next_addr(&self, addr: u16) -> Result<u16, CpuError> {
        addr.checked_add(1).ok_or(CpuError::DataAddressOutOfRange {
            addr,
            len: self.data.len(),
        })
    }

    pub(crate) fn clear(&mut self) {
        self.data.fill(0);
    }

    // SP and SREG sit at constant offsets inside the 256-byte register space,
    // and the buffer is never smaller than that, so these never bounds-fail.

    pub fn sp(&self) -> u16 {
        u16::from_le_bytes([self.data[SP_OFFSET], self.data[SP_OFFSET + 1]])
    }

    pub fn set_sp(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.data[SP_OFFSET] = low;
        self.data[SP_OFFSET + 1] = high;
    }

    pub fn sreg(&self) -> u8 {
        self.data[SREG_OFFSET]
    }

    pub fn set_sreg(&mut self, value: u8) {
        self.data[SREG_OFFSET] = value;
    }

    pub fn status_flags(&self) -> SregFlags {
        SregFlags::from_bits_truncate(self.sreg())
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.status_flags().contains(SregFlags::INTERRUPT)
    }
}
