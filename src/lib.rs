//! Memory core of an AVR 8-bit microcontroller emulator: the unified data
//! space (registers, I/O file, SRAM), write interception for peripheral
//! models, and the decoded program stream. Instruction execution, interrupt
//! delivery and program loading all live in the surrounding engine and talk
//! to the machine through [`Cpu`].

use thiserror::Error;

pub use crate::components::data_memory::DataMemory;
pub use crate::components::program_memory::ProgramMemory;
pub use crate::components::sreg::SregFlags;
pub use crate::components::write_hooks::{HookError, HookResult, HookTable, WriteHook};

mod components;
#[cfg(test)]
mod tests_cpu;

/// Bytes of the register + I/O file region at the bottom of the data space.
pub const REGISTER_SPACE_SIZE: usize = 0x100;
/// SRAM size used by [`Cpu::new`].
pub const DEFAULT_SRAM_BYTES: usize = 8192;
/// Data-space offset of the 16-bit stack pointer (SPL at 93, SPH at 94).
pub const SP_OFFSET: usize = 93;
/// Data-space offset of the status register.
pub const SREG_OFFSET: usize = 95;

#[derive(Error, Debug)]
pub enum CpuError {
    #[error("data address out of range: {addr:#06x} (data space is {len} bytes)")]
    DataAddressOutOfRange { addr: u16, len: usize },
    #[error("program address out of range: byte offset {offset:#06x} (program is {len} bytes)")]
    ProgramAddressOutOfRange { offset: usize, len: usize },
    #[error("write hook at {addr:#06x} failed")]
    HookFailed {
        addr: u16,
        #[source]
        source: HookError,
    },
    #[error("program memory must contain at least one word")]
    EmptyProgram,
    #[error("sram size must be at least one byte")]
    ZeroSramSize,
    #[error("sram size {sram_bytes} exceeds 16-bit addressability")]
    SramTooLarge { sram_bytes: usize },
}

/// The emulated machine's memory state: data space, write hooks, program
/// memory, plus the two scalars the engine advances every step.
///
/// All byte writes driven by emulated instructions should go through
/// [`Cpu::write_byte`] so peripheral hooks fire. The stack-pointer and status
/// accessors deliberately bypass hooks: internal bookkeeping like [`Cpu::reset`]
/// must not trigger peripheral side effects, while an instruction storing to
/// the same I/O addresses via `write_byte` still does.
pub struct Cpu {
    data: DataMemory,
    hooks: HookTable,
    program: ProgramMemory,
    pub pc: u16,
    pub cycles: u64,
}

impl Cpu {
    pub fn new(program_words: Vec<u16>) -> Result<Self, CpuError> {
        Self::with_sram_size(program_words, DEFAULT_SRAM_BYTES)
    }

    pub fn with_sram_size(program_words: Vec<u16>, sram_bytes: usize) -> Result<Self, CpuError> {
        if program_words.is_empty() {
            return Err(CpuError::EmptyProgram);
        }
        if sram_bytes == 0 {
            return Err(CpuError::ZeroSramSize);
        }
        if REGISTER_SPACE_SIZE + sram_bytes > 1 << 16 {
            return Err(CpuError::SramTooLarge { sram_bytes });
        }
        let mut cpu = Self {
            data: DataMemory::new(sram_bytes),
            hooks: HookTable::default(),
            program: ProgramMemory::new(program_words),
            pc: 0,
            cycles: 0,
        };
        cpu.reset();
        Ok(cpu)
    }

    /// Zeroes the data space, points SP at the top of it and clears `pc` and
    /// `cycles`. Hooks and program memory are untouched. Callable at any
    /// time.
    pub fn reset(&mut self) {
        self.data.clear();
        let top = (self.data.len() - 1) as u16;
        self.data.set_sp(top);
        self.pc = 0;
        self.cycles = 0;
        log::debug!("reset: sp={:#06x}", top);
    }

    pub fn read_byte(&self, addr: u16) -> Result<u8, CpuError> {
        self.data.read(addr)
    }

    /// Stores `value` at `addr`, first offering the write to the hook
    /// registered there, if any. A hook answering [`HookResult::Handled`]
    /// suppresses the default store and owns whatever state change happens
    /// instead; [`HookResult::NotHandled`] lets the store proceed. A hook
    /// error aborts the write and propagates.
    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), CpuError> {
        if let Some(hook) = self.hooks.lookup_mut(addr) {
            let old = self.data.read(addr)?;
            let outcome = hook(&mut self.data, value, old, addr)
                .map_err(|source| CpuError::HookFailed { addr, source })?;
            if outcome == HookResult::Handled {
                log::trace!("write of {:#04x} to {:#06x} handled by hook", value, addr);
                return Ok(());
            }
        }
        self.data.write(addr, value)
    }

    pub fn read_word(&self, addr: u16) -> Result<u16, CpuError> {
        self.data.read_u16_le(addr)
    }

    /// Little-endian 16-bit store composed of two [`Cpu::write_byte`] calls,
    /// so a hook on either half of a 16-bit register still fires.
    pub fn write_word(&mut self, addr: u16, value: u16) -> Result<(), CpuError> {
        let [low, high] = value.to_le_bytes();
        self.write_byte(addr, low)?;
        let next = addr.checked_add(1).ok_or(CpuError::DataAddressOutOfRange {
            addr,
            len: self.data.len(),
        })?;
        self.write_byte(next, high)
    }

    pub fn register_write_hook<F>(&mut self, addr: u16, hook: F)
    where
        F: FnMut(&mut DataMemory, u8, u8, u16) -> Result<HookResult, HookError> + 'static,
    {
        self.hooks.register(addr, Box::new(hook));
    }

    pub fn unregister_write_hook(&mut self, addr: u16) -> bool {
        self.hooks.unregister(addr)
    }

    pub fn sp(&self) -> u16 {
        self.data.sp()
    }

    pub fn set_sp(&mut self, value: u16) {
        self.data.set_sp(value)
    }

    pub fn sreg(&self) -> u8 {
        self.data.sreg()
    }

    pub fn status_flags(&self) -> SregFlags {
        self.data.status_flags()
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.data.interrupts_enabled()
    }

    pub fn program_word(&self, index: usize) -> Result<u16, CpuError> {
        self.program.word(index)
    }

    pub fn program_byte(&self, offset: usize) -> Result<u8, CpuError> {
        self.program.byte(offset)
    }

    pub fn program(&self) -> &ProgramMemory {
        &self.program
    }

    /// Raw data space, hook-free. This is the same view hooks receive.
    pub fn data(&self) -> &DataMemory {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataMemory {
        &mut self.data
    }

    pub fn address_space_len(&self) -> usize {
        self.data.len()
    }
}

impl std::fmt::Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "pc: {:#06x}", self.pc)?;
        writeln!(f, "sp: {:#06x}", self.sp())?;
        writeln!(f, "sreg: {:?}", self.status_flags())?;
        writeln!(f, "cycles: {}", self.cycles)
    }
}
