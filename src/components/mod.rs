pub mod data_memory;
pub mod program_memory;
pub mod sreg;
pub mod write_hooks;
