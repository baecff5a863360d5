use bitflags::bitflags;

bitflags! {
    /// AVR status register bits. Bit 7 (`INTERRUPT`) is the global interrupt
    /// enable; the rest are condition flags owned by the execution engine.
    #[derive(Default)]
    pub struct SregFlags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const NEGATIVE = 0b0000_0100;
        const OVERFLOW = 0b0000_1000;
        const SIGN = 0b0001_0000;
        const HALF_CARRY = 0b0010_0000;
        const BIT_COPY = 0b0100_0000;
        const INTERRUPT = 0b1000_0000;
    }
}
