use thiserror::Error;

use crate::opcode::Opcode;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Invalid memory access '{0}'.")]
    Memory(#[from] MemoryError),
}

impl ProcessError {
    /// Unknown opcodes are skipped by the interpreter, so they never need to halt
    /// the machine.
    pub fn is_unknown_opcode(&self) -> bool {
        matches!(self, ProcessError::Opcode(OpcodeError::Unknown(_)))
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X}.")]
    Unknown(Opcode),
    #[error("Pointer location invalid there can not be an opcode at {pointer}, if data len is {len}")]
    MemoryInvalid { pointer: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack overflow, all {0} entries are in use!")]
    Overflow(usize),
    #[error("Stack underflow, there is no address to return to!")]
    Underflow,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MemoryError {
    #[error("Jump target {target:#06X} is outside of the executable memory.")]
    OutOfRangeJump { target: usize },
    #[error("Memory access of {len} bytes at {address:#06X} is out of bounds.")]
    OutOfBounds { address: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadError {
    #[error("The program is {len} bytes long, but at most {max} bytes fit into memory.")]
    ProgramTooLarge { len: usize, max: usize },
}
