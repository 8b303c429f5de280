use crate::opcode::Opcode;

/// Shorthand for results produced by the emulator
pub type Result<T> = std::result::Result<T, Error>;

/// An error that occurred while loading or executing a program
///
/// None of these are recoverable: the machine stops at the first one.
#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("invalid instruction `{0:#010b}`")]
  InvalidInstruction(u8),

  #[error("memory address `{0:#04x}` is out of bounds")]
  MemoryOutOfBounds(usize),

  #[error("register `{0}` does not exist")]
  InvalidRegister(u8),

  #[error("unsupported alu operation `{}`", .0.mnemonic())]
  UnsupportedAluOperation(Opcode),

  #[error("stack overflow")]
  StackOverflow,

  #[error("stack underflow")]
  StackUnderflow,

  #[error("machine is halted")]
  MachineHalted,

  #[error("program of {0} bytes does not fit in memory")]
  ProgramTooLarge(usize),

  #[error("line {line}: cannot parse `{text}` as an instruction byte")]
  Parse { line: usize, text: String },

  #[error(transparent)]
  Io(#[from] std::io::Error),
}
