//! Bare-bones emulator for the LS-8, an 8-bit register machine
//!
//! 256 bytes of memory, eight registers (`R7` doubles as the stack pointer)
//! and a handful of instructions: `LDI`, `PRN`, `MUL`, `PUSH`, `POP`, `CALL`,
//! `RET` and `HLT`.

pub mod alu;
pub mod error;
pub mod memory;
pub mod opcode;
pub mod region;
pub mod registers;
pub mod vm;

pub use error::{Error, Result};
