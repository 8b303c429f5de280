use crate::error::{Error, Result};

/// The type of a single register in our virtual machine
pub type Register = u8;

/// Number of general-purpose registers
pub const REGISTER_COUNT: usize = 8;

/// The eight general-purpose registers
///
/// Nothing physically distinguishes the stack pointer, `R7` is simply the
/// register every stack instruction hard-codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
  values: [Register; REGISTER_COUNT],
}

impl Registers {
  /// Index of the stack pointer
  pub const SP: u8 = 7;

  /// Initial stack pointer, just below the top of memory
  pub const SP_INIT: Register = 0xF4;

  pub fn new() -> Self {
    let mut values = [0; REGISTER_COUNT];
    values[Self::SP as usize] = Self::SP_INIT;
    Self { values }
  }

  pub fn get(&self, index: u8) -> Result<Register> {
    self
      .values
      .get(index as usize)
      .copied()
      .ok_or(Error::InvalidRegister(index))
  }

  pub fn set(&mut self, index: u8, value: Register) -> Result<()> {
    let slot = self
      .values
      .get_mut(index as usize)
      .ok_or(Error::InvalidRegister(index))?;
    *slot = value;
    Ok(())
  }

  pub fn stack_pointer(&self) -> Register {
    self.values[Self::SP as usize]
  }

  pub fn set_stack_pointer(&mut self, value: Register) {
    self.values[Self::SP as usize] = value;
  }

  pub fn as_slice(&self) -> &[Register] {
    &self.values
  }
}

impl Default for Registers {
  fn default() -> Self {
    Self::new()
  }
}
