use crate::error::{Error, Result};

/// Number of addressable bytes
pub const MEMORY_SIZE: usize = 256;

/// Fixed-size, zero-initialised byte store
///
/// Every access is bounds checked; addresses never wrap around.
#[derive(Debug, Clone)]
pub struct Memory {
  cells: [u8; MEMORY_SIZE],
}

impl Memory {
  pub fn new() -> Self {
    Self {
      cells: [0; MEMORY_SIZE],
    }
  }

  pub fn read(&self, address: usize) -> Result<u8> {
    self
      .cells
      .get(address)
      .copied()
      .ok_or(Error::MemoryOutOfBounds(address))
  }

  pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
    let cell = self
      .cells
      .get_mut(address)
      .ok_or(Error::MemoryOutOfBounds(address))?;
    *cell = value;
    Ok(())
  }

  /// Copy a program image into memory starting at address `0`
  pub fn load(&mut self, program: &[u8]) -> Result<()> {
    if program.len() > MEMORY_SIZE {
      return Err(Error::ProgramTooLarge(program.len()));
    }
    self.cells[..program.len()].copy_from_slice(program);
    Ok(())
  }

  pub fn as_slice(&self) -> &[u8] {
    &self.cells
  }
}

impl Default for Memory {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_is_zeroed() {
    let memory = Memory::new();
    assert!(memory.as_slice().iter().all(|&b| b == 0));
    assert_eq!(memory.as_slice().len(), MEMORY_SIZE);
  }

  #[test]
  fn write_then_read() {
    let mut memory = Memory::new();
    memory.write(0xF3, 42).unwrap();
    assert_eq!(memory.read(0xF3).unwrap(), 42);
    assert_eq!(memory.read(0xF2).unwrap(), 0);
  }

  #[test]
  fn last_cell_is_addressable() {
    let mut memory = Memory::new();
    memory.write(0xFF, 7).unwrap();
    assert_eq!(memory.read(0xFF).unwrap(), 7);
  }

  #[test]
  fn out_of_bounds() {
    let mut memory = Memory::new();
    assert!(matches!(
      memory.read(MEMORY_SIZE),
      Err(Error::MemoryOutOfBounds(256))
    ));
    assert!(matches!(
      memory.write(300, 1),
      Err(Error::MemoryOutOfBounds(300))
    ));
  }

  #[test]
  fn load_program() {
    let mut memory = Memory::new();
    memory.load(&[0x82, 0x00, 0x08]).unwrap();
    assert_eq!(&memory.as_slice()[..4], &[0x82, 0x00, 0x08, 0x00]);
  }

  #[test]
  fn load_too_large() {
    let mut memory = Memory::new();
    let program = vec![0; MEMORY_SIZE + 1];
    assert!(matches!(
      memory.load(&program),
      Err(Error::ProgramTooLarge(257))
    ));
  }
}
