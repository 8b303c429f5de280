use crate::error::Error;

/// The LS-8 instruction set
///
/// Opcodes pack a little metadata into their bits:
///
/// | Bits  | Meaning                                 |
/// |-------|-----------------------------------------|
/// | `7-6` | number of operand bytes                 |
/// | `5`   | handled by the ALU                      |
/// | `4`   | sets the program counter itself         |
/// | `3-0` | instruction identifier                  |
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
  /// Loads an immediate value into a register.
  ///
  /// | Operation      | Semantics/RTL | Assembly     |
  /// |----------------|---------------|--------------|
  /// | Load Immediate | `r[a] ← b`    | `LDI ra, b`  |
  Ldi = 0b1000_0010,

  /// Prints the decimal value of a register on its own line.
  ///
  /// | Operation | Semantics/RTL     | Assembly |
  /// |-----------|-------------------|----------|
  /// | Print     | `out ← r[a]`      | `PRN ra` |
  Prn = 0b0100_0111,

  /// Multiplies two registers, wrapping at 8 bits.
  ///
  /// | Operation | Semantics/RTL              | Assembly     |
  /// |-----------|----------------------------|--------------|
  /// | Multiply  | `r[a] ← r[a] × r[b] mod 256` | `MUL ra, rb` |
  Mul = 0b1010_0010,

  /// | Operation | Semantics/RTL      | Assembly |
  /// |-----------|--------------------|----------|
  /// | Halt      | `(stop execution)` | `HLT`    |
  Hlt = 0b0000_0001,

  /// | Operation | Semantics/RTL                  | Assembly  |
  /// |-----------|--------------------------------|-----------|
  /// | Push      | `sp ← sp − 1; m[sp] ← r[a]`    | `PUSH ra` |
  Push = 0b0100_0101,

  /// | Operation | Semantics/RTL                  | Assembly |
  /// |-----------|--------------------------------|----------|
  /// | Pop       | `r[a] ← m[sp]; sp ← sp + 1`    | `POP ra` |
  Pop = 0b0100_0110,

  /// Calls the subroutine whose address is held in a register.
  ///
  /// | Operation | Semantics/RTL                                | Assembly  |
  /// |-----------|----------------------------------------------|-----------|
  /// | Call      | `sp ← sp − 1; m[sp] ← pc + 2; pc ← r[a]`     | `CALL ra` |
  Call = 0b0101_0000,

  /// | Operation | Semantics/RTL                  | Assembly |
  /// |-----------|--------------------------------|----------|
  /// | Return    | `pc ← m[sp]; sp ← sp + 1`      | `RET`    |
  Ret = 0b0001_0001,
}

impl Opcode {
  /// Number of operand bytes following the opcode
  pub const fn operand_count(self) -> usize {
    (self as u8 >> 6) as usize
  }

  /// Whether the handler writes the program counter itself, rather than
  /// falling through to the next instruction
  pub const fn sets_pc(self) -> bool {
    self as u8 & 0b0001_0000 != 0
  }

  pub const fn mnemonic(self) -> &'static str {
    match self {
      Self::Ldi => "LDI",
      Self::Prn => "PRN",
      Self::Mul => "MUL",
      Self::Hlt => "HLT",
      Self::Push => "PUSH",
      Self::Pop => "POP",
      Self::Call => "CALL",
      Self::Ret => "RET",
    }
  }
}

impl TryFrom<u8> for Opcode {
  type Error = Error;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    match byte {
      0b1000_0010 => Ok(Self::Ldi),
      0b0100_0111 => Ok(Self::Prn),
      0b1010_0010 => Ok(Self::Mul),
      0b0000_0001 => Ok(Self::Hlt),
      0b0100_0101 => Ok(Self::Push),
      0b0100_0110 => Ok(Self::Pop),
      0b0101_0000 => Ok(Self::Call),
      0b0001_0001 => Ok(Self::Ret),
      _ => Err(Error::InvalidInstruction(byte)),
    }
  }
}

impl From<Opcode> for u8 {
  fn from(op: Opcode) -> Self {
    op as u8
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const ALL: [Opcode; 8] = [
    Opcode::Ldi,
    Opcode::Prn,
    Opcode::Mul,
    Opcode::Hlt,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Call,
    Opcode::Ret,
  ];

  #[test]
  fn decode_known() {
    for op in ALL {
      assert_eq!(Opcode::try_from(u8::from(op)).unwrap(), op);
    }
  }

  #[test]
  fn decode_unknown() {
    assert!(matches!(
      Opcode::try_from(0xFF),
      Err(Error::InvalidInstruction(0xFF))
    ));
    assert!(matches!(
      Opcode::try_from(0x00),
      Err(Error::InvalidInstruction(0x00))
    ));
  }

  #[test]
  fn operand_counts() {
    assert_eq!(Opcode::Ldi.operand_count(), 2);
    assert_eq!(Opcode::Mul.operand_count(), 2);
    assert_eq!(Opcode::Prn.operand_count(), 1);
    assert_eq!(Opcode::Push.operand_count(), 1);
    assert_eq!(Opcode::Pop.operand_count(), 1);
    assert_eq!(Opcode::Call.operand_count(), 1);
    assert_eq!(Opcode::Hlt.operand_count(), 0);
    assert_eq!(Opcode::Ret.operand_count(), 0);
  }

  #[test]
  fn sets_pc() {
    let jumps: Vec<_> = ALL.iter().filter(|op| op.sets_pc()).collect();
    assert_eq!(jumps, [&Opcode::Call, &Opcode::Ret]);
  }
}
