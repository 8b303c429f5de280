//! Arithmetic over register values

use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::registers::Register;

/// Apply the ALU operation `op` to `a` and `b`, returning the value destined
/// for the first operand register.
///
/// Results wrap at the register width.
pub fn apply(op: Opcode, a: Register, b: Register) -> Result<Register> {
  match op {
    Opcode::Mul => Ok(a.wrapping_mul(b)),
    _ => Err(Error::UnsupportedAluOperation(op)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mul() {
    assert_eq!(apply(Opcode::Mul, 8, 9).unwrap(), 72);
    assert_eq!(apply(Opcode::Mul, 0, 200).unwrap(), 0);
  }

  #[test]
  fn mul_wraps() {
    // 16 * 17 = 272 = 256 + 16
    assert_eq!(apply(Opcode::Mul, 16, 17).unwrap(), 16);
    assert_eq!(apply(Opcode::Mul, 0xFF, 0xFF).unwrap(), 1);
  }

  #[test]
  fn mul_matches_mod_256() {
    for a in (0..=255u8).step_by(7) {
      for b in (0..=255u8).step_by(11) {
        let expected = (a as u32 * b as u32 % 256) as u8;
        assert_eq!(apply(Opcode::Mul, a, b).unwrap(), expected);
      }
    }
  }

  #[test]
  fn unsupported() {
    assert!(matches!(
      apply(Opcode::Ldi, 1, 2),
      Err(Error::UnsupportedAluOperation(Opcode::Ldi))
    ));
  }
}
