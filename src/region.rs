use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A region of instructions
pub trait Region {
  fn instructions(&self) -> &[u8];
}

/// A `Chunk` is a program image that our virtual machine may load into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
  instructions: Vec<u8>,
}

impl Chunk {
  /// Read and parse an LS-8 program file
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    fs::read_to_string(path)?.parse()
  }
}

impl From<Vec<u8>> for Chunk {
  fn from(instructions: Vec<u8>) -> Self {
    Self { instructions }
  }
}

impl Region for Chunk {
  fn instructions(&self) -> &[u8] {
    &self.instructions
  }
}

/// Parses the textual program format: one base-2 byte per line, anything
/// after a `#` is a comment, blank and comment-only lines are skipped.
///
/// ```text
/// 10000010 # LDI R0,8
/// 00000000
/// 00001000
/// ```
impl FromStr for Chunk {
  type Err = Error;

  fn from_str(source: &str) -> Result<Self> {
    let mut instructions = Vec::new();
    for (index, raw) in source.lines().enumerate() {
      let text = match raw.split_once('#') {
        Some((code, _comment)) => code,
        None => raw,
      }
      .trim();
      if text.is_empty() {
        continue;
      }
      let invalid = || Error::Parse {
        line: index + 1,
        text: text.to_owned(),
      };
      // from_str_radix alone would let a sign through
      if !text.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(invalid());
      }
      let byte = u8::from_str_radix(text, 2).map_err(|_| invalid())?;
      instructions.push(byte);
    }
    Ok(instructions.into())
  }
}
