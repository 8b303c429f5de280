use std::io::{self, Write};

use crate::alu;
use crate::error::{Error, Result};
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::region::Region;
use crate::registers::{Register, Registers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  /// Constructed, nothing executed yet
  Idle,
  Running,
  /// Stopped by `HLT`
  Halted,
  /// Stopped by an error
  Aborted,
}

/// A virtual machine for the LS-8.
///
/// Everything `PRN` prints goes to `output`, which is stdout unless the
/// machine was built with [`Vm::with_output`]. Trace lines go to `tracer`
/// when one is set.
#[derive(Debug)]
pub struct Vm<W = io::Stdout, T = io::Stderr> {
  // address of the next instruction byte
  pc: usize,
  memory: Memory,
  registers: Registers,
  // reserved for comparison instructions, nothing sets it yet
  flags: u8,
  state: State,
  output: W,
  tracer: Option<T>,
}

impl Vm {
  /// Create a new, empty virtual machine printing to stdout
  pub fn new() -> Self {
    Self::with_output(io::stdout())
  }
}

impl Default for Vm {
  fn default() -> Self {
    Self::new()
  }
}

impl<W> Vm<W>
where
  W: Write,
{
  /// Create a new, empty virtual machine printing to `output`
  pub fn with_output(output: W) -> Self {
    Self {
      pc: 0,
      memory: Memory::new(),
      registers: Registers::new(),
      flags: 0,
      state: State::Idle,
      output,
      tracer: None,
    }
  }

  /// Write a [`Vm::trace`] line to stderr before every instruction `run`
  /// executes
  pub fn with_trace(mut self, tracing: bool) -> Self {
    self.tracer = tracing.then(io::stderr);
    self
  }
}

impl<W, T> Vm<W, T>
where
  W: Write,
  T: Write,
{
  /// Like [`Vm::with_trace`], writing the trace lines to `tracer` instead
  pub fn with_tracer<U>(self, tracer: U) -> Vm<W, U>
  where
    U: Write,
  {
    Vm {
      pc: self.pc,
      memory: self.memory,
      registers: self.registers,
      flags: self.flags,
      state: self.state,
      output: self.output,
      tracer: Some(tracer),
    }
  }

  /// Place a program image in memory, starting at address `0`
  pub fn load<R>(&mut self, region: &R) -> Result<()>
  where
    R: Region,
  {
    self.memory.load(region.instructions())
  }

  /// Run until the program halts, or fails
  pub fn run(&mut self) -> Result<()> {
    self.start()?;
    while self.state == State::Running {
      if self.tracer.is_some() {
        let line = self.trace();
        if let Some(tracer) = self.tracer.as_mut() {
          writeln!(tracer, "{line}")?;
        }
      }
      self.step()?;
    }
    Ok(())
  }

  /// Execute a single instruction, starting the machine if it is idle
  pub fn step(&mut self) -> Result<()> {
    self.start()?;
    let result = self.execute();
    if result.is_err() {
      self.state = State::Aborted;
    }
    result
  }

  /// Render the program counter, the three bytes from it onwards and every
  /// register as two-digit hex
  pub fn trace(&self) -> String {
    let byte = |offset: usize| self.memory.read(self.pc + offset).unwrap_or_default();
    let mut line = format!(
      "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
      self.pc,
      byte(0),
      byte(1),
      byte(2)
    );
    for value in self.registers.as_slice() {
      line.push_str(&format!(" {value:02X}"));
    }
    line
  }

  pub fn pc(&self) -> usize {
    self.pc
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn flags(&self) -> u8 {
    self.flags
  }

  pub fn registers(&self) -> &Registers {
    &self.registers
  }

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn output(&self) -> &W {
    &self.output
  }

  pub fn into_output(self) -> W {
    self.output
  }

  pub fn tracer(&self) -> Option<&T> {
    self.tracer.as_ref()
  }

  fn start(&mut self) -> Result<()> {
    match self.state {
      State::Halted | State::Aborted => Err(Error::MachineHalted),
      State::Idle | State::Running => {
        self.state = State::Running;
        Ok(())
      }
    }
  }

  fn execute(&mut self) -> Result<()> {
    let pc = self.pc;
    let op = Opcode::try_from(self.memory.read(pc)?)?;
    match op {
      Opcode::Ldi => ldi(self)?,
      Opcode::Prn => prn(self)?,
      Opcode::Mul => arithmetic(self, op)?,
      Opcode::Hlt => hlt(self),
      Opcode::Push => push(self)?,
      Opcode::Pop => pop(self)?,
      Opcode::Call => call(self)?,
      Opcode::Ret => ret(self)?,
    }
    if !op.sets_pc() {
      self.pc = pc + 1 + op.operand_count();
    }
    Ok(())
  }

  /// The `n`th operand byte of the current instruction
  fn operand(&self, n: usize) -> Result<u8> {
    self.memory.read(self.pc + n)
  }

  // sp ← sp − 1; m[sp] ← value
  fn push_value(&mut self, value: Register) -> Result<()> {
    let sp = self
      .registers
      .stack_pointer()
      .checked_sub(1)
      .ok_or(Error::StackOverflow)?;
    self.memory.write(sp as usize, value)?;
    self.registers.set_stack_pointer(sp);
    Ok(())
  }

  // value ← m[sp]; sp ← sp + 1
  fn pop_value(&mut self) -> Result<Register> {
    let sp = self.registers.stack_pointer();
    let value = self.memory.read(sp as usize)?;
    let sp = sp.checked_add(1).ok_or(Error::StackUnderflow)?;
    self.registers.set_stack_pointer(sp);
    Ok(value)
  }
}

// r[a] ← b
fn ldi<W: Write, T: Write>(vm: &mut Vm<W, T>) -> Result<()> {
  let a = vm.operand(1)?;
  let b = vm.operand(2)?;
  vm.registers.set(a, b)
}

// out ← r[a]
fn prn<W: Write, T: Write>(vm: &mut Vm<W, T>) -> Result<()> {
  let a = vm.operand(1)?;
  let value = vm.registers.get(a)?;
  writeln!(vm.output, "{value}")?;
  Ok(())
}

// r[a] ← r[a] op r[b]
fn arithmetic<W: Write, T: Write>(vm: &mut Vm<W, T>, op: Opcode) -> Result<()> {
  let a = vm.operand(1)?;
  let b = vm.operand(2)?;
  let ra = vm.registers.get(a)?;
  let rb = vm.registers.get(b)?;
  let value = alu::apply(op, ra, rb)?;
  vm.registers.set(a, value)
}

// (stop execution)
fn hlt<W: Write, T: Write>(vm: &mut Vm<W, T>) {
  vm.state = State::Halted;
}

// sp ← sp − 1; m[sp] ← r[a]
fn push<W: Write, T: Write>(vm: &mut Vm<W, T>) -> Result<()> {
  let a = vm.operand(1)?;
  let value = vm.registers.get(a)?;
  vm.push_value(value)
}

// r[a] ← m[sp]; sp ← sp + 1
fn pop<W: Write, T: Write>(vm: &mut Vm<W, T>) -> Result<()> {
  let a = vm.operand(1)?;
  // check the destination before touching the stack
  vm.registers.get(a)?;
  let value = vm.pop_value()?;
  vm.registers.set(a, value)
}

// sp ← sp − 1; m[sp] ← pc + 2; pc ← r[a]
fn call<W: Write, T: Write>(vm: &mut Vm<W, T>) -> Result<()> {
  let a = vm.operand(1)?;
  let target = vm.registers.get(a)?;
  let next = vm.pc + 1 + Opcode::Call.operand_count();
  let next: u8 = next.try_into().map_err(|_| Error::MemoryOutOfBounds(next))?;
  vm.push_value(next)?;
  vm.pc = target as usize;
  Ok(())
}

// pc ← m[sp]; sp ← sp + 1
fn ret<W: Write, T: Write>(vm: &mut Vm<W, T>) -> Result<()> {
  vm.pc = vm.pop_value()? as usize;
  Ok(())
}
