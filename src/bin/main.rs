use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use ls8::region::{Chunk, Region};
use ls8::vm::Vm;

/// Run an LS-8 program
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Program file, one binary byte per line
  #[arg()]
  program: PathBuf,

  /// Print the machine state to stderr before every instruction
  #[arg(short, long)]
  trace: bool,
}

fn execute<R>(region: &R, trace: bool) -> ls8::Result<()>
where
  R: Region,
{
  let mut vm = Vm::new().with_trace(trace);
  vm.load(region)?;
  vm.run()
}

/// `0` once the program halts, `1` for anything that stopped it early
fn exit_code(result: ls8::Result<()>) -> u8 {
  match result {
    Ok(()) => 0,
    Err(err) => {
      eprintln!("{} {}", "error:".red().bold(), err);
      1
    }
  }
}

fn main() -> ExitCode {
  let args = Args::parse();
  let result = Chunk::from_file(&args.program).and_then(|chunk| execute(&chunk, args.trace));
  ExitCode::from(exit_code(result))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn status(program: &str) -> u8 {
    let result = program
      .parse::<Chunk>()
      .and_then(|chunk| execute(&chunk, false));
    exit_code(result)
  }

  #[test]
  fn halt_exits_zero() {
    assert_eq!(status("00000001 # HLT\n"), 0);
  }

  #[test]
  fn invalid_instruction_exits_nonzero() {
    assert_eq!(status("11111111\n"), 1);
  }

  #[test]
  fn invalid_instruction_after_halt_is_never_reached() {
    assert_eq!(status("00000001\n11111111\n"), 0);
  }

  #[test]
  fn unparseable_program_exits_nonzero() {
    assert_eq!(status("LDI R0,8\n"), 1);
  }

  #[test]
  fn missing_file_exits_nonzero() {
    let result = Chunk::from_file("/definitely/not/a/program.ls8");
    assert_eq!(exit_code(result.map(|_| ())), 1);
  }
}
