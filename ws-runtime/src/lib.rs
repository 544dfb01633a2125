//! # Whitespace Runtime
//!
//! Execute decoded whitespace programs on a stack-and-heap virtual machine.
//!
//! ## Features
//!
//! - **Operand stack** of signed 64-bit words
//! - **Sparse heap**: every non-negative address reads as 0 until written
//! - **Labels** resolved once, before the first instruction runs
//! - **Pluggable I/O**: any `BufRead` as input, any `Write` as output
//! - **Step budget** for bounded execution
//!
//! ## Example
//!
//! ```rust
//! use ws_runtime::{VM, VMConfig};
//! use ws_spec::{Instruction, Program};
//!
//! let program = Program::new(vec![
//!     Instruction::Push(6),
//!     Instruction::Push(7),
//!     Instruction::Mul,
//!     Instruction::PrintInt,
//!     Instruction::End,
//! ]);
//! let mut vm = VM::new(program, VMConfig::default()).unwrap();
//! let mut input: &[u8] = b"";
//! let mut output = Vec::new();
//! let result = vm.run(&mut input, &mut output).unwrap();
//! assert_eq!(output, b"42");
//! println!("Steps: {}", result.steps);
//! ```

pub mod error;
pub mod state;
pub mod heap;
pub mod labels;
pub mod io;
pub mod execute;
pub mod vm;

pub use error::{Fault, RuntimeError, Result};
pub use state::{VMState, Status};
pub use heap::Heap;
pub use labels::LabelTable;
pub use io::InputPort;
pub use vm::{VM, VMConfig, ExecutionResult};

/// Simple execution helper
///
/// Runs a program against `input` and returns everything it printed.
pub fn run(program: ws_spec::Program, input: &[u8]) -> Result<Vec<u8>> {
    let mut vm = VM::new(program, VMConfig::default())?;
    let mut input = input;
    let mut output = Vec::new();
    vm.run(&mut input, &mut output)?;
    Ok(output)
}
