//! Virtual machine driving the fetch/execute loop

use std::io::Write;
use tracing::{debug, trace};
use ws_spec::{Program, Word};
use crate::error::{Fault, Result, RuntimeError};
use crate::execute::execute;
use crate::io::InputPort;
use crate::labels::LabelTable;
use crate::state::{Status, VMState};

/// VM configuration
#[derive(Debug, Clone, Default)]
pub struct VMConfig {
    /// Stop with `StepLimitExceeded` after this many instructions
    pub max_steps: Option<u64>,

    /// Emit a trace event for every executed instruction
    pub trace: bool,
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of instructions executed
    pub steps: u64,

    /// Operand stack at halt (top is the last element)
    pub stack: Vec<Word>,
}

/// Whitespace virtual machine
#[derive(Debug)]
pub struct VM {
    program: Program,
    labels: LabelTable,
    state: VMState,
    config: VMConfig,
}

impl VM {
    /// Create a VM for `program`, resolving every label up front.
    ///
    /// Fails with `DuplicateLabel` if two marks share a key.
    pub fn new(program: Program, config: VMConfig) -> Result<Self> {
        let labels = LabelTable::build(&program)?;
        Ok(Self {
            program,
            labels,
            state: VMState::new(),
            config,
        })
    }

    /// Execute one instruction.
    ///
    /// A halted VM stays halted; a faulted VM keeps reporting its fault.
    pub fn step(&mut self, input: &mut dyn InputPort, output: &mut dyn Write) -> Result<()> {
        match &self.state.status {
            Status::Running => {}
            Status::Halted => return Ok(()),
            Status::Faulted(fault) => {
                return Err(RuntimeError::Fault {
                    ip: self.state.ip,
                    fault: fault.clone(),
                })
            }
        }

        let ip = self.state.ip;
        let outcome = match self.program.get(ip) {
            Some(instr) => {
                if self.config.trace {
                    trace!(step = self.state.steps, ip, %instr, depth = self.state.stack.len());
                }
                execute(instr, &mut self.state, &self.labels, input, output)
            }
            None => Err(Fault::InstructionPointerOutOfRange { ip }),
        };

        match outcome {
            Ok(()) => {
                self.state.steps += 1;
                if self.state.is_halted() {
                    debug!(steps = self.state.steps, "halted");
                }
                Ok(())
            }
            Err(fault) => {
                debug!(ip, %fault, "faulted");
                self.state.fault(fault.clone());
                // Best effort: the fault is what gets reported
                let _ = output.flush();
                Err(RuntimeError::Fault { ip, fault })
            }
        }
    }

    /// Run until the program halts, faults, or exhausts the step budget
    pub fn run(
        &mut self,
        input: &mut dyn InputPort,
        output: &mut dyn Write,
    ) -> Result<ExecutionResult> {
        debug!(
            instructions = self.program.len(),
            labels = self.labels.len(),
            max_steps = ?self.config.max_steps,
            "starting execution"
        );

        while !self.state.is_halted() {
            if let Some(limit) = self.config.max_steps {
                if self.state.steps >= limit && self.state.is_running() {
                    let _ = output.flush();
                    return Err(RuntimeError::StepLimitExceeded { limit });
                }
            }
            self.step(input, output)?;
        }

        output.flush().map_err(|err| RuntimeError::Fault {
            ip: self.state.ip,
            fault: err.into(),
        })?;

        Ok(ExecutionResult {
            steps: self.state.steps,
            stack: self.state.stack.clone(),
        })
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }
}
