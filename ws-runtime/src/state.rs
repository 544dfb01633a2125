//! VM state

use crate::error::Fault;
use crate::heap::Heap;
use ws_spec::Word;

/// Engine status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    /// END reached
    Halted,
    /// Stopped permanently by a fault
    Faulted(Fault),
}

/// VM state
#[derive(Debug, Clone)]
pub struct VMState {
    /// Operand stack (top is the last element)
    pub stack: Vec<Word>,

    pub heap: Heap,

    /// Return indices pushed by CALL
    pub call_stack: Vec<usize>,

    /// Instruction pointer
    pub ip: usize,

    /// Instructions executed so far
    pub steps: u64,

    pub status: Status,
}

impl VMState {
    pub fn new() -> Self {
        VMState {
            stack: Vec::new(),
            heap: Heap::new(),
            call_stack: Vec::new(),
            ip: 0,
            steps: 0,
            status: Status::Running,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    /// Fail unless at least `needed` items are on the stack
    #[inline]
    pub fn require(&self, needed: usize) -> Result<(), Fault> {
        let available = self.stack.len();
        if available < needed {
            Err(Fault::StackUnderflow { needed, available })
        } else {
            Ok(())
        }
    }

    #[inline]
    pub fn push(&mut self, value: Word) {
        self.stack.push(value);
    }

    #[inline]
    pub fn pop(&mut self) -> Result<Word, Fault> {
        self.stack.pop().ok_or(Fault::StackUnderflow {
            needed: 1,
            available: 0,
        })
    }

    /// Item `depth` positions below the top (0 = top)
    #[inline]
    pub fn peek(&self, depth: usize) -> Result<Word, Fault> {
        self.require(depth + 1)?;
        Ok(self.stack[self.stack.len() - 1 - depth])
    }

    #[inline]
    pub fn advance(&mut self) {
        self.ip += 1;
    }

    /// Halt execution
    pub fn halt(&mut self) {
        self.status = Status::Halted;
    }

    pub fn fault(&mut self, fault: Fault) {
        self.status = Status::Faulted(fault);
    }
}

impl Default for VMState {
    fn default() -> Self {
        Self::new()
    }
}
