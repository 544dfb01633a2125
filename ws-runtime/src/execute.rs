//! Instruction execution

use std::io::Write;
use ws_spec::{Instruction, Word};
use crate::error::Fault;
use crate::heap::Heap;
use crate::io::{write_char, write_int, InputPort};
use crate::labels::LabelTable;
use crate::state::VMState;

/// Convert a COPY/SLIDE argument to a stack depth
#[inline]
fn stack_index(n: Word) -> Result<usize, Fault> {
    usize::try_from(n).map_err(|_| Fault::InvalidStackIndex { index: n })
}

/// Floored division: rounds toward negative infinity
pub fn floor_div(a: Word, b: Word) -> Result<Word, Fault> {
    if b == 0 {
        return Err(Fault::DivisionByZero);
    }
    let q = a.checked_div(b).ok_or(Fault::ArithmeticOverflow)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Floored modulo: result has the sign of the divisor
pub fn floor_mod(a: Word, b: Word) -> Result<Word, Fault> {
    if b == 0 {
        return Err(Fault::DivisionByZero);
    }
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

/// Pop b, pop a, push `op(a, b)`
fn binary(
    state: &mut VMState,
    op: impl FnOnce(Word, Word) -> Result<Word, Fault>,
) -> Result<(), Fault> {
    state.require(2)?;
    let b = state.pop()?;
    let a = state.pop()?;
    let result = op(a, b)?;
    state.push(result);
    state.advance();
    Ok(())
}

/// Execute single instruction
pub fn execute(
    instr: &Instruction,
    state: &mut VMState,
    labels: &LabelTable,
    input: &mut dyn InputPort,
    output: &mut dyn Write,
) -> Result<(), Fault> {
    match instr {
        // ========== Stack ==========
        Instruction::Push(n) => {
            state.push(*n);
            state.advance();
        }

        Instruction::Dup => {
            let top = state.peek(0)?;
            state.push(top);
            state.advance();
        }

        Instruction::Copy(n) => {
            let depth = stack_index(*n)?;
            let value = state.peek(depth)?;
            state.push(value);
            state.advance();
        }

        Instruction::Swap => {
            state.require(2)?;
            let len = state.stack.len();
            state.stack.swap(len - 1, len - 2);
            state.advance();
        }

        Instruction::Discard => {
            state.pop()?;
            state.advance();
        }

        Instruction::Slide(n) => {
            let count = stack_index(*n)?;
            state.require(count.saturating_add(1))?;
            let top = state.pop()?;
            let len = state.stack.len();
            state.stack.truncate(len - count);
            state.push(top);
            state.advance();
        }

        // ========== Arithmetic ==========
        Instruction::Add => {
            binary(state, |a, b| a.checked_add(b).ok_or(Fault::ArithmeticOverflow))?;
        }

        Instruction::Sub => {
            binary(state, |a, b| a.checked_sub(b).ok_or(Fault::ArithmeticOverflow))?;
        }

        Instruction::Mul => {
            binary(state, |a, b| a.checked_mul(b).ok_or(Fault::ArithmeticOverflow))?;
        }

        Instruction::Div => binary(state, floor_div)?,

        Instruction::Mod => binary(state, floor_mod)?,

        // ========== Heap ==========
        Instruction::Store => {
            state.require(2)?;
            let value = state.pop()?;
            let address = state.pop()?;
            state.heap.store(address, value)?;
            state.advance();
        }

        Instruction::Retrieve => {
            let address = state.pop()?;
            let value = state.heap.load(address)?;
            state.push(value);
            state.advance();
        }

        // ========== Flow ==========
        Instruction::Mark(_) => {
            // Resolved by the pre-pass
            state.advance();
        }

        Instruction::Call(label) => {
            let target = labels.resolve(label)?;
            state.call_stack.push(state.ip + 1);
            state.ip = target;
        }

        Instruction::Jump(label) => {
            state.ip = labels.resolve(label)?;
        }

        Instruction::JumpIfZero(label) => {
            let value = state.pop()?;
            if value == 0 {
                state.ip = labels.resolve(label)?;
            } else {
                state.advance();
            }
        }

        Instruction::JumpIfNegative(label) => {
            let value = state.pop()?;
            if value < 0 {
                state.ip = labels.resolve(label)?;
            } else {
                state.advance();
            }
        }

        Instruction::Return => {
            state.ip = state.call_stack.pop().ok_or(Fault::CallStackUnderflow)?;
        }

        Instruction::End => {
            state.halt();
        }

        // ========== I/O ==========
        Instruction::PrintChar => {
            let value = state.pop()?;
            write_char(output, value)?;
            state.advance();
        }

        Instruction::PrintInt => {
            let value = state.pop()?;
            write_int(output, value)?;
            state.advance();
        }

        Instruction::ReadChar => {
            let address = state.pop()?;
            Heap::check_address(address)?;
            // Pending output (a prompt) must be visible before input blocks
            output.flush()?;
            let c = input.next_char()?.ok_or(Fault::UnexpectedEndOfInput)?;
            state.heap.store(address, Word::from(u32::from(c)))?;
            state.advance();
        }

        Instruction::ReadInt => {
            let address = state.pop()?;
            Heap::check_address(address)?;
            output.flush()?;
            let line = input.next_line()?.ok_or(Fault::UnexpectedEndOfInput)?;
            let text = line.trim();
            let value = text.parse::<Word>().map_err(|_| Fault::InvalidNumberInput {
                text: text.to_string(),
            })?;
            state.heap.store(address, value)?;
            state.advance();
        }
    }

    Ok(())
}
