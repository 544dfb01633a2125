//! Integration tests for the whitespace runtime
//!
//! Programs are written in S/T/L notation (space, tab, line feed); any other
//! character in the notation is ignored, so groups can be separated freely.

use proptest::prelude::*;
use ws_decoder::decode;
use ws_runtime::{ExecutionResult, Fault, RuntimeError, VMConfig, VM};
use ws_spec::{Instruction, Label, Program, Word};

fn ws(notation: &str) -> String {
    notation
        .chars()
        .filter_map(|c| match c {
            'S' => Some(' '),
            'T' => Some('\t'),
            'L' => Some('\n'),
            _ => None,
        })
        .collect()
}

fn load(notation: &str) -> VM {
    let program = decode(&ws(notation)).unwrap();
    VM::new(program, VMConfig::default()).unwrap()
}

fn exec(notation: &str, input: &[u8]) -> (VM, Result<ExecutionResult, RuntimeError>, Vec<u8>) {
    let mut vm = load(notation);
    let mut input = input;
    let mut output = Vec::new();
    let result = vm.run(&mut input, &mut output);
    (vm, result, output)
}

fn fault_of(notation: &str) -> Fault {
    let (_, result, _) = exec(notation, b"");
    result.unwrap_err().fault().cloned().unwrap()
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_add() {
    // push 5; push 3; add; end
    let (_, result, _) = exec("SS STSTL | SS STTL | TSSS | LLL", b"");
    assert_eq!(result.unwrap().stack, vec![8]);
}

#[test]
fn test_sub() {
    // push 5; push 3; sub; end
    let (_, result, _) = exec("SS STSTL | SS STTL | TSST | LLL", b"");
    assert_eq!(result.unwrap().stack, vec![2]);
}

#[test]
fn test_floored_division_and_modulo() {
    // -7 div 2, -7 mod 2, 7 div -2, 7 mod -2
    let cases = [
        ("SS TTTTL | SS STSL | TSTS", -4),
        ("SS TTTTL | SS STSL | TSTT", 1),
        ("SS STTTL | SS TTSL | TSTS", -4),
        ("SS STTTL | SS TTSL | TSTT", -1),
    ];
    for (body, expected) in cases {
        let (_, result, _) = exec(&format!("{} | LLL", body), b"");
        assert_eq!(result.unwrap().stack, vec![expected], "{}", body);
    }
}

#[test]
fn test_division_by_zero_pops_operands() {
    // push 5; push 0; div
    let (vm, result, _) = exec("SS STSTL | SS SL | TSTS | LLL", b"");
    assert_eq!(
        result,
        Err(RuntimeError::Fault {
            ip: 2,
            fault: Fault::DivisionByZero,
        })
    );
    assert!(vm.state().stack.is_empty());
}

#[test]
fn test_modulo_by_zero() {
    assert_eq!(fault_of("SS STSTL | SS SL | TSTT | LLL"), Fault::DivisionByZero);
}

// ============================================================================
// Stack
// ============================================================================

#[test]
fn test_copy() {
    // push 7; push 2; push 0; copy 1; end
    let (_, result, _) = exec("SS STTTL | SS STSL | SS SL | STS STL | LLL", b"");
    assert_eq!(result.unwrap().stack, vec![7, 2, 0, 2]);
}

#[test]
fn test_slide_and_swap() {
    // push 1; push 2; push 3; swap; slide 1; end
    let (_, result, _) = exec("SS STL | SS STSL | SS STTL | SLT | STL STL | LLL", b"");
    assert_eq!(result.unwrap().stack, vec![1, 2]);
}

#[test]
fn test_empty_stack_underflow() {
    let expected = Fault::StackUnderflow {
        needed: 1,
        available: 0,
    };
    // discard
    assert_eq!(fault_of("SLL | LLL"), expected);
    // dup
    assert_eq!(fault_of("SLS | LLL"), expected);
    // add
    assert_eq!(
        fault_of("TSSS | LLL"),
        Fault::StackUnderflow {
            needed: 2,
            available: 0
        }
    );
}

#[test]
fn test_copy_past_bottom_leaves_stack() {
    // push 1; copy 1
    let (vm, result, _) = exec("SS STL | STS STL | LLL", b"");
    assert_eq!(
        result.unwrap_err().fault(),
        Some(&Fault::StackUnderflow {
            needed: 2,
            available: 1
        })
    );
    assert_eq!(vm.state().stack, vec![1]);
}

#[test]
fn test_swap_single_item_leaves_stack() {
    // push 1; swap
    let (vm, result, _) = exec("SS STL | SLT | LLL", b"");
    assert_eq!(
        result,
        Err(RuntimeError::Fault {
            ip: 1,
            fault: Fault::StackUnderflow {
                needed: 2,
                available: 1
            },
        })
    );
    assert_eq!(vm.state().stack, vec![1]);
}

#[test]
fn test_copy_negative_index() {
    // push 1; copy -1
    assert_eq!(
        fault_of("SS STL | STS TTL | LLL"),
        Fault::InvalidStackIndex { index: -1 }
    );
}

// ============================================================================
// Heap
// ============================================================================

#[test]
fn test_store_retrieve() {
    // push 4; push 99; store; push 4; retrieve; end
    let (vm, result, _) = exec("SS STSSL | SS STTSSSTTL | TTS | SS STSSL | TTT | LLL", b"");
    assert_eq!(result.unwrap().stack, vec![99]);
    assert_eq!(vm.state().heap.cells(), vec![(4, 99)]);
}

#[test]
fn test_retrieve_unwritten_is_zero() {
    // push 1000; retrieve; end
    let (_, result, _) = exec("SS STTTTTSTSSSL | TTT | LLL", b"");
    assert_eq!(result.unwrap().stack, vec![0]);
}

#[test]
fn test_negative_heap_address() {
    // push -1; push 5; store
    assert_eq!(
        fault_of("SS TTL | SS STSTL | TTS | LLL"),
        Fault::InvalidHeapAddress { address: -1 }
    );
}

// ============================================================================
// Flow control
// ============================================================================

#[test]
fn test_undefined_label() {
    // jump L1
    assert_eq!(
        fault_of("LSL TL | LLL"),
        Fault::UndefinedLabel {
            label: Label::from_bits("1").unwrap()
        }
    );
}

#[test]
fn test_duplicate_label_before_execution() {
    // mark L1; push 1; printi; mark L1; end
    let program = decode(&ws("LSS TL | SS STL | TLST | LSS TL | LLL")).unwrap();
    let err = VM::new(program, VMConfig::default()).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::DuplicateLabel {
            label: Label::from_bits("1").unwrap(),
            first: 0,
            second: 3,
        }
    );
}

#[test]
fn test_call_and_return() {
    // call L0; push 2; printi; end; mark L0; push 1; printi; ret
    let (vm, result, output) = exec(
        "LST SL | SS STSL | TLST | LLL | LSS SL | SS STL | TLST | LTL",
        b"",
    );
    assert!(result.is_ok());
    assert_eq!(output, b"12");
    assert!(vm.state().call_stack.is_empty());
}

#[test]
fn test_return_without_call() {
    assert_eq!(fault_of("LTL"), Fault::CallStackUnderflow);
}

#[test]
fn test_jump_if_negative() {
    // push -1; jn L1; push 7; printi; mark L1; push 8; printi; end
    let (_, result, output) = exec(
        "SS TTL | LTT TL | SS STTTL | TLST | LSS TL | SS STSSSL | TLST | LLL",
        b"",
    );
    assert!(result.is_ok());
    assert_eq!(output, b"8");
}

#[test]
fn test_countdown_loop() {
    // push 3; mark L1; dup; jz L0; dup; printi; push 1; sub; jump L1;
    // mark L0; discard; end
    let (_, result, output) = exec(
        "SS STTL | LSS TL | SLS | LTS SL | SLS | TLST | SS STL | TSST | LSL TL \
         | LSS SL | SLL | LLL",
        b"",
    );
    let result = result.unwrap();
    assert!(result.stack.is_empty());
    assert_eq!(output, b"321");
}

#[test]
fn test_running_off_the_end() {
    // push 1
    assert_eq!(
        fault_of("SS STL"),
        Fault::InstructionPointerOutOfRange { ip: 1 }
    );
}

#[test]
fn test_step_limit() {
    // mark L; jump L
    let program = decode(&ws("LSS L | LSL L")).unwrap();
    let config = VMConfig {
        max_steps: Some(1_000),
        ..VMConfig::default()
    };
    let mut vm = VM::new(program, config).unwrap();
    let mut input: &[u8] = b"";
    let mut output = Vec::new();
    let err = vm.run(&mut input, &mut output).unwrap_err();
    assert_eq!(err, RuntimeError::StepLimitExceeded { limit: 1_000 });
    assert!(err.fault().is_none());
}

// ============================================================================
// I/O
// ============================================================================

#[test]
fn test_print_chars() {
    // push 72; printc; push 105; printc; end
    let (_, result, output) = exec("SS STSSTSSSL | TLSS | SS STTSTSSTL | TLSS | LLL", b"");
    assert!(result.is_ok());
    assert_eq!(output, b"Hi");
}

#[test]
fn test_read_int_and_add() {
    // push 0; readi; push 0; retrieve; push 1; add; printi; end
    let (_, result, output) = exec(
        "SS SL | TLTT | SS SL | TTT | SS STL | TSSS | TLST | LLL",
        b"  -15\n",
    );
    assert!(result.is_ok());
    assert_eq!(output, b"-14");
}

#[test]
fn test_read_char_sequence() {
    // push 0; readc; push 1; readc; push 1; retrieve; printc; push 0; retrieve; printc; end
    let (_, result, output) = exec(
        "SS SL | TLTS | SS STL | TLTS | SS STL | TTT | TLSS | SS SL | TTT | TLSS | LLL",
        b"ab",
    );
    assert!(result.is_ok());
    assert_eq!(output, b"ba");
}

#[test]
fn test_read_past_end_of_input() {
    // push 0; readc; end
    let (_, result, _) = exec("SS SL | TLTS | LLL", b"");
    assert_eq!(
        result.unwrap_err().fault(),
        Some(&Fault::UnexpectedEndOfInput)
    );
}

#[test]
fn test_read_int_not_a_number() {
    // push 0; readi; end
    let (_, result, _) = exec("SS SL | TLTT | LLL", b"twelve\n");
    assert_eq!(
        result.unwrap_err().fault(),
        Some(&Fault::InvalidNumberInput {
            text: "twelve".to_string()
        })
    );
}

#[test]
fn test_print_invalid_character() {
    // push -1; printc
    assert_eq!(
        fault_of("SS TTL | TLSS | LLL"),
        Fault::InvalidCharacter { value: -1 }
    );
}

#[test]
fn test_output_before_fault_is_kept() {
    // push 1; printi; discard
    let (_, result, output) = exec("SS STL | TLST | SLL", b"");
    assert!(result.is_err());
    assert_eq!(output, b"1");
}

// ============================================================================
// Properties
// ============================================================================

fn arith(a: Word, b: Word, op: Instruction) -> Result<Vec<Word>, RuntimeError> {
    let program = Program::new(vec![Instruction::Push(a), Instruction::Push(b), op, Instruction::End]);
    let mut vm = VM::new(program, VMConfig::default())?;
    let mut input: &[u8] = b"";
    let mut output = Vec::new();
    Ok(vm.run(&mut input, &mut output)?.stack)
}

proptest! {
    #[test]
    fn prop_div_mod_identity(a in -10_000i64..10_000, b in -100i64..100) {
        prop_assume!(b != 0);
        let q = arith(a, b, Instruction::Div).unwrap()[0];
        let r = arith(a, b, Instruction::Mod).unwrap()[0];
        prop_assert_eq!(q * b + r, a);
        // remainder takes the divisor's sign
        prop_assert!(r == 0 || (r < 0) == (b < 0));
        prop_assert!(r.abs() < b.abs());
    }

    #[test]
    fn prop_add_matches_checked(a in any::<i64>(), b in any::<i64>()) {
        match a.checked_add(b) {
            Some(sum) => {
                prop_assert_eq!(arith(a, b, Instruction::Add).unwrap(), vec![sum]);
            }
            None => {
                let err = arith(a, b, Instruction::Add).unwrap_err();
                prop_assert_eq!(err.fault(), Some(&Fault::ArithmeticOverflow));
            }
        }
    }
}
