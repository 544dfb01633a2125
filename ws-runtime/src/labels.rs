//! Label table built by the start-up pre-pass

use std::collections::HashMap;
use crate::error::{Fault, Result, RuntimeError};
use ws_spec::{Instruction, Label, Program};

/// Label key -> index of the MARK instruction
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    targets: HashMap<Label, usize>,
}

impl LabelTable {
    /// Record every MARK in `program`; a repeated key is rejected
    pub fn build(program: &Program) -> Result<Self> {
        let mut targets = HashMap::new();
        for (index, instr) in program.iter().enumerate() {
            let Instruction::Mark(label) = instr else {
                continue;
            };
            if let Some(&first) = targets.get(label) {
                return Err(RuntimeError::DuplicateLabel {
                    label: label.clone(),
                    first,
                    second: index,
                });
            }
            targets.insert(label.clone(), index);
        }
        Ok(Self { targets })
    }

    pub fn resolve(&self, label: &Label) -> std::result::Result<usize, Fault> {
        self.targets
            .get(label)
            .copied()
            .ok_or_else(|| Fault::UndefinedLabel {
                label: label.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
