//! Heap subsystem
//!
//! Sparse map from non-negative address to value. Every address reads as 0
//! until written, so zero-valued cells are not stored.

use std::collections::HashMap;
use crate::error::Fault;
use ws_spec::{Address, Word};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heap {
    cells: HashMap<Address, Word>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject negative addresses
    #[inline]
    pub fn check_address(address: Address) -> Result<(), Fault> {
        if address < 0 {
            Err(Fault::InvalidHeapAddress { address })
        } else {
            Ok(())
        }
    }

    pub fn store(&mut self, address: Address, value: Word) -> Result<(), Fault> {
        Self::check_address(address)?;
        if value == 0 {
            self.cells.remove(&address);
        } else {
            self.cells.insert(address, value);
        }
        Ok(())
    }

    pub fn load(&self, address: Address) -> Result<Word, Fault> {
        Self::check_address(address)?;
        Ok(self.cells.get(&address).copied().unwrap_or(0))
    }

    /// Number of non-zero cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-zero cells in address order
    pub fn cells(&self) -> Vec<(Address, Word)> {
        let mut cells: Vec<_> = self.cells.iter().map(|(&a, &v)| (a, v)).collect();
        cells.sort_unstable();
        cells
    }
}
