//! Data memory.
//!
//! A flat array of signed 32-bit words. Addresses computed by loads and stores
//! index words directly; anything outside the array is a fatal
//! [`SimError::MemoryOutOfRange`].

use std::fmt::Write as _;

use crate::common::error::{Result, SimError};

/// Flat word-addressed data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates `size` zeroed words.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
        }
    }

    fn index(&self, address: i32) -> Result<usize> {
        usize::try_from(address)
            .ok()
            .filter(|&idx| idx < self.words.len())
            .ok_or(SimError::MemoryOutOfRange {
                address,
                size: self.words.len(),
            })
    }

    /// Reads the word at `address`.
    ///
    /// # Errors
    ///
    /// [`SimError::MemoryOutOfRange`] if `address` is negative or past the end.
    pub fn read(&self, address: i32) -> Result<i32> {
        Ok(self.words[self.index(address)?])
    }

    /// Writes `value` at `address`.
    ///
    /// # Errors
    ///
    /// [`SimError::MemoryOutOfRange`] if `address` is negative or past the end.
    pub fn write(&mut self, address: i32, value: i32) -> Result<()> {
        let idx = self.index(address)?;
        self.words[idx] = value;
        Ok(())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether memory has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in address order.
    pub fn as_slice(&self) -> &[i32] {
        &self.words
    }

    /// `(address, value)` for every non-zero word.
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.words
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, v)| v != 0)
    }

    /// Formats one line per word: the non-zero ones, or the first `limit` words.
    pub fn render(&self, limit: Option<usize>) -> String {
        let mut out = String::new();
        let mut line = |addr: usize, value: i32| {
            let _ = writeln!(out, "|   MEM[{addr}]\t|\tData Value = {value}    |");
        };
        match limit {
            Some(n) => self
                .words
                .iter()
                .take(n)
                .enumerate()
                .for_each(|(a, &v)| line(a, v)),
            None => self.non_zero().for_each(|(a, v)| line(a, v)),
        }
        out
    }
}
