//! APEX General-Purpose Register File.
//!
//! A fixed-size array of signed 32-bit registers. Register indices are checked
//! against the file size when a program is accepted, so reads and writes here
//! index directly. There is no hardwired zero register.

use std::fmt::Write as _;

/// General-purpose register file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gpr {
    regs: Vec<i32>,
}

impl Gpr {
    /// Creates a register file of `count` registers, all zero.
    pub fn new(count: usize) -> Self {
        Self {
            regs: vec![0; count],
        }
    }

    /// Reads register `idx`.
    pub fn read(&self, idx: usize) -> i32 {
        self.regs[idx]
    }

    /// Writes `val` to register `idx`.
    pub fn write(&mut self, idx: usize, val: i32) {
        self.regs[idx] = val;
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Whether the register file is empty.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// All register values in index order.
    pub fn as_slice(&self) -> &[i32] {
        &self.regs
    }

    /// Formats the register file as two columns, low half on the left.
    ///
    /// ```
    /// use apex_core::core::arch::Gpr;
    ///
    /// let mut gpr = Gpr::new(4);
    /// gpr.write(3, -7);
    /// assert_eq!(gpr.render(), "R0   [0   ]  R2   [0   ]\nR1   [0   ]  R3   [-7  ]\n");
    /// ```
    pub fn render(&self) -> String {
        let half = self.regs.len().div_ceil(2);
        let mut out = String::new();
        for i in 0..half {
            let _ = write!(out, "R{:<4}[{:<4}]", i, self.regs[i]);
            if let Some(v) = self.regs.get(i + half) {
                let _ = write!(out, "  R{:<4}[{:<4}]", i + half, v);
            }
            out.push('\n');
        }
        out
    }
}
