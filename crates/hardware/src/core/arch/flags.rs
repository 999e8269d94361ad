//! Condition flags.
//!
//! Only arithmetic and compare instructions touch the flags, and every update
//! leaves exactly one of them set.

use serde::Serialize;

/// Zero, positive and negative condition flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Flags {
    /// Last result was zero, or the last compare was equal.
    pub zero: bool,
    /// Last result was positive, or the left compare operand was greater.
    pub positive: bool,
    /// Last result was negative, or the left compare operand was smaller.
    pub negative: bool,
}

impl Flags {
    /// Reset state: every register holds zero, so the zero flag starts set.
    pub const fn new() -> Self {
        Self {
            zero: true,
            positive: false,
            negative: false,
        }
    }

    /// Updates the flags from an arithmetic result.
    pub const fn set_from_result(&mut self, result: i32) {
        self.zero = result == 0;
        self.positive = result > 0;
        self.negative = result < 0;
    }

    /// Updates the flags from a three-way comparison of `left` with `right`.
    pub const fn set_from_compare(&mut self, left: i32, right: i32) {
        self.zero = left == right;
        self.positive = left > right;
        self.negative = left < right;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}
