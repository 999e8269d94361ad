//! Simulation front door and program loading.
//!
//! Provides the program loader and the [`Simulator`](simulator::Simulator)
//! wrapper that owns the CPU and exposes the driving and inspection API.

/// Program listing loader.
pub mod loader;
/// Top-level simulator.
pub mod simulator;
