//! Development Infrastructure
//!
//! Supporting components shared by the structures and the benchmark harness:
//! - Named factory registry for creating structures by selector
//! - Per-thread operation counters and timing
//! - Wall-clock timer behind the tracker

pub mod debug;
pub mod factory;
pub mod perf;

pub use debug::OperationTimer;
pub use factory::{Creator, FactoryRegistry};
pub use perf::{Counter, OperationStats};
