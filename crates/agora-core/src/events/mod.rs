//! Domain events

mod dual_write;

pub use dual_write::{DualWriteGap, DualWriteOperation};
