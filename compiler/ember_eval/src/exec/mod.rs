//! Statement-level execution support.

pub mod control;
