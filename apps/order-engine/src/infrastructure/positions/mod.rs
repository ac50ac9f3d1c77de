//! Position Adapters

mod no_op;

pub use no_op::NoOpPositionSink;
