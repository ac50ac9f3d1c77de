//! Matching Adapters

mod immediate_fill;

pub use immediate_fill::ImmediateFillMatcher;
