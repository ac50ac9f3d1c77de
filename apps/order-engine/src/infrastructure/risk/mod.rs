//! Risk Check Adapters

mod leverage_cap;

pub use leverage_cap::LeverageCapRiskCheck;
