//! Value objects returned by the gate services.

pub mod gate_decision;

pub use gate_decision::GateDecision;
