//! Ports layer: the inbound API trait and the outbound store/prover traits.

pub mod inbound;
pub mod outbound;
