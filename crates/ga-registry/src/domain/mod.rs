//! Domain layer: entities, state transitions and errors. Pure logic, no I/O.

pub mod entities;
pub mod errors;
