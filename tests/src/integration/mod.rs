//! Cross-crate integration flows.

mod chain_verification;
mod channels;
mod registration;
