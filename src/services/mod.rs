pub mod pruner;
pub mod verifier;
