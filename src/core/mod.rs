//! Core data types for OptiPrice
//!
//! Defines fundamental types:
//! - OptionContract: validated pricing inputs and call/put side
//! - GreeksResult: price and sensitivities from one evaluation
//! - OptiError: crate error type

pub mod option;
pub mod greeks;
pub mod error;

pub use option::*;
pub use greeks::*;
pub use error::*;
