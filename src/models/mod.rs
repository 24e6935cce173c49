//! Pricing Models
//!
//! Implements:
//! - Black-Scholes-Merton (closed-form price and Greeks)

pub mod black_scholes;

pub use black_scholes::{d1_d2, evaluate, norm_cdf, norm_pdf};
