//! Checkout domain core: pricing arithmetic, the cart, per-step form
//! validation and the step state machine. Pure data and functions; all I/O
//! lives in the service layer.

pub mod cart;
pub mod form;
pub mod pricing;
pub mod steps;
pub mod totals;
