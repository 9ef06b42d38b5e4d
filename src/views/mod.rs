//! # Layout containers
//!
//! [`Stack`] lines its children up along one axis; [`Grid`] arranges them in
//! rows and columns. [`space`] is an empty control for padding either one.
//!

mod stack;
pub use stack::*;

mod grid;
pub use grid::*;
