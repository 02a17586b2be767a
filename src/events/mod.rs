//! Event shapes and their routing identity.
//!
//! Any `Send + Sync + 'static` type is an [`Event`]. The bus never looks inside
//! a payload: routing is decided by the payload's static type alone, captured
//! as a [`ShapeKey`].
//!
//! ## Rules
//! - **Exact type match**: `struct A(u32)` and `struct B(u32)` are different shapes.
//! - **No polymorphism**: publishing `A` never reaches subscribers of a trait or
//!   wrapper type that `A` happens to implement or convert into.

mod event;
mod shape;

pub use event::Event;
pub use shape::ShapeKey;
