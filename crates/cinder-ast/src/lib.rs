//! Typed method-body tree for the cinder compiler back end.
//!
//! This crate defines the structured statement/expression representation that
//! the front end produces and the renderers consume:
//! - Closed statement and expression sums (`Statement`, `Expr`)
//! - Value types and member references (`ValueType`, `MethodReference`)
//! - Source locations with inlined-call ancestry (`TextLocation`, `InliningInfo`)
//!
//! The tree arrives here fully optimized; renderers walk it exactly once and
//! never mutate it.

pub mod expr;
pub mod location;
pub mod stmt;
pub mod types;

pub use expr::{BinaryOperation, Constant, Expr, InvocationKind, OperationType, UnaryOperation};
pub use location::{InliningInfo, TextLocation};
pub use stmt::{Statement, SwitchClause};
pub use types::{FieldReference, MethodReference, PrimitiveKind, ValueType};
