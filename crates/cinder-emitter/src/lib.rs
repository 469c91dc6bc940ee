//! JavaScript statement/expression renderer for the cinder compiler.
//!
//! This crate turns the typed method-body tree from `cinder-ast` into linear
//! JavaScript text. It covers the hardest parts of the back end:
//! - precedence-correct expression printing with minimal parentheses
//! - exact 32-bit arithmetic and emulated 64-bit arithmetic in a host with
//!   only doubles
//! - lowering of suspendable methods into a resumable dispatch-loop state
//!   machine
//! - flattening of nested exception-handler chains into one dispatch cascade
//! - delta-based tracking of (possibly inlined) source locations for debug
//!   maps
//!
//! The renderer consumes a finished, already-optimized tree plus a pair of
//! read-only services ([`NamingStrategy`], [`ClassSource`]); it performs no
//! optimization of its own beyond the local parenthesization and numeric
//! masking decisions.

pub mod context;
pub mod error;
pub mod injector;
pub mod naming;
pub mod precedence;
pub mod render_util;
pub mod renderer;
pub mod source_writer;

pub use context::{RenderOptions, RenderingContext};
pub use error::RenderError;
pub use injector::{Injector, InjectorContext};
pub use naming::{ClassSource, NamingStrategy};
pub use precedence::Precedence;
pub use renderer::StatementRenderer;
pub use source_writer::{LocationEvent, SourceWriter};
