//! Intrinsic injection hook: external collaborators can take over emission
//! for specific called operations (a native sort, say) without this crate
//! knowing about them.

use cinder_ast::{Expr, MethodReference, ValueType};

use crate::error::RenderError;
use crate::precedence::Precedence;

/// Emission override for one registered method. Consulted only for
/// invocation expressions; absence of an injector is the common case and
/// falls through to default call rendering.
pub trait Injector {
    fn generate(
        &self,
        context: &mut dyn InjectorContext,
        method: &MethodReference,
    ) -> Result<(), RenderError>;
}

/// What an injector sees while it owns emission: the argument expressions,
/// the ambient precedence at the call site, and recursive access back into
/// the renderer.
pub trait InjectorContext {
    fn argument_count(&self) -> usize;

    fn argument(&self, index: usize) -> &Expr;

    /// Precedence the surrounding context demands of the whole call.
    fn precedence(&self) -> Precedence;

    fn is_minifying(&self) -> bool;

    /// Raw text, written as-is.
    fn write(&mut self, text: &str);

    /// A quoted, escaped JavaScript string literal.
    fn write_escaped(&mut self, value: &str);

    /// A runtime type descriptor.
    fn write_type(&mut self, ty: &ValueType);

    /// Renders an argument (or any expression) at the chosen precedence.
    fn write_expr(&mut self, expr: &Expr, precedence: Precedence) -> Result<(), RenderError>;
}
