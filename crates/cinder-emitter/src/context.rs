//! Render-wide configuration and services.

use cinder_ast::MethodReference;
use rustc_hash::FxHashMap;

use crate::injector::Injector;
use crate::naming::{ClassSource, NamingStrategy};

/// Mode flags the renderer reads but never mutates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Drop cosmetic whitespace.
    pub minifying: bool,
    /// Insert runtime cast guards for non-weak casts.
    pub strict: bool,
}

/// Everything a render call reads: naming and class-lookup services, mode
/// flags, the intrinsic injector registry, and the well-known names of the
/// suspension machinery. All of it is read-only during a render, so one
/// context may serve many renderer instances.
pub struct RenderingContext<'a> {
    naming: &'a dyn NamingStrategy,
    class_source: &'a dyn ClassSource,
    options: RenderOptions,
    injectors: FxHashMap<MethodReference, Box<dyn Injector>>,
}

impl<'a> RenderingContext<'a> {
    pub fn new(
        naming: &'a dyn NamingStrategy,
        class_source: &'a dyn ClassSource,
        options: RenderOptions,
    ) -> Self {
        Self {
            naming,
            class_source,
            options,
            injectors: FxHashMap::default(),
        }
    }

    /// Registers an emission override for calls to `method`. The override
    /// fully owns emission for matched calls.
    pub fn add_injector(&mut self, method: MethodReference, injector: Box<dyn Injector>) {
        self.injectors.insert(method, injector);
    }

    pub fn injector(&self, method: &MethodReference) -> Option<&dyn Injector> {
        self.injectors.get(method).map(Box::as_ref)
    }

    pub fn naming(&self) -> &dyn NamingStrategy {
        self.naming
    }

    pub fn class_source(&self) -> &dyn ClassSource {
        self.class_source
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn is_minifying(&self) -> bool {
        self.options.minifying
    }

    pub fn is_strict(&self) -> bool {
        self.options.strict
    }

    /// Temporary that holds an async right-hand side across a checkpoint.
    pub fn temp_var_name(&self) -> &'static str {
        "$tmp"
    }

    /// Resumption pointer variable of the outer dispatch loop.
    pub fn pointer_name(&self) -> &'static str {
        "$ptr"
    }

    /// Label of the outer dispatch loop of suspendable methods.
    pub fn main_loop_name(&self) -> &'static str {
        "$main"
    }
}
