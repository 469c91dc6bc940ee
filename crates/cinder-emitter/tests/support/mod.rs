//! Shared fixtures for renderer integration tests.

#![allow(dead_code)]

use cinder_ast::{Expr, FieldReference, MethodReference, Statement};
use cinder_emitter::{
    ClassSource, NamingStrategy, Precedence, RenderError, RenderOptions, RenderingContext,
    SourceWriter, StatementRenderer,
};
use rustc_hash::FxHashSet;

fn short_name(class_name: &str) -> &str {
    class_name.rsplit('.').next().unwrap_or(class_name)
}

/// Deterministic naming: single letters for variables, `Class_member` for
/// everything qualified.
pub struct TestNaming;

impl NamingStrategy for TestNaming {
    fn variable_name(&self, index: usize) -> String {
        let letter = b'a' + (index % 26) as u8;
        (letter as char).to_string()
    }

    fn full_method_name(&self, method: &MethodReference) -> String {
        format!("{}_{}", short_name(&method.class_name), method.name)
    }

    fn instance_method_name(&self, method: &MethodReference) -> String {
        method.name.clone()
    }

    fn initializer_name(&self, method: &MethodReference) -> String {
        format!("{}_init", short_name(&method.class_name))
    }

    fn class_name(&self, class_name: &str) -> String {
        short_name(class_name).to_owned()
    }

    fn class_init_name(&self, class_name: &str) -> String {
        format!("$clinit_{}", short_name(class_name))
    }

    fn field_name(&self, field: &FieldReference) -> String {
        field.name.clone()
    }

    fn static_field_name(&self, field: &FieldReference) -> String {
        format!("{}_{}", short_name(&field.class_name), field.name)
    }
}

/// Fixed class universe: a handful of concrete classes, one class with a
/// static initializer, everything else treated as an interface.
pub struct TestClasses {
    concrete: FxHashSet<&'static str>,
    with_initializer: FxHashSet<&'static str>,
}

impl TestClasses {
    pub fn new() -> Self {
        let concrete = [
            "java.lang.Object",
            "java.lang.String",
            "java.lang.RuntimeException",
            "java.lang.IllegalStateException",
            "java.lang.Thread",
            "com.example.Widget",
            "com.example.Config",
        ]
        .into_iter()
        .collect();
        let with_initializer = ["com.example.Config"].into_iter().collect();
        Self {
            concrete,
            with_initializer,
        }
    }
}

impl ClassSource for TestClasses {
    fn is_concrete_class(&self, class_name: &str) -> bool {
        self.concrete.contains(class_name)
    }

    fn has_static_initializer(&self, class_name: &str) -> bool {
        self.with_initializer.contains(class_name)
    }
}

pub fn render_expr(expr: &Expr) -> String {
    render_expr_with(expr, RenderOptions::default())
}

pub fn render_expr_with(expr: &Expr, options: RenderOptions) -> String {
    try_render_expr_with(expr, options).unwrap()
}

pub fn try_render_expr(expr: &Expr) -> Result<String, RenderError> {
    try_render_expr_with(expr, RenderOptions::default())
}

pub fn try_render_expr_with(expr: &Expr, options: RenderOptions) -> Result<String, RenderError> {
    let naming = TestNaming;
    let classes = TestClasses::new();
    let context = RenderingContext::new(&naming, &classes, options);
    let mut writer = SourceWriter::new(options.minifying);
    let mut renderer = StatementRenderer::new(&context, &mut writer);
    renderer.render_expr(expr, Precedence::min())?;
    Ok(writer.into_output())
}

pub fn render_statement(statement: &Statement) -> String {
    render_with(RenderOptions::default(), |renderer| {
        renderer.render_statement(statement)
    })
}

pub fn render_statement_async(statement: &Statement) -> String {
    render_with(RenderOptions::default(), |renderer| {
        renderer.set_async(true);
        renderer.render_statement(statement)
    })
}

/// Runs `body` against a fresh renderer over the default naming and class
/// fixtures, returning the produced text.
pub fn render_with(
    options: RenderOptions,
    body: impl FnOnce(&mut StatementRenderer) -> Result<(), RenderError>,
) -> String {
    let naming = TestNaming;
    let classes = TestClasses::new();
    let context = RenderingContext::new(&naming, &classes, options);
    let mut writer = SourceWriter::new(options.minifying);
    let mut renderer = StatementRenderer::new(&context, &mut writer);
    body(&mut renderer).unwrap();
    writer.into_output()
}
