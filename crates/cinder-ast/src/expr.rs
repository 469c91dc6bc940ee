//! Expression variants of the method-body tree.

use crate::location::TextLocation;
use crate::types::{FieldReference, MethodReference, ValueType};

/// Static operation type of a typed expression. `None` on the expression side
/// means a reference (or boolean) value with no numeric semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Int,
    Long,
    Float,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
    Compare,
    And,
    Or,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperation {
    Not,
    Negate,
    Length,
    IntToByte,
    IntToShort,
    IntToChar,
    NullCheck,
}

/// The four call shapes of the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    /// Plain static call.
    Static,
    /// Non-virtual call with an explicit receiver as the first argument.
    Special,
    /// Virtual dispatch through the first argument.
    Dynamic,
    /// Constructor invocation.
    Constructor,
}

/// Compile-time constant embedded in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Null,
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Type(ValueType),
}

/// Closed expression sum. Every variant carries an optional source location;
/// numeric variants carry their static operation type.
#[derive(Debug, Clone)]
pub enum Expr {
    Binary {
        operation: BinaryOperation,
        ty: Option<OperationType>,
        first: Box<Expr>,
        second: Box<Expr>,
        location: Option<TextLocation>,
    },
    Unary {
        operation: UnaryOperation,
        ty: Option<OperationType>,
        operand: Box<Expr>,
        location: Option<TextLocation>,
    },
    Cast {
        value: Box<Expr>,
        target: ValueType,
        weak: bool,
        location: Option<TextLocation>,
    },
    PrimitiveCast {
        value: Box<Expr>,
        source: OperationType,
        target: OperationType,
        location: Option<TextLocation>,
    },
    Conditional {
        condition: Box<Expr>,
        consequent: Box<Expr>,
        alternative: Box<Expr>,
        location: Option<TextLocation>,
    },
    Constant {
        value: Constant,
        location: Option<TextLocation>,
    },
    Variable {
        index: usize,
        location: Option<TextLocation>,
    },
    Subscript {
        array: Box<Expr>,
        index: Box<Expr>,
        location: Option<TextLocation>,
    },
    UnwrapArray {
        array: Box<Expr>,
        location: Option<TextLocation>,
    },
    Invocation {
        kind: InvocationKind,
        method: MethodReference,
        arguments: Vec<Expr>,
        location: Option<TextLocation>,
    },
    Qualification {
        qualified: Option<Box<Expr>>,
        field: FieldReference,
        location: Option<TextLocation>,
    },
    New {
        constructed_class: String,
        location: Option<TextLocation>,
    },
    NewArray {
        item_type: ValueType,
        length: Box<Expr>,
        location: Option<TextLocation>,
    },
    ArrayFromData {
        item_type: ValueType,
        data: Vec<Expr>,
        location: Option<TextLocation>,
    },
    NewMultiArray {
        ty: ValueType,
        dimensions: Vec<Expr>,
        location: Option<TextLocation>,
    },
    InstanceOf {
        expr: Box<Expr>,
        ty: ValueType,
        location: Option<TextLocation>,
    },
    BoundCheck {
        index: Box<Expr>,
        array: Option<Box<Expr>>,
        lower: bool,
        location: Option<TextLocation>,
    },
}

impl Expr {
    /// Source location of this node, if any.
    pub fn location(&self) -> Option<&TextLocation> {
        match self {
            Self::Binary { location, .. }
            | Self::Unary { location, .. }
            | Self::Cast { location, .. }
            | Self::PrimitiveCast { location, .. }
            | Self::Conditional { location, .. }
            | Self::Constant { location, .. }
            | Self::Variable { location, .. }
            | Self::Subscript { location, .. }
            | Self::UnwrapArray { location, .. }
            | Self::Invocation { location, .. }
            | Self::Qualification { location, .. }
            | Self::New { location, .. }
            | Self::NewArray { location, .. }
            | Self::ArrayFromData { location, .. }
            | Self::NewMultiArray { location, .. }
            | Self::InstanceOf { location, .. }
            | Self::BoundCheck { location, .. } => location.as_ref(),
        }
    }

    // =========================================================================
    // Builder helpers for upstream producers and tests
    // =========================================================================

    pub fn var(index: usize) -> Self {
        Self::Variable {
            index,
            location: None,
        }
    }

    pub fn constant(value: Constant) -> Self {
        Self::Constant {
            value,
            location: None,
        }
    }

    pub fn int(value: i32) -> Self {
        Self::constant(Constant::Int(value))
    }

    pub fn long(value: i64) -> Self {
        Self::constant(Constant::Long(value))
    }

    pub fn double(value: f64) -> Self {
        Self::constant(Constant::Double(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::constant(Constant::Str(value.into()))
    }

    pub fn null() -> Self {
        Self::constant(Constant::Null)
    }

    pub fn binary(
        operation: BinaryOperation,
        ty: Option<OperationType>,
        first: Expr,
        second: Expr,
    ) -> Self {
        Self::Binary {
            operation,
            ty,
            first: Box::new(first),
            second: Box::new(second),
            location: None,
        }
    }

    pub fn unary(operation: UnaryOperation, ty: Option<OperationType>, operand: Expr) -> Self {
        Self::Unary {
            operation,
            ty,
            operand: Box::new(operand),
            location: None,
        }
    }

    pub fn conditional(condition: Expr, consequent: Expr, alternative: Expr) -> Self {
        Self::Conditional {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternative: Box::new(alternative),
            location: None,
        }
    }

    pub fn invoke(kind: InvocationKind, method: MethodReference, arguments: Vec<Expr>) -> Self {
        Self::Invocation {
            kind,
            method,
            arguments,
            location: None,
        }
    }

    pub fn subscript(array: Expr, index: Expr) -> Self {
        Self::Subscript {
            array: Box::new(array),
            index: Box::new(index),
            location: None,
        }
    }

    pub fn unwrap_array(array: Expr) -> Self {
        Self::UnwrapArray {
            array: Box::new(array),
            location: None,
        }
    }

    pub fn field(qualified: Option<Expr>, field: FieldReference) -> Self {
        Self::Qualification {
            qualified: qualified.map(Box::new),
            field,
            location: None,
        }
    }

    /// Attach a source location, replacing any present one.
    pub fn at(mut self, new_location: TextLocation) -> Self {
        match &mut self {
            Self::Binary { location, .. }
            | Self::Unary { location, .. }
            | Self::Cast { location, .. }
            | Self::PrimitiveCast { location, .. }
            | Self::Conditional { location, .. }
            | Self::Constant { location, .. }
            | Self::Variable { location, .. }
            | Self::Subscript { location, .. }
            | Self::UnwrapArray { location, .. }
            | Self::Invocation { location, .. }
            | Self::Qualification { location, .. }
            | Self::New { location, .. }
            | Self::NewArray { location, .. }
            | Self::ArrayFromData { location, .. }
            | Self::NewMultiArray { location, .. }
            | Self::InstanceOf { location, .. }
            | Self::BoundCheck { location, .. } => *location = Some(new_location),
        }
        self
    }
}
