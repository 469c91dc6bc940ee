//! Value types and member references.

use std::fmt;

/// The eight primitive value kinds of the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Character,
    Integer,
    Long,
    Float,
    Double,
}

/// Static type of a value: primitive, class reference, or array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Primitive(PrimitiveKind),
    Object(String),
    Array(Box<ValueType>),
}

impl ValueType {
    pub fn object(class_name: impl Into<String>) -> Self {
        Self::Object(class_name.into())
    }

    pub fn array_of(item: ValueType) -> Self {
        Self::Array(Box::new(item))
    }

    /// Item type of an array type, `None` for non-arrays.
    pub fn item_type(&self) -> Option<&ValueType> {
        match self {
            Self::Array(item) => Some(item),
            _ => None,
        }
    }
}

/// Reference to a method of a named class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodReference {
    pub class_name: String,
    pub name: String,
}

impl MethodReference {
    pub fn new(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MethodReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.name)
    }
}

/// Reference to a field of a named class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldReference {
    pub class_name: String,
    pub name: String,
}

impl FieldReference {
    pub fn new(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.name)
    }
}
