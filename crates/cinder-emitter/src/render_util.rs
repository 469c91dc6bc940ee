//! Shared rendering utilities: the reserved-word table, compact identifier
//! minting, string escaping, and the small-constant test for the int-multiply
//! lowering decision.

use std::fmt::Write as _;

use cinder_ast::{Constant, Expr};
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// JavaScript reserved words that must never be used as emitted labels or
/// identifiers.
pub static KEYWORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "await",
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "implements",
        "import",
        "in",
        "instanceof",
        "interface",
        "let",
        "new",
        "null",
        "package",
        "private",
        "protected",
        "public",
        "return",
        "static",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
    ]
    .into_iter()
    .collect()
});

const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Maps a dense index to a compact alphabetic identifier (`a`, `b`, ...,
/// `Z`, `ab`, ...). Distinct indices always map to distinct identifiers.
pub fn index_to_id(mut index: usize) -> String {
    let mut id = String::new();
    loop {
        id.push(ID_CHARS[index % ID_CHARS.len()] as char);
        index /= ID_CHARS.len();
        if index == 0 {
            break;
        }
    }
    id
}

/// Escapes a string into a quoted JavaScript literal. The source language's
/// strings are UTF-16; anything outside printable ASCII is emitted as
/// `\uXXXX` units (surrogate pairs for non-BMP characters).
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for unit in value.encode_utf16() {
        match unit {
            0x22 => escaped.push_str("\\\""),
            0x5C => escaped.push_str("\\\\"),
            0x0A => escaped.push_str("\\n"),
            0x0D => escaped.push_str("\\r"),
            0x09 => escaped.push_str("\\t"),
            0x20..=0x7E => escaped.push(unit as u8 as char),
            _ => {
                let _ = write!(escaped, "\\u{unit:04X}");
            }
        }
    }
    escaped.push('"');
    escaped
}

/// True for integer constants small enough that a native multiply by any
/// 32-bit value stays within the exact-integer range of a double.
pub fn is_small_integer(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Constant {
            value: Constant::Int(value),
            ..
        } if value.unsigned_abs() < (1 << 15)
    )
}
