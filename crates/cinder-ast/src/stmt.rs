//! Statement variants of the method-body tree.

use crate::expr::Expr;
use crate::location::TextLocation;

/// One `case` group of a switch: the matched constants and the shared body.
#[derive(Debug, Clone)]
pub struct SwitchClause {
    pub conditions: Vec<i32>,
    pub body: Vec<Statement>,
}

/// Closed statement sum. Block ids are abstract labels assigned upstream;
/// break/continue reference them by id. The `is_async` flags mark positions
/// where a suspension checkpoint must follow.
#[derive(Debug, Clone)]
pub enum Statement {
    Assignment {
        left: Option<Expr>,
        right: Expr,
        is_async: bool,
        location: Option<TextLocation>,
    },
    Sequential {
        sequence: Vec<Statement>,
    },
    Conditional {
        condition: Expr,
        consequent: Vec<Statement>,
        alternative: Vec<Statement>,
    },
    Switch {
        value: Expr,
        clauses: Vec<SwitchClause>,
        default_clause: Vec<Statement>,
        id: Option<String>,
    },
    While {
        condition: Option<Expr>,
        body: Vec<Statement>,
        id: Option<String>,
    },
    Block {
        body: Vec<Statement>,
        id: String,
    },
    Break {
        target: Option<String>,
        location: Option<TextLocation>,
    },
    Continue {
        target: Option<String>,
        location: Option<TextLocation>,
    },
    Return {
        result: Option<Expr>,
        location: Option<TextLocation>,
    },
    Throw {
        exception: Expr,
        location: Option<TextLocation>,
    },
    InitClass {
        class_name: String,
        is_async: bool,
        location: Option<TextLocation>,
    },
    GotoPart {
        part: u32,
    },
    MonitorEnter {
        object_ref: Expr,
        location: Option<TextLocation>,
    },
    MonitorExit {
        object_ref: Expr,
        location: Option<TextLocation>,
    },
    TryCatch {
        protected_body: Vec<Statement>,
        exception_type: Option<String>,
        exception_variable: Option<usize>,
        handler: Vec<Statement>,
    },
}

impl Statement {
    pub fn assign(left: Expr, right: Expr) -> Self {
        Self::Assignment {
            left: Some(left),
            right,
            is_async: false,
            location: None,
        }
    }

    /// Expression evaluated for effect only.
    pub fn eval(right: Expr) -> Self {
        Self::Assignment {
            left: None,
            right,
            is_async: false,
            location: None,
        }
    }

    pub fn assign_async(left: Expr, right: Expr) -> Self {
        Self::Assignment {
            left: Some(left),
            right,
            is_async: true,
            location: None,
        }
    }

    pub fn ret(result: Option<Expr>) -> Self {
        Self::Return {
            result,
            location: None,
        }
    }

    pub fn block(id: impl Into<String>, body: Vec<Statement>) -> Self {
        Self::Block {
            body,
            id: id.into(),
        }
    }

    pub fn while_loop(condition: Option<Expr>, body: Vec<Statement>) -> Self {
        Self::While {
            condition,
            body,
            id: None,
        }
    }

    pub fn if_then(condition: Expr, consequent: Vec<Statement>) -> Self {
        Self::Conditional {
            condition,
            consequent,
            alternative: Vec::new(),
        }
    }

    pub fn if_then_else(
        condition: Expr,
        consequent: Vec<Statement>,
        alternative: Vec<Statement>,
    ) -> Self {
        Self::Conditional {
            condition,
            consequent,
            alternative,
        }
    }
}
