mod support;

use cinder_ast::{
    BinaryOperation, Expr, InvocationKind, MethodReference, OperationType, Statement, SwitchClause,
};
use cinder_emitter::RenderOptions;

use support::{render_statement, render_with};

fn call(name: &str) -> Expr {
    Expr::invoke(
        InvocationKind::Static,
        MethodReference::new("com.example.Widget", name),
        vec![],
    )
}

fn condition() -> Expr {
    Expr::binary(
        BinaryOperation::Less,
        Some(OperationType::Int),
        Expr::var(0),
        Expr::int(10),
    )
}

#[test]
fn assignment() {
    let statement = Statement::assign(Expr::var(0), Expr::int(1));
    assert_eq!(render_statement(&statement), "a = 1;\n");
}

#[test]
fn expression_statement() {
    let statement = Statement::eval(call("tick"));
    assert_eq!(render_statement(&statement), "Widget_tick();\n");
}

#[test]
fn sequential_preserves_order() {
    let statement = Statement::Sequential {
        sequence: vec![
            Statement::assign(Expr::var(0), Expr::int(1)),
            Statement::assign(Expr::var(1), Expr::int(2)),
        ],
    };
    assert_eq!(render_statement(&statement), "a = 1;\nb = 2;\n");
}

#[test]
fn single_statement_branch_omits_braces() {
    let statement = Statement::if_then(
        Expr::var(0),
        vec![Statement::assign(Expr::var(1), Expr::int(1))],
    );
    assert_eq!(render_statement(&statement), "if (a)\n    b = 1;\n");
}

#[test]
fn multi_statement_branch_keeps_braces() {
    let statement = Statement::if_then(
        Expr::var(0),
        vec![
            Statement::assign(Expr::var(1), Expr::int(1)),
            Statement::assign(Expr::var(2), Expr::int(2)),
        ],
    );
    assert_eq!(
        render_statement(&statement),
        "if (a) {\n    b = 1;\n    c = 2;\n}\n"
    );
}

#[test]
fn if_else() {
    let statement = Statement::if_then_else(
        Expr::var(0),
        vec![Statement::assign(Expr::var(1), Expr::int(1))],
        vec![Statement::assign(Expr::var(1), Expr::int(2))],
    );
    assert_eq!(
        render_statement(&statement),
        "if (a)\n    b = 1;\nelse\n    b = 2;\n"
    );
}

#[test]
fn else_if_chain_stays_flat() {
    let statement = Statement::if_then_else(
        Expr::var(0),
        vec![Statement::assign(Expr::var(1), Expr::int(1))],
        vec![Statement::if_then_else(
            Expr::var(2),
            vec![Statement::assign(Expr::var(1), Expr::int(2))],
            vec![Statement::assign(Expr::var(1), Expr::int(3))],
        )],
    );
    assert_eq!(
        render_statement(&statement),
        "if (a)\n    b = 1;\nelse if (c)\n    b = 2;\nelse\n    b = 3;\n"
    );
}

#[test]
fn lone_nested_conditional_keeps_braces() {
    let statement = Statement::if_then(
        Expr::var(0),
        vec![Statement::if_then(
            Expr::var(1),
            vec![Statement::assign(Expr::var(2), Expr::int(1))],
        )],
    );
    assert_eq!(
        render_statement(&statement),
        "if (a) {\n    if (b)\n        c = 1;\n}\n"
    );
}

#[test]
fn switch_with_cases_and_default() {
    let statement = Statement::Switch {
        value: Expr::var(0),
        clauses: vec![SwitchClause {
            conditions: vec![0, 1],
            body: vec![
                Statement::assign(Expr::var(1), Expr::int(1)),
                Statement::Break {
                    target: None,
                    location: None,
                },
            ],
        }],
        default_clause: vec![Statement::assign(Expr::var(1), Expr::int(2))],
        id: None,
    };
    assert_eq!(
        render_statement(&statement),
        "switch (a) {\n    case 0:\n    case 1:\n        b = 1;\n        break;\n    default:\n        b = 2;\n}\n"
    );
}

#[test]
fn labeled_switch() {
    let statement = Statement::Switch {
        value: Expr::var(0),
        clauses: vec![],
        default_clause: vec![],
        id: Some("s0".to_owned()),
    };
    assert_eq!(render_statement(&statement), "a: switch (a) {\n}\n");
}

#[test]
fn while_loop() {
    let statement = Statement::while_loop(Some(condition()), vec![Statement::eval(call("tick"))]);
    assert_eq!(
        render_statement(&statement),
        "while (a < 10) {\n    Widget_tick();\n}\n"
    );
}

#[test]
fn condition_free_loop_renders_true() {
    let statement = Statement::while_loop(None, vec![Statement::eval(call("tick"))]);
    assert_eq!(
        render_statement(&statement),
        "while (true) {\n    Widget_tick();\n}\n"
    );
}

#[test]
fn labeled_block_and_break() {
    let statement = Statement::block(
        "b0",
        vec![Statement::Break {
            target: Some("b0".to_owned()),
            location: None,
        }],
    );
    assert_eq!(render_statement(&statement), "a: {\n    break a;\n}\n");
}

#[test]
fn distinct_blocks_get_distinct_labels() {
    let statement = Statement::Sequential {
        sequence: vec![
            Statement::block(
                "b0",
                vec![Statement::Break {
                    target: Some("b0".to_owned()),
                    location: None,
                }],
            ),
            Statement::block(
                "b1",
                vec![Statement::Continue {
                    target: Some("b1".to_owned()),
                    location: None,
                }],
            ),
        ],
    };
    assert_eq!(
        render_statement(&statement),
        "a: {\n    break a;\n}\nb: {\n    continue b;\n}\n"
    );
}

#[test]
fn return_statement() {
    assert_eq!(render_statement(&Statement::ret(None)), "return;\n");
    assert_eq!(
        render_statement(&Statement::ret(Some(Expr::var(0)))),
        "return a;\n"
    );
}

#[test]
fn throw_statement() {
    let statement = Statement::Throw {
        exception: Expr::var(0),
        location: None,
    };
    assert_eq!(render_statement(&statement), "$rt_throw(a);\n");
}

#[test]
fn class_initialization() {
    let statement = Statement::InitClass {
        class_name: "com.example.Config".to_owned(),
        is_async: false,
        location: None,
    };
    assert_eq!(render_statement(&statement), "$clinit_Config();\n");
}

#[test]
fn initialization_of_class_without_initializer_is_elided() {
    let statement = Statement::InitClass {
        class_name: "com.example.Widget".to_owned(),
        is_async: false,
        location: None,
    };
    assert_eq!(render_statement(&statement), "");
}

#[test]
fn monitor_operations_in_sync_method() {
    let enter = Statement::MonitorEnter {
        object_ref: Expr::var(0),
        location: None,
    };
    assert_eq!(render_statement(&enter), "Thread_monitorEnterSync(a);\n");

    let exit = Statement::MonitorExit {
        object_ref: Expr::var(0),
        location: None,
    };
    assert_eq!(render_statement(&exit), "Thread_monitorExitSync(a);\n");
}

#[test]
fn try_catch_with_typed_handler() {
    let statement = Statement::TryCatch {
        protected_body: vec![Statement::assign(Expr::var(1), Expr::int(1))],
        exception_type: Some("java.lang.RuntimeException".to_owned()),
        exception_variable: Some(2),
        handler: vec![Statement::assign(Expr::var(1), Expr::int(2))],
    };
    assert_eq!(
        render_statement(&statement),
        "try {\n    b = 1;\n} catch ($$e) {\n    $$je = $rt_wrapException($$e);\n    if ($$je instanceof RuntimeException) {\n        c = $$je;\n        b = 2;\n    } else {\n        throw $$e;\n    }\n}\n"
    );
}

#[test]
fn nested_try_catch_flattens_to_cascade() {
    let inner = Statement::TryCatch {
        protected_body: vec![Statement::assign(Expr::var(1), Expr::int(1))],
        exception_type: Some("java.lang.IllegalStateException".to_owned()),
        exception_variable: None,
        handler: vec![Statement::assign(Expr::var(1), Expr::int(2))],
    };
    let statement = Statement::TryCatch {
        protected_body: vec![inner],
        exception_type: Some("java.lang.RuntimeException".to_owned()),
        exception_variable: None,
        handler: vec![Statement::assign(Expr::var(1), Expr::int(3))],
    };
    let output = render_statement(&statement);
    // A single try with the innermost handler tested first.
    assert_eq!(output.matches("try").count(), 1);
    let inner_check = output
        .find("instanceof IllegalStateException")
        .unwrap();
    let outer_check = output.find("instanceof RuntimeException").unwrap();
    assert!(inner_check < outer_check);
    assert!(output.contains("} else if ($$je instanceof RuntimeException) {"));
    assert!(output.contains("} else {\n        throw $$e;\n    }"));
}

#[test]
fn default_handler_ends_cascade() {
    let inner = Statement::TryCatch {
        protected_body: vec![Statement::assign(Expr::var(1), Expr::int(1))],
        exception_type: Some("java.lang.RuntimeException".to_owned()),
        exception_variable: Some(2),
        handler: vec![Statement::assign(Expr::var(1), Expr::int(2))],
    };
    let statement = Statement::TryCatch {
        protected_body: vec![inner],
        exception_type: None,
        exception_variable: Some(3),
        handler: vec![Statement::assign(Expr::var(1), Expr::int(3))],
    };
    let output = render_statement(&statement);
    assert!(output.contains("} else {\n        d = $$je;\n        b = 3;\n    }"));
    assert!(!output.contains("throw $$e;"));
}

#[test]
fn handlers_after_default_are_dropped() {
    // The default handler is outermost in the chain, so the cascade stops
    // right after emitting it.
    let inner = Statement::TryCatch {
        protected_body: vec![Statement::assign(Expr::var(1), Expr::int(1))],
        exception_type: None,
        exception_variable: None,
        handler: vec![Statement::assign(Expr::var(1), Expr::int(2))],
    };
    let statement = Statement::TryCatch {
        protected_body: vec![inner],
        exception_type: Some("java.lang.RuntimeException".to_owned()),
        exception_variable: None,
        handler: vec![Statement::assign(Expr::var(1), Expr::int(3))],
    };
    let output = render_statement(&statement);
    assert!(!output.contains("instanceof RuntimeException"));
    assert!(output.contains("b = 2;"));
    assert!(!output.contains("b = 3;"));
}

#[test]
fn minified_statement_output() {
    let options = RenderOptions {
        minifying: true,
        ..RenderOptions::default()
    };
    let statement = Statement::if_then_else(
        Expr::var(0),
        vec![Statement::assign(Expr::var(1), Expr::int(1))],
        vec![Statement::assign(Expr::var(1), Expr::int(2))],
    );
    let output = render_with(options, |renderer| renderer.render_statement(&statement));
    assert_eq!(output, "if(a)b=1;else b=2;");
}
