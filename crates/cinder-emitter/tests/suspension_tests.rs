mod support;

use cinder_ast::{Expr, InvocationKind, MethodReference, Statement};
use cinder_emitter::RenderOptions;

use support::{render_statement_async, render_with};

fn call(name: &str) -> Expr {
    Expr::invoke(
        InvocationKind::Static,
        MethodReference::new("com.example.Widget", name),
        vec![],
    )
}

#[test]
fn async_assignment_commits_after_checkpoint() {
    let statement = Statement::assign_async(Expr::var(0), call("fetch"));
    assert_eq!(
        render_statement_async(&statement),
        "$tmp = Widget_fetch();\nif ($rt_suspending()) {\n    break $main;\n}\na = $tmp;\n"
    );
}

#[test]
fn async_expression_statement_has_no_commit() {
    let statement = Statement::Assignment {
        left: None,
        right: call("fetch"),
        is_async: true,
        location: None,
    };
    assert_eq!(
        render_statement_async(&statement),
        "Widget_fetch();\nif ($rt_suspending()) {\n    break $main;\n}\n"
    );
}

#[test]
fn async_class_initialization_checkpoints() {
    let statement = Statement::InitClass {
        class_name: "com.example.Config".to_owned(),
        is_async: true,
        location: None,
    };
    assert_eq!(
        render_statement_async(&statement),
        "$clinit_Config();\nif ($rt_suspending()) {\n    break $main;\n}\n"
    );
}

#[test]
fn monitor_enter_in_async_method_checkpoints() {
    let statement = Statement::MonitorEnter {
        object_ref: Expr::var(0),
        location: None,
    };
    assert_eq!(
        render_statement_async(&statement),
        "Thread_monitorEnter(a);\nif ($rt_suspending()) {\n    break $main;\n}\n"
    );
}

#[test]
fn monitor_exit_in_async_method_does_not_checkpoint() {
    let statement = Statement::MonitorExit {
        object_ref: Expr::var(0),
        location: None,
    };
    assert_eq!(render_statement_async(&statement), "Thread_monitorExit(a);\n");
}

#[test]
fn goto_another_part_sets_pointer_and_continues() {
    let statement = Statement::GotoPart { part: 2 };
    let output = render_with(RenderOptions::default(), |renderer| {
        renderer.set_current_part(0);
        renderer.render_statement(&statement)
    });
    assert_eq!(output, "$ptr = 2;\ncontinue $main;\n");
}

#[test]
fn goto_next_part_at_end_falls_through() {
    let statement = Statement::GotoPart { part: 1 };
    let output = render_with(RenderOptions::default(), |renderer| {
        renderer.set_current_part(0);
        renderer.set_end(true);
        renderer.render_statement(&statement)
    });
    assert_eq!(output, "$ptr = 1;\n");
}

#[test]
fn goto_current_part_restarts_loop() {
    let statement = Statement::GotoPart { part: 3 };
    let output = render_with(RenderOptions::default(), |renderer| {
        renderer.set_current_part(3);
        renderer.set_end(true);
        renderer.render_statement(&statement)
    });
    assert_eq!(output, "continue $main;\n");
}

#[test]
fn goto_before_sequence_end_cannot_fall_through() {
    let sequence = Statement::Sequential {
        sequence: vec![
            Statement::GotoPart { part: 1 },
            Statement::assign(Expr::var(0), Expr::int(1)),
        ],
    };
    let output = render_with(RenderOptions::default(), |renderer| {
        renderer.set_current_part(0);
        renderer.set_end(true);
        renderer.render_statement(&sequence)
    });
    assert_eq!(output, "$ptr = 1;\ncontinue $main;\na = 1;\n");
}

#[test]
fn trailing_goto_in_sequence_keeps_end_flag() {
    let sequence = Statement::Sequential {
        sequence: vec![
            Statement::assign(Expr::var(0), Expr::int(1)),
            Statement::GotoPart { part: 1 },
        ],
    };
    let output = render_with(RenderOptions::default(), |renderer| {
        renderer.set_current_part(0);
        renderer.set_end(true);
        renderer.render_statement(&sequence)
    });
    assert_eq!(output, "a = 1;\n$ptr = 1;\n");
}

#[test]
fn switch_bodies_clear_the_end_flag() {
    let statement = Statement::Switch {
        value: Expr::var(0),
        clauses: vec![cinder_ast::SwitchClause {
            conditions: vec![0],
            body: vec![Statement::GotoPart { part: 1 }],
        }],
        default_clause: vec![],
        id: None,
    };
    let output = render_with(RenderOptions::default(), |renderer| {
        renderer.set_current_part(0);
        renderer.set_end(true);
        renderer.render_statement(&statement)
    });
    assert!(output.contains("$ptr = 1;"));
    assert!(output.contains("continue $main;"));
}

#[test]
fn clear_resets_session_state() {
    let statement = Statement::GotoPart { part: 3 };
    let output = render_with(RenderOptions::default(), |renderer| {
        renderer.set_current_part(3);
        renderer.set_async(true);
        renderer.set_end(true);
        renderer.clear();
        // After clear the renderer is back at part 0, sync, not at an end.
        assert!(!renderer.is_async());
        renderer.render_statement(&statement)
    });
    assert_eq!(output, "$ptr = 3;\ncontinue $main;\n");
}
