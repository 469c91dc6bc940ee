//! Statement rendering: one syntactically terminated JavaScript statement per
//! tree element, preserving execution order and all control transfers.

use cinder_ast::{Expr, MethodReference, Statement, SwitchClause, TextLocation};

use super::StatementRenderer;
use crate::error::RenderError;
use crate::precedence::Precedence;

impl StatementRenderer<'_> {
    /// Renders an ordered statement sequence. The physical-end flag is
    /// cleared for every element but the last, so only a trailing goto can
    /// fall through to the next part.
    pub fn render_statements(&mut self, statements: &[Statement]) -> Result<(), RenderError> {
        let Some((last, rest)) = statements.split_last() else {
            return Ok(());
        };
        let old_end = self.end;
        for statement in rest {
            self.end = false;
            self.render_statement(statement)?;
        }
        self.end = old_end;
        self.render_statement(last)?;
        self.end = old_end;
        Ok(())
    }

    pub fn render_statement(&mut self, statement: &Statement) -> Result<(), RenderError> {
        match statement {
            Statement::Assignment {
                left,
                right,
                is_async,
                location,
            } => self.render_assignment(left.as_ref(), right, *is_async, location.as_ref()),
            Statement::Sequential { sequence } => self.render_statements(sequence),
            Statement::Conditional {
                condition,
                consequent,
                alternative,
            } => self.render_conditional(condition, consequent, alternative),
            Statement::Switch {
                value,
                clauses,
                default_clause,
                id,
            } => self.render_switch(value, clauses, default_clause, id.as_deref()),
            Statement::While {
                condition,
                body,
                id,
            } => self.render_while(condition.as_ref(), body, id.as_deref()),
            Statement::Block { body, id } => self.render_block(body, id),
            Statement::Break { target, location } => {
                self.render_jump("break", target.as_deref(), location.as_ref())
            }
            Statement::Continue { target, location } => {
                self.render_jump("continue", target.as_deref(), location.as_ref())
            }
            Statement::Return { result, location } => {
                self.render_return(result.as_ref(), location.as_ref())
            }
            Statement::Throw {
                exception,
                location,
            } => self.render_throw(exception, location.as_ref()),
            Statement::InitClass {
                class_name,
                is_async,
                location,
            } => self.render_init_class(class_name, *is_async, location.as_ref()),
            Statement::GotoPart { part } => {
                self.render_goto_part(*part);
                Ok(())
            }
            Statement::MonitorEnter { object_ref, .. } => self.render_monitor_enter(object_ref),
            Statement::MonitorExit { object_ref, .. } => self.render_monitor_exit(object_ref),
            Statement::TryCatch {
                protected_body,
                exception_type,
                exception_variable,
                handler,
            } => self.render_try_catch(
                protected_body,
                exception_type.as_deref(),
                *exception_variable,
                handler,
            ),
        }
    }

    /// Async assignments evaluate the right-hand side into the temp variable,
    /// emit the suspend checkpoint, and only then commit to the left value.
    /// On resumption the right-hand side is therefore never re-evaluated.
    fn render_assignment(
        &mut self,
        left: Option<&Expr>,
        right: &Expr,
        is_async: bool,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        if let Some(left) = left {
            if is_async {
                self.writer.write(self.context.temp_var_name());
            } else {
                self.render_expr(left, Precedence::min())?;
            }
            self.writer.write_space();
            self.writer.write_char('=');
            self.writer.write_space();
        }
        self.render_expr(right, Precedence::min())?;
        self.writer.write_char(';');
        self.writer.write_line();
        if is_async {
            self.emit_suspend_checker();
            if let Some(left) = left {
                self.render_expr(left, Precedence::min())?;
                self.writer.write_space();
                self.writer.write_char('=');
                self.writer.write_space();
                self.writer.write(self.context.temp_var_name());
                self.writer.write_char(';');
                self.writer.write_line();
            }
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_conditional(
        &mut self,
        condition: &Expr,
        consequent: &[Statement],
        alternative: &[Statement],
    ) -> Result<(), RenderError> {
        let mut condition = condition;
        let mut consequent = consequent;
        let mut alternative = alternative;
        let mut need_closing_brace;
        loop {
            let condition_location = condition.location();
            if condition_location.is_some() {
                self.push_location(condition_location);
            }
            self.writer.write("if");
            self.writer.write_space();
            self.writer.write_char('(');
            self.render_expr(condition, Precedence::min())?;
            if condition_location.is_some() {
                self.pop_location();
            }
            self.writer.write_char(')');
            if is_simple_if_content(consequent) {
                need_closing_brace = false;
            } else {
                self.writer.write_space();
                self.writer.write_char('{');
                need_closing_brace = true;
            }
            self.writer.write_line();
            self.writer.increase_indent();
            self.render_statements(consequent)?;

            if !alternative.is_empty() {
                self.writer.decrease_indent();
                if need_closing_brace {
                    self.writer.write_char('}');
                    self.writer.write_space();
                }
                // A lone conditional alternative continues the `else if`
                // chain instead of nesting.
                if alternative.len() == 1
                    && let Statement::Conditional {
                        condition: chained_condition,
                        consequent: chained_consequent,
                        alternative: chained_alternative,
                    } = &alternative[0]
                {
                    condition = chained_condition;
                    consequent = chained_consequent;
                    alternative = chained_alternative;
                    self.writer.write("else ");
                    continue;
                }
                self.writer.write("else");
                if is_simple_if_content(alternative) {
                    if self.context.is_minifying() {
                        self.writer.write(" ");
                    }
                    need_closing_brace = false;
                } else {
                    self.writer.write_space();
                    self.writer.write_char('{');
                    need_closing_brace = true;
                }
                self.writer.increase_indent();
                self.writer.write_line();
                self.render_statements(alternative)?;
            }
            break;
        }
        self.writer.decrease_indent();
        if need_closing_brace {
            self.writer.write_char('}');
            self.writer.write_line();
        }
        Ok(())
    }

    fn render_switch(
        &mut self,
        value: &Expr,
        clauses: &[SwitchClause],
        default_clause: &[Statement],
        id: Option<&str>,
    ) -> Result<(), RenderError> {
        let value_location = value.location();
        if value_location.is_some() {
            self.push_location(value_location);
        }
        if let Some(id) = id {
            let label = self.map_block_id(id);
            self.writer.write(&label);
            self.writer.write_char(':');
            self.writer.write_space();
        }
        self.writer.write("switch");
        self.writer.write_space();
        self.writer.write_char('(');
        self.render_expr(value, Precedence::min())?;
        if value_location.is_some() {
            self.pop_location();
        }
        self.writer.write_char(')');
        self.writer.write_space();
        self.writer.write_char('{');
        self.writer.write_line();
        self.writer.increase_indent();
        for clause in clauses {
            for condition in &clause.conditions {
                self.writer.write("case ");
                self.writer.write_i32(*condition);
                self.writer.write_char(':');
                self.writer.write_line();
            }
            self.writer.increase_indent();
            let old_end = self.end;
            for part in &clause.body {
                self.end = false;
                self.render_statement(part)?;
            }
            self.end = old_end;
            self.writer.decrease_indent();
        }
        if !default_clause.is_empty() {
            self.writer.write("default:");
            self.writer.write_line();
            self.writer.increase_indent();
            let old_end = self.end;
            for part in default_clause {
                self.end = false;
                self.render_statement(part)?;
            }
            self.end = old_end;
            self.writer.decrease_indent();
        }
        self.writer.decrease_indent();
        self.writer.write_char('}');
        self.writer.write_line();
        Ok(())
    }

    fn render_while(
        &mut self,
        condition: Option<&Expr>,
        body: &[Statement],
        id: Option<&str>,
    ) -> Result<(), RenderError> {
        if let Some(id) = id {
            let label = self.map_block_id(id);
            self.writer.write(&label);
            self.writer.write_char(':');
            self.writer.write_space();
        }
        self.writer.write("while");
        self.writer.write_space();
        self.writer.write_char('(');
        match condition {
            Some(condition) => self.render_expr(condition, Precedence::min())?,
            None => self.writer.write("true"),
        }
        self.writer.write_char(')');
        self.writer.write_space();
        self.writer.write_char('{');
        self.writer.write_line();
        self.writer.increase_indent();
        let old_end = self.end;
        for part in body {
            self.end = false;
            self.render_statement(part)?;
        }
        self.end = old_end;
        self.writer.decrease_indent();
        self.writer.write_char('}');
        self.writer.write_line();
        Ok(())
    }

    fn render_block(&mut self, body: &[Statement], id: &str) -> Result<(), RenderError> {
        let label = self.map_block_id(id);
        self.writer.write(&label);
        self.writer.write_char(':');
        self.writer.write_space();
        self.writer.write_char('{');
        self.writer.write_line();
        self.writer.increase_indent();
        self.render_statements(body)?;
        self.writer.decrease_indent();
        self.writer.write_char('}');
        self.writer.write_line();
        Ok(())
    }

    fn render_jump(
        &mut self,
        keyword: &str,
        target: Option<&str>,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        self.writer.write(keyword);
        if let Some(target) = target {
            let label = self.map_block_id(target);
            self.writer.write_char(' ');
            self.writer.write(&label);
        }
        self.writer.write_char(';');
        self.writer.write_line();
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_return(
        &mut self,
        result: Option<&Expr>,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        self.writer.write("return");
        if let Some(result) = result {
            self.writer.write_char(' ');
            self.render_expr(result, Precedence::min())?;
        }
        self.writer.write_char(';');
        self.writer.write_line();
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_throw(
        &mut self,
        exception: &Expr,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        let throw = self.context.naming().function_name("$rt_throw");
        self.writer.write(&throw);
        self.writer.write_char('(');
        self.render_expr(exception, Precedence::min())?;
        self.writer.write(");");
        self.writer.write_line();
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    /// A class with no static initializer renders no call at all.
    fn render_init_class(
        &mut self,
        class_name: &str,
        is_async: bool,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if !self.context.class_source().has_static_initializer(class_name) {
            return Ok(());
        }
        if location.is_some() {
            self.push_location(location);
        }
        let init = self.context.naming().class_init_name(class_name);
        self.writer.write(&init);
        self.writer.write("();");
        self.writer.write_line();
        if is_async {
            self.emit_suspend_checker();
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    /// Jump between parts of the suspension state machine. Falling through
    /// is allowed only at the physical end of the current part when the
    /// target is exactly the next part.
    fn render_goto_part(&mut self, part: u32) {
        if part != self.current_part {
            self.writer.write(self.context.pointer_name());
            self.writer.write_space();
            self.writer.write_char('=');
            self.writer.write_space();
            self.writer.write_u32(part);
            self.writer.write_char(';');
            self.writer.write_line();
        }
        if !self.end || part != self.current_part + 1 {
            self.writer.write("continue ");
            self.writer.write(self.context.main_loop_name());
            self.writer.write_char(';');
            self.writer.write_line();
        }
    }

    // Monitor operations are the one place where suspension capability
    // selects a different helper, not just a checkpoint.

    fn render_monitor_enter(&mut self, object_ref: &Expr) -> Result<(), RenderError> {
        let method = monitor_method("monitorEnter", "monitorEnterSync", self.async_method);
        self.render_monitor_call(&method, object_ref)?;
        if self.async_method {
            self.emit_suspend_checker();
        }
        Ok(())
    }

    fn render_monitor_exit(&mut self, object_ref: &Expr) -> Result<(), RenderError> {
        let method = monitor_method("monitorExit", "monitorExitSync", self.async_method);
        self.render_monitor_call(&method, object_ref)
    }

    fn render_monitor_call(
        &mut self,
        method: &MethodReference,
        object_ref: &Expr,
    ) -> Result<(), RenderError> {
        let name = self.context.naming().full_method_name(method);
        self.writer.write(&name);
        self.writer.write_char('(');
        self.render_expr(object_ref, Precedence::min())?;
        self.writer.write(");");
        self.writer.write_line();
        Ok(())
    }

    /// Nested try/catch chains whose protected body is exactly one nested
    /// try/catch flatten into a single `try` with an `instanceof` dispatch
    /// cascade, evaluated innermost-handler-first. A typeless handler is the
    /// default and ends the cascade; anything after it is dropped.
    fn render_try_catch(
        &mut self,
        protected_body: &[Statement],
        exception_type: Option<&str>,
        exception_variable: Option<usize>,
        handler: &[Statement],
    ) -> Result<(), RenderError> {
        self.writer.write("try");
        self.writer.write_space();
        self.writer.write_char('{');
        self.writer.write_line();
        self.writer.increase_indent();

        let mut handlers: Vec<(Option<&str>, Option<usize>, &[Statement])> =
            vec![(exception_type, exception_variable, handler)];
        let mut protected = protected_body;
        while let [Statement::TryCatch {
            protected_body,
            exception_type,
            exception_variable,
            handler,
        }] = protected
        {
            handlers.push((exception_type.as_deref(), *exception_variable, handler));
            protected = protected_body;
        }
        self.render_statements(protected)?;

        self.writer.decrease_indent();
        self.writer.write_char('}');
        self.writer.write_space();
        self.writer.write("catch");
        self.writer.write_space();
        self.writer.write("($$e)");
        self.writer.write_space();
        self.writer.write_char('{');
        self.writer.increase_indent();
        self.writer.write_line();
        self.writer.write("$$je");
        self.writer.write_space();
        self.writer.write_char('=');
        self.writer.write_space();
        let wrap = self.context.naming().function_name("$rt_wrapException");
        self.writer.write(&wrap);
        self.writer.write("($$e);");
        self.writer.write_line();

        let mut first = true;
        let mut default_handler_occurred = false;
        for (clause_type, clause_variable, clause_handler) in handlers.iter().rev() {
            if !first {
                self.writer.write_space();
                self.writer.write("else");
            }
            if let Some(clause_type) = clause_type {
                if !first {
                    self.writer.write(" ");
                }
                self.writer.write("if");
                self.writer.write_space();
                self.writer.write("($$je instanceof ");
                let class = self.context.naming().class_name(clause_type);
                self.writer.write(&class);
                self.writer.write_char(')');
                self.writer.write_space();
            } else {
                default_handler_occurred = true;
            }

            if clause_type.is_some() || !first {
                self.writer.write_char('{');
                self.writer.increase_indent();
                self.writer.write_line();
            }

            if let Some(variable) = clause_variable {
                let name = self.variable_name(*variable);
                self.writer.write(&name);
                self.writer.write_space();
                self.writer.write_char('=');
                self.writer.write_space();
                self.writer.write("$$je;");
                self.writer.write_line();
            }
            self.render_statements(clause_handler)?;

            if clause_type.is_some() || !first {
                self.writer.decrease_indent();
                self.writer.write_char('}');
            }

            first = false;

            if default_handler_occurred {
                break;
            }
        }
        if !default_handler_occurred {
            self.writer.write_space();
            self.writer.write("else");
            self.writer.write_space();
            self.writer.write_char('{');
            self.writer.increase_indent();
            self.writer.write_line();
            self.writer.write("throw $$e;");
            self.writer.write_line();
            self.writer.decrease_indent();
            self.writer.write_char('}');
            self.writer.write_line();
        } else {
            self.writer.write_line();
        }
        self.writer.decrease_indent();
        self.writer.write_char('}');
        self.writer.write_line();
        Ok(())
    }
}

fn monitor_method(async_name: &str, sync_name: &str, is_async: bool) -> MethodReference {
    MethodReference::new(
        "java.lang.Thread",
        if is_async { async_name } else { sync_name },
    )
}

/// Braces may be omitted only around a single statement that is neither a
/// conditional (would fuse with the chain) nor a part transition (would
/// change what the continue leaves).
fn is_simple_if_content(statements: &[Statement]) -> bool {
    match statements {
        [statement] => !matches!(
            statement,
            Statement::Conditional { .. } | Statement::GotoPart { .. }
        ),
        _ => false,
    }
}
