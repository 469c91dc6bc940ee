//! Expression rendering with explicit ambient precedence. The caller passes
//! the precedence of the surrounding context; an expression parenthesizes
//! itself exactly when its own precedence is lower.

use cinder_ast::{
    BinaryOperation, Constant, Expr, InvocationKind, MethodReference, OperationType, PrimitiveKind,
    TextLocation, UnaryOperation, ValueType,
};

use super::StatementRenderer;
use crate::error::RenderError;
use crate::injector::InjectorContext;
use crate::precedence::Precedence;
use crate::render_util::{escape_string, is_small_integer};

impl StatementRenderer<'_> {
    pub fn render_expr(&mut self, expr: &Expr, precedence: Precedence) -> Result<(), RenderError> {
        match expr {
            Expr::Binary {
                operation,
                ty,
                first,
                second,
                location,
            } => self.render_binary(*operation, *ty, first, second, location.as_ref(), precedence),
            Expr::Unary {
                operation,
                ty,
                operand,
                location,
            } => self.render_unary(*operation, *ty, operand, location.as_ref(), precedence),
            Expr::Conditional {
                condition,
                consequent,
                alternative,
                location,
            } => self.render_conditional_expr(
                condition,
                consequent,
                alternative,
                location.as_ref(),
                precedence,
            ),
            Expr::Constant { value, location } => {
                self.render_constant(value, location.as_ref());
                Ok(())
            }
            Expr::Variable { index, location } => {
                if location.is_some() {
                    self.push_location(location.as_ref());
                }
                let name = self.variable_name(*index);
                self.writer.write(&name);
                if location.is_some() {
                    self.pop_location();
                }
                Ok(())
            }
            Expr::Subscript {
                array,
                index,
                location,
            } => self.render_subscript(array, index, location.as_ref()),
            Expr::UnwrapArray { array, location } => {
                self.render_unwrap_array(array, location.as_ref())
            }
            Expr::Invocation {
                kind,
                method,
                arguments,
                location,
            } => self.render_invocation(*kind, method, arguments, location.as_ref(), precedence),
            Expr::Qualification {
                qualified,
                field,
                location,
            } => self.render_qualification(qualified.as_deref(), field, location.as_ref()),
            Expr::New {
                constructed_class,
                location,
            } => {
                self.render_new(constructed_class, location.as_ref(), precedence);
                Ok(())
            }
            Expr::NewArray {
                length,
                item_type,
                location,
            } => self.render_new_array(length, item_type, location.as_ref()),
            Expr::ArrayFromData {
                data,
                item_type,
                location,
            } => self.render_array_from_data(data, item_type, location.as_ref()),
            Expr::NewMultiArray {
                dimensions,
                ty,
                location,
            } => self.render_new_multi_array(dimensions, ty, location.as_ref()),
            Expr::InstanceOf {
                expr,
                ty,
                location,
            } => self.render_instance_of(expr, ty, location.as_ref(), precedence),
            Expr::Cast {
                value,
                target,
                weak,
                location,
            } => self.render_cast(value, target, *weak, location.as_ref(), precedence),
            Expr::PrimitiveCast {
                value,
                source,
                target,
                location,
            } => {
                self.render_primitive_cast(value, *source, *target, location.as_ref(), precedence)
            }
            Expr::BoundCheck {
                index,
                array,
                lower,
                location,
            } => self.render_bound_check(index, array.as_deref(), *lower, location.as_ref(), precedence),
        }
    }

    fn render_binary(
        &mut self,
        operation: BinaryOperation,
        ty: Option<OperationType>,
        first: &Expr,
        second: &Expr,
        location: Option<&TextLocation>,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        // 64-bit arithmetic never maps to a JavaScript operator.
        if ty == Some(OperationType::Long) {
            let function = long_binary_function(operation)?;
            return self.render_binary_function(function, first, second, location);
        }
        let is_int = ty == Some(OperationType::Int);
        match operation {
            BinaryOperation::Add => self.render_infix(operation, "+", is_int, first, second, location, outer),
            BinaryOperation::Subtract => {
                self.render_infix(operation, "-", is_int, first, second, location, outer)
            }
            BinaryOperation::Multiply => {
                // A small constant factor cannot overflow double precision,
                // so the native operator plus a mask stays exact.
                if !is_int || is_small_integer(first) || is_small_integer(second) {
                    self.render_infix(operation, "*", is_int, first, second, location, outer)
                } else {
                    self.render_binary_function("$rt_imul", first, second, location)
                }
            }
            BinaryOperation::Divide => {
                self.render_infix(operation, "/", is_int, first, second, location, outer)
            }
            BinaryOperation::Modulo => {
                self.render_infix(operation, "%", is_int, first, second, location, outer)
            }
            BinaryOperation::Equals => {
                let op = if is_int { "==" } else { "===" };
                self.render_infix(operation, op, false, first, second, location, outer)
            }
            BinaryOperation::NotEquals => {
                let op = if is_int { "!=" } else { "!==" };
                self.render_infix(operation, op, false, first, second, location, outer)
            }
            BinaryOperation::Greater => {
                self.render_infix(operation, ">", false, first, second, location, outer)
            }
            BinaryOperation::GreaterOrEquals => {
                self.render_infix(operation, ">=", false, first, second, location, outer)
            }
            BinaryOperation::Less => {
                self.render_infix(operation, "<", false, first, second, location, outer)
            }
            BinaryOperation::LessOrEquals => {
                self.render_infix(operation, "<=", false, first, second, location, outer)
            }
            BinaryOperation::Compare => {
                self.render_binary_function("$rt_compare", first, second, location)
            }
            BinaryOperation::Or => {
                self.render_infix(operation, "||", false, first, second, location, outer)
            }
            BinaryOperation::And => {
                self.render_infix(operation, "&&", false, first, second, location, outer)
            }
            BinaryOperation::BitwiseOr => {
                self.render_infix(operation, "|", false, first, second, location, outer)
            }
            BinaryOperation::BitwiseAnd => {
                self.render_infix(operation, "&", false, first, second, location, outer)
            }
            BinaryOperation::BitwiseXor => {
                self.render_infix(operation, "^", false, first, second, location, outer)
            }
            BinaryOperation::LeftShift => {
                self.render_infix(operation, "<<", false, first, second, location, outer)
            }
            BinaryOperation::RightShift => {
                self.render_infix(operation, ">>", false, first, second, location, outer)
            }
            // The result of `>>>` is unsigned, so it is always folded back.
            BinaryOperation::UnsignedRightShift => {
                self.render_infix(operation, ">>>", true, first, second, location, outer)
            }
        }
    }

    fn render_infix(
        &mut self,
        operation: BinaryOperation,
        op_text: &str,
        masked: bool,
        first: &Expr,
        second: &Expr,
        location: Option<&TextLocation>,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        if masked {
            // The whole operation becomes the first operand of `| 0`.
            self.emit_infix_parts(
                BinaryOperation::BitwiseOr,
                "|",
                outer,
                |renderer, precedence| {
                    renderer.emit_operand_pair(operation, op_text, precedence, first, second)
                },
                |renderer, _| {
                    renderer.writer.write_char('0');
                    Ok(())
                },
            )?;
        } else {
            self.emit_operand_pair(operation, op_text, outer, first, second)?;
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn emit_operand_pair(
        &mut self,
        operation: BinaryOperation,
        op_text: &str,
        outer: Precedence,
        first: &Expr,
        second: &Expr,
    ) -> Result<(), RenderError> {
        self.emit_infix_parts(
            operation,
            op_text,
            outer,
            |renderer, precedence| renderer.render_expr(first, precedence),
            |renderer, precedence| renderer.render_expr(second, precedence),
        )
    }

    /// Associativity is encoded per operator: a left-associative operand may
    /// repeat the operator's own precedence, anything else must be strictly
    /// tighter.
    fn emit_infix_parts(
        &mut self,
        operation: BinaryOperation,
        op_text: &str,
        outer: Precedence,
        first: impl FnOnce(&mut Self, Precedence) -> Result<(), RenderError>,
        second: impl FnOnce(&mut Self, Precedence) -> Result<(), RenderError>,
    ) -> Result<(), RenderError> {
        let inner = binary_precedence(operation);
        let parenthesize = inner < outer;
        if parenthesize {
            self.writer.write_char('(');
        }
        let first_precedence = match operation {
            BinaryOperation::Add
            | BinaryOperation::Subtract
            | BinaryOperation::Multiply
            | BinaryOperation::Divide
            | BinaryOperation::And
            | BinaryOperation::Or
            | BinaryOperation::BitwiseAnd
            | BinaryOperation::BitwiseOr
            | BinaryOperation::BitwiseXor
            | BinaryOperation::LeftShift
            | BinaryOperation::RightShift
            | BinaryOperation::UnsignedRightShift => inner,
            _ => inner.next(),
        };
        first(self, first_precedence)?;
        self.writer.write_space();
        self.writer.write(op_text);
        self.writer.write_space();
        let second_precedence = match operation {
            BinaryOperation::Add
            | BinaryOperation::Multiply
            | BinaryOperation::And
            | BinaryOperation::Or
            | BinaryOperation::BitwiseAnd
            | BinaryOperation::BitwiseOr
            | BinaryOperation::BitwiseXor => inner,
            _ => inner.next(),
        };
        second(self, second_precedence)?;
        if parenthesize {
            self.writer.write_char(')');
        }
        Ok(())
    }

    fn render_binary_function(
        &mut self,
        function: &str,
        first: &Expr,
        second: &Expr,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        let name = self.context.naming().function_name(function);
        self.writer.write(&name);
        self.writer.write_char('(');
        self.render_expr(first, Precedence::min())?;
        self.writer.write_char(',');
        self.writer.write_space();
        self.render_expr(second, Precedence::min())?;
        self.writer.write_char(')');
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_unary(
        &mut self,
        operation: UnaryOperation,
        ty: Option<OperationType>,
        operand: &Expr,
        location: Option<&TextLocation>,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        match operation {
            UnaryOperation::Not => {
                if ty == Some(OperationType::Long) {
                    self.render_unary_function("Long_not", operand)?;
                } else {
                    let parenthesize = outer > Precedence::Unary;
                    if parenthesize {
                        self.writer.write_char('(');
                    }
                    // Untyped negation is boolean, typed is bit inversion.
                    self.writer.write(if ty.is_none() { "!" } else { "~" });
                    self.render_expr(operand, Precedence::Unary)?;
                    if parenthesize {
                        self.writer.write_char(')');
                    }
                }
            }
            UnaryOperation::Negate => match ty {
                Some(OperationType::Long) => self.render_unary_function("Long_neg", operand)?,
                Some(OperationType::Int) => {
                    // Negating the minimum int must wrap, hence the mask.
                    let parenthesize = outer > Precedence::BitwiseOr;
                    if parenthesize {
                        self.writer.write_char('(');
                    }
                    self.writer.write(" -");
                    self.render_expr(operand, Precedence::Unary)?;
                    self.writer.write_space();
                    self.writer.write_char('|');
                    self.writer.write_space();
                    self.writer.write_char('0');
                    if parenthesize {
                        self.writer.write_char(')');
                    }
                }
                _ => {
                    let parenthesize = outer > Precedence::Unary;
                    if parenthesize {
                        self.writer.write_char('(');
                    }
                    self.writer.write(" -");
                    self.render_expr(operand, Precedence::Unary)?;
                    if parenthesize {
                        self.writer.write_char(')');
                    }
                }
            },
            UnaryOperation::Length => {
                self.render_expr(operand, Precedence::MemberAccess)?;
                self.writer.write(".length");
            }
            UnaryOperation::IntToByte => {
                self.render_shift_narrowing(operand, "24", outer)?;
            }
            UnaryOperation::IntToShort => {
                self.render_shift_narrowing(operand, "16", outer)?;
            }
            UnaryOperation::IntToChar => {
                let parenthesize = outer > Precedence::BitwiseAnd;
                if parenthesize {
                    self.writer.write_char('(');
                }
                self.render_expr(operand, Precedence::BitwiseAnd)?;
                self.writer.write_space();
                self.writer.write_char('&');
                self.writer.write_space();
                self.writer.write("65535");
                if parenthesize {
                    self.writer.write_char(')');
                }
            }
            UnaryOperation::NullCheck => {
                self.render_unary_function("$rt_nullCheck", operand)?;
            }
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_unary_function(&mut self, function: &str, operand: &Expr) -> Result<(), RenderError> {
        let name = self.context.naming().function_name(function);
        self.writer.write(&name);
        self.writer.write_char('(');
        self.render_expr(operand, Precedence::min())?;
        self.writer.write_char(')');
        Ok(())
    }

    /// Sign-extending truncation: shift left then arithmetically back.
    fn render_shift_narrowing(
        &mut self,
        operand: &Expr,
        amount: &str,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        let parenthesize = outer > Precedence::BitwiseShift;
        if parenthesize {
            self.writer.write_char('(');
        }
        self.render_expr(operand, Precedence::BitwiseShift)?;
        self.writer.write_space();
        self.writer.write("<<");
        self.writer.write_space();
        self.writer.write(amount);
        self.writer.write_space();
        self.writer.write(">>");
        self.writer.write_space();
        self.writer.write(amount);
        if parenthesize {
            self.writer.write_char(')');
        }
        Ok(())
    }

    fn render_conditional_expr(
        &mut self,
        condition: &Expr,
        consequent: &Expr,
        alternative: &Expr,
        location: Option<&TextLocation>,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        let parenthesize = outer > Precedence::Conditional;
        if parenthesize {
            self.writer.write_char('(');
        }
        self.render_expr(condition, Precedence::Conditional.next())?;
        self.writer.write_space();
        self.writer.write_char('?');
        self.writer.write_space();
        self.render_expr(consequent, Precedence::Conditional.next())?;
        self.writer.write_space();
        self.writer.write_char(':');
        self.writer.write_space();
        self.render_expr(alternative, Precedence::Conditional)?;
        if parenthesize {
            self.writer.write_char(')');
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_constant(&mut self, value: &Constant, location: Option<&TextLocation>) {
        if location.is_some() {
            self.push_location(location);
        }
        match value {
            Constant::Null => self.writer.write("null"),
            Constant::Int(value) => self.writer.write_i32(*value),
            Constant::Long(value) => self.render_long_constant(*value),
            Constant::Float(value) => {
                let text = fractional_text(f64::from(*value), &value.to_string());
                self.writer.write(&text);
            }
            Constant::Double(value) => {
                let text = fractional_text(*value, &value.to_string());
                self.writer.write(&text);
            }
            Constant::Str(value) => {
                let escaped = escape_string(value);
                self.writer.write(&escaped);
            }
            Constant::Type(ty) => self.write_value_type(ty),
        }
        if location.is_some() {
            self.pop_location();
        }
    }

    fn render_long_constant(&mut self, value: i64) {
        if value == 0 {
            let zero = self.context.naming().function_name("Long_ZERO");
            self.writer.write(&zero);
        } else if let Ok(int_value) = i32::try_from(value) {
            let from_int = self.context.naming().function_name("Long_fromInt");
            self.writer.write(&from_int);
            self.writer.write_char('(');
            self.writer.write_i32(int_value);
            self.writer.write_char(')');
        } else {
            let create = self.context.naming().function_name("Long_create");
            let bits = value as u64;
            self.writer.write(&create);
            self.writer.write_char('(');
            self.writer.write_u32((bits & 0xFFFF_FFFF) as u32);
            self.writer.write_char(',');
            self.writer.write_space();
            self.writer.write_u32((bits >> 32) as u32);
            self.writer.write_char(')');
        }
    }

    fn render_subscript(
        &mut self,
        array: &Expr,
        index: &Expr,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        self.render_expr(array, Precedence::MemberAccess)?;
        self.writer.write_char('[');
        self.render_expr(index, Precedence::min())?;
        self.writer.write_char(']');
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_unwrap_array(
        &mut self,
        array: &Expr,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        self.render_expr(array, Precedence::MemberAccess)?;
        self.writer.write(".data");
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_invocation(
        &mut self,
        kind: InvocationKind,
        method: &MethodReference,
        arguments: &[Expr],
        location: Option<&TextLocation>,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        let context = self.context;
        if let Some(injector) = context.injector(method) {
            tracing::trace!(method = %method, "dispatching call to injector");
            let mut injector_context = InjectorContextImpl {
                renderer: self,
                arguments,
                precedence: outer,
            };
            injector.generate(&mut injector_context, method)?;
        } else {
            let parenthesize = outer > Precedence::FunctionCall;
            if parenthesize {
                self.writer.write_char('(');
            }
            match kind {
                InvocationKind::Dynamic => {
                    let (receiver, rest) = arguments.split_first().ok_or_else(|| {
                        RenderError::malformed("dynamic invocation", "missing receiver argument")
                    })?;
                    self.render_expr(receiver, Precedence::MemberAccess)?;
                    self.writer.write_char('.');
                    let name = self.context.naming().instance_method_name(method);
                    self.writer.write(&name);
                    self.writer.write_char('(');
                    self.write_arguments(rest)?;
                }
                InvocationKind::Static => {
                    let name = self.context.naming().full_method_name(method);
                    self.writer.write(&name);
                    self.writer.write_char('(');
                    self.write_arguments(arguments)?;
                }
                InvocationKind::Special => {
                    // Bypasses dispatch: all arguments, receiver included,
                    // go to a free function.
                    if arguments.is_empty() {
                        return Err(RenderError::malformed(
                            "special invocation",
                            "missing receiver argument",
                        ));
                    }
                    let name = self.context.naming().full_method_name(method);
                    self.writer.write(&name);
                    self.writer.write_char('(');
                    self.write_arguments(arguments)?;
                }
                InvocationKind::Constructor => {
                    let name = self.context.naming().initializer_name(method);
                    self.writer.write(&name);
                    self.writer.write_char('(');
                    self.write_arguments(arguments)?;
                }
            }
            self.writer.write_char(')');
            if parenthesize {
                self.writer.write_char(')');
            }
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn write_arguments(&mut self, arguments: &[Expr]) -> Result<(), RenderError> {
        let mut first = true;
        for argument in arguments {
            if !first {
                self.writer.write_char(',');
                self.writer.write_space();
            }
            first = false;
            self.render_expr(argument, Precedence::min())?;
        }
        Ok(())
    }

    fn render_qualification(
        &mut self,
        qualified: Option<&Expr>,
        field: &cinder_ast::FieldReference,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        match qualified {
            Some(qualified) => {
                self.render_expr(qualified, Precedence::MemberAccess)?;
                self.writer.write_char('.');
                let name = self.context.naming().field_name(field);
                self.writer.write(&name);
            }
            None => {
                let name = self.context.naming().static_field_name(field);
                self.writer.write(&name);
            }
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_new(
        &mut self,
        constructed_class: &str,
        location: Option<&TextLocation>,
        outer: Precedence,
    ) {
        if location.is_some() {
            self.push_location(location);
        }
        let parenthesize = outer > Precedence::New;
        if parenthesize {
            self.writer.write_char('(');
        }
        self.writer.write("new ");
        let name = self.context.naming().class_name(constructed_class);
        self.writer.write(&name);
        if parenthesize {
            self.writer.write_char(')');
        }
        if location.is_some() {
            self.pop_location();
        }
    }

    fn render_new_array(
        &mut self,
        length: &Expr,
        item_type: &ValueType,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        match item_type {
            ValueType::Primitive(kind) => {
                let function = self
                    .context
                    .naming()
                    .function_name(primitive_array_function(*kind));
                self.writer.write(&function);
                self.writer.write_char('(');
                self.render_expr(length, Precedence::min())?;
            }
            _ => {
                let function = self.context.naming().function_name("$rt_createArray");
                self.writer.write(&function);
                self.writer.write_char('(');
                self.write_value_type(item_type);
                self.writer.write_char(',');
                self.writer.write_space();
                self.render_expr(length, Precedence::min())?;
            }
        }
        self.writer.write_char(')');
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_array_from_data(
        &mut self,
        data: &[Expr],
        item_type: &ValueType,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        match item_type {
            ValueType::Primitive(kind) => {
                let function = self
                    .context
                    .naming()
                    .function_name(primitive_array_data_function(*kind));
                self.writer.write(&function);
                self.writer.write_char('(');
            }
            _ => {
                let function = self.context.naming().function_name("$rt_wrapArray");
                self.writer.write(&function);
                self.writer.write_char('(');
                self.write_value_type(item_type);
                self.writer.write_char(',');
                self.writer.write_space();
            }
        }
        self.writer.write_char('[');
        self.write_arguments(data)?;
        self.writer.write("])");
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_new_multi_array(
        &mut self,
        dimensions: &[Expr],
        ty: &ValueType,
        location: Option<&TextLocation>,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        let mut item_type = ty;
        for _ in 0..dimensions.len() {
            item_type = item_type.item_type().ok_or_else(|| {
                RenderError::malformed(
                    "multi-array allocation",
                    "dimension count exceeds array type depth",
                )
            })?;
        }
        match item_type {
            ValueType::Primitive(kind) => {
                let function = self
                    .context
                    .naming()
                    .function_name(primitive_multi_array_function(*kind));
                self.writer.write(&function);
                self.writer.write_char('(');
            }
            _ => {
                let function = self.context.naming().function_name("$rt_createMultiArray");
                self.writer.write(&function);
                self.writer.write_char('(');
                self.write_value_type(item_type);
                self.writer.write_char(',');
                self.writer.write_space();
            }
        }
        self.writer.write_char('[');
        // Dimensions are allocated innermost-first by the runtime helper.
        let mut first = true;
        for dimension in dimensions.iter().rev() {
            if !first {
                self.writer.write_char(',');
                self.writer.write_space();
            }
            first = false;
            self.render_expr(dimension, Precedence::min())?;
        }
        self.writer.write("])");
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_instance_of(
        &mut self,
        expr: &Expr,
        ty: &ValueType,
        location: Option<&TextLocation>,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        if self.is_concrete_class(ty) {
            let parenthesize = Precedence::Comparison < outer;
            if parenthesize {
                self.writer.write_char('(');
            }
            self.render_expr(expr, Precedence::Comparison)?;
            self.writer.write(" instanceof ");
            self.write_value_type(ty);
            if parenthesize {
                self.writer.write_char(')');
            }
        } else {
            let function = self.context.naming().function_name("$rt_isInstance");
            self.writer.write(&function);
            self.writer.write_char('(');
            self.render_expr(expr, Precedence::min())?;
            self.writer.write_char(',');
            self.writer.write_space();
            self.write_value_type(ty);
            self.writer.write_char(')');
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_cast(
        &mut self,
        value: &Expr,
        target: &ValueType,
        weak: bool,
        location: Option<&TextLocation>,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        if self.context.is_strict() && !weak {
            if location.is_some() {
                self.push_location(location);
            }
            let function = if self.is_concrete_class(target) {
                "$rt_castToClass"
            } else {
                "$rt_castToInterface"
            };
            let name = self.context.naming().function_name(function);
            self.writer.write(&name);
            self.writer.write_char('(');
            self.render_expr(value, Precedence::min())?;
            self.writer.write_char(',');
            self.writer.write_space();
            self.write_value_type(target);
            self.writer.write_char(')');
            if location.is_some() {
                self.pop_location();
            }
            Ok(())
        } else {
            self.render_expr(value, outer)
        }
    }

    fn render_primitive_cast(
        &mut self,
        value: &Expr,
        source: OperationType,
        target: OperationType,
        location: Option<&TextLocation>,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        match (source, target) {
            (OperationType::Int, OperationType::Long) => {
                self.render_cast_function("Long_fromInt", value)?;
            }
            (OperationType::Long, OperationType::Int) => {
                // The high word of a value shifted right by 32 is available
                // directly, skipping the shift entirely.
                if let Some(shifted) = extract_long_right_shifted_by_32(value) {
                    self.render_cast_function("Long_hi", shifted)?;
                } else {
                    self.render_cast_function("Long_lo", value)?;
                }
            }
            (OperationType::Long, OperationType::Float | OperationType::Double) => {
                self.render_cast_function("Long_toNumber", value)?;
            }
            (OperationType::Float | OperationType::Double, OperationType::Long) => {
                self.render_cast_function("Long_fromNumber", value)?;
            }
            (OperationType::Float | OperationType::Double, OperationType::Int) => {
                self.emit_infix_parts(
                    BinaryOperation::BitwiseOr,
                    "|",
                    outer,
                    |renderer, precedence| renderer.render_expr(value, precedence),
                    |renderer, _| {
                        renderer.writer.write_char('0');
                        Ok(())
                    },
                )?;
            }
            _ => {
                self.render_expr(value, outer)?;
            }
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    fn render_cast_function(&mut self, function: &str, value: &Expr) -> Result<(), RenderError> {
        let name = self.context.naming().function_name(function);
        self.writer.write(&name);
        self.writer.write_char('(');
        self.render_expr(value, Precedence::min())?;
        self.writer.write_char(')');
        Ok(())
    }

    fn render_bound_check(
        &mut self,
        index: &Expr,
        array: Option<&Expr>,
        lower: bool,
        location: Option<&TextLocation>,
        outer: Precedence,
    ) -> Result<(), RenderError> {
        if location.is_some() {
            self.push_location(location);
        }
        let function = match (array.is_some(), lower) {
            (true, true) => Some("$rt_checkBounds"),
            (true, false) => Some("$rt_checkUpperBound"),
            (false, true) => Some("$rt_checkLowerBound"),
            (false, false) => None,
        };
        match function {
            Some(function) => {
                let name = self.context.naming().function_name(function);
                self.writer.write(&name);
                self.writer.write_char('(');
                self.render_expr(index, Precedence::min())?;
                if let Some(array) = array {
                    self.writer.write_char(',');
                    self.writer.write_space();
                    self.render_expr(array, Precedence::min())?;
                }
                self.writer.write_char(')');
            }
            None => {
                self.render_expr(index, outer)?;
            }
        }
        if location.is_some() {
            self.pop_location();
        }
        Ok(())
    }

    pub(crate) fn write_value_type(&mut self, ty: &ValueType) {
        let mut dimensions = 0usize;
        let mut item = ty;
        while let ValueType::Array(inner) = item {
            dimensions += 1;
            item = inner;
        }
        let arraycls = self.context.naming().function_name("$rt_arraycls");
        for _ in 0..dimensions {
            self.writer.write(&arraycls);
            self.writer.write_char('(');
        }
        match item {
            ValueType::Primitive(kind) => {
                let descriptor = self
                    .context
                    .naming()
                    .function_name(primitive_descriptor_function(*kind));
                self.writer.write(&descriptor);
                self.writer.write("()");
            }
            ValueType::Object(name) => {
                let class = self.context.naming().class_name(name);
                self.writer.write(&class);
            }
            // Unreachable: arrays were stripped above.
            ValueType::Array(_) => {}
        }
        for _ in 0..dimensions {
            self.writer.write_char(')');
        }
    }

    fn is_concrete_class(&self, ty: &ValueType) -> bool {
        matches!(ty, ValueType::Object(name) if self.context.class_source().is_concrete_class(name))
    }
}

fn long_binary_function(operation: BinaryOperation) -> Result<&'static str, RenderError> {
    Ok(match operation {
        BinaryOperation::Add => "Long_add",
        BinaryOperation::Subtract => "Long_sub",
        BinaryOperation::Multiply => "Long_mul",
        BinaryOperation::Divide => "Long_div",
        BinaryOperation::Modulo => "Long_rem",
        BinaryOperation::BitwiseOr => "Long_or",
        BinaryOperation::BitwiseAnd => "Long_and",
        BinaryOperation::BitwiseXor => "Long_xor",
        BinaryOperation::LeftShift => "Long_shl",
        BinaryOperation::RightShift => "Long_shr",
        BinaryOperation::UnsignedRightShift => "Long_shru",
        BinaryOperation::Compare => "Long_compare",
        BinaryOperation::Equals => "Long_eq",
        BinaryOperation::NotEquals => "Long_ne",
        BinaryOperation::Less => "Long_lt",
        BinaryOperation::LessOrEquals => "Long_le",
        BinaryOperation::Greater => "Long_gt",
        BinaryOperation::GreaterOrEquals => "Long_ge",
        BinaryOperation::And | BinaryOperation::Or => {
            return Err(RenderError::malformed(
                "binary expression",
                "logical operation on 64-bit operands",
            ));
        }
    })
}

fn binary_precedence(operation: BinaryOperation) -> Precedence {
    match operation {
        BinaryOperation::Add | BinaryOperation::Subtract => Precedence::Addition,
        BinaryOperation::Multiply | BinaryOperation::Divide => Precedence::Multiplication,
        BinaryOperation::Modulo => Precedence::Modulo,
        BinaryOperation::And => Precedence::LogicalAnd,
        BinaryOperation::Or => Precedence::LogicalOr,
        BinaryOperation::Equals | BinaryOperation::NotEquals => Precedence::Equality,
        BinaryOperation::Greater
        | BinaryOperation::GreaterOrEquals
        | BinaryOperation::Less
        | BinaryOperation::LessOrEquals => Precedence::Comparison,
        BinaryOperation::BitwiseOr => Precedence::BitwiseOr,
        BinaryOperation::BitwiseAnd => Precedence::BitwiseAnd,
        BinaryOperation::BitwiseXor => Precedence::BitwiseXor,
        BinaryOperation::LeftShift
        | BinaryOperation::RightShift
        | BinaryOperation::UnsignedRightShift => Precedence::BitwiseShift,
        BinaryOperation::Compare => Precedence::Grouping,
    }
}

fn extract_long_right_shifted_by_32(expr: &Expr) -> Option<&Expr> {
    let Expr::Binary {
        operation,
        ty,
        first,
        second,
        ..
    } = expr
    else {
        return None;
    };
    if !matches!(
        operation,
        BinaryOperation::RightShift | BinaryOperation::UnsignedRightShift
    ) || *ty != Some(OperationType::Long)
    {
        return None;
    }
    let Expr::Constant { value, .. } = second.as_ref() else {
        return None;
    };
    match value {
        Constant::Int(32) | Constant::Long(32) => Some(first.as_ref()),
        _ => None,
    }
}

fn fractional_text(value: f64, shortest: &str) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        }
    } else {
        shortest.to_owned()
    }
}

fn primitive_array_function(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "$rt_createBooleanArray",
        PrimitiveKind::Byte => "$rt_createByteArray",
        PrimitiveKind::Short => "$rt_createShortArray",
        PrimitiveKind::Character => "$rt_createCharArray",
        PrimitiveKind::Integer => "$rt_createIntArray",
        PrimitiveKind::Long => "$rt_createLongArray",
        PrimitiveKind::Float => "$rt_createFloatArray",
        PrimitiveKind::Double => "$rt_createDoubleArray",
    }
}

fn primitive_array_data_function(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "$rt_createBooleanArrayFromData",
        PrimitiveKind::Byte => "$rt_createByteArrayFromData",
        PrimitiveKind::Short => "$rt_createShortArrayFromData",
        PrimitiveKind::Character => "$rt_createCharArrayFromData",
        PrimitiveKind::Integer => "$rt_createIntArrayFromData",
        PrimitiveKind::Long => "$rt_createLongArrayFromData",
        PrimitiveKind::Float => "$rt_createFloatArrayFromData",
        PrimitiveKind::Double => "$rt_createDoubleArrayFromData",
    }
}

fn primitive_multi_array_function(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "$rt_createBooleanMultiArray",
        PrimitiveKind::Byte => "$rt_createByteMultiArray",
        PrimitiveKind::Short => "$rt_createShortMultiArray",
        PrimitiveKind::Character => "$rt_createCharMultiArray",
        PrimitiveKind::Integer => "$rt_createIntMultiArray",
        PrimitiveKind::Long => "$rt_createLongMultiArray",
        PrimitiveKind::Float => "$rt_createFloatMultiArray",
        PrimitiveKind::Double => "$rt_createDoubleMultiArray",
    }
}

fn primitive_descriptor_function(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "$rt_booleancls",
        PrimitiveKind::Byte => "$rt_bytecls",
        PrimitiveKind::Short => "$rt_shortcls",
        PrimitiveKind::Character => "$rt_charcls",
        PrimitiveKind::Integer => "$rt_intcls",
        PrimitiveKind::Long => "$rt_longcls",
        PrimitiveKind::Float => "$rt_floatcls",
        PrimitiveKind::Double => "$rt_doublecls",
    }
}

/// Adapter giving injectors controlled access to the renderer.
struct InjectorContextImpl<'r, 'a, 'e> {
    renderer: &'r mut StatementRenderer<'a>,
    arguments: &'e [Expr],
    precedence: Precedence,
}

impl InjectorContext for InjectorContextImpl<'_, '_, '_> {
    fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    fn argument(&self, index: usize) -> &Expr {
        &self.arguments[index]
    }

    fn precedence(&self) -> Precedence {
        self.precedence
    }

    fn is_minifying(&self) -> bool {
        self.renderer.context.is_minifying()
    }

    fn write(&mut self, text: &str) {
        self.renderer.writer.write(text);
    }

    fn write_escaped(&mut self, value: &str) {
        let escaped = escape_string(value);
        self.renderer.writer.write(&escaped);
    }

    fn write_type(&mut self, ty: &ValueType) {
        self.renderer.write_value_type(ty);
    }

    fn write_expr(&mut self, expr: &Expr, precedence: Precedence) -> Result<(), RenderError> {
        self.renderer.render_expr(expr, precedence)
    }
}
