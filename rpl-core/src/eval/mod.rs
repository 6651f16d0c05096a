pub mod error;
pub mod method;

#[cfg(test)]
mod tests;

use std::io::Write;

use crate::{
    environment::prelude::{Environment, Function, Value},
    lexer::prelude::Token,
    parser::prelude::{Block, Expression, FunctionCall, Infix, MethodCall, Prefix, Primitive, Program, Statement},
    utils::prelude::SrcSpan
};

use self::{
    error::{runtime_error, RuntimeError, RuntimeErrorType},
    method::call_method
};

/// Runs `program` statement by statement against `env`.
///
/// Anything printed before a failing statement stays written to `out`.
pub fn eval<W: Write>(program: &Program, env: &mut Environment, out: &mut W) -> Result<(), RuntimeError> {
    for statement in &program.statements {
        eval_statement(statement, env, out)?;
    }

    Ok(())
}

fn eval_block<W: Write>(block: &Block, env: &mut Environment, out: &mut W) -> Result<(), RuntimeError> {
    for statement in &block.statements {
        eval_statement(statement, env, out)?;
    }

    Ok(())
}

fn eval_statement<W: Write>(statement: &Statement, env: &mut Environment, out: &mut W) -> Result<(), RuntimeError> {
    match statement {
        Statement::If(if_) => {
            if eval_expression(&if_.condition, env, out)?.is_truthy() {
                eval_block(&if_.resolution, env, out)?;
            } else if let Some(alternative) = &if_.alternative {
                eval_block(alternative, env, out)?;
            }
        },
        Statement::While(loop_) => {
            while eval_expression(&loop_.condition, env, out)?.is_truthy() {
                eval_block(&loop_.block, env, out)?;
            }
        },
        Statement::For(loop_) => {
            let ident = &loop_.identifier.value;

            let start = eval_expression(&loop_.start, env, out)?;
            env.set(ident.clone(), start);

            while eval_expression(&loop_.condition, env, out)?.is_truthy() {
                eval_block(&loop_.block, env, out)?;

                let step = eval_expression(&loop_.step, env, out)?;
                env.set(ident.clone(), step);
            }
        },
        Statement::Print(print) => {
            let value = eval_expression(&print.expression, env, out)?;

            writeln!(out, "{value}").or_else(|err| runtime_error(
                RuntimeErrorType::Output { kind: err.kind() },
                print.location
            ))?;
        },
        Statement::Assignment(assignment) => {
            let value = eval_expression(&assignment.value, env, out)?;

            env.set(assignment.identifier.value.clone(), value);
        },
        Statement::FunctionDef(function) => {
            env.define(function.name.value.clone(), Function {
                parameters: function.parameters.clone(),
                body: function.body.clone()
            });
        },
        Statement::FunctionCall(call) => eval_function_call(call, env, out)?,
        Statement::MethodCall(call) => {
            eval_method_call(call, env, out)?;
        },
    };

    Ok(())
}

fn eval_expression<W: Write>(expression: &Expression, env: &mut Environment, out: &mut W) -> Result<Value, RuntimeError> {
    let value = match expression {
        Expression::Identifier(ident) => env.get_or_default(&ident.value),
        Expression::Primitive(Primitive::Int { value, .. }) => Value::Integer(*value),
        Expression::Primitive(Primitive::Str { value, .. }) => Value::Text(value.clone()),
        Expression::Array(array) => {
            let elements = array.elements.iter()
                .map(|element| eval_expression(element, env, out))
                .collect::<Result<Vec<Value>, RuntimeError>>()?;

            Value::Array(elements)
        },
        Expression::Infix(infix) => eval_infix(infix, env, out)?,
        Expression::Prefix(prefix) => eval_prefix(prefix, env, out)?,
        // functions produce no value
        Expression::FunctionCall(call) => {
            eval_function_call(call, env, out)?;

            Value::default()
        },
        Expression::MethodCall(call) => eval_method_call(call, env, out)?,
    };

    Ok(value)
}

fn eval_arguments<W: Write>(arguments: &[Expression], env: &mut Environment, out: &mut W) -> Result<Vec<Value>, RuntimeError> {
    arguments.iter()
        .map(|argument| eval_expression(argument, env, out))
        .collect()
}

fn eval_function_call<W: Write>(call: &FunctionCall, env: &mut Environment, out: &mut W) -> Result<(), RuntimeError> {
    let name = &call.name.value;

    let Some(function) = env.function(name) else {
        return runtime_error(
            RuntimeErrorType::UndefinedFunction { name: name.clone() },
            call.name.location
        );
    };

    if function.parameters.len() != call.arguments.len() {
        return runtime_error(
            RuntimeErrorType::ArityMismatch {
                name: name.clone(),
                expected: function.parameters.len(),
                got: call.arguments.len()
            },
            call.location
        );
    }

    let arguments = eval_arguments(&call.arguments, env, out)?;

    // the callee works on a copy, the caller's variables come back untouched
    let saved = env.snapshot();

    for (parameter, value) in function.parameters.iter().zip(arguments) {
        env.set(parameter.value.clone(), value);
    }

    let result = eval_block(&function.body, env, out);

    env.restore(saved);

    result
}

fn eval_method_call<W: Write>(call: &MethodCall, env: &mut Environment, out: &mut W) -> Result<Value, RuntimeError> {
    let arguments = eval_arguments(&call.arguments, env, out)?;

    let receiver = &call.receiver.value;
    let method = &call.method.value;

    let Some(value) = env.get_mut(receiver) else {
        return runtime_error(
            RuntimeErrorType::UndefinedReceiver { name: receiver.clone(), method: method.clone() },
            call.receiver.location
        );
    };

    call_method(value, method, arguments).or_else(|cause| runtime_error(
        RuntimeErrorType::MethodFailed {
            receiver: receiver.clone(),
            method: method.clone(),
            cause
        },
        call.location
    ))
}

fn eval_prefix<W: Write>(prefix: &Prefix, env: &mut Environment, out: &mut W) -> Result<Value, RuntimeError> {
    let operand = eval_expression(&prefix.expression, env, out)?;
    let operator = prefix.operator.as_literal();

    let error = match (&prefix.operator, operand) {
        (Token::Minus, Value::Integer(value)) => match value.checked_neg() {
            Some(value) => return Ok(Value::Integer(value)),
            None => RuntimeErrorType::IntegerOverflow { operator }
        },
        (Token::Minus, operand) => RuntimeErrorType::InvalidOperand {
            operator,
            operand: operand._type()
        },
        _ => RuntimeErrorType::UnknownOperator { operator }
    };

    runtime_error(error, prefix.location)
}

fn eval_infix<W: Write>(infix: &Infix, env: &mut Environment, out: &mut W) -> Result<Value, RuntimeError> {
    let left = eval_expression(&infix.left, env, out)?;
    let right = eval_expression(&infix.right, env, out)?;

    if infix.operator == Token::Assign {
        let Expression::Identifier(ident) = infix.left.as_ref() else {
            return runtime_error(RuntimeErrorType::InvalidAssignmentTarget, infix.left.location());
        };

        env.set(ident.value.clone(), right.clone());

        return Ok(right);
    }

    apply_infix(&infix.operator, left, right, infix.location)
}

fn apply_infix(operator: &Token, left: Value, right: Value, location: SrcSpan) -> Result<Value, RuntimeError> {
    let invalid = |left: &Value, right: &Value| runtime_error(
        RuntimeErrorType::InvalidOperands {
            operator: operator.as_literal(),
            left: left._type(),
            right: right._type()
        },
        location
    );

    match operator {
        Token::Plus => match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => checked(operator, l.checked_add(r), location),
            (Value::Array(mut l), Value::Array(r)) => {
                l.extend(r);

                Ok(Value::Array(l))
            },
            // text on either side turns `+` into concatenation
            (l, r) if matches!(l, Value::Text(_)) || matches!(r, Value::Text(_)) => {
                Ok(Value::Text(format!("{l}{r}")))
            },
            (l, r) => invalid(&l, &r)
        },
        Token::Minus | Token::Asterisk | Token::Slash => match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => match operator {
                Token::Minus => checked(operator, l.checked_sub(r), location),
                Token::Asterisk => checked(operator, l.checked_mul(r), location),
                _ if r == 0 => runtime_error(RuntimeErrorType::DivisionByZero, location),
                _ => checked(operator, l.checked_div(r), location),
            },
            (l, r) => invalid(&l, &r)
        },
        Token::Equal => Ok(Value::from(left == right)),
        Token::NotEqual => Ok(Value::from(left != right)),
        Token::LessThan
        | Token::LessThanOrEqual
        | Token::GreaterThan
        | Token::GreaterThanOrEqual => {
            if left._type() != right._type() {
                return invalid(&left, &right);
            }

            let result = match operator {
                Token::LessThan => left < right,
                Token::LessThanOrEqual => left <= right,
                Token::GreaterThan => left > right,
                _ => left >= right,
            };

            Ok(Value::from(result))
        },
        _ => runtime_error(
            RuntimeErrorType::UnknownOperator { operator: operator.as_literal() },
            location
        )
    }
}

fn checked(operator: &Token, result: Option<i64>, location: SrcSpan) -> Result<Value, RuntimeError> {
    match result {
        Some(value) => Ok(Value::Integer(value)),
        None => runtime_error(
            RuntimeErrorType::IntegerOverflow { operator: operator.as_literal() },
            location
        )
    }
}
