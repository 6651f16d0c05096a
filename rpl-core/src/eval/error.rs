use thiserror::Error;

use crate::{environment::prelude::ValueType, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MethodError {
    #[error("{value_type} has no method `{method}`")]
    UnknownMethod {
        value_type: ValueType,
        method: String
    },
    #[error("takes {expected} argument(s) but {got} were given")]
    ArityMismatch {
        expected: &'static str,
        got: usize
    },
    #[error("expected {expected} argument, found {found}")]
    ArgumentType {
        expected: ValueType,
        found: ValueType
    },
    #[error("index {index} is out of range")]
    IndexOutOfRange { index: i64 },
    #[error("pop from empty array")]
    EmptyArray,
    #[error("value is not present")]
    NotFound,
    #[error("empty separator")]
    EmptySeparator,
    #[error("cannot order {left} against {right}")]
    Unorderable {
        left: ValueType,
        right: ValueType
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeErrorType {
    #[error("function `{name}` is not defined")]
    UndefinedFunction { name: String },
    #[error("cannot call `{method}` on `{name}`: variable is not defined")]
    UndefinedReceiver {
        name: String,
        method: String
    },
    #[error("function `{name}` takes {expected} argument(s) but {got} were given")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize
    },
    #[error("unknown operator `{operator}`")]
    UnknownOperator { operator: String },
    #[error("cannot apply `{operator}` to {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: ValueType,
        right: ValueType
    },
    #[error("cannot apply unary `{operator}` to {operand}")]
    InvalidOperand {
        operator: String,
        operand: ValueType
    },
    #[error("integer overflow in `{operator}`")]
    IntegerOverflow { operator: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("left side of assignment must be an identifier")]
    InvalidAssignmentTarget,
    #[error("method `{method}` failed on `{receiver}`: {cause}")]
    MethodFailed {
        receiver: String,
        method: String,
        cause: MethodError
    },
    #[error("failed to write output: {kind}")]
    Output { kind: std::io::ErrorKind },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        let title = match &self.error {
            RuntimeErrorType::UndefinedFunction { .. } => "Function not defined",
            RuntimeErrorType::UndefinedReceiver { .. } => "Variable not defined",
            RuntimeErrorType::ArityMismatch { .. } => "Wrong number of arguments",
            RuntimeErrorType::UnknownOperator { .. } => "Unknown operator",
            RuntimeErrorType::InvalidOperands { .. }
            | RuntimeErrorType::InvalidOperand { .. } => "Type mismatch",
            RuntimeErrorType::IntegerOverflow { .. } => "Integer overflow",
            RuntimeErrorType::DivisionByZero => "Division by zero",
            RuntimeErrorType::InvalidAssignmentTarget => "Invalid assignment",
            RuntimeErrorType::MethodFailed { .. } => "Method call failed",
            RuntimeErrorType::Output { .. } => "Output failed",
        };

        (title, vec![self.error.to_string()])
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, location })
}
