use crate::environment::prelude::{Value, ValueType};

use super::error::MethodError;

// The complete set of built-in methods, keyed by receiver type and name.
// Anything not listed here is an `UnknownMethod`.
pub fn call_method(receiver: &mut Value, method: &str, arguments: Vec<Value>) -> Result<Value, MethodError> {
    match (receiver, method) {
        (Value::Text(text), "count") => {
            no_arguments(arguments)?;
            Ok(Value::Integer(text.chars().count() as i64))
        },
        (Value::Array(values), "count") => {
            no_arguments(arguments)?;
            Ok(Value::Integer(values.len() as i64))
        },

        (Value::Array(values), "append") => {
            let [value] = arguments_of::<1>(arguments, "1")?;
            values.push(value);
            Ok(Value::default())
        },
        (Value::Array(values), "pop") => {
            if values.is_empty() {
                return Err(MethodError::EmptyArray);
            }

            let index = match arguments.len() {
                0 => values.len() - 1,
                1 => {
                    let index = integer(&arguments[0])?;
                    position(index, values.len()).ok_or(MethodError::IndexOutOfRange { index })?
                },
                got => return Err(MethodError::ArityMismatch { expected: "0 or 1", got })
            };

            Ok(values.remove(index))
        },
        (Value::Array(values), "insert") => {
            let [index, value] = arguments_of::<2>(arguments, "2")?;
            let index = integer(&index)?;
            let len = values.len() as i64;

            // out of range indices clamp to the ends
            let index = if index < 0 { (len + index).max(0) } else { index.min(len) };

            values.insert(index as usize, value);
            Ok(Value::default())
        },
        (Value::Array(values), "remove") => {
            let [value] = arguments_of::<1>(arguments, "1")?;
            let index = values.iter()
                .position(|element| *element == value)
                .ok_or(MethodError::NotFound)?;

            values.remove(index);
            Ok(Value::default())
        },
        (Value::Array(values), "index") => {
            let [value] = arguments_of::<1>(arguments, "1")?;

            values.iter()
                .position(|element| *element == value)
                .map(|index| Value::Integer(index as i64))
                .ok_or(MethodError::NotFound)
        },
        (Value::Array(values), "extend") => {
            let [other] = arguments_of::<1>(arguments, "1")?;

            match other {
                Value::Array(other) => values.extend(other),
                other => return Err(MethodError::ArgumentType {
                    expected: ValueType::Array,
                    found: other._type()
                })
            }

            Ok(Value::default())
        },
        (Value::Array(values), "clear") => {
            no_arguments(arguments)?;
            values.clear();
            Ok(Value::default())
        },
        (Value::Array(values), "reverse") => {
            no_arguments(arguments)?;
            values.reverse();
            Ok(Value::default())
        },
        (Value::Array(values), "sort") => {
            no_arguments(arguments)?;

            if let Some(first) = values.first() {
                let left = first._type();

                if let Some(other) = values.iter().find(|value| value._type() != left) {
                    return Err(MethodError::Unorderable { left, right: other._type() });
                }
            }

            values.sort();
            Ok(Value::default())
        },

        (Value::Text(text), "upper") => {
            no_arguments(arguments)?;
            Ok(Value::Text(text.to_uppercase()))
        },
        (Value::Text(text), "lower") => {
            no_arguments(arguments)?;
            Ok(Value::Text(text.to_lowercase()))
        },
        (Value::Text(text), "strip") => {
            no_arguments(arguments)?;
            Ok(Value::Text(text.trim().to_string()))
        },
        (Value::Text(text), "find") => {
            let [needle] = arguments_of::<1>(arguments, "1")?;
            let needle = string(&needle)?;

            let index = text.find(needle)
                .map(|byte| text[..byte].chars().count() as i64)
                .unwrap_or(-1);

            Ok(Value::Integer(index))
        },
        (Value::Text(text), "replace") => {
            let [from, to] = arguments_of::<2>(arguments, "2")?;

            Ok(Value::Text(text.replace(string(&from)?, string(&to)?)))
        },
        (Value::Text(text), "split") => {
            let parts: Vec<Value> = match arguments.len() {
                0 => text.split_whitespace()
                    .map(|part| Value::Text(part.to_string()))
                    .collect(),
                1 => {
                    let separator = string(&arguments[0])?;

                    if separator.is_empty() {
                        return Err(MethodError::EmptySeparator);
                    }

                    text.split(separator)
                        .map(|part| Value::Text(part.to_string()))
                        .collect()
                },
                got => return Err(MethodError::ArityMismatch { expected: "0 or 1", got })
            };

            Ok(Value::Array(parts))
        },
        (Value::Text(text), "startswith") => {
            let [prefix] = arguments_of::<1>(arguments, "1")?;

            Ok(Value::from(text.starts_with(string(&prefix)?)))
        },
        (Value::Text(text), "endswith") => {
            let [suffix] = arguments_of::<1>(arguments, "1")?;

            Ok(Value::from(text.ends_with(string(&suffix)?)))
        },

        (receiver, method) => Err(MethodError::UnknownMethod {
            value_type: receiver._type(),
            method: method.to_string()
        })
    }
}

fn no_arguments(arguments: Vec<Value>) -> Result<(), MethodError> {
    arguments_of::<0>(arguments, "0").map(|_| ())
}

fn arguments_of<const N: usize>(arguments: Vec<Value>, expected: &'static str) -> Result<[Value; N], MethodError> {
    let got = arguments.len();

    arguments.try_into()
        .map_err(|_| MethodError::ArityMismatch { expected, got })
}

fn integer(value: &Value) -> Result<i64, MethodError> {
    match value {
        Value::Integer(value) => Ok(*value),
        other => Err(MethodError::ArgumentType {
            expected: ValueType::Integer,
            found: other._type()
        })
    }
}

fn string(value: &Value) -> Result<&str, MethodError> {
    match value {
        Value::Text(value) => Ok(value),
        other => Err(MethodError::ArgumentType {
            expected: ValueType::Text,
            found: other._type()
        })
    }
}

// negative indices count from the end
fn position(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let index = if index < 0 { len + index } else { index };

    (0..len).contains(&index).then_some(index as usize)
}
