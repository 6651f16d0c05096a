use std::fmt::Display;

pub const TRUE: Value = Value::Integer(1);
pub const FALSE: Value = Value::Integer(0);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Integer(i64),
    Text(String),
    Array(Vec<Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Integer(0)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Text(value) => write!(f, "{value}"),
            Value::Array(values) => {
                let values = values.iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<String>>();

                write!(f, "[{}]", values.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Integer(_) => ValueType::Integer,
            Self::Text(_) => ValueType::Text,
            Self::Array(_) => ValueType::Array,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(value) => *value != 0,
            Self::Text(value) => !value.is_empty(),
            Self::Array(values) => !values.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Text,
    Array,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value_type = match self {
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Array => "array",
        };

        write!(f, "{value_type}")
    }
}
