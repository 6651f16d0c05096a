use std::{collections::HashMap, rc::Rc};

use crate::parser::prelude::{Block, Identifier};

use super::prelude::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Block,
}

/// Variable bindings and the function table of one interpreter run.
///
/// Owned by a single caller and threaded through evaluation by `&mut`;
/// nothing here is shared between runs or threads.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    pub store: HashMap<String, Value>,
    pub functions: HashMap<String, Rc<Function>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            functions: HashMap::new()
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.store.get_mut(name)
    }

    // unbound names read as zero
    pub fn get_or_default(&self, name: &str) -> Value {
        self.store.get(name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set(&mut self, name: String, value: Value) {
        self.store.insert(name, value);
    }

    pub fn define(&mut self, name: String, function: Function) {
        self.functions.insert(name, Rc::new(function));
    }

    pub fn function(&self, name: &str) -> Option<Rc<Function>> {
        self.functions.get(name).cloned()
    }

    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.store.clone()
    }

    pub fn restore(&mut self, store: HashMap<String, Value>) {
        self.store = store;
    }
}
