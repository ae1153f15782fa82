use es_core::{EsValue, VariableMap};

/// The process-wide variable table shared by every statement.
///
/// There is no scoping: loop, if and function bodies all read and write the
/// same entries, and nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    values: VariableMap,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&EsValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: EsValue) {
        self.values.insert(name.into(), value);
    }

    /// Overwrites existing keys and adds new ones; never removes.
    pub fn merge(&mut self, entries: VariableMap) {
        self.values.extend(entries);
    }

    pub fn as_map(&self) -> &VariableMap {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<VariableMap> for Environment {
    fn from(values: VariableMap) -> Self {
        Self { values }
    }
}
