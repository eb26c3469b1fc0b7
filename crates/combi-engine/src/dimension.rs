use combi_ir::types::DimensionDef;
use combi_ir::value::Value;

/// Errors from dimension construction.
#[derive(Debug, thiserror::Error)]
pub enum DimensionError {
    #[error("dimension name must not be empty")]
    EmptyName,

    #[error("dimension '{name}' has no values")]
    NoValues { name: String },
}

/// A named, ordered, non-empty list of candidate values for one test axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    name: String,
    values: Vec<Value>,
}

impl Dimension {
    /// Build a dimension, eagerly materializing `values`.
    pub fn new<N, I, V>(name: N, values: I) -> Result<Self, DimensionError>
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(DimensionError::EmptyName);
        }
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(DimensionError::NoValues { name });
        }
        Ok(Self { name, values })
    }

    pub fn from_def(def: &DimensionDef) -> Result<Self, DimensionError> {
        Self::new(def.name.clone(), def.values.iter().cloned())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Always at least 1.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Starting index for every-element traversal.
    pub fn middle_index(&self) -> usize {
        self.values.len() / 2
    }

    /// Replace the whole value list.
    ///
    /// Callers generally treat dimensions as immutable; only use this before
    /// the dimension is handed to an engine.
    pub fn replace_values<I, V>(&mut self, values: I) -> Result<(), DimensionError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(DimensionError::NoValues {
                name: self.name.clone(),
            });
        }
        self.values = values;
        Ok(())
    }
}
