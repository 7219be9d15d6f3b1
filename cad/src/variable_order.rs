//! An explicit, per-operation variable order (§9 design note), replacing the
//! teacher's process-wide symbol pool: every polynomial, constraint and
//! sample point in this crate carries or is checked against one of these
//! rather than resolving variable identity through global state.

use crate::error::{CadError, CadResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableOrder {
    names: Vec<String>,
}

impl VariableOrder {
    pub fn new(names: Vec<String>) -> CadResult<Self> {
        if names.is_empty() {
            return Err(CadError::MalformedInput(
                "variable order must name at least one variable".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for name in &names {
            if !seen.insert(name.clone()) {
                return Err(CadError::MalformedInput(format!(
                    "duplicate variable name in variable order: {name}"
                )));
            }
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name_at(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        assert!(VariableOrder::new(vec!["x".into(), "x".into()]).is_err());
    }

    #[test]
    fn rejects_empty_order() {
        assert!(VariableOrder::new(vec![]).is_err());
    }

    #[test]
    fn looks_up_index_by_name() {
        let order = VariableOrder::new(vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(order.index_of("y"), Some(1));
        assert_eq!(order.index_of("z"), None);
    }
}
