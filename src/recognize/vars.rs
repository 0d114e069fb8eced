use crate::recognize::wire::RecognitionRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Symbol values carried between recognition requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableEnvironment {
    vars: BTreeMap<String, String>,
}

impl VariableEnvironment {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    /// Fold every assignment record into the environment in response order.
    /// Later records for the same name win. Returns how many were applied.
    pub fn apply_assignments(&mut self, records: &[RecognitionRecord]) -> usize {
        let mut applied = 0;
        for record in records.iter().filter(|r| r.is_assignment) {
            tracing::debug!(
                name = %record.expression,
                value = %record.result_value,
                "variable assigned"
            );
            self.insert(&record.expression, &record.result_value);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_assignments_are_folded_in() {
        let mut env = VariableEnvironment::default();
        let applied = env.apply_assignments(&[
            RecognitionRecord::new("x", "5", true),
            RecognitionRecord::new("x+2", "7", false),
        ]);
        assert_eq!(applied, 1);
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("x"), Some("5"));
    }

    #[test]
    fn last_write_wins_within_a_batch() {
        let mut env = VariableEnvironment::default();
        env.apply_assignments(&[
            RecognitionRecord::new("y", "1", true),
            RecognitionRecord::new("y", "2", true),
        ]);
        assert_eq!(env.get("y"), Some("2"));
    }

    #[test]
    fn reapplying_a_batch_is_idempotent() {
        let batch = [
            RecognitionRecord::new("a", "1", true),
            RecognitionRecord::new("b", "2", true),
            RecognitionRecord::new("a", "3", true),
            RecognitionRecord::new("a+b", "5", false),
        ];
        let mut env = VariableEnvironment::default();
        env.insert("c", "9");
        env.apply_assignments(&batch);
        let once = env.clone();
        env.apply_assignments(&batch);
        assert_eq!(env, once);
    }

    #[test]
    fn environment_grows_across_batches() {
        let mut env = VariableEnvironment::default();
        env.apply_assignments(&[RecognitionRecord::new("x", "5", true)]);
        env.apply_assignments(&[RecognitionRecord::new("y", "6", true)]);
        assert_eq!(env.iter().collect::<Vec<_>>(), vec![("x", "5"), ("y", "6")]);
    }

    #[test]
    fn serializes_as_flat_map() {
        let mut env = VariableEnvironment::default();
        env.insert("x", "5");
        assert_eq!(serde_json::to_string(&env).unwrap(), r#"{"x":"5"}"#);
    }
}
