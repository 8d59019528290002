//! The symbol index aggregator.
//!
//! Three append-only collections, one per symbol kind. Ordering is insertion
//! order and nothing is deduplicated: every discovered declaration keeps its
//! place, so two runs over the same tree produce the same index.

use crate::types::Suggestion;

/// Aggregated index of every symbol discovered during a run.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    functions: Vec<Suggestion>,
    constants: Vec<Suggestion>,
    classes: Vec<Suggestion>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, suggestion: Suggestion) {
        self.functions.push(suggestion);
    }

    pub fn add_constant(&mut self, suggestion: Suggestion) {
        self.constants.push(suggestion);
    }

    pub fn add_class(&mut self, suggestion: Suggestion) {
        self.classes.push(suggestion);
    }

    /// Append another index's collections onto this one, preserving order.
    ///
    /// The pipeline extracts each file into its own index and merges on
    /// success, so a file that fails mid-extraction contributes nothing.
    pub fn merge(&mut self, other: SymbolIndex) {
        self.functions.extend(other.functions);
        self.constants.extend(other.constants);
        self.classes.extend(other.classes);
    }

    pub fn functions(&self) -> &[Suggestion] {
        &self.functions
    }

    pub fn constants(&self) -> &[Suggestion] {
        &self.constants
    }

    pub fn classes(&self) -> &[Suggestion] {
        &self.classes
    }

    /// Total number of indexed symbols across all three collections.
    pub fn symbol_count(&self) -> usize {
        self.functions.len() + self.constants.len() + self.classes.len()
    }

    /// The flat suggestion list the editor consumes: functions, then
    /// constants, then classes.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let mut all = Vec::with_capacity(self.symbol_count());
        all.extend_from_slice(&self.functions);
        all.extend_from_slice(&self.constants);
        all.extend_from_slice(&self.classes);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SymbolKind;

    fn suggestion(name: &str, kind: SymbolKind) -> Suggestion {
        Suggestion {
            text: name.into(),
            kind,
            description: String::new(),
            left_label: String::new(),
            right_label: String::new(),
        }
    }

    #[test]
    fn insertion_order_preserved() {
        let mut index = SymbolIndex::new();
        index.add_function(suggestion("b", SymbolKind::Function));
        index.add_function(suggestion("a", SymbolKind::Function));
        let names: Vec<&str> = index.functions().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut index = SymbolIndex::new();
        index.add_constant(suggestion("FOO", SymbolKind::Constant));
        index.add_constant(suggestion("FOO", SymbolKind::Constant));
        assert_eq!(index.constants().len(), 2);
    }

    #[test]
    fn suggestions_concatenate_kinds_in_contract_order() {
        let mut index = SymbolIndex::new();
        index.add_class(suggestion("C", SymbolKind::Class));
        index.add_function(suggestion("f", SymbolKind::Function));
        index.add_constant(suggestion("K", SymbolKind::Constant));
        let all = index.suggestions();
        let order: Vec<&str> = all.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(order, vec!["f", "K", "C"]);
    }

    #[test]
    fn merge_appends_in_order() {
        let mut first = SymbolIndex::new();
        first.add_function(suggestion("one", SymbolKind::Function));

        let mut second = SymbolIndex::new();
        second.add_function(suggestion("two", SymbolKind::Function));
        second.add_class(suggestion("Two", SymbolKind::Class));

        first.merge(second);
        assert_eq!(first.functions().len(), 2);
        assert_eq!(first.functions()[1].text, "two");
        assert_eq!(first.classes()[0].text, "Two");
        assert_eq!(first.symbol_count(), 3);
    }
}
