//! Search box to filter compilation.
//!
//! Every keystroke starts a new generation; a debounce timer carries the
//! generation it was started for and is only honoured if no newer keystroke
//! happened in between.

use contracts::shared::list_query::{FilterClause, FilterOperator};

use crate::shared::config::config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField {
    pub field: String,
    pub label: String,
}

impl SearchField {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Selectable fields, the first one is preselected
    pub fields: Vec<SearchField>,
    pub operator: FilterOperator,
    pub debounce_ms: u32,
}

impl SearchConfig {
    pub fn new(fields: Vec<SearchField>) -> Self {
        Self {
            fields,
            operator: FilterOperator::Contains,
            debounce_ms: config().table.search_debounce_ms,
        }
    }

    pub fn with_operator(mut self, operator: FilterOperator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }
}

/// Filter produced by a settled search; `None` clears the filter.
///
/// Searching `id` always uses `equals`, partial numeric matches are meaningless.
pub fn compile_search(text: &str, field: &str, operator: FilterOperator) -> Option<FilterClause> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let operator = if field == "id" {
        FilterOperator::Equals
    } else {
        operator
    };
    Some(FilterClause::new(field, operator, text))
}

#[derive(Debug, Clone)]
pub struct SearchBox {
    text: String,
    field: String,
    operator: FilterOperator,
    generation: u64,
}

impl SearchBox {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            text: String::new(),
            field: config
                .fields
                .first()
                .map(|f| f.field.clone())
                .unwrap_or_default(),
            operator: config.operator,
            generation: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Record a keystroke, returns the generation the debounce timer must carry
    pub fn input(&mut self, text: impl Into<String>) -> u64 {
        self.text = text.into();
        self.bump()
    }

    pub fn select_field(&mut self, field: impl Into<String>) -> u64 {
        self.field = field.into();
        self.bump()
    }

    /// Clear button: empty text, new generation
    pub fn clear(&mut self) -> u64 {
        self.text.clear();
        self.bump()
    }

    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// `None` for a superseded timer, otherwise the filter to apply
    pub fn settle(&self, generation: u64) -> Option<Option<FilterClause>> {
        if generation != self.generation {
            return None;
        }
        Some(compile_search(&self.text, &self.field, self.operator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_search() -> SearchConfig {
        SearchConfig {
            fields: vec![SearchField::new("email", "Email"), SearchField::new("id", "ID")],
            operator: FilterOperator::Contains,
            debounce_ms: 300,
        }
    }

    #[test]
    fn test_compile_search() {
        assert_eq!(
            compile_search("  alice ", "email", FilterOperator::Contains),
            Some(FilterClause::new("email", FilterOperator::Contains, "alice"))
        );
        assert_eq!(compile_search("   ", "email", FilterOperator::Contains), None);
    }

    #[test]
    fn test_id_search_forces_equals() {
        assert_eq!(
            compile_search("42", "id", FilterOperator::Contains),
            Some(FilterClause::new("id", FilterOperator::Equals, "42"))
        );
        assert_eq!(
            compile_search("42", "id", FilterOperator::StartsWith).map(|f| f.operator),
            Some(FilterOperator::Equals)
        );
    }

    #[test]
    fn test_rapid_keystrokes_settle_once() {
        let mut search = SearchBox::new(&email_search());
        let mut updates = Vec::new();

        let first = search.input("alice");
        let second = search.input("alice2");

        // the first timer fires after the second keystroke: ignored
        if let Some(filter) = search.settle(first) {
            updates.push(filter);
        }
        if let Some(filter) = search.settle(second) {
            updates.push(filter);
        }

        assert_eq!(
            updates,
            vec![Some(FilterClause::new("email", FilterOperator::Contains, "alice2"))]
        );
    }

    #[test]
    fn test_field_switch_recompiles() {
        let mut search = SearchBox::new(&email_search());
        assert_eq!(search.field(), "email");
        search.input("7");
        let generation = search.select_field("id");
        assert_eq!(
            search.settle(generation),
            Some(Some(FilterClause::new("id", FilterOperator::Equals, "7")))
        );
    }

    #[test]
    fn test_clear_produces_filter_removal() {
        let mut search = SearchBox::new(&email_search());
        search.input("bob");
        let generation = search.clear();
        assert_eq!(search.text(), "");
        assert_eq!(search.settle(generation), Some(None));
    }

    #[test]
    fn test_configured_operator_is_used() {
        let config = email_search().with_operator(FilterOperator::StartsWith);
        let mut search = SearchBox::new(&config);
        let generation = search.input("ali");
        assert_eq!(
            search.settle(generation),
            Some(Some(FilterClause::new("email", FilterOperator::StartsWith, "ali")))
        );
    }
}
