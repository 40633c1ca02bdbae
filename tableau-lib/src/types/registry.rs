//! Registry of column types by name

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use log::warn;

use super::BooleanType;
use super::ColumnType;
use super::DateType;
use super::NumberType;
use super::SelectType;
use super::TextType;
use super::TypeCategory;

/// Maps type names to their definitions.
///
/// Registering a name that already exists replaces the old definition, so
/// host configuration can override built-ins. Listing order is the order in
/// which names were first registered.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<dyn ColumnType>>,
    order: Vec<String>,
    by_category: HashMap<TypeCategory, Vec<String>>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in text, number, date, boolean
    /// and select types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(TextType);
        registry.register(NumberType);
        registry.register(DateType);
        registry.register(BooleanType);
        registry.register(SelectType);
        registry
    }

    /// Registers a type definition under its own name.
    pub fn register(&mut self, definition: impl ColumnType + 'static) {
        self.register_shared(Arc::new(definition));
    }

    /// Registers an already shared type definition.
    pub fn register_shared(&mut self, definition: Arc<dyn ColumnType>) {
        let name = definition.type_name().to_string();
        let category = definition.category();

        match self.types.insert(name.clone(), definition) {
            Some(previous) => {
                warn!("Column type '{}' re-registered, replacing previous definition", name);
                if previous.category() != category
                    && let Some(names) = self.by_category.get_mut(&previous.category())
                {
                    names.retain(|n| n != &name);
                }
            }
            None => {
                debug!("Registered column type '{}' ({})", name, category);
                self.order.push(name.clone());
            }
        }

        let names = self.by_category.entry(category).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    /// Looks up a type by name. A miss is not an error.
    pub fn get(&self, type_name: &str) -> Option<&dyn ColumnType> {
        self.types.get(type_name).map(|t| t.as_ref())
    }

    /// Returns the shared handle for a type, for storing outside the registry.
    pub fn get_shared(&self, type_name: &str) -> Option<Arc<dyn ColumnType>> {
        self.types.get(type_name).cloned()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// All types in registration order.
    pub fn all(&self) -> Vec<&dyn ColumnType> {
        self.order.iter().filter_map(|name| self.get(name)).collect()
    }

    /// Types of one category in registration order.
    pub fn by_category(&self, category: TypeCategory) -> Vec<&dyn ColumnType> {
        self.by_category
            .get(&category)
            .map(|names| names.iter().filter_map(|name| self.get(name)).collect())
            .unwrap_or_default()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use crate::types::CustomType;

    fn names(types: Vec<&dyn ColumnType>) -> Vec<String> {
        types.iter().map(|t| t.type_name().to_string()).collect()
    }

    #[test]
    fn test_builtins_in_registration_order() {
        let registry = TypeRegistry::with_builtins();
        assert_eq!(
            names(registry.all()),
            ["text", "number", "date", "boolean", "select"]
        );
        assert_eq!(names(registry.by_category(TypeCategory::Number)), ["number"]);
        assert!(registry.by_category(TypeCategory::Custom).is_empty());
    }

    #[test]
    fn test_miss_is_none() {
        let registry = TypeRegistry::with_builtins();
        assert!(registry.get("currency").is_none());
    }

    #[test]
    fn test_last_registration_wins_and_keeps_position() {
        let mut registry = TypeRegistry::with_builtins();
        registry.register(CustomType::new("number", "Score", Value::from(1.0)));

        assert_eq!(registry.len(), 5);
        assert_eq!(registry.names()[1], "number");
        let number = registry.get("number").unwrap();
        assert_eq!(number.label(), "Score");
        assert_eq!(number.default_value(), Value::from(1.0));

        // Moved from the number category to custom.
        assert!(registry.by_category(TypeCategory::Number).is_empty());
        assert_eq!(names(registry.by_category(TypeCategory::Custom)), ["number"]);
    }

    #[test]
    fn test_custom_types_append() {
        let mut registry = TypeRegistry::with_builtins();
        registry.register(CustomType::new("rating", "Rating", Value::from(0.0)));
        registry.register(CustomType::new("email", "Email", Value::from("")));
        assert_eq!(
            names(registry.by_category(TypeCategory::Custom)),
            ["rating", "email"]
        );
        assert_eq!(registry.names().last().map(String::as_str), Some("email"));
    }
}
