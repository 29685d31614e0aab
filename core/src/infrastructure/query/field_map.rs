use std::collections::HashMap;

use sea_orm::EntityTrait;

use crate::domain::query::value::DataType;

#[derive(Clone)]
pub struct Field<E: EntityTrait> {
    pub column: E::Column,
    pub data_type: DataType,
}

/// Queryable fields of one entity: public name, backing column and declared type.
///
/// Anything not listed here cannot be filtered or sorted on.
#[derive(Clone)]
#[must_use]
pub struct FieldMap<E: EntityTrait> {
    fields: HashMap<String, Field<E>>,
}

impl<E: EntityTrait> Default for FieldMap<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> FieldMap<E> {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    pub fn insert(mut self, name: impl Into<String>, column: E::Column, data_type: DataType) -> Self {
        self.fields.insert(
            name.into().to_ascii_lowercase(),
            Field { column, data_type },
        );
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field<E>> {
        self.fields.get(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn data_type(&self, name: &str) -> Option<DataType> {
        self.get(name).map(|field| field.data_type)
    }

    /// Field names in alphabetical order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::members;

    #[test]
    fn lookups_ignore_case() {
        let fields = FieldMap::<members::Entity>::new()
            .insert("status", members::Column::Status, DataType::Text)
            .insert("Shares", members::Column::Shares, DataType::Number);

        assert_eq!(fields.data_type("STATUS"), Some(DataType::Text));
        assert_eq!(fields.data_type("shares"), Some(DataType::Number));
        assert_eq!(fields.data_type("password"), None);
        assert_eq!(fields.names(), vec!["shares", "status"]);
    }
}
