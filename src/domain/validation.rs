//! Field-level validation errors shared by the facade and the form views.

use serde::Serialize;

/// A single invalid form field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of field errors, in the order they were detected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a collection holding one error.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_kept_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("mushrooms", "Unknown mushroom: 9");
        errors.add("forest", "Forest is required");
        errors.add("mushrooms", "Invalid mushroom id: abc");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.iter().filter(|e| e.field == "mushrooms").count(), 2);
        assert!(errors.has("forest"));
        assert!(!errors.has("date"));
    }

    #[test]
    fn test_serializes_as_list() {
        let errors = FieldErrors::single("date", "Date is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json[0]["field"], "date");
        assert_eq!(json[0]["message"], "Date is required");
    }
}
