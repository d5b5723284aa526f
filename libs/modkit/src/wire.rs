//! Shared error for closed enums parsed from wire strings.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} '{value}', expected one of: {}", .allowed.join(", "))]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
    pub allowed: &'static [&'static str],
}

impl UnknownVariant {
    pub fn new(field: &'static str, value: &str, allowed: &'static [&'static str]) -> Self {
        Self {
            field,
            value: value.to_string(),
            allowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_lists_allowed_values() {
        let e = UnknownVariant::new("status", "archived", &["active", "inactive"]);
        assert_eq!(
            e.to_string(),
            "invalid status 'archived', expected one of: active, inactive"
        );
    }
}
