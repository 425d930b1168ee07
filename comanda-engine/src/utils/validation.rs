//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Limits are
//! chosen as reasonable UX bounds for names, notes, and contact fields; the
//! in-memory store enforces nothing on its own.

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, table number, ingredient, customer, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, special requests, instructions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, units, categories
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.len() > max_len {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), String> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Table 1", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn rejects_overlong_text() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
        assert!(validate_optional_text(&Some(long), "note", MAX_NAME_LEN).is_err());
        assert!(validate_optional_text(&None, "note", MAX_NAME_LEN).is_ok());
    }
}
