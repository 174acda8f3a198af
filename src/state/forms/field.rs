//! Form field value objects

/// Represents a single text field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub is_multiline: bool,
    /// Secret fields render masked (passwords)
    pub is_secret: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            is_multiline,
            is_secret: false,
        }
    }

    /// Create a masked single-line field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            is_secret: true,
            ..Self::text(name, label, false)
        }
    }

    /// Get the raw text value
    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Get the value with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// True when the value is empty after trimming
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Set the text value
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.is_secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_starts_empty() {
        let field = FormField::text("city", "City", false);
        assert_eq!(field.as_text(), "");
        assert!(field.is_blank());
        assert!(!field.is_secret);
    }

    #[test]
    fn test_push_and_pop_char() {
        let mut field = FormField::text("city", "City", false);
        field.push_char('O');
        field.push_char('s');
        field.push_char('l');
        field.pop_char();
        assert_eq!(field.as_text(), "Os");
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        let mut field = FormField::text("name", "Name", false);
        field.set_text("   \t");
        assert!(field.is_blank());
        assert_eq!(field.trimmed(), "");
    }

    #[test]
    fn test_secret_display_is_masked() {
        let mut field = FormField::secret("password", "Password");
        field.set_text("hunter2");
        assert_eq!(field.display_value(), "•••••••");
        assert_eq!(field.as_text(), "hunter2");
    }

    #[test]
    fn test_clear() {
        let mut field = FormField::text("city", "City", false);
        field.set_text("Oslo");
        field.clear();
        assert!(field.as_text().is_empty());
    }
}
