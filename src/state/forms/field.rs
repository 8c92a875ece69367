//! Form field value objects

use std::path::PathBuf;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Date(String),
    Choice(Option<String>),
    Files(Vec<FileHandle>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for non-textual values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => s,
            _ => "",
        }
    }

    /// Get the flag value (returns false for non-flag values)
    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }

    /// Get the chosen option value, if any
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            FieldValue::Choice(choice) => choice.as_deref(),
            _ => None,
        }
    }

    /// Get the attached files (returns an empty slice for non-file values)
    pub fn as_files(&self) -> &[FileHandle] {
        match self {
            FieldValue::Files(files) => files,
            _ => &[],
        }
    }

    /// Push a character onto a textual value
    pub fn push_char(&mut self, c: char) {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => s.push(c),
            _ => {}
        }
    }

    /// Remove the last character from a textual value
    pub fn pop_char(&mut self) {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => {
                s.pop();
            }
            _ => {}
        }
    }

    /// Flip a flag value in place
    pub fn toggle(&mut self) {
        if let FieldValue::Flag(flag) = self {
            *flag = !*flag;
        }
    }
}

/// A file picked for upload. Only metadata is captured here; the bytes are
/// read from disk when the submission payload is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

impl FileHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let mime_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            path,
            file_name,
            mime_type,
        }
    }
}

/// Collapse spacing and punctuation out of a typed phone number and apply
/// the default country prefix when the user entered a bare national number.
pub fn normalize_phone(raw: &str, default_prefix: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }
    if raw.trim_start().starts_with('+') {
        format!("+{digits}")
    } else {
        format!("{default_prefix}{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_value {
        use super::*;

        #[test]
        fn test_push_and_pop_on_text() {
            let mut value = FieldValue::Text(String::new());
            value.push_char('h');
            value.push_char('i');
            assert_eq!(value.as_text(), "hi");
            value.pop_char();
            assert_eq!(value.as_text(), "h");
        }

        #[test]
        fn test_push_on_date() {
            let mut value = FieldValue::Date(String::new());
            value.push_char('1');
            value.push_char('9');
            assert_eq!(value.as_text(), "19");
        }

        #[test]
        fn test_push_is_noop_on_flag() {
            let mut value = FieldValue::Flag(false);
            value.push_char('x');
            assert_eq!(value, FieldValue::Flag(false));
        }

        #[test]
        fn test_toggle_flips_flag() {
            let mut value = FieldValue::Flag(false);
            value.toggle();
            assert!(value.as_flag());
            value.toggle();
            assert!(!value.as_flag());
        }

        #[test]
        fn test_toggle_is_noop_on_text() {
            let mut value = FieldValue::Text("hello".to_string());
            value.toggle();
            assert_eq!(value.as_text(), "hello");
        }

        #[test]
        fn test_typed_readers_on_mismatched_values() {
            assert_eq!(FieldValue::Flag(true).as_text(), "");
            assert!(!FieldValue::Text("yes".to_string()).as_flag());
            assert_eq!(FieldValue::Text("Male".to_string()).as_choice(), None);
            assert!(FieldValue::Text(String::new()).as_files().is_empty());
        }

        #[test]
        fn test_as_choice_on_chosen_value() {
            let value = FieldValue::Choice(Some("Male".to_string()));
            assert_eq!(value.as_choice(), Some("Male"));
            assert_eq!(FieldValue::Choice(None).as_choice(), None);
        }
    }

    mod file_handle {
        use super::*;

        #[test]
        fn test_from_path_captures_name_and_mime() {
            let handle = FileHandle::from_path("/tmp/scans/passport.pdf");
            assert_eq!(handle.file_name, "passport.pdf");
            assert_eq!(handle.mime_type, "application/pdf");
        }

        #[test]
        fn test_from_path_unknown_extension_falls_back_to_octet_stream() {
            let handle = FileHandle::from_path("/tmp/scan.zzz9");
            assert_eq!(handle.mime_type, "application/octet-stream");
        }

        #[test]
        fn test_from_path_image() {
            let handle = FileHandle::from_path("id-front.png");
            assert_eq!(handle.file_name, "id-front.png");
            assert_eq!(handle.mime_type, "image/png");
        }
    }

    mod normalize_phone {
        use super::*;

        #[test]
        fn test_bare_national_number_gets_default_prefix() {
            assert_eq!(normalize_phone("98765 43210", "+91"), "+919876543210");
        }

        #[test]
        fn test_international_number_keeps_its_prefix() {
            assert_eq!(normalize_phone("+1 (415) 555-0100", "+91"), "+14155550100");
        }

        #[test]
        fn test_punctuation_is_stripped() {
            assert_eq!(normalize_phone("(555) 123-4567", "+91"), "+915551234567");
        }

        #[test]
        fn test_empty_input_stays_empty() {
            assert_eq!(normalize_phone("", "+91"), "");
            assert_eq!(normalize_phone("  ", "+91"), "");
        }
    }
}
