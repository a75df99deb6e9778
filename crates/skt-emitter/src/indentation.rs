//! Fixed-width indentation and the line-width threshold.

/// One indentation step.
pub const INDENT: &str = "\t";

/// Lines at or past this width get re-emitted in multi-line form.
pub const MAX_LINE_LENGTH: usize = 100;

pub fn increase(indentation: &str) -> String {
    format!("{indentation}{INDENT}")
}

/// Removes one indentation step. Empty input stays empty.
pub fn decrease(indentation: &str) -> String {
    match indentation.strip_suffix(INDENT) {
        Some(rest) => rest.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase() {
        assert_eq!(increase(""), "\t");
        assert_eq!(increase("\t"), "\t\t");
    }

    #[test]
    fn test_decrease() {
        assert_eq!(decrease("\t\t"), "\t");
        assert_eq!(decrease("\t"), "");
    }

    #[test]
    fn test_decrease_on_empty_is_safe() {
        assert_eq!(decrease(""), "");
    }
}
