//! Input well-formedness checks.

/// Maximum length of an email address (RFC 5321 path limit).
const MAX_EMAIL_LENGTH: usize = 254;

/// Check that `value` looks like a deliverable email address.
///
/// This is a shape check only: one `@`, a non-empty local part, and a
/// dotted domain made of letters, digits and hyphens.
pub fn is_email(value: &str) -> bool {
    if value.len() > MAX_EMAIL_LENGTH || value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~.".contains(c))
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_email("alice@example.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
        assert!(is_email("x@a-b.io"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_email(""));
        assert!(!is_email("alice"));
        assert!(!is_email("alice@"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("alice@localhost"));
        assert!(!is_email("alice@@example.com"));
        assert!(!is_email("al ice@example.com"));
        assert!(!is_email("alice@exa_mple.com"));
        assert!(!is_email(".alice@example.com"));
        assert!(!is_email("alice@-example.com"));
    }
}
