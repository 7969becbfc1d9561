//! String utilities for the domain layer.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries. Gateway responses fed back to the planner
/// pass through this before being appended to the conversation.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        // No room for the ellipsis; cut hard at the cap
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        s[..end].to_string()
    } else {
        let target = max_len - 3;
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Normalization key for controlled-list entries.
///
/// Lowercases and collapses internal whitespace so that
/// `"Artificial  Intelligence"` and `"artificial intelligence"` dedup to the
/// same entry.
pub fn normalize_key(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // Truncation must land on a char boundary
        assert_eq!(truncate("日本語テスト", 30), "日本語テスト");
        let out = truncate("日本語テスト文字列", 15);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 15);
    }

    #[test]
    fn test_truncate_tiny_caps_never_exceed_max() {
        assert_eq!(truncate("hello", 2), "he");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 0), "");
        // Multibyte chars back off to the previous boundary
        assert_eq!(truncate("日本語", 2), "");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Artificial  Intelligence"), "artificial intelligence");
        assert_eq!(normalize_key("  COMPSCI - Computer Science "), "compsci - computer science");
        assert_eq!(normalize_key(""), "");
    }
}
