//! Object path canonicalization.
//!
//! The API addresses objects by plain slash-separated names with no leading
//! slash. User input arrives in every imaginable shape, so all public
//! operations push their paths through [`normalize`] before building a URL.

/// Canonicalize a user-supplied object path.
///
/// Trims surrounding whitespace, converts backslashes to forward slashes,
/// collapses any run of slashes into one and strips leading and trailing
/// slashes. Total over all strings and idempotent.
pub fn normalize(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut prev_slash = false;

    for c in raw.trim().chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        normalized.push(c);
    }

    normalized.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/path//to\\file.txt"), "path/to/file.txt");
        assert_eq!(normalize("  spaced/name.txt "), "spaced/name.txt");
        assert_eq!(normalize("a\\\\b\\c"), "a/b/c");
        assert_eq!(normalize("///"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("already/normal.txt"), "already/normal.txt");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "/path//to\\file.txt",
            "  \\leading\\and/trailing// ",
            "plain",
            "",
            "a//b//c/",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }
}
