//! Case-insensitive wildcard matching.
//!
//! Supports `*` (any run of characters, including none) and `?` (exactly one
//! character). Every other character matches itself, ignoring case.

/// Check whether `text` matches `pattern`.
pub fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
    let pattern: Vec<char> = pattern.chars().flat_map(char::to_lowercase).collect();

    let (mut t, mut p) = (0, 0);
    // Position of the last `*` and the text index it is currently absorbing up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    t = absorbed + 1;
                    backtrack = Some((star, t));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        assert!(wildcard_match("plugins", "plugins"));
        assert!(wildcard_match("Plugins", "PLUGINS"));
        assert!(!wildcard_match("plugins", "plugin"));
        assert!(!wildcard_match("plugin", "plugins"));
    }

    #[test]
    fn test_star() {
        assert!(wildcard_match("console_scripts", "console_*"));
        assert!(wildcard_match("console_", "console_*"));
        assert!(wildcard_match("anything", "*"));
        assert!(wildcard_match("", "*"));
        assert!(wildcard_match("pytest11", "*test*"));
        assert!(wildcard_match("abcbcd", "a*bcd"));
        assert!(!wildcard_match("gui_scripts", "console_*"));
    }

    #[test]
    fn test_question_mark() {
        assert!(wildcard_match("a", "?"));
        assert!(wildcard_match("pkgA", "pkg?"));
        assert!(!wildcard_match("pkg", "pkg?"));
        assert!(!wildcard_match("pkgAB", "pkg?"));
    }

    #[test]
    fn test_brackets_are_literal() {
        assert!(wildcard_match("[x]", "[x]"));
        assert!(!wildcard_match("x", "[x]"));
    }
}
