//! Placeholder token scanning
//!
//! The template corpus carries two spellings for the same substitution
//! slot: the delimiter-wrapped form `%key%` and the printf-style form
//! `%(key)s`. Both resolve to the same value. The scanner normalizes both
//! into one internal representation so that rendering and unresolved-token
//! detection are a single pass, not two independent find/replace sweeps.
//!
//! Anything that merely contains `%` without forming a well-formed token
//! (`"50% off"`, a dangling `%(`) is literal text. There is no escape
//! syntax.

/// The surface form a token was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    /// `%key%`
    Wrapped,
    /// `%(key)s`
    Printf,
}

/// One token occurrence in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Substitution key, without any delimiters
    pub key: String,
    pub spelling: Spelling,
    /// Byte offset of the leading `%`
    pub start: usize,
    /// Byte offset one past the token's final character
    pub end: usize,
}

fn is_key_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_key_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Find every well-formed token in `text`, in order of appearance.
///
/// Returned spans never overlap: scanning resumes after each match, so
/// `%a%%b%` yields exactly the tokens `a` and `b`.
pub fn scan(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        match match_token(bytes, i) {
            Some(token) => {
                i = token.end;
                tokens.push(token);
            }
            None => i += 1,
        }
    }

    tokens
}

/// Try to match a token whose leading `%` sits at `start`
fn match_token(bytes: &[u8], start: usize) -> Option<Token> {
    let rest = &bytes[start + 1..];
    match *rest.first()? {
        b'(' => {
            // %(key)s
            let key_len = key_run(&rest[1..])?;
            let after_key = &rest[1 + key_len..];
            if after_key.len() < 2 || after_key[0] != b')' || after_key[1] != b's' {
                return None;
            }
            let key = std::str::from_utf8(&rest[1..1 + key_len]).ok()?;
            Some(Token {
                key: key.to_string(),
                spelling: Spelling::Printf,
                start,
                end: start + 1 + 1 + key_len + 2,
            })
        }
        _ => {
            // %key%
            let key_len = key_run(rest)?;
            if rest.get(key_len) != Some(&b'%') {
                return None;
            }
            let key = std::str::from_utf8(&rest[..key_len]).ok()?;
            Some(Token {
                key: key.to_string(),
                spelling: Spelling::Wrapped,
                start,
                end: start + 1 + key_len + 1,
            })
        }
    }
}

/// Length of a leading identifier run, or None if there is none
fn key_run(bytes: &[u8]) -> Option<usize> {
    if !bytes.first().copied().map(is_key_start).unwrap_or(false) {
        return None;
    }
    let len = bytes
        .iter()
        .take_while(|&&c| is_key_continue(c))
        .count();
    Some(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(text: &str) -> Vec<(String, Spelling)> {
        scan(text)
            .into_iter()
            .map(|t| (t.key, t.spelling))
            .collect()
    }

    #[test]
    fn finds_wrapped_tokens() {
        assert_eq!(
            keys("extensions.%slug%.boolpref"),
            vec![("slug".to_string(), Spelling::Wrapped)]
        );
    }

    #[test]
    fn finds_printf_tokens() {
        assert_eq!(
            keys("var %(slug)s = {};"),
            vec![("slug".to_string(), Spelling::Printf)]
        );
    }

    #[test]
    fn both_spellings_in_one_file() {
        assert_eq!(
            keys("%slug% and %(slug)s"),
            vec![
                ("slug".to_string(), Spelling::Wrapped),
                ("slug".to_string(), Spelling::Printf),
            ]
        );
    }

    #[test]
    fn spans_cover_the_whole_token() {
        let text = "a %slug% b %(slug)s c";
        let tokens = scan(text);
        assert_eq!(&text[tokens[0].start..tokens[0].end], "%slug%");
        assert_eq!(&text[tokens[1].start..tokens[1].end], "%(slug)s");
    }

    #[test]
    fn adjacent_tokens_do_not_overlap() {
        assert_eq!(
            keys("%a%%b%"),
            vec![
                ("a".to_string(), Spelling::Wrapped),
                ("b".to_string(), Spelling::Wrapped),
            ]
        );
    }

    #[test]
    fn bare_percent_is_literal() {
        assert!(scan("50% off, 100% legit").is_empty());
        assert!(scan("%").is_empty());
        assert!(scan("%%").is_empty());
    }

    #[test]
    fn malformed_forms_are_literal() {
        // Dangling printf-style pieces
        assert!(scan("%(slug").is_empty());
        assert!(scan("%(slug)").is_empty());
        assert!(scan("%()s").is_empty());
        // Key must be identifier-like
        assert!(scan("%not-a-key%").is_empty());
        assert!(scan("%1st%").is_empty());
    }

    #[test]
    fn printf_suffix_must_be_s() {
        assert!(scan("%(count)d").is_empty());
    }

    #[test]
    fn underscore_keys_are_valid() {
        assert_eq!(
            keys("%author_name%"),
            vec![("author_name".to_string(), Spelling::Wrapped)]
        );
    }
}
