//! Token substitution over scanned templates

use std::path::Path;

use crate::error::{Result, ScaffoldError};
use crate::template::token;
use crate::vars::Vars;

/// Substitute every token in `text` with its mapped value.
///
/// Single pass over the scanned tokens. The first token whose key has no
/// entry in `vars` aborts with [`ScaffoldError::UnresolvedToken`] naming
/// `file` and the key; nothing is ever partially substituted. `file` is
/// the template-relative path used for error context only.
pub fn render(text: &str, vars: &Vars, file: &Path) -> Result<String> {
    let tokens = token::scan(text);
    if tokens.is_empty() {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for token in &tokens {
        let value = vars.get(&token.key).ok_or_else(|| ScaffoldError::UnresolvedToken {
            file: file.to_path_buf(),
            key: token.key.clone(),
        })?;
        out.push_str(&text[cursor..token.start]);
        out.push_str(value);
        cursor = token.end;
    }
    out.push_str(&text[cursor..]);

    Ok(out)
}
