//! Validated SQL identifiers.
//!
//! [`Identifier`] names a table or column. The accepted text is rendered
//! verbatim: no quoting is added and reserved words are not escaped.
//!
//! - Unquoted parts start with a letter or `_`, followed by letters, digits, `_` or `$`.
//!   Letters include non-ASCII ones (`größe`, `таблица`), as PostgreSQL accepts them
//! - Quoted parts allow any characters except NUL, with `"` written as `""`
//! - Parts may be joined with `.` (e.g. `public.users`, `u.id`)
//!
//! # Example
//! ```
//! use ezsql::Identifier;
//!
//! let t = Identifier::new("public.users")?;
//! assert_eq!(t.name(), "public.users");
//! assert!(Identifier::new("my table").is_err());
//! # Ok::<(), ezsql::SqlError>(())
//! ```

use crate::error::{SqlError, SqlResult};
use std::fmt;

/// A validated table or column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    name: String,
}

impl Identifier {
    /// Validate `name` and wrap it.
    pub fn new(name: impl Into<String>) -> SqlResult<Self> {
        let name = name.into();
        validate(&name)?;
        Ok(Self { name })
    }

    /// The bare name, exactly as accepted.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the identifier as SQL.
    pub fn render(&self) -> String {
        self.name.clone()
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push_str(&self.name);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

fn validate(s: &str) -> SqlResult<()> {
    if s.is_empty() {
        return Err(SqlError::validation("Identifier cannot be empty"));
    }
    if s.contains('\0') {
        return Err(SqlError::validation(
            "Identifier cannot contain NUL character",
        ));
    }

    let mut chars = s.chars().peekable();
    let mut parts = 0usize;

    while chars.peek().is_some() {
        // Consume '.' between parts (but require there is a next part).
        if parts > 0 {
            match chars.next() {
                Some('.') => {
                    if chars.peek().is_none() {
                        return Err(SqlError::validation("Trailing '.' in identifier"));
                    }
                }
                Some(c) => {
                    return Err(SqlError::validation(format!(
                        "Expected '.' between identifier parts, got '{c}'"
                    )));
                }
                None => break,
            }
        }

        if chars.peek() == Some(&'"') {
            chars.next();
            let mut len = 0usize;
            loop {
                match chars.next() {
                    Some('"') => {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            len += 1;
                        } else {
                            break;
                        }
                    }
                    Some(_) => len += 1,
                    None => return Err(SqlError::validation("Unclosed quoted identifier")),
                }
            }
            if len == 0 {
                return Err(SqlError::validation("Empty quoted identifier"));
            }
            parts += 1;
            continue;
        }

        let mut len = 0usize;
        while let Some(&c) = chars.peek() {
            if c == '.' {
                break;
            }
            let ok = if len == 0 {
                c == '_' || c.is_alphabetic()
            } else {
                c == '_' || c == '$' || c.is_alphanumeric()
            };
            if !ok {
                return Err(SqlError::validation(if len == 0 {
                    format!("Invalid identifier start character: '{c}'")
                } else {
                    format!("Invalid character in identifier: '{c}'")
                }));
            }
            len += 1;
            chars.next();
        }
        if len == 0 {
            return Err(SqlError::validation("Empty identifier segment"));
        }
        parts += 1;
    }

    Ok(())
}

/// Convert an input into an [`Identifier`].
///
/// Lets builder APIs accept either plain strings or already validated identifiers.
pub trait IntoIdentifier {
    fn into_identifier(self) -> SqlResult<Identifier>;
}

impl IntoIdentifier for Identifier {
    fn into_identifier(self) -> SqlResult<Identifier> {
        Ok(self)
    }
}

impl IntoIdentifier for &Identifier {
    fn into_identifier(self) -> SqlResult<Identifier> {
        Ok(self.clone())
    }
}

impl IntoIdentifier for &str {
    fn into_identifier(self) -> SqlResult<Identifier> {
        Identifier::new(self)
    }
}

impl IntoIdentifier for String {
    fn into_identifier(self) -> SqlResult<Identifier> {
        Identifier::new(self)
    }
}

impl IntoIdentifier for &String {
    fn into_identifier(self) -> SqlResult<Identifier> {
        Identifier::new(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = Identifier::new("users").unwrap();
        assert_eq!(ident.render(), "users");
    }

    #[test]
    fn ident_dotted() {
        let ident = Identifier::new("public.users").unwrap();
        assert_eq!(ident.render(), "public.users");
    }

    #[test]
    fn ident_quoted_kept_verbatim() {
        let ident = Identifier::new(r#""Order Items""#).unwrap();
        assert_eq!(ident.render(), r#""Order Items""#);
    }

    #[test]
    fn ident_quoted_with_escape() {
        let ident = Identifier::new(r#""has""quote""#).unwrap();
        assert_eq!(ident.name(), r#""has""quote""#);
    }

    #[test]
    fn ident_reserved_word_not_escaped() {
        let ident = Identifier::new("select").unwrap();
        assert_eq!(ident.to_string(), "select");
    }

    #[test]
    fn ident_with_dollar() {
        assert!(Identifier::new("my_var$1").is_ok());
    }

    #[test]
    fn ident_non_ascii_letters() {
        for name in ["таблица", "größe", "public.café", "_ñ1"] {
            assert_eq!(Identifier::new(name).unwrap().render(), name);
        }
        assert!(Identifier::new("größe zahl").is_err());
    }

    #[test]
    fn ident_rejects_empty() {
        assert!(Identifier::new("").unwrap_err().is_validation());
    }

    #[test]
    fn ident_rejects_start_digit() {
        assert!(Identifier::new("1table").is_err());
    }

    #[test]
    fn ident_rejects_space() {
        assert!(Identifier::new("my table").is_err());
    }

    #[test]
    fn ident_rejects_injection() {
        assert!(Identifier::new("users; DROP TABLE users").is_err());
    }

    #[test]
    fn ident_rejects_double_dot() {
        assert!(Identifier::new("schema..table").is_err());
    }

    #[test]
    fn ident_rejects_trailing_dot() {
        assert!(Identifier::new("schema.").is_err());
    }

    #[test]
    fn ident_rejects_unclosed_quote() {
        assert!(Identifier::new(r#""unclosed"#).is_err());
    }

    #[test]
    fn into_identifier_from_str() {
        let ident = "orders".into_identifier().unwrap();
        assert_eq!(ident.name(), "orders");
    }
}
