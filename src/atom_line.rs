//!
//! Token access for a single patch line.
//!
//! An atom line is the list of tokens of one object line of a patch,
//! as produced by splitting the patch text at `;` and whitespace.
//!
//! ```
//! use rat_numberbox::atom_line::AtomLine;
//!
//! let tokens = ["#X", "floatatom", "32", "48", "5", "0", "0", "0", "-", "-", "-;"];
//! let line = AtomLine::new(&tokens);
//!
//! assert_eq!(line.kind(), Some("floatatom"));
//! assert_eq!(line.int(3, "width").expect("width"), 5);
//! assert_eq!(line.symbol(7), None);
//! ```
//!

use crate::WidgetError;

/// Record prefix for object lines.
const RECORD_PREFIX: &str = "#X";

/// Borrowed view of the tokens of one patch line.
///
/// A leading `#X` record prefix and a trailing `;` are
/// not part of the line and are skipped.
#[derive(Debug)]
pub struct AtomLine<'a, S: AsRef<str>> {
    tokens: &'a [S],
}

impl<S: AsRef<str>> Clone for AtomLine<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: AsRef<str>> Copy for AtomLine<'_, S> {}

impl<'a, S: AsRef<str>> AtomLine<'a, S> {
    pub fn new(tokens: &'a [S]) -> Self {
        let mut tokens = tokens;
        if let Some(first) = tokens.first() {
            if first.as_ref() == RECORD_PREFIX {
                tokens = &tokens[1..];
            }
        }
        if let Some(last) = tokens.last() {
            if last.as_ref() == ";" {
                tokens = &tokens[..tokens.len() - 1];
            }
        }
        Self { tokens }
    }

    /// Number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Raw token. A `;` terminator glued to the last token is removed.
    pub fn token(&self, index: usize) -> Option<&'a str> {
        let tok = self.tokens.get(index)?.as_ref();
        if index + 1 == self.tokens.len() {
            Some(tok.strip_suffix(';').unwrap_or(tok))
        } else {
            Some(tok)
        }
    }

    /// Object type.
    #[inline]
    pub fn kind(&self) -> Option<&'a str> {
        self.token(0)
    }

    /// Required token.
    pub fn required(&self, index: usize, name: &'static str) -> Result<&'a str, WidgetError> {
        self.token(index)
            .ok_or(WidgetError::MissingToken { index, name })
    }

    /// Required integer field.
    ///
    /// Patch files write coordinates and sizes as plain integers,
    /// anything else is rejected.
    pub fn int(&self, index: usize, name: &'static str) -> Result<i64, WidgetError> {
        let tok = self.required(index, name)?;
        tok.parse::<i64>()
            .map_err(|_| WidgetError::InvalidNumber {
                index,
                name,
                token: tok.to_string(),
            })
    }

    /// Required float field.
    pub fn float(&self, index: usize, name: &'static str) -> Result<f64, WidgetError> {
        let tok = self.required(index, name)?;
        match tok.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(WidgetError::InvalidNumber {
                index,
                name,
                token: tok.to_string(),
            }),
        }
    }

    /// Optional float field. A missing token gives the default,
    /// a present but non-numeric token is still an error.
    pub fn float_or(
        &self,
        index: usize,
        name: &'static str,
        default: f64,
    ) -> Result<f64, WidgetError> {
        if index < self.len() {
            self.float(index, name)
        } else {
            Ok(default)
        }
    }

    /// Optional symbol field.
    ///
    /// Patch files write `-` or `empty` for an unset symbol,
    /// both map to None.
    pub fn symbol(&self, index: usize) -> Option<&'a str> {
        match self.token(index)? {
            "" | "-" | "empty" => None,
            v => Some(v),
        }
    }
}
