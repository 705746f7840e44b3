#![doc = include_str!("../readme.md")]
//
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]

use format_num_pattern::NumberFmtError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod atom_line;
pub mod gui;
pub mod numberbox;

pub use format_num_pattern::Locale;

/// Errors when building a widget from an atom line.
#[allow(variant_size_differences)]
#[derive(Debug)]
#[non_exhaustive]
pub enum WidgetError {
    /// The gui has no parent area or unusable cell metrics.
    InvalidGui,
    /// The type token doesn't name a number box.
    UnknownKind(String),
    /// The line ends before a required field.
    MissingToken {
        /// Token index, counted after an optional `#X` prefix.
        index: usize,
        /// Field name.
        name: &'static str,
    },
    /// A field that must be numeric isn't.
    InvalidNumber {
        index: usize,
        name: &'static str,
        token: String,
    },
    /// Width below zero.
    NegativeWidth(i64),
    /// Invalid number pattern for the label formatter.
    Format(NumberFmtError),
}

impl Display for WidgetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetError::InvalidGui => write!(f, "gui is not attached to a parent area"),
            WidgetError::UnknownKind(kind) => write!(f, "unknown widget type '{}'", kind),
            WidgetError::MissingToken { index, name } => {
                write!(f, "missing {} at token {}", name, index)
            }
            WidgetError::InvalidNumber { index, name, token } => {
                write!(f, "invalid {} '{}' at token {}", name, token, index)
            }
            WidgetError::NegativeWidth(w) => write!(f, "negative width {}", w),
            WidgetError::Format(e) => write!(f, "{:?}", e),
        }
    }
}

impl Error for WidgetError {}

impl From<NumberFmtError> for WidgetError {
    fn from(value: NumberFmtError) -> Self {
        WidgetError::Format(value)
    }
}

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
