//! Non-fatal reports of the mapping engines.
//!
//! Mapping never fails: malformed input degrades to defaults. Situations worth
//! knowing about are reported as a [`Diagnostic`] to a [`DiagnosticSink`]. The
//! default sink `()` forwards them to `log::warn!`.

use alloc::string::String;
use alloc::vec::Vec;

use jm_value::JsonError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Diagnostic

/// A non-fatal event raised while mapping.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A top-level instance of a type that was never registered as mappable
    /// was serialized; the result is an empty object.
    #[error("`{type_path}` is not a mappable type, serialized as an empty object")]
    NotMappable { type_path: &'static str },
    /// The string payload of a string-encoded field is not valid JSON; the
    /// field keeps its default.
    #[error("cannot decode string-encoded field `{type_path}.{field}`, default kept: {error}")]
    InvalidEncodedString {
        type_path: &'static str,
        field: &'static str,
        error: JsonError,
    },
    /// A target type is not declared in the registry; the result is `null`.
    #[error("type `{type_path}` is not declared")]
    UnknownType { type_path: String },
}

// -----------------------------------------------------------------------------
// DiagnosticSink

/// A receiver of [`Diagnostic`]s.
///
/// # Examples
///
/// ```
/// use jm_model::diagnostics::{Diagnostic, DiagnosticSink};
///
/// let mut sink: Vec<Diagnostic> = Vec::new();
/// sink.report(Diagnostic::NotMappable { type_path: "Foo" });
///
/// assert_eq!(sink.len(), 1);
/// ```
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards to `log::warn!`.
impl DiagnosticSink for () {
    #[inline]
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
    }
}

/// Collects every report.
impl DiagnosticSink for Vec<Diagnostic> {
    #[inline]
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Drops every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl DiagnosticSink for Silent {
    #[inline]
    fn report(&mut self, _: Diagnostic) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    #[inline]
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
