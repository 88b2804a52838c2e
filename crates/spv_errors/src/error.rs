//! The error value: a classified, immutable failure description.
//!
//! An [`Error`] carries its [`Subtype`], a message, an optional cause and
//! optional structured properties. Wrapping never mutates the wrapped
//! value; every constructor returns a fresh error whose cause is the
//! previous one, so chains are acyclic by construction.

use std::fmt;

use crate::property::{PropertyKey, PropertyType, PropertyValue};
use crate::taxonomy::{Kind, Subtype};

/// Rendering walks at most this many layers before emitting a truncation
/// marker.
pub const MAX_CHAIN_DEPTH: usize = 32;

/// A classified error.
#[derive(Clone, Debug)]
pub struct Error {
    subtype: &'static Subtype,
    message: String,
    cause: Option<Box<Cause>>,
    properties: Vec<(&'static str, PropertyValue)>,
}

#[derive(Clone, Debug)]
enum Cause {
    /// Another classified error from a lower layer.
    Classified(Error),
    /// The rendering of a foreign error (database driver, IO, ...).
    External(String),
}

impl Error {
    pub(crate) fn fresh(subtype: &'static Subtype, message: String) -> Self {
        Error {
            subtype,
            message,
            cause: None,
            properties: Vec::new(),
        }
    }

    pub(crate) fn wrapping(subtype: &'static Subtype, cause: Error, message: String) -> Self {
        Error {
            subtype,
            message,
            cause: Some(Box::new(Cause::Classified(cause))),
            properties: Vec::new(),
        }
    }

    pub(crate) fn wrapping_source(
        subtype: &'static Subtype,
        source: String,
        message: String,
    ) -> Self {
        Error {
            subtype,
            message,
            cause: Some(Box::new(Cause::External(source))),
            properties: Vec::new(),
        }
    }

    /// Wraps `cause` with an additional message layer while keeping its
    /// classification: the new error reports the cause's subtype.
    pub fn decorate(cause: Error, message: impl Into<String>) -> Self {
        let subtype = cause.subtype;
        Error {
            subtype,
            message: message.into(),
            cause: Some(Box::new(Cause::Classified(cause))),
            properties: Vec::new(),
        }
    }

    /// The effective subtype used for routing decisions.
    pub fn subtype(&self) -> &'static Subtype {
        self.subtype
    }

    pub fn kind(&self) -> &'static Kind {
        self.subtype.kind()
    }

    /// The message of this layer (the outermost one when wrapped).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True iff the effective subtype's kind is `kind` or one of its
    /// descendants.
    pub fn is_of_kind(&self, kind: &'static Kind) -> bool {
        kind.is_self_or_ancestor_of(self.subtype.kind())
    }

    /// Exact subtype identity; transparent through decoration.
    pub fn is_of_subtype(&self, subtype: &'static Subtype) -> bool {
        std::ptr::eq(self.subtype, subtype)
    }

    /// The directly wrapped classified error, if any.
    pub fn cause(&self) -> Option<&Error> {
        match self.cause.as_deref() {
            Some(Cause::Classified(error)) => Some(error),
            _ => None,
        }
    }

    /// The rendering of a wrapped foreign error, if this layer captured
    /// one.
    pub fn source_message(&self) -> Option<&str> {
        match self.cause.as_deref() {
            Some(Cause::External(source)) => Some(source),
            _ => None,
        }
    }

    /// The innermost classified error in the chain.
    pub fn root(&self) -> &Error {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Iterates the classified layers, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: Some(self),
        }
    }

    /// Returns a new error with the property attached. A later write to
    /// the same key on the same layer replaces the earlier one.
    #[must_use]
    pub fn with_property<T: PropertyType>(
        mut self,
        key: PropertyKey<T>,
        value: impl Into<T>,
    ) -> Self {
        let value = value.into().into_value();
        match self
            .properties
            .iter_mut()
            .find(|(name, _)| *name == key.name())
        {
            Some(entry) => entry.1 = value,
            None => self.properties.push((key.name(), value)),
        }
        self
    }

    /// Typed property lookup, searching outward-in through the chain so
    /// a decorating layer can override (or inherit) the cause's
    /// properties.
    pub fn property<T: PropertyType>(&self, key: PropertyKey<T>) -> Option<T> {
        self.chain().find_map(|layer| {
            layer
                .properties
                .iter()
                .find(|(name, _)| *name == key.name())
                .and_then(|(_, value)| T::from_value(value))
        })
    }

    /// Properties of this layer only.
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &PropertyValue)> {
        self.properties.iter().map(|(name, value)| (*name, value))
    }

    /// Multi-line rendering for operator logs: innermost entry first,
    /// each annotated with its subtype id and properties. Never exposed
    /// to clients.
    pub fn log_format(&self) -> LogChain<'_> {
        LogChain(self)
    }

    fn fmt_layer(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subtype.id(), self.message)?;
        if !self.properties.is_empty() {
            f.write_str(" {")?;
            for (index, (name, value)) in self.properties.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}: {value}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// Iterator over the classified layers of an error, outermost first.
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = self;
        for depth in 0.. {
            if depth > 0 {
                f.write_str(", cause: ")?;
            }
            if depth == MAX_CHAIN_DEPTH {
                return f.write_str("... (chain truncated)");
            }
            current.fmt_layer(f)?;
            match current.cause.as_deref() {
                Some(Cause::Classified(next)) => current = next,
                Some(Cause::External(source)) => {
                    return write!(f, ", cause: {source}");
                }
                None => return Ok(()),
            }
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// Display adapter produced by [`Error::log_format`].
pub struct LogChain<'a>(&'a Error);

impl fmt::Display for LogChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut layers = Vec::new();
        let mut current = Some(self.0);
        while let Some(error) = current {
            if layers.len() == MAX_CHAIN_DEPTH {
                break;
            }
            layers.push(error);
            current = error.cause();
        }
        let truncated = current.is_some();

        let mut first = true;
        let line = |f: &mut fmt::Formatter<'_>, first: &mut bool| -> fmt::Result {
            if !*first {
                f.write_str("\n")?;
            }
            *first = false;
            Ok(())
        };

        if truncated {
            line(f, &mut first)?;
            f.write_str("... (chain truncated)")?;
        } else if let Some(source) = layers.last().and_then(|error| error.source_message()) {
            line(f, &mut first)?;
            write!(f, "source: {source}")?;
        }
        for error in layers.iter().rev() {
            line(f, &mut first)?;
            error.fmt_layer(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use crate::property::{CODE, STATUS_CODE};
    use crate::taxonomy::{Kind, Subtype};
    use crate::{DATA_UNAVAILABLE, ILLEGAL_ARGUMENT, INTERNAL_ERROR};

    use super::*;

    static DB_FAILED: LazyLock<Subtype> =
        LazyLock::new(|| INTERNAL_ERROR.subtype("error_test.db_failed"));
    static BAD_INPUT: LazyLock<Subtype> =
        LazyLock::new(|| ILLEGAL_ARGUMENT.subtype("error_test.bad_input"));
    static MISSING: LazyLock<Subtype> =
        LazyLock::new(|| DATA_UNAVAILABLE.subtype("error_test.missing"));

    #[test]
    fn fresh_error_classification() {
        let err = BAD_INPUT.error("value out of range");
        assert!(err.is_of_subtype(&BAD_INPUT));
        assert!(err.is_of_kind(&ILLEGAL_ARGUMENT));
        assert!(!err.is_of_kind(&INTERNAL_ERROR));
        assert_eq!(err.message(), "value out of range");
        assert!(err.cause().is_none());
    }

    #[test]
    fn decorate_preserves_classification() {
        let inner = DB_FAILED.error("connection reset");
        let outer = Error::decorate(inner, "loading keys failed");

        assert!(outer.is_of_subtype(&DB_FAILED));
        assert!(outer.is_of_kind(&INTERNAL_ERROR));
        assert_eq!(outer.message(), "loading keys failed");
        assert_eq!(outer.cause().map(Error::message), Some("connection reset"));
    }

    #[test]
    fn wrap_reclassifies_but_keeps_root() {
        let inner = MISSING.error("row absent");
        let outer = DB_FAILED.wrap(inner, "lookup failed");

        assert!(outer.is_of_subtype(&DB_FAILED));
        assert!(!outer.is_of_subtype(&MISSING));
        assert_eq!(outer.root().message(), "row absent");
        assert!(outer.root().is_of_subtype(&MISSING));
    }

    #[test]
    fn wrap_source_keeps_foreign_rendering() {
        let err = DB_FAILED.wrap_source("no such table: users", "query failed");
        assert_eq!(err.source_message(), Some("no such table: users"));
        assert!(err.cause().is_none());
        assert_eq!(err.root().message(), "query failed");
    }

    #[test]
    fn cause_walk_matches_wrap_count() {
        let mut err = BAD_INPUT.error("origin");
        for layer in 0..5 {
            err = Error::decorate(err, format!("layer {layer}"));
        }

        let mut current = Some(&err);
        for _ in 0..5 {
            current = current.and_then(Error::cause);
            assert!(current.is_some());
        }
        assert_eq!(current.map(Error::message), Some("origin"));
        assert!(current.and_then(Error::cause).is_none());
    }

    #[test]
    fn property_last_write_wins() {
        let err = BAD_INPUT
            .error("nope")
            .with_property(STATUS_CODE, 400u16)
            .with_property(STATUS_CODE, 422u16);
        assert_eq!(err.property(STATUS_CODE), Some(422));
    }

    #[test]
    fn property_lookup_walks_the_chain() {
        let inner = BAD_INPUT
            .error("nope")
            .with_property(CODE, "error-inner")
            .with_property(STATUS_CODE, 400u16);
        let outer = Error::decorate(inner, "request rejected").with_property(CODE, "error-outer");

        // The outermost layer wins for code; status is inherited.
        assert_eq!(outer.property(CODE).as_deref(), Some("error-outer"));
        assert_eq!(outer.property(STATUS_CODE), Some(400));
    }

    #[test]
    fn display_renders_innermost_last() {
        let inner = DB_FAILED.wrap_source("disk gone", "query failed");
        let outer = Error::decorate(inner, "searching failed");

        assert_eq!(
            outer.to_string(),
            "error_test.db_failed: searching failed, \
             cause: error_test.db_failed: query failed, cause: disk gone"
        );
    }

    #[test]
    fn display_includes_properties() {
        let err = BAD_INPUT
            .error("nope")
            .with_property(STATUS_CODE, 400u16)
            .with_property(CODE, "error-nope");
        assert_eq!(
            err.to_string(),
            "error_test.bad_input: nope {status_code: 400, code: error-nope}"
        );
    }

    #[test]
    fn display_truncates_deep_chains() {
        let mut err = BAD_INPUT.error("origin");
        for layer in 0..40 {
            err = Error::decorate(err, format!("layer {layer}"));
        }
        let rendered = err.to_string();
        assert!(rendered.ends_with("... (chain truncated)"));
        assert_eq!(rendered.matches("cause:").count(), MAX_CHAIN_DEPTH);
    }

    #[test]
    fn log_format_renders_innermost_first() {
        let inner = DB_FAILED.wrap_source("disk gone", "query failed");
        let outer = Error::decorate(inner, "searching failed");

        let rendered = outer.log_format().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "source: disk gone",
                "error_test.db_failed: query failed",
                "error_test.db_failed: searching failed",
            ]
        );
    }

    #[test]
    fn std_error_source_exposes_cause() {
        let inner = MISSING.error("row absent");
        let outer = DB_FAILED.wrap(inner, "lookup failed");
        let source = std::error::Error::source(&outer).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("error_test.missing: row absent"));
    }

    #[test]
    fn decorated_error_stays_shareable() {
        static SHARED: LazyLock<Kind> = LazyLock::new(|| Kind::new("error_test_shared"));
        static SHARED_SUBTYPE: LazyLock<Subtype> =
            LazyLock::new(|| SHARED.subtype("error_test.shared"));
        static PRESET: LazyLock<Error> = LazyLock::new(|| {
            SHARED_SUBTYPE
                .error("preset failure")
                .with_property(CODE, "error-preset")
        });

        let decorated = Error::decorate(PRESET.clone(), "while deleting");
        assert_eq!(decorated.property(CODE).as_deref(), Some("error-preset"));
        // The shared constant is untouched.
        assert_eq!(PRESET.message(), "preset failure");
        assert!(PRESET.cause().is_none());
    }
}
