//! The error taxonomy: a fixed tree of kinds, each spawning named
//! subtypes.
//!
//! Kinds and subtypes are process-wide constants created during
//! initialization (first touch of their `LazyLock` statics). Identifiers
//! are the stable contract between layers; duplicate registration is a
//! programming error and panics.

use std::collections::HashSet;
use std::fmt;
use std::sync::{LazyLock, Mutex, PoisonError};

use crate::error::Error;

static REGISTRY: LazyLock<Mutex<HashSet<&'static str>>> =
    LazyLock::new(|| Mutex::new(HashSet::new()));

fn register(id: &'static str) {
    let mut ids = REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if !ids.insert(id) {
        panic!("error taxonomy identifier registered twice: {id}");
    }
}

/// A coarse error category, a node in the taxonomy tree.
#[derive(Debug)]
pub struct Kind {
    id: &'static str,
    parent: Option<&'static Kind>,
}

impl Kind {
    /// Registers a root kind. Panics if `id` is already registered.
    pub fn new(id: &'static str) -> Self {
        register(id);
        Kind { id, parent: None }
    }

    /// Registers a kind nested under `parent`. Panics if `id` is already
    /// registered.
    pub fn new_child(id: &'static str, parent: &'static Kind) -> Self {
        register(id);
        Kind {
            id,
            parent: Some(parent),
        }
    }

    /// Registers a subtype under this kind. Subtype identifiers are
    /// dotted (`area.reason`) and globally unique; a duplicate panics.
    pub fn subtype(&'static self, id: &'static str) -> Subtype {
        register(id);
        Subtype { id, kind: self }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn parent(&self) -> Option<&'static Kind> {
        self.parent
    }

    /// True if `other` is this kind or one of its descendants.
    pub(crate) fn is_self_or_ancestor_of(&'static self, other: &'static Kind) -> bool {
        let mut current = Some(other);
        while let Some(kind) = current {
            if std::ptr::eq(kind, self) {
                return true;
            }
            current = kind.parent;
        }
        false
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

/// A classification under a [`Kind`], identified by a stable dotted
/// string. Modules hold subtypes in statics and match on them, never on
/// messages.
#[derive(Debug)]
pub struct Subtype {
    id: &'static str,
    kind: &'static Kind,
}

impl Subtype {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn kind(&self) -> &'static Kind {
        self.kind
    }

    /// Creates a fresh error classified by this subtype.
    pub fn error(&'static self, message: impl Into<String>) -> Error {
        Error::fresh(self, message.into())
    }

    /// Wraps an already-classified error, deliberately reclassifying it
    /// to this subtype.
    pub fn wrap(&'static self, cause: Error, message: impl Into<String>) -> Error {
        Error::wrapping(self, cause, message.into())
    }

    /// Wraps a foreign (non-taxonomy) error, capturing its rendering as
    /// the innermost cause.
    pub fn wrap_source(&'static self, source: impl fmt::Display, message: impl Into<String>) -> Error {
        Error::wrapping_source(self, source.to_string(), message.into())
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}
