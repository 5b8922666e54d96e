//! Record keys: string names and identity-compared symbols.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A unique token usable as a record key.
///
/// Two symbols are equal only when they are clones of the same
/// [`Symbol::new`] call, regardless of their descriptions.
///
/// # Examples
///
/// ```
/// use deepmerge::Symbol;
///
/// let a = Symbol::new("tag");
/// let b = Symbol::new("tag");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Clone)]
pub struct Symbol(Arc<SymbolInner>);

struct SymbolInner {
    description: Option<String>,
}

impl Symbol {
    /// Create a fresh symbol carrying `description` for diagnostics.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self(Arc::new(SymbolInner {
            description: Some(description.into()),
        }))
    }

    /// Create a fresh symbol without a description.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Arc::new(SymbolInner { description: None }))
    }

    /// Returns the description supplied at construction, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).addr()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

/// Key of a [`crate::Record`] entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// An ordinary string property name.
    Name(String),
    /// A symbol property.
    Symbol(Symbol),
}

impl Key {
    /// Returns the string name when this is a named key.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Symbol(_) => None,
        }
    }

    /// Returns `true` for symbol keys.
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Symbol(symbol) => {
                write!(f, "Symbol({})", symbol.description().unwrap_or_default())
            }
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Symbol> for Key {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<&Symbol> for Key {
    fn from(symbol: &Symbol) -> Self {
        Self::Symbol(symbol.clone())
    }
}
