/////////////////////////////////////////////////////////////////////////////////////
//
// Epitools - epidemic model utilities
//
// registry module
//
// case insensitive name registry for model components
//
////////////////////////////////////////////////////////////////////////////////////

use std::collections::HashMap;
use std::error;
use std::fmt;

/// Name -> value store with case-insensitive lookup. Names are folded to
/// lower case on the way in, so "Foo", "FOO" and "foo" address the same
/// entry. Re-registering a name overwrites silently.
#[derive(Debug)]
pub struct Registry<V> {
    entries: HashMap<String, V>,
}

impl<V> Registry<V> {
    pub fn new() -> Registry<V> {
        Registry {
            entries: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, value: V) {
        self.entries.insert(name.to_lowercase(), value);
    }

    pub fn get(&self, name: &str) -> Result<&V, RegistryError> {
        self.entries
            .get(&name.to_lowercase())
            .ok_or_else(|| RegistryError::KeyNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for Registry<V> {
    fn default() -> Registry<V> {
        Registry::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    KeyNotFound(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegistryError::KeyNotFound(name) => {
                write!(f, "no entry registered under '{}'", name)
            }
        }
    }
}

impl error::Error for RegistryError {}
