//! Read access to the environment Kakoune exports to a `%sh{}` block.
//!
//! The process environment is the import side of the Variable Bridge. It is
//! abstracted behind [`Env`] so dispatch can be driven from an in-memory map
//! in tests and by embedders.

use std::collections::BTreeMap;

use crate::vars::Var;

/// Source of environment values
pub trait Env {
    /// Value stored under `key`, or `None` if the key is not set.
    ///
    /// An empty string is a set value and is returned as `Some("")`.
    fn get(&self, key: &str) -> Option<String>;

    /// Value of a bridged variable
    fn var(&self, var: &Var) -> Option<String> {
        self.get(&var.env_key())
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Buffer contents are not guaranteed to be UTF-8
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }
}

/// In-memory environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    values: BTreeMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`MapEnv::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set the key a bridged variable is read from
    pub fn with_var(self, var: &Var, value: impl Into<String>) -> Self {
        self.with(var.env_key(), value)
    }
}

impl Env for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MapEnv {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
