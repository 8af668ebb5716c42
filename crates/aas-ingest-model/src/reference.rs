//! References and keys.

use crate::kinds::{KeyType, ReferenceType};
use serde::Serialize;

/// One step of a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Key {
    /// What the key points to
    #[serde(rename = "type")]
    pub key_type: KeyType,
    /// Identifier (for identifiables) or idShort (for referables)
    pub value: String,
}

impl Key {
    /// Create a new key.
    #[must_use]
    pub fn new(key_type: KeyType, value: impl Into<String>) -> Self {
        Self {
            key_type,
            value: value.into(),
        }
    }
}

/// A typed pointer into the repository or to an external resource.
///
/// A constructed reference always has at least one key and every key has a
/// non-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    #[serde(rename = "type")]
    reference_type: ReferenceType,
    keys: Vec<Key>,
}

impl Reference {
    /// Create a reference, enforcing the non-empty key invariant.
    ///
    /// # Errors
    ///
    /// Returns error if `keys` is empty or a key has an empty value.
    pub fn try_new(reference_type: ReferenceType, keys: Vec<Key>) -> Result<Self, ReferenceError> {
        if keys.is_empty() {
            return Err(ReferenceError::NoKeys);
        }
        if let Some(index) = keys.iter().position(|k| k.value.trim().is_empty()) {
            return Err(ReferenceError::EmptyKeyValue { index });
        }
        Ok(Self {
            reference_type,
            keys,
        })
    }

    /// Single-key model reference to an identifiable.
    ///
    /// # Errors
    ///
    /// Returns error if `id` is empty.
    pub fn to_identifiable(key_type: KeyType, id: impl Into<String>) -> Result<Self, ReferenceError> {
        Self::try_new(ReferenceType::ModelReference, vec![Key::new(key_type, id)])
    }

    /// Single-key external reference to a global identifier.
    ///
    /// # Errors
    ///
    /// Returns error if `id` is empty.
    pub fn global(id: impl Into<String>) -> Result<Self, ReferenceError> {
        Self::try_new(
            ReferenceType::ExternalReference,
            vec![Key::new(KeyType::GlobalReference, id)],
        )
    }

    /// Model or external.
    #[must_use]
    pub fn reference_type(&self) -> ReferenceType {
        self.reference_type
    }

    /// The ordered, non-empty key list.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// The first key; always present.
    #[must_use]
    pub fn first_key(&self) -> &Key {
        &self.keys[0]
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = self
            .keys
            .iter()
            .map(|k| format!("({}){}", k.key_type, k.value))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}: {}]", self.reference_type, keys)
    }
}

/// Reasons a reference cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// A reference needs at least one key
    #[error("reference has no keys")]
    NoKeys,
    /// A key value is empty
    #[error("key {index} has an empty value")]
    EmptyKeyValue {
        /// Position of the offending key
        index: usize,
    },
}
