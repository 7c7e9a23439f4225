use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

pub type Id = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// A single field of a partial update.
///
/// Distinguishes a field that was left out of the payload from one that was
/// sent as an explicit `null` and from one that carries a value. Neither
/// `Absent` nor `Null` changes the target field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Overwrite `target` when a value was supplied.
    pub fn apply_to(&self, target: &mut T)
    where
        T: Clone,
    {
        if let Patch::Value(value) = self {
            *target = value.clone();
        }
    }
}

impl Patch<String> {
    /// Overwrite `target` only with a non-empty string.
    pub fn apply_non_empty(&self, target: &mut String) {
        if let Patch::Value(value) = self {
            if !value.is_empty() {
                *target = value.clone();
            }
        }
    }

    /// Overwrite a nullable text field with any supplied string, including `""`.
    pub fn apply_nullable(&self, target: &mut Option<String>) {
        if let Patch::Value(value) = self {
            *target = Some(value.clone());
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Value(value) => value.serialize(serializer),
            Patch::Absent | Patch::Null => serializer.serialize_none(),
        }
    }
}

// A missing field never reaches this impl: `#[serde(default)]` yields `Absent`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

/// Normalizes optional text on creation: an empty string is stored as absent.
pub fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|value| !value.is_empty()).cloned()
}
