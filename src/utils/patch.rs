//! Partial update fields
//!
//! `Patch<T>` tells apart a field that was left out of a request body from a
//! field explicitly sent as `null`. Use it with `#[serde(default)]` so a
//! missing key deserializes to [`Patch::Unset`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Field absent: keep the stored value
    #[default]
    Unset,
    /// Field sent as `null`
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Resolve against a nullable stored value
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Unset => current,
            Patch::Null => None,
            Patch::Value(value) => Some(value),
        }
    }

    /// Resolve against a required stored value. Returns `None` when the
    /// request tried to null a non-nullable field.
    pub fn apply_required(self, current: T) -> Option<T> {
        match self {
            Patch::Unset => Some(current),
            Patch::Null => None,
            Patch::Value(value) => Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        notes: Patch<String>,
        #[serde(default)]
        liters: Patch<f64>,
    }

    #[test]
    fn test_missing_null_and_value_are_distinct() {
        let body: Body = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(body.notes, Patch::Null);
        assert_eq!(body.liters, Patch::Unset);

        let body: Body = serde_json::from_str(r#"{"notes": "highway", "liters": 41.5}"#).unwrap();
        assert_eq!(body.notes, Patch::Value("highway".to_string()));
        assert_eq!(body.liters.as_value(), Some(&41.5));
    }

    #[test]
    fn test_apply() {
        let stored = Some("old".to_string());
        assert_eq!(Patch::Unset.apply(stored.clone()), stored);
        assert_eq!(Patch::<String>::Null.apply(stored.clone()), None);
        assert_eq!(
            Patch::Value("new".to_string()).apply(stored),
            Some("new".to_string())
        );
    }

    #[test]
    fn test_apply_required() {
        assert_eq!(Patch::Unset.apply_required(10.0), Some(10.0));
        assert_eq!(Patch::Value(12.0).apply_required(10.0), Some(12.0));
        assert_eq!(Patch::<f64>::Null.apply_required(10.0), None);
    }
}
