use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Separator between the first and last name in a guest id.
pub const ID_SEPARATOR: char = ':';

/// A single invitee.
///
/// The id is never stored: it is always derived from `name` and `last_name`
/// as `name:last_name`, so two guests with the same names share an id no
/// matter what their `plus_one` flag says.
///
/// Deserializing accepts `{name, last_name, plus_one}` with every field
/// optional; an incoming `id` is ignored. Serializing always emits the
/// derived `id` alongside the source fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Guest {
    name: String,
    last_name: String,
    plus_one: bool,
}

impl Guest {
    /// Create a guest without a plus-one.
    pub fn new(name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
            plus_one: false,
        }
    }

    /// Set whether the guest brings a plus-one.
    pub fn with_plus_one(mut self, plus_one: bool) -> Self {
        self.plus_one = plus_one;
        self
    }

    /// The derived identity, `name:last_name`.
    pub fn id(&self) -> String {
        format!("{}{ID_SEPARATOR}{}", self.name, self.last_name)
    }

    /// Check the derived identity against `id` without allocating.
    pub fn has_id(&self, id: &str) -> bool {
        id.strip_prefix(self.name.as_str())
            .and_then(|rest| rest.strip_prefix(ID_SEPARATOR))
            .is_some_and(|rest| rest == self.last_name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn plus_one(&self) -> bool {
        self.plus_one
    }
}

impl Serialize for Guest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Guest", 4)?;
        state.serialize_field("id", &self.id())?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("last_name", &self.last_name)?;
        state.serialize_field("plus_one", &self.plus_one)?;
        state.end()
    }
}

impl fmt::Display for Guest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.last_name)?;
        if self.plus_one {
            write!(f, " (+1)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn id_joins_names_with_colon() {
        assert_eq!(Guest::new("Ignacio", "Vaquero").id(), "Ignacio:Vaquero");
        assert_eq!(Guest::new("Ignacio", "").id(), "Ignacio:");
        assert_eq!(Guest::new("", "Vaquero").with_plus_one(true).id(), ":Vaquero");
        assert_eq!(Guest::new("", "").with_plus_one(true).id(), ":");
    }

    #[test]
    fn plus_one_defaults_to_false() {
        assert!(!Guest::new("Ignacio", "Vaquero").plus_one());
        assert!(Guest::new("Ignacio", "Vaquero").with_plus_one(true).plus_one());
    }

    #[test]
    fn plus_one_does_not_affect_identity() {
        let a = Guest::new("Jaime", "Vaquero");
        let b = Guest::new("Jaime", "Vaquero").with_plus_one(true);
        assert_eq!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn has_id_handles_separator_inside_names() {
        let g = Guest::new("a:b", "c");
        assert!(g.has_id("a:b:c"));
        assert!(!g.has_id("a:b"));
        assert!(!g.has_id("a:bc"));
        assert!(!Guest::new("a", "b:c").has_id("a:b"));
    }

    #[test]
    fn serializes_with_derived_id() {
        let g = Guest::new("Ignacio", "Vaquero").with_plus_one(true);
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "Ignacio:Vaquero",
                "name": "Ignacio",
                "last_name": "Vaquero",
                "plus_one": true,
            })
        );
    }

    #[test]
    fn deserialize_fills_defaults_and_ignores_id() {
        let g: Guest = serde_json::from_str(r#"{"id": "forged", "name": "Jaime"}"#).unwrap();
        assert_eq!(g, Guest::new("Jaime", ""));
        assert_eq!(g.id(), "Jaime:");
    }

    #[test]
    fn display_marks_plus_one() {
        assert_eq!(Guest::new("Jaime", "Vaquero").to_string(), "Jaime Vaquero");
        assert_eq!(
            Guest::new("Jaime", "Vaquero").with_plus_one(true).to_string(),
            "Jaime Vaquero (+1)"
        );
    }

    proptest! {
        #[test]
        fn id_is_concatenation(name in ".*", last_name in ".*", plus_one in any::<bool>()) {
            let g = Guest::new(name.clone(), last_name.clone()).with_plus_one(plus_one);
            prop_assert_eq!(g.id(), format!("{name}:{last_name}"));
            prop_assert!(g.has_id(&g.id()));
        }
    }
}
