use super::identifier::Identifier;
use serde::Serialize;

/// A card and the name shown when it taps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    #[serde(serialize_with = "serialize_identifier")]
    pub identifier: Identifier,
    pub display_name: String,
}

impl Identity {
    /// New identity whose display name defaults to the identifier itself.
    pub fn new(identifier: Identifier) -> Self {
        let display_name = identifier.to_string();
        Self {
            identifier,
            display_name,
        }
    }

    /// True until the owner picks a name of their own.
    pub fn has_default_name(&self) -> bool {
        self.display_name == self.identifier.as_str()
    }
}

fn serialize_identifier<S: serde::Serializer>(id: &Identifier, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(id.as_str())
}
