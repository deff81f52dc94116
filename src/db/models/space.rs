use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw attribute map as held by the store. Items read back from the store are
/// returned to callers exactly as stored.
pub type Item = Map<String, Value>;

pub const FIELD_ID: &str = "id";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_WARD: &str = "ward";
pub const FIELD_PHOTO_URL: &str = "photoUrl";

/// Attributes a client may change through an update. `id` is never listed.
pub const UPDATABLE_FIELDS: [&str; 3] = [FIELD_LOCATION, FIELD_WARD, FIELD_PHOTO_URL];

// Space models
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: String,
    pub location: String,
    pub ward: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Space {
    pub fn to_item(&self) -> Item {
        let mut item = Item::new();
        item.insert(FIELD_ID.to_string(), Value::String(self.id.clone()));
        item.insert(
            FIELD_LOCATION.to_string(),
            Value::String(self.location.clone()),
        );
        item.insert(FIELD_WARD.to_string(), Value::String(self.ward.clone()));
        if let Some(ref url) = self.photo_url {
            item.insert(FIELD_PHOTO_URL.to_string(), Value::String(url.clone()));
        }
        item
    }
}

/// A Space record where any field may be missing: the candidate built on
/// create and the change set of an update both use this shape.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpaceDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl SpaceDraft {
    /// Keeps only the updatable attributes of a JSON body whose values are
    /// strings. Anything else, `id` included, is dropped.
    pub fn from_update_body(body: &Value) -> Self {
        let string_field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .map(|s| s.to_string())
        };

        Self {
            id: None,
            location: string_field(FIELD_LOCATION),
            ward: string_field(FIELD_WARD),
            photo_url: string_field(FIELD_PHOTO_URL),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.location.is_none()
            && self.ward.is_none()
            && self.photo_url.is_none()
    }

    /// Present attributes in the fixed order `location`, `ward`, `photoUrl`.
    /// `id` is deliberately absent: it is the key, not an attribute.
    pub fn changes(&self) -> Vec<(&'static str, &str)> {
        [
            (FIELD_LOCATION, self.location.as_deref()),
            (FIELD_WARD, self.ward.as_deref()),
            (FIELD_PHOTO_URL, self.photo_url.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    /// Converts a fully populated draft into a record. Returns `None` when a
    /// required field is missing.
    pub fn into_space(self) -> Option<Space> {
        Some(Space {
            id: self.id?,
            location: self.location?,
            ward: self.ward?,
            photo_url: self.photo_url,
        })
    }
}
