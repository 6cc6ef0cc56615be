//! The Tutorial record and the payloads derived from it.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned identifier for a persisted tutorial.
///
/// Opaque to the client: it keeps whatever JSON shape the backend sent
/// (any JSON number or string) so it can be echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TutorialId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for TutorialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TutorialId::Number(n) => write!(f, "{n}"),
            TutorialId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TutorialId {
    fn from(value: u64) -> Self {
        TutorialId::Number(value.into())
    }
}

impl From<String> for TutorialId {
    fn from(value: String) -> Self {
        TutorialId::Text(value)
    }
}

impl From<&str> for TutorialId {
    fn from(value: &str) -> Self {
        TutorialId::Text(value.to_string())
    }
}

/// A tutorial record. Without an `id` it is a draft that has not been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TutorialId>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_flag")]
    pub published: bool,
}

impl Tutorial {
    pub fn draft(
        title: impl Into<String>,
        description: impl Into<String>,
        published: bool,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            published,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    /// Body for a create request; never carries the id.
    pub fn payload(&self) -> TutorialPayload {
        TutorialPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            published: self.published,
        }
    }
}

/// Create request body: `{title, description, published}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published: bool,
}

fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_tutorial_is_empty_draft() {
        let tutorial = Tutorial::default();
        assert!(tutorial.is_draft());
        assert_eq!(tutorial.title, "");
        assert_eq!(tutorial.description, "");
        assert!(!tutorial.published);
    }

    #[test]
    fn id_keeps_its_wire_shape() {
        let numeric: Tutorial =
            serde_json::from_value(json!({"id": 1, "title": "Tutorial 1"})).unwrap();
        assert_eq!(numeric.id, Some(TutorialId::from(1u64)));
        assert_eq!(serde_json::to_value(&numeric).unwrap()["id"], json!(1));

        let text: Tutorial =
            serde_json::from_value(json!({"id": "1", "title": "Tutorial 1"})).unwrap();
        assert_eq!(text.id, Some(TutorialId::from("1")));
        assert_eq!(serde_json::to_value(&text).unwrap()["id"], json!("1"));
    }

    #[test]
    fn signed_and_fractional_ids_are_echoed_back() {
        for raw in [json!(-4), json!(2.5)] {
            let tutorial: Tutorial =
                serde_json::from_value(json!({"id": raw.clone(), "title": "T"})).unwrap();
            let id = tutorial.id.clone().unwrap();
            assert_eq!(id.to_string(), raw.to_string());
            assert_eq!(serde_json::to_value(&tutorial).unwrap()["id"], raw);
        }
    }

    #[test]
    fn missing_and_null_fields_fall_back_to_defaults() {
        let tutorial: Tutorial =
            serde_json::from_value(json!({"id": 7, "title": "T", "description": null})).unwrap();
        assert_eq!(tutorial.description, "");
        assert!(!tutorial.published);

        let tutorial: Tutorial =
            serde_json::from_value(json!({"id": 8, "title": null, "published": null})).unwrap();
        assert_eq!(tutorial.title, "");
        assert!(!tutorial.published);
    }

    #[test]
    fn payload_never_carries_an_id() {
        let tutorial = Tutorial {
            id: Some(TutorialId::from("1337")),
            ..Tutorial::draft("Test Title", "Test Description", true)
        };
        let body = serde_json::to_value(tutorial.payload()).unwrap();
        assert_eq!(
            body,
            json!({"title": "Test Title", "description": "Test Description", "published": true})
        );
    }

    #[test]
    fn draft_serializes_without_id_field() {
        let body = serde_json::to_value(Tutorial::default()).unwrap();
        assert!(body.get("id").is_none());
    }
}
