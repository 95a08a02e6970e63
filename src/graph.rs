// Social-graph resource mirror. `Link` has one optional string per field
// of a Facebook Graph API link object and no behavior of its own; it
// exists to be filled by `serde_json` from an API response.

use serde::{Deserialize, Serialize};

/// A posted link. Unknown wire fields are ignored, missing ones stay
/// `None`, and `None` fields are left out when encoding.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Last update time, `updated_time` on the wire.
    #[serde(rename = "updated_time", default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renamed_field_alone_sets_only_updated() {
        let link: Link = serde_json::from_str(r#"{"updated_time":"2010-04-20T18:01:22+0000"}"#).unwrap();
        assert_eq!(
            link,
            Link {
                updated: Some("2010-04-20T18:01:22+0000".into()),
                ..Link::default()
            }
        );
    }

    #[test]
    fn local_name_is_not_a_wire_name() {
        let link: Link = serde_json::from_str(r#"{"updated":"yesterday"}"#).unwrap();
        assert_eq!(link, Link::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let link: Link = serde_json::from_value(json!({
            "id": "123_456",
            "link": "http://example.com/",
            "picture": "http://example.com/p.png",
            "likes": {"count": 3}
        }))
        .unwrap();
        assert_eq!(link.id.as_deref(), Some("123_456"));
        assert_eq!(link.link.as_deref(), Some("http://example.com/"));
        assert!(link.name.is_none());
        assert!(link.updated.is_none());
    }

    #[test]
    fn encode_omits_unset_fields_and_uses_wire_names() {
        let link = Link {
            name: Some("Rust".into()),
            updated: Some("now".into()),
            ..Link::default()
        };
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({"name": "Rust", "updated_time": "now"})
        );
        assert_eq!(serde_json::to_string(&Link::default()).unwrap(), "{}");
    }
}
