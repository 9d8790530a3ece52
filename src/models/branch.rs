use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use super::lenient::Scalar;

/// Branch identifier as sent by the backend. Numeric and string ids compare
/// by their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BranchId(String);

impl BranchId {
    pub fn new(id: impl Into<String>) -> Self {
        BranchId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BranchId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // only canonical integers go back as numbers; "007" or "+5" must keep their text
        match self.0.parse::<i64>() {
            Ok(numeric) if numeric.to_string() == self.0 => serializer.serialize_i64(numeric),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for BranchId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Scalar::deserialize(deserializer).map(|Scalar(id)| BranchId::new(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub id: BranchId,
    pub street_name: String,
}

#[derive(Deserialize)]
struct WireBranch {
    #[serde(rename = "BPLId")]
    id: BranchId,
    #[serde(rename = "Street", default)]
    street: Option<String>,
}

/// Reads the `/sucursalesClient` payload. Anything that is not a list counts
/// as no branches; entries without a usable `BPLId` are skipped.
pub fn parse_branches(payload: Value) -> Vec<Branch> {
    let Value::Array(items) = payload else {
        warn!("branch list payload is not an array, ignoring it");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<WireBranch>(item) {
            Ok(wire) => Some(Branch {
                id: wire.id,
                street_name: wire.street.unwrap_or_default(),
            }),
            Err(e) => {
                warn!("skipping malformed branch entry: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numeric_and_string_ids() {
        let branches = parse_branches(json!([
            {"BPLId": 1, "Street": "Main"},
            {"BPLId": "7", "Street": "Santiago 485"},
        ]));

        assert_eq!(
            branches,
            vec![
                Branch { id: BranchId::new("1"), street_name: "Main".into() },
                Branch { id: BranchId::new("7"), street_name: "Santiago 485".into() },
            ]
        );
    }

    #[test]
    fn skips_entries_without_an_id() {
        let branches = parse_branches(json!([
            {"Street": "Nowhere"},
            {"BPLId": null, "Street": "Null"},
            {"BPLId": 3},
        ]));

        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].id.as_str(), "3");
        assert_eq!(branches[0].street_name, "");
    }

    #[test]
    fn non_list_payload_means_no_branches() {
        assert!(parse_branches(json!({"error": "boom"})).is_empty());
        assert!(parse_branches(Value::Null).is_empty());
    }

    #[test]
    fn numeric_ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_value(BranchId::new("12")).unwrap(), json!(12));
        assert_eq!(serde_json::to_value(BranchId::new("A-1")).unwrap(), json!("A-1"));
    }

    #[test]
    fn non_canonical_numeric_ids_keep_their_text() {
        let branches = parse_branches(json!([
            {"BPLId": "007"},
            {"BPLId": "+5"},
            {"BPLId": -3},
        ]));

        let ids: Vec<Value> = branches
            .iter()
            .map(|b| serde_json::to_value(&b.id).unwrap())
            .collect();
        assert_eq!(ids, vec![json!("007"), json!("+5"), json!(-3)]);
    }
}
