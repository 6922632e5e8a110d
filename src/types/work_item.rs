//! Work item type definitions
//!
//! Work item fields are an open-ended `System.*`/`Custom.*` map, so they
//! stay as JSON with accessors for the handful of fields reports need.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Represents a work item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: u64,

    /// Field reference name -> value (e.g. "System.Title")
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,

    /// Relations to other entities; present when fetched with
    /// `$expand=relations`
    #[serde(default)]
    pub relations: Vec<WorkItemRelation>,

    #[serde(default)]
    pub url: Option<String>,
}

impl WorkItem {
    fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn title(&self) -> &str {
        self.str_field("System.Title").unwrap_or("(untitled)")
    }

    pub fn state(&self) -> &str {
        self.str_field("System.State").unwrap_or("unknown")
    }

    pub fn work_item_type(&self) -> &str {
        self.str_field("System.WorkItemType").unwrap_or("Work Item")
    }

    pub fn assigned_to(&self) -> Option<&str> {
        // AssignedTo is an identity object in recent API versions and a
        // plain string in older ones
        match self.fields.get("System.AssignedTo") {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(Value::Object(o)) => o.get("displayName").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// A relation from one work item to another entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItemRelation {
    /// Relation type tag, e.g. `System.LinkTypes.Hierarchy-Forward`
    pub rel: String,

    /// URL of the referenced entity; the numeric id is its trailing segment
    pub url: String,

    #[serde(default)]
    pub attributes: Option<BTreeMap<String, Value>>,
}

/// One JSON-patch operation for work item create/update calls
#[derive(Debug, Clone, Serialize)]
pub struct PatchOp {
    pub op: &'static str,
    pub path: String,
    pub value: Value,
}

impl PatchOp {
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op: "add",
            path: path.into(),
            value: value.into(),
        }
    }

    /// Patch op that sets a `System.*` field
    pub fn add_field(name: &str, value: impl Into<Value>) -> Self {
        Self::add(format!("/fields/{}", name), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_accessors() {
        let item: WorkItem = serde_json::from_value(json!({
            "id": 42,
            "fields": {
                "System.Title": "Fix login",
                "System.State": "Active",
                "System.WorkItemType": "Bug",
                "System.AssignedTo": { "displayName": "Dana", "uniqueName": "dana@contoso.com" }
            }
        }))
        .unwrap();

        assert_eq!(item.title(), "Fix login");
        assert_eq!(item.state(), "Active");
        assert_eq!(item.work_item_type(), "Bug");
        assert_eq!(item.assigned_to(), Some("Dana"));
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let item: WorkItem = serde_json::from_value(json!({ "id": 7 })).unwrap();
        assert_eq!(item.title(), "(untitled)");
        assert_eq!(item.state(), "unknown");
        assert!(item.assigned_to().is_none());
        assert!(item.relations.is_empty());
    }

    #[test]
    fn test_patch_op_shape() {
        let op = PatchOp::add_field("System.Title", "New item");
        let v = serde_json::to_value(&op).unwrap();
        assert_eq!(
            v,
            json!({ "op": "add", "path": "/fields/System.Title", "value": "New item" })
        );
    }
}
