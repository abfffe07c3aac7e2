//! Structured items: the uniform output record every source emits, plus
//! the mapper that builds one from a completed command run.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::execution::{trim_trailing_newline, ExecutionOutcome};
use crate::spec::CommandSpec;

/// Item type emitted by the command source.
pub const ITEM_TYPE: &str = "command";

/// Attribute that uniquely keys a command item.
pub const UNIQUE_ATTRIBUTE: &str = "name";

/// Item type of the cross-referenced executable/script resource.
pub const FILE_ITEM_TYPE: &str = "file";

/// Method used when following a linked item query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMethod {
    /// Fetch one item by its unique key.
    Get,
    /// Run a structured query.
    Search,
    /// Enumerate everything.
    Find,
}

/// A pointer from one item to another resource, resolvable by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemQuery {
    /// Type of the referenced item.
    #[serde(rename = "type")]
    pub item_type: String,
    /// How to resolve the reference.
    pub method: QueryMethod,
    /// Query string, interpreted per the target source.
    pub query: String,
    /// Context the reference lives in.
    pub context: String,
}

/// The structured record a source hands back to the hosting engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Item type (e.g. `"command"`).
    #[serde(rename = "type")]
    pub item_type: String,
    /// Name of the attribute that uniquely keys this item.
    pub unique_attribute: String,
    /// Context this item was discovered in.
    pub context: String,
    /// Typed attribute map.
    pub attributes: Map<String, Value>,
    /// Cross-references to related resources.
    pub linked_item_queries: Vec<ItemQuery>,
}

impl Item {
    /// The value of the unique attribute, when it is a string.
    pub fn unique_key(&self) -> Option<&str> {
        self.attributes
            .get(&self.unique_attribute)
            .and_then(Value::as_str)
    }

    /// Fetch a string attribute by name.
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }
}

/// Map a completed execution into the adapter's output record.
///
/// Exactly one trailing platform newline is stripped from each captured
/// stream, and the item always carries one cross-reference to the
/// underlying `file` resource so a caller-side graph can connect the
/// result back to the binary or script that produced it.
pub fn map_outcome(
    spec: &CommandSpec,
    exit_code: i32,
    outcome: &ExecutionOutcome,
    context: &str,
    newline: &str,
) -> Item {
    let mut attributes = Map::new();
    attributes.insert("name".to_string(), json!(spec.command));
    attributes.insert("args".to_string(), json!(spec.args));
    attributes.insert("exitCode".to_string(), json!(exit_code));
    attributes.insert(
        "stdout".to_string(),
        json!(trim_trailing_newline(&outcome.stdout_lossy(), newline)),
    );
    attributes.insert(
        "stderr".to_string(),
        json!(trim_trailing_newline(&outcome.stderr_lossy(), newline)),
    );

    Item {
        item_type: ITEM_TYPE.to_string(),
        unique_attribute: UNIQUE_ATTRIBUTE.to_string(),
        context: context.to_string(),
        attributes,
        linked_item_queries: vec![ItemQuery {
            item_type: FILE_ITEM_TYPE.to_string(),
            method: QueryMethod::Get,
            query: spec.command.clone(),
            context: context.to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::OutcomeStatus;

    fn outcome(stdout: &[u8], stderr: &[u8]) -> ExecutionOutcome {
        ExecutionOutcome {
            stdout: stdout.to_vec(),
            stderr: stderr.to_vec(),
            status: OutcomeStatus::Exited(0),
        }
    }

    #[test]
    fn test_map_outcome_attributes() {
        let spec = CommandSpec::new("echo").arg("qwerty");
        let item = map_outcome(&spec, 0, &outcome(b"qwerty\n", b""), "somehost", "\n");

        assert_eq!(item.item_type, "command");
        assert_eq!(item.unique_attribute, "name");
        assert_eq!(item.context, "somehost");
        assert_eq!(item.unique_key(), Some("echo"));
        assert_eq!(item.attribute_str("stdout"), Some("qwerty"));
        assert_eq!(item.attribute_str("stderr"), Some(""));
        assert_eq!(item.attributes["exitCode"], 0);
        assert_eq!(item.attributes["args"], json!(["qwerty"]));
    }

    #[test]
    fn test_map_outcome_links_underlying_file() {
        let spec = CommandSpec::new("cat /etc/hosts");
        let item = map_outcome(&spec, 0, &outcome(b"", b""), "somehost", "\n");

        assert_eq!(item.linked_item_queries.len(), 1);
        let link = &item.linked_item_queries[0];
        assert_eq!(link.item_type, "file");
        assert_eq!(link.method, QueryMethod::Get);
        assert_eq!(link.query, "cat /etc/hosts");
        assert_eq!(link.context, "somehost");
    }

    #[test]
    fn test_map_outcome_trims_one_newline() {
        let spec = CommandSpec::new("printf");
        let item = map_outcome(&spec, 0, &outcome(b"a\n\n", b"b"), "somehost", "\n");

        assert_eq!(item.attribute_str("stdout"), Some("a\n"));
        assert_eq!(item.attribute_str("stderr"), Some("b"));
    }

    #[test]
    fn test_item_serialization_shape() {
        let spec = CommandSpec::new("hostname");
        let item = map_outcome(&spec, 0, &outcome(b"web01\n", b""), "web01", "\n");

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "command");
        assert_eq!(value["attributes"]["name"], "hostname");
        assert_eq!(value["linked_item_queries"][0]["method"], "get");

        let back: Item = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }
}
