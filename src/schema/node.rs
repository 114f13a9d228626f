use super::error::SchemaError;
use lazy_static::lazy_static;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

lazy_static! {
    static ref EMPTY_NODE: SchemaNode = SchemaNode {
        raw: Value::Object(Map::new()),
        kind: NodeKind::Scalar { type_name: None },
    };
}

/// One node of a provider schema, tagged by shape
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    raw: Value,
    kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Object {
        properties: BTreeMap<String, SchemaNode>,
    },
    Array {
        items: Box<SchemaNode>,
    },
    Union {
        alternatives: Vec<Alternative>,
    },
    Scalar {
        type_name: Option<String>,
    },
}

/// A titled branch of an `anyOf`/`oneOf` node
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub title: Option<String>,
    pub node: SchemaNode,
}

impl SchemaNode {
    /// Build a node tree from a JSON schema document
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Bool(_) => {
                return Ok(Self {
                    raw: value.clone(),
                    kind: NodeKind::Scalar { type_name: None },
                });
            }
            other => {
                return Err(SchemaError::Malformed(format!(
                    "expected an object schema, found {}",
                    other
                )));
            }
        };

        let union = obj.get("anyOf").or_else(|| obj.get("oneOf"));

        let kind = if let Some(union) = union {
            let branches = union.as_array().ok_or_else(|| {
                SchemaError::Malformed("anyOf/oneOf must be an array".to_string())
            })?;

            let alternatives = branches
                .iter()
                .map(|branch| {
                    Ok(Alternative {
                        title: branch.get("title").and_then(|t| t.as_str()).map(String::from),
                        node: SchemaNode::from_value(branch)?,
                    })
                })
                .collect::<Result<Vec<_>, SchemaError>>()?;

            NodeKind::Union { alternatives }
        } else {
            let type_name = obj.get("type").and_then(|t| t.as_str());

            match type_name {
                Some("array") => {
                    let items = match obj.get("items") {
                        Some(items) => SchemaNode::from_value(items)?,
                        None => SchemaNode::empty().clone(),
                    };
                    NodeKind::Array {
                        items: Box::new(items),
                    }
                }
                Some("object") => NodeKind::Object {
                    properties: Self::parse_properties(obj)?,
                },
                None if obj.contains_key("properties") => NodeKind::Object {
                    properties: Self::parse_properties(obj)?,
                },
                other => NodeKind::Scalar {
                    type_name: other.map(String::from),
                },
            }
        };

        Ok(Self {
            raw: value.clone(),
            kind,
        })
    }

    fn parse_properties(obj: &Map<String, Value>) -> Result<BTreeMap<String, SchemaNode>, SchemaError> {
        let Some(properties) = obj.get("properties") else {
            return Ok(BTreeMap::new());
        };

        let properties = properties.as_object().ok_or_else(|| {
            SchemaError::Malformed("properties must be an object".to_string())
        })?;

        properties
            .iter()
            .map(|(name, child)| Ok((name.clone(), SchemaNode::from_value(child)?)))
            .collect()
    }

    /// The always-valid `{}` schema
    pub fn empty() -> &'static SchemaNode {
        &EMPTY_NODE
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The JSON this node was built from
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn title(&self) -> Option<&str> {
        self.raw.get("title").and_then(|t| t.as_str())
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.raw.get("default")
    }

    pub fn is_empty(&self) -> bool {
        self.raw.as_object().is_some_and(|o| o.is_empty())
    }
}
