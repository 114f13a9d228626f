use super::error::SchemaError;
use super::node::{Alternative, NodeKind, SchemaNode};

/// Locate the sub-schema addressed by `path`, picking union branches by `options`.
///
/// Property steps and option labels are consumed independently: objects eat a
/// path step, unions eat an option label, arrays eat nothing and descend into
/// `items`. An empty path yields the empty schema.
pub fn resolve<'a>(
    schema: &'a SchemaNode,
    path: &[String],
    options: &[String],
) -> Result<&'a SchemaNode, SchemaError> {
    if path.is_empty() {
        return Ok(SchemaNode::empty());
    }

    let mut cursor = schema;
    let mut path_pos = 0;
    let mut option_pos = 0;

    while path_pos < path.len() {
        cursor = match cursor.kind() {
            NodeKind::Union { alternatives } => {
                let label = options.get(option_pos).ok_or_else(|| SchemaError::MissingOption {
                    position: option_pos,
                    path: path.to_vec(),
                })?;
                let chosen = select_alternative(alternatives, label)?;
                option_pos += 1;
                chosen
            }
            NodeKind::Array { items } => items,
            NodeKind::Object { properties } => {
                let step = &path[path_pos];
                let child = properties.get(step).ok_or_else(|| SchemaError::MissingProperty {
                    step: step.clone(),
                    path: path.to_vec(),
                })?;
                path_pos += 1;
                child
            }
            NodeKind::Scalar { .. } => {
                return Err(SchemaError::MissingProperty {
                    step: path[path_pos].clone(),
                    path: path.to_vec(),
                });
            }
        };
    }

    // A union sitting on the last step still takes its label
    if let NodeKind::Union { alternatives } = cursor.kind()
        && let Some(label) = options.get(option_pos)
    {
        cursor = select_alternative(alternatives, label)?;
    }

    log::trace!(
        "resolved path '{}' with options {:?}",
        path.join("."),
        options
    );

    Ok(cursor)
}

fn select_alternative<'a>(
    alternatives: &'a [Alternative],
    label: &str,
) -> Result<&'a SchemaNode, SchemaError> {
    alternatives
        .iter()
        .find(|alt| alt.title.as_deref() == Some(label))
        .map(|alt| &alt.node)
        .ok_or_else(|| SchemaError::NoMatchingOption {
            label: label.to_string(),
            available: alternatives
                .iter()
                .filter_map(|alt| alt.title.clone())
                .collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(steps: &[&str]) -> Vec<String> {
        steps.iter().map(|s| s.to_string()).collect()
    }

    fn node(value: serde_json::Value) -> SchemaNode {
        SchemaNode::from_value(&value).unwrap()
    }

    #[test]
    fn test_empty_path_returns_empty_schema() {
        let schema = node(json!({"type": "object", "properties": {"a": {"type": "string"}}}));
        let resolved = resolve(&schema, &[], &[]).unwrap();
        assert_eq!(resolved.raw(), &json!({}));
    }

    #[test]
    fn test_resolves_object_property() {
        let schema = node(json!({"type": "object", "properties": {"name": {"type": "string"}}}));
        let resolved = resolve(&schema, &path(&["name"]), &[]).unwrap();
        assert_eq!(resolved.raw(), &json!({"type": "string"}));
    }

    #[test]
    fn test_missing_property_fails() {
        let schema = node(json!({"type": "object", "properties": {"name": {"type": "string"}}}));
        let err = resolve(&schema, &path(&["size"]), &[]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingProperty {
                step: "size".to_string(),
                path: path(&["size"]),
            }
        );
    }

    #[test]
    fn test_scalar_cannot_be_descended() {
        let schema = node(json!({"type": "object", "properties": {"name": {"type": "string"}}}));
        let err = resolve(&schema, &path(&["name", "first"]), &[]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingProperty { step, .. } if step == "first"));
    }

    #[test]
    fn test_array_is_traversed_transparently() {
        let schema = node(json!({
            "type": "array",
            "items": {"type": "object", "properties": {"size": {"type": "integer"}}}
        }));
        let resolved = resolve(&schema, &path(&["size"]), &[]).unwrap();
        assert_eq!(resolved.raw(), &json!({"type": "integer"}));
    }

    #[test]
    fn test_array_of_scalars_rejects_step() {
        let schema = node(json!({"type": "array", "items": {"type": "integer"}}));
        let err = resolve(&schema, &path(&["ignored"]), &[]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingProperty { .. }));
    }

    #[test]
    fn test_trailing_union_is_resolved_by_label() {
        let schema = node(json!({
            "type": "object",
            "properties": {
                "x": {
                    "anyOf": [
                        {"title": "A", "type": "string"},
                        {"title": "B", "type": "integer"}
                    ]
                }
            }
        }));
        let resolved = resolve(&schema, &path(&["x"]), &path(&["B"])).unwrap();
        assert_eq!(resolved.raw(), &json!({"title": "B", "type": "integer"}));
    }

    #[test]
    fn test_union_inside_array_items() {
        let schema = node(json!({
            "type": "object",
            "properties": {
                "disk_list": {
                    "type": "array",
                    "items": {
                        "anyOf": [
                            {"title": "Disk", "type": "object", "properties": {"size": {"type": "integer", "minimum": 0}}},
                            {"title": "VDisk", "type": "object", "properties": {"size": {"type": "integer", "minimum": 1}}}
                        ]
                    }
                }
            }
        }));

        let resolved = resolve(&schema, &path(&["disk_list", "size"]), &path(&["VDisk"])).unwrap();
        assert_eq!(resolved.raw(), &json!({"type": "integer", "minimum": 1}));
    }

    #[test]
    fn test_unmatched_label_aborts() {
        let schema = node(json!({
            "anyOf": [
                {"title": "A", "type": "object", "properties": {"x": {}}},
                {"title": "B", "type": "object", "properties": {"x": {}}}
            ]
        }));
        let err = resolve(&schema, &path(&["x"]), &path(&["C"])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NoMatchingOption {
                label: "C".to_string(),
                available: path(&["A", "B"]),
            }
        );
    }

    #[test]
    fn test_union_without_label_fails() {
        let schema = node(json!({
            "anyOf": [{"title": "A", "type": "object", "properties": {"x": {}}}]
        }));
        let err = resolve(&schema, &path(&["x"]), &[]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingOption { position: 0, .. }));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let schema = node(json!({
            "type": "object",
            "properties": {"resources": {"type": "object", "properties": {"num_sockets": {"type": "integer"}}}}
        }));
        let before = schema.clone();
        let p = path(&["resources", "num_sockets"]);

        let first = resolve(&schema, &p, &[]).unwrap().clone();
        let second = resolve(&schema, &p, &[]).unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(schema, before);
    }
}
