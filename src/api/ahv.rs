use super::resource::Connection;
use crate::vm::constants::{GROUPS, IMAGES, PROJECTS, SUBNETS};
use anyhow::{Context, Result, bail};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// A `key:value` category pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: String,
    pub value: String,
}

/// AHV lookups the wizard needs, on top of the generic resource API
pub struct Ahv {
    connection: Connection,
}

impl Ahv {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// Project name -> uuid
    pub fn projects(&self) -> Result<BTreeMap<String, String>> {
        self.connection.resource(PROJECTS).get_name_uuid_map(None)
    }

    /// Names of the subnets a project may use
    pub fn project_subnets(&self, project_id: &str) -> Result<Vec<String>> {
        let project = self.connection.resource(PROJECTS).read(project_id)?;

        let subnets = project
            .pointer("/status/project_status/resources/subnet_reference_list")
            .and_then(|s| s.as_array())
            .context("Project response has no subnet_reference_list")?;

        Ok(subnets
            .iter()
            .filter_map(|s| s.get("name").and_then(|n| n.as_str()).map(String::from))
            .collect())
    }

    /// Image name -> uuid for images of `image_type`; untyped images are skipped
    pub fn images(&self, image_type: &str) -> Result<BTreeMap<String, String>> {
        let response = self.connection.resource(IMAGES).list(None)?;

        let mut images = BTreeMap::new();
        for image in entities(&response) {
            let Some(kind) = image.pointer("/status/resources/image_type").and_then(|t| t.as_str())
            else {
                continue;
            };

            if kind != image_type {
                continue;
            }

            if let (Some(name), Some(uuid)) = (
                image.pointer("/status/name").and_then(|n| n.as_str()),
                image.pointer("/metadata/uuid").and_then(|u| u.as_str()),
            ) {
                images.insert(name.to_string(), uuid.to_string());
            }
        }

        log::debug!("found {} images of type {}", images.len(), image_type);
        Ok(images)
    }

    /// Raw subnet entities matching `payload`
    pub fn subnets(&self, payload: &Value) -> Result<Vec<Value>> {
        let response = self.connection.resource(SUBNETS).list(Some(payload))?;
        Ok(entities(&response).to_vec())
    }

    /// Run a groups query
    pub fn groups(&self, payload: &Value) -> Result<Value> {
        if payload.as_object().is_none_or(|p| p.is_empty()) {
            bail!("no payload");
        }
        self.connection.resource(GROUPS).create(payload)
    }

    /// Every user category value, Calm's own categories excluded
    pub fn categories(&self) -> Result<Vec<Category>> {
        let payload = json!({
            "entity_type": "category",
            "filter_criteria": "name!=CalmApplication;name!=CalmDeployment;name!=CalmService;name!=CalmPackage",
            "grouping_attribute": "abac_category_key",
            "group_sort_attribute": "name",
            "group_count": 60,
            "group_attributes": [
                {"attribute": "name", "ancestor_entity_type": "abac_category_key"}
            ],
            "group_member_count": 1000,
            "group_member_offset": 0,
            "group_member_sort_attribute": "value",
            "group_member_attributes": [{"attribute": "value"}],
            "query_name": "prism:CategoriesQueryModel",
        });

        let response = self.groups(&payload)?;

        let groups = response
            .get("group_results")
            .and_then(|g| g.as_array())
            .context("Groups response has no group_results")?;

        let mut categories = Vec::new();
        for group in groups {
            let key = group
                .pointer("/group_summaries/sum:name/values/0/values/0")
                .and_then(|k| k.as_str())
                .context("Category group without a key")?;

            let members = group
                .get("entity_results")
                .and_then(|e| e.as_array())
                .map(|e| e.as_slice())
                .unwrap_or_default();

            for entity in members {
                if let Some(value) = entity.pointer("/data/0/values/0/values/0").and_then(|v| v.as_str()) {
                    categories.push(Category {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        Ok(categories)
    }
}

fn entities(response: &Value) -> &[Value] {
    response
        .get("entities")
        .and_then(|e| e.as_array())
        .map(|e| e.as_slice())
        .unwrap_or_default()
}
