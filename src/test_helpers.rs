//! Test helpers for scripting wizard runs against a canned AHV cluster
//!
//! The fixtures describe one project (`default`, uuid `p-1`) allowed on two
//! subnets, three typed images plus an untyped one, and three categories.

#![cfg(test)]

use crate::api::Connection;
use crate::traits::{Method, MockHttpClient, MockResponse, MockUserInput};
use serde_json::{json, Value};
use std::sync::Arc;

/// Wrap `client` in a connection to a fake cluster, keeping a handle for request assertions
pub fn mock_connection(client: MockHttpClient) -> (Connection, Arc<MockHttpClient>) {
    let client = Arc::new(client);
    let conn = Connection::new("10.0.0.1", 9440, client.clone()).unwrap();
    (conn, client)
}

fn entity(name: &str, uuid: &str, resources: Value) -> Value {
    json!({
        "status": {"name": name, "resources": resources},
        "metadata": {"uuid": uuid},
    })
}

pub fn projects_response() -> Value {
    json!({"entities": [entity("default", "p-1", json!({}))]})
}

pub fn project_response() -> Value {
    json!({
        "status": {
            "name": "default",
            "project_status": {
                "resources": {
                    "subnet_reference_list": [
                        {"kind": "subnet", "name": "vlan0", "uuid": "sub-1"},
                        {"kind": "subnet", "name": "vlan.100", "uuid": "sub-2"}
                    ]
                }
            }
        },
        "metadata": {"uuid": "p-1"}
    })
}

pub fn images_response() -> Value {
    json!({
        "entities": [
            entity("ubuntu22", "img-2", json!({"image_type": "DISK_IMAGE"})),
            entity("virtio.iso", "img-3", json!({"image_type": "ISO_IMAGE"})),
            entity("centos7", "img-1", json!({"image_type": "DISK_IMAGE"})),
            entity("uploading", "img-4", json!({}))
        ]
    })
}

/// `vlan0` has IPAM configured, `vlan.100` does not
pub fn subnets_response() -> Value {
    json!({
        "entities": [
            entity(
                "vlan0",
                "sub-1",
                json!({"vlan_id": 0, "ip_config": {"subnet_ip": "10.0.0.0", "prefix_length": 24}})
            ),
            entity("vlan.100", "sub-2", json!({"vlan_id": 100}))
        ]
    })
}

fn category_group(key: &str, values: &[&str]) -> Value {
    json!({
        "group_summaries": {
            "sum:name": {"values": [{"values": [key]}]}
        },
        "entity_results": values
            .iter()
            .map(|v| json!({"data": [{"name": "value", "values": [{"values": [v]}]}]}))
            .collect::<Vec<_>>()
    })
}

pub fn categories_response() -> Value {
    json!({
        "group_results": [
            category_group("AppType", &["Default", "Kubernetes"]),
            category_group("Environment", &["Dev"])
        ]
    })
}

/// Every route a complete wizard run touches
pub fn full_mock_client() -> MockHttpClient {
    MockHttpClient::new()
        .route(Method::Post, "/projects/list", 200, projects_response())
        .route(Method::Get, "/projects/p-1", 200, project_response())
        .route(Method::Post, "/images/list", 200, images_response())
        .route(Method::Post, "/subnets/list", 200, subnets_response())
        .route(Method::Post, "/groups", 200, categories_response())
}

/// Same cluster with a different image catalogue
pub fn mock_client_with_images(images: Value) -> MockHttpClient {
    full_mock_client().route(Method::Post, "/images/list", 200, images)
}

/// Ordered answers for one wizard run
#[derive(Default)]
pub struct WizardScript {
    responses: Vec<MockResponse>,
}

impl WizardScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next text prompt; empty accepts the default
    pub fn text(mut self, answer: &str) -> Self {
        self.responses.push(MockResponse::Text(answer.to_string()));
        self
    }

    pub fn confirm(mut self, answer: bool) -> Self {
        self.responses.push(MockResponse::Confirm(answer));
        self
    }

    pub fn into_input(self) -> MockUserInput {
        MockUserInput::with_responses(self.responses)
    }
}
