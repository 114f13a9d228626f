use super::assembler::{Draft, SpecAssembler};
use crate::prompt::{select_index, FieldKind};
use anyhow::Result;
use serde_json::{json, Map, Value};

impl SpecAssembler<'_> {
    /// NICs on subnets the project may use, optionally with a static IP
    pub(super) fn network_adapters(&self, draft: &mut Draft, project_subnets: &[String]) -> Result<()> {
        let input = self.ctx.input.as_ref();
        let output = self.ctx.output.as_ref();

        let subnets = self.ahv.subnets(&subnet_filter(project_subnets))?;
        if subnets.is_empty() {
            output.highlight("No network adapter present");
            return Ok(());
        }

        let names: Vec<String> = subnets
            .iter()
            .map(|s| str_at(s, "/status/name").to_string())
            .collect();

        draft.set_leaf("nic_list");
        let mut nics = Vec::new();

        loop {
            let index = select_index(
                input,
                output,
                "Choose from given subnets:",
                &names,
                "Enter the index of subnet's name",
            )?;
            let subnet = &subnets[index];

            let mut nic = Map::new();
            let managed = subnet
                .pointer("/status/resources/ip_config")
                .and_then(|c| c.as_object())
                .is_some_and(|c| !c.is_empty());

            if managed && self.ask("Use static Ip")? {
                draft.path.push("ip_endpoint_list".to_string());
                draft.path.push("ip".to_string());
                let ip = self.field(draft, None, FieldKind::String, Some("Enter Ip"));
                draft.path.truncate(draft.path.len() - 2);
                nic.insert("ip_endpoint_list".to_string(), json!([{"ip": ip?}]));
            }

            nic.insert(
                "subnet_reference".to_string(),
                json!({
                    "kind": "subnet",
                    "name": names[index],
                    "uuid": str_at(subnet, "/metadata/uuid"),
                }),
            );
            nics.push(Value::Object(nic));

            if !self.ask("Want to add more network adapters")? {
                break;
            }
        }

        draft.resources.insert("nic_list".to_string(), Value::Array(nics));
        Ok(())
    }
}

/// List filter limiting subnets to the project's; no filter when the project names none
fn subnet_filter(project_subnets: &[String]) -> Value {
    if project_subnets.is_empty() {
        return json!({});
    }
    json!({"filter": format!("(name=={})", project_subnets.join(",name=="))})
}

fn str_at<'v>(value: &'v Value, pointer: &str) -> &'v str {
    value.pointer(pointer).and_then(|v| v.as_str()).unwrap_or_default()
}
