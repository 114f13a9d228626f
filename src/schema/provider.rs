use super::node::{NodeKind, SchemaNode};
use super::validator::{FieldValidator, ValidationPolicy};
use crate::vm::constants::{self, DEFAULT_VM_NAME};
use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::{json, Value};

const SPEC_TEMPLATE: &str = include_str!("templates/ahv_vm_provider_spec.yaml.hbs");
const REFERENCE_PARTIAL: &str = include_str!("templates/partials/reference.hbs");
const DISK_ADDRESS_PARTIAL: &str = include_str!("templates/partials/disk_address.hbs");

const MAX_NAME_LENGTH: usize = 80;

/// 4 TiB
const MAX_MEMORY_MIB: u64 = 4 * 1024 * 1024;

/// 64 TiB
const MAX_DISK_MIB: u64 = 64 * 1024 * 1024;

/// The AHV VM provider schema, loaded once per session
pub struct ProviderSchema {
    node: SchemaNode,
}

impl ProviderSchema {
    /// Render the bundled schema template and parse it
    pub fn load() -> Result<Self> {
        let rendered = Self::render()?;
        Self::from_yaml(&rendered)
    }

    /// Parse a schema from YAML (JSON is valid YAML too)
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: Value = serde_yaml::from_str(content).context("Failed to parse provider schema")?;
        Self::from_value(raw)
    }

    pub fn from_value(raw: Value) -> Result<Self> {
        let node = SchemaNode::from_value(&raw).context("Invalid provider schema")?;
        Ok(Self { node })
    }

    fn render() -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_partial("reference", REFERENCE_PARTIAL.trim_end())
            .context("Failed to register reference partial")?;
        handlebars
            .register_partial("disk_address", DISK_ADDRESS_PARTIAL.trim_end())
            .context("Failed to register disk_address partial")?;

        let data = json!({
            "max_name_length": MAX_NAME_LENGTH,
            "max_memory_mib": MAX_MEMORY_MIB,
            "max_disk_mib": MAX_DISK_MIB,
            "default_vm_name": DEFAULT_VM_NAME,
            "device_types": constants::device_type_values(),
            "adapter_types": constants::adapter_type_values(),
            "boot_types": constants::BOOT_TYPES.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
            "install_types": constants::SYS_PREP_INSTALL_TYPES,
        });

        handlebars
            .render_template(SPEC_TEMPLATE, &data)
            .context("Failed to render provider schema template")
    }

    pub fn node(&self) -> &SchemaNode {
        &self.node
    }

    pub fn raw(&self) -> &Value {
        self.node.raw()
    }

    /// Fill in defaults and validate a whole spec document.
    ///
    /// Returns the defaulted document, or every validation error found.
    pub fn validate_spec(&self, spec: &Value) -> Result<Value, Vec<String>> {
        let mut spec = spec.clone();
        apply_defaults(&self.node, &mut spec);

        let validator = FieldValidator::new(ValidationPolicy::Strict);
        match validator.errors(self.raw(), &spec) {
            Ok(errors) if errors.is_empty() => Ok(spec),
            Ok(errors) => Err(errors),
            Err(e) => Err(vec![e.to_string()]),
        }
    }
}

/// Insert declared defaults for properties missing from `value`.
///
/// Only descends into parts of the document that already exist; a union
/// contributes the defaults of the first alternative the value satisfies.
pub fn apply_defaults(node: &SchemaNode, value: &mut Value) {
    match node.kind() {
        NodeKind::Object { properties } => {
            let Value::Object(obj) = value else {
                return;
            };

            for (name, child) in properties {
                match obj.get_mut(name) {
                    Some(existing) => apply_defaults(child, existing),
                    None => {
                        if let Some(default) = child.default_value() {
                            obj.insert(name.clone(), default.clone());
                        }
                    }
                }
            }
        }
        NodeKind::Array { items } => {
            if let Value::Array(elements) = value {
                for element in elements {
                    apply_defaults(items, element);
                }
            }
        }
        NodeKind::Union { alternatives } => {
            let validator = FieldValidator::new(ValidationPolicy::Permissive);
            let chosen = alternatives
                .iter()
                .find(|alt| validator.is_valid(alt.node.raw(), value).unwrap_or(false));

            if let Some(alt) = chosen {
                apply_defaults(&alt.node, value);
            }
        }
        NodeKind::Scalar { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::resolver::resolve;

    fn path(steps: &[&str]) -> Vec<String> {
        steps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bundled_schema_renders_and_parses() {
        let schema = ProviderSchema::load().unwrap();
        assert_eq!(schema.node().title(), Some("AHV VM Create Spec"));

        let name = resolve(schema.node(), &path(&["name"]), &[]).unwrap();
        assert_eq!(name.default_value(), Some(&json!(DEFAULT_VM_NAME)));
    }

    #[test]
    fn test_bundled_schema_passes_strict_policy() {
        let schema = ProviderSchema::load().unwrap();
        let validator = FieldValidator::default();
        assert!(validator.is_valid(schema.raw(), &json!({})).unwrap());
    }

    #[test]
    fn test_partials_expand_into_disk_union() {
        let schema = ProviderSchema::load().unwrap();

        let adapter = resolve(
            schema.node(),
            &path(&["resources", "disk_list", "device_properties", "disk_address", "adapter_type"]),
            &path(&["AHV Disk"]),
        )
        .unwrap();
        assert_eq!(adapter.raw()["enum"], json!(["SCSI", "PCI", "SATA", "IDE"]));

        let size = resolve(
            schema.node(),
            &path(&["resources", "disk_list", "disk_size_mib"]),
            &path(&["AHV VDisk"]),
        )
        .unwrap();
        assert_eq!(size.raw()["minimum"], json!(1));
    }

    #[test]
    fn test_guest_customization_paths() {
        let schema = ProviderSchema::load().unwrap();

        let user_data = resolve(
            schema.node(),
            &path(&["resources", "guest_customization", "cloud_init", "user_data"]),
            &path(&["AHV CLOUD INIT Script"]),
        )
        .unwrap();
        assert_eq!(user_data.raw()["type"], json!("string"));

        let unattend = resolve(
            schema.node(),
            &path(&["resources", "guest_customization", "sysprep", "unattend_xml"]),
            &path(&["AHV Sys Prep Script"]),
        )
        .unwrap();
        assert_eq!(unattend.raw()["type"], json!("string"));
    }

    #[test]
    fn test_apply_defaults_fills_nics_and_sysprep() {
        let schema = ProviderSchema::load().unwrap();
        let mut spec = json!({
            "name": "vm1",
            "resources": {
                "nic_list": [{"subnet_reference": {"kind": "subnet", "name": "vlan0", "uuid": "u1"}}],
                "guest_customization": {"sysprep": {"unattend_xml": "<xml/>"}}
            }
        });

        apply_defaults(schema.node(), &mut spec);

        let resources = &spec["resources"];
        assert_eq!(resources["num_sockets"], json!(1));
        assert_eq!(resources["memory_size_mib"], json!(1024));
        assert_eq!(resources["nic_list"][0]["nic_type"], json!("NORMAL_NIC"));
        assert_eq!(resources["nic_list"][0]["network_function_nic_type"], json!("INGRESS"));
        assert_eq!(resources["guest_customization"]["sysprep"]["install_type"], json!("PREPARED"));
        assert_eq!(resources["guest_customization"]["sysprep"]["is_domain"], json!(false));
        assert!(resources.get("boot_config").is_none());
    }

    #[test]
    fn test_apply_defaults_keeps_existing_values() {
        let schema = ProviderSchema::load().unwrap();
        let mut spec = json!({"name": "vm1", "resources": {"num_sockets": 4}});
        apply_defaults(schema.node(), &mut spec);
        assert_eq!(spec["resources"]["num_sockets"], json!(4));
        assert_eq!(spec["name"], json!("vm1"));
    }

    #[test]
    fn test_validate_spec_reports_errors() {
        let schema = ProviderSchema::load().unwrap();
        let errors = schema
            .validate_spec(&json!({"name": "vm1", "resources": {"num_sockets": 0}}))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("num_sockets"));
    }

    #[test]
    fn test_sizes_have_an_upper_bound() {
        let schema = ProviderSchema::load().unwrap();

        let errors = schema
            .validate_spec(&json!({"resources": {"memory_size_mib": MAX_MEMORY_MIB + 1}}))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("memory_size_mib"));

        let disk = resolve(
            schema.node(),
            &path(&["resources", "disk_list", "disk_size_mib"]),
            &path(&["AHV Disk"]),
        )
        .unwrap();
        assert_eq!(disk.raw()["maximum"], json!(MAX_DISK_MIB));
    }

    #[test]
    fn test_validate_spec_accepts_minimal_document() {
        let schema = ProviderSchema::load().unwrap();
        let spec = schema.validate_spec(&json!({})).unwrap();
        assert_eq!(spec["name"], json!(DEFAULT_VM_NAME));
    }
}
