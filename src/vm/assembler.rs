use crate::api::{Ahv, Category};
use crate::context::Context;
use crate::prompt::collector::INCORRECT_DATA;
use crate::prompt::{humanize, select_index, FieldCollector, FieldKind, PromptError};
use crate::schema::{FieldValidator, ProviderSchema};
use crate::vm::constants::DEFAULT_VM_NAME;
use anyhow::{Context as _, Result, bail};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

const MIB_PER_GIB: i64 = 1024;

/// Walks the operator through every VM section and builds the create spec
pub struct SpecAssembler<'a> {
    pub(super) ctx: &'a Context,
    pub(super) ahv: &'a Ahv,
    pub(super) schema: &'a ProviderSchema,
    max_attempts: Option<usize>,
}

/// Mutable state of one wizard run
#[derive(Debug, Default)]
pub(super) struct Draft {
    /// Schema path of the field being collected
    pub path: Vec<String>,
    /// Union labels for the path above
    pub options: Vec<String>,
    /// Next free device index per adapter type
    pub adapter_indexes: BTreeMap<String, u64>,
    pub spec: Map<String, Value>,
    pub resources: Map<String, Value>,
}

impl Draft {
    /// Set the last path segment, pushing one if the path is empty
    pub fn set_leaf(&mut self, segment: &str) {
        match self.path.last_mut() {
            Some(last) => *last = segment.to_string(),
            None => self.path.push(segment.to_string()),
        }
    }

    /// Claim the next device index on `adapter_type`
    pub fn next_device_index(&mut self, adapter_type: &str) -> u64 {
        let counter = self.adapter_indexes.entry(adapter_type.to_string()).or_insert(0);
        let index = *counter;
        *counter += 1;
        index
    }
}

impl<'a> SpecAssembler<'a> {
    pub fn new(ctx: &'a Context, ahv: &'a Ahv, schema: &'a ProviderSchema) -> Self {
        Self {
            ctx,
            ahv,
            schema,
            max_attempts: None,
        }
    }

    /// Bound every field prompt to `attempts` tries
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub(super) fn collector(&self) -> FieldCollector<'_> {
        let collector = FieldCollector::new(
            self.schema.node(),
            self.ctx.input.as_ref(),
            self.ctx.output.as_ref(),
        );
        match self.max_attempts {
            Some(attempts) => collector.with_max_attempts(attempts),
            None => collector,
        }
    }

    /// Collect the field at the draft's current path
    pub(super) fn field(
        &self,
        draft: &Draft,
        default: Option<Value>,
        kind: FieldKind,
        message: Option<&str>,
    ) -> Result<Value> {
        self.collector()
            .collect(&draft.path, &draft.options, default.as_ref(), kind, message)
    }

    /// Collect a size entered in GiB (or GB) and return it in MiB.
    ///
    /// The MiB value must fit in an `i64` and satisfy the field's schema,
    /// otherwise the answer is rejected and asked again.
    pub(super) fn field_mib(&self, draft: &Draft, default: i64, message: &str) -> Result<i64> {
        let validator = FieldValidator::default();
        let mut attempts = 0;

        loop {
            attempts += 1;
            let entered = self
                .field(draft, Some(json!(default)), FieldKind::Integer, Some(message))?
                .as_i64()
                .with_context(|| format!("{} must be an integer", message))?;

            if let Some(mib) = entered.checked_mul(MIB_PER_GIB)
                && validator.validate(self.schema.node(), &draft.path, &draft.options, &json!(mib))?
            {
                return Ok(mib);
            }

            log::debug!("{} GiB does not fit '{}'", entered, draft.path.join("."));
            self.ctx.output.warning(INCORRECT_DATA);

            if let Some(max) = self.max_attempts
                && attempts >= max
            {
                let field = draft.path.last().map(|s| humanize(s)).unwrap_or_default();
                return Err(PromptError::RetriesExhausted { field, attempts }.into());
            }
        }
    }

    pub(super) fn ask(&self, question: &str) -> Result<bool> {
        self.ctx.output.blank();
        self.ctx.input.confirm(question, false)
    }

    /// Run the whole wizard.
    ///
    /// Returns `None` when there is no project to place the VM in.
    pub fn assemble(&self) -> Result<Option<Value>> {
        let output = self.ctx.output.as_ref();
        let mut draft = Draft::default();

        let projects = self.ahv.projects()?;
        if projects.is_empty() {
            output.highlight("No projects found!!!");
            output.highlight("Please add first");
            return Ok(None);
        }

        let project_names: Vec<String> = projects.keys().cloned().collect();
        let chosen = select_index(
            self.ctx.input.as_ref(),
            output,
            "Choose from given projects:",
            &project_names,
            "Enter the index of project",
        )?;
        let project_id = &projects[&project_names[chosen]];
        let project_subnets = self.ahv.project_subnets(project_id)?;
        log::info!("building spec in project {}", project_names[chosen]);

        output.section("VM Configuration");
        draft.path.push("name".to_string());
        let name = self.field(&draft, Some(json!(DEFAULT_VM_NAME)), FieldKind::String, None)?;
        draft.spec.insert("name".to_string(), name);

        if self.ask("Want to add some categories")? {
            if let Some(categories) = self.categories()? {
                draft.spec.insert("categories".to_string(), Value::Object(categories));
            }
        }

        draft.set_leaf("resources");
        self.compute(&mut draft)?;

        output.section("Add some disks");
        draft.set_leaf("disk_list");
        draft.options.push(super::constants::DISK_OPTION.to_string());
        self.image_disks(&mut draft)?;
        self.boot_type(&mut draft)?;

        if self.ask("Want any virtual disks")? {
            self.virtual_disks(&mut draft)?;
        }

        if self.ask("Want any network adapters")? {
            self.network_adapters(&mut draft, &project_subnets)?;
        }

        draft.path = vec!["resources".to_string()];
        draft.options.clear();

        if self.ask("Want to add Customization script")? {
            self.guest_customization(&mut draft)?;
        }

        let Draft {
            mut spec, resources, ..
        } = draft;
        spec.insert("resources".to_string(), Value::Object(resources));

        match self.schema.validate_spec(&Value::Object(spec)) {
            Ok(spec) => Ok(Some(spec)),
            Err(errors) => bail!("Generated spec is invalid:\n  {}", errors.join("\n  ")),
        }
    }

    /// vCPUs, cores per vCPU and memory
    fn compute(&self, draft: &mut Draft) -> Result<()> {
        draft.path.push("num_sockets".to_string());
        let sockets = self.field(draft, Some(json!(1)), FieldKind::Integer, Some("Enter vCPUs count"))?;
        draft.resources.insert("num_sockets".to_string(), sockets);

        draft.set_leaf("num_vcpus_per_socket");
        let cores = self.field(
            draft,
            Some(json!(1)),
            FieldKind::Integer,
            Some("Enter Cores per vCPU count"),
        )?;
        draft.resources.insert("num_vcpus_per_socket".to_string(), cores);

        draft.set_leaf("memory_size_mib");
        let memory_mib = self.field_mib(draft, 1, "Enter Memory(GiB)")?;
        draft
            .resources
            .insert("memory_size_mib".to_string(), json!(memory_mib));

        Ok(())
    }

    /// Pick category values; a second value for the same key replaces the first on request
    fn categories(&self) -> Result<Option<Map<String, Value>>> {
        let output = self.ctx.output.as_ref();
        let categories = self.ahv.categories()?;

        if categories.is_empty() {
            output.highlight("No Category present");
            return Ok(None);
        }

        let labels: Vec<String> = categories
            .iter()
            .map(|Category { key, value }| format!("{}:{}", key, value))
            .collect();

        let mut result = Map::new();
        loop {
            let index = select_index(
                self.ctx.input.as_ref(),
                output,
                "Choose from given categories:",
                &labels,
                "Enter the index of category",
            )?;
            let Category { key, value } = &categories[index];

            if result.contains_key(key) {
                output.warning(&format!("Category corresponding to key {} already exists", key));
                if self.ask("Want to replace old one")? {
                    result.insert(key.clone(), json!(value));
                    output.highlight(&format!("category with (key = {}) updated", key));
                }
            } else {
                result.insert(key.clone(), json!(value));
            }

            if !self.ask("Want to add more categories")? {
                break;
            }
        }

        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{WizardScript, full_mock_client};
    use crate::traits::{Method, MockHttpClient, MockOutput, MockUserInput, OutputMessage};
    use std::sync::Arc;

    type Run = (Result<Option<Value>>, Arc<MockUserInput>, Arc<MockOutput>);

    fn run(script: WizardScript, client: MockHttpClient) -> Run {
        let input = Arc::new(script.into_input());
        let output = Arc::new(MockOutput::new());
        let ctx = Context::test_with(input.clone(), output.clone());
        let (conn, _) = crate::test_helpers::mock_connection(client);
        let ahv = Ahv::new(conn);
        let schema = ProviderSchema::load().unwrap();

        let result = SpecAssembler::new(&ctx, &ahv, &schema)
            .with_max_attempts(3)
            .assemble();
        (result, input, output)
    }

    #[test]
    fn test_minimal_wizard_run() {
        let script = WizardScript::new()
            .text("1") // project
            .text("web01") // name
            .confirm(false) // categories
            .text("2") // vCPUs
            .text("") // cores, default 1
            .text("4") // memory GiB
            .text("1") // device type DISK
            .text("1") // bus SCSI
            .text("2") // image ubuntu22
            .confirm(true) // bootable
            .confirm(false) // more disks
            .text("2") // UEFI
            .confirm(false) // vdisks
            .confirm(false) // nics
            .confirm(false); // guest customization

        let (result, input, _) = run(script, full_mock_client());
        let spec = result.unwrap().unwrap();

        assert_eq!(input.remaining(), 0);
        assert_eq!(spec["name"], json!("web01"));
        assert!(spec.get("categories").is_none());

        let resources = &spec["resources"];
        assert_eq!(resources["num_sockets"], json!(2));
        assert_eq!(resources["num_vcpus_per_socket"], json!(1));
        assert_eq!(resources["memory_size_mib"], json!(4096));
        assert_eq!(
            resources["disk_list"][0],
            json!({
                "data_source_reference": {"kind": "image", "name": "ubuntu22", "uuid": "img-2"},
                "device_properties": {
                    "device_type": "DISK",
                    "disk_address": {"device_index": 0, "adapter_type": "SCSI"}
                }
            })
        );
        assert_eq!(
            resources["boot_config"],
            json!({
                "boot_device": {"disk_address": {"device_index": 0, "adapter_type": "SCSI"}},
                "boot_type": "UEFI"
            })
        );
    }

    #[test]
    fn test_categories_replace_existing_key() {
        let script = WizardScript::new()
            .text("1")
            .text("")
            .confirm(true) // categories
            .text("1") // AppType:Default
            .confirm(true) // more
            .text("2") // AppType:Kubernetes, duplicate key
            .confirm(true) // replace
            .confirm(true) // more
            .text("3") // Environment:Dev
            .confirm(false)
            .text("")
            .text("")
            .text("")
            .text("1")
            .text("1")
            .text("1")
            .confirm(false) // not bootable
            .confirm(false)
            .text("1") // legacy
            .confirm(false)
            .confirm(false)
            .confirm(false);

        let (result, _, output) = run(script, full_mock_client());
        let spec = result.unwrap().unwrap();

        assert_eq!(spec["name"], json!(DEFAULT_VM_NAME));
        assert_eq!(
            spec["categories"],
            json!({"AppType": "Kubernetes", "Environment": "Dev"})
        );
        assert_eq!(spec["resources"]["memory_size_mib"], json!(1024));
        assert!(spec["resources"]["boot_config"].get("boot_device").is_none());
        assert!(output.to_text().contains("category with (key = AppType) updated"));
    }

    #[test]
    fn test_no_projects_stops_early() {
        let client = MockHttpClient::new().route(Method::Post, "/projects/list", 200, json!({"entities": []}));

        let (result, _, output) = run(WizardScript::new(), client);
        assert!(result.unwrap().is_none());
        assert!(output.to_text().contains("No projects found!!!"));
    }

    #[test]
    fn test_remote_failure_aborts_wizard() {
        let client = MockHttpClient::new().route(
            Method::Post,
            "/projects/list",
            401,
            json!({"message": "Authentication required."}),
        );

        let (result, _, _) = run(WizardScript::new(), client);
        assert_eq!(result.unwrap_err().to_string(), "[401] - Authentication required.");
    }

    #[test]
    fn test_invalid_field_exhausts_bounded_retries() {
        let script = WizardScript::new()
            .text("1")
            .text("web01")
            .confirm(false)
            .text("0")
            .text("-1")
            .text("zero");

        let (result, _, _) = run(script, full_mock_client());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No valid value for 'Num sockets' after 3 attempt(s)"
        );
    }

    fn incorrect_data_warnings(output: &MockOutput) -> usize {
        output
            .get_messages()
            .iter()
            .filter(|m| **m == OutputMessage::Warning(INCORRECT_DATA.to_string()))
            .count()
    }

    #[test]
    fn test_oversized_memory_is_asked_again() {
        let script = WizardScript::new()
            .text("1")
            .text("web01")
            .confirm(false)
            .text("")
            .text("")
            .text("9007199254740993") // overflows once scaled to MiB
            .text("5000") // fits as GiB, over the MiB maximum
            .text("4")
            .text("1")
            .text("1")
            .text("1")
            .confirm(true)
            .confirm(false)
            .text("1")
            .confirm(false)
            .confirm(false)
            .confirm(false);

        let (result, input, output) = run(script, full_mock_client());
        let spec = result.unwrap().unwrap();

        assert_eq!(input.remaining(), 0);
        assert_eq!(spec["resources"]["memory_size_mib"], json!(4096));
        assert_eq!(incorrect_data_warnings(&output), 2);
    }

    #[test]
    fn test_oversized_memory_exhausts_bounded_retries() {
        let script = WizardScript::new()
            .text("1")
            .text("web01")
            .confirm(false)
            .text("")
            .text("")
            .text("5000")
            .text("5000")
            .text("5000");

        let (result, _, output) = run(script, full_mock_client());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No valid value for 'Memory size mib' after 3 attempt(s)"
        );
        assert_eq!(incorrect_data_warnings(&output), 3);
    }

    #[test]
    fn test_draft_device_indexes_are_per_adapter() {
        let mut draft = Draft::default();
        assert_eq!(draft.next_device_index("SCSI"), 0);
        assert_eq!(draft.next_device_index("SCSI"), 1);
        assert_eq!(draft.next_device_index("IDE"), 0);
    }

    #[test]
    fn test_draft_set_leaf() {
        let mut draft = Draft::default();
        draft.set_leaf("name");
        assert_eq!(draft.path, vec!["name"]);
        draft.set_leaf("resources");
        assert_eq!(draft.path, vec!["resources"]);
    }
}
