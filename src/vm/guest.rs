use super::assembler::{Draft, SpecAssembler};
use super::constants::{CLOUD_INIT_OPTION, GUEST_CUSTOMIZATION_SCRIPT_TYPES, SYSPREP_OPTION, SYS_PREP_INSTALL_TYPES};
use crate::prompt::{select_index, FieldKind};
use anyhow::Result;
use serde_json::{json, Map, Value};

impl SpecAssembler<'_> {
    /// Cloud-init user data or a sysprep answer file, optionally joining a domain
    pub(super) fn guest_customization(&self, draft: &mut Draft) -> Result<()> {
        let input = self.ctx.input.as_ref();
        let output = self.ctx.output.as_ref();

        let script_types: Vec<String> = GUEST_CUSTOMIZATION_SCRIPT_TYPES
            .iter()
            .map(|s| s.to_string())
            .collect();
        let script_type = select_index(
            input,
            output,
            "Choose from given script types:",
            &script_types,
            "Enter the index for type of script",
        )?;

        draft.path.push("guest_customization".to_string());

        let customization = match GUEST_CUSTOMIZATION_SCRIPT_TYPES[script_type] {
            "cloud_init" => {
                draft.options.push(CLOUD_INIT_OPTION.to_string());
                draft.path.push("cloud_init".to_string());
                draft.path.push("user_data".to_string());
                let user_data = self.field(draft, None, FieldKind::String, None)?;
                json!({"cloud_init": {"user_data": user_data}})
            }
            _ => {
                draft.options.push(SYSPREP_OPTION.to_string());
                draft.path.push("sysprep".to_string());
                json!({"sysprep": self.sysprep(draft)?})
            }
        };

        draft
            .resources
            .insert("guest_customization".to_string(), customization);
        Ok(())
    }

    fn sysprep(&self, draft: &mut Draft) -> Result<Value> {
        let input = self.ctx.input.as_ref();
        let output = self.ctx.output.as_ref();

        let install_types: Vec<String> = SYS_PREP_INSTALL_TYPES.iter().map(|s| s.to_string()).collect();
        let install_type = select_index(
            input,
            output,
            "Choose from given install types:",
            &install_types,
            "Enter the index for type of install",
        )?;

        let mut sysprep = Map::new();
        sysprep.insert("install_type".to_string(), json!(install_types[install_type]));

        draft.path.push("unattend_xml".to_string());
        let unattend_xml = self.field(draft, None, FieldKind::String, None)?;
        sysprep.insert("unattend_xml".to_string(), unattend_xml);

        let join_domain = self.ask("Want to join a domain")?;
        sysprep.insert("is_domain".to_string(), json!(join_domain));

        if join_domain {
            // Blank answers are kept as empty strings
            for (key, message) in [
                ("domain", "Enter Domain Name"),
                ("dns_ip", "Enter DNS IP"),
                ("dns_search_path", "Enter DNS Search Path"),
            ] {
                let value = input.text(message, Some(""))?;
                sysprep.insert(key.to_string(), json!(value));
            }

            let credential = input.text("Enter Credential", Some(""))?;
            if !credential.is_empty() {
                sysprep.insert(
                    "domain_credential_reference".to_string(),
                    json!({"kind": "app_credential", "name": credential}),
                );
            }
        }

        Ok(Value::Object(sysprep))
    }
}
