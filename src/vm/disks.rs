use super::assembler::{Draft, SpecAssembler};
use super::constants::{self, BOOT_TYPES, DEVICE_TYPES, VDISK_OPTION};
use crate::prompt::{select_index, select_value};
use anyhow::{Context as _, Result};
use serde_json::{json, Map, Value};

impl SpecAssembler<'_> {
    /// Image-backed disks; a bootable disk becomes the boot device
    pub(super) fn image_disks(&self, draft: &mut Draft) -> Result<()> {
        let input = self.ctx.input.as_ref();
        let output = self.ctx.output.as_ref();

        let mut disks = Vec::new();
        let mut boot_config = Map::new();

        for disk_number in 1.. {
            output.subsection(&format!("Image Device {}", disk_number));

            let device_type = select_value(
                input,
                output,
                "Choose from given Device Types :",
                DEVICE_TYPES,
                "Enter the index for Device Type",
            )?;
            let adapter_type = select_value(
                input,
                output,
                "Choose from given Device Bus :",
                constants::device_buses(device_type),
                "Enter the index for Device Bus",
            )?;

            let images = self.ahv.images(constants::image_type(device_type))?;
            let image = if images.is_empty() {
                output.highlight("No image present");
                None
            } else {
                let names: Vec<String> = images.keys().cloned().collect();
                let index = select_index(
                    input,
                    output,
                    "Choose from given images:",
                    &names,
                    "Enter the index of image",
                )?;
                Some(names[index].clone())
            };

            let bootable = input.confirm("Is it bootable", true)?;
            let device_index = draft.next_device_index(adapter_type);
            let disk_address = json!({
                "device_index": device_index,
                "adapter_type": adapter_type,
            });

            let data_source_reference = match &image {
                Some(name) => json!({
                    "name": name,
                    "kind": "image",
                    "uuid": images.get(name).cloned().unwrap_or_default(),
                }),
                None => json!({}),
            };

            if bootable {
                boot_config.insert(
                    "boot_device".to_string(),
                    json!({"disk_address": disk_address.clone()}),
                );
            }

            disks.push(json!({
                "data_source_reference": data_source_reference,
                "device_properties": {
                    "device_type": device_type,
                    "disk_address": disk_address,
                },
            }));

            if !self.ask("Want to add more disks")? {
                break;
            }
        }

        draft.resources.insert("disk_list".to_string(), Value::Array(disks));
        draft
            .resources
            .insert("boot_config".to_string(), Value::Object(boot_config));
        Ok(())
    }

    /// Boot firmware; only UEFI is written, legacy is the platform default
    pub(super) fn boot_type(&self, draft: &mut Draft) -> Result<()> {
        let boot_type = select_value(
            self.ctx.input.as_ref(),
            self.ctx.output.as_ref(),
            "Choose from given Boot Type :",
            BOOT_TYPES,
            "Enter the index for Boot Type",
        )?;

        if boot_type == "UEFI" {
            draft
                .resources
                .get_mut("boot_config")
                .and_then(|b| b.as_object_mut())
                .context("boot_config missing from draft")?
                .insert("boot_type".to_string(), json!(boot_type));
        }

        Ok(())
    }

    /// Empty disks sized in GB; CD-ROMs get no size
    pub(super) fn virtual_disks(&self, draft: &mut Draft) -> Result<()> {
        let input = self.ctx.input.as_ref();
        let output = self.ctx.output.as_ref();

        if let Some(last) = draft.options.last_mut() {
            *last = VDISK_OPTION.to_string();
        }

        loop {
            let device_type = select_value(
                input,
                output,
                "Choose from given Device Types:",
                DEVICE_TYPES,
                "Enter the index for Device Type",
            )?;
            let adapter_type = select_value(
                input,
                output,
                "Choose from given Device Bus :",
                constants::device_buses(device_type),
                "Enter the index for Device Bus",
            )?;

            draft.path.push("disk_size_mib".to_string());
            let size_mib = if device_type == "DISK" {
                self.field_mib(draft, 8, "Enter disk size(GB)")?
            } else {
                0
            };
            draft.path.pop();

            let device_index = draft.next_device_index(adapter_type);
            let disk = json!({
                "device_properties": {
                    "device_type": device_type,
                    "disk_address": {
                        "device_index": device_index,
                        "adapter_type": adapter_type,
                    },
                },
                "disk_size_mib": size_mib,
            });

            draft
                .resources
                .get_mut("disk_list")
                .and_then(|d| d.as_array_mut())
                .context("disk_list missing from draft")?
                .push(disk);

            if !self.ask("Want to add more virtual disks")? {
                break;
            }
        }

        Ok(())
    }
}
