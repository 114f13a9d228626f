//! AHV vocabulary used while assembling a VM spec.
//!
//! Lists are ordered: menus show them in this order and index into them.

pub const DEFAULT_VM_NAME: &str = "vm_@@{calm_application_name}@@-@@{calm_array_index}@@";

/// Display name -> device type
pub const DEVICE_TYPES: &[(&str, &str)] = &[("DISK", "DISK"), ("CD-ROM", "CDROM")];

/// Display name -> adapter type, per device type
pub const DISK_BUSES: &[(&str, &str)] = &[
    ("SCSI", "SCSI"),
    ("PCI", "PCI"),
    ("SATA", "SATA"),
    ("IDE", "IDE"),
];
pub const CDROM_BUSES: &[(&str, &str)] = &[("SATA", "SATA"), ("IDE", "IDE")];

pub const BOOT_TYPES: &[(&str, &str)] = &[("Legacy BIOS", "LEGACY"), ("UEFI", "UEFI")];

pub const GUEST_CUSTOMIZATION_SCRIPT_TYPES: &[&str] = &["cloud_init", "sysprep"];

pub const SYS_PREP_INSTALL_TYPES: &[&str] = &["FRESH", "PREPARED"];

/// Union titles in the provider schema
pub const DISK_OPTION: &str = "AHV Disk";
pub const VDISK_OPTION: &str = "AHV VDisk";
pub const CLOUD_INIT_OPTION: &str = "AHV CLOUD INIT Script";
pub const SYSPREP_OPTION: &str = "AHV Sys Prep Script";

/// REST resources
pub const PROJECTS: &str = "projects";
pub const IMAGES: &str = "images";
pub const SUBNETS: &str = "subnets";
pub const GROUPS: &str = "groups";

/// Buses available for a device type
pub fn device_buses(device_type: &str) -> &'static [(&'static str, &'static str)] {
    match device_type {
        "CDROM" => CDROM_BUSES,
        _ => DISK_BUSES,
    }
}

/// Image type a device type boots from
pub fn image_type(device_type: &str) -> &'static str {
    match device_type {
        "CDROM" => "ISO_IMAGE",
        _ => "DISK_IMAGE",
    }
}

pub fn device_type_values() -> Vec<&'static str> {
    DEVICE_TYPES.iter().map(|(_, v)| *v).collect()
}

/// Every adapter type across device types, first-seen order
pub fn adapter_type_values() -> Vec<&'static str> {
    let mut values: Vec<&'static str> = Vec::new();
    for (_, bus) in DISK_BUSES.iter().chain(CDROM_BUSES.iter()) {
        if !values.contains(bus) {
            values.push(bus);
        }
    }
    values
}
