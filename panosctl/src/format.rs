//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use std::collections::HashMap;

use anyhow::Result;
use colored::*;
use panos_core::{SystemInfo, VmAuthKey};
use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Format system information
pub fn format_system_info(info: &SystemInfo, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(info)?),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&"Device Information".bold().to_string());
            output.push('\n');
            output.push_str(&format!("Hostname: {}", info.hostname.cyan()));
            output.push('\n');
            output.push_str(&format!("Serial: {}", info.serial.cyan()));
            output.push('\n');
            output.push_str(&format!("Software Version: {}", info.sw_version.cyan()));
            output.push('\n');
            output.push_str(&format!("Device Time: {}", info.time.yellow()));
            output.push('\n');
            output.push_str(&format!("Time Zone: {}", info.timezone.yellow()));
            Ok(output)
        }
    }
}

/// Format a single VM auth key
pub fn format_vm_auth_key(key: &VmAuthKey, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(key)?),
        OutputFormat::Table => Ok(format!(
            "{}\nAuth Key: {}\nExpires: {}",
            "VM Auth Key Created".bold(),
            key.auth_key.green(),
            expires_cell(key)
        )),
    }
}

/// Format a VM auth key listing
pub fn format_vm_auth_keys(keys: &[VmAuthKey], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(keys)?),
        OutputFormat::Table => {
            if keys.is_empty() {
                return Ok("No VM auth keys".dimmed().to_string());
            }

            #[derive(Tabled)]
            struct KeyRow {
                #[tabled(rename = "Auth Key")]
                auth_key: String,
                #[tabled(rename = "Expiry (device local)")]
                expiry: String,
                #[tabled(rename = "Expires")]
                expires: String,
            }

            let rows: Vec<KeyRow> = keys
                .iter()
                .map(|key| KeyRow {
                    auth_key: key.auth_key.clone(),
                    expiry: key.expiry.clone(),
                    expires: expires_cell(key),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "VM Auth Keys:".bold(), table))
        }
    }
}

/// Format the flattened device-group hierarchy
pub fn format_hierarchy(parents: &HashMap<String, String>, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(parents)?),
        OutputFormat::Table => {
            if parents.is_empty() {
                return Ok("No device groups".dimmed().to_string());
            }

            #[derive(Tabled)]
            struct GroupRow {
                #[tabled(rename = "Device Group")]
                name: String,
                #[tabled(rename = "Parent")]
                parent: String,
            }

            let mut names: Vec<&String> = parents.keys().collect();
            names.sort();

            let rows: Vec<GroupRow> = names
                .into_iter()
                .map(|name| GroupRow {
                    name: name.clone(),
                    parent: if parents[name].is_empty() {
                        "(shared)".dimmed().to_string()
                    } else {
                        parents[name].clone()
                    },
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Device Group Hierarchy:".bold(), table))
        }
    }
}

fn expires_cell(key: &VmAuthKey) -> String {
    match &key.expires {
        Some(expires) => expires.to_rfc3339().green().to_string(),
        None => format!("{} (unparsed)", key.expiry).red().to_string(),
    }
}
