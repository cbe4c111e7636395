//! Command execution handlers

use anyhow::Result;
use panos_client::{Panorama, Session};

use crate::cli::commands::{DgCommands, VmAuthKeyCommands};
use crate::format::{
    self, format_hierarchy, format_system_info, format_vm_auth_key, format_vm_auth_keys,
};

/// Handle the info command
pub async fn handle_info<S: Session>(
    client: &Panorama<S>,
    format: &format::OutputFormat,
) -> Result<()> {
    let info = client.show_system_info().await?;
    println!("{}", format_system_info(&info, format)?);
    Ok(())
}

/// Handle VM auth key subcommands
pub async fn handle_vm_auth_key<S: Session>(
    client: &Panorama<S>,
    command: VmAuthKeyCommands,
    format: &format::OutputFormat,
) -> Result<()> {
    match command {
        VmAuthKeyCommands::Create { hours } => {
            let key = client.create_vm_auth_key(hours).await?;
            println!("{}", format_vm_auth_key(&key, format)?);
        }
        VmAuthKeyCommands::List => {
            let keys = client.vm_auth_keys().await?;
            println!("{}", format_vm_auth_keys(&keys, format)?);
        }
    }
    Ok(())
}

/// Handle device group subcommands
pub async fn handle_dg<S: Session>(
    client: &Panorama<S>,
    command: DgCommands,
    format: &format::OutputFormat,
) -> Result<()> {
    match command {
        DgCommands::Hierarchy => {
            let parents = client.device_group_hierarchy().await?;
            println!("{}", format_hierarchy(&parents, format)?);
        }
        DgCommands::Move { child, parent } => {
            client.assign_device_group_parent(&child, &parent).await?;
            if parent.is_empty() {
                println!("Moved device group '{child}' to the top level (shared)");
            } else {
                println!("Moved device group '{child}' under '{parent}'");
            }
        }
    }
    Ok(())
}
