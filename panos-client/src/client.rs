//! The Panorama client: command executor and orchestrated operations.

use std::collections::HashMap;

use chrono::DateTime;
use chrono_tz::Tz;
use panos_core::{
    devtime, xmlapi, DgHierarchyResult, JobSubmit, OpCommand, PanosError, Result, SystemInfo,
    SystemInfoResult, VmAuthKey, VmAuthKeyListing,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::jobs::JobWait;
use crate::session::Session;

const AUTH_KEY_MSG_PREFIX: &str = "VM auth key ";
const AUTH_KEY_MSG_TOKENS: usize = 9;

/// Panorama-specific client providing typed operational commands.
///
/// Holds no mutable state; every call builds its own request and response
/// values, so a shared client is safe to use from concurrent tasks subject
/// to the session's own limits.
#[derive(Debug, Clone)]
pub struct Panorama<S: Session> {
    session: S,
}

impl<S: Session> Panorama<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Execute one operational command: serialize, log, send, and decode
    /// the typed payload from under `result`.
    ///
    /// Returns the raw reply body alongside the decoded value so callers
    /// can include the offending text in protocol errors.
    pub(crate) async fn op<T>(
        &self,
        description: &str,
        cmd: &OpCommand,
        target: Option<&str>,
    ) -> Result<(String, T)>
    where
        T: DeserializeOwned + Default,
    {
        debug!(target: "panos_client::op", "(op) {description}");
        let body = self.session.op(&cmd.to_xml(), target, &[]).await?;
        let value = xmlapi::parse_response(&body)?;
        Ok((body, value))
    }

    /// Fetch device identity and clock fields via `show > system > info`.
    pub async fn show_system_info(&self) -> Result<SystemInfo> {
        let cmd = OpCommand::new("show").flag("system>info");
        let (_, info) = self
            .op::<SystemInfoResult>("retrieving system info", &cmd, None)
            .await?;
        Ok(info.system)
    }

    /// The device's current time as a zone-aware instant.
    ///
    /// PAN-OS reports expirations as local wall-clock time with no zone;
    /// this clock supplies the zone those timestamps are anchored to.
    pub async fn clock(&self) -> Result<DateTime<Tz>> {
        let info = self.show_system_info().await?;
        devtime::parse_system_clock(&info.time, &info.timezone)
    }

    /// Resolve the device zone for a batch of expiry parses, degrading to
    /// UTC when the clock cannot be read. The overall listing is still
    /// valuable without precise `expires` values.
    async fn batch_zone(&self) -> Tz {
        match self.clock().await {
            Ok(clock) => clock.timezone(),
            Err(e) => {
                warn!(target: "panos_client::op", "failed to get/parse system time: {e}");
                Tz::UTC
            }
        }
    }

    /// Create a VM auth key to bootstrap a VM-Series firewall.
    ///
    /// The key is only valid for the requested number of hours.
    pub async fn create_vm_auth_key(&self, hours: u32) -> Result<VmAuthKey> {
        let zone = self.batch_zone().await;

        let cmd =
            OpCommand::new("request").arg("bootstrap>vm-auth-key>generate>lifetime", hours);
        let (body, msg) = self
            .op::<String>("generating a vm auth key", &cmd, None)
            .await?;

        if msg.is_empty() {
            return Err(PanosError::Protocol(format!("no message: {body}")));
        }
        if !msg.starts_with(AUTH_KEY_MSG_PREFIX) {
            return Err(PanosError::Protocol(format!("wrong message prefix: {msg}")));
        }
        let tokens: Vec<&str> = msg.split_whitespace().collect();
        if tokens.len() != AUTH_KEY_MSG_TOKENS {
            return Err(PanosError::Protocol(format!(
                "got {} of {AUTH_KEY_MSG_TOKENS} fields from: {msg}",
                tokens.len()
            )));
        }

        let mut key = VmAuthKey {
            auth_key: tokens[3].to_string(),
            expiry: tokens[7..].join(" "),
            expires: None,
        };
        key.parse_expires(zone);
        Ok(key)
    }

    /// List the device's VM auth keys.
    ///
    /// The zone is resolved once and reused across all entries; entries
    /// whose expiry fails to parse are still returned, with `expires` unset.
    pub async fn vm_auth_keys(&self) -> Result<Vec<VmAuthKey>> {
        let zone = self.batch_zone().await;

        let cmd = OpCommand::new("request").flag("bootstrap>vm-auth-key>show");
        let (_, listing) = self
            .op::<VmAuthKeyListing>("listing vm auth keys", &cmd, None)
            .await?;

        let mut keys = listing.keys.entries;
        for key in &mut keys {
            key.parse_expires(zone);
        }
        Ok(keys)
    }

    /// Return a `child group -> parent group` map for the device-group
    /// hierarchy. Top-level groups map to the empty string.
    pub async fn device_group_hierarchy(&self) -> Result<HashMap<String, String>> {
        let cmd = OpCommand::new("show").flag("dg-hierarchy");
        let (_, result) = self
            .op::<DgHierarchyResult>("retrieving device group hierarchy", &cmd, None)
            .await?;
        Ok(result.hierarchy.flatten())
    }

    /// Set a device group's parent, blocking until the resulting job
    /// completes. An empty `parent` moves the group to the top level
    /// (shared).
    pub async fn assign_device_group_parent(&self, child: &str, parent: &str) -> Result<()> {
        let mut cmd = OpCommand::new("request").attr("move-dg>entry", "name", child);
        if !parent.is_empty() {
            cmd = cmd.arg("move-dg>entry>new-parent-dg", parent);
        }

        let description = format!("assigning device group {child:?} new parent: {parent}");
        let (body, submit) = self.op::<JobSubmit>(&description, &cmd, None).await?;

        let id = submit
            .job
            .ok_or_else(|| PanosError::Protocol(format!("no job id in response: {body}")))?;
        self.wait_for_job(&id, JobWait::default()).await
    }
}
