//! Wire models for operational-command replies.
//!
//! Every field defaults when its element is absent: a reply missing an
//! expected sub-element decodes to an empty value instead of failing.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::devtime;

/// A VM auth key paired with when it expires.
///
/// `expiry` is the raw device-local string; `expires` is the best-effort
/// zone-anchored parse of it and stays `None` when parsing fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VmAuthKey {
    #[serde(rename(deserialize = "vm-auth-key"), default)]
    pub auth_key: String,
    #[serde(rename(deserialize = "expiry-time"), default)]
    pub expiry: String,
    #[serde(skip_deserializing)]
    pub expires: Option<DateTime<Tz>>,
}

impl VmAuthKey {
    /// Derive `expires` from the raw `expiry` string in the given zone.
    ///
    /// A parse failure leaves `expires` unset; listing operations must not
    /// abort because one entry carries a malformed timestamp.
    pub fn parse_expires(&mut self, tz: Tz) {
        self.expires = devtime::parse_expiry(&self.expiry, tz);
    }
}

/// Payload of `request > bootstrap > vm-auth-key > show`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VmAuthKeyListing {
    #[serde(rename = "bootstrap-vm-auth-keys", default)]
    pub keys: VmAuthKeyEntries,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VmAuthKeyEntries {
    #[serde(rename = "entry", default)]
    pub entries: Vec<VmAuthKey>,
}

/// Device identity and clock fields from `show > system > info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub serial: String,
    #[serde(rename(deserialize = "sw-version"), default)]
    pub sw_version: String,
    /// Device-local wall-clock time, e.g. `Mon Jan 15 13:45:00 2024`
    #[serde(default)]
    pub time: String,
    /// IANA zone name, e.g. `US/Pacific`
    #[serde(default)]
    pub timezone: String,
}

/// Payload of `show > system > info` (fields nested under `system`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemInfoResult {
    #[serde(default)]
    pub system: SystemInfo,
}

/// Payload of a command that enqueues an asynchronous job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSubmit {
    #[serde(default)]
    pub job: Option<String>,
}

/// Payload of `show > jobs > id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub job: Option<Job>,
}

/// One observed job snapshot. Jobs are only ever observed, never mutated
/// from the client side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub id: String,
    /// Device lifecycle string: `PEND`, `ACT`, or `FIN`
    #[serde(default)]
    pub status: String,
    /// Terminal outcome once `status` is `FIN`: `OK` or `FAIL`
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub progress: String,
    #[serde(default)]
    pub details: JobDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDetails {
    #[serde(rename = "line", default)]
    pub lines: Vec<String>,
}

/// Client-side view of the job lifecycle: `Pending → Active → {Completed, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Active,
    Completed,
    Failed,
}

impl Job {
    pub fn state(&self) -> JobState {
        match self.status.as_str() {
            "FIN" => {
                if self.result == "OK" {
                    JobState::Completed
                } else {
                    JobState::Failed
                }
            }
            "ACT" => JobState::Active,
            _ => JobState::Pending,
        }
    }

    /// Device-reported failure detail, falling back to the raw result string.
    pub fn failure_reason(&self) -> String {
        if self.details.lines.is_empty() {
            format!("result {}", self.result)
        } else {
            self.details.lines.join("; ")
        }
    }
}
