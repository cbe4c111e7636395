//! Test helpers shared by unit and integration tests.
//!
//! [`FakeSession`] stands in for a connected device: it records every
//! command it is sent and replays a scripted queue of reply bodies.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use panos_core::{PanosError, Result};

use crate::session::Session;

/// A scripted session for tests. Not for production use.
#[derive(Debug, Default)]
pub struct FakeSession {
    replies: Mutex<VecDeque<Result<String>>>,
    sent: Mutex<Vec<String>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that replies with the given bodies in order.
    pub fn with_replies<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let session = Self::new();
        for reply in replies {
            session.push_reply(reply);
        }
        session
    }

    /// Queue a successful reply body.
    pub fn push_reply(&self, body: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(body.into()));
    }

    /// Queue a transport failure.
    pub fn push_transport_error(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(PanosError::Transport(message.into())));
    }

    /// Every command XML sent so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of commands sent so far.
    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn op(
        &self,
        cmd_xml: &str,
        _target: Option<&str>,
        _extra: &[(String, String)],
    ) -> Result<String> {
        self.sent.lock().unwrap().push(cmd_xml.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PanosError::Transport("no scripted reply left".to_string())))
    }
}

/// A successful system-info reply with the given time and zone.
pub fn system_info_reply(time: &str, timezone: &str) -> String {
    format!(
        r#"<response status="success"><result><system>
            <hostname>panorama-01</hostname>
            <serial>0001A13000001</serial>
            <sw-version>10.2.3</sw-version>
            <time>{time}</time>
            <timezone>{timezone}</timezone>
        </system></result></response>"#
    )
}

/// A job status snapshot reply.
pub fn job_status_reply(id: &str, status: &str, result: &str) -> String {
    format!(
        r#"<response status="success"><result><job>
            <id>{id}</id>
            <status>{status}</status>
            <result>{result}</result>
            <progress>50</progress>
        </job></result></response>"#
    )
}
