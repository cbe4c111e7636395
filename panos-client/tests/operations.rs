//! End-to-end operation tests against a scripted fake session.

use std::time::Duration;

use panos_client::test_utils::{job_status_reply, system_info_reply, FakeSession};
use panos_client::{JobWait, Panorama};
use panos_core::PanosError;

const UTC_SYSINFO_TIME: &str = "Mon Jan 15 13:45:00 2024";

fn client_with_replies(replies: &[String]) -> Panorama<FakeSession> {
    Panorama::new(FakeSession::with_replies(replies.iter().cloned()))
}

fn auth_key_reply(msg: &str) -> String {
    format!(r#"<response status="success"><result>{msg}</result></response>"#)
}

#[tokio::test]
async fn create_vm_auth_key_parses_message() {
    let client = client_with_replies(&[
        system_info_reply(UTC_SYSINFO_TIME, "UTC"),
        auth_key_reply("VM auth key 755036225328715 generated. Expires at 2099/01/01 00:00:00"),
    ]);

    let key = client.create_vm_auth_key(24).await.unwrap();
    assert_eq!(key.auth_key, "755036225328715");
    assert_eq!(key.expiry, "2099/01/01 00:00:00");
    assert_eq!(
        key.expires.unwrap().to_rfc3339(),
        "2099-01-01T00:00:00+00:00"
    );

    let sent = client.session().sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], "<show><system><info/></system></show>");
    assert_eq!(
        sent[1],
        "<request><bootstrap><vm-auth-key><generate><lifetime>24</lifetime>\
         </generate></vm-auth-key></bootstrap></request>"
    );
}

#[tokio::test]
async fn create_vm_auth_key_anchors_expiry_to_device_zone() {
    let client = client_with_replies(&[
        system_info_reply(UTC_SYSINFO_TIME, "US/Pacific"),
        auth_key_reply("VM auth key 755036225328715 generated. Expires at 2024/06/01 00:00:00"),
    ]);

    let key = client.create_vm_auth_key(8).await.unwrap();
    // Midnight PDT is 07:00 UTC.
    assert_eq!(
        key.expires
            .unwrap()
            .with_timezone(&chrono::Utc)
            .to_rfc3339(),
        "2024-06-01T07:00:00+00:00"
    );
}

#[tokio::test]
async fn create_vm_auth_key_survives_clock_failure() {
    let session = FakeSession::new();
    session.push_transport_error("connection reset");
    session.push_reply(auth_key_reply(
        "VM auth key 755036225328715 generated. Expires at 2099/01/01 00:00:00",
    ));

    let client = Panorama::new(session);
    let key = client.create_vm_auth_key(24).await.unwrap();
    // Clock failure degrades to a UTC anchor instead of aborting.
    assert_eq!(
        key.expires.unwrap().to_rfc3339(),
        "2099-01-01T00:00:00+00:00"
    );
}

#[tokio::test]
async fn create_vm_auth_key_rejects_wrong_token_count() {
    let client = client_with_replies(&[
        system_info_reply(UTC_SYSINFO_TIME, "UTC"),
        // Eight tokens: the expiry time is missing.
        auth_key_reply("VM auth key 755036225328715 generated. Expires at 2099/01/01"),
    ]);

    let err = client.create_vm_auth_key(24).await.unwrap_err();
    match err {
        PanosError::Protocol(msg) => {
            assert!(msg.contains("8 of 9"));
            assert!(msg.contains("755036225328715"));
        }
        other => panic!("expected Protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_vm_auth_key_rejects_wrong_prefix() {
    let client = client_with_replies(&[
        system_info_reply(UTC_SYSINFO_TIME, "UTC"),
        auth_key_reply("Something else entirely happened here today ok then fine"),
    ]);

    let err = client.create_vm_auth_key(24).await.unwrap_err();
    assert!(matches!(err, PanosError::Protocol(_)));
}

#[tokio::test]
async fn create_vm_auth_key_rejects_empty_message() {
    let client = client_with_replies(&[
        system_info_reply(UTC_SYSINFO_TIME, "UTC"),
        r#"<response status="success"><result/></response>"#.to_string(),
    ]);

    let err = client.create_vm_auth_key(24).await.unwrap_err();
    match err {
        PanosError::Protocol(msg) => assert!(msg.contains("no message")),
        other => panic!("expected Protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn vm_auth_keys_returns_entries_with_malformed_expiry() {
    let listing = r#"<response status="success"><result>
        <bootstrap-vm-auth-keys>
            <entry>
                <vm-auth-key>755036225328715</vm-auth-key>
                <expiry-time>2024/01/15 13:45:00</expiry-time>
            </entry>
            <entry>
                <vm-auth-key>142257127382737</vm-auth-key>
                <expiry-time>bad-date</expiry-time>
            </entry>
        </bootstrap-vm-auth-keys>
    </result></response>"#;
    let client = client_with_replies(&[
        system_info_reply(UTC_SYSINFO_TIME, "UTC"),
        listing.to_string(),
    ]);

    let keys = client.vm_auth_keys().await.unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(
        keys[0].expires.unwrap().to_rfc3339(),
        "2024-01-15T13:45:00+00:00"
    );
    assert!(keys[1].expires.is_none());
    assert_eq!(keys[1].auth_key, "142257127382737");
}

#[tokio::test]
async fn vm_auth_keys_resolves_clock_once_per_batch() {
    let listing = r#"<response status="success"><result>
        <bootstrap-vm-auth-keys>
            <entry><vm-auth-key>a</vm-auth-key><expiry-time>2024/01/15 13:45:00</expiry-time></entry>
            <entry><vm-auth-key>b</vm-auth-key><expiry-time>2024/01/16 13:45:00</expiry-time></entry>
            <entry><vm-auth-key>c</vm-auth-key><expiry-time>2024/01/17 13:45:00</expiry-time></entry>
        </bootstrap-vm-auth-keys>
    </result></response>"#;
    let client = client_with_replies(&[
        system_info_reply(UTC_SYSINFO_TIME, "UTC"),
        listing.to_string(),
    ]);

    let keys = client.vm_auth_keys().await.unwrap();
    assert_eq!(keys.len(), 3);
    assert!(keys.iter().all(|k| k.expires.is_some()));
    // One system-info call plus one listing call, regardless of entry count.
    assert_eq!(client.session().call_count(), 2);
}

#[tokio::test]
async fn device_group_hierarchy_flattens_reply() {
    let reply = r#"<response status="success"><result>
        <dg-hierarchy>
            <dg name="emea">
                <dg name="branches">
                    <dg name="retail"/>
                </dg>
            </dg>
            <dg name="apac"/>
        </dg-hierarchy>
    </result></response>"#;
    let client = client_with_replies(&[reply.to_string()]);

    let parents = client.device_group_hierarchy().await.unwrap();
    assert_eq!(parents.len(), 4);
    assert_eq!(parents["emea"], "");
    assert_eq!(parents["apac"], "");
    assert_eq!(parents["branches"], "emea");
    assert_eq!(parents["retail"], "branches");

    assert_eq!(
        client.session().sent()[0],
        "<show><dg-hierarchy/></show>"
    );
}

#[tokio::test(start_paused = true)]
async fn assign_device_group_parent_to_shared_omits_new_parent() {
    let client = client_with_replies(&[
        r#"<response status="success"><result><job>37</job></result></response>"#.to_string(),
        job_status_reply("37", "ACT", "PEND"),
        job_status_reply("37", "FIN", "OK"),
    ]);

    client
        .assign_device_group_parent("child-dg", "")
        .await
        .unwrap();

    let sent = client.session().sent();
    assert_eq!(
        sent[0],
        r#"<request><move-dg><entry name="child-dg"/></move-dg></request>"#
    );
    assert_eq!(sent[1], "<show><jobs><id>37</id></jobs></show>");
    assert_eq!(sent.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn assign_device_group_parent_sends_new_parent() {
    let client = client_with_replies(&[
        r#"<response status="success"><result><job>38</job></result></response>"#.to_string(),
        job_status_reply("38", "FIN", "OK"),
    ]);

    client
        .assign_device_group_parent("branches", "emea")
        .await
        .unwrap();

    assert_eq!(
        client.session().sent()[0],
        r#"<request><move-dg><entry name="branches"><new-parent-dg>emea</new-parent-dg></entry></move-dg></request>"#
    );
}

#[tokio::test]
async fn assign_device_group_parent_requires_job_id() {
    let client = client_with_replies(&[
        r#"<response status="success"><result><msg><line>done</line></msg></result></response>"#
            .to_string(),
    ]);

    let err = client
        .assign_device_group_parent("child-dg", "emea")
        .await
        .unwrap_err();
    match err {
        PanosError::Protocol(msg) => assert!(msg.contains("no job id")),
        other => panic!("expected Protocol error, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_polls_until_completed() {
    let client = client_with_replies(&[
        job_status_reply("37", "ACT", "PEND"),
        job_status_reply("37", "ACT", "PEND"),
        job_status_reply("37", "FIN", "OK"),
    ]);

    client.wait_for_job("37", JobWait::default()).await.unwrap();
    assert_eq!(client.session().call_count(), 3);
}

#[tokio::test]
async fn wait_for_job_surfaces_failure_details() {
    let reply = r#"<response status="success"><result><job>
        <id>37</id>
        <status>FIN</status>
        <result>FAIL</result>
        <progress>100</progress>
        <details><line>device group branches not found</line></details>
    </job></result></response>"#;
    let client = client_with_replies(&[reply.to_string()]);

    let err = client
        .wait_for_job("37", JobWait::default())
        .await
        .unwrap_err();
    match err {
        PanosError::JobFailed { id, reason } => {
            assert_eq!(id, "37");
            assert!(reason.contains("device group branches not found"));
        }
        other => panic!("expected JobFailed, got {other:?}"),
    }
    // Failure terminates on the first poll.
    assert_eq!(client.session().call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_times_out() {
    let replies: Vec<String> = (0..20)
        .map(|_| job_status_reply("37", "ACT", "PEND"))
        .collect();
    let client = client_with_replies(&replies);

    let wait = JobWait {
        interval: Duration::from_secs(1),
        timeout: Duration::from_secs(3),
    };
    let err = client.wait_for_job("37", wait).await.unwrap_err();
    match err {
        PanosError::JobTimeout { id, timeout } => {
            assert_eq!(id, "37");
            assert_eq!(timeout, Duration::from_secs(3));
        }
        other => panic!("expected JobTimeout, got {other:?}"),
    }
    // Polls at t=0,1,2,3; the deadline check stops the loop after that.
    assert_eq!(client.session().call_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_zero_overrides_use_defaults() {
    let client = client_with_replies(&[
        job_status_reply("37", "PEND", ""),
        job_status_reply("37", "FIN", "OK"),
    ]);

    let wait = JobWait {
        interval: Duration::ZERO,
        timeout: Duration::ZERO,
    };
    client.wait_for_job("37", wait).await.unwrap();
    assert_eq!(client.session().call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_progress_callback_observes_each_poll() {
    let client = client_with_replies(&[
        job_status_reply("37", "ACT", "PEND"),
        job_status_reply("37", "ACT", "PEND"),
        job_status_reply("37", "FIN", "OK"),
    ]);

    let mut observed = Vec::new();
    client
        .wait_for_job_with("37", JobWait::default(), |job| {
            observed.push(job.status.clone());
        })
        .await
        .unwrap();

    assert_eq!(observed, vec!["ACT", "ACT", "FIN"]);
}

#[tokio::test]
async fn transport_errors_propagate() {
    let session = FakeSession::new();
    session.push_transport_error("connection refused");
    let client = Panorama::new(session);

    let err = client.device_group_hierarchy().await.unwrap_err();
    match err {
        PanosError::Transport(msg) => assert!(msg.contains("connection refused")),
        other => panic!("expected Transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_reply_is_deserialize_error_with_body() {
    let client = client_with_replies(&["<response".to_string()]);

    let err = client.device_group_hierarchy().await.unwrap_err();
    match err {
        PanosError::Deserialize { body, .. } => assert_eq!(body, "<response"),
        other => panic!("expected Deserialize error, got {other:?}"),
    }
}
