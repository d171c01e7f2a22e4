//! API Integration Tests
//!
//! The server runs on an ephemeral port with in-memory repositories, so
//! no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::StatusCode;

fn typing_path(channel_id: impl std::fmt::Display) -> String {
    format!("/api/v1/channels/{channel_id}/typing")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_without_database() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();

    assert_eq!(body["checks"]["database"], "unhealthy");
    assert_eq!(body["typing"]["entries"], 0);
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_requests_without_session_are_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/users/@me/devices").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTH");
}

#[tokio::test]
async fn test_forged_session_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get_auth("/api/v1/users/@me/devices", "not.a.token")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_id();
    let client = server
        .cookie_client("huddle_session", &server.token(user, None))
        .unwrap();

    let response = client
        .get(server.url("/api/v1/users/@me/devices"))
        .send()
        .await
        .unwrap();
    let devices: Vec<DeviceInfo> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
async fn test_custom_cookie_name() {
    let server = TestServer::start_with(&[("SESSION_COOKIE_NAME", "sid")])
        .await
        .expect("Failed to start server");
    let token = server.token(unique_id(), None);

    let wrong = server.cookie_client("huddle_session", &token).unwrap();
    let response = wrong
        .get(server.url("/api/v1/users/@me/devices"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let right = server.cookie_client("sid", &token).unwrap();
    let response = right
        .get(server.url("/api/v1/users/@me/devices"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Typing Tests
// ============================================================================

#[tokio::test]
async fn test_typing_flow() {
    let server = TestServer::start().await.expect("Failed to start server");
    let channel = unique_id();
    let ada = unique_id();
    let bob = unique_id();
    server.join_channel(channel, ada).await;
    server.join_channel(channel, bob).await;
    let ada_token = server.token(ada, Some("Ada"));
    let bob_token = server.token(bob, None);

    let response = server
        .post_auth(&typing_path(channel), &ada_token, &TypingBody::default())
        .await
        .unwrap();
    let started: TypingStarted = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(started.channel_id, channel.to_string());
    assert_eq!(started.user_id, ada.to_string());
    assert!(started.timestamp > 0);

    let response = server
        .post_auth(&typing_path(channel), &bob_token, &TypingBody::named("Bobby"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The caller sees their own entry too
    let response = server.get_auth(&typing_path(channel), &bob_token).await.unwrap();
    let list: TypingList = assert_json(response, StatusCode::OK).await.unwrap();
    let names: Vec<&str> = list.typing.iter().map(|t| t.user_name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Ada"));
    assert!(names.contains(&"Bobby"));
    assert!(list.typing[0].timestamp <= list.typing[1].timestamp);

    let response = server.delete_auth(&typing_path(channel), &ada_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&typing_path(channel), &ada_token).await.unwrap();
    let list: TypingList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.typing.len(), 1);
    assert_eq!(list.typing[0].user_id, bob.to_string());
}

#[tokio::test]
async fn test_typing_without_name_falls_back_to_user_id() {
    let server = TestServer::start().await.expect("Failed to start server");
    let channel = unique_id();
    let user = unique_id();
    server.join_channel(channel, user).await;
    let token = server.token(user, None);

    server
        .post_auth(&typing_path(channel), &token, &TypingBody::default())
        .await
        .unwrap();

    let response = server.get_auth(&typing_path(channel), &token).await.unwrap();
    let list: TypingList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.typing[0].user_name, user.to_string());
}

#[tokio::test]
async fn test_typing_expires_after_ttl() {
    let server = TestServer::start_with(&[("TYPING_TTL_MS", "200")])
        .await
        .expect("Failed to start server");
    let channel = unique_id();
    let user = unique_id();
    server.join_channel(channel, user).await;
    let token = server.token(user, Some("Ada"));

    server
        .post_auth(&typing_path(channel), &token, &TypingBody::default())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;

    let response = server.get_auth(&typing_path(channel), &token).await.unwrap();
    let list: TypingList = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list.typing.is_empty());

    // Hidden but not yet swept
    assert_eq!(server.typing.sweep(), 1);
    assert_eq!(server.typing.stats().channels, 0);
}

#[tokio::test]
async fn test_typing_requires_membership() {
    let server = TestServer::start().await.expect("Failed to start server");
    let channel = unique_id();
    let outsider = server.token(unique_id(), None);

    let response = server
        .post_auth(&typing_path(channel), &outsider, &TypingBody::named("Eve"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_CHANNEL_MEMBER");

    let response = server.get_auth(&typing_path(channel), &outsider).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_typing_rejects_long_name() {
    let server = TestServer::start().await.expect("Failed to start server");
    let channel = unique_id();
    let user = unique_id();
    server.join_channel(channel, user).await;

    let response = server
        .post_auth(
            &typing_path(channel),
            &server.token(user, None),
            &TypingBody::named(&"x".repeat(65)),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

// ============================================================================
// Device Directory Tests
// ============================================================================

#[tokio::test]
async fn test_device_registration_and_listing() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_id();
    let token = server.token(user, None);
    let device = RegisterDeviceBody::unique();

    let response = server.post_auth("/api/v1/devices", &token, &device).await.unwrap();
    let created: DeviceInfo = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.device_id, device.device_id);
    assert_eq!(created.user_id, user.to_string());

    // Re-registering rotates the public key
    let rotated = RegisterDeviceBody {
        public_key: "pk-rotated".to_string(),
        ..device.clone()
    };
    let response = server.post_auth("/api/v1/devices", &token, &rotated).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_auth("/api/v1/users/@me/devices", &token).await.unwrap();
    let mine: Vec<DeviceInfo> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].public_key, "pk-rotated");

    // The directory is visible to other users
    let other = server.token(unique_id(), None);
    let response = server
        .get_auth(&format!("/api/v1/users/{user}/devices"), &other)
        .await
        .unwrap();
    let theirs: Vec<DeviceInfo> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].device_id, device.device_id);
}

#[tokio::test]
async fn test_device_id_owned_by_other_user_conflicts() {
    let server = TestServer::start().await.expect("Failed to start server");
    let device = RegisterDeviceBody::unique();

    let owner = server.token(unique_id(), None);
    server.post_auth("/api/v1/devices", &owner, &device).await.unwrap();

    let thief = server.token(unique_id(), None);
    let response = server.post_auth("/api/v1/devices", &thief, &device).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "DEVICE_OWNED_BY_OTHER_USER");
}

#[tokio::test]
async fn test_device_removal() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = unique_id();
    let token = server.token(user, None);
    let device = RegisterDeviceBody::unique();
    server.post_auth("/api/v1/devices", &token, &device).await.unwrap();

    let path = format!("/api/v1/devices/{}", device.device_id);

    // Someone else's device is reported as unknown
    let stranger = server.token(unique_id(), None);
    let response = server.delete_auth(&path, &stranger).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_DEVICE");

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Conversation Key Tests
// ============================================================================

#[tokio::test]
async fn test_group_key_fan_out() {
    let server = TestServer::start().await.expect("Failed to start server");
    let group = unique_id();
    let ada = unique_id();
    let bob = unique_id();
    server.join_group(group, ada).await;
    server.join_group(group, bob).await;
    let ada_token = server.token(ada, None);
    let bob_token = server.token(bob, None);

    let ada_device = RegisterDeviceBody::unique();
    let bob_device = RegisterDeviceBody::unique();
    server.post_auth("/api/v1/devices", &ada_token, &ada_device).await.unwrap();
    server.post_auth("/api/v1/devices", &bob_token, &bob_device).await.unwrap();

    // Ada discovers every participant device
    let devices_path = format!("/api/v1/keys/group/{group}/devices");
    let response = server.get_auth(&devices_path, &ada_token).await.unwrap();
    let scope: ScopeDevices = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(scope.scope, "group");
    assert_eq!(scope.scope_id, group.to_string());
    assert_eq!(scope.devices.len(), 2);

    // and uploads one copy per device, plus one for a device that does not exist
    let keys_path = format!("/api/v1/keys/group/{group}");
    let body = SaveKeysBody::new([
        (ada_device.device_id.as_str(), "ct-ada"),
        (bob_device.device_id.as_str(), "ct-bob"),
        ("ghost-device", "ct-ghost"),
    ]);
    let response = server.put_auth(&keys_path, &ada_token, &body).await.unwrap();
    let saved: SavedKeys = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(saved.saved, 2);
    assert_eq!(saved.skipped, 1);

    // Bob fetches his copy, attributed to him as the device owner
    let response = server
        .get_auth(
            &format!("{keys_path}?device_id={}", bob_device.device_id),
            &bob_token,
        )
        .await
        .unwrap();
    let key: StoredKey = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(key.encrypted_key, "ct-bob");
    assert_eq!(key.user_id, bob.to_string());
    assert_eq!(key.device_id, bob_device.device_id);
    assert_eq!(key.scope, "group");
    assert_eq!(key.scope_id, group.to_string());

    // but cannot read through Ada's device
    let response = server
        .get_auth(
            &format!("{keys_path}?device_id={}", ada_device.device_id),
            &bob_token,
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_DEVICE");
}

#[tokio::test]
async fn test_key_upload_overwrites_previous_copy() {
    let server = TestServer::start().await.expect("Failed to start server");
    let channel = unique_id();
    let user = unique_id();
    server.join_channel(channel, user).await;
    let token = server.token(user, None);
    let device = RegisterDeviceBody::unique();
    server.post_auth("/api/v1/devices", &token, &device).await.unwrap();

    let keys_path = format!("/api/v1/keys/channel/{channel}");
    for ciphertext in ["ct-1", "ct-2"] {
        let body = SaveKeysBody::new([(device.device_id.as_str(), ciphertext)]);
        let response = server.put_auth(&keys_path, &token, &body).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
    assert_eq!(server.keys.len().await, 1);

    let response = server
        .get_auth(&format!("{keys_path}?device_id={}", device.device_id), &token)
        .await
        .unwrap();
    let key: StoredKey = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(key.encrypted_key, "ct-2");
}

#[tokio::test]
async fn test_dm_keys_are_limited_to_participants() {
    let server = TestServer::start().await.expect("Failed to start server");
    let ada = unique_id();
    let bob = unique_id();
    let eve = server.token(unique_id(), None);

    // Either participant order addresses the same conversation
    let response = server
        .get_auth(
            &format!("/api/v1/keys/dm/{bob}:{ada}/devices"),
            &server.token(ada, None),
        )
        .await
        .unwrap();
    let scope: ScopeDevices = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(scope.scope_id, format!("{ada}:{bob}"));

    let response = server
        .get_auth(&format!("/api/v1/keys/dm/{ada}:{bob}/devices"), &eve)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_PARTICIPANT");
}

#[tokio::test]
async fn test_missing_key_is_not_found() {
    let server = TestServer::start().await.expect("Failed to start server");
    let group = unique_id();
    let user = unique_id();
    server.join_group(group, user).await;
    let token = server.token(user, None);
    let device = RegisterDeviceBody::unique();
    server.post_auth("/api/v1/devices", &token, &device).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/keys/group/{group}?device_id={}", device.device_id),
            &token,
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_CONVERSATION_KEY");
}

#[tokio::test]
async fn test_bad_scope_and_batches_are_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token(unique_id(), None);

    let response = server
        .get_auth("/api/v1/keys/guild/1/devices", &token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_SCOPE");

    let response = server
        .get_auth("/api/v1/keys/dm/5:5/devices", &token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_SCOPE_ID");

    let empty = SaveKeysBody { entries: Vec::new() };
    let response = server
        .put_auth("/api/v1/keys/channel/1", &token, &empty)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

// ============================================================================
// Rate Limiting Tests
// ============================================================================

#[tokio::test]
async fn test_rate_limit_rejects_with_error_body() {
    let server = TestServer::start_with(&[
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1"),
        ("RATE_LIMIT_BURST", "2"),
    ])
    .await
    .expect("Failed to start server");
    let token = server.token(unique_id(), None);

    for _ in 0..2 {
        let response = server.get_auth("/api/v1/users/@me/devices", &token).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server.get_auth("/api/v1/users/@me/devices", &token).await.unwrap();
    assert!(response.headers().contains_key("retry-after"));
    let code = assert_error(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();
    assert_eq!(code, "RATE_LIMIT_EXCEEDED");

    // Health checks are not rate limited
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
