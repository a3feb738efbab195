use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, TimeZone, Utc};
use latchkey_adapters::{HashMapTokenStore, HashMapUserStore, MockNotificationService};
use latchkey_auth_service::{build_auth_service, spawn_session_sweeper};
use latchkey_core::{Token, TokenStore, fixed_clock};

use crate::helpers::test_settings;

#[tokio::test]
async fn should_drop_expired_sessions_on_the_first_tick() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let sessions = HashMapTokenStore::new();
    let service = build_auth_service(
        &test_settings().auth,
        HashMapUserStore::new(),
        sessions.clone(),
        MockNotificationService::new(),
        fixed_clock(now),
    )
    .unwrap();

    sessions
        .put(&Token {
            token: "stale".to_owned(),
            expires: now - TimeDelta::seconds(1),
        })
        .await
        .unwrap();
    sessions
        .put(&Token {
            token: "live".to_owned(),
            expires: now + TimeDelta::days(1),
        })
        .await
        .unwrap();

    let sweeper = spawn_session_sweeper(Arc::new(service), Duration::from_secs(3600));

    let mut remaining = Vec::new();
    for _ in 0..100 {
        remaining = sessions.list().await.unwrap();
        if remaining.len() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    sweeper.abort();

    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].token, "live");
}
