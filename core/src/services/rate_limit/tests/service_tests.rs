//! Sliding-window behaviour tests against the in-memory store

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use pnr_shared::config::rate_limit::{RateLimitConfig, RateLimitPolicy};

use crate::services::cache::{CacheStore, MemoryCacheStore};
use crate::services::rate_limit::{
    code_verification_identifier, login_email_identifier, login_ip_identifier,
    recovery_request_identifier, registration_identifier, RateLimitDecision, RateLimiter,
};

fn limiter() -> (RateLimiter<MemoryCacheStore>, Arc<MemoryCacheStore>) {
    let store = Arc::new(MemoryCacheStore::new());
    (
        RateLimiter::new(store.clone(), RateLimitConfig::default()),
        store,
    )
}

/// Write a crafted timestamp list straight into the store
async fn seed(store: &MemoryCacheStore, identifier: &str, ages_seconds: &[i64]) {
    let now = Utc::now();
    let stamps: Vec<DateTime<Utc>> = ages_seconds
        .iter()
        .map(|age| now - Duration::seconds(*age))
        .collect();
    store
        .set_with_ttl(
            &format!("rate_limit:{}", identifier),
            &serde_json::to_string(&stamps).unwrap(),
            1800,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_fresh_identifier_is_allowed() {
    let (limiter, _) = limiter();
    let policy = RateLimitPolicy::new(5, 15);

    // remaining counts what is left after this attempt gets recorded
    let decision = limiter.check("ip:10.0.0.1", &policy).await.unwrap();
    assert_eq!(decision, RateLimitDecision::Allowed { remaining: 4 });
}

#[tokio::test]
async fn test_recording_consumes_capacity() {
    let (limiter, _) = limiter();
    let policy = RateLimitPolicy::new(5, 15);

    limiter.record("ip:10.0.0.1").await.unwrap();
    limiter.record("ip:10.0.0.1").await.unwrap();

    let decision = limiter.check("ip:10.0.0.1", &policy).await.unwrap();
    assert_eq!(decision, RateLimitDecision::Allowed { remaining: 2 });
}

#[tokio::test]
async fn test_check_alone_never_consumes() {
    let (limiter, _) = limiter();
    let policy = RateLimitPolicy::new(5, 15);

    for _ in 0..20 {
        let decision = limiter.check("ip:10.0.0.1", &policy).await.unwrap();
        assert_eq!(decision, RateLimitDecision::Allowed { remaining: 4 });
    }
}

#[tokio::test]
async fn test_limited_once_window_is_full() {
    let (limiter, _) = limiter();
    let policy = RateLimitPolicy::new(5, 15);

    for _ in 0..5 {
        limiter.record("email:ana@example.com").await.unwrap();
    }

    let decision = limiter.check("email:ana@example.com", &policy).await.unwrap();
    match decision {
        RateLimitDecision::Limited {
            retry_after_seconds,
        } => {
            // all five attempts just happened, so the wait is roughly a full window
            assert!(retry_after_seconds >= 1);
            assert!(retry_after_seconds <= policy.window_seconds() as u64);
        }
        other => panic!("expected Limited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_attempts_outside_window_are_ignored() {
    let (limiter, store) = limiter();
    let policy = RateLimitPolicy::new(5, 15);

    // five attempts, all older than the 900s window
    seed(&store, "ip:10.0.0.1", &[901, 1000, 1200, 1500, 1799]).await;

    let decision = limiter.check("ip:10.0.0.1", &policy).await.unwrap();
    assert_eq!(decision, RateLimitDecision::Allowed { remaining: 4 });
}

#[tokio::test]
async fn test_attempt_exactly_window_old_is_out() {
    let (limiter, store) = limiter();
    let policy = RateLimitPolicy::new(1, 15);

    // retention is strict: an attempt aged exactly one window no longer counts
    seed(&store, "ip:10.0.0.1", &[900]).await;

    let decision = limiter.check("ip:10.0.0.1", &policy).await.unwrap();
    assert_eq!(decision, RateLimitDecision::Allowed { remaining: 0 });
}

#[tokio::test]
async fn test_retry_after_tracks_oldest_live_attempt() {
    let (limiter, store) = limiter();
    let policy = RateLimitPolicy::new(5, 15);

    // oldest live attempt is 840s old; capacity frees up in ~60s
    seed(&store, "ip:10.0.0.1", &[840, 700, 500, 300, 10]).await;

    let decision = limiter.check("ip:10.0.0.1", &policy).await.unwrap();
    match decision {
        RateLimitDecision::Limited {
            retry_after_seconds,
        } => {
            assert!(
                (55..=60).contains(&retry_after_seconds),
                "expected ~60s, got {}",
                retry_after_seconds
            );
        }
        other => panic!("expected Limited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_clear_resets_the_window() {
    let (limiter, _) = limiter();
    let policy = RateLimitPolicy::new(3, 30);

    for _ in 0..3 {
        limiter.record("recovery:10.0.0.1").await.unwrap();
    }
    assert!(!limiter
        .check("recovery:10.0.0.1", &policy)
        .await
        .unwrap()
        .is_allowed());

    limiter.clear("recovery:10.0.0.1").await.unwrap();

    let decision = limiter.check("recovery:10.0.0.1", &policy).await.unwrap();
    assert_eq!(decision, RateLimitDecision::Allowed { remaining: 2 });
}

#[tokio::test]
async fn test_disabled_limiter_always_allows() {
    let store = Arc::new(MemoryCacheStore::new());
    let mut config = RateLimitConfig::default();
    config.enabled = false;
    let limiter = RateLimiter::new(store, config);
    let policy = RateLimitPolicy::new(2, 15);

    for _ in 0..10 {
        limiter.record("ip:10.0.0.1").await.unwrap();
    }
    let decision = limiter.check("ip:10.0.0.1", &policy).await.unwrap();
    assert_eq!(decision, RateLimitDecision::Allowed { remaining: 1 });
}

#[tokio::test]
async fn test_corrupt_entry_is_discarded() {
    let (limiter, store) = limiter();
    let policy = RateLimitPolicy::new(5, 15);

    store
        .set_with_ttl("rate_limit:ip:10.0.0.1", "not json at all", 60)
        .await
        .unwrap();

    let decision = limiter.check("ip:10.0.0.1", &policy).await.unwrap();
    assert_eq!(decision, RateLimitDecision::Allowed { remaining: 4 });

    // recording over the corrupt entry heals it
    limiter.record("ip:10.0.0.1").await.unwrap();
    let decision = limiter.check("ip:10.0.0.1", &policy).await.unwrap();
    assert_eq!(decision, RateLimitDecision::Allowed { remaining: 3 });
}

#[tokio::test]
async fn test_identifiers_are_scoped_per_key() {
    let (limiter, _) = limiter();
    let policy = RateLimitPolicy::new(2, 15);

    limiter.record("ip:10.0.0.1").await.unwrap();
    limiter.record("ip:10.0.0.1").await.unwrap();

    assert!(!limiter.check("ip:10.0.0.1", &policy).await.unwrap().is_allowed());
    assert!(limiter.check("ip:10.0.0.2", &policy).await.unwrap().is_allowed());
    assert!(limiter
        .check("email:ana@example.com", &policy)
        .await
        .unwrap()
        .is_allowed());
}

#[test]
fn test_identifier_formats() {
    assert_eq!(login_ip_identifier("203.0.113.9"), "ip:203.0.113.9");
    assert_eq!(
        login_email_identifier("  Ana@Example.COM "),
        "email:ana@example.com"
    );
    assert_eq!(registration_identifier("203.0.113.9"), "register:203.0.113.9");
    assert_eq!(recovery_request_identifier("203.0.113.9"), "recovery:203.0.113.9");
    assert_eq!(
        code_verification_identifier("203.0.113.9", "Ana@Example.com"),
        "verify:203.0.113.9:ana@example.com"
    );
}
