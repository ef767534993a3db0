use bci_link::link::mock::ScriptedLink;
use bci_link::{
    GraphQlError, GraphQlResponse, Link, LinkError, Operation, RetryLink, RetryPolicy,
    TransportErrorKind,
};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn op() -> Operation {
    Operation::new("GetMemoryStats", "query { memoryStats { success } }", json!({}))
}

fn unavailable() -> Result<GraphQlResponse, LinkError> {
    Err(LinkError::transport(
        "GetMemoryStats",
        TransportErrorKind::HttpServer(503),
        "HTTP error! status: 503 Service Unavailable",
    ))
}

fn ok() -> Result<GraphQlResponse, LinkError> {
    Ok(GraphQlResponse::from_data(json!({"memoryStats": {"success": true}})))
}

fn no_jitter() -> RetryPolicy {
    RetryPolicy {
        jitter: false,
        ..RetryPolicy::default()
    }
}

// ── Policy defaults ─────────────────────────────────────────────

#[test]
fn default_policy_matches_schedule() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.initial_delay, Duration::from_millis(300));
    assert_eq!(policy.max_delay, Duration::from_millis(30_000));
    assert_eq!(policy.max_attempts, 3);
    assert!(policy.jitter);
}

#[test]
fn base_delay_doubles_then_caps() {
    let policy = no_jitter();
    assert_eq!(policy.base_delay(1), Duration::from_millis(300));
    assert_eq!(policy.base_delay(2), Duration::from_millis(600));
    assert_eq!(policy.base_delay(3), Duration::from_millis(1200));
    assert_eq!(policy.base_delay(8), Duration::from_millis(30_000));
    assert_eq!(policy.base_delay(u32::MAX), Duration::from_millis(30_000));
}

#[test]
fn jittered_delay_stays_within_bounds() {
    let policy = RetryPolicy::default();
    for retry in 1..10 {
        let base = policy.base_delay(retry);
        for _ in 0..50 {
            let delay = policy.delay_for(retry);
            assert!(delay >= base.min(policy.max_delay));
            assert!(delay <= policy.max_delay);
            assert!(delay <= base + base / 2);
        }
    }
}

#[test]
fn disabled_policy_allows_single_attempt() {
    let policy = RetryPolicy::disabled();
    let err = LinkError::transport("op", TransportErrorKind::Network, "reset");
    assert!(!policy.allows_another(1, &err));
}

proptest! {
    #[test]
    fn base_delay_is_monotonic_and_bounded(
        initial_ms in 1u64..5_000,
        max_ms in 5_000u64..60_000,
        retry in 1u32..40,
    ) {
        let policy = RetryPolicy {
            initial_delay: Duration::from_millis(initial_ms),
            max_delay: Duration::from_millis(max_ms),
            max_attempts: 3,
            jitter: false,
        };
        let current = policy.base_delay(retry);
        let next = policy.base_delay(retry + 1);
        prop_assert!(next >= current);
        prop_assert!(current >= policy.initial_delay.min(policy.max_delay));
        prop_assert!(current <= policy.max_delay);
    }

    #[test]
    fn jitter_never_shortens_delay(retry in 1u32..20) {
        let policy = RetryPolicy::default();
        prop_assert!(policy.delay_for(retry) >= policy.base_delay(retry));
        prop_assert!(policy.delay_for(retry) >= policy.initial_delay);
    }
}

// ── Retry link ──────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn transient_failures_are_capped_at_three_attempts() {
    let script = Arc::new(ScriptedLink::always(unavailable()));
    let link = RetryLink::new(Arc::clone(&script), no_jitter());

    let err = link.execute(&op()).await.unwrap_err();

    assert_eq!(script.call_count(), 3);
    assert_eq!(err.status(), Some(503));
}

#[tokio::test(start_paused = true)]
async fn success_returns_immediately() {
    let script = Arc::new(ScriptedLink::always(ok()));
    let link = RetryLink::new(Arc::clone(&script), no_jitter());

    let start = Instant::now();
    link.execute(&op()).await.unwrap();

    assert_eq!(script.call_count(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn recovers_on_second_attempt_after_initial_delay() {
    let script = Arc::new(ScriptedLink::sequence(vec![unavailable()], ok()));
    let link = RetryLink::new(Arc::clone(&script), no_jitter());

    let start = Instant::now();
    let response = link.execute(&op()).await.unwrap();

    assert!(response.usable_data().is_some());
    assert_eq!(script.call_count(), 2);
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn delays_accumulate_between_attempts() {
    let script = Arc::new(ScriptedLink::always(unavailable()));
    let link = RetryLink::new(Arc::clone(&script), no_jitter());

    let start = Instant::now();
    let _ = link.execute(&op()).await;

    // 300ms before retry 1, 600ms before retry 2.
    assert_eq!(start.elapsed(), Duration::from_millis(900));
}

#[tokio::test(start_paused = true)]
async fn client_errors_are_not_retried() {
    let script = Arc::new(ScriptedLink::always(Err(LinkError::transport(
        "GetMemoryStats",
        TransportErrorKind::HttpClient(400),
        "HTTP error! status: 400 Bad Request",
    ))));
    let link = RetryLink::new(Arc::clone(&script), no_jitter());

    let err = link.execute(&op()).await.unwrap_err();

    assert_eq!(script.call_count(), 1);
    assert_eq!(err.status(), Some(400));
}

#[tokio::test(start_paused = true)]
async fn application_errors_pass_through_without_retry() {
    let script = Arc::new(ScriptedLink::always(Ok(GraphQlResponse::from_errors(vec![
        GraphQlError::new("resolver exploded"),
    ]))));
    let link = RetryLink::new(Arc::clone(&script), no_jitter());

    let response = link.execute(&op()).await.unwrap();

    assert_eq!(script.call_count(), 1);
    assert_eq!(response.errors[0].message, "resolver exploded");
}

#[tokio::test(start_paused = true)]
async fn timeouts_and_refused_connections_are_retried() {
    let script = Arc::new(ScriptedLink::sequence(
        vec![
            Err(LinkError::transport("op", TransportErrorKind::Timeout, "timed out")),
            Err(LinkError::transport(
                "op",
                TransportErrorKind::ConnectionRefused,
                "connection refused",
            )),
        ],
        ok(),
    ));
    let link = RetryLink::new(Arc::clone(&script), no_jitter());

    assert!(link.execute(&op()).await.is_ok());
    assert_eq!(script.call_count(), 3);
}
