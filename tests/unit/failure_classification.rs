//! Unit tests for failed-attempt classification and log lines

use reqwest::StatusCode;
use std::time::Duration;
use trade_journal_exporter::fetcher::failure::{classify, AttemptReport, FailureKind};
use trade_journal_exporter::fetcher::FetcherError;

#[test]
fn test_status_classification() {
    let cases = [
        (StatusCode::BAD_REQUEST, FailureKind::BadRequest),
        (StatusCode::UNAUTHORIZED, FailureKind::Auth(401)),
        (StatusCode::FORBIDDEN, FailureKind::Auth(403)),
        (StatusCode::NOT_FOUND, FailureKind::Status(404)),
        (StatusCode::TOO_MANY_REQUESTS, FailureKind::TooManyRequests),
        (StatusCode::INTERNAL_SERVER_ERROR, FailureKind::Server(500)),
        (StatusCode::BAD_GATEWAY, FailureKind::Server(502)),
        (StatusCode::SERVICE_UNAVAILABLE, FailureKind::Server(503)),
        (StatusCode::MOVED_PERMANENTLY, FailureKind::Status(301)),
    ];

    for (status, expected) in cases {
        assert_eq!(classify(Some(status), None), expected, "{status}");
    }
}

#[test]
fn test_nothing_known_is_a_network_failure() {
    assert_eq!(classify(None, None), FailureKind::Network);
}

#[test]
fn test_retry_line() {
    let report = AttemptReport::new("/trades", 1, 3, FailureKind::Server(503))
        .waiting(Duration::from_secs(2));

    assert_eq!(
        report.retry_line(),
        "GET /trades failed (attempt 1/3, HTTP 503 Service Unavailable); retrying in 2.0s"
    );
}

#[test]
fn test_gave_up_lines_carry_error_and_hint() {
    let report = AttemptReport::new("/trades", 1, 3, FailureKind::Auth(401));
    let lines = report.gave_up_lines(&FetcherError::Auth { status: 401 });

    let mut lines = lines.lines();
    assert_eq!(
        lines.next().unwrap(),
        "GET /trades gave up after attempt 1/3 (HTTP 401 Unauthorized)"
    );
    assert!(lines.next().unwrap().contains("authentication failed (HTTP 401)"));
    assert!(lines.next().unwrap().contains("TRADERVUE_USERNAME"));
}

#[test]
fn test_recovered_line() {
    let report = AttemptReport::new("/trades/7/executions", 2, 3, FailureKind::Timeout);
    assert_eq!(
        report.recovered_line(),
        "GET /trades/7/executions succeeded on attempt 2/3"
    );
}
