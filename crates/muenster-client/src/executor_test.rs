use super::*;

const TEST_VARIANT: ApiVariant = ApiVariant {
    name: "test API",
    accept: "application/json",
    expected_content_type: "application/json",
    user_agent: "muenster-client-test/0.1",
};

fn test_executor(base_url: &str) -> RequestExecutor {
    RequestExecutor::new(TEST_VARIANT, base_url, 10.0, Session::idle())
        .expect("executor construction should not fail")
}

#[test]
fn build_url_appends_to_base_path() {
    let executor = test_executor("https://opendata.stadt-muenster.de/dataset/");
    let url = executor.build_url("test").unwrap();
    assert_eq!(url.as_str(), "https://opendata.stadt-muenster.de/dataset/test");
}

#[test]
fn build_url_adds_missing_trailing_slash() {
    let executor = test_executor("https://opendata.stadt-muenster.de/dataset");
    let url = executor.build_url("parkhaeuser").unwrap();
    assert_eq!(
        url.as_str(),
        "https://opendata.stadt-muenster.de/dataset/parkhaeuser"
    );
}

#[test]
fn build_url_ignores_leading_slash_in_uri() {
    let executor = test_executor("https://stadt-muenster.de/");
    let url = executor.build_url("/index.php").unwrap();
    assert_eq!(url.as_str(), "https://stadt-muenster.de/index.php");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = RequestExecutor::new(TEST_VARIANT, "not a url", 10.0, Session::idle());
    assert!(
        matches!(result, Err(MuensterError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl, got: {result:?}"
    );
}

#[test]
fn fractional_timeout_is_kept() {
    let executor = RequestExecutor::new(
        TEST_VARIANT,
        "https://stadt-muenster.de/",
        0.1,
        Session::idle(),
    )
    .unwrap();
    assert!((executor.timeout().as_secs_f64() - 0.1).abs() < 1e-9);
}

#[test]
fn non_positive_or_nan_timeout_is_rejected() {
    for secs in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let result = RequestExecutor::new(
            TEST_VARIANT,
            "https://stadt-muenster.de/",
            secs,
            Session::idle(),
        );
        assert!(
            matches!(result, Err(MuensterError::InvalidTimeout(_))),
            "expected InvalidTimeout for {secs}, got: {result:?}"
        );
    }
}

#[test]
fn executor_starts_without_a_session() {
    let executor = test_executor("https://stadt-muenster.de/");
    assert!(!executor.session().owns_session());
    executor.close();
    assert!(!executor.session().is_closed());
}
