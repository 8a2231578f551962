//! Weather Domain Helpers
//!
//! Small pure functions: session resolution, deterministic report
//! synthesis, and report formatting.

use super::models::WeatherReport;
use axum::http::HeaderMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Cookie under which the widget session id travels.
pub const SESSION_COOKIE: &str = "widget_session";

/// Conditions a synthesized report can carry.
const CONDITIONS: [&str; 4] = ["sunny", "cloudy", "rainy", "snowy"];

/// Resolves the session id from the `widget_session` cookie, minting a fresh
/// UUID when the caller has none. The boolean is `true` for a new session,
/// so the handler knows to set the cookie on the response.
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == SESSION_COOKIE).then(|| value.to_string())
            })
        });

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// Returns the provided `session_id` or falls back to the cookie session.
pub fn get_or_default_session_id(session_id: Option<String>, cookie_session: &str) -> String {
    session_id.unwrap_or_else(|| cookie_session.to_string())
}

/// Lowercased, trimmed key for the report store.
pub fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Synthesizes a stable report for a city the server has never seen.
///
/// Temperature lands in [-5, 35) and the condition is picked from a fixed
/// table, both derived from a hash of the normalized name, so repeat calls
/// for the same city always agree.
pub fn synthesize_report(city: &str) -> WeatherReport {
    let mut hasher = DefaultHasher::new();
    normalize_city(city).hash(&mut hasher);
    let seed = hasher.finish();

    WeatherReport {
        city: city.trim().to_string(),
        temperature: (seed % 40) as i64 - 5,
        weather: CONDITIONS[(seed / 40) as usize % CONDITIONS.len()].to_string(),
    }
}

/// Produces a human-readable one-line summary for a report.
///
/// Example output: `"Paris: 22°C, sunny"`.
pub fn format_report(report: &WeatherReport) -> String {
    format!(
        "{}: {}°C, {}",
        report.city, report.temperature, report.weather
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn synthesized_reports_are_deterministic() {
        let a = synthesize_report("Paris");
        let b = synthesize_report("  paris ");
        assert_eq!(a.temperature, b.temperature);
        assert_eq!(a.weather, b.weather);
        assert!((-5..35).contains(&a.temperature));
        assert!(CONDITIONS.contains(&a.weather.as_str()));
    }

    #[test]
    fn session_resolution_prefers_the_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "other=1; widget_session=abc123; more=2".parse().unwrap(),
        );

        let (id, is_new) = resolve_session_id(&headers);
        assert_eq!(id, "abc123");
        assert!(!is_new);
    }

    #[test]
    fn session_resolution_mints_when_absent() {
        let (id, is_new) = resolve_session_id(&HeaderMap::new());
        assert!(is_new);
        assert!(!id.is_empty());
    }

    #[test]
    fn report_summary_formatting() {
        let report = WeatherReport {
            city: "Paris".into(),
            temperature: 22,
            weather: "sunny".into(),
        };
        assert_eq!(format_report(&report), "Paris: 22°C, sunny");
    }
}
