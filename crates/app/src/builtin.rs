//! Suites shipped with the binary.
//!
//! Target URLs come from the run configuration so the same suites can
//! be pointed at a local fake:
//! - `API_USERS_URL` (default `https://reqres.in/api/users`)
//! - `USERS_LIST_URL` (default `https://jsonplaceholder.typicode.com/users`)
//! - `API_BASE_URL` (required by the secret-passed suite, no default)

use apiprobe_application::{SuiteDefinitionError, SuiteRegistry};
use apiprobe_domain::{Assertion, ComparisonOperator, RequestSpec, RunConfig, TestCase};
use serde_json::json;

/// Config name for the CRUD suite's users endpoint.
pub const USERS_URL_VAR: &str = "API_USERS_URL";
/// Config name for the list endpoint.
pub const USERS_LIST_URL_VAR: &str = "USERS_LIST_URL";

const DEFAULT_USERS_URL: &str = "https://reqres.in/api/users";
const DEFAULT_USERS_LIST_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Registers every built-in suite.
///
/// # Errors
///
/// Returns [`SuiteDefinitionError`] if a suite name is already taken.
pub fn register(registry: &mut SuiteRegistry, config: &RunConfig) -> Result<(), SuiteDefinitionError> {
    let users_url = config.resolve_or(USERS_URL_VAR, DEFAULT_USERS_URL);
    let list_url = config.resolve_or(USERS_LIST_URL_VAR, DEFAULT_USERS_LIST_URL);

    registry.define_suite("API CRUD Tests - ReqRes", crud_cases(users_url))?;
    registry.define_suite(
        "Users API",
        vec![
            TestCase::request("Verify GET users API call", RequestSpec::get(list_url))
                .expect_status(200)
                .expect_length(ComparisonOperator::Equals, 10),
        ],
    )?;
    registry.define_suite("GET API", length_cases(list_url))?;
    registry.define_suite("GET API (API_BASE_URL)", length_cases("{{API_BASE_URL}}/users"))?;
    registry.define_suite(
        "Repository Variable",
        vec![
            TestCase::config_check("REPO_VARIABLE equals 31").expect(Assertion::config(
                "REPO_VARIABLE",
                ComparisonOperator::Equals,
                json!(31),
            )),
        ],
    )?;
    Ok(())
}

fn crud_cases(users_url: &str) -> Vec<TestCase> {
    let user_url = format!("{users_url}/2");
    vec![
        TestCase::request(
            "Verify Create (POST)",
            RequestSpec::post(users_url, json!({"name": "John Doe", "job": "QA Engineer"})),
        )
        .expect_status(201)
        .expect_property("$.name", json!("John Doe"))
        .expect_property("$.job", json!("QA Engineer"))
        .capture("userId", "$.id"),
        TestCase::request("Verify Read (GET)", RequestSpec::get(user_url.clone()))
            .expect_status(200)
            .expect_property("$.data.id", json!(2))
            .expect_exists("$.data.email"),
        TestCase::request(
            "Verify Update (PUT)",
            RequestSpec::put(user_url.clone(), json!({"name": "John Updated", "job": "Senior QA"})),
        )
        .expect_status(200)
        .expect_property("$.name", json!("John Updated"))
        .expect_property("$.job", json!("Senior QA")),
        TestCase::request(
            "Verify Delete (DELETE)",
            RequestSpec::delete(user_url).fail_on_status_code(false),
        )
        .expect_status(204),
    ]
}

fn length_cases(url: &str) -> Vec<TestCase> {
    [
        ("API Test - 1", ComparisonOperator::Equals, 10),
        ("API Test - 2", ComparisonOperator::GreaterThan, 4),
        ("API Test - 3", ComparisonOperator::LessThan, 100),
    ]
    .into_iter()
    .map(|(name, operator, length)| {
        TestCase::request(name, RequestSpec::get(url))
            .expect_status(200)
            .expect_length(operator, length)
    })
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry(config: &RunConfig) -> SuiteRegistry {
        let mut registry = SuiteRegistry::new();
        register(&mut registry, config).unwrap();
        registry
    }

    #[test]
    fn test_builtin_suites_registered_in_order() {
        let registry = registry(&RunConfig::new());
        let names: Vec<&str> = registry.suites().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "API CRUD Tests - ReqRes",
                "Users API",
                "GET API",
                "GET API (API_BASE_URL)",
                "Repository Variable",
            ]
        );
    }

    #[test]
    fn test_default_urls() {
        let registry = registry(&RunConfig::new());
        let crud = registry.get("API CRUD Tests - ReqRes").unwrap();
        assert_eq!(crud.cases.len(), 4);
        assert_eq!(
            crud.cases[0].request_spec().map(|r| r.url.as_str()),
            Some("https://reqres.in/api/users")
        );
        assert_eq!(
            crud.cases[3].request_spec().map(|r| r.fail_on_status_code),
            Some(false)
        );

        let list = registry.get("GET API").unwrap();
        assert_eq!(
            list.cases[2].request_spec().map(|r| r.url.as_str()),
            Some("https://jsonplaceholder.typicode.com/users")
        );
    }

    #[test]
    fn test_urls_overridable() {
        let config = RunConfig::new()
            .with(USERS_URL_VAR, "http://127.0.0.1:9/api/users")
            .with(USERS_LIST_URL_VAR, "http://127.0.0.1:9/users");
        let registry = registry(&config);

        let read = &registry.get("API CRUD Tests - ReqRes").unwrap().cases[1];
        assert_eq!(
            read.request_spec().map(|r| r.url.as_str()),
            Some("http://127.0.0.1:9/api/users/2")
        );
        let users = &registry.get("Users API").unwrap().cases[0];
        assert_eq!(
            users.request_spec().map(|r| r.url.as_str()),
            Some("http://127.0.0.1:9/users")
        );
    }

    #[test]
    fn test_secret_passed_suite_keeps_template() {
        let registry = registry(&RunConfig::new().with("API_BASE_URL", "https://x"));
        let suite = registry.get("GET API (API_BASE_URL)").unwrap();
        assert!(suite.cases.iter().all(|c| {
            c.request_spec().map(|r| r.url.as_str()) == Some("{{API_BASE_URL}}/users")
        }));
    }
}
