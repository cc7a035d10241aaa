//! Integration tests for `NovaClient` using wiremock HTTP mocks.

use provider_directory::api::{NovaClient, SuggestionKind};
use provider_directory::domain::{ActivityStatus, DirectoryError, PatientAcceptance, RecordId};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NovaClient {
    NovaClient::with_base_url(base_url, 30).expect("client construction should not fail")
}

#[tokio::test]
async fn roster_is_parsed_and_normalized() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "practitionerId": 101,
            "practiceLocationId": "L-1",
            "fullName": "  Alice Smith ",
            "city": "",
            "state": "MA",
            "latitude": "42.3601",
            "longitude": -71.0589,
            "acceptNewPatients": 100_000_001,
            "stateCode": 1,
            "officePhoneNumber": "555-0100"
        },
        {
            "practitionerId": "102",
            "practiceLocationId": "L-2",
            "fullName": "Bob Jones",
            "latitude": null,
            "longitude": null,
            "acceptNewPatients": null,
            "stateCode": 0
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/organizations/7/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .organization_locations(&RecordId::from("7"))
        .await
        .expect("should parse roster");

    assert_eq!(records.len(), 2);
    let alice = &records[0];
    assert_eq!(alice.practitioner_id.as_str(), "101");
    assert_eq!(alice.full_name.as_deref(), Some("Alice Smith"));
    assert_eq!(alice.city, None);
    assert_eq!(alice.accept_new_patients, PatientAcceptance::Accepting);
    assert_eq!(alice.state_code, ActivityStatus::Inactive);
    assert!(alice.coordinates().is_some());

    let bob = &records[1];
    assert_eq!(bob.accept_new_patients, PatientAcceptance::Unknown);
    assert_eq!(bob.state_code, ActivityStatus::Active);
    assert!(bob.coordinates().is_none());
}

#[tokio::test]
async fn missing_roster_is_organization_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations/404/locations"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .organization_locations(&RecordId::from("404"))
        .await
        .expect_err("404 should be an error");

    assert!(matches!(err, DirectoryError::OrganizationNotFound(id) if id == "404"));
}

#[tokio::test]
async fn exists_check_reads_the_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/organizations/7/exists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "exists": false })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let exists = client
        .organization_exists(&RecordId::from("7"))
        .await
        .expect("should parse exists flag");

    assert!(!exists);
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/states"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.states().await.expect_err("503 should be an error");

    match err {
        DirectoryError::Api(message) => {
            assert!(message.contains("503"), "message: {message}");
            assert!(message.contains("maintenance window"), "message: {message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_deserialize_error_with_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/states"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.states().await.expect_err("bad JSON should be an error");

    assert!(matches!(err, DirectoryError::Deserialize { ref context, .. } if context == "states"));
}

#[tokio::test]
async fn all_suggestions_merges_both_lists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/suggestions"))
        .and(query_param("query", "card"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Cardiology", "type": "specialty" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/organizations/suggestions"))
        .and(query_param("query", "card"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 12, "name": "Cardinal Health Partners", "city": "Boston", "state": "MA" }
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let suggestions = client.all_suggestions("card").await.expect("should merge suggestions");

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].kind, SuggestionKind::Specialty);
    assert_eq!(suggestions[1].kind, SuggestionKind::Organization);
    assert_eq!(suggestions[1].id.as_ref().map(RecordId::as_str), Some("12"));
    assert_eq!(suggestions[1].detail.as_deref(), Some("Boston, MA"));
}

#[tokio::test]
async fn practitioner_profile_locations_are_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/practitioners/101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "practitionerId": 101,
            "fullName": "Alice Smith",
            "npi": "1234567890",
            "specialties": ["Cardiology"],
            "languages": ["English", "Spanish"],
            "locations": [
                { "practitionerId": 101, "practiceLocationId": "L-1", "city": "  Boston  " }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let profile = client
        .practitioner(&RecordId::from("101"))
        .await
        .expect("should parse profile");

    assert_eq!(profile.npi.as_deref(), Some("1234567890"));
    assert_eq!(profile.languages, ["English", "Spanish"]);
    assert_eq!(profile.locations[0].city.as_deref(), Some("Boston"));
}
