//! Full pipeline runs against a fake Resource Manager endpoint.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use azhealth_application::{HealthReportPipeline, PipelineOptions};
use azhealth_ports::{InMemoryProgressPort, PortSet};

use crate::{AccessToken, AzureRestClient, AzureRestClientConfig};

const RG: &str = "/subscriptions/sub-1/resourceGroups/rg-web";

fn resource(kind: &str, name: &str) -> serde_json::Value {
    json!({
        "id": format!("{RG}/providers/{kind}/{name}"),
        "name": name,
        "type": kind,
        "location": "westeurope"
    })
}

async fn mount_health(server: &MockServer, kind: &str, name: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!(
            "{RG}/providers/{kind}/{name}/providers/Microsoft.ResourceHealth/availabilityStatuses/current"
        )))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn fake_subscription() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/sub-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subscriptionId": "sub-1",
            "displayName": "Web Platform"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{RG}/resources")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                resource("Microsoft.Web/sites", "web&1"),
                resource("Microsoft.Compute/virtualMachines", "vm1"),
                resource("Microsoft.Storage/storageAccounts", "st1"),
            ]
        })))
        .mount(&server)
        .await;

    mount_health(
        &server,
        "Microsoft.Web/sites",
        "web&1",
        ResponseTemplate::new(200)
            .set_body_json(json!({ "properties": { "availabilityState": "Degraded" } })),
    )
    .await;
    mount_health(
        &server,
        "Microsoft.Compute/virtualMachines",
        "vm1",
        ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": "InternalServerError", "message": "try later" }
        })),
    )
    .await;
    mount_health(
        &server,
        "Microsoft.Storage/storageAccounts",
        "st1",
        ResponseTemplate::new(200)
            .set_body_json(json!({ "properties": { "availabilityState": "Available" } })),
    )
    .await;

    Mock::given(method("GET"))
        .and(path(
            "/subscriptions/sub-1/providers/Microsoft.Insights/eventtypes/management/values",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"/providers/Microsoft\.Insights/metricDefinitions$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn test_report_survives_per_resource_failures() {
    let server = fake_subscription().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("AzureHealthReport.html");

    let client = AzureRestClient::new(
        AzureRestClientConfig {
            api_base: server.uri(),
            subscription_id: "sub-1".to_string(),
            request_timeout: Duration::from_secs(5),
        },
        AccessToken::new("token").unwrap(),
    )
    .unwrap();
    let progress = InMemoryProgressPort::default();
    let ports = PortSet::new(Arc::new(client)).with_progress(Arc::new(progress.clone()));
    let pipeline = HealthReportPipeline::new(
        ports,
        PipelineOptions {
            resource_group: Some("rg-web".to_string()),
            days: 7,
            output_path: output.clone(),
        },
    );

    let summary = pipeline.run().await.unwrap();
    assert_eq!(summary.resources, 2);
    assert_eq!(summary.issues, 1);

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<td>web&amp;1</td>"));
    assert!(html.contains("<td>st1</td>"));
    assert!(!html.contains("<td>vm1</td>"));
    assert!(html.contains("<td>Resource is in Degraded state</td>"));

    let warnings: Vec<_> = progress
        .drain_events()
        .into_iter()
        .filter(|event| event.message.contains("vm1"))
        .collect();
    assert_eq!(warnings.len(), 1);
}
