//! Graph building against a mocked HTTP registry.

use std::time::Duration;

use depviz::graph::GraphBuilder;
use depviz::source::{PackageSource, RegistrySource, SourceError};
use mockito::Server;

fn document(deps: &[&str]) -> String {
    let deps: serde_json::Map<String, serde_json::Value> = deps
        .iter()
        .map(|name| (name.to_string(), serde_json::Value::from("^1.0.0")))
        .collect();
    serde_json::json!({
        "dist-tags": { "latest": "1.0.0" },
        "versions": { "1.0.0": { "dependencies": deps } }
    })
    .to_string()
}

#[test]
fn test_fetch_dependencies_from_registry() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/express")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(document(&["body-parser", "cookie", "accepts"]))
        .create();

    let source = RegistrySource::new(server.url()).unwrap();
    let deps = source.fetch_dependencies("express").unwrap();

    mock.assert();
    assert_eq!(
        deps,
        Some(vec![
            "body-parser".to_string(),
            "cookie".to_string(),
            "accepts".to_string()
        ])
    );
}

#[test]
fn test_not_found_is_none() {
    let mut server = Server::new();
    server.mock("GET", "/missing").with_status(404).create();

    let source = RegistrySource::new(server.url()).unwrap();
    assert_eq!(source.fetch_dependencies("missing").unwrap(), None);
}

#[test]
fn test_malformed_document_is_none() {
    let mut server = Server::new();
    server
        .mock("GET", "/broken")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create();

    let source = RegistrySource::new(server.url()).unwrap();
    assert_eq!(source.fetch_dependencies("broken").unwrap(), None);
}

#[test]
fn test_trailing_slash_in_base_url() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/leaf")
        .with_status(200)
        .with_body(document(&[]))
        .create();

    let source = RegistrySource::new(format!("{}/", server.url())).unwrap();
    assert_eq!(source.fetch_dependencies("leaf").unwrap(), Some(vec![]));
    mock.assert();
}

#[test]
fn test_build_graph_over_http() {
    let mut server = Server::new();
    let root = server
        .mock("GET", "/app")
        .with_status(200)
        .with_body(document(&["http", "log"]))
        .expect(1)
        .create();
    let http = server
        .mock("GET", "/http")
        .with_status(200)
        .with_body(document(&["log", "net"]))
        .expect(1)
        .create();
    let log = server
        .mock("GET", "/log")
        .with_status(200)
        .with_body(document(&[]))
        .expect(1)
        .create();
    // "net" sits at the depth bound and must never be requested
    let net = server
        .mock("GET", "/net")
        .with_status(200)
        .with_body(document(&[]))
        .expect(0)
        .create();

    let source = RegistrySource::new(server.url()).unwrap();
    let graph = GraphBuilder::new(1).build("app", &source).unwrap();

    root.assert();
    http.assert();
    log.assert();
    net.assert();

    assert_eq!(graph.keys(), vec!["app", "http", "log", "net"]);
    assert_eq!(graph.dependencies("http"), vec!["log", "net"]);

    let order = graph.topological_order().into_packages().unwrap();
    let position = |name: &str| order.iter().position(|n| n == name).unwrap();
    assert!(position("log") < position("http"));
    assert!(position("net") < position("http"));
    assert!(position("http") < position("app"));
}

#[test]
fn test_unreachable_registry_is_fatal() {
    // Nothing listens on the discard port
    let source =
        RegistrySource::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

    let err = source.fetch_dependencies("anything").unwrap_err();
    assert!(matches!(err, SourceError::Unreachable { .. }));

    assert!(GraphBuilder::new(3).build("anything", &source).is_err());
}

#[test]
fn test_scheme_less_registry_url_is_rejected() {
    // A bare host would otherwise make every lookup look like a missing package
    let err = depviz::source::open(false, "registry.npmjs.org").err().unwrap();
    assert!(matches!(err, SourceError::InvalidUrl { .. }));
    assert!(err.to_string().contains("registry.npmjs.org"));
}
