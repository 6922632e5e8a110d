//! Integration tests for identifier resolution against a mock backend
//!
//! Covers the direct-then-fallback repository lookup and the
//! cross-repository pull request search: listing-order wins, lookup misses
//! are swallowed, permission failures abort the scan, and exhaustion is a
//! clean not-found.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use azure_devops_mcp::ado::{AdoClient, AdoError};
use azure_devops_mcp::config::AdoConfig;
use azure_devops_mcp::resolve::{find_pull_request, resolve_repository, Resolution};

fn test_config(server: &MockServer) -> AdoConfig {
    AdoConfig {
        organization_url: server.uri(),
        pat: "test-pat".to_string(),
        ..Default::default()
    }
}

fn client_for(server: &MockServer) -> AdoClient {
    AdoClient::new(&test_config(server))
}

fn repo_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "defaultBranch": "refs/heads/main",
        "webUrl": format!("https://dev.azure.com/contoso/Website/_git/{}", name)
    })
}

fn pr_json(id: u32, title: &str) -> serde_json::Value {
    json!({
        "pullRequestId": id,
        "title": title,
        "status": "active",
        "sourceRefName": "refs/heads/fix/login",
        "targetRefName": "refs/heads/main",
        "createdBy": { "displayName": "Dana" }
    })
}

async fn mount_repo_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "value": [repo_json("aaa-guid", "Api"), repo_json("bbb-guid", "Billing")]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn pr_search_scans_repositories_in_listing_order() {
    let server = MockServer::start().await;
    mount_repo_list(&server).await;

    // No mock for Api's PR 7 -> 404 -> swallowed; Billing has it
    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/bbb-guid/pullrequests/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pr_json(7, "Fix login")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resolution = find_pull_request(&client, "Website", None, 7).await.unwrap();

    match resolution {
        Resolution::Found((repo, pr)) => {
            assert_eq!(repo.name, "Billing");
            assert_eq!(pr.pull_request_id, 7);
            assert_eq!(pr.title, "Fix login");
        }
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn pr_search_prefers_earlier_repository_on_duplicate_ids() {
    let server = MockServer::start().await;
    mount_repo_list(&server).await;

    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/aaa-guid/pullrequests/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pr_json(7, "In Api")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/bbb-guid/pullrequests/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pr_json(7, "In Billing")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resolution = find_pull_request(&client, "Website", None, 7).await.unwrap();

    match resolution {
        Resolution::Found((repo, pr)) => {
            assert_eq!(repo.name, "Api");
            assert_eq!(pr.title, "In Api");
        }
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn pr_search_exhaustion_is_not_found() {
    let server = MockServer::start().await;
    mount_repo_list(&server).await;

    let client = client_for(&server);
    let resolution = find_pull_request(&client, "Website", None, 99).await.unwrap();

    match resolution {
        Resolution::NotFound { searched } => {
            assert_eq!(searched, vec!["Api".to_string(), "Billing".to_string()]);
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn pr_search_aborts_on_permission_failure() {
    let server = MockServer::start().await;
    mount_repo_list(&server).await;

    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/aaa-guid/pullrequests/7"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    // The second repository must never be tried
    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/bbb-guid/pullrequests/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pr_json(7, "unreachable")))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = find_pull_request(&client, "Website", None, 7)
        .await
        .unwrap_err();
    assert!(matches!(err, AdoError::Unauthorized { status: 401 }));
}

#[tokio::test]
async fn pr_search_is_idempotent() {
    let server = MockServer::start().await;
    mount_repo_list(&server).await;

    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/bbb-guid/pullrequests/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pr_json(7, "Fix login")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    for _ in 0..2 {
        let resolution = find_pull_request(&client, "Website", None, 7).await.unwrap();
        match resolution {
            Resolution::Found((repo, _)) => assert_eq!(repo.name, "Billing"),
            other => panic!("expected Found, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn repository_name_falls_back_to_listing_after_direct_miss() {
    let server = MockServer::start().await;
    mount_repo_list(&server).await;

    // Direct lookup by the typed name misses
    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/billing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resolution = resolve_repository(&client, "Website", "billing")
        .await
        .unwrap();

    match resolution {
        Resolution::Found(repo) => {
            assert_eq!(repo.name, "Billing");
            assert_eq!(repo.id, "bbb-guid");
        }
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn repository_resolution_reports_not_found_after_full_scan() {
    let server = MockServer::start().await;
    mount_repo_list(&server).await;

    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/Frontend"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resolution = resolve_repository(&client, "Website", "Frontend")
        .await
        .unwrap();

    match resolution {
        Resolution::NotFound { searched } => assert_eq!(searched.len(), 2),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn explicit_repository_scopes_the_lookup() {
    let server = MockServer::start().await;
    mount_repo_list(&server).await;

    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/Api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("aaa-guid", "Api")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Website/_apis/git/repositories/aaa-guid/pullrequests/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pr_json(7, "Fix login")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resolution = find_pull_request(&client, "Website", Some("Api"), 7)
        .await
        .unwrap();
    assert!(matches!(resolution, Resolution::Found(_)));
}
