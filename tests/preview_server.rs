//! Preview server over a real listener.

use std::time::Duration;
use file_router::http::{PreviewServer, ROUTES_PATH};
use file_router::FileRouterConfig;
use tokio::sync::oneshot;

mod common;
use common::RouteTree;

#[tokio::test]
async fn test_preview_server_serves_tree() {
    let tree = RouteTree::with_files(&[
        "route.rs",
        "users/route.rs",
        "users/[user_id]/profile.rs",
        "users/helpers/mod.rs",
    ]);

    let server = PreviewServer::from_directory(tree.root(), &FileRouterConfig::default()).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        server
            .run(listener, async {
                let _ = stop_rx.await;
            })
            .await
    });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{}/users/alice/profile", addr))
        .send()
        .await
        .expect("Preview server unreachable");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["route"], "/users/{user_id}/profile");
    assert_eq!(body["params"]["user_id"], "alice");

    let res = client.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["route"], "/");

    let res = client.get(format!("http://{}{}", addr, ROUTES_PATH)).send().await.unwrap();
    let table: serde_json::Value = res.json().await.unwrap();
    let prefixes: Vec<&str> = table
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["prefix"].as_str().unwrap())
        .collect();
    assert_eq!(prefixes, vec!["", "/users", "/users/{user_id}/profile"]);

    let res = client.get(format!("http://{}/nothing/here", addr)).send().await.unwrap();
    assert_eq!(res.status(), 404);

    drop(client);
    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
