use reqwest::StatusCode;
use serde_json::json;

const DEFAULT_REFERENTIEL: &str = "AAAAAAAAAA";
const DEFAULT_USER_ID: &str = "AAAAAAAAAA";
const DEFAULT_DATE_COMMANDE: &str = "1970-01-01T00:00:00Z";
const UPDATED_REFERENTIEL: &str = "BBBBBBBBBB";
const UPDATED_USER_ID: &str = "BBBBBBBBBB";
const UPDATED_DATE_COMMANDE: &str = "2024-01-01T00:00:00Z";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the real router (in-memory store), bound to an ephemeral port.
        let app = commandes_api::app::build_app().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api/commandes", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn default_payload() -> serde_json::Value {
    json!({
        "referentiel": DEFAULT_REFERENTIEL,
        "userId": DEFAULT_USER_ID,
        "dateCommande": DEFAULT_DATE_COMMANDE,
    })
}

async fn create_default(client: &reqwest::Client, base_url: &str) -> serde_json::Value {
    create(client, base_url, default_payload()).await
}

async fn create(
    client: &reqwest::Client,
    base_url: &str,
    payload: serde_json::Value,
) -> serde_json::Value {
    let res = client.post(base_url).json(&payload).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn list(client: &reqwest::Client, base_url: &str) -> Vec<serde_json::Value> {
    let res = client.get(base_url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn create_commande_assigns_an_id_and_echoes_the_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(&srv.base_url)
        .json(&default_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res.headers().get("location").cloned();
    let alert = res.headers().get("x-commandesapp-alert").cloned();
    let body: serde_json::Value = res.json().await.unwrap();

    let id = body["id"].as_i64().expect("id must be assigned");
    assert_eq!(body["referentiel"], DEFAULT_REFERENTIEL);
    assert_eq!(body["userId"], DEFAULT_USER_ID);
    assert_eq!(body["dateCommande"], DEFAULT_DATE_COMMANDE);

    let location = location.expect("Location header must be present");
    assert_eq!(location.to_str().unwrap(), format!("/api/commandes/{}", id));
    let alert = alert.expect("alert header must be present");
    assert!(alert.to_str().unwrap().contains(&id.to_string()));

    assert_eq!(list(&client, &srv.base_url).await.len(), 1);
}

#[tokio::test]
async fn create_with_an_existing_id_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut payload = default_payload();
    payload["id"] = json!(1);

    let res = client.post(&srv.base_url).json(&payload).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "idexists");
    assert_eq!(body["entityName"], "commandesCommande");

    assert!(list(&client, &srv.base_url).await.is_empty());
}

#[tokio::test]
async fn create_requires_every_mandatory_field() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for field in ["referentiel", "userId", "dateCommande"] {
        let mut payload = default_payload();
        payload.as_object_mut().unwrap().remove(field);

        let res = client.post(&srv.base_url).json(&payload).send().await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "field: {field}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "validation");
        assert_eq!(body["fieldErrors"][0]["field"], field);
    }

    assert!(list(&client, &srv.base_url).await.is_empty());
}

#[tokio::test]
async fn full_update_replaces_every_field() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_default(&client, &srv.base_url).await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .put(format!("{}/{}", srv.base_url, id))
        .json(&json!({
            "id": id,
            "referentiel": UPDATED_REFERENTIEL,
            "userId": UPDATED_USER_ID,
            "dateCommande": UPDATED_DATE_COMMANDE,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("x-commandesapp-alert").is_some());

    let fetched: serde_json::Value = client
        .get(format!("{}/{}", srv.base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["referentiel"], UPDATED_REFERENTIEL);
    assert_eq!(fetched["userId"], UPDATED_USER_ID);
    assert_eq!(fetched["dateCommande"], UPDATED_DATE_COMMANDE);
}

#[tokio::test]
async fn update_rejects_a_null_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_default(&client, &srv.base_url).await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .put(format!("{}/{}", srv.base_url, id))
        .json(&default_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "idnull");
}

#[tokio::test]
async fn update_rejects_a_mismatched_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_default(&client, &srv.base_url).await;
    let id = created["id"].as_i64().unwrap();

    let mut payload = default_payload();
    payload["id"] = json!(id + 1);

    let res = client
        .put(format!("{}/{}", srv.base_url, id))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "idinvalid");
}

#[tokio::test]
async fn update_rejects_an_id_absent_from_the_store() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut payload = default_payload();
    payload["id"] = json!(12345);

    let res = client
        .put(format!("{}/12345", srv.base_url))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "idnotfound");
}

#[tokio::test]
async fn partial_update_merges_only_the_provided_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_default(&client, &srv.base_url).await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .patch(format!("{}/{}", srv.base_url, id))
        .header("content-type", "application/merge-patch+json")
        .body(json!({ "id": id, "dateCommande": UPDATED_DATE_COMMANDE }).to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let merged: serde_json::Value = res.json().await.unwrap();
    assert_eq!(merged["referentiel"], DEFAULT_REFERENTIEL);
    assert_eq!(merged["dateCommande"], UPDATED_DATE_COMMANDE);

    let fetched: serde_json::Value = client
        .get(format!("{}/{}", srv.base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["referentiel"], DEFAULT_REFERENTIEL);
    assert_eq!(fetched["userId"], DEFAULT_USER_ID);
    assert_eq!(fetched["dateCommande"], UPDATED_DATE_COMMANDE);
}

#[tokio::test]
async fn partial_update_rejects_an_id_absent_from_the_store() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/12345", srv.base_url))
        .json(&json!({ "id": 12345, "userId": UPDATED_USER_ID }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "idnotfound");
}

#[tokio::test]
async fn partial_update_rejects_a_mismatched_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_default(&client, &srv.base_url).await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .patch(format!("{}/{}", srv.base_url, id))
        .json(&json!({ "id": id + 1, "userId": UPDATED_USER_ID }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "idinvalid");
}

#[tokio::test]
async fn get_a_missing_commande_returns_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/12345", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_exactly_one_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let first = create_default(&client, &srv.base_url).await;
    let mut second_payload = default_payload();
    second_payload["referentiel"] = json!(UPDATED_REFERENTIEL);
    create(&client, &srv.base_url, second_payload).await;

    let id = first["id"].as_i64().unwrap();
    let res = client
        .delete(format!("{}/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.headers().get("x-commandesapp-alert").is_some());

    let remaining = list(&client, &srv.base_url).await;
    assert_eq!(remaining.len(), 1);
    assert!(remaining.iter().all(|c| c["id"].as_i64() != Some(id)));

    // Delete of a now-absent id still answers 204.
    let res = client
        .delete(format!("{}/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn list_supports_sort_and_pagination_parameters() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for referentiel in ["B", "A", "C"] {
        let mut payload = default_payload();
        payload["referentiel"] = json!(referentiel);
        create(&client, &srv.base_url, payload).await;
    }

    let sorted: Vec<serde_json::Value> = client
        .get(format!("{}?sort=referentiel,asc", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let order: Vec<&str> = sorted
        .iter()
        .map(|c| c["referentiel"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["A", "B", "C"]);

    let page: Vec<serde_json::Value> = client
        .get(format!("{}?page=0&size=2", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn duplicate_referentiel_surfaces_as_a_server_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_default(&client, &srv.base_url).await;

    let res = client
        .post(&srv.base_url)
        .json(&default_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(list(&client, &srv.base_url).await.len(), 1);
}
