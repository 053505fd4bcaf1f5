//! HTTP gateway tests against an in-process record store.
//!
//! The fake store keeps raw JSON values, as a JSON file server would, and
//! seeds records with numeric ids and years.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Url;
use serde_json::{json, Value};
use shelf_client::{HttpGateway, NetworkError, RecordStore, Session};
use shelf_engine::{Book, Genre, Intent, Status, Year};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Db = Arc<Mutex<Vec<Value>>>;

fn id_of(record: &Value) -> String {
    match &record["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn list(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.lock().unwrap().clone())
}

async fn create(State(db): State<Db>, Json(record): Json<Value>) -> (StatusCode, Json<Value>) {
    db.lock().unwrap().push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(record): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut records = db.lock().unwrap();
    let slot = records
        .iter_mut()
        .find(|r| id_of(r) == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = record.clone();
    Ok(Json(record))
}

async fn remove(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut records = db.lock().unwrap();
    let before = records.len();
    records.retain(|r| id_of(r) != id);
    if records.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

fn seed() -> Vec<Value> {
    vec![json!({
        "id": 1,
        "title": "Dune",
        "author": "Frank Herbert",
        "genre": "Science Fiction",
        "year": 1965,
        "status": "Available"
    })]
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Start the fake store and return its collection URL and backing data.
async fn start_store(records: Vec<Value>) -> (String, Db) {
    let db: Db = Arc::new(Mutex::new(records));
    let app = Router::new()
        .route("/books", get(list).post(create))
        .route("/books/{id}", axum::routing::put(update).delete(remove))
        .with_state(db.clone());
    let base = serve(app).await;
    (format!("{}/books", base), db)
}

fn gateway(url: &str) -> HttpGateway {
    HttpGateway::new(Url::parse(url).unwrap(), Duration::from_secs(5)).unwrap()
}

fn book(id: &str, title: &str) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: "Dan Simmons".to_string(),
        genre: Genre::ScienceFiction,
        year: Year::parse("1989").unwrap(),
        status: Status::Available,
    }
}

#[tokio::test]
async fn fetch_all_reads_numeric_ids_and_years() {
    let (url, _db) = start_store(seed()).await;
    let books = gateway(&url).fetch_all().await.unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "1");
    assert_eq!(books[0].year.as_str(), "1965");
    assert_eq!(books[0].genre, Genre::ScienceFiction);
}

#[tokio::test]
async fn create_posts_full_record() {
    let (url, db) = start_store(seed()).await;
    let gw = gateway(&url);

    gw.create(&book("abc", "Hyperion")).await.unwrap();

    let stored = db.lock().unwrap().clone();
    assert_eq!(stored.len(), 2);
    assert_eq!(
        stored[1],
        json!({
            "id": "abc",
            "title": "Hyperion",
            "author": "Dan Simmons",
            "genre": "Science Fiction",
            "year": "1989",
            "status": "Available"
        })
    );

    let books = gw.fetch_all().await.unwrap();
    assert_eq!(books[1], book("abc", "Hyperion"));
}

#[tokio::test]
async fn update_puts_to_record_url() {
    let (url, db) = start_store(seed()).await;
    let mut changed = gateway(&url).fetch_all().await.unwrap().remove(0);
    changed.status = Status::Issued;

    // A trailing slash on the collection URL does not double up.
    gateway(&format!("{}/", url))
        .update("1", &changed)
        .await
        .unwrap();

    let stored = db.lock().unwrap().clone();
    assert_eq!(stored[0]["status"], "Issued");
}

#[tokio::test]
async fn remove_deletes_record() {
    let (url, db) = start_store(seed()).await;
    gateway(&url).remove("1").await.unwrap();
    assert!(db.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_record_is_status_error() {
    let (url, _db) = start_store(seed()).await;
    let err = gateway(&url).remove("404").await.unwrap_err();

    match err {
        NetworkError::Status {
            method,
            url,
            status,
        } => {
            assert_eq!(method, reqwest::Method::DELETE);
            assert!(url.ends_with("/books/404"));
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_list_is_decode_error() {
    let app = Router::new().route("/books", get(|| async { Json(json!({"books": []})) }));
    let base = serve(app).await;

    let err = gateway(&format!("{}/books", base))
        .fetch_all()
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkError::Decode { .. }));
}

#[tokio::test]
async fn server_error_is_status_error() {
    let app = Router::new().route(
        "/books",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve(app).await;

    let err = gateway(&format!("{}/books", base))
        .fetch_all()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn unreachable_store_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = gateway(&format!("http://{}/books", addr))
        .fetch_all()
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkError::Transport { .. }));
}

#[tokio::test]
async fn session_round_trip_over_http() {
    let (url, db) = start_store(seed()).await;
    let mut session = Session::new(Arc::new(gateway(&url)), Duration::from_secs(3));

    session.start();
    session.settle().await;
    assert_eq!(session.snapshot().view.match_count, 1);

    let dune = session.snapshot().view.books[0].clone();
    session
        .dispatch(Intent::DeleteRequested { book: dune })
        .unwrap();
    session.dispatch(Intent::ConfirmDelete).unwrap();
    session.settle().await;

    assert!(db.lock().unwrap().is_empty());
    let snapshot = session.snapshot();
    assert_eq!(snapshot.view.match_count, 0);
    assert!(!snapshot.loading);
}
