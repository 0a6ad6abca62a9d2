//! In-process stub of the ArabicWriter word service, mirroring the real
//! API surface closely enough to exercise the client end to end.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use arabicwriter_client::config::Config;

#[derive(Debug, Clone)]
pub struct StoredWord {
    pub id: i64,
    pub word: String,
    pub translation: String,
    pub phonetic: String,
    pub sentence: String,
    pub arabic_sentence: String,
    pub session_id: String,
}

#[derive(Default)]
pub struct StubServer {
    pub words: Mutex<Vec<StoredWord>>,
    next_id: AtomicI64,
    pub list_hits: AtomicUsize,
    pub translate_hits: AtomicUsize,
    pub create_hits: AtomicUsize,
    pub delete_hits: AtomicUsize,
    pub last_search: Mutex<Option<String>>,
    pub authenticated: AtomicBool,
    pub fail_list: AtomicBool,
    pub reject_translate: AtomicBool,
}

impl StubServer {
    pub fn seed(&self, count: usize) {
        let mut words = self.words.lock().unwrap();
        for _ in 0..count {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            words.push(StoredWord {
                id,
                word: format!("w{id}"),
                translation: format!("t{id}"),
                phonetic: format!("p{id}"),
                sentence: String::new(),
                arabic_sentence: String::new(),
                session_id: "seeded".to_string(),
            });
        }
    }

    pub fn total(&self) -> usize {
        self.words.lock().unwrap().len()
    }

    pub fn list_hits(&self) -> usize {
        self.list_hits.load(Ordering::SeqCst)
    }

    pub fn translate_hits(&self) -> usize {
        self.translate_hits.load(Ordering::SeqCst)
    }

    pub fn create_hits(&self) -> usize {
        self.create_hits.load(Ordering::SeqCst)
    }

    pub fn delete_hits(&self) -> usize {
        self.delete_hits.load(Ordering::SeqCst)
    }

    pub fn last_search(&self) -> Option<String> {
        self.last_search.lock().unwrap().clone()
    }
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        page_size: 10,
        search_debounce: Duration::from_millis(40),
        http_timeout: Duration::from_secs(5),
        require_auth: false,
        log_level: "info".to_string(),
    }
}

/// Binds the stub to an ephemeral port and returns the `/api` base URL.
pub async fn spawn(stub: Arc<StubServer>) -> String {
    let app = Router::new()
        .route("/api/translate", post(translate))
        .route("/api/words", get(list_words).post(create_words).delete(clear_words))
        .route("/api/words/:id", delete(delete_word))
        .route("/api/user", get(user))
        .route("/api/stats", get(stats))
        .route("/api/frequency", get(frequency))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{addr}/api")
}

#[derive(Deserialize)]
struct TranslateBody {
    word: String,
}

async fn translate(
    State(stub): State<Arc<StubServer>>,
    Json(body): Json<TranslateBody>,
) -> (StatusCode, Json<Value>) {
    stub.translate_hits.fetch_add(1, Ordering::SeqCst);
    if stub.reject_translate.load(Ordering::SeqCst) {
        return (StatusCode::OK, Json(json!({ "success": false })));
    }
    if body.word.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No word provided" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "word": body.word,
            "translation": format!("en:{}", body.word),
            "phonetic": format!("ph:{}", body.word),
            "sentence": "An example sentence.",
            "arabic_sentence": "جملة مثال",
        })),
    )
}

#[derive(Deserialize)]
struct NewWordBody {
    word: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    phonetic: String,
    #[serde(default)]
    sentence: String,
    #[serde(default)]
    arabic_sentence: String,
}

#[derive(Deserialize)]
struct CreateBody {
    words: Vec<NewWordBody>,
    #[serde(rename = "sessionId")]
    session_id: String,
}

async fn create_words(
    State(stub): State<Arc<StubServer>>,
    Json(body): Json<CreateBody>,
) -> (StatusCode, Json<Value>) {
    stub.create_hits.fetch_add(1, Ordering::SeqCst);
    if body.words.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No words provided" })),
        );
    }
    let mut words = stub.words.lock().unwrap();
    let mut count = 0;
    for item in body.words {
        if item.word.trim().is_empty() {
            continue;
        }
        let id = stub.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        words.push(StoredWord {
            id,
            word: item.word,
            translation: item.translation,
            phonetic: item.phonetic,
            sentence: item.sentence,
            arabic_sentence: item.arabic_sentence,
            session_id: body.session_id.clone(),
        });
        count += 1;
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "count": count })),
    )
}

#[derive(Deserialize)]
struct ListParams {
    limit: Option<u32>,
    offset: Option<u32>,
    search: Option<String>,
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

async fn list_words(
    State(stub): State<Arc<StubServer>>,
    Query(params): Query<ListParams>,
) -> (StatusCode, Json<Value>) {
    stub.list_hits.fetch_add(1, Ordering::SeqCst);
    *stub.last_search.lock().unwrap() = params.search.clone();

    if stub.fail_list.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "database unavailable" })),
        );
    }

    let limit = params.limit.unwrap_or(10) as usize;
    let offset = params.offset.unwrap_or(0) as usize;
    let search = params.search.unwrap_or_default();

    let words = stub.words.lock().unwrap();
    // Newest first, matching the real server's timestamp DESC ordering;
    // search filters on word or translation.
    let filtered: Vec<&StoredWord> = words
        .iter()
        .rev()
        .filter(|w| {
            search.is_empty() || w.word.contains(&search) || w.translation.contains(&search)
        })
        .filter(|w| {
            params
                .session_id
                .as_ref()
                .map_or(true, |s| &w.session_id == s)
        })
        .collect();
    let total = filtered.len();
    let page: Vec<Value> = filtered
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|w| {
            json!({
                "id": w.id,
                "word": w.word,
                "translation": w.translation,
                "phonetic": w.phonetic,
                "sentence": w.sentence,
                "arabic_sentence": w.arabic_sentence,
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "success": true, "words": page, "total": total })),
    )
}

async fn delete_word(
    State(stub): State<Arc<StubServer>>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    stub.delete_hits.fetch_add(1, Ordering::SeqCst);
    let mut words = stub.words.lock().unwrap();
    let before = words.len();
    words.retain(|w| w.id != id);
    if words.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Word not found" })),
        );
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

#[derive(Deserialize)]
struct ClearParams {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

async fn clear_words(
    State(stub): State<Arc<StubServer>>,
    Query(params): Query<ClearParams>,
) -> (StatusCode, Json<Value>) {
    let mut words = stub.words.lock().unwrap();
    match params.session_id {
        Some(session) => words.retain(|w| w.session_id != session),
        None => words.clear(),
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn user(State(stub): State<Arc<StubServer>>) -> Json<Value> {
    let authenticated = stub.authenticated.load(Ordering::SeqCst);
    let user = if authenticated {
        json!({ "name": "Test User", "email": "test@example.com" })
    } else {
        Value::Null
    };
    Json(json!({ "authenticated": authenticated, "user": user }))
}

async fn stats(State(stub): State<Arc<StubServer>>) -> Json<Value> {
    let words = stub.words.lock().unwrap();
    let unique: HashSet<&str> = words.iter().map(|w| w.word.as_str()).collect();
    let sessions: HashSet<&str> = words.iter().map(|w| w.session_id.as_str()).collect();
    Json(json!({
        "stats": {
            "total_words": words.len(),
            "unique_words": unique.len(),
            "total_sessions": sessions.len(),
        }
    }))
}

#[derive(Deserialize)]
struct FrequencyParams {
    limit: Option<u32>,
}

async fn frequency(
    State(stub): State<Arc<StubServer>>,
    Query(params): Query<FrequencyParams>,
) -> Json<Value> {
    let words = stub.words.lock().unwrap();
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for w in words.iter() {
        *counts.entry(w.word.as_str()).or_default() += 1;
    }
    let mut rows: Vec<(&str, u64)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    rows.truncate(params.limit.unwrap_or(20) as usize);
    let rows: Vec<Value> = rows
        .into_iter()
        .map(|(word, count)| json!({ "word": word, "count": count }))
        .collect();
    Json(json!({ "frequency": rows }))
}
