use std::{path::Path, sync::Arc};

use ai_llm_service::{
    AiGateway, AiLlmError, ModelVariant, TextGenerator,
    error_handler::{HttpError, ProviderError, ProviderErrorKind},
};
use api::{
    core::{app_state::AppState, views::Views},
    router,
};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use question_store::{Question, QuestionSource, StoreError};
use quiz_session::MemorySessionStore;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

/* ---------------------------------------------------------------------- */
/* Stubs                                                                  */
/* ---------------------------------------------------------------------- */

struct FixedQuestions(Vec<Question>);

#[async_trait]
impl QuestionSource for FixedQuestions {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        if self.0.is_empty() {
            return Err(StoreError::NoData);
        }
        Ok(self.0.clone())
    }
}

struct BrokenStore;

#[async_trait]
impl QuestionSource for BrokenStore {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        Err(StoreError::StorageUnavailable("database is locked".into()))
    }
}

enum Canned {
    Text(&'static str),
    RateLimited,
}

struct StubGenerator {
    reply: Canned,
    prompts: Mutex<Vec<(ModelVariant, String)>>,
}

impl StubGenerator {
    fn new(reply: Canned) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, variant: ModelVariant, prompt: &str) -> Result<String, AiLlmError> {
        self.prompts.lock().await.push((variant, prompt.to_string()));
        match self.reply {
            Canned::Text(text) => Ok(text.to_string()),
            Canned::RateLimited => Err(ProviderError::new(
                "gemini-test",
                ProviderErrorKind::RateLimited(HttpError {
                    status: StatusCode::TOO_MANY_REQUESTS,
                    url: "http://gemini.test".into(),
                    snippet: "quota".into(),
                }),
            )
            .into()),
        }
    }
}

fn question(id: i64, insert: Option<&str>, text: &str, marks: i64) -> Question {
    Question {
        id,
        insert_id: insert.map(|_| 100 + id),
        insert_text: insert.map(str::to_string),
        question: text.to_string(),
        marks,
        answer: format!("MS{id}"),
    }
}

fn three_questions() -> Vec<Question> {
    vec![
        question(1, None, "Question 1", 1),
        question(2, Some("Passage"), "Question 2", 2),
        question(3, None, "Question 3", 3),
    ]
}

fn repo_views() -> Views {
    Views::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("../templates"))
}

fn app_with_views(
    questions: Arc<dyn QuestionSource>,
    generator: Arc<dyn TextGenerator>,
    views: Views,
) -> Router {
    let state = AppState::new(
        questions,
        Arc::new(MemorySessionStore::new()),
        AiGateway::new(generator),
        views,
    );
    router(Arc::new(state))
}

fn app_with(questions: Arc<dyn QuestionSource>, generator: Arc<dyn TextGenerator>) -> Router {
    app_with_views(questions, generator, repo_views())
}

fn app() -> Router {
    app_with(
        Arc::new(FixedQuestions(three_questions())),
        StubGenerator::new(Canned::Text("line one\nline two")),
    )
}

/* ---------------------------------------------------------------------- */
/* Cookie-replaying client                                                */
/* ---------------------------------------------------------------------- */

struct Client {
    app: Router,
    cookie: Option<String>,
}

struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Response {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

impl Client {
    fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn get(&mut self, uri: &str) -> Response {
        let mut req = Request::builder().uri(uri);
        if let Some(cookie) = &self.cookie {
            req = req.header(header::COOKIE, cookie);
        }
        let res = self
            .app
            .clone()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap();

        if let Some(set) = res.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = res.status();
        let headers = res.headers().clone();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        Response {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

/* ---------------------------------------------------------------------- */
/* Question page and navigation                                           */
/* ---------------------------------------------------------------------- */

#[tokio::test]
async fn index_renders_first_question() {
    let mut client = Client::new(app());

    let res = client.get("/").await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(
        res.body
            .contains("Question 1<br><strong>[1 marks]</strong>"),
        "body: {}",
        res.body
    );
}

#[tokio::test]
async fn session_cookie_is_signed_http_only_and_expires() {
    let mut client = Client::new(app());

    let res = client.get("/number").await;
    let set = res.headers[header::SET_COOKIE].to_str().unwrap();

    assert!(set.starts_with("quiz_session="));
    assert!(set.contains("HttpOnly"));
    assert!(set.contains("Path=/"));
    assert!(set.contains("Max-Age=1800"));
}

#[tokio::test]
async fn next_walks_forward_and_stays_on_last() {
    let mut client = Client::new(app());

    let numbers: Vec<Value> = {
        let mut out = Vec::new();
        for _ in 0..4 {
            let body = client.get("/next").await.json();
            assert_eq!(body["success"], json!(true));
            assert_eq!(body["total"], json!(3));
            out.push(body["number"].clone());
        }
        out
    };

    assert_eq!(numbers, vec![json!(1), json!(2), json!(2), json!(2)]);

    let body = client.get("/next").await.json();
    assert_eq!(
        body["question"],
        json!("Question 3<br><strong>[3 marks]</strong>")
    );
}

#[tokio::test]
async fn passage_is_prepended_to_question_text() {
    let mut client = Client::new(app());

    let body = client.get("/next").await.json();

    assert_eq!(
        body["question"],
        json!("Passage<br><br>Question 2<br><strong>[2 marks]</strong>")
    );
}

#[tokio::test]
async fn previous_at_start_stays_on_first() {
    let mut client = Client::new(app());

    let body = client.get("/previous").await.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["number"], json!(0));

    client.get("/next").await;
    client.get("/next").await;
    let body = client.get("/previous").await.json();
    assert_eq!(body["number"], json!(1));
}

#[tokio::test]
async fn number_and_navigation_info_default_to_zero() {
    let mut client = Client::new(app());

    assert_eq!(client.get("/number").await.body, "0");
    assert_eq!(
        client.get("/get_navigation_info").await.json(),
        json!({"number": 0, "total": 0})
    );

    client.get("/").await;
    assert_eq!(
        client.get("/get_navigation_info").await.json(),
        json!({"number": 0, "total": 3})
    );

    client.get("/next").await;
    assert_eq!(client.get("/number").await.body, "1");
}

#[tokio::test]
async fn sessions_are_isolated_per_client() {
    let app = app();
    let mut alice = Client::new(app.clone());
    let mut bob = Client::new(app);

    alice.get("/next").await;
    alice.get("/next").await;

    assert_eq!(alice.get("/number").await.body, "2");
    assert_eq!(bob.get("/number").await.body, "0");
}

#[tokio::test]
async fn tampered_cookie_starts_a_fresh_session() {
    let mut client = Client::new(app());
    client.get("/next").await;
    assert_eq!(client.get("/number").await.body, "1");

    client.cookie = Some("quiz_session=forged-token".into());
    assert_eq!(client.get("/number").await.body, "0");
}

#[tokio::test]
async fn jump_redirects_home_and_steps_index() {
    let mut client = Client::new(app());
    client.get("/").await;

    let res = client.get("/go/next").await;
    assert!(res.status.is_redirection());
    assert_eq!(res.headers[header::LOCATION], "/");
    assert_eq!(client.get("/number").await.body, "1");

    client.get("/go/previous").await;
    client.get("/go/previous").await;
    assert_eq!(client.get("/number").await.body, "0");
}

#[tokio::test]
async fn jump_is_clamped_by_stored_total() {
    let mut client = Client::new(app());

    // No page visited yet, so the stored total is zero.
    client.get("/go/next").await;
    assert_eq!(client.get("/number").await.body, "0");
}

#[tokio::test]
async fn unknown_single_segment_paths_are_not_found() {
    let mut client = Client::new(app());

    assert_eq!(client.get("/favicon.ico").await.status, StatusCode::NOT_FOUND);
    assert_eq!(client.get("/sideways").await.status, StatusCode::NOT_FOUND);
    assert_eq!(client.get("/go/sideways").await.status, StatusCode::NOT_FOUND);

    // Nothing moved.
    assert_eq!(client.get("/number").await.body, "0");
}

#[tokio::test]
async fn unmatched_path_renders_not_found_page() {
    let mut client = Client::new(app());

    let res = client.get("/a/b/c").await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.contains("Not Found"));
}

#[tokio::test]
async fn error_pages_use_the_error_template() {
    let mut client = Client::new(app());

    let res = client.get("/a/b/c").await;

    assert!(res.body.contains("<title>Error</title>"), "body: {}", res.body);
    assert!(res.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
}

#[tokio::test]
async fn missing_templates_fall_back_to_inline_pages() {
    let mut client = Client::new(app_with_views(
        Arc::new(FixedQuestions(Vec::new())),
        StubGenerator::new(Canned::Text("unused")),
        Views::default(),
    ));

    let res = client.get("/").await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(
        res.body,
        "<h1>Error</h1><p>No questions found in the database.</p><a href='/'>Return to Home</a>"
    );

    let mut client = Client::new(app_with_views(
        Arc::new(FixedQuestions(three_questions())),
        StubGenerator::new(Canned::Text("unused")),
        Views::default(),
    ));
    let res = client.get("/").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("index.html"));
}

/* ---------------------------------------------------------------------- */
/* Store failures                                                         */
/* ---------------------------------------------------------------------- */

#[tokio::test]
async fn empty_dataset_is_not_found() {
    let mut client = Client::new(app_with(
        Arc::new(FixedQuestions(Vec::new())),
        StubGenerator::new(Canned::Text("unused")),
    ));

    let res = client.get("/").await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.contains("No questions found in the database."));
    assert!(res.body.contains("Return to Home"));
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
    let mut client = Client::new(app_with(
        Arc::new(BrokenStore),
        StubGenerator::new(Canned::Text("unused")),
    ));

    let res = client.get("/").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("Unable to connect to the database"));

    assert_eq!(
        client.get("/next").await.status,
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        client.get("/previous").await.status,
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

/* ---------------------------------------------------------------------- */
/* AI responses                                                           */
/* ---------------------------------------------------------------------- */

#[tokio::test]
async fn flash_summary_uses_current_question() {
    let generator = StubGenerator::new(Canned::Text("line one\nline two"));
    let mut client = Client::new(app_with(
        Arc::new(FixedQuestions(three_questions())),
        generator.clone(),
    ));
    client.get("/").await;

    let res = client.get("/ai_response/flash").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({"response": "line one<br>line two"}));

    let prompts = generator.prompts.lock().await;
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].0, ModelVariant::Flash);
    assert!(prompts[0].1.contains("Mark scheme: MS1"));
}

#[tokio::test]
async fn pro_marking_includes_answer() {
    let generator = StubGenerator::new(Canned::Text("Good"));
    let mut client = Client::new(app_with(
        Arc::new(FixedQuestions(three_questions())),
        generator.clone(),
    ));
    client.get("/").await;
    client.get("/next").await;

    let res = client.get("/ai_response/pro?answer=el%20gato").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({"response": "Good"}));

    let prompts = generator.prompts.lock().await;
    assert_eq!(prompts[0].0, ModelVariant::Pro);
    assert!(prompts[0].1.contains("el gato"));
    assert!(prompts[0].1.contains("Passage"));
    assert!(prompts[0].1.contains("MS2"));
}

#[tokio::test]
async fn pro_without_answer_is_bad_request() {
    let generator = StubGenerator::new(Canned::Text("unused"));
    let mut client = Client::new(app_with(
        Arc::new(FixedQuestions(three_questions())),
        generator.clone(),
    ));
    client.get("/").await;

    let res = client.get("/ai_response/pro").await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].is_string());
    assert!(generator.prompts.lock().await.is_empty());
}

#[tokio::test]
async fn ai_before_any_question_is_bad_request() {
    let mut client = Client::new(app());

    let res = client.get("/ai_response/flash").await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].is_string());
}

#[tokio::test]
async fn unknown_model_is_bad_request() {
    let mut client = Client::new(app());
    client.get("/").await;

    let res = client.get("/ai_response/ultra").await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].is_string());
}

#[tokio::test]
async fn rate_limit_asks_user_to_wait() {
    let mut client = Client::new(app_with(
        Arc::new(FixedQuestions(three_questions())),
        StubGenerator::new(Canned::RateLimited),
    ));
    client.get("/").await;

    let res = client.get("/ai_response/flash").await;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    let error = res.json()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("ResourceExhausted"));
    assert!(error.contains("wait 30 seconds"));
}
