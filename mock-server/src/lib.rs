use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Mount point of the todo collection.
pub const API_PREFIX: &str = "/api/todos";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body accepted by create and update. Extra fields such as `id` or the
/// timestamps are ignored.
#[derive(Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub todos_created: u64,
    pub todos_updated: u64,
    pub todos_deleted: u64,
    pub db_reads: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub service: String,
}

#[derive(Default)]
pub struct Store {
    todos: BTreeMap<i64, Todo>,
    last_id: i64,
    stats: Stats,
    /// Read-through cache of the full list; any mutation drops it.
    list_cache: Option<Vec<Todo>>,
}

impl Store {
    fn invalidate(&mut self) {
        self.list_cache = None;
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let todos = Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/stats/reset", post(reset_stats))
        .route("/completed", get(list_completed))
        .route("/{id}", get(get_todo).put(update_todo).delete(delete_todo));
    Router::new().nest(API_PREFIX, todos).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let mut store = db.write().await;
    if let Some(cached) = &store.list_cache {
        return Json(cached.clone());
    }
    tracing::info!("todo list cache miss, reading store");
    store.stats.db_reads += 1;
    let todos: Vec<Todo> = store.todos.values().cloned().collect();
    store.list_cache = Some(todos.clone());
    Json(todos)
}

async fn list_completed(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().filter(|t| t.completed).cloned().collect())
}

async fn create_todo(State(db): State<Db>, Json(input): Json<TodoInput>) -> Json<Todo> {
    let mut store = db.write().await;
    store.last_id += 1;
    let stamp = now();
    let todo = Todo {
        id: store.last_id,
        title: input.title,
        description: input.description,
        completed: input.completed,
        created_at: stamp,
        updated_at: stamp,
    };
    store.todos.insert(todo.id, todo.clone());
    store.stats.todos_created += 1;
    store.invalidate();
    tracing::info!(id = todo.id, "created todo");
    Json(todo)
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.title = input.title;
    todo.description = input.description;
    todo.completed = input.completed;
    todo.updated_at = now();
    let updated = todo.clone();
    store.stats.todos_updated += 1;
    store.invalidate();
    tracing::info!(id, "updated todo");
    Ok(Json(updated))
}

/// Succeeds whether or not the id exists.
async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    store.todos.remove(&id);
    store.stats.todos_deleted += 1;
    store.invalidate();
    tracing::info!(id, "deleted todo");
    StatusCode::OK
}

async fn stats(State(db): State<Db>) -> Json<Stats> {
    Json(db.read().await.stats)
}

async fn reset_stats(State(db): State<Db>) -> StatusCode {
    db.write().await.stats = Stats::default();
    tracing::info!("stats reset");
    StatusCode::OK
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "UP".to_string(),
        service: "todo-backend".to_string(),
    })
}
