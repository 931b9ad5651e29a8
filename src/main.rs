pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod views;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Form, Router,
};
use config::Config;
use error::AppError;
use maud::{html, Markup};
use serde::Deserialize;
use store::TodoStore;
use tokio::{
    net::TcpListener,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

// === App State ===
#[derive(Debug, Clone)]
struct AppState {
    state: Arc<RwLock<TodoStore>>,
}
impl AppState {
    fn new() -> Self {
        let mut store = TodoStore::new();
        store.subscribe(|store| {
            trace!(
                todos = store.len(),
                completed = store.completed_count(),
                "todo list changed"
            );
        });
        Self {
            state: Arc::new(RwLock::new(store)),
        }
    }

    // borrow immutable state
    async fn read(&self) -> RwLockReadGuard<'_, TodoStore> {
        self.state.read().await
    }
    // borrow mutable state; one intent at a time
    async fn write(&self) -> RwLockWriteGuard<'_, TodoStore> {
        self.state.write().await
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let app = router(AppState::new());

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/todos", get(todos))
        .route("/create_todo", put(create_todo))
        .route("/toggle_todo", post(toggle_todo))
        .route("/remove_todo", delete(remove_todo))
        .route("/pending_input", post(pending_input))
        .with_state(state)
}

// === Routes ===
// store operations never fail; handlers share the `Result<Markup, AppError>` shape
async fn root(State(state): State<AppState>) -> Result<Markup, AppError> {
    let store = state.read().await;
    Ok(views::page(&store))
}

async fn todos(State(state): State<AppState>) -> Result<Markup, AppError> {
    let store = state.read().await;
    Ok(views::todo_list(store.todos()))
}

#[derive(Deserialize)]
struct CreateTodo {
    title: String,
}
async fn create_todo(
    State(state): State<AppState>,
    Form(CreateTodo { title }): Form<CreateTodo>,
) -> Result<Markup, AppError> {
    let mut store = state.write().await;
    store.set_pending_input(title);
    store.submit_pending();
    Ok(html! {
        (views::todo_list(store.todos()))
        (views::new_todo_form_oob(store.pending_input()))
    })
}

#[derive(Deserialize)]
struct ToggleTodo {
    id: String,
    completed: bool,
}
async fn toggle_todo(
    State(state): State<AppState>,
    Form(ToggleTodo { id, completed }): Form<ToggleTodo>,
) -> Result<Markup, AppError> {
    let mut store = state.write().await;
    store.toggle(&id, completed);
    Ok(views::todo_list(store.todos()))
}

#[derive(Deserialize)]
struct RemoveTodo {
    id: String,
}
async fn remove_todo(
    State(state): State<AppState>,
    Query(RemoveTodo { id }): Query<RemoveTodo>,
) -> Result<Markup, AppError> {
    let mut store = state.write().await;
    store.remove(&id);
    Ok(views::todo_list(store.todos()))
}

#[derive(Deserialize)]
struct PendingInput {
    #[serde(default)]
    title: String,
}
async fn pending_input(
    State(state): State<AppState>,
    Form(PendingInput { title }): Form<PendingInput>,
) -> StatusCode {
    state.write().await.set_pending_input(title);
    StatusCode::NO_CONTENT
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn body(result: Result<Markup, AppError>) -> String {
        result.unwrap().into_string()
    }

    async fn create(state: &AppState, title: &str) -> String {
        body(
            create_todo(
                State(state.clone()),
                Form(CreateTodo {
                    title: title.to_string(),
                }),
            )
            .await,
        )
    }

    async fn first_id(state: &AppState) -> String {
        state.read().await.todos()[0].id.clone()
    }

    #[tokio::test]
    async fn test_root_empty() {
        let state = AppState::new();
        let html = body(root(State(state)).await);
        assert!(html.contains("Todo List"));
        assert!(html.contains("No Todos"));
    }

    #[tokio::test]
    async fn test_create_renders_list_and_resets_form() {
        let state = AppState::new();
        pending_input(
            State(state.clone()),
            Form(PendingInput {
                title: "Buy milk".to_string(),
            }),
        )
        .await;
        assert_eq!(state.read().await.pending_input(), "Buy milk");

        let html = create(&state, "Buy milk").await;
        assert!(html.contains("Buy milk"));
        assert!(!html.contains("No Todos"));
        assert!(html.contains(r#"hx-swap-oob="true""#));
        assert!(html.contains(r#"value="""#));

        let store = state.read().await;
        assert_eq!(store.len(), 1);
        assert_eq!(store.pending_input(), "");
    }

    #[tokio::test]
    async fn test_create_submits_posted_text() {
        let state = AppState::new();
        pending_input(
            State(state.clone()),
            Form(PendingInput {
                title: "stale".to_string(),
            }),
        )
        .await;
        create(&state, "Walk dog").await;

        let store = state.read().await;
        assert_eq!(store.todos()[0].title, "Walk dog");
        assert_eq!(store.pending_input(), "");
    }

    #[tokio::test]
    async fn test_create_empty_title() {
        let state = AppState::new();
        create(&state, "").await;
        let store = state.read().await;
        assert_eq!(store.len(), 1);
        assert_eq!(store.todos()[0].title, "");
    }

    #[tokio::test]
    async fn test_toggle_then_remove() {
        let state = AppState::new();
        create(&state, "Buy milk").await;
        let id = first_id(&state).await;

        let html = body(
            toggle_todo(
                State(state.clone()),
                Form(ToggleTodo {
                    id: id.clone(),
                    completed: true,
                }),
            )
            .await,
        );
        assert!(html.contains("line-through"));
        assert!(state.read().await.todos()[0].completed);

        let html = body(remove_todo(State(state.clone()), Query(RemoveTodo { id })).await);
        assert!(html.contains("No Todos"));
        assert!(state.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_an_error() {
        let state = AppState::new();
        create(&state, "keep me").await;

        let html = body(
            toggle_todo(
                State(state.clone()),
                Form(ToggleTodo {
                    id: "missing".to_string(),
                    completed: true,
                }),
            )
            .await,
        );
        assert!(html.contains("keep me"));

        let html = body(
            remove_todo(
                State(state.clone()),
                Query(RemoveTodo {
                    id: "missing".to_string(),
                }),
            )
            .await,
        );
        assert!(html.contains("keep me"));
        assert_eq!(state.read().await.len(), 1);
        assert!(!state.read().await.todos()[0].completed);
    }

    #[tokio::test]
    async fn test_todos_fragment_order() {
        let state = AppState::new();
        create(&state, "first").await;
        create(&state, "second").await;
        let html = body(todos(State(state)).await);
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_router_builds() {
        let _ = router(AppState::new());
    }
}
