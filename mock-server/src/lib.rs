use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Body the public service answers with when a PUT targets an unknown id.
pub const UNKNOWN_UPDATE_BODY: &str =
    "TypeError: Cannot read properties of undefined (reading 'id')";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UserFilter {
    pub username: Option<String>,
}

/// Everything the server knows. Users are keyed by id so listings come back
/// in id order.
#[derive(Clone, Debug, Default)]
pub struct Store {
    pub users: BTreeMap<u64, User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub todos: Vec<Todo>,
}

impl Store {
    /// A small directory: user 1 has posts 1-3 and mixed todos, user 2 has
    /// one post, user 3 has nothing.
    pub fn seeded() -> Self {
        let user = |id, name: &str, username: &str, email: &str| User {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
        };
        let post = |id, user_id, title: &str| Post {
            id,
            user_id,
            title: title.to_string(),
            body: format!("body of {title}"),
        };
        let comment = |id, post_id, name: &str, email: &str| Comment {
            id,
            post_id,
            name: name.to_string(),
            email: email.to_string(),
            body: format!("comment {id} on post {post_id}"),
        };
        let todo = |id, user_id, title: &str, completed| Todo {
            id,
            user_id,
            title: title.to_string(),
            completed,
        };

        let users = [
            user(1, "Leanne Graham", "Bret", "Sincere@april.biz"),
            user(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv"),
            user(3, "Clementine Bauch", "Samantha", "Nathan@yesenia.net"),
        ];
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            posts: vec![
                post(1, 1, "sunt aut facere"),
                post(3, 1, "ea molestias quasi"),
                post(2, 1, "qui est esse"),
                post(4, 2, "eum et est occaecati"),
            ],
            comments: vec![
                comment(1, 1, "id labore ex et quam laborum", "Eliseo@gardner.biz"),
                comment(11, 3, "fugit labore quia mollitia", "Veronica_Goodwin@timmothy.net"),
                comment(12, 3, "modi ut eos dolores", "Oswald.Vandervort@leanne.org"),
                comment(16, 4, "perferendis temporibus", "Hayden@althea.biz"),
            ],
            todos: vec![
                todo(1, 1, "delectus aut autem", true),
                todo(2, 1, "quis ut nam facilis", false),
                todo(3, 1, "fugiat veniam minus", false),
                todo(4, 2, "et porro tempora", false),
            ],
        }
    }

    fn next_user_id(&self) -> u64 {
        self.users.keys().next_back().map_or(1, |id| id + 1)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/users/{id}/posts", get(list_posts))
        .route("/users/{id}/todos", get(list_todos))
        .route("/posts/{id}/comments", get(list_comments))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>, Query(filter): Query<UserFilter>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(
        store
            .users
            .values()
            .filter(|u| filter.username.as_deref().map_or(true, |name| u.username == name))
            .cloned()
            .collect(),
    )
}

async fn create_user(State(db): State<Db>, Json(input): Json<UserInput>) -> (StatusCode, Json<User>) {
    let mut store = db.write().await;
    let user = User {
        id: store.next_user_id(),
        name: input.name,
        username: input.username,
        email: input.email,
    };
    store.users.insert(user.id, user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    let store = db.read().await;
    match store.users.get(&id) {
        Some(user) => Json(user.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(serde_json::json!({}))).into_response(),
    }
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UserInput>,
) -> Response {
    let mut store = db.write().await;
    let Some(user) = store.users.get_mut(&id) else {
        return (StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_UPDATE_BODY).into_response();
    };
    user.name = input.name;
    user.username = input.username;
    user.email = input.email;
    Json(user.clone()).into_response()
}

async fn delete_user(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    let mut store = db.write().await;
    match store.users.remove(&id) {
        Some(_) => Json(serde_json::json!({})).into_response(),
        None => (StatusCode::NOT_FOUND, Json(serde_json::json!({}))).into_response(),
    }
}

async fn list_posts(State(db): State<Db>, Path(user_id): Path<u64>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(store.posts.iter().filter(|p| p.user_id == user_id).cloned().collect())
}

async fn list_todos(State(db): State<Db>, Path(user_id): Path<u64>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.iter().filter(|t| t.user_id == user_id).cloned().collect())
}

async fn list_comments(State(db): State<Db>, Path(post_id): Path<u64>) -> Json<Vec<Comment>> {
    let store = db.read().await;
    Json(store.comments.iter().filter(|c| c.post_id == post_id).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_camel_case_keys() {
        let post = Post {
            id: 1,
            user_id: 2,
            title: "t".to_string(),
            body: "b".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], 2);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn user_input_fields_default_to_empty() {
        let input: UserInput = serde_json::from_str(r#"{"name":"Alex"}"#).unwrap();
        assert_eq!(input.name, "Alex");
        assert!(input.username.is_empty());
    }

    #[test]
    fn next_user_id_follows_highest_id() {
        assert_eq!(Store::seeded().next_user_id(), 4);
        assert_eq!(Store::default().next_user_id(), 1);
    }

    #[test]
    fn seeded_user_one_has_three_posts() {
        let store = Store::seeded();
        assert_eq!(store.posts.iter().filter(|p| p.user_id == 1).count(), 3);
    }
}
