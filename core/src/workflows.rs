//! Pure helpers behind the two derived workflows.

use std::path::PathBuf;

use crate::types::{Comment, Post, Todo};

/// The post with the largest id. On equal ids the first one seen wins.
pub fn latest_post(posts: &[Post]) -> Option<&Post> {
    posts.iter().fold(None, |best: Option<&Post>, post| match best {
        Some(b) if b.id >= post.id => Some(b),
        _ => Some(post),
    })
}

pub fn comments_file_name(user_id: u64, post_id: u64) -> String {
    format!("user-{user_id}-post-{post_id}-comments.json")
}

/// Todos not yet completed, in the order given.
pub fn open_todos(todos: Vec<Todo>) -> Vec<Todo> {
    todos.into_iter().filter(|t| !t.completed).collect()
}

pub fn todo_line(todo: &Todo) -> String {
    format!("ID: {} | {}", todo.id, todo.title)
}

/// Result of saving the latest post's comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentsExport {
    /// The user has no posts; nothing was written.
    NoPosts,
    Saved {
        post_id: u64,
        path: PathBuf,
        comments: Vec<Comment>,
    },
}
