//! Blocking client for the user directory API.
//!
//! # Design
//! `UserClient` pairs the stateless `UserApi` with an injected `Transport`.
//! Every operation is one `build_*`, one `execute`, one `parse_*`; the two
//! workflows chain two such steps. Nothing is cached between calls.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::api::UserApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewUser, Todo, User};
use crate::workflows::{self, CommentsExport};

pub struct UserClient<T> {
    api: UserApi,
    transport: T,
}

impl UserClient<UreqTransport> {
    /// Client over a fresh ureq agent configured from `config`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config, UreqTransport::new(config))
    }
}

impl<T: Transport> UserClient<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            api: UserApi::new(config),
            transport,
        }
    }

    pub fn create(&self, input: &NewUser) -> Result<User, ApiError> {
        let req = self.api.build_create_user(input)?;
        let user = self.api.parse_create_user(self.transport.execute(req)?)?;
        log::info!("created user {}", user.id);
        Ok(user)
    }

    pub fn update(&self, user: &User) -> Result<User, ApiError> {
        let req = self.api.build_update_user(user)?;
        let updated = self.api.parse_update_user(self.transport.execute(req)?, user)?;
        log::info!("updated user {}: email {}", updated.id, updated.email);
        Ok(updated)
    }

    /// `Ok(false)` for any non-2xx status; only transport failures are errors.
    pub fn delete(&self, id: u64) -> Result<bool, ApiError> {
        let req = self.api.build_delete_user(id);
        let deleted = self.api.parse_delete_user(self.transport.execute(req)?);
        log::info!("delete user {id}: {deleted}");
        Ok(deleted)
    }

    pub fn list_all(&self) -> Result<Vec<User>, ApiError> {
        let req = self.api.build_list_users();
        let users = self.api.parse_list_users(self.transport.execute(req)?)?;
        log::info!("fetched {} users", users.len());
        Ok(users)
    }

    pub fn get_by_id(&self, id: u64) -> Result<User, ApiError> {
        let req = self.api.build_get_user(id);
        self.api.parse_get_user(self.transport.execute(req)?)
    }

    pub fn find_by_username(&self, username: &str) -> Result<Vec<User>, ApiError> {
        let req = self.api.build_find_by_username(username);
        let users = self.api.parse_find_by_username(self.transport.execute(req)?)?;
        log::info!("{} users match username {username:?}", users.len());
        Ok(users)
    }

    /// Save the comments of `user_id`'s latest post into the working directory.
    pub fn save_last_post_comments_to_file(&self, user_id: u64) -> Result<CommentsExport, ApiError> {
        self.save_last_post_comments_in(user_id, Path::new("."))
    }

    /// Like `save_last_post_comments_to_file`, writing into `dir`.
    ///
    /// An existing file of the same name is overwritten.
    pub fn save_last_post_comments_in(
        &self,
        user_id: u64,
        dir: &Path,
    ) -> Result<CommentsExport, ApiError> {
        let req = self.api.build_list_posts(user_id);
        let posts = self.api.parse_list_posts(self.transport.execute(req)?)?;

        let Some(post_id) = workflows::latest_post(&posts).map(|p| p.id) else {
            log::info!("user {user_id} has no posts");
            return Ok(CommentsExport::NoPosts);
        };

        let req = self.api.build_list_comments(post_id);
        let comments = self.api.parse_list_comments(self.transport.execute(req)?)?;

        let json = serde_json::to_string_pretty(&comments)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let path = dir.join(workflows::comments_file_name(user_id, post_id));
        fs::write(&path, json)?;
        log::info!("saved {} comments to {}", comments.len(), path.display());

        Ok(CommentsExport::Saved {
            post_id,
            path,
            comments,
        })
    }

    pub fn open_todos(&self, user_id: u64) -> Result<Vec<Todo>, ApiError> {
        let req = self.api.build_list_todos(user_id);
        let todos = self.api.parse_list_todos(self.transport.execute(req)?)?;
        Ok(workflows::open_todos(todos))
    }

    /// Write one `ID: <id> | <title>` line per open todo, in server order.
    pub fn print_open_todos<W: Write>(&self, user_id: u64, out: &mut W) -> Result<Vec<Todo>, ApiError> {
        let open = self.open_todos(user_id)?;
        log::info!("user {user_id} has {} open todos", open.len());
        for todo in &open {
            writeln!(out, "{}", workflows::todo_line(todo))?;
        }
        Ok(open)
    }
}
