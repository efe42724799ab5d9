//! Stateless HTTP request builder and response parser for the user API.
//!
//! # Design
//! `UserApi` holds only the resolved base URLs and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `UserClient` joins the two halves through a `Transport`.
//!
//! Create and the read operations decode the body without looking at the
//! status. Update tolerates a body that is not a JSON object by handing back
//! the user it sent. Delete only looks at the status.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Comment, NewUser, Post, Todo, User};

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

#[derive(Debug, Clone)]
pub struct UserApi {
    users_url: String,
    posts_url: String,
}

impl UserApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            users_url: config.users_url(),
            posts_url: config.posts_url(),
        }
    }

    fn get(url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json(method: HttpMethod, url: String, body: String) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: Some(body),
        }
    }

    pub fn build_create_user(&self, input: &NewUser) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(Self::json(HttpMethod::Post, self.users_url.clone(), body))
    }

    pub fn build_update_user(&self, user: &User) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(user).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(Self::json(
            HttpMethod::Put,
            format!("{}/{}", self.users_url, user.id),
            body,
        ))
    }

    pub fn build_delete_user(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/{id}", self.users_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_users(&self) -> HttpRequest {
        Self::get(self.users_url.clone())
    }

    pub fn build_get_user(&self, id: u64) -> HttpRequest {
        Self::get(format!("{}/{id}", self.users_url))
    }

    pub fn build_find_by_username(&self, username: &str) -> HttpRequest {
        Self::get(format!(
            "{}?username={}",
            self.users_url,
            urlencoding::encode(username)
        ))
    }

    pub fn build_list_posts(&self, user_id: u64) -> HttpRequest {
        Self::get(format!("{}/{user_id}/posts", self.users_url))
    }

    /// Comments hang off the top-level post collection, not off `/users`.
    pub fn build_list_comments(&self, post_id: u64) -> HttpRequest {
        Self::get(format!("{}/{post_id}/comments", self.posts_url))
    }

    pub fn build_list_todos(&self, user_id: u64) -> HttpRequest {
        Self::get(format!("{}/{user_id}/todos", self.users_url))
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(&response)
    }

    /// Decode an update reply, falling back to `sent` when the body is empty,
    /// blank, or does not open a JSON object. Some backends answer updates
    /// that way; only update is treated this leniently.
    pub fn parse_update_user(&self, response: HttpResponse, sent: &User) -> Result<User, ApiError> {
        if !response.body.trim_start().starts_with('{') {
            log::warn!(
                "update of user {} answered {} without a user object; keeping the sent record",
                sent.id,
                response.status
            );
            return Ok(sent.clone());
        }
        decode(&response)
    }

    /// True iff the status is 2xx. Any other status is a normal `false`.
    pub fn parse_delete_user(&self, response: HttpResponse) -> bool {
        response.is_success()
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        decode(&response)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(&response)
    }

    pub fn parse_find_by_username(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        decode(&response)
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        decode(&response)
    }

    pub fn parse_list_comments(&self, response: HttpResponse) -> Result<Vec<Comment>, ApiError> {
        decode(&response)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        decode(&response)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| {
        ApiError::DeserializationError(format!("status {}: {e}", response.status))
    })
}
