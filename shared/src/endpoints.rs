//! REST paths consumed by the client, relative to the configured API prefix.

pub const PROFILE: &str = "/api/user/profile/";
pub const LOGIN: &str = "/api/login/";
pub const REGISTER: &str = "/api/register/";
pub const LOGOUT: &str = "/api/logout/";
pub const CARS: &str = "/api/cars/";

pub fn car(car_id: i64) -> String {
    format!("/api/cars/{car_id}/")
}

pub fn favorite(car_id: i64) -> String {
    format!("/api/cars/{car_id}/favorite/")
}

pub fn comments(car_id: i64) -> String {
    format!("/api/cars/{car_id}/comments/")
}

pub fn comment(car_id: i64, comment_id: i64) -> String {
    format!("/api/cars/{car_id}/comments/{comment_id}/")
}

pub fn like(comment_id: i64) -> String {
    format!("/api/comments/{comment_id}/like/")
}

/// Inventory listing path with an already-encoded query string.
pub fn cars(query: &str) -> String {
    if query.is_empty() {
        format!("{CARS}?")
    } else {
        format!("{CARS}?{query}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully described request: method, path and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl Call {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }

    pub fn put_json<B: serde::Serialize>(path: impl Into<String>, body: &B) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: serde_json::to_value(body).ok(),
        }
    }

    pub fn post_json<B: serde::Serialize>(path: impl Into<String>, body: &B) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: serde_json::to_value(body).ok(),
        }
    }
}
