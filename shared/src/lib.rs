use serde::{Deserialize, Serialize};

pub mod discussion;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod inventory;
pub mod routes;
pub mod session;
pub mod supersede;
pub mod thread;

pub use error::{ApiError, ValidationError};

// ── Auth ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

impl UserSummary {
    /// Name used in the header greeting: first name when set, username otherwise.
    pub fn display_name(&self) -> &str {
        let first = self.first_name.trim();
        if first.is_empty() {
            &self.username
        } else {
            first
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// `{user}` body returned by login and register. The user is optional so a
/// 2xx without one can be reported instead of failing to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub user: Option<UserSummary>,
}

// ── Profile ──

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfilePayload {
    pub user: UserSummary,
    #[serde(default)]
    pub favorites: Vec<FavoriteCar>,
    #[serde(default)]
    pub comments: Vec<ProfileComment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FavoriteCar {
    #[serde(flatten)]
    pub car: Car,
    pub favorite_since: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarRef {
    pub id: i64,
    pub name: String,
    pub brand: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileComment {
    pub id: i64,
    pub car: CarRef,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

// ── Cars ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub car_type: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub favorite_count: i64,
    #[serde(default)]
    pub comment_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Facets the server computed for the current inventory, shown as options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub price: PriceRange,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarListing {
    pub cars: Vec<Car>,
    #[serde(default)]
    pub filters: FilterSet,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarDetail {
    pub car: Car,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FavoriteToggle {
    pub favorited: bool,
    pub favorites: i64,
}

// ── Comments ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub car_id: Option<i64>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub user: CommentAuthor,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentList {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateComment {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditComment {
    pub content: String,
}

/// Structured failure body: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn car_listing_decodes_server_shape() {
        let body = json!({
            "cars": [{
                "id": 7, "name": "A4", "brand": "Audi", "year": 2021,
                "type": "sedan", "price": 45000.0, "image_url": "/a4.jpg",
                "favorite_count": 3, "comment_count": 1, "is_favorite": false
            }],
            "filters": {
                "brands": ["Audi", "BMW"],
                "years": [2023, 2021],
                "price": {"min": 30000.0, "max": 120000.0}
            }
        });
        let listing: CarListing = serde_json::from_value(body).unwrap();
        assert_eq!(listing.cars.len(), 1);
        assert_eq!(listing.cars[0].car_type, "sedan");
        assert_eq!(listing.cars[0].description, "");
        assert_eq!(listing.filters.years, vec![2023, 2021]);
        assert_eq!(listing.filters.price.max, Some(120000.0));
    }

    #[test]
    fn anonymous_car_has_no_favorite_flag() {
        let car: Car = serde_json::from_value(json!({
            "id": 1, "name": "X5", "brand": "BMW", "year": 2020,
            "type": "suv", "price": 60000.0, "favorite_count": 0, "comment_count": 0
        }))
        .unwrap();
        assert!(!car.is_favorite);
    }

    #[test]
    fn nested_comments_decode() {
        let list: CommentList = serde_json::from_value(json!({
            "comments": [{
                "id": 1, "content": "root", "created_at": "2024-05-01T10:00:00+00:00",
                "user": {"full_name": "Ana Souza"}, "likes": 2, "liked": true, "can_edit": false,
                "replies": [{
                    "id": 2, "parent_id": 1, "content": "child",
                    "created_at": "2024-05-01T11:00:00+00:00",
                    "user": {"full_name": "Bruno"}, "likes": 0, "liked": false, "can_edit": true,
                    "replies": []
                }]
            }]
        }))
        .unwrap();
        assert_eq!(list.comments[0].replies[0].parent_id, Some(1));
        assert!(list.comments[0].replies[0].can_edit);
    }

    #[test]
    fn register_request_uses_camel_case_names() {
        let req = RegisterRequest {
            username: "ana".into(),
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: "ana@example.com".into(),
            password: "secret123".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["firstName"], "Ana");
        assert_eq!(value["lastName"], "Souza");
    }

    #[test]
    fn top_level_comment_omits_parent_id() {
        let body = CreateComment {
            content: "nice".into(),
            parent_id: None,
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"content": "nice"}));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user = UserSummary {
            id: Some(1),
            username: "ana".into(),
            first_name: "  ".into(),
            last_name: String::new(),
            full_name: "ana".into(),
            email: String::new(),
        };
        assert_eq!(user.display_name(), "ana");
        user.first_name = "Ana".into();
        assert_eq!(user.display_name(), "Ana");
    }

    #[test]
    fn profile_favorites_flatten_car_fields() {
        let profile: ProfilePayload = serde_json::from_value(json!({
            "user": {"username": "ana", "first_name": "Ana", "full_name": "Ana Souza", "email": "a@x.io"},
            "favorites": [{
                "id": 3, "name": "911", "brand": "Porsche", "year": 2022, "type": "sports",
                "price": 150000.0, "image_url": "", "favorite_count": 5, "comment_count": 0,
                "is_favorite": true, "favorite_since": "2024-01-01T00:00:00+00:00"
            }],
            "comments": [{
                "id": 9, "car": {"id": 3, "name": "911", "brand": "Porsche"},
                "content": "dream car", "created_at": "2024-01-02T00:00:00+00:00", "likes": 1
            }]
        }))
        .unwrap();
        assert_eq!(profile.favorites[0].car.brand, "Porsche");
        assert_eq!(profile.comments[0].car.id, 3);
        assert_eq!(profile.comments[0].parent_id, None);
    }
}
