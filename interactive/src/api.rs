use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use showroom_shared::endpoints::{self, Call, Method};
use showroom_shared::inventory::InventoryQuery;
use showroom_shared::supersede::CancelToken;
use showroom_shared::thread::ThreadCommand;
use showroom_shared::{
    ApiError, AuthResponse, Car, CarDetail, CarListing, Comment, CommentList, ErrorBody,
    FavoriteToggle, LoginRequest, ProfilePayload, RegisterRequest, UserSummary,
};
use web_sys::{AbortSignal, RequestCredentials};

use crate::config;
use crate::supersede;

fn builder(method: Method, url: &str) -> RequestBuilder {
    let builder = match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    };
    // Session cookie rides along on every call.
    builder.credentials(RequestCredentials::Include)
}

/// Sends the call and returns the body of a 2xx response. An aborted fetch
/// surfaces as `Network`; its token is already cancelled, so callers drop it.
async fn dispatch(call: &Call, signal: Option<&AbortSignal>) -> Result<String, ApiError> {
    let url = format!("{}{}", config::api_base(), call.path);
    tracing::debug!(method = ?call.method, path = %call.path, "request");

    let builder = builder(call.method, &url).abort_signal(signal);
    let request = match &call.body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let resp = request.send().await.map_err(|e| {
        tracing::warn!(path = %call.path, error = %e, "request failed");
        ApiError::Network(e.to_string())
    })?;

    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();

    if !resp.ok() {
        tracing::warn!(path = %call.path, status, "API error");
        return Err(match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => ApiError::Server {
                status,
                message: body.error,
            },
            Err(_) => ApiError::Status(status),
        });
    }

    Ok(text)
}

pub async fn send<T: DeserializeOwned>(call: &Call) -> Result<T, ApiError> {
    decode(&dispatch(call, None).await?)
}

/// Like [`send`], aborted when `token` is superseded or cancelled.
pub async fn send_cancellable<T: DeserializeOwned>(
    call: &Call,
    token: &CancelToken,
) -> Result<T, ApiError> {
    let signal = supersede::abort_signal(token);
    decode(&dispatch(call, signal.as_ref()).await?)
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// For calls whose success body the client does not read.
pub async fn send_unit(call: &Call) -> Result<(), ApiError> {
    dispatch(call, None).await.map(|_| ())
}

// ── Session ──

pub async fn fetch_profile() -> Result<ProfilePayload, ApiError> {
    send(&Call::get(endpoints::PROFILE)).await
}

fn require_user(resp: AuthResponse) -> Result<UserSummary, ApiError> {
    resp.user
        .ok_or_else(|| ApiError::Decode("response has no user".to_string()))
}

pub async fn login(payload: &LoginRequest) -> Result<UserSummary, ApiError> {
    let resp: AuthResponse = send(&Call::post_json(endpoints::LOGIN, payload)).await?;
    require_user(resp)
}

pub async fn register(payload: &RegisterRequest) -> Result<UserSummary, ApiError> {
    let resp: AuthResponse = send(&Call::post_json(endpoints::REGISTER, payload)).await?;
    require_user(resp)
}

pub async fn logout() -> Result<(), ApiError> {
    send_unit(&Call::post(endpoints::LOGOUT)).await
}

// ── Cars ──

pub async fn fetch_cars(query: &InventoryQuery, token: &CancelToken) -> Result<CarListing, ApiError> {
    send_cancellable(&Call::get(endpoints::cars(&query.to_query_string())), token).await
}

pub async fn fetch_car(car_id: i64, token: &CancelToken) -> Result<Car, ApiError> {
    let detail: CarDetail = send_cancellable(&Call::get(endpoints::car(car_id)), token).await?;
    Ok(detail.car)
}

pub async fn toggle_favorite(car_id: i64) -> Result<FavoriteToggle, ApiError> {
    send(&Call::post(endpoints::favorite(car_id))).await
}

// ── Comments ──

pub async fn fetch_comments(car_id: i64, token: &CancelToken) -> Result<Vec<Comment>, ApiError> {
    let list: CommentList = send_cancellable(&Call::get(endpoints::comments(car_id)), token).await?;
    Ok(list.comments)
}

/// Runs a thread mutation. The response body is ignored: the caller reloads
/// the thread afterwards.
pub async fn run_command(car_id: i64, command: &ThreadCommand) -> Result<(), ApiError> {
    send_unit(&command.call(car_id)).await
}
