use axum::{
    Json,
    extract::State,
    http::{
        HeaderMap, HeaderValue, StatusCode, Uri,
        header::{COOKIE, LOCATION, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::GateError,
    guard::NavigationGuard,
    navigator::Navigator,
    routes::normalize_path,
    session::Session,
};

/// health
///
/// Liveness probe for load balancers. Never touches the identity endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// navigate_page
///
/// [Any page path] Runs the navigation for the requested path with the
/// session carried by the token cookie.
///
/// - Admitted where asked: `200` with the `Landing` as JSON.
/// - Sent elsewhere: `303 See Other` pointing at the landing path.
/// - Token rejected along the way: the cookie is expired in the response.
pub async fn navigate_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, GateError> {
    let session = match cookie_value(&headers, &state.config.token_cookie) {
        Some(token) => Session::with_token(token),
        None => Session::anonymous(),
    };

    let guard = NavigationGuard::new(session, state.identity.clone());
    let navigator = Navigator::new(state.table.clone(), guard);

    let requested = normalize_path(uri.path());
    // The raw path goes in: the public allow-list is matched before trimming.
    let landing = navigator.navigate(uri.path()).await?;

    let mut response_headers = HeaderMap::new();
    if landing.token_cleared {
        response_headers.insert(
            SET_COOKIE,
            expired_cookie(&state.config.token_cookie)?,
        );
    }

    if landing.path == requested {
        return Ok((StatusCode::OK, response_headers, Json(landing)).into_response());
    }

    tracing::info!(from = %requested, to = %landing.path, "navigation redirected");

    let location = HeaderValue::from_str(&landing.path)
        .map_err(|_| GateError::InvalidHeader(format!("landing path {:?}", landing.path)))?;
    response_headers.insert(LOCATION, location);

    Ok((StatusCode::SEE_OTHER, response_headers).into_response())
}

/// Finds `name` in the request's `Cookie` headers. Empty values count as absent.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

fn expired_cookie(name: &str) -> Result<HeaderValue, GateError> {
    HeaderValue::from_str(&format!("{name}=; Path=/; Max-Age=0"))
        .map_err(|_| GateError::InvalidHeader(format!("cookie name {name:?}")))
}
