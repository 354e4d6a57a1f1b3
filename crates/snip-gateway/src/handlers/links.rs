use crate::error::{ApiError, Result};
use crate::model::{
    BulkCreateRequest, BulkCreateResponse, BulkDeleteRequest, BulkDeleteResponse,
    CacheStatusResponse, CreateLinkRequest, LinkResponse,
};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use snip_core::ShortId;

pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>)> {
    if request.url.is_empty() {
        return Err(ApiError::BadRequest("url must not be empty".to_string()));
    }

    let id = state.shortener().shorten(&request.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse {
            id: id.to_string(),
            url: request.url,
        }),
    ))
}

pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>> {
    let id = ShortId::new(id)?;

    match state.shortener().resolve(&id).await? {
        Some(url) => Ok(Json(LinkResponse {
            id: id.to_string(),
            url,
        })),
        None => Err(ApiError::NotFound),
    }
}

/// The public short-link route: resolves and issues a 307 so clients
/// re-use the original method against the target.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    // On the public route a malformed id is just an unknown path.
    let id = ShortId::new(id).map_err(|_| ApiError::NotFound)?;

    match state.shortener().resolve(&id).await? {
        Some(url) => Ok(Redirect::temporary(&url)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let id = ShortId::new(id)?;

    if state.shortener().delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

pub async fn list_links_handler(State(state): State<AppState>) -> Result<Json<Vec<LinkResponse>>> {
    let records = state.shortener().all_links().await?;

    Ok(Json(
        records
            .into_iter()
            .map(|record| LinkResponse {
                id: record.id.to_string(),
                url: record.url,
            })
            .collect(),
    ))
}

pub async fn bulk_create_handler(
    State(state): State<AppState>,
    Json(request): Json<BulkCreateRequest>,
) -> Result<(StatusCode, Json<BulkCreateResponse>)> {
    if request.urls.is_empty() {
        return Err(ApiError::BadRequest("urls array cannot be empty".to_string()));
    }
    if request.urls.iter().any(String::is_empty) {
        return Err(ApiError::BadRequest("urls must not contain empty entries".to_string()));
    }

    let ids = state.shortener().bulk_create(&request.urls).await?;

    Ok((
        StatusCode::CREATED,
        Json(BulkCreateResponse {
            ids: ids.iter().map(ToString::to_string).collect(),
        }),
    ))
}

pub async fn bulk_delete_handler(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>> {
    let ids = request
        .ids
        .into_iter()
        .map(ShortId::new)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let removed = state.shortener().bulk_delete(&ids).await?;

    Ok(Json(BulkDeleteResponse { removed }))
}

pub async fn cache_status_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CacheStatusResponse>> {
    let id = ShortId::new(id)?;
    let cached = state.shortener().is_cached(&id).await?;

    Ok(Json(CacheStatusResponse {
        id: id.to_string(),
        cached,
    }))
}
