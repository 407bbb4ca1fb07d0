use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::profile::{HelperState, ProfileView, UpdateProfileRequest},
    error::AppResult,
    middleware::session::BuyerSession,
    response::ApiResponse,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

pub fn helpers_router() -> Router<AppState> {
    Router::new().route(
        "/{name}",
        get(helper_state).put(mark_helper_seen).delete(reset_helper),
    )
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Buyer profile, remote when available", body = ApiResponse<ProfileView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    session: BuyerSession,
) -> AppResult<Json<ApiResponse<ProfileView>>> {
    let store = state.store_for(&session);
    let resp = profile_service::get_profile(&store, &state.catalog, &session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Cached profile saved", body = ApiResponse<ProfileView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: BuyerSession,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<ProfileView>>> {
    let store = state.store_for(&session);
    Ok(Json(profile_service::update_profile(&store, payload)?))
}

#[utoipa::path(
    get,
    path = "/api/helpers/{name}",
    params(
        ("name" = String, Path, description = "Helper name, e.g. cart")
    ),
    responses(
        (status = 200, description = "Whether the helper was seen", body = ApiResponse<HelperState>)
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn helper_state(
    State(state): State<AppState>,
    session: BuyerSession,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<HelperState>>> {
    let store = state.store_for(&session);
    Ok(Json(profile_service::helper_state(&store, &name)?))
}

#[utoipa::path(
    put,
    path = "/api/helpers/{name}",
    params(
        ("name" = String, Path, description = "Helper name, e.g. cart")
    ),
    responses(
        (status = 200, description = "Helper marked as seen", body = ApiResponse<HelperState>)
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn mark_helper_seen(
    State(state): State<AppState>,
    session: BuyerSession,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<HelperState>>> {
    let store = state.store_for(&session);
    Ok(Json(profile_service::mark_helper_seen(&store, &name)?))
}

#[utoipa::path(
    delete,
    path = "/api/helpers/{name}",
    params(
        ("name" = String, Path, description = "Helper name, e.g. cart")
    ),
    responses(
        (status = 200, description = "Helper will show again", body = ApiResponse<HelperState>)
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn reset_helper(
    State(state): State<AppState>,
    session: BuyerSession,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<HelperState>>> {
    let store = state.store_for(&session);
    Ok(Json(profile_service::reset_helper(&store, &name)?))
}
