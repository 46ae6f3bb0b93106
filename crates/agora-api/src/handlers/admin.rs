//! Admin area handlers

use agora_core::value_objects::Page;
use agora_service::dto::{AnalyticsResponse, MemberResponse};
use agora_service::AdminService;
use axum::{extract::State, Json};

use crate::extractors::{AdminUser, Pagination, PathParam};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/admin/users?page=&size=
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<Page<MemberResponse>>> {
    let members = AdminService::new(state.service_context())
        .list_users(page)
        .await?;
    Ok(Json(members.map(MemberResponse::from)))
}

/// Totals, per-member post counts and the most commented post
///
/// GET /api/admin/analytics
pub async fn analytics(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<AnalyticsResponse>> {
    let analytics = AdminService::new(state.service_context())
        .analytics()
        .await?;
    Ok(Json(analytics))
}

/// PUT /api/admin/elevate/{username}
pub async fn elevate(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(username): PathParam<String>,
) -> ApiResult<Json<MemberResponse>> {
    let member = AdminService::new(state.service_context())
        .assign_admin_roles(&username)
        .await?;
    Ok(Json(member.into()))
}
