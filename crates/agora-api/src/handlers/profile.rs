//! Dashboard profile handlers

use agora_service::dto::{MemberResponse, UpdateMemberRequest};
use agora_service::ProfileService;
use axum::{extract::State, Json};

use crate::extractors::{MemberUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/dashboard/profile
pub async fn get_profile(
    State(state): State<AppState>,
    MemberUser(user): MemberUser,
) -> ApiResult<Json<MemberResponse>> {
    let member = ProfileService::new(state.service_context())
        .get(user.username())
        .await?;
    Ok(Json(member.into()))
}

/// Update the caller's profile in the identity provider and locally
///
/// PUT /api/dashboard/profile
pub async fn update_profile(
    State(state): State<AppState>,
    MemberUser(user): MemberUser,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let member = ProfileService::new(state.service_context())
        .update(user.username(), &request)
        .await?;
    Ok(Json(member.into()))
}
