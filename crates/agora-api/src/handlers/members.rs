//! Member directory handlers
//!
//! Reads are open to any member; writes need the admin role.

use agora_core::entities::MemberIdentifier;
use agora_service::dto::{MemberRequest, MemberResponse, UpdateMemberRequest};
use agora_service::services::member::requested_role;
use agora_service::MemberService;
use axum::{extract::State, Json};

use crate::extractors::{AdminUser, MemberIdPath, MemberUser, PathParam, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List every member
///
/// GET /api/members
pub async fn list_members(
    State(state): State<AppState>,
    _caller: MemberUser,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let members = MemberService::new(state.service_context()).list_all().await?;
    Ok(Json(members.iter().map(MemberResponse::from).collect()))
}

/// GET /api/members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    _caller: MemberUser,
    MemberIdPath(member_id): MemberIdPath,
) -> ApiResult<Json<MemberResponse>> {
    let member = MemberService::new(state.service_context())
        .find_by_id(member_id)
        .await?;
    Ok(Json(member.into()))
}

/// GET /api/members/email/{email}
pub async fn get_member_by_email(
    State(state): State<AppState>,
    _caller: MemberUser,
    PathParam(email): PathParam<String>,
) -> ApiResult<Json<MemberResponse>> {
    let member = MemberService::new(state.service_context())
        .find_by_email(&email)
        .await?;
    Ok(Json(member.into()))
}

/// GET /api/members/phone/{phone}
pub async fn get_member_by_phone(
    State(state): State<AppState>,
    _caller: MemberUser,
    PathParam(phone): PathParam<String>,
) -> ApiResult<Json<MemberResponse>> {
    let member = MemberService::new(state.service_context())
        .find_by_phone(&phone)
        .await?;
    Ok(Json(member.into()))
}

/// GET /api/members/username/{name}
pub async fn get_member_by_username(
    State(state): State<AppState>,
    _caller: MemberUser,
    PathParam(name): PathParam<String>,
) -> ApiResult<Json<MemberResponse>> {
    let member = MemberService::new(state.service_context())
        .find_by_username(&name)
        .await?;
    Ok(Json(member.into()))
}

/// Create a member record (no identity provider account)
///
/// POST /api/members
pub async fn create_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<MemberRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let role = requested_role(&request)?;
    let member = MemberService::new(state.service_context())
        .create(&request, role)
        .await?;
    Ok(Created(Json(member.into())))
}

/// PUT /api/members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    MemberIdPath(member_id): MemberIdPath,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let member = MemberService::new(state.service_context())
        .update(&MemberIdentifier::MemberId(member_id), &request.patch())
        .await?;
    Ok(Json(member.into()))
}

/// DELETE /api/members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    MemberIdPath(member_id): MemberIdPath,
) -> ApiResult<NoContent> {
    MemberService::new(state.service_context())
        .delete(member_id)
        .await?;
    Ok(NoContent)
}
