use axum::{
    extract::{Json, Path, Query},
    response::Response,
};
use contracts::shared::envelope::{EntityRequest, IdRequest, ListRequest};
use contracts::shared::paging::ListQuery;
use contracts::system::users::{CreateUserDto, UpdateUserDto};

use crate::shared::data::db::get_connection;
use crate::shared::error::respond;
use crate::shared::request::parse_path_id;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/system/users
pub async fn list(CurrentUser(caller): CurrentUser, Query(query): Query<ListQuery>) -> Response {
    respond(service::list_page(get_connection(), ListRequest { caller, query }).await)
}

/// GET /api/system/users/:id
pub async fn get_by_id(CurrentUser(caller): CurrentUser, Path(id): Path<String>) -> Response {
    let id = match parse_path_id(&id) {
        Ok(id) => id,
        Err(e) => return respond::<()>(Err(e)),
    };
    respond(service::get_by_id(get_connection(), IdRequest { caller, id }).await)
}

/// POST /api/system/users
pub async fn create(CurrentUser(caller): CurrentUser, Json(dto): Json<CreateUserDto>) -> Response {
    respond(service::create(get_connection(), EntityRequest::new(caller, dto)).await)
}

/// PUT /api/system/users/:id
pub async fn update(
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Response {
    // Ensure ID matches
    dto.id = match parse_path_id(&id) {
        Ok(id) => id,
        Err(e) => return respond::<()>(Err(e)),
    };
    respond(service::update(get_connection(), EntityRequest::new(caller, dto)).await)
}

/// DELETE /api/system/users/:id
pub async fn delete(CurrentUser(caller): CurrentUser, Path(id): Path<String>) -> Response {
    let id = match parse_path_id(&id) {
        Ok(id) => id,
        Err(e) => return respond::<()>(Err(e)),
    };
    respond(service::delete(get_connection(), IdRequest { caller, id }).await)
}
