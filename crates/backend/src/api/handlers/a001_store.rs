use axum::{
    extract::{Json, Path, Query},
    response::Response,
};
use contracts::domain::a001_store::aggregate::StoreDto;
use contracts::shared::envelope::{EntityRequest, IdRequest, ListRequest};
use contracts::shared::paging::ListQuery;

use crate::domain::a001_store::service;
use crate::shared::data::db::get_connection;
use crate::shared::error::respond;
use crate::shared::request::parse_path_id;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/stores
pub async fn list(CurrentUser(caller): CurrentUser, Query(query): Query<ListQuery>) -> Response {
    respond(service::list_page(get_connection(), ListRequest { caller, query }).await)
}

/// GET /api/stores/:id
pub async fn get_by_id(CurrentUser(caller): CurrentUser, Path(id): Path<String>) -> Response {
    match parse_path_id(&id) {
        Ok(id) => respond(service::get_by_id(get_connection(), IdRequest { caller, id }).await),
        Err(e) => respond::<()>(Err(e)),
    }
}

/// POST /api/stores
pub async fn create(CurrentUser(caller): CurrentUser, Json(mut dto): Json<StoreDto>) -> Response {
    dto.id = None;
    respond(service::create(get_connection(), EntityRequest::new(caller, dto)).await)
}

/// PUT /api/stores/:id
pub async fn update(
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<StoreDto>,
) -> Response {
    match parse_path_id(&id) {
        Ok(id) => {
            dto.id = Some(id);
            respond(service::update(get_connection(), EntityRequest::new(caller, dto)).await)
        }
        Err(e) => respond::<()>(Err(e)),
    }
}

/// DELETE /api/stores/:id
pub async fn delete(CurrentUser(caller): CurrentUser, Path(id): Path<String>) -> Response {
    match parse_path_id(&id) {
        Ok(id) => respond(service::delete(get_connection(), IdRequest { caller, id }).await),
        Err(e) => respond::<()>(Err(e)),
    }
}
