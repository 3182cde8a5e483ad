//! Resource HTTP Routes
//!
//! Read-only endpoints over the loaded database:
//!
//! - `GET /db` - the whole database
//! - `GET /:name` - a collection (queried) or a singular resource
//! - `GET /:name/:id` - one record of a collection
//! - `GET /:parent/:id/:child` - children of one parent record (queried)

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, HeaderName, HeaderValue, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::errors::{RestError, RestResult};
use crate::query::{
    apply_query, build_link_header, parse_query, QueryDescriptor, RawParams, LINK_HEADER,
    TOTAL_COUNT_HEADER,
};
use crate::record::Identifier;
use crate::relations::{apply_relationships, foreign_key, parse_relationship_params};
use crate::store::{MemoryStore, Resource, Storage};

// ==================
// Shared State
// ==================

/// Store shared across handlers
#[derive(Clone)]
pub struct ResourceState {
    pub store: Arc<MemoryStore>,
}

impl ResourceState {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

// ==================
// Router
// ==================

/// Create resource routes
pub fn resource_routes(state: ResourceState) -> Router {
    Router::new()
        .route("/db", get(database_snapshot))
        .route("/:name", get(get_resource))
        .route("/:name/:id", get(get_record))
        .route("/:parent/:id/:child", get(get_nested))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// GET /db
async fn database_snapshot(State(state): State<ResourceState>) -> Json<Value> {
    Json(state.store.snapshot())
}

/// GET /:name
async fn get_resource(
    State(state): State<ResourceState>,
    Path(name): Path<String>,
    RawQuery(query): RawQuery,
    uri: Uri,
) -> RestResult<Response> {
    let params = RawParams::parse_query_string(query.as_deref().unwrap_or(""));

    match state.store.resource(&name) {
        Some(Resource::Collection(records)) => {
            let descriptor = parse_query(&params);
            respond_with_collection(&state, &name, records, &params, descriptor, &uri)
        }
        Some(Resource::Singular(record)) => Ok(Json(record).into_response()),
        None => Err(RestError::ResourceNotFound(name)),
    }
}

/// GET /:name/:id
async fn get_record(
    State(state): State<ResourceState>,
    Path((name, id)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> RestResult<Response> {
    let store: &MemoryStore = &state.store;
    if !store.is_collection(&name) {
        return Err(match store.resource(&name) {
            Some(_) => RestError::NotACollection(name),
            None => RestError::ResourceNotFound(name),
        });
    }

    let identifier = Identifier::from_text(&id);
    let record = store
        .get_by_id(&name, &identifier)
        .ok_or_else(|| RestError::RecordNotFound {
            resource: name.clone(),
            id,
        })?;

    let params = RawParams::parse_query_string(query.as_deref().unwrap_or(""));
    let relations = parse_relationship_params(&params);
    if relations.is_empty() {
        return Ok(Json(record).into_response());
    }

    let related = apply_relationships(
        std::slice::from_ref(&record),
        &name,
        &relations,
        store,
        store.id_field(),
        store.foreign_key_suffix(),
    );
    let record = related.into_iter().next().unwrap_or(record);
    Ok(Json(record).into_response())
}

/// GET /:parent/:id/:child
///
/// Same as `GET /:child?<parent>Id=<id>`.
async fn get_nested(
    State(state): State<ResourceState>,
    Path((parent, id, child)): Path<(String, String, String)>,
    RawQuery(query): RawQuery,
    uri: Uri,
) -> RestResult<Response> {
    let records = match state.store.resource(&child) {
        Some(Resource::Collection(records)) => records,
        Some(Resource::Singular(_)) => return Err(RestError::NotACollection(child)),
        None => return Err(RestError::ResourceNotFound(child)),
    };

    let params = RawParams::parse_query_string(query.as_deref().unwrap_or(""));
    let fk = foreign_key(&parent, state.store.foreign_key_suffix());
    let descriptor = parse_query(&params).with_filter(&fk, id);

    respond_with_collection(&state, &child, records, &params, descriptor, &uri)
}

// ==================
// Helpers
// ==================

/// Query pipeline first, then relationships on the returned window only.
fn respond_with_collection(
    state: &ResourceState,
    name: &str,
    records: Vec<Value>,
    params: &RawParams,
    descriptor: QueryDescriptor,
    uri: &Uri,
) -> RestResult<Response> {
    let store: &MemoryStore = &state.store;
    let output = apply_query(records, &descriptor);

    let relations = parse_relationship_params(params);
    let records = if relations.is_empty() {
        output.records
    } else {
        apply_relationships(
            &output.records,
            name,
            &relations,
            store,
            store.id_field(),
            store.foreign_key_suffix(),
        )
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_COUNT_HEADER),
        HeaderValue::from(output.total),
    );

    if let (Some(page), Some(limit)) = (descriptor.page, descriptor.limit) {
        let url = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        let link = build_link_header(url, page, limit, output.total);
        let value =
            HeaderValue::from_str(&link).map_err(|e| RestError::Internal(e.to_string()))?;
        headers.insert(HeaderName::from_static(LINK_HEADER), value);
    }

    Ok((headers, Json(records)).into_response())
}
