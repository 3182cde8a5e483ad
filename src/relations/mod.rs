//! # Relationship Resolver
//!
//! Resolves parent/child links between collections through a
//! foreign-key naming convention: a child of `posts` carries
//! `postId` (singular parent name plus the configured suffix).
//!
//! - `embed` nests matching children under each parent
//! - `expand` nests the referenced parent inside each child

mod naming;
mod resolver;

pub use naming::{foreign_key, singularize};
pub use resolver::{apply_relationships, embed, expand, RelationshipParams};

use crate::query::RawParams;

/// Read `_embed` and `_expand` from request parameters.
pub fn parse_relationship_params(params: &RawParams) -> RelationshipParams {
    RelationshipParams::parse(params)
}
