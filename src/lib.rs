//! mockrest - a deterministic mock REST API over in-memory JSON collections
//!
//! Three engines sit between the HTTP layer and the stored records:
//!
//! - `query`: filters, full-text search, operators, sorting, windowing
//!   and pagination links
//! - `relations`: `_embed` children and `_expand` parents by foreign key
//! - `rewrite`: maps incoming URLs to new ones before routing
//!
//! None of the engines fail on the request path. Only loading (config,
//! database, rewrite rules) and server startup return errors.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod record;
pub mod relations;
pub mod rewrite;
pub mod store;

pub use query::{apply_query, build_link_header, parse_query, QueryDescriptor, QueryOutput, RawParams};
pub use relations::{apply_relationships, parse_relationship_params, RelationshipParams};
pub use rewrite::{compile_rewrite_rules, rewrite, CompiledRuleset};
pub use store::{MemoryStore, Resource, Storage};
