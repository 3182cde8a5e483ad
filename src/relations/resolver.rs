//! Embedding and expansion of related records
//!
//! Each step returns new records; inputs are never modified. Missing
//! collections produce empty or absent relations rather than errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::naming::{foreign_key, singularize};
use crate::query::{RawParams, EMBED_PARAM, EXPAND_PARAM};
use crate::record::Identifier;
use crate::store::Storage;

/// Relations requested through `_embed` and `_expand`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipParams {
    pub embed: Vec<String>,
    pub expand: Vec<String>,
}

impl RelationshipParams {
    /// Read `_embed` and `_expand`, each repeatable and comma-separated.
    pub fn parse(params: &RawParams) -> Self {
        Self {
            embed: names(params.all(EMBED_PARAM)),
            expand: names(params.all(EXPAND_PARAM)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.embed.is_empty() && self.expand.is_empty()
    }
}

fn names(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Attach to each parent a `child_name` list of children pointing at it.
///
/// `children` is `None` when the child collection does not exist; every
/// parent then gets an empty list.
pub fn embed(
    parents: &[Value],
    parent_name: &str,
    child_name: &str,
    children: Option<&[Value]>,
    id_field: &str,
    fk_suffix: &str,
) -> Vec<Value> {
    let fk = foreign_key(parent_name, fk_suffix);
    let children = children.unwrap_or(&[]);

    parents
        .iter()
        .map(|parent| {
            let related: Vec<Value> = match Identifier::of_record(parent, id_field) {
                Some(id) => children
                    .iter()
                    .filter(|child| child.get(&fk).is_some_and(|v| id.matches(v)))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            };

            let mut parent = parent.clone();
            if let Some(obj) = parent.as_object_mut() {
                obj.insert(child_name.to_string(), Value::Array(related));
            }
            parent
        })
        .collect()
}

/// Attach to each child the parent record its foreign key points at.
///
/// The field is named `singularize(parent_name)`. When the key is absent
/// or no parent matches, the field is left off entirely.
pub fn expand<F>(children: &[Value], parent_name: &str, fk_suffix: &str, find_parent: F) -> Vec<Value>
where
    F: Fn(&Identifier) -> Option<Value>,
{
    let fk = foreign_key(parent_name, fk_suffix);
    let field = singularize(parent_name);

    children
        .iter()
        .map(|child| {
            let mut child = child.clone();
            let parent = child
                .get(&fk)
                .and_then(Identifier::from_value)
                .and_then(|id| find_parent(&id));

            if let (Some(parent), Some(obj)) = (parent, child.as_object_mut()) {
                obj.insert(field.to_string(), parent);
            }
            child
        })
        .collect()
}

/// Run every requested embed, then every requested expand, in order.
pub fn apply_relationships(
    records: &[Value],
    collection_name: &str,
    relations: &RelationshipParams,
    storage: &dyn Storage,
    id_field: &str,
    fk_suffix: &str,
) -> Vec<Value> {
    let mut current = records.to_vec();

    for child_name in &relations.embed {
        let children = storage.resource(child_name).map(|r| r.into_records());
        current = embed(
            &current,
            collection_name,
            child_name,
            children.as_deref(),
            id_field,
            fk_suffix,
        );
    }

    for parent_name in &relations.expand {
        current = expand(&current, parent_name, fk_suffix, |id| {
            storage.get_by_id(parent_name, id)
        });
    }

    current
}
