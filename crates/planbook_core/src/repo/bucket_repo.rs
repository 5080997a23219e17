//! Task bucket repository contracts and graph-backed implementation.
//!
//! # Responsibility
//! - Add and remove entries in the three task buckets.
//! - Decode persisted leaf nodes into typed entities.
//!
//! # Invariants
//! - Entry keys are not unique; removal detach-deletes all key matches.
//! - Removing a nonexistent key under an existing user is a no-op.
//! - A missing owner is `UserNotFound`, never an empty success.

use crate::model::entities::{
    labels, rels, Category, Deadline, Item, OfficeWork, Place, Priority,
};
use crate::query::builder::category_query;
use crate::repo::{RepoError, RepoResult};
use crate::store::{
    GraphStore, NodeId, NodeMatch, NodeRecord, NodeRef, PathQuery, PropMap, PropValue, WriteOp,
};

/// Repository interface for bucket edits and category reads.
pub trait BucketRepository {
    fn add_item(&mut self, user_id: &str, item: &Item) -> RepoResult<()>;
    fn remove_item(&mut self, user_id: &str, item_name: &str) -> RepoResult<()>;
    fn add_place(&mut self, user_id: &str, place: &Place) -> RepoResult<()>;
    fn remove_place(&mut self, user_id: &str, city: &str) -> RepoResult<()>;
    fn add_work(&mut self, user_id: &str, work: &OfficeWork) -> RepoResult<()>;
    fn remove_work(&mut self, user_id: &str, work_title: &str) -> RepoResult<()>;
    /// Raw read of every leaf node in the user's bucket of this category.
    fn list_category(&self, user_id: &str, category: Category) -> RepoResult<Vec<NodeRecord>>;
}

/// Graph-backed bucket repository.
pub struct GraphBucketRepository<'store> {
    store: &'store mut GraphStore,
}

impl<'store> GraphBucketRepository<'store> {
    pub fn new(store: &'store mut GraphStore) -> Self {
        Self { store }
    }

    /// Finds the single Task node of the category owned by `user_id`.
    fn bucket_node(&self, user_id: &str, category: Category) -> RepoResult<NodeId> {
        let query = PathQuery::new(
            NodeMatch::label(labels::USER).with_prop("user_id", user_id),
        )
        .hop(
            rels::HAS_TASK,
            NodeMatch::label(labels::TASK).with_prop("type", category.as_db()),
        );
        let buckets = self.store.execute(&query)?;
        buckets
            .first()
            .map(|node| node.id)
            .ok_or_else(|| RepoError::UserNotFound(user_id.to_string()))
    }

    /// Creates a leaf node and links it to the user's bucket atomically.
    fn add_leaf(&mut self, user_id: &str, category: Category, props: PropMap) -> RepoResult<()> {
        let bucket = self.bucket_node(user_id, category)?;
        self.store.execute_write(&[
            WriteOp::CreateNode {
                label: category.leaf_label().to_string(),
                props,
            },
            WriteOp::CreateEdge {
                src: NodeRef::Existing(bucket),
                rel: category.leaf_rel().to_string(),
                dst: NodeRef::Created(0),
            },
        ])?;
        Ok(())
    }

    /// Detach-deletes every leaf of the bucket whose key matches.
    fn remove_leaf(&mut self, user_id: &str, category: Category, key: &str) -> RepoResult<()> {
        // Resolve the bucket first so a missing owner surfaces as
        // UserNotFound instead of a silent no-op.
        self.bucket_node(user_id, category)?;
        let path = category_query(user_id, category).with_leaf_key(category, key);
        self.store
            .execute_write(&[WriteOp::DetachDelete { path }])?;
        Ok(())
    }
}

trait LeafKeyExt {
    fn with_leaf_key(self, category: Category, key: &str) -> PathQuery;
}

impl LeafKeyExt for PathQuery {
    fn with_leaf_key(mut self, category: Category, key: &str) -> PathQuery {
        if let Some(last) = self.hops.last_mut() {
            last.node
                .props
                .insert(category.key_prop().to_string(), PropValue::from(key));
        }
        self
    }
}

impl BucketRepository for GraphBucketRepository<'_> {
    fn add_item(&mut self, user_id: &str, item: &Item) -> RepoResult<()> {
        item.validate()?;
        self.add_leaf(
            user_id,
            Category::Shopping,
            [
                ("item_name".to_string(), PropValue::from(item.item_name.as_str())),
                ("quantity".to_string(), PropValue::from(item.quantity)),
                ("unit".to_string(), PropValue::from(item.unit.as_str())),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn remove_item(&mut self, user_id: &str, item_name: &str) -> RepoResult<()> {
        self.remove_leaf(user_id, Category::Shopping, item_name)
    }

    fn add_place(&mut self, user_id: &str, place: &Place) -> RepoResult<()> {
        place.validate()?;
        self.add_leaf(
            user_id,
            Category::Travel,
            [
                ("city".to_string(), PropValue::from(place.city.as_str())),
                ("country".to_string(), PropValue::from(place.country.as_str())),
                (
                    "estimated_cost".to_string(),
                    PropValue::from(place.estimated_cost),
                ),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn remove_place(&mut self, user_id: &str, city: &str) -> RepoResult<()> {
        self.remove_leaf(user_id, Category::Travel, city)
    }

    fn add_work(&mut self, user_id: &str, work: &OfficeWork) -> RepoResult<()> {
        work.validate()?;
        self.add_leaf(
            user_id,
            Category::Work,
            [
                (
                    "work_title".to_string(),
                    PropValue::from(work.work_title.as_str()),
                ),
                (
                    "priority".to_string(),
                    PropValue::from(work.priority.as_db()),
                ),
                (
                    "deadline".to_string(),
                    PropValue::from(work.deadline.to_string()),
                ),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn remove_work(&mut self, user_id: &str, work_title: &str) -> RepoResult<()> {
        self.remove_leaf(user_id, Category::Work, work_title)
    }

    fn list_category(&self, user_id: &str, category: Category) -> RepoResult<Vec<NodeRecord>> {
        Ok(self.store.execute(&category_query(user_id, category))?)
    }
}

/// Decodes a persisted Item node, rejecting invalid state.
pub fn decode_item(record: &NodeRecord) -> RepoResult<Item> {
    Ok(Item {
        item_name: text_prop(record, "item_name")?.to_string(),
        quantity: record
            .prop("quantity")
            .and_then(PropValue::as_int)
            .ok_or_else(|| invalid(record, "quantity"))?,
        unit: text_prop(record, "unit")?.to_string(),
    })
}

/// Decodes a persisted Place node, rejecting invalid state.
pub fn decode_place(record: &NodeRecord) -> RepoResult<Place> {
    Ok(Place {
        city: text_prop(record, "city")?.to_string(),
        country: text_prop(record, "country")?.to_string(),
        estimated_cost: record
            .prop("estimated_cost")
            .and_then(PropValue::as_number)
            .ok_or_else(|| invalid(record, "estimated_cost"))?,
    })
}

/// Decodes a persisted Office_Work node, rejecting invalid state.
pub fn decode_work(record: &NodeRecord) -> RepoResult<OfficeWork> {
    let priority_text = text_prop(record, "priority")?;
    let priority = Priority::parse(priority_text).map_err(|err| {
        RepoError::InvalidData(format!("node {}: {err}", record.id))
    })?;
    let deadline_text = text_prop(record, "deadline")?;
    let deadline = Deadline::parse(deadline_text).map_err(|err| {
        RepoError::InvalidData(format!("node {}: {err}", record.id))
    })?;
    Ok(OfficeWork {
        work_title: text_prop(record, "work_title")?.to_string(),
        priority,
        deadline,
    })
}

fn text_prop<'a>(record: &'a NodeRecord, key: &str) -> RepoResult<&'a str> {
    record
        .prop(key)
        .and_then(PropValue::as_text)
        .ok_or_else(|| invalid(record, key))
}

fn invalid(record: &NodeRecord, key: &str) -> RepoError {
    RepoError::InvalidData(format!(
        "{} node {} misses property `{key}`",
        record.label, record.id
    ))
}
