//! Graph store handle and its typed query surface.
//!
//! # Responsibility
//! - Execute read-only path queries returning typed node records.
//! - Execute write batches atomically inside one transaction.
//!
//! # Invariants
//! - Query results are ordered by node insertion id (first-seen order).
//! - `DetachDelete` removes matched nodes together with all incident
//!   edges (edge rows cascade on node delete).
//! - Match values travel as bound parameters only.

use crate::store::{open, StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Transaction, TransactionBehavior};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Stable node identifier assigned by the store.
pub type NodeId = i64;

/// Scalar property value stored on a node.
///
/// Variant order matters for untagged deserialization: integers must be
/// tried before floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl PropValue {
    /// Returns the text content when this value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the integer content when this value is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns a numeric view, coercing integers to floats.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    fn to_sql_value(&self) -> Value {
        match self {
            Self::Int(value) => Value::Integer(*value),
            Self::Float(value) => Value::Real(*value),
            Self::Text(value) => Value::Text(value.clone()),
        }
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Property bag attached to a node.
pub type PropMap = BTreeMap<String, PropValue>;

/// Typed record returned by read queries.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    pub label: String,
    pub props: PropMap,
}

impl NodeRecord {
    /// Looks up a property by key.
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }
}

/// Exact-equality node pattern: label plus property filters.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMatch {
    pub label: String,
    pub props: PropMap,
}

impl NodeMatch {
    /// Creates a pattern matching every node with the given label.
    pub fn label(label: &str) -> Self {
        Self {
            label: label.to_string(),
            props: PropMap::new(),
        }
    }

    /// Adds an exact property-equality filter.
    pub fn with_prop(mut self, key: &str, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }
}

/// One traversal step: follow a typed relationship to a matching node.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop {
    pub rel: String,
    pub node: NodeMatch,
}

/// Read-only path query: a start pattern followed by typed hops.
///
/// `execute` returns the nodes bound at the end of the path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathQuery {
    pub start: NodeMatch,
    pub hops: Vec<Hop>,
}

impl PathQuery {
    /// Starts a path query at nodes matching `start`.
    pub fn new(start: NodeMatch) -> Self {
        Self {
            start,
            hops: Vec::new(),
        }
    }

    /// Appends a traversal hop over relationship `rel` to a matching node.
    pub fn hop(mut self, rel: &str, node: NodeMatch) -> Self {
        self.hops.push(Hop {
            rel: rel.to_string(),
            node,
        });
        self
    }
}

/// Node reference inside a write batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    /// The n-th node created earlier in the same batch (zero-based).
    Created(usize),
    /// An already persisted node.
    Existing(NodeId),
}

/// One mutation inside an atomic write batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    CreateNode { label: String, props: PropMap },
    CreateEdge { src: NodeRef, rel: String, dst: NodeRef },
    /// Deletes every node matched by the path together with its edges.
    DetachDelete { path: PathQuery },
}

/// Handle owning the graph database connection.
///
/// One handle is constructed at process start and passed to repositories;
/// there is no process-wide singleton.
#[derive(Debug)]
pub struct GraphStore {
    conn: Connection,
}

impl GraphStore {
    /// Opens a file-backed store, applying pending migrations.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open::open_db(path)?,
        })
    }

    /// Opens an in-memory store, applying pending migrations.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open::open_db_in_memory()?,
        })
    }

    /// Executes a read-only path query and returns the terminal nodes.
    pub fn execute(&self, query: &PathQuery) -> StoreResult<Vec<NodeRecord>> {
        let (sql, binds) = build_path_sql(query, Projection::Records);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let id: NodeId = row.get(0)?;
            let label: String = row.get(1)?;
            let props_json: String = row.get(2)?;
            records.push(NodeRecord {
                id,
                label,
                props: decode_props(id, &props_json)?,
            });
        }
        Ok(records)
    }

    /// Applies a batch of write operations inside one transaction.
    ///
    /// The whole batch commits or rolls back as a unit; the transaction is
    /// released on every exit path.
    pub fn execute_write(&mut self, ops: &[WriteOp]) -> StoreResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut created: Vec<NodeId> = Vec::new();

        for op in ops {
            match op {
                WriteOp::CreateNode { label, props } => {
                    let json = serde_json::to_string(props).map_err(|err| {
                        StoreError::InvalidData(format!("unencodable property bag: {err}"))
                    })?;
                    tx.execute(
                        "INSERT INTO nodes (label, props) VALUES (?1, ?2);",
                        params![label, json],
                    )?;
                    created.push(tx.last_insert_rowid());
                }
                WriteOp::CreateEdge { src, rel, dst } => {
                    let src_id = resolve_ref(&created, *src)?;
                    let dst_id = resolve_ref(&created, *dst)?;
                    tx.execute(
                        "INSERT INTO edges (src, rel, dst) VALUES (?1, ?2, ?3);",
                        params![src_id, rel, dst_id],
                    )?;
                }
                WriteOp::DetachDelete { path } => {
                    detach_delete(&tx, path)?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Counts nodes carrying the given label. Diagnostic helper.
    pub fn count_nodes(&self, label: &str) -> StoreResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM nodes WHERE label = ?1;",
            [label],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Counts all edges in the store. Diagnostic helper.
    pub fn count_edges(&self) -> StoreResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM edges;", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn detach_delete(tx: &Transaction<'_>, path: &PathQuery) -> StoreResult<()> {
    let (select_sql, binds) = build_path_sql(path, Projection::Ids);
    // Incident edges cascade via foreign keys, so deleting the node rows
    // is a full detach-delete.
    let sql = format!("DELETE FROM nodes WHERE id IN ({select_sql});");
    tx.execute(&sql, params_from_iter(binds))?;
    Ok(())
}

fn resolve_ref(created: &[NodeId], node_ref: NodeRef) -> StoreResult<NodeId> {
    match node_ref {
        NodeRef::Existing(id) => Ok(id),
        NodeRef::Created(index) => created.get(index).copied().ok_or_else(|| {
            StoreError::InvalidData(format!(
                "edge references created-node slot {index}, batch has {}",
                created.len()
            ))
        }),
    }
}

enum Projection {
    Records,
    Ids,
}

/// Renders a path query as one parametrized SELECT over the node/edge
/// tables. Every match value is bound, never inlined.
fn build_path_sql(query: &PathQuery, projection: Projection) -> (String, Vec<Value>) {
    let last = query.hops.len();
    let select = match projection {
        Projection::Records => format!("n{last}.id, n{last}.label, n{last}.props"),
        Projection::Ids => format!("n{last}.id"),
    };

    let mut sql = format!("SELECT {select} FROM nodes n0");
    let mut binds: Vec<Value> = Vec::new();

    for (index, hop) in query.hops.iter().enumerate() {
        let next = index + 1;
        sql.push_str(&format!(
            " JOIN edges e{next} ON e{next}.src = n{index}.id AND e{next}.rel = ?"
        ));
        binds.push(Value::Text(hop.rel.clone()));
        sql.push_str(&format!(" JOIN nodes n{next} ON n{next}.id = e{next}.dst"));
    }

    sql.push_str(" WHERE n0.label = ?");
    binds.push(Value::Text(query.start.label.clone()));
    push_prop_filters(&mut sql, &mut binds, 0, &query.start.props);

    for (index, hop) in query.hops.iter().enumerate() {
        let next = index + 1;
        sql.push_str(&format!(" AND n{next}.label = ?"));
        binds.push(Value::Text(hop.node.label.clone()));
        push_prop_filters(&mut sql, &mut binds, next, &hop.node.props);
    }

    sql.push_str(&format!(" ORDER BY n{last}.id ASC"));
    (sql, binds)
}

fn push_prop_filters(sql: &mut String, binds: &mut Vec<Value>, alias: usize, props: &PropMap) {
    for (key, value) in props {
        sql.push_str(&format!(" AND json_extract(n{alias}.props, ?) = ?"));
        binds.push(Value::Text(format!("$.{key}")));
        binds.push(value.to_sql_value());
    }
}

fn decode_props(node_id: NodeId, json: &str) -> StoreResult<PropMap> {
    serde_json::from_str(json).map_err(|err| {
        StoreError::InvalidData(format!("node {node_id} has invalid property bag: {err}"))
    })
}
