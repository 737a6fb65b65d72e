//! Test fixture for GraphRename integration tests
//!
//! Wraps a fresh MemoryStore and uses only the public crate API.

use graphrename::storage::StorageError;
use graphrename::{
    Edge, MemoryStore, Node, RenameCoordinator, RenameSettings, SchemaCatalog, Value,
};

use super::init_logging;

pub struct TestFixture {
    store: MemoryStore,
    run_id: u64,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_schema(SchemaCatalog::new())
    }

    pub fn with_schema(catalog: SchemaCatalog) -> Self {
        init_logging();
        TestFixture {
            store: MemoryStore::with_schema(catalog),
            run_id: fastrand::u64(..),
        }
    }

    /// Three Person nodes, one Company node, KNOWS and WORKS_AT edges
    pub fn with_people() -> Result<Self, StorageError> {
        let fixture = Self::new();
        fixture.add_node(
            "alice",
            &["Person"],
            &[("name", Value::from("Alice")), ("age", Value::from(30i64))],
        )?;
        fixture.add_node(
            "bob",
            &["Person", "Employee"],
            &[("name", Value::from("Bob")), ("age", Value::from(25i64))],
        )?;
        fixture.add_node("carol", &["Person"], &[("name", Value::from("Carol"))])?;
        fixture.add_node("acme", &["Company"], &[("name", Value::from("Acme"))])?;
        fixture.add_edge(
            "k1",
            "alice",
            "bob",
            "KNOWS",
            &[("since", Value::from(2015i64))],
        )?;
        fixture.add_edge("k2", "bob", "carol", "KNOWS", &[])?;
        fixture.add_edge(
            "w1",
            "alice",
            "acme",
            "WORKS_AT",
            &[("role", Value::from("Engineer"))],
        )?;
        Ok(fixture)
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn coordinator(&self) -> RenameCoordinator<'_> {
        RenameCoordinator::new(&self.store)
    }

    pub fn coordinator_with(&self, settings: RenameSettings) -> RenameCoordinator<'_> {
        RenameCoordinator::with_settings(&self.store, settings)
    }

    /// A node id unique to this fixture run
    pub fn unique_id(&self, prefix: &str) -> String {
        format!("{}_{}_{}", prefix, self.run_id, fastrand::u32(..))
    }

    pub fn add_node(
        &self,
        id: &str,
        labels: &[&str],
        properties: &[(&str, Value)],
    ) -> Result<(), StorageError> {
        let mut node = Node::with_labels(id, labels);
        for (key, value) in properties {
            node = node.with_property(*key, value.clone());
        }
        self.store.insert_node(node)
    }

    pub fn add_edge(
        &self,
        id: &str,
        from: &str,
        to: &str,
        rel_type: &str,
        properties: &[(&str, Value)],
    ) -> Result<(), StorageError> {
        let mut edge = Edge::new(id, from, to, rel_type);
        for (key, value) in properties {
            edge = edge.with_property(*key, value.clone());
        }
        self.store.insert_edge(edge)
    }

    /// Insert `count` nodes carrying `label`, returning their ids
    pub fn add_labelled_nodes(&self, label: &str, count: usize) -> Result<Vec<String>, StorageError> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let id = self.unique_id(&format!("{}{}", label.to_lowercase(), i));
            self.add_node(&id, &[label], &[("seq", Value::from(i as i64))])?;
            ids.push(id);
        }
        Ok(ids)
    }

    pub fn label_count(&self, label: &str) -> usize {
        self.store.nodes_with_label(label).len()
    }

    pub fn type_count(&self, rel_type: &str) -> usize {
        self.store.edges_with_type(rel_type).len()
    }
}
