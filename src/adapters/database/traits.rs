//! Store abstraction traits
//!
//! This module defines the contract every family store implements, plus the
//! handle and receipt types passed between the workload and a store.

use crate::domain::family::Family;
use crate::domain::ids::ItemKey;
use crate::domain::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::time::Duration;

/// Identity of a database that is known to exist
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseHandle {
    /// Database id
    pub id: String,
}

/// What a container should look like if it has to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Container id
    pub name: String,

    /// Partition key path, e.g. `/lastName`
    pub partition_key_path: String,

    /// Manual throughput (RU/s) provisioned on creation
    pub throughput: u32,
}

/// Identity of a container that is known to exist
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerHandle {
    /// Owning database id
    pub database: String,

    /// Container id
    pub id: String,

    /// Partition key path the container was created with
    pub partition_key_path: String,
}

/// Service-reported cost of one operation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RequestCost {
    /// Request units charged
    pub request_charge: f64,

    /// Wall-clock time of the call
    pub latency: Duration,
}

/// Outcome of an insert
#[derive(Debug, Clone)]
pub struct WriteReceipt {
    /// Key the item was written under
    pub key: ItemKey,

    /// Cost of the write
    pub cost: RequestCost,
}

/// Outcome of a point read
#[derive(Debug, Clone)]
pub struct ReadReceipt {
    /// The stored family
    pub family: Family,

    /// Cost of the read
    pub cost: RequestCost,
}

/// One page of query results
#[derive(Debug, Clone, Default)]
pub struct QueryPage {
    /// Families on this page
    pub items: Vec<Family>,

    /// Request units charged for the page; 0 when the backend does not report it
    pub request_charge: f64,
}

/// Lazily produced query pages
pub type QueryPageStream = BoxStream<'static, Result<QueryPage>>;

/// Filter for [`FamilyStore::query_families`]: families whose last name is in a set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyQuery {
    last_names: Vec<String>,
}

impl FamilyQuery {
    /// Matches families with any of the given last names, duplicates dropped
    pub fn by_last_names<I, S>(last_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in last_names {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self { last_names: names }
    }

    /// Last names in the filter, in the order given
    pub fn last_names(&self) -> &[String] {
        &self.last_names
    }

    /// Whether a family passes the filter
    pub fn matches(&self, family: &Family) -> bool {
        self.last_names.iter().any(|n| n == &family.last_name)
    }

    /// SQL text for the filter, with single quotes escaped
    ///
    /// ```
    /// use hearth::adapters::database::FamilyQuery;
    ///
    /// let query = FamilyQuery::by_last_names(["Andersen", "O'Brien"]);
    /// assert_eq!(
    ///     query.to_sql(),
    ///     "SELECT * FROM Family WHERE Family.lastName IN ('Andersen', 'O''Brien')"
    /// );
    /// ```
    pub fn to_sql(&self) -> String {
        let values: Vec<String> = self
            .last_names
            .iter()
            .map(|n| format!("'{}'", n.replace('\'', "''")))
            .collect();
        format!(
            "SELECT * FROM Family WHERE Family.lastName IN ({})",
            values.join(", ")
        )
    }
}

/// Storage contract for family documents
///
/// Implementations: [`crate::adapters::cosmosdb::CosmosFamilyStore`] and
/// [`crate::adapters::memory::InMemoryFamilyStore`].
#[async_trait]
pub trait FamilyStore: Send + Sync {
    /// Short backend name for logs
    fn backend(&self) -> &'static str;

    /// Ensure a database exists, creating it if necessary
    ///
    /// Idempotent: repeated calls return equal handles.
    async fn ensure_database(&self, name: &str) -> Result<DatabaseHandle>;

    /// Ensure a container exists in `database`, creating it from `spec` if necessary
    ///
    /// Idempotent: repeated calls return equal handles. An existing container
    /// keeps its own partition key path and throughput.
    async fn ensure_container(
        &self,
        database: &DatabaseHandle,
        spec: &ContainerSpec,
    ) -> Result<ContainerHandle>;

    /// Insert a family under its last name as partition key
    ///
    /// # Errors
    ///
    /// Fails with a conflict if the id already exists in that partition.
    async fn create_family(
        &self,
        container: &ContainerHandle,
        family: &Family,
    ) -> Result<WriteReceipt>;

    /// Point read by id and partition key
    ///
    /// # Errors
    ///
    /// Fails with a not-found error if no such item exists.
    async fn read_family(&self, container: &ContainerHandle, key: &ItemKey)
        -> Result<ReadReceipt>;

    /// Run a filtered query, returning pages of at most `page_size` items
    async fn query_families(
        &self,
        container: &ContainerHandle,
        query: &FamilyQuery,
        page_size: usize,
    ) -> Result<QueryPageStream>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::family::FamilyBuilder;

    #[test]
    fn test_query_sql_single_name() {
        let query = FamilyQuery::by_last_names(["Andersen"]);
        assert_eq!(
            query.to_sql(),
            "SELECT * FROM Family WHERE Family.lastName IN ('Andersen')"
        );
    }

    #[test]
    fn test_query_sql_default_names() {
        let query = FamilyQuery::by_last_names(["Andersen", "Wakefield", "Johnson"]);
        assert_eq!(
            query.to_sql(),
            "SELECT * FROM Family WHERE Family.lastName IN ('Andersen', 'Wakefield', 'Johnson')"
        );
    }

    #[test]
    fn test_query_deduplicates() {
        let query = FamilyQuery::by_last_names(vec!["Smith".to_string(), "Smith".to_string()]);
        assert_eq!(query.last_names(), ["Smith".to_string()]);
    }

    #[test]
    fn test_query_matches() {
        let query = FamilyQuery::by_last_names(["Andersen", "Johnson"]);
        let andersen = FamilyBuilder::new("Andersen-1", "Andersen").build().unwrap();
        let smith = FamilyBuilder::new("Smith-1", "Smith").build().unwrap();
        assert!(query.matches(&andersen));
        assert!(!query.matches(&smith));
    }

    #[test]
    fn test_handles_compare_by_identity() {
        let a = DatabaseHandle {
            id: "db".to_string(),
        };
        let b = DatabaseHandle {
            id: "db".to_string(),
        };
        assert_eq!(a, b);
    }
}
