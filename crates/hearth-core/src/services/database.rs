use std::collections::BTreeMap;
use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::Configurator;
use crate::container::Service;
use crate::kernel::error::Result;
use crate::services::error::ServiceError;

/// Connection used when `database.default` is not set and nothing is configured.
pub const DEFAULT_CONNECTION: &str = "default";

/// Settings of one named connection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub driver: String,
    #[serde(default)]
    pub url: String,
    /// Prepended to every table name.
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    default: Option<String>,
    #[serde(default)]
    connections: BTreeMap<String, ConnectionConfig>,
}

/// Named connection settings plus a table query builder.
///
/// No statement is executed; [`TableRef`] renders SQL text for the connection
/// it was built against.
#[derive(Debug)]
pub struct DatabaseManager {
    connections: RwLock<BTreeMap<String, ConnectionConfig>>,
    default: String,
}

impl Service for DatabaseManager {
    const ID: &'static str = "hearth.database";
}

impl Default for DatabaseManager {
    fn default() -> Self {
        Self {
            connections: RwLock::new(BTreeMap::new()),
            default: DEFAULT_CONNECTION.to_string(),
        }
    }
}

impl DatabaseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `database` section. Without `database.default` the
    /// first configured connection (by name) is the default.
    pub fn from_config(config: &Configurator) -> Self {
        let section: DatabaseSection = config.get_as("database").unwrap_or_default();
        let default = section
            .default
            .filter(|d| !d.is_empty())
            .or_else(|| section.connections.keys().next().cloned())
            .unwrap_or_else(|| DEFAULT_CONNECTION.to_string());

        Self {
            connections: RwLock::new(section.connections),
            default,
        }
    }

    pub fn add_connection(&self, name: impl Into<String>, connection: ConnectionConfig) {
        self.connections.write().insert(name.into(), connection);
    }

    pub fn connection(&self, name: &str) -> Result<ConnectionConfig> {
        self.connections
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ServiceError::UnknownConnection(name.to_string()).into())
    }

    pub fn default_connection(&self) -> Result<ConnectionConfig> {
        self.connection(&self.default)
    }

    pub fn default_connection_name(&self) -> &str {
        &self.default
    }

    /// Configured connection names, sorted.
    pub fn connections(&self) -> Vec<String> {
        self.connections.read().keys().cloned().collect()
    }

    /// Query builder for `name` on the default connection.
    pub fn table(&self, name: &str) -> TableRef {
        let prefix = self
            .connections
            .read()
            .get(&self.default)
            .map(|c| c.prefix.clone())
            .unwrap_or_default();
        TableRef {
            connection: self.default.clone(),
            table: format!("{}{}", prefix, name),
            columns: Vec::new(),
            wheres: Vec::new(),
        }
    }
}

/// A `SELECT` against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    connection: String,
    table: String,
    columns: Vec<String>,
    wheres: Vec<String>,
}

impl TableRef {
    pub fn connection(&self) -> &str {
        &self.connection
    }

    /// Table name including the connection prefix.
    pub fn name(&self) -> &str {
        &self.table
    }

    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add an equality condition on a positional placeholder.
    pub fn where_eq(mut self, column: impl Into<String>) -> Self {
        self.wheres.push(format!("{} = ?", column.into()));
        self
    }

    pub fn to_sql(&self) -> String {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };
        let mut sql = format!("SELECT {} FROM {}", columns, self.table);
        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.wheres.join(" AND "));
        }
        sql
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
