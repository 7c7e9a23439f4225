use serde::{Deserialize, Serialize};

use crate::model::Id;

/// The whole persisted state: every endpoint of the page data architecture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDataArchitectureState {
    pub endpoints: Vec<Endpoint>,
}

/// A URL-addressable page definition owning its subgraphs and processors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub id: Id,
    pub title: String,
    /// URL path of the page, e.g. "/home"
    pub url_path: String,
    pub description: Option<String>,
    /// Free-form reviewer notes
    #[serde(default)]
    pub comments: Option<String>,
    pub subgraphs: Vec<Subgraph>,
    pub processors: Vec<Processor>,
}

/// A GraphQL schema and query pair serving part of an endpoint's data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subgraph {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub graphql_schema: String,
    pub graphql_query: String,
    /// Processors this subgraph reads from, in link order
    pub processor_ids: Vec<Id>,
}

/// A PostgreSQL table definition backing one or more subgraphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Processor {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub table_name: String,
    pub columns: Vec<PostgresColumn>,
}

/// A single column of a processor table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresColumn {
    pub id: Id,
    pub name: String,
    /// SQL type name, kept verbatim (e.g. "uuid", "varchar(255)")
    pub data_type: String,
    pub is_primary_key: bool,
    pub is_nullable: bool,
    pub default_value: Option<String>,
    /// Foreign key target in "table.column" form
    pub references: Option<String>,
}

impl PageDataArchitectureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.id == id)
    }

    pub fn endpoint_mut(&mut self, id: &str) -> Option<&mut Endpoint> {
        self.endpoints.iter_mut().find(|endpoint| endpoint.id == id)
    }

    pub fn endpoint_position(&self, id: &str) -> Option<usize> {
        self.endpoints.iter().position(|endpoint| endpoint.id == id)
    }
}

impl Endpoint {
    pub fn subgraph(&self, id: &str) -> Option<&Subgraph> {
        self.subgraphs.iter().find(|subgraph| subgraph.id == id)
    }

    pub fn subgraph_mut(&mut self, id: &str) -> Option<&mut Subgraph> {
        self.subgraphs.iter_mut().find(|subgraph| subgraph.id == id)
    }

    pub fn subgraph_position(&self, id: &str) -> Option<usize> {
        self.subgraphs.iter().position(|subgraph| subgraph.id == id)
    }

    pub fn processor(&self, id: &str) -> Option<&Processor> {
        self.processors.iter().find(|processor| processor.id == id)
    }

    pub fn processor_mut(&mut self, id: &str) -> Option<&mut Processor> {
        self.processors.iter_mut().find(|processor| processor.id == id)
    }

    pub fn processor_position(&self, id: &str) -> Option<usize> {
        self.processors.iter().position(|processor| processor.id == id)
    }

    pub fn has_processor(&self, id: &str) -> bool {
        self.processor_position(id).is_some()
    }
}

impl Subgraph {
    pub fn is_linked_to(&self, processor_id: &str) -> bool {
        self.processor_ids.iter().any(|id| id == processor_id)
    }
}

impl Processor {
    pub fn column(&self, id: &str) -> Option<&PostgresColumn> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn column_mut(&mut self, id: &str) -> Option<&mut PostgresColumn> {
        self.columns.iter_mut().find(|column| column.id == id)
    }

    pub fn column_position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.id == id)
    }
}
