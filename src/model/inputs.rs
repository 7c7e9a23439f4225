//! Operation payloads. Optional fields of add inputs are plain `Option`s;
//! every optional field of an update input is a [`Patch`].

use serde::{Deserialize, Serialize};

use crate::model::{Id, Patch};

// Endpoint module

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEndpointInput {
    pub id: Id,
    pub title: String,
    pub url_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEndpointInput {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub url_path: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub comments: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEndpointInput {
    pub id: Id,
}

// Subgraph module

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSubgraphInput {
    pub endpoint_id: Id,
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub graphql_schema: String,
    pub graphql_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubgraphInput {
    pub endpoint_id: Id,
    pub id: Id,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub graphql_schema: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub graphql_query: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubgraphInput {
    pub endpoint_id: Id,
    pub id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSubgraphToProcessorInput {
    pub endpoint_id: Id,
    pub subgraph_id: Id,
    pub processor_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlinkSubgraphFromProcessorInput {
    pub endpoint_id: Id,
    pub subgraph_id: Id,
    pub processor_id: Id,
}

// Processor module

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProcessorInput {
    pub endpoint_id: Id,
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcessorInput {
    pub endpoint_id: Id,
    pub id: Id,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub table_name: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProcessorInput {
    pub endpoint_id: Id,
    pub id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddColumnInput {
    pub endpoint_id: Id,
    pub processor_id: Id,
    pub id: Id,
    pub name: String,
    pub data_type: String,
    pub is_primary_key: bool,
    pub is_nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumnInput {
    pub endpoint_id: Id,
    pub processor_id: Id,
    pub id: Id,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub data_type: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub is_primary_key: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub is_nullable: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub default_value: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub references: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteColumnInput {
    pub endpoint_id: Id,
    pub processor_id: Id,
    pub id: Id,
}

impl UpdateEndpointInput {
    /// An update that changes nothing until fields are set
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            title: Patch::Absent,
            url_path: Patch::Absent,
            description: Patch::Absent,
            comments: Patch::Absent,
        }
    }
}

impl UpdateSubgraphInput {
    pub fn new(endpoint_id: impl Into<Id>, id: impl Into<Id>) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            id: id.into(),
            name: Patch::Absent,
            description: Patch::Absent,
            graphql_schema: Patch::Absent,
            graphql_query: Patch::Absent,
        }
    }
}

impl UpdateProcessorInput {
    pub fn new(endpoint_id: impl Into<Id>, id: impl Into<Id>) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            id: id.into(),
            name: Patch::Absent,
            description: Patch::Absent,
            table_name: Patch::Absent,
        }
    }
}

impl UpdateColumnInput {
    pub fn new(
        endpoint_id: impl Into<Id>,
        processor_id: impl Into<Id>,
        id: impl Into<Id>,
    ) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            processor_id: processor_id.into(),
            id: id.into(),
            name: Patch::Absent,
            data_type: Patch::Absent,
            is_primary_key: Patch::Absent,
            is_nullable: Patch::Absent,
            default_value: Patch::Absent,
            references: Patch::Absent,
        }
    }
}
