use serde::{Deserialize, Serialize};

use crate::model::{
    AddColumnInput, AddEndpointInput, AddProcessorInput, AddSubgraphInput, DeleteColumnInput,
    DeleteEndpointInput, DeleteProcessorInput, DeleteSubgraphInput, LinkSubgraphToProcessorInput,
    UnlinkSubgraphFromProcessorInput, UpdateColumnInput, UpdateEndpointInput,
    UpdateProcessorInput, UpdateSubgraphInput,
};

/// One operation against a page data architecture document.
///
/// Serialized as `{"type": "ADD_ENDPOINT", "input": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "input", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AddEndpoint(AddEndpointInput),
    UpdateEndpoint(UpdateEndpointInput),
    DeleteEndpoint(DeleteEndpointInput),
    AddSubgraph(AddSubgraphInput),
    UpdateSubgraph(UpdateSubgraphInput),
    DeleteSubgraph(DeleteSubgraphInput),
    LinkSubgraphToProcessor(LinkSubgraphToProcessorInput),
    UnlinkSubgraphFromProcessor(UnlinkSubgraphFromProcessorInput),
    AddProcessor(AddProcessorInput),
    UpdateProcessor(UpdateProcessorInput),
    DeleteProcessor(DeleteProcessorInput),
    AddColumn(AddColumnInput),
    UpdateColumn(UpdateColumnInput),
    DeleteColumn(DeleteColumnInput),
}

/// Operation module an action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationModule {
    Endpoint,
    Subgraph,
    Processor,
}

impl Action {
    pub fn add_endpoint(input: AddEndpointInput) -> Self {
        Action::AddEndpoint(input)
    }

    pub fn update_endpoint(input: UpdateEndpointInput) -> Self {
        Action::UpdateEndpoint(input)
    }

    pub fn delete_endpoint(input: DeleteEndpointInput) -> Self {
        Action::DeleteEndpoint(input)
    }

    pub fn add_subgraph(input: AddSubgraphInput) -> Self {
        Action::AddSubgraph(input)
    }

    pub fn update_subgraph(input: UpdateSubgraphInput) -> Self {
        Action::UpdateSubgraph(input)
    }

    pub fn delete_subgraph(input: DeleteSubgraphInput) -> Self {
        Action::DeleteSubgraph(input)
    }

    pub fn link_subgraph_to_processor(input: LinkSubgraphToProcessorInput) -> Self {
        Action::LinkSubgraphToProcessor(input)
    }

    pub fn unlink_subgraph_from_processor(input: UnlinkSubgraphFromProcessorInput) -> Self {
        Action::UnlinkSubgraphFromProcessor(input)
    }

    pub fn add_processor(input: AddProcessorInput) -> Self {
        Action::AddProcessor(input)
    }

    pub fn update_processor(input: UpdateProcessorInput) -> Self {
        Action::UpdateProcessor(input)
    }

    pub fn delete_processor(input: DeleteProcessorInput) -> Self {
        Action::DeleteProcessor(input)
    }

    pub fn add_column(input: AddColumnInput) -> Self {
        Action::AddColumn(input)
    }

    pub fn update_column(input: UpdateColumnInput) -> Self {
        Action::UpdateColumn(input)
    }

    pub fn delete_column(input: DeleteColumnInput) -> Self {
        Action::DeleteColumn(input)
    }

    /// Wire name of the operation, e.g. `LINK_SUBGRAPH_TO_PROCESSOR`
    pub fn operation_name(&self) -> &'static str {
        match self {
            Action::AddEndpoint(_) => "ADD_ENDPOINT",
            Action::UpdateEndpoint(_) => "UPDATE_ENDPOINT",
            Action::DeleteEndpoint(_) => "DELETE_ENDPOINT",
            Action::AddSubgraph(_) => "ADD_SUBGRAPH",
            Action::UpdateSubgraph(_) => "UPDATE_SUBGRAPH",
            Action::DeleteSubgraph(_) => "DELETE_SUBGRAPH",
            Action::LinkSubgraphToProcessor(_) => "LINK_SUBGRAPH_TO_PROCESSOR",
            Action::UnlinkSubgraphFromProcessor(_) => "UNLINK_SUBGRAPH_FROM_PROCESSOR",
            Action::AddProcessor(_) => "ADD_PROCESSOR",
            Action::UpdateProcessor(_) => "UPDATE_PROCESSOR",
            Action::DeleteProcessor(_) => "DELETE_PROCESSOR",
            Action::AddColumn(_) => "ADD_COLUMN",
            Action::UpdateColumn(_) => "UPDATE_COLUMN",
            Action::DeleteColumn(_) => "DELETE_COLUMN",
        }
    }

    pub fn module(&self) -> OperationModule {
        match self {
            Action::AddEndpoint(_) | Action::UpdateEndpoint(_) | Action::DeleteEndpoint(_) => {
                OperationModule::Endpoint
            }
            Action::AddSubgraph(_)
            | Action::UpdateSubgraph(_)
            | Action::DeleteSubgraph(_)
            | Action::LinkSubgraphToProcessor(_)
            | Action::UnlinkSubgraphFromProcessor(_) => OperationModule::Subgraph,
            Action::AddProcessor(_)
            | Action::UpdateProcessor(_)
            | Action::DeleteProcessor(_)
            | Action::AddColumn(_)
            | Action::UpdateColumn(_)
            | Action::DeleteColumn(_) => OperationModule::Processor,
        }
    }

    /// Endpoint the action targets
    pub fn endpoint_id(&self) -> &str {
        match self {
            Action::AddEndpoint(input) => &input.id,
            Action::UpdateEndpoint(input) => &input.id,
            Action::DeleteEndpoint(input) => &input.id,
            Action::AddSubgraph(input) => &input.endpoint_id,
            Action::UpdateSubgraph(input) => &input.endpoint_id,
            Action::DeleteSubgraph(input) => &input.endpoint_id,
            Action::LinkSubgraphToProcessor(input) => &input.endpoint_id,
            Action::UnlinkSubgraphFromProcessor(input) => &input.endpoint_id,
            Action::AddProcessor(input) => &input.endpoint_id,
            Action::UpdateProcessor(input) => &input.endpoint_id,
            Action::DeleteProcessor(input) => &input.endpoint_id,
            Action::AddColumn(input) => &input.endpoint_id,
            Action::UpdateColumn(input) => &input.endpoint_id,
            Action::DeleteColumn(input) => &input.endpoint_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Patch;
    use serde_json::json;

    #[test]
    fn test_action_wire_format() {
        let action = Action::link_subgraph_to_processor(LinkSubgraphToProcessorInput {
            endpoint_id: "e1".to_string(),
            subgraph_id: "sg1".to_string(),
            processor_id: "p1".to_string(),
        });

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "LINK_SUBGRAPH_TO_PROCESSOR",
                "input": {"endpointId": "e1", "subgraphId": "sg1", "processorId": "p1"}
            })
        );
        assert_eq!(value["type"], action.operation_name());
        assert_eq!(action.module(), OperationModule::Subgraph);
    }

    #[test]
    fn test_update_column_parses_explicit_false_and_null() {
        let action: Action = serde_json::from_value(json!({
            "type": "UPDATE_COLUMN",
            "input": {
                "endpointId": "e1",
                "processorId": "p1",
                "id": "c1",
                "isPrimaryKey": false,
                "defaultValue": null
            }
        }))
        .unwrap();

        match action {
            Action::UpdateColumn(input) => {
                assert_eq!(input.is_primary_key, Patch::Value(false));
                assert_eq!(input.is_nullable, Patch::Absent);
                assert_eq!(input.default_value, Patch::Null);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        let result = serde_json::from_value::<Action>(json!({
            "type": "RENAME_EVERYTHING",
            "input": {}
        }));
        assert!(result.is_err());
    }
}
