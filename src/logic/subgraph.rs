use crate::error::{EntityKind, ReducerError, ReducerResult};
use crate::model::{
    non_empty, AddSubgraphInput, DeleteSubgraphInput, LinkSubgraphToProcessorInput,
    PageDataArchitectureState, Subgraph, UnlinkSubgraphFromProcessorInput, UpdateSubgraphInput,
};

pub fn add_subgraph(
    state: &mut PageDataArchitectureState,
    input: &AddSubgraphInput,
) -> ReducerResult<()> {
    let endpoint = state
        .endpoint_mut(&input.endpoint_id)
        .ok_or_else(|| ReducerError::endpoint_not_found(&input.endpoint_id))?;
    if endpoint.subgraph(&input.id).is_some() {
        return Err(ReducerError::duplicate_id(EntityKind::Subgraph, &input.id));
    }

    endpoint.subgraphs.push(Subgraph {
        id: input.id.clone(),
        name: input.name.clone(),
        description: non_empty(&input.description),
        graphql_schema: input.graphql_schema.clone(),
        graphql_query: input.graphql_query.clone(),
        processor_ids: Vec::new(),
    });
    Ok(())
}

pub fn update_subgraph(
    state: &mut PageDataArchitectureState,
    input: &UpdateSubgraphInput,
) -> ReducerResult<()> {
    let endpoint = state
        .endpoint_mut(&input.endpoint_id)
        .ok_or_else(|| ReducerError::endpoint_not_found(&input.endpoint_id))?;
    let subgraph = endpoint
        .subgraph_mut(&input.id)
        .ok_or_else(|| ReducerError::subgraph_not_found(&input.id))?;

    input.name.apply_non_empty(&mut subgraph.name);
    input.description.apply_nullable(&mut subgraph.description);
    input.graphql_schema.apply_non_empty(&mut subgraph.graphql_schema);
    input.graphql_query.apply_non_empty(&mut subgraph.graphql_query);
    Ok(())
}

/// Removes the subgraph and its links. Processors are left untouched.
pub fn delete_subgraph(
    state: &mut PageDataArchitectureState,
    input: &DeleteSubgraphInput,
) -> ReducerResult<()> {
    let endpoint = state
        .endpoint_mut(&input.endpoint_id)
        .ok_or_else(|| ReducerError::endpoint_not_found(&input.endpoint_id))?;
    let index = endpoint
        .subgraph_position(&input.id)
        .ok_or_else(|| ReducerError::subgraph_not_found(&input.id))?;

    endpoint.subgraphs.remove(index);
    Ok(())
}

/// Links are a set: linking an already linked processor is a no-op.
pub fn link_subgraph_to_processor(
    state: &mut PageDataArchitectureState,
    input: &LinkSubgraphToProcessorInput,
) -> ReducerResult<()> {
    let endpoint = state
        .endpoint_mut(&input.endpoint_id)
        .ok_or_else(|| ReducerError::endpoint_not_found(&input.endpoint_id))?;
    let has_processor = endpoint.has_processor(&input.processor_id);
    let subgraph = endpoint
        .subgraph_mut(&input.subgraph_id)
        .ok_or_else(|| ReducerError::subgraph_not_found(&input.subgraph_id))?;
    if !has_processor {
        return Err(ReducerError::processor_not_found(&input.processor_id));
    }

    if !subgraph.is_linked_to(&input.processor_id) {
        subgraph.processor_ids.push(input.processor_id.clone());
    }
    Ok(())
}

/// Removing a link that does not exist is a no-op. The processor itself is
/// not required to exist.
pub fn unlink_subgraph_from_processor(
    state: &mut PageDataArchitectureState,
    input: &UnlinkSubgraphFromProcessorInput,
) -> ReducerResult<()> {
    let endpoint = state
        .endpoint_mut(&input.endpoint_id)
        .ok_or_else(|| ReducerError::endpoint_not_found(&input.endpoint_id))?;
    let subgraph = endpoint
        .subgraph_mut(&input.subgraph_id)
        .ok_or_else(|| ReducerError::subgraph_not_found(&input.subgraph_id))?;

    subgraph
        .processor_ids
        .retain(|processor_id| processor_id != &input.processor_id);
    Ok(())
}
