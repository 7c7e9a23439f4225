use crate::error::{EntityKind, ReducerError, ReducerResult};
use crate::model::{
    non_empty, AddColumnInput, AddProcessorInput, DeleteColumnInput, DeleteProcessorInput,
    Endpoint, PageDataArchitectureState, PostgresColumn, Processor, UpdateColumnInput,
    UpdateProcessorInput,
};

fn find_endpoint<'a>(
    state: &'a mut PageDataArchitectureState,
    endpoint_id: &str,
) -> ReducerResult<&'a mut Endpoint> {
    state
        .endpoint_mut(endpoint_id)
        .ok_or_else(|| ReducerError::endpoint_not_found(endpoint_id))
}

fn find_processor<'a>(
    state: &'a mut PageDataArchitectureState,
    endpoint_id: &str,
    processor_id: &str,
) -> ReducerResult<&'a mut Processor> {
    find_endpoint(state, endpoint_id)?
        .processor_mut(processor_id)
        .ok_or_else(|| ReducerError::processor_not_found(processor_id))
}

pub fn add_processor(
    state: &mut PageDataArchitectureState,
    input: &AddProcessorInput,
) -> ReducerResult<()> {
    let endpoint = find_endpoint(state, &input.endpoint_id)?;
    if endpoint.processor(&input.id).is_some() {
        return Err(ReducerError::duplicate_id(EntityKind::Processor, &input.id));
    }

    endpoint.processors.push(Processor {
        id: input.id.clone(),
        name: input.name.clone(),
        description: non_empty(&input.description),
        table_name: input.table_name.clone(),
        columns: Vec::new(),
    });
    Ok(())
}

pub fn update_processor(
    state: &mut PageDataArchitectureState,
    input: &UpdateProcessorInput,
) -> ReducerResult<()> {
    let processor = find_processor(state, &input.endpoint_id, &input.id)?;

    input.name.apply_non_empty(&mut processor.name);
    input.description.apply_nullable(&mut processor.description);
    input.table_name.apply_non_empty(&mut processor.table_name);
    Ok(())
}

/// Removes the processor and drops its id from every subgraph of the same endpoint.
pub fn delete_processor(
    state: &mut PageDataArchitectureState,
    input: &DeleteProcessorInput,
) -> ReducerResult<()> {
    let endpoint = find_endpoint(state, &input.endpoint_id)?;
    let index = endpoint
        .processor_position(&input.id)
        .ok_or_else(|| ReducerError::processor_not_found(&input.id))?;

    endpoint.processors.remove(index);
    for subgraph in endpoint.subgraphs.iter_mut() {
        subgraph
            .processor_ids
            .retain(|processor_id| processor_id != &input.id);
    }
    Ok(())
}

pub fn add_column(
    state: &mut PageDataArchitectureState,
    input: &AddColumnInput,
) -> ReducerResult<()> {
    let processor = find_processor(state, &input.endpoint_id, &input.processor_id)?;
    if processor.column(&input.id).is_some() {
        return Err(ReducerError::duplicate_id(EntityKind::Column, &input.id));
    }

    processor.columns.push(PostgresColumn {
        id: input.id.clone(),
        name: input.name.clone(),
        data_type: input.data_type.clone(),
        is_primary_key: input.is_primary_key,
        is_nullable: input.is_nullable,
        default_value: non_empty(&input.default_value),
        references: non_empty(&input.references),
    });
    Ok(())
}

pub fn update_column(
    state: &mut PageDataArchitectureState,
    input: &UpdateColumnInput,
) -> ReducerResult<()> {
    let column = find_processor(state, &input.endpoint_id, &input.processor_id)?
        .column_mut(&input.id)
        .ok_or_else(|| ReducerError::column_not_found(&input.id))?;

    input.name.apply_non_empty(&mut column.name);
    input.data_type.apply_non_empty(&mut column.data_type);
    // explicit false overwrites
    input.is_primary_key.apply_to(&mut column.is_primary_key);
    input.is_nullable.apply_to(&mut column.is_nullable);
    input.default_value.apply_nullable(&mut column.default_value);
    input.references.apply_nullable(&mut column.references);
    Ok(())
}

pub fn delete_column(
    state: &mut PageDataArchitectureState,
    input: &DeleteColumnInput,
) -> ReducerResult<()> {
    let processor = find_processor(state, &input.endpoint_id, &input.processor_id)?;
    let index = processor
        .column_position(&input.id)
        .ok_or_else(|| ReducerError::column_not_found(&input.id))?;

    processor.columns.remove(index);
    Ok(())
}
