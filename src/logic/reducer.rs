use crate::error::ReducerResult;
use crate::logic::{endpoint, processor, subgraph};
use crate::model::{Action, PageDataArchitectureState};

/// Apply one action to the state in place.
///
/// Each handler resolves every id it needs before touching the tree, so an
/// `Err` always leaves `state` exactly as it was.
pub fn reduce(state: &mut PageDataArchitectureState, action: &Action) -> ReducerResult<()> {
    log::debug!(
        "applying {} ({:?} module) to endpoint {}",
        action.operation_name(),
        action.module(),
        action.endpoint_id()
    );

    match action {
        Action::AddEndpoint(input) => endpoint::add_endpoint(state, input),
        Action::UpdateEndpoint(input) => endpoint::update_endpoint(state, input),
        Action::DeleteEndpoint(input) => endpoint::delete_endpoint(state, input),
        Action::AddSubgraph(input) => subgraph::add_subgraph(state, input),
        Action::UpdateSubgraph(input) => subgraph::update_subgraph(state, input),
        Action::DeleteSubgraph(input) => subgraph::delete_subgraph(state, input),
        Action::LinkSubgraphToProcessor(input) => {
            subgraph::link_subgraph_to_processor(state, input)
        }
        Action::UnlinkSubgraphFromProcessor(input) => {
            subgraph::unlink_subgraph_from_processor(state, input)
        }
        Action::AddProcessor(input) => processor::add_processor(state, input),
        Action::UpdateProcessor(input) => processor::update_processor(state, input),
        Action::DeleteProcessor(input) => processor::delete_processor(state, input),
        Action::AddColumn(input) => processor::add_column(state, input),
        Action::UpdateColumn(input) => processor::update_column(state, input),
        Action::DeleteColumn(input) => processor::delete_column(state, input),
    }
}
