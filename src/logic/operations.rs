use thiserror::Error;

use crate::error::ReducerError;
use crate::logic::reducer::reduce;
use crate::model::{Action, Operation, PageDataArchitectureDocument, PageDataArchitectureState};

/// Why a document's operation log could not be replayed
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("operation {index} ({operation}) was rejected on replay: {source}")]
    Rejected {
        index: u64,
        operation: &'static str,
        #[source]
        source: ReducerError,
    },

    #[error("operation {index} produced hash {actual}, log recorded {expected}")]
    HashMismatch {
        index: u64,
        expected: String,
        actual: String,
    },

    #[error("replayed state differs from the stored state")]
    StateMismatch,

    #[error("could not hash state: {0}")]
    Hash(#[from] anyhow::Error),
}

impl PageDataArchitectureDocument {
    /// Apply an action and record it in the operation log.
    ///
    /// A rejected action is not logged and leaves the document unchanged.
    pub fn dispatch(&mut self, action: Action) -> Result<&Operation, ReducerError> {
        if let Err(e) = reduce(&mut self.state, &action) {
            log::warn!(
                "document {}: rejected {}: {} ({})",
                self.header.id,
                action.operation_name(),
                e,
                e.error_code()
            );
            return Err(e);
        }

        let hash = Self::state_hash(&self.state).unwrap_or_default();
        Ok(self.record(action, hash))
    }

    /// Apply a batch of actions. Either all are applied and logged or none.
    pub fn dispatch_all(&mut self, actions: Vec<Action>) -> Result<Vec<Operation>, ReducerError> {
        let mut next = self.state.clone();
        let mut hashes = Vec::with_capacity(actions.len());
        for action in &actions {
            if let Err(e) = reduce(&mut next, action) {
                log::warn!(
                    "document {}: rejected batch of {} at {}: {}",
                    self.header.id,
                    actions.len(),
                    action.operation_name(),
                    e
                );
                return Err(e);
            }
            hashes.push(Self::state_hash(&next).unwrap_or_default());
        }

        self.state = next;
        Ok(actions
            .into_iter()
            .zip(hashes)
            .map(|(action, hash)| self.record(action, hash).clone())
            .collect())
    }

    fn record(&mut self, action: Action, hash: String) -> &Operation {
        let now = chrono::Utc::now().to_rfc3339();
        let index = self.operations.len() as u64;
        log::debug!(
            "document {}: operation {} {}",
            self.header.id,
            index,
            action.operation_name()
        );

        self.operations.push(Operation {
            index,
            timestamp_utc_iso: now.clone(),
            action,
            hash,
        });
        self.header.revision = self.operations.len() as u64;
        self.header.last_modified_at_utc_iso = now;
        &self.operations[self.operations.len() - 1]
    }

    /// Rebuild the state from the initial state by re-running the operation log,
    /// checking every recorded hash along the way.
    pub fn replay(&self) -> Result<PageDataArchitectureState, ReplayError> {
        let mut state = self.initial_state.clone();
        for operation in &self.operations {
            reduce(&mut state, &operation.action).map_err(|source| ReplayError::Rejected {
                index: operation.index,
                operation: operation.action.operation_name(),
                source,
            })?;

            let actual = Self::state_hash(&state)?;
            if actual != operation.hash {
                return Err(ReplayError::HashMismatch {
                    index: operation.index,
                    expected: operation.hash.clone(),
                    actual,
                });
            }
        }
        Ok(state)
    }

    /// Replay the log and confirm it reproduces the stored state
    pub fn verify(&self) -> Result<(), ReplayError> {
        if self.replay()? != self.state {
            return Err(ReplayError::StateMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AddEndpointInput, AddProcessorInput, AddSubgraphInput, LinkSubgraphToProcessorInput,
        Patch, UpdateEndpointInput,
    };

    fn add_endpoint(id: &str) -> Action {
        Action::add_endpoint(AddEndpointInput {
            id: id.to_string(),
            title: "Home".to_string(),
            url_path: "/home".to_string(),
            description: None,
            comments: None,
        })
    }

    fn build_actions() -> Vec<Action> {
        vec![
            add_endpoint("e1"),
            Action::add_processor(AddProcessorInput {
                endpoint_id: "e1".to_string(),
                id: "p1".to_string(),
                name: "Users".to_string(),
                description: None,
                table_name: "users".to_string(),
            }),
            Action::add_subgraph(AddSubgraphInput {
                endpoint_id: "e1".to_string(),
                id: "sg1".to_string(),
                name: "Users".to_string(),
                description: None,
                graphql_schema: "type Query { users: [User] }".to_string(),
                graphql_query: "{ users { id } }".to_string(),
            }),
            Action::link_subgraph_to_processor(LinkSubgraphToProcessorInput {
                endpoint_id: "e1".to_string(),
                subgraph_id: "sg1".to_string(),
                processor_id: "p1".to_string(),
            }),
        ]
    }

    #[test]
    fn test_dispatch_records_operations() {
        let mut document = PageDataArchitectureDocument::new("Site");
        for action in build_actions() {
            document.dispatch(action).unwrap();
        }

        assert_eq!(document.header.revision, 4);
        assert_eq!(document.operations.len(), 4);
        assert_eq!(document.operations[0].index, 0);
        assert_eq!(document.operations[3].action.operation_name(), "LINK_SUBGRAPH_TO_PROCESSOR");
        assert_eq!(
            document.operations[3].hash,
            PageDataArchitectureDocument::state_hash(&document.state).unwrap()
        );
    }

    #[test]
    fn test_rejected_dispatch_is_not_logged() {
        let mut document = PageDataArchitectureDocument::new("Site");
        document.dispatch(add_endpoint("e1")).unwrap();
        let before = document.clone();

        let mut update = UpdateEndpointInput::new("e2");
        update.title = Patch::Value("Missing".to_string());
        let err = document.dispatch(Action::update_endpoint(update)).unwrap_err();

        assert_eq!(err, ReducerError::endpoint_not_found("e2"));
        assert_eq!(document, before);
    }

    #[test]
    fn test_dispatch_all_is_atomic() {
        let mut document = PageDataArchitectureDocument::new("Site");
        let mut actions = build_actions();
        actions.push(add_endpoint("e1"));

        assert!(document.dispatch_all(actions).is_err());
        assert!(document.operations.is_empty());
        assert!(document.state.endpoints.is_empty());

        let operations = document.dispatch_all(build_actions()).unwrap();
        assert_eq!(operations.len(), 4);
        assert_eq!(operations[3].index, 3);
        assert_eq!(document.header.revision, 4);
    }

    #[test]
    fn test_replay_reproduces_state() {
        let mut document = PageDataArchitectureDocument::new("Site");
        document.dispatch_all(build_actions()).unwrap();

        assert_eq!(document.replay().unwrap(), document.state);
        assert!(document.verify().is_ok());
    }

    #[test]
    fn test_replay_detects_tampered_log() {
        let mut document = PageDataArchitectureDocument::new("Site");
        document.dispatch_all(build_actions()).unwrap();
        document.operations[1].hash = "0".repeat(64);

        match document.replay() {
            Err(ReplayError::HashMismatch { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected hash mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_replay_detects_edited_state() {
        let mut document = PageDataArchitectureDocument::new("Site");
        document.dispatch_all(build_actions()).unwrap();
        document.state.endpoints.clear();

        assert!(matches!(document.verify(), Err(ReplayError::StateMismatch)));
    }
}
