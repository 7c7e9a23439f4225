use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::EntityKind;
use crate::model::{Id, PageDataArchitectureState};

/// A broken structural rule found in a state tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntegrityViolation {
    /// Two siblings share an id. `scope` is the owning endpoint or processor.
    DuplicateId {
        entity: EntityKind,
        id: Id,
        scope: Option<Id>,
    },
    DanglingProcessorLink {
        endpoint_id: Id,
        subgraph_id: Id,
        processor_id: Id,
    },
    RepeatedProcessorLink {
        endpoint_id: Id,
        subgraph_id: Id,
        processor_id: Id,
    },
}

impl IntegrityViolation {
    pub fn error_code(&self) -> &'static str {
        match self {
            IntegrityViolation::DuplicateId { .. } => "duplicate_id",
            IntegrityViolation::DanglingProcessorLink { .. } => "dangling_processor_link",
            IntegrityViolation::RepeatedProcessorLink { .. } => "repeated_processor_link",
        }
    }
}

impl std::fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityViolation::DuplicateId { entity, id, scope } => match scope {
                Some(scope) => write!(f, "{} ID {} is used more than once in {}", entity, id, scope),
                None => write!(f, "{} ID {} is used more than once", entity, id),
            },
            IntegrityViolation::DanglingProcessorLink {
                endpoint_id,
                subgraph_id,
                processor_id,
            } => write!(
                f,
                "Subgraph {} in endpoint {} links missing processor {}",
                subgraph_id, endpoint_id, processor_id
            ),
            IntegrityViolation::RepeatedProcessorLink {
                endpoint_id,
                subgraph_id,
                processor_id,
            } => write!(
                f,
                "Subgraph {} in endpoint {} links processor {} more than once",
                subgraph_id, endpoint_id, processor_id
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("state integrity check failed: {first} ({count} violation(s))")]
pub struct IntegrityError {
    pub first: IntegrityViolation,
    pub count: usize,
    pub violations: Vec<IntegrityViolation>,
}

/// Every id-uniqueness and link rule broken by `state`, outermost scope first.
pub fn integrity_violations(state: &PageDataArchitectureState) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    for id in state.endpoints.iter().map(|endpoint| &endpoint.id).duplicates() {
        violations.push(IntegrityViolation::DuplicateId {
            entity: EntityKind::Endpoint,
            id: id.clone(),
            scope: None,
        });
    }

    for endpoint in &state.endpoints {
        let scope = Some(endpoint.id.clone());
        for id in endpoint.subgraphs.iter().map(|subgraph| &subgraph.id).duplicates() {
            violations.push(IntegrityViolation::DuplicateId {
                entity: EntityKind::Subgraph,
                id: id.clone(),
                scope: scope.clone(),
            });
        }
        for id in endpoint.processors.iter().map(|processor| &processor.id).duplicates() {
            violations.push(IntegrityViolation::DuplicateId {
                entity: EntityKind::Processor,
                id: id.clone(),
                scope: scope.clone(),
            });
        }
        for processor in &endpoint.processors {
            for id in processor.columns.iter().map(|column| &column.id).duplicates() {
                violations.push(IntegrityViolation::DuplicateId {
                    entity: EntityKind::Column,
                    id: id.clone(),
                    scope: Some(processor.id.clone()),
                });
            }
        }

        for subgraph in &endpoint.subgraphs {
            for processor_id in subgraph.processor_ids.iter().unique() {
                if !endpoint.has_processor(processor_id) {
                    violations.push(IntegrityViolation::DanglingProcessorLink {
                        endpoint_id: endpoint.id.clone(),
                        subgraph_id: subgraph.id.clone(),
                        processor_id: processor_id.clone(),
                    });
                }
            }
            for processor_id in subgraph.processor_ids.iter().duplicates() {
                violations.push(IntegrityViolation::RepeatedProcessorLink {
                    endpoint_id: endpoint.id.clone(),
                    subgraph_id: subgraph.id.clone(),
                    processor_id: processor_id.clone(),
                });
            }
        }
    }

    violations
}

pub fn ensure_integrity(state: &PageDataArchitectureState) -> Result<(), IntegrityError> {
    let violations = integrity_violations(state);
    match violations.first() {
        None => Ok(()),
        Some(first) => Err(IntegrityError {
            first: first.clone(),
            count: violations.len(),
            violations,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Endpoint, PostgresColumn, Processor, Subgraph};

    fn endpoint(id: &str) -> Endpoint {
        Endpoint {
            id: id.to_string(),
            title: id.to_string(),
            url_path: format!("/{}", id),
            description: None,
            comments: None,
            subgraphs: Vec::new(),
            processors: Vec::new(),
        }
    }

    fn processor(id: &str) -> Processor {
        Processor {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            table_name: id.to_string(),
            columns: Vec::new(),
        }
    }

    fn subgraph(id: &str, processor_ids: &[&str]) -> Subgraph {
        Subgraph {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            graphql_schema: String::new(),
            graphql_query: String::new(),
            processor_ids: processor_ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    fn column(id: &str) -> PostgresColumn {
        PostgresColumn {
            id: id.to_string(),
            name: id.to_string(),
            data_type: "text".to_string(),
            is_primary_key: false,
            is_nullable: true,
            default_value: None,
            references: None,
        }
    }

    #[test]
    fn test_clean_state_has_no_violations() {
        let mut home = endpoint("e1");
        home.processors.push(processor("p1"));
        home.subgraphs.push(subgraph("sg1", &["p1"]));
        let state = PageDataArchitectureState {
            endpoints: vec![home, endpoint("e2")],
        };

        assert!(integrity_violations(&state).is_empty());
        assert!(ensure_integrity(&state).is_ok());
    }

    #[test]
    fn test_detects_duplicates_at_every_level() {
        let mut home = endpoint("e1");
        let mut users = processor("p1");
        users.columns = vec![column("c1"), column("c1")];
        home.processors = vec![users, processor("p1")];
        home.subgraphs = vec![subgraph("sg1", &[]), subgraph("sg1", &[])];
        let state = PageDataArchitectureState {
            endpoints: vec![home, endpoint("e1")],
        };

        let entities: Vec<EntityKind> = integrity_violations(&state)
            .into_iter()
            .filter_map(|violation| match violation {
                IntegrityViolation::DuplicateId { entity, .. } => Some(entity),
                _ => None,
            })
            .collect();

        assert_eq!(
            entities,
            vec![
                EntityKind::Endpoint,
                EntityKind::Subgraph,
                EntityKind::Processor,
                EntityKind::Column,
            ]
        );
    }

    #[test]
    fn test_detects_dangling_and_repeated_links() {
        let mut home = endpoint("e1");
        home.processors.push(processor("p1"));
        home.subgraphs.push(subgraph("sg1", &["p1", "p1", "ghost"]));
        let state = PageDataArchitectureState {
            endpoints: vec![home],
        };

        let err = ensure_integrity(&state).unwrap_err();
        assert_eq!(err.count, 2);
        assert_eq!(
            err.first,
            IntegrityViolation::DanglingProcessorLink {
                endpoint_id: "e1".to_string(),
                subgraph_id: "sg1".to_string(),
                processor_id: "ghost".to_string(),
            }
        );
        assert_eq!(err.violations[1].error_code(), "repeated_processor_link");
    }
}
