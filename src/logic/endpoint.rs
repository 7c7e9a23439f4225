use crate::error::{EntityKind, ReducerError, ReducerResult};
use crate::model::{
    non_empty, AddEndpointInput, DeleteEndpointInput, Endpoint, PageDataArchitectureState,
    UpdateEndpointInput,
};

pub fn add_endpoint(
    state: &mut PageDataArchitectureState,
    input: &AddEndpointInput,
) -> ReducerResult<()> {
    if state.endpoint(&input.id).is_some() {
        return Err(ReducerError::duplicate_id(EntityKind::Endpoint, &input.id));
    }

    state.endpoints.push(Endpoint {
        id: input.id.clone(),
        title: input.title.clone(),
        url_path: input.url_path.clone(),
        description: non_empty(&input.description),
        comments: non_empty(&input.comments),
        subgraphs: Vec::new(),
        processors: Vec::new(),
    });
    Ok(())
}

pub fn update_endpoint(
    state: &mut PageDataArchitectureState,
    input: &UpdateEndpointInput,
) -> ReducerResult<()> {
    let endpoint = state
        .endpoint_mut(&input.id)
        .ok_or_else(|| ReducerError::endpoint_not_found(&input.id))?;

    input.title.apply_non_empty(&mut endpoint.title);
    input.url_path.apply_non_empty(&mut endpoint.url_path);
    input.description.apply_nullable(&mut endpoint.description);
    input.comments.apply_nullable(&mut endpoint.comments);
    Ok(())
}

/// Removes the endpoint together with every subgraph, processor and column it owns.
pub fn delete_endpoint(
    state: &mut PageDataArchitectureState,
    input: &DeleteEndpointInput,
) -> ReducerResult<()> {
    let index = state
        .endpoint_position(&input.id)
        .ok_or_else(|| ReducerError::endpoint_not_found(&input.id))?;

    state.endpoints.remove(index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Patch;

    fn home() -> AddEndpointInput {
        AddEndpointInput {
            id: "e1".to_string(),
            title: "Home".to_string(),
            url_path: "/home".to_string(),
            description: None,
            comments: None,
        }
    }

    fn state_with_home() -> PageDataArchitectureState {
        let mut state = PageDataArchitectureState::new();
        add_endpoint(&mut state, &home()).unwrap();
        state
    }

    #[test]
    fn test_add_endpoint_appends_empty_endpoint() {
        let mut state = state_with_home();
        add_endpoint(
            &mut state,
            &AddEndpointInput {
                id: "e2".to_string(),
                title: "About".to_string(),
                url_path: "/about".to_string(),
                description: Some(String::new()),
                comments: Some("needs review".to_string()),
            },
        )
        .unwrap();

        let ids: Vec<&str> = state.endpoints.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);

        let about = &state.endpoints[1];
        assert_eq!(about.description, None);
        assert_eq!(about.comments.as_deref(), Some("needs review"));
        assert!(about.subgraphs.is_empty());
        assert!(about.processors.is_empty());
    }

    #[test]
    fn test_add_endpoint_rejects_duplicate_id() {
        let mut state = state_with_home();
        let err = add_endpoint(&mut state, &home()).unwrap_err();
        assert_eq!(err, ReducerError::duplicate_id(EntityKind::Endpoint, "e1"));
        assert_eq!(state.endpoints.len(), 1);
    }

    #[test]
    fn test_update_endpoint_ignores_empty_strings() {
        let mut state = state_with_home();
        let mut input = UpdateEndpointInput::new("e1");
        input.title = Patch::Value(String::new());
        input.url_path = Patch::Value("/start".to_string());

        update_endpoint(&mut state, &input).unwrap();

        let endpoint = state.endpoint("e1").unwrap();
        assert_eq!(endpoint.title, "Home");
        assert_eq!(endpoint.url_path, "/start");
        assert_eq!(endpoint.description, None);
    }

    #[test]
    fn test_update_endpoint_sets_empty_description() {
        let mut state = state_with_home();
        let mut input = UpdateEndpointInput::new("e1");
        input.description = Patch::Value(String::new());

        update_endpoint(&mut state, &input).unwrap();
        assert_eq!(state.endpoint("e1").unwrap().description.as_deref(), Some(""));

        let mut input = UpdateEndpointInput::new("e1");
        input.description = Patch::Null;
        update_endpoint(&mut state, &input).unwrap();
        assert_eq!(state.endpoint("e1").unwrap().description.as_deref(), Some(""));
    }

    #[test]
    fn test_update_missing_endpoint() {
        let mut state = state_with_home();
        let err = update_endpoint(&mut state, &UpdateEndpointInput::new("nope")).unwrap_err();
        assert_eq!(err, ReducerError::endpoint_not_found("nope"));
    }

    #[test]
    fn test_delete_endpoint() {
        let mut state = state_with_home();
        let err = delete_endpoint(
            &mut state,
            &DeleteEndpointInput {
                id: "nope".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, ReducerError::endpoint_not_found("nope"));
        assert_eq!(state.endpoints.len(), 1);

        delete_endpoint(
            &mut state,
            &DeleteEndpointInput {
                id: "e1".to_string(),
            },
        )
        .unwrap();
        assert!(state.endpoints.is_empty());
    }
}
