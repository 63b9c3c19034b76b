use super::*;
use crate::{error::ConfigurationError, value::ValueKind};

#[test]
fn parameters_take_declaration_positions() {
    let method = MethodDescriptor::builder("findByName", "User")
        .param(ParameterModel::named("name", ValueKind::Text))
        .param(ParameterModel::page_request())
        .param(ParameterModel::positional(ValueKind::Int))
        .build()
        .expect("descriptor should build");

    let positions: Vec<_> = method
        .parameters()
        .iter()
        .map(ParameterModel::position)
        .collect();
    assert_eq!(positions, [1, 2, 3]);
    assert!(method.has_parameter_role(ParameterRole::PageRequest));
    assert!(!method.has_parameter_role(ParameterRole::DynamicProjection));
}

#[test]
fn flags_accumulate() {
    let method = MethodDescriptor::builder("deleteAll", "User")
        .modifying(true)
        .collection()
        .build()
        .expect("descriptor should build");

    assert!(method.is_modifying_query());
    assert!(method.is_collection_query());
    assert!(method.clear_automatically());
    assert!(!method.is_page_query());
    assert!(method.flags().contains(ExecutionFlag::Modifying));
    assert!(!method.flags().contains(ExecutionFlag::Stream));
}

#[test]
fn blank_hint_name_is_rejected() {
    let err = MethodDescriptor::builder("findAll", "User")
        .hint("  ", 1)
        .build()
        .expect_err("blank hint should fail");

    assert_eq!(
        err,
        ConfigurationError::BlankHintName {
            method: "findAll".to_string(),
        }
    );
}

#[test]
fn duplicate_parameter_name_is_rejected() {
    let err = MethodDescriptor::builder("findByName", "User")
        .param(ParameterModel::named("name", ValueKind::Text))
        .param(ParameterModel::named("name", ValueKind::Text))
        .build()
        .expect_err("duplicate name should fail");

    assert_eq!(
        err,
        ConfigurationError::DuplicateParameter {
            method: "findByName".to_string(),
            name: "name".to_string(),
        }
    );
}

#[test]
fn second_page_request_parameter_is_rejected() {
    let err = MethodDescriptor::builder("findPage", "User")
        .page()
        .param(ParameterModel::page_request())
        .param(ParameterModel::page_request())
        .build()
        .expect_err("two page requests should fail");

    assert_eq!(
        err,
        ConfigurationError::DuplicateSpecialParameter {
            method: "findPage".to_string(),
            role: "page-request",
        }
    );
}

#[test]
fn slice_and_page_need_a_page_request_parameter() {
    for (builder, flag) in [
        (
            MethodDescriptor::builder("findSlice", "User").slice(),
            ExecutionFlag::Slice,
        ),
        (
            MethodDescriptor::builder("findPage", "User").page(),
            ExecutionFlag::Page,
        ),
    ] {
        let err = builder.build().expect_err("missing page request should fail");

        assert!(matches!(
            err,
            ConfigurationError::MissingPageRequest { flag: found, .. } if found == flag
        ));
    }
}

#[test]
fn collection_with_page_flag_needs_no_page_request() {
    // collection wins the strategy priority, so no window is read
    MethodDescriptor::builder("findAll", "User")
        .collection()
        .page()
        .build()
        .expect("collection + page should build");
}

#[test]
fn optional_named_parameter_is_not_required() {
    let param = ParameterModel::named("email", ValueKind::Text).optional();

    assert!(!param.is_required());
    assert!(param.is_bindable());
    assert!(param.ty().accepts(&crate::value::Value::Null));
    assert!(!param.ty().accepts(&crate::value::Value::Int(1)));
}

#[test]
fn lock_mode_labels() {
    assert_eq!(LockMode::PessimisticWrite.to_string(), "PESSIMISTIC_WRITE");
    assert_eq!(LockMode::None.to_string(), "NONE");
}

#[test]
fn graph_kinds_publish_under_their_own_keys() {
    assert_eq!(GraphKind::Fetch.hint_key(), crate::FETCH_GRAPH_HINT);
    assert_eq!(GraphKind::Load.hint_key(), crate::LOAD_GRAPH_HINT);
    assert_eq!(EntityGraphRef::fetch("g").kind, GraphKind::Fetch);
}

#[test]
fn result_shape_defaults_to_entity() {
    let method = MethodDescriptor::builder("findById", "User")
        .build()
        .expect("descriptor should build");

    assert_eq!(method.result_shape(), &ResultShape::Entity);
    assert_eq!(ResultShape::dto(["id"]).label(), "dto");
}
