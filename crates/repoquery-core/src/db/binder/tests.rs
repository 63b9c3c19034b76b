use super::*;
use crate::{
    db::{parameter::ParameterAccessor, query::PageRequest},
    model::{ParameterModel, ResultShape},
    value::{Value, ValueKind},
};

fn select() -> PreparedQuery {
    PreparedQuery::select("select u from User u")
}

#[test]
fn binds_named_and_positional_parameters() {
    let params = [
        ParameterModel::named("name", ValueKind::Text),
        ParameterModel::positional(ValueKind::Int),
        ParameterModel::page_request(),
        ParameterModel::positional(ValueKind::Bool),
    ];
    let args = [
        Argument::value("ada"),
        Argument::value(42),
        Argument::Page(PageRequest::of(0, 10)),
        Argument::value(true),
    ];

    let binder = ParameterBinder::new(&params, &args).expect("binder should build");
    let mut query = select();
    binder.bind(&mut query);

    assert_eq!(binder.len(), 3);
    assert_eq!(query.parameters().named("name"), Some(&Value::from("ada")));
    assert_eq!(query.parameters().positional(1), Some(&Value::Int(42)));
    // page request does not consume a bind position
    assert_eq!(query.parameters().positional(2), Some(&Value::Bool(true)));
    assert_eq!(query.parameters().positional(3), None);
}

#[test]
fn named_parameters_do_not_consume_positions() {
    let params = [
        ParameterModel::positional(ValueKind::Int),
        ParameterModel::named("name", ValueKind::Text),
        ParameterModel::positional(ValueKind::Int),
    ];
    let args = [
        Argument::value(1),
        Argument::value("ada"),
        Argument::value(2),
    ];

    let binder = ParameterBinder::new(&params, &args).expect("binder should build");
    let mut query = select();
    binder.bind(&mut query);

    assert_eq!(query.parameters().positional(1), Some(&Value::Int(1)));
    assert_eq!(query.parameters().positional(2), Some(&Value::Int(2)));
    assert_eq!(query.parameters().positional(3), None);
    assert_eq!(query.parameters().named("name"), Some(&Value::from("ada")));
}

#[test]
fn arity_mismatch_is_rejected() {
    let params = [ParameterModel::named("name", ValueKind::Text)];

    let err = ParameterBinder::new(&params, &[]).expect_err("missing argument should fail");

    assert_eq!(
        err,
        BindingError::ArityMismatch {
            expected: 1,
            found: 0,
        }
    );
}

#[test]
fn required_named_parameter_rejects_null() {
    let params = [ParameterModel::named("name", ValueKind::Text)];
    let args = [Argument::null()];

    let err = ParameterBinder::new(&params, &args).expect_err("null should fail");

    assert_eq!(
        err,
        BindingError::MissingNamed {
            name: "name".to_string(),
        }
    );
}

#[test]
fn optional_named_parameter_binds_null() {
    let params = [ParameterModel::named("name", ValueKind::Text).optional()];
    let args = [Argument::null()];

    let binder = ParameterBinder::new(&params, &args).expect("optional null should bind");
    let mut query = select();
    binder.bind(&mut query);

    assert_eq!(query.parameters().named("name"), Some(&Value::Null));
}

#[test]
fn type_mismatch_is_rejected() {
    let params = [ParameterModel::positional(ValueKind::Int)];
    let args = [Argument::value("not a number")];

    let err = ParameterBinder::new(&params, &args).expect_err("text for int should fail");

    assert_eq!(
        err,
        BindingError::TypeMismatch {
            position: 1,
            expected: ValueKind::Int,
            found: ValueKind::Text,
        }
    );
}

#[test]
fn special_slots_require_their_argument_kind() {
    let params = [ParameterModel::page_request()];
    let args = [Argument::value(3)];

    let err = ParameterBinder::new(&params, &args).expect_err("value in page slot should fail");

    assert_eq!(
        err,
        BindingError::ArgumentMismatch {
            position: 1,
            expected: "page request",
            found: "value",
        }
    );

    let params = [ParameterModel::positional(ValueKind::Int)];
    let args = [Argument::Projection(ResultShape::RawMap)];

    let err = ParameterBinder::new(&params, &args).expect_err("projection in value slot");
    assert!(matches!(err, BindingError::ArgumentMismatch { position: 1, .. }));
}

#[test]
fn null_special_arguments_read_as_absent() {
    let params = [
        ParameterModel::page_request(),
        ParameterModel::dynamic_projection(),
    ];
    let args = [Argument::null(), Argument::null()];

    ParameterBinder::new(&params, &args).expect("null special arguments should bind");
    let accessor = ParameterAccessor::new(&params, &args);

    assert_eq!(accessor.page_request(), PageRequest::Unpaged);
    assert_eq!(accessor.dynamic_projection(), None);
}
