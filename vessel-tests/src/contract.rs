use crate::user;
use std::fmt::Debug;
use vessel::{Backend, Condition, DeleteQuery, Error, SelectQuery, TranslationError, Value};

fn translation_error(error: &Error) -> &TranslationError {
    error
        .downcast_ref::<TranslationError>()
        .unwrap_or_else(|| panic!("Expected a translation error, found: {:#}", error))
}

fn expect_invalid<T: Debug>(result: vessel::Result<T>) {
    let error = result.expect_err("Expected an invalid condition");
    assert!(
        matches!(
            translation_error(&error),
            TranslationError::InvalidCondition { .. }
        ),
        "{:#}",
        error
    );
}

/// Behavior shared by every backend.
pub fn execute_tests<B: Backend>(backend: &B)
where
    B::Clause: Debug,
    B::Insert: Debug,
    B::Update: Debug,
    B::Select: Debug,
    B::Delete: Debug,
{
    // A missing condition matches every record
    backend
        .translate_condition(None)
        .expect("No condition must translate");
    backend
        .build_delete_query(&DeleteQuery::new("users"))
        .expect("Delete without condition must translate");

    // Empty compositions
    expect_invalid(backend.translate_condition(Some(&Condition::and([]))));
    expect_invalid(backend.translate_condition(Some(&Condition::or([]))));
    expect_invalid(backend.translate_condition(Some(&Condition::and([
        Condition::eq("name", "Alice"),
        Condition::and([]),
    ]))));

    // IN requires a sequence
    expect_invalid(backend.translate_condition(Some(&Condition::is_in("age", 10))));
    let missing = Value::List(None, Box::new(Value::Int32(None)));
    expect_invalid(backend.translate_condition(Some(&Condition::is_in("age", missing))));
    backend
        .translate_condition(Some(&Condition::is_in("age", vec![10, 20])))
        .expect("IN with a list must translate");
    backend
        .build_select_query(
            &SelectQuery::new("users")
                .filter(Condition::eq("name", "Alice") & Condition::between("age", 18, 65)),
        )
        .expect("Conjunction must translate");

    // Updates need the key and leave the entity untouched
    let entity = user();
    let snapshot = entity.clone();
    backend
        .build_update_payload(&entity)
        .expect("Update must translate");
    assert_eq!(entity, snapshot);
    let error = backend
        .build_update_payload(&entity.without("id"))
        .expect_err("Update without key must fail");
    assert!(
        matches!(
            translation_error(&error),
            TranslationError::MissingKey { key, .. } if key == "id"
        ),
        "{:#}",
        error
    );
}
