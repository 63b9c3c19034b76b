use super::*;
use crate::{LOCK_MODE_HINT, model::LockMode, value::Value};

#[test]
fn hint_reapplied_moves_to_end_with_new_value() {
    let mut query = PreparedQuery::select("select u from User u");
    query.set_hint("a", 1);
    query.set_hint("b", 2);
    query.set_hint("a", 3);

    assert_eq!(query.hints().names().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(query.hint("a"), Some(&Value::Int(3)));
}

#[test]
fn lock_mode_is_published_as_hint() {
    let mut query = PreparedQuery::select("select u from User u");
    query.set_hint(LOCK_MODE_HINT, "NONE");
    query.set_lock_mode(LockMode::PessimisticWrite);

    assert_eq!(query.lock_mode(), Some(LockMode::PessimisticWrite));
    assert_eq!(
        query.hint(LOCK_MODE_HINT),
        Some(&Value::from("PESSIMISTIC_WRITE"))
    );
    assert_eq!(query.hints().len(), 1);
}

#[test]
fn page_request_offset_saturates() {
    assert_eq!(PageRequest::of(2, 10).offset(), 20);
    assert_eq!(PageRequest::Unpaged.offset(), 0);
    assert_eq!(
        PageRequest::of(u32::MAX, u32::MAX).offset(),
        u64::from(u32::MAX) * u64::from(u32::MAX)
    );
}

#[test]
fn page_request_zero_size_is_raised_to_one() {
    assert_eq!(PageRequest::of(0, 0).page_size(), Some(1));
}

#[test]
fn page_request_next_advances_page() {
    assert_eq!(PageRequest::of(1, 5).next(), Some(PageRequest::of(2, 5)));
    assert_eq!(PageRequest::Unpaged.next(), None);
    assert_eq!(PageRequest::of(u32::MAX, 5).next(), None);
}
