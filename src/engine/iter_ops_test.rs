use crate::descriptor::RegistryBuilder;
use crate::error::RuntimeError;
use crate::types::{int, list, string, table};
use crate::value::Var;

use super::Runtime;

fn runtime() -> Runtime {
    RegistryBuilder::with_builtins().build()
}

fn ints(rt: &Runtime, values: &[i64]) -> Var {
    let items = values
        .iter()
        .map(|&v| int::make(rt, v).unwrap())
        .collect::<Vec<_>>();
    list::make(rt, items).unwrap()
}

#[test]
fn for_each_visits_elements_in_order() {
    let rt = runtime();
    let items = ints(&rt, &[3, 1, 4, 1, 5]);

    let mut seen = Vec::new();
    rt.for_each(&items, |item| {
        seen.push(rt.as_long(&item)?);
        Ok(())
    })
    .unwrap();
    assert_eq!(seen, vec![3, 1, 4, 1, 5]);
}

#[test]
fn for_each_on_an_empty_collection_never_calls_back() {
    let rt = runtime();
    let items = list::make(&rt, vec![]).unwrap();

    let mut calls = 0;
    rt.for_each(&items, |_| {
        calls += 1;
        Ok(())
    })
    .unwrap();
    assert_eq!(calls, 0);
}

#[test]
fn for_each_stops_on_a_raise_from_the_body() {
    let rt = runtime();
    let items = ints(&rt, &[1, 2, 3, 4]);

    let mut seen = 0;
    let err = rt
        .for_each(&items, |item| {
            seen += 1;
            if rt.as_long(&item)? == 3 {
                return Err(RuntimeError::value("third element"));
            }
            Ok(())
        })
        .unwrap_err();
    assert_eq!(err.message, "third element");
    assert_eq!(seen, 3);
}

#[test]
fn iteration_primitives_walk_the_cursor_chain() {
    let rt = runtime();
    let items = ints(&rt, &[10, 20]);

    let end = rt.iter_end(&items).unwrap();
    assert!(end.is_undefined());

    let first = rt.iter_start(&items).unwrap();
    assert_eq!(rt.as_long(&first).unwrap(), 10);

    let second = rt.iter_next(&items, &first).unwrap();
    assert_eq!(rt.as_long(&second).unwrap(), 20);

    let past = rt.iter_next(&items, &second).unwrap();
    assert!(past.is_undefined());
}

#[test]
fn foreign_cursors_are_rejected() {
    let rt = runtime();
    let items = ints(&rt, &[1]);
    let stray = int::make(&rt, 1).unwrap();

    let err = rt.iter_next(&items, &stray).unwrap_err();
    assert_eq!(
        err.message,
        "iteration cursor does not belong to this list"
    );
}

#[test]
fn a_shared_value_held_twice_still_terminates() {
    let rt = runtime();
    let shared = int::make(&rt, 7).unwrap();
    let items = list::make(&rt, vec![]).unwrap();
    rt.push(&items, &shared).unwrap();
    rt.push(&items, &shared).unwrap();

    // clones share one identity, so the cursor alone cannot tell the two
    // occurrences apart; the list must advance past both
    let mut visits = 0;
    rt.for_each(&items, |item| {
        visits += 1;
        assert!(item.same(&shared));
        Ok(())
    })
    .unwrap();
    assert_eq!(visits, 2);

    assert_eq!(rt.iter_items(&items).unwrap().len(), 2);
    assert!(rt.maximum(&items).unwrap().same(&shared));
}

#[test]
fn nested_iterations_over_one_list_stay_independent() {
    let rt = runtime();
    let items = ints(&rt, &[1, 2, 3]);

    let mut pairs = Vec::new();
    rt.for_each(&items, |outer| {
        rt.for_each(&items, |inner| {
            pairs.push((rt.as_long(&outer)?, rt.as_long(&inner)?));
            Ok(())
        })
    })
    .unwrap();
    assert_eq!(
        pairs,
        vec![
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 1),
            (2, 2),
            (2, 3),
            (3, 1),
            (3, 2),
            (3, 3)
        ]
    );
}

#[test]
fn iter_items_collects_table_keys() {
    let rt = runtime();
    let entries = vec![
        (string::make(&rt, "a").unwrap(), int::make(&rt, 1).unwrap()),
        (string::make(&rt, "b").unwrap(), int::make(&rt, 2).unwrap()),
    ];
    let mapping = table::make(&rt, entries).unwrap();

    let keys = rt.iter_items(&mapping).unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(rt.as_str(&keys[0]).unwrap(), "a");
    assert_eq!(rt.as_str(&keys[1]).unwrap(), "b");
}

#[test]
fn iterating_a_type_without_iter_raises() {
    let rt = runtime();
    let number = int::make(&rt, 1).unwrap();
    let err = rt.for_each(&number, |_| Ok(())).unwrap_err();
    assert_eq!(err.message, "type 'Int' does not implement 'Iter'");
}

#[test]
fn maximum_and_minimum_use_strict_comparison() {
    let rt = runtime();
    let items = ints(&rt, &[3, 1, 3, 2]);

    let largest = rt.maximum(&items).unwrap();
    assert_eq!(rt.as_long(&largest).unwrap(), 3);
    // ties keep the first occurrence
    let first = rt.at(&items, 0).unwrap();
    assert!(largest.same(&first));

    let smallest = rt.minimum(&items).unwrap();
    assert_eq!(rt.as_long(&smallest).unwrap(), 1);
}

#[test]
fn maximum_of_an_empty_collection_is_undefined() {
    let rt = runtime();
    let items = list::make(&rt, vec![]).unwrap();
    assert!(rt.maximum(&items).unwrap().is_undefined());
    assert!(rt.minimum(&items).unwrap().is_undefined());
}
