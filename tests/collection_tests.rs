use capstan::descriptor::RegistryBuilder;
use capstan::engine::Runtime;
use capstan::types::{character, int, list, string, table};
use capstan::value::Var;

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

fn longs(rt: &Runtime, items: &Var) -> Vec<i64> {
    rt.iter_items(items)
        .unwrap()
        .iter()
        .map(|item| rt.as_long(item).unwrap())
        .collect()
}

#[test]
fn list_push_pop_family() {
    let rt = runtime();
    let items = ints(&rt, &[2, 3]);

    rt.push_front(&items, &int::make(&rt, 1).unwrap()).unwrap();
    rt.push_back(&items, &int::make(&rt, 4).unwrap()).unwrap();
    rt.push_at(&items, &int::make(&rt, 9).unwrap(), 2).unwrap();
    assert_eq!(longs(&rt, &items), vec![1, 2, 9, 3, 4]);

    assert_eq!(rt.as_long(&rt.pop_at(&items, 2).unwrap()).unwrap(), 9);
    assert_eq!(rt.as_long(&rt.pop_front(&items).unwrap()).unwrap(), 1);
    assert_eq!(rt.as_long(&rt.pop_back(&items).unwrap()).unwrap(), 4);
    assert_eq!(longs(&rt, &items), vec![2, 3]);

    rt.clear(&items).unwrap();
    assert!(rt.is_empty(&items).unwrap());
    let err = rt.pop(&items).unwrap_err();
    assert_eq!(err.to_string(), "ValueError: cannot pop from an empty list");
}

#[test]
fn list_indexing_checks_bounds() {
    let rt = runtime();
    let items = ints(&rt, &[10, 20]);

    rt.set(&items, 1, &int::make(&rt, 25).unwrap()).unwrap();
    assert_eq!(rt.as_long(&rt.at(&items, 1).unwrap()).unwrap(), 25);

    let err = rt.at(&items, 2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "ValueError: index 2 is out of range for a list of length 2"
    );
}

#[test]
fn list_sort_is_stable_and_reverse_flips() {
    let rt = runtime();
    let items = ints(&rt, &[3, 1, 2, 1]);

    // capture the two equal elements to observe their relative order
    let first_one = rt.at(&items, 1).unwrap();
    let second_one = rt.at(&items, 3).unwrap();

    rt.sort(&items).unwrap();
    assert_eq!(longs(&rt, &items), vec![1, 1, 2, 3]);
    assert!(rt.at(&items, 0).unwrap().same(&first_one));
    assert!(rt.at(&items, 1).unwrap().same(&second_one));

    rt.reverse(&items).unwrap();
    assert_eq!(longs(&rt, &items), vec![3, 2, 1, 1]);
}

#[test]
fn list_contains_and_discard_use_generic_equality() {
    let rt = runtime();
    let items = ints(&rt, &[1, 2, 2, 3]);

    // a fresh instance with an equal payload, not a shared one
    let two = int::make(&rt, 2).unwrap();
    assert!(rt.contains(&items, &two).unwrap());

    rt.discard(&items, &two).unwrap();
    assert_eq!(longs(&rt, &items), vec![1, 2, 3]);

    rt.discard(&items, &int::make(&rt, 99).unwrap()).unwrap();
    assert_eq!(rt.len(&items).unwrap(), 3);
}

#[test]
fn lists_compare_elementwise() {
    let rt = runtime();
    assert!(rt.eq(&ints(&rt, &[1, 2]), &ints(&rt, &[1, 2])).unwrap());
    assert!(!rt.eq(&ints(&rt, &[1, 2]), &ints(&rt, &[1, 3])).unwrap());
    assert!(!rt.eq(&ints(&rt, &[1, 2]), &ints(&rt, &[1, 2, 3])).unwrap());

    // nested lists recurse through the same protocol
    let a = list::make(&rt, vec![ints(&rt, &[1]), ints(&rt, &[2])]).unwrap();
    let b = list::make(&rt, vec![ints(&rt, &[1]), ints(&rt, &[2])]).unwrap();
    assert!(rt.eq(&a, &b).unwrap());
}

#[test]
fn table_round_trip_with_string_keys() {
    let rt = runtime();
    let tag = rt.lookup("Table").unwrap();
    let mapping = rt.construct(tag, &[]).unwrap();

    let key = string::make(&rt, "count").unwrap();
    rt.put(&mapping, &key, &int::make(&rt, 1).unwrap()).unwrap();

    // an equal key built separately finds the same entry
    let twin = string::make(&rt, "count").unwrap();
    assert!(rt.contains(&mapping, &twin).unwrap());
    assert_eq!(rt.as_long(&rt.get(&mapping, &twin).unwrap()).unwrap(), 1);

    // put on an existing key replaces, never duplicates
    rt.put(&mapping, &twin, &int::make(&rt, 2).unwrap())
        .unwrap();
    assert_eq!(rt.len(&mapping).unwrap(), 1);
    assert_eq!(rt.as_long(&rt.get(&mapping, &key).unwrap()).unwrap(), 2);

    rt.discard(&mapping, &key).unwrap();
    assert!(rt.is_empty(&mapping).unwrap());
}

#[test]
fn table_constructs_from_alternating_arguments() {
    let rt = runtime();
    let tag = rt.lookup("Table").unwrap();
    let mapping = rt
        .construct(
            tag,
            &[
                string::make(&rt, "a").unwrap(),
                int::make(&rt, 1).unwrap(),
                string::make(&rt, "b").unwrap(),
                int::make(&rt, 2).unwrap(),
            ],
        )
        .unwrap();
    assert_eq!(rt.len(&mapping).unwrap(), 2);

    let err = rt
        .construct(tag, &[string::make(&rt, "odd").unwrap()])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "ValueError: Table construction takes alternating key and value arguments"
    );
}

#[test]
fn table_construction_replaces_a_repeated_key() {
    let rt = runtime();
    let tag = rt.lookup("Table").unwrap();
    let mapping = rt
        .construct(
            tag,
            &[
                string::make(&rt, "a").unwrap(),
                int::make(&rt, 1).unwrap(),
                string::make(&rt, "a").unwrap(),
                int::make(&rt, 2).unwrap(),
            ],
        )
        .unwrap();

    // same uniqueness rule as put: the later value wins, no duplicate entry
    assert_eq!(rt.len(&mapping).unwrap(), 1);
    let key = string::make(&rt, "a").unwrap();
    assert_eq!(rt.as_long(&rt.get(&mapping, &key).unwrap()).unwrap(), 2);
}

#[test]
fn tables_key_on_any_eq_type() {
    let rt = runtime();
    let mapping = table::make(&rt, vec![]).unwrap();

    // a list key: matched structurally through its Eq class
    let key = ints(&rt, &[1, 2]);
    rt.put(&mapping, &key, &string::make(&rt, "pair").unwrap())
        .unwrap();
    let twin = ints(&rt, &[1, 2]);
    assert_eq!(rt.as_str(&rt.get(&mapping, &twin).unwrap()).unwrap(), "pair");

    // a table key has no Eq class and matches only by identity
    let opaque = table::make(&rt, vec![]).unwrap();
    rt.put(&mapping, &opaque, &int::make(&rt, 7).unwrap())
        .unwrap();
    assert!(rt.contains(&mapping, &opaque).unwrap());
    let other = table::make(&rt, vec![]).unwrap();
    assert!(!rt.contains(&mapping, &other).unwrap());
}

#[test]
fn string_behaves_as_a_character_collection() {
    let rt = runtime();
    let text = string::make(&rt, "naïve").unwrap();
    assert_eq!(rt.len(&text).unwrap(), 5);

    assert!(rt.contains(&text, &character::make(&rt, 'ï').unwrap()).unwrap());
    assert!(rt.contains(&text, &string::make(&rt, "ve").unwrap()).unwrap());
    assert!(!rt.contains(&text, &string::make(&rt, "x").unwrap()).unwrap());

    rt.discard(&text, &string::make(&rt, "ï").unwrap()).unwrap();
    assert_eq!(rt.as_str(&text).unwrap(), "nave");

    rt.append(&text, &string::make(&rt, "!").unwrap()).unwrap();
    assert_eq!(rt.as_str(&text).unwrap(), "nave!");

    rt.reverse(&text).unwrap();
    assert_eq!(rt.as_str(&text).unwrap(), "!evan");
}

#[test]
fn strings_order_lexicographically() {
    let rt = runtime();
    let words = list::make(
        &rt,
        vec![
            string::make(&rt, "pear").unwrap(),
            string::make(&rt, "apple").unwrap(),
            string::make(&rt, "banana").unwrap(),
        ],
    )
    .unwrap();

    rt.sort(&words).unwrap();
    assert_eq!(rt.as_str(&rt.at(&words, 0).unwrap()).unwrap(), "apple");
    assert_eq!(
        rt.as_str(&rt.minimum(&words).unwrap()).unwrap(),
        "apple"
    );
    assert_eq!(rt.as_str(&rt.maximum(&words).unwrap()).unwrap(), "pear");
}

#[test]
fn string_append_requires_as_str_on_the_item() {
    let rt = runtime();
    // Char has no AsStr class, so appending one to a Str raises
    let text = string::make(&rt, "a").unwrap();
    let letter = character::make(&rt, 'b').unwrap();
    let err = rt.append(&text, &letter).unwrap_err();
    assert_eq!(
        err.to_string(),
        "ValueError: type 'Char' does not implement 'AsStr'"
    );
}
