//! Pure document operations. None of these mutate their input; each
//! returns a new value, or `None` when the operation does not apply.

use serde_json::{Map, Value};

use crate::document::{FieldPath, Segment};

/// Borrow the value at `path`, if present.
pub fn get_at<'a>(doc: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments().iter().try_fold(doc, |cur, segment| match segment {
        Segment::Key(k) => cur.get(k.as_str()),
        Segment::Index(i) => cur.get(*i),
    })
}

/// Copy of `doc` with `value` written at `path`. Missing or mistyped
/// intermediate containers are created. An index may address an existing
/// element or the one just past the end; anything further is `None`.
pub fn set_at(doc: &Value, path: &FieldPath, value: Value) -> Option<Value> {
    let mut next = doc.clone();
    *slot_mut(&mut next, path.segments())? = value;
    Some(next)
}

/// Copy of `doc` with `item` pushed onto the array at `path`. A missing
/// array is created; an existing non-array value is left alone.
pub fn append_at(doc: &Value, path: &FieldPath, item: Value) -> Option<Value> {
    let mut next = doc.clone();
    let slot = slot_mut(&mut next, path.segments())?;
    match slot {
        Value::Null => *slot = Value::Array(vec![item]),
        Value::Array(items) => items.push(item),
        _ => return None,
    }
    Some(next)
}

/// Copy of `doc` without element `index` of the array at `path`.
pub fn remove_at(doc: &Value, path: &FieldPath, index: usize) -> Option<Value> {
    let items = get_at(doc, path)?.as_array()?;
    if index >= items.len() {
        return None;
    }
    let mut remaining = items.clone();
    remaining.remove(index);
    set_at(doc, path, Value::Array(remaining))
}

/// Copy of `doc` with the array at `path` reordered by [`reorder`].
pub fn move_at(doc: &Value, path: &FieldPath, from: usize, to: usize) -> Option<Value> {
    let items = get_at(doc, path)?.as_array()?;
    let reordered = reorder(items, from, to)?;
    set_at(doc, path, Value::Array(reordered))
}

/// Drag-and-drop reorder: take the element at `from` out and reinsert it
/// so that it ends up at `to` in the result. Both indexes must be in
/// range; otherwise `None`.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from >= items.len() || to >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Some(next)
}

fn slot_mut<'a>(root: &'a mut Value, segments: &[Segment]) -> Option<&'a mut Value> {
    let mut cur = root;
    for segment in segments {
        cur = match segment {
            Segment::Key(k) => ensure_object(cur).entry(k.clone()).or_insert(Value::Null),
            Segment::Index(i) => {
                let items = ensure_array(cur);
                if *i == items.len() {
                    items.push(Value::Null);
                }
                items.get_mut(*i)?
            }
        };
    }
    Some(cur)
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

fn ensure_array(value: &mut Value) -> &mut Vec<Value> {
    if !value.is_array() {
        *value = Value::Array(Vec::new());
    }
    match value {
        Value::Array(items) => items,
        _ => unreachable!("value was just replaced by an array"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn get_nested_value() {
        let doc = json!({"services": [{"name": "a"}, {"name": "b"}]});
        assert_eq!(get_at(&doc, &path("services[1].name")), Some(&json!("b")));
        assert_eq!(get_at(&doc, &path("services[5].name")), None);
        assert_eq!(get_at(&doc, &FieldPath::root()), Some(&doc));
    }

    #[test]
    fn set_does_not_touch_input() {
        let doc = json!({"hero": {"title": "old", "subtitle": "keep"}});
        let next = set_at(&doc, &path("hero.title"), json!("new")).unwrap();
        assert_eq!(doc["hero"]["title"], "old");
        assert_eq!(next, json!({"hero": {"title": "new", "subtitle": "keep"}}));
    }

    #[test]
    fn set_creates_intermediates() {
        let next = set_at(&json!({}), &path("team[0].name"), json!("Ola")).unwrap();
        assert_eq!(next, json!({"team": [{"name": "Ola"}]}));

        let next = set_at(&next, &path("team[1].role"), json!("Mechanic")).unwrap();
        assert_eq!(next, json!({"team": [{"name": "Ola"}, {"role": "Mechanic"}]}));

        // A scalar in the way is replaced by the container the path needs.
        let next = set_at(&json!({"hero": "text"}), &path("hero.title"), json!("T")).unwrap();
        assert_eq!(next, json!({"hero": {"title": "T"}}));
    }

    #[test]
    fn set_past_the_end_is_refused() {
        let doc = json!({"items": ["a"]});
        assert!(set_at(&doc, &path("items[2]"), json!("c")).is_none());
        assert!(set_at(&doc, &path("items[100000000000]"), json!("c")).is_none());
        assert!(set_at(&json!({}), &path("items[18446744073709551615].name"), json!("x")).is_none());
        assert!(append_at(&doc, &path("items[5].tags"), json!("t")).is_none());
    }

    #[test]
    fn append_then_remove_restores_list() {
        let doc = json!({"items": ["a", "b"]});
        let appended = append_at(&doc, &path("items"), json!({"name": ""})).unwrap();
        assert_eq!(appended["items"].as_array().unwrap().len(), 3);
        let removed = remove_at(&appended, &path("items"), 2).unwrap();
        assert_eq!(removed, doc);
    }

    #[test]
    fn append_creates_missing_list_but_refuses_scalar() {
        let created = append_at(&json!({}), &path("gallery"), json!("x")).unwrap();
        assert_eq!(created, json!({"gallery": ["x"]}));
        assert!(append_at(&json!({"gallery": "x"}), &path("gallery"), json!(1)).is_none());
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let doc = json!({"items": [1]});
        assert!(remove_at(&doc, &path("items"), 1).is_none());
        assert!(remove_at(&doc, &path("missing"), 0).is_none());
    }

    #[test]
    fn reorder_first_to_last() {
        let moved = reorder(&["c0", "c1", "c2"], 0, 2).unwrap();
        assert_eq!(moved, vec!["c1", "c2", "c0"]);
    }

    #[test]
    fn reorder_last_to_first() {
        let moved = reorder(&[1, 2, 3, 4], 3, 0).unwrap();
        assert_eq!(moved, vec![4, 1, 2, 3]);
    }

    #[test]
    fn reorder_preserves_elements_for_every_pair() {
        let items = vec![10, 20, 30, 40, 50];
        for from in 0..items.len() {
            for to in 0..items.len() {
                let moved = reorder(&items, from, to).unwrap();
                assert_eq!(moved.len(), items.len());
                assert_eq!(moved[to], items[from]);
                let mut sorted = moved.clone();
                sorted.sort();
                assert_eq!(sorted, items);
                let rest: Vec<_> = moved.iter().filter(|v| **v != items[from]).collect();
                let expected: Vec<_> = items.iter().filter(|v| **v != items[from]).collect();
                assert_eq!(rest, expected);
            }
        }
    }

    #[test]
    fn reorder_out_of_range_is_none() {
        assert!(reorder(&[1, 2], 2, 0).is_none());
        assert!(reorder(&[1, 2], 0, 2).is_none());
        assert!(reorder::<i32>(&[], 0, 0).is_none());
    }

    #[test]
    fn move_at_reorders_nested_list() {
        let doc = json!({"pricing": {"categories": ["a", "b", "c"]}});
        let next = move_at(&doc, &path("pricing.categories"), 0, 2).unwrap();
        assert_eq!(next, json!({"pricing": {"categories": ["b", "c", "a"]}}));
        assert!(move_at(&doc, &path("pricing.categories"), 0, 3).is_none());
    }
}
