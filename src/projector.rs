//! Allowlist projection of untrusted records.
//!
//! Every function here is total: a record that is not an object, or an
//! allowlist that is not a sequence, produces an empty result instead of an
//! error. Only fields that are both allowlisted and present directly on the
//! record are carried over, under their original names.

use serde_json::{Map, Value};

use crate::record::{own_fields, RecordKind};
use crate::Allowlist;

/// The fields of an untrusted record that survived projection.
///
/// Names and values are borrowed from the record, not copied. Iteration follows the
/// allowlist's declaration order.
///
/// # Examples
///
/// ```
/// use field_projector::{project, Allowlist};
/// use serde_json::json;
///
/// let record = json!({"name": "Ada", "role": "admin"});
/// let fields = Allowlist::new(["name"]);
///
/// let projected = project(&record, &fields);
/// assert_eq!(projected.get("name"), Some(&json!("Ada")));
/// assert!(!projected.contains_key("role"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection<'a> {
    entries: Vec<(&'a str, &'a Value)>,
}

impl<'a> Projection<'a> {
    /// Returns the number of carried fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing passed through.
    ///
    /// This is how callers detect that a payload carried nothing usable.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the carried value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Returns `true` if `key` was carried.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over carried field names.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Iterates over carried `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
        self.entries.iter().copied()
    }

    /// Clones the carried fields into a fresh map.
    pub fn to_map(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).clone()))
            .collect()
    }

    /// Clones the carried fields into a fresh `Value::Object`.
    pub fn into_value(self) -> Value {
        Value::Object(self.to_map())
    }
}

/// Projects `record` onto `allowlist`, borrowing the surviving values.
///
/// The result never holds a name outside the allowlist, and holds a name only
/// if the record defines it directly. Non-object records yield an empty
/// projection.
///
/// # Examples
///
/// ```
/// use field_projector::{project, Allowlist};
/// use serde_json::json;
///
/// let record = json!({"a": 1, "b": 2, "c": 3});
/// let projected = project(&record, &Allowlist::new(["a", "c"]));
/// assert_eq!(projected.into_value(), json!({"a": 1, "c": 3}));
///
/// let absent = json!(null);
/// assert!(project(&absent, &Allowlist::new(["a", "b"])).is_empty());
/// ```
pub fn project<'a>(record: &'a Value, allowlist: &Allowlist) -> Projection<'a> {
    let Some(source) = own_fields(record) else {
        tracing::debug!(
            kind = %RecordKind::of(record),
            "untrusted record is not an object; nothing will pass"
        );
        return Projection::default();
    };

    let entries: Vec<(&'a str, &'a Value)> = allowlist
        .keys()
        .filter_map(|key| source.get_key_value(key))
        .map(|(key, value)| (key.as_str(), value))
        .collect();

    tracing::trace!(
        kind = %RecordKind::Object,
        kept = entries.len(),
        dropped = source.len() - entries.len(),
        "projected untrusted record"
    );

    Projection { entries }
}

/// Projects with either input possibly absent.
///
/// A missing record or a missing allowlist lets nothing through.
pub fn project_opt<'a>(
    record: Option<&'a Value>,
    allowlist: Option<&Allowlist>,
) -> Projection<'a> {
    match (record, allowlist) {
        (Some(record), Some(allowlist)) => project(record, allowlist),
        _ => Projection::default(),
    }
}

/// Projects an owned record, moving the surviving values out of it.
///
/// Values are moved rather than cloned; the rest of the record is dropped.
///
/// # Examples
///
/// ```
/// use field_projector::{project_owned, Allowlist};
/// use serde_json::json;
///
/// let payload = json!({"title": "Q3", "owner_id": 1});
/// let fields = project_owned(payload, &Allowlist::new(["title"]));
/// assert_eq!(fields.len(), 1);
/// assert_eq!(fields["title"], json!("Q3"));
/// ```
pub fn project_owned(record: Value, allowlist: &Allowlist) -> Map<String, Value> {
    let mut source = match record {
        Value::Object(map) => map,
        other => {
            tracing::debug!(
                kind = %RecordKind::of(&other),
                "untrusted record is not an object; nothing will pass"
            );
            return Map::new();
        }
    };

    let total = source.len();
    let mut result = Map::new();
    for key in allowlist.keys() {
        if let Some(value) = source.remove(key) {
            result.insert(key.to_string(), value);
        }
    }

    tracing::trace!(
        kind = %RecordKind::Object,
        kept = result.len(),
        dropped = total - result.len(),
        "projected untrusted record"
    );

    result
}

/// Projects when both the record and the allowlist are untrusted dynamic values.
///
/// Always returns a `Value::Object`. Surviving values are cloned, since the
/// result cannot borrow from its inputs.
///
/// # Examples
///
/// ```
/// use field_projector::project_value;
/// use serde_json::json;
///
/// assert_eq!(project_value(&json!({"a": 1}), &json!(null)), json!({}));
/// assert_eq!(
///     project_value(&json!({"a": 1, "b": 2}), &json!(["a", "a", "z"])),
///     json!({"a": 1})
/// );
/// ```
pub fn project_value(record: &Value, allowlist: &Value) -> Value {
    let allowlist = Allowlist::from_value(allowlist);
    project(record, &allowlist).into_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_only_allowlisted_fields() {
        let record = json!({"a": 1, "b": 2, "c": 3});
        let list = Allowlist::new(["a", "c"]);

        let projected = project(&record, &list);

        assert_eq!(projected.len(), 2);
        assert_eq!(projected.get("a"), Some(&json!(1)));
        assert_eq!(projected.get("c"), Some(&json!(3)));
        assert!(!projected.contains_key("b"));
    }

    #[test]
    fn null_record_yields_empty() {
        let list = Allowlist::new(["a", "b"]);
        assert!(project(&Value::Null, &list).is_empty());
    }

    #[test]
    fn non_object_records_yield_empty() {
        let list = Allowlist::new(["0", "length", "a"]);
        for record in [json!([1, 2]), json!("abc"), json!(42), json!(true)] {
            assert!(project(&record, &list).is_empty());
        }
    }

    #[test]
    fn duplicate_and_absent_keys_are_harmless() {
        let record = json!({"a": 1, "b": 2});
        let projected = project_value(&record, &json!(["a", "a", "z"]));
        assert_eq!(projected, json!({"a": 1}));
    }

    #[test]
    fn null_allowlist_yields_empty() {
        assert_eq!(project_value(&json!({"a": 1}), &Value::Null), json!({}));
    }

    #[test]
    fn values_are_borrowed_not_copied() {
        let record = json!({"profile": {"bio": "hi"}, "admin": true});
        let list = Allowlist::new(["profile"]);

        let projected = project(&record, &list);

        let original = record.get("profile").expect("present");
        let carried = projected.get("profile").expect("carried");
        assert!(std::ptr::eq(original, carried));
    }

    #[test]
    fn nested_objects_are_carried_whole() {
        let record = json!({"settings": {"theme": "dark", "is_admin": true}});
        let projected = project_value(&record, &json!(["settings"]));
        assert_eq!(projected["settings"]["is_admin"], json!(true));
    }

    #[test]
    fn nested_prototype_keys_do_not_become_own_fields() {
        let record = json!({"__proto__": {"is_admin": true}, "name": "x"});
        let list = Allowlist::new(["is_admin", "name"]);

        let projected = project(&record, &list);

        assert!(!projected.contains_key("is_admin"));
        assert_eq!(projected.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn prototype_key_passes_only_when_allowlisted() {
        let record = json!({"__proto__": {"polluted": 1}, "constructor": 2});
        assert!(project(&record, &Allowlist::new(["name"])).is_empty());

        let projected = project(&record, &Allowlist::new(["constructor"]));
        assert_eq!(projected.into_value(), json!({"constructor": 2}));
    }

    #[test]
    fn explicit_null_value_is_an_own_field() {
        let record = json!({"a": null});
        let projected = project(&record, &Allowlist::new(["a"]));
        assert!(projected.contains_key("a"));
        assert_eq!(projected.get("a"), Some(&Value::Null));
    }

    #[test]
    fn iteration_follows_allowlist_order() {
        let record = json!({"a": 1, "b": 2, "c": 3});
        let projected = project(&record, &Allowlist::new(["c", "a"]));
        let pairs: Vec<_> = projected.iter().collect();
        assert_eq!(pairs, vec![("c", &json!(3)), ("a", &json!(1))]);
    }

    #[test]
    fn project_opt_handles_absent_inputs() {
        let record = json!({"a": 1});
        let list = Allowlist::new(["a"]);

        assert!(project_opt(None, Some(&list)).is_empty());
        assert!(project_opt(Some(&record), None).is_empty());
        assert!(project_opt(None, None).is_empty());
        assert_eq!(project_opt(Some(&record), Some(&list)).len(), 1);
    }

    #[test]
    fn project_owned_moves_values() {
        let record = json!({"a": [1, 2, 3], "b": "drop me"});
        let result = project_owned(record, &Allowlist::new(["a", "missing"]));

        assert_eq!(result.len(), 1);
        assert_eq!(result["a"], json!([1, 2, 3]));
    }

    #[test]
    fn project_owned_non_object_yields_empty() {
        assert!(project_owned(json!([{"a": 1}]), &Allowlist::new(["a"])).is_empty());
        assert!(project_owned(Value::Null, &Allowlist::new(["a"])).is_empty());
    }

    #[test]
    fn borrowed_and_owned_forms_agree() {
        let record = json!({"x": 1, "y": {"z": 2}, "w": null});
        let list = Allowlist::new(["y", "w", "q"]);

        let borrowed = project(&record, &list).to_map();
        let owned = project_owned(record.clone(), &list);

        assert_eq!(borrowed, owned);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let record = json!({"a": 1, "b": 2});
        let snapshot = record.clone();
        let _ = project_value(&record, &json!(["a"]));
        assert_eq!(record, snapshot);
    }

    mod proptests {
        use super::*;
        use crate::test_utils::{arb_allowlist_value, arb_key, arb_record};
        use proptest::prelude::*;

        proptest! {
            /// Property: result keys are always a subset of the allowlist
            #[test]
            fn proptest_keys_subset_of_allowlist(
                record in arb_record(),
                allowlist in arb_allowlist_value(),
            ) {
                let list = Allowlist::from_value(&allowlist);
                let projected = project(&record, &list);
                for key in projected.keys() {
                    prop_assert!(list.contains(key));
                }
            }

            /// Property: a key is carried iff the record defines it, with the same value
            #[test]
            fn proptest_membership_matches_record(
                record in arb_record(),
                keys in prop::collection::vec(arb_key(), 0..8),
            ) {
                let list = Allowlist::new(keys.clone());
                let projected = project(&record, &list);
                let fields = record.as_object();

                for key in &keys {
                    let original = fields.and_then(|m| m.get(key.as_str()));
                    match (original, projected.get(key)) {
                        (Some(o), Some(c)) => {
                            prop_assert!(std::ptr::eq(o, c));
                        }
                        (None, None) => {}
                        _ => return Err(TestCaseError::fail(format!("membership mismatch for {key}"))),
                    }
                }
            }

            /// Property: projecting twice with the same allowlist changes nothing
            #[test]
            fn proptest_idempotent(
                record in arb_record(),
                allowlist in arb_allowlist_value(),
            ) {
                let once = project_value(&record, &allowlist);
                let twice = project_value(&once, &allowlist);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
