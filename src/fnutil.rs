use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Combinators over predicates and functions
// ---------------------------------------------------------------------------

/// A boxed predicate over a borrowed item.
pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// A boxed predicate whose evaluation may fail (e.g. on a missing field).
pub type TryPredicate<'a, T, E> = Box<dyn Fn(&T) -> Result<bool, E> + 'a>;

/// A boxed endomorphism, the unit [`compose`] works with.
pub type Function<'a, T> = Box<dyn Fn(T) -> T + 'a>;

pub fn identity<T>(x: T) -> T {
    x
}

/// `true` if any element of `xs` satisfies `predicate`.
///
/// Stops at the first match; an empty sequence yields `false`.
pub fn exists_match<I, P>(mut predicate: P, xs: I) -> bool
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    xs.into_iter().any(|x| predicate(&x))
}

/// Fallible [`exists_match`]: the first error the predicate returns is
/// propagated and no further elements are visited.
pub fn try_exists_match<I, P, E>(mut predicate: P, xs: I) -> Result<bool, E>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> Result<bool, E>,
{
    for x in xs {
        if predicate(&x)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Short-circuit conjunction of `predicates`, evaluated in order.
///
/// With no predicates the result accepts everything.
pub fn all_of<'a, T>(predicates: Vec<Predicate<'a, T>>) -> impl Fn(&T) -> bool + 'a
where
    T: ?Sized + 'a,
{
    move |item| predicates.iter().all(|p| p(item))
}

/// Fallible [`all_of`]: stops at the first `false` or the first error.
pub fn try_all_of<'a, T, E>(
    predicates: Vec<TryPredicate<'a, T, E>>,
) -> impl Fn(&T) -> Result<bool, E> + 'a
where
    T: ?Sized + 'a,
    E: 'a,
{
    move |item| {
        for p in &predicates {
            if !p(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Right-to-left composition: `compose(vec![f, g, h])(x) == f(g(h(x)))`.
///
/// An empty list composes to [`identity`].
pub fn compose<'a, T: 'a>(functions: Vec<Function<'a, T>>) -> impl Fn(T) -> T + 'a {
    move |x| functions.iter().rev().fold(x, |acc, f| f(acc))
}

/// Composition of two functions with different types: `f(g(x))`.
pub fn compose2<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
where
    F: Fn(B) -> C,
    G: Fn(A) -> B,
{
    move |x| f(g(x))
}

// ---------------------------------------------------------------------------
// Keyed access
// ---------------------------------------------------------------------------

/// Raised by [`get_field`] when the requested key is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' not found")]
pub struct LookupError {
    pub field: String,
}

/// Containers addressable by a string key.
pub trait Lookup {
    type Value;

    fn lookup(&self, key: &str) -> Option<&Self::Value>;
}

impl<V> Lookup for BTreeMap<String, V> {
    type Value = V;

    fn lookup(&self, key: &str) -> Option<&V> {
        self.get(key)
    }
}

impl<V> Lookup for HashMap<String, V> {
    type Value = V;

    fn lookup(&self, key: &str) -> Option<&V> {
        self.get(key)
    }
}

impl Lookup for serde_json::Map<String, serde_json::Value> {
    type Value = serde_json::Value;

    fn lookup(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key)
    }
}

/// Value stored at `field` in `record`, or a [`LookupError`]. Never defaults.
pub fn get_field<'r, C>(field: &str, record: &'r C) -> Result<&'r C::Value, LookupError>
where
    C: Lookup + ?Sized,
{
    record.lookup(field).ok_or_else(|| LookupError {
        field: field.to_string(),
    })
}


#[cfg(test)]
mod properties {
    use std::cell::RefCell;

    use proptest::prelude::*;

    use super::*;

    fn step(offset: i32) -> impl Fn(i32) -> i32 {
        move |x| x.wrapping_mul(3).wrapping_add(offset)
    }

    proptest! {
        /// Property: exists_match agrees with `any`, and stops right after the first match
        #[test]
        fn prop_exists_match_is_any(
            xs in prop::collection::vec(-100i32..100, 0..32),
            threshold in -100i32..100,
        ) {
            let calls = RefCell::new(0usize);
            let found = exists_match(
                |x: &i32| {
                    *calls.borrow_mut() += 1;
                    *x > threshold
                },
                xs.clone(),
            );

            prop_assert_eq!(found, xs.iter().any(|x| *x > threshold));
            let expected_calls = match xs.iter().position(|x| *x > threshold) {
                Some(i) => i + 1,
                None => xs.len(),
            };
            prop_assert_eq!(*calls.borrow(), expected_calls);
        }

        /// Property: all_of is the AND, evaluating each predicate at most once, in order
        #[test]
        fn prop_all_of_is_ordered_conjunction(outcomes in prop::collection::vec(any::<bool>(), 0..8)) {
            let calls = RefCell::new(Vec::new());
            let calls_ref = &calls;
            let predicates: Vec<Predicate<'_, ()>> = outcomes
                .iter()
                .copied()
                .enumerate()
                .map(|(i, b)| -> Predicate<'_, ()> {
                    Box::new(move |_: &()| {
                        calls_ref.borrow_mut().push(i);
                        b
                    })
                })
                .collect();

            let combined = all_of(predicates);
            prop_assert_eq!(combined(&()), outcomes.iter().all(|b| *b));

            let evaluated = match outcomes.iter().position(|b| !*b) {
                Some(i) => i + 1,
                None => outcomes.len(),
            };
            prop_assert_eq!(calls.borrow().clone(), (0..evaluated).collect::<Vec<_>>());
        }

        /// Property: try_all_of stops at the first false or error, whichever comes first
        #[test]
        fn prop_try_all_of_matches_reference(
            outcomes in prop::collection::vec(prop::option::of(any::<bool>()), 0..8),
        ) {
            let predicates: Vec<TryPredicate<'_, (), usize>> = outcomes
                .iter()
                .copied()
                .enumerate()
                .map(|(i, o)| -> TryPredicate<'_, (), usize> {
                    Box::new(move |_: &()| o.ok_or(i))
                })
                .collect();

            let mut expected = Ok(true);
            for (i, o) in outcomes.iter().enumerate() {
                match o {
                    Some(true) => continue,
                    Some(false) => expected = Ok(false),
                    None => expected = Err(i),
                }
                break;
            }

            prop_assert_eq!(try_all_of(predicates)(&()), expected);
        }

        /// Property: compose applies right to left, like a reversed fold
        #[test]
        fn prop_compose_is_nested_application(
            offsets in prop::collection::vec(-1000i32..1000, 0..10),
            x in any::<i32>(),
        ) {
            let functions: Vec<Function<'_, i32>> = offsets
                .iter()
                .map(|&o| -> Function<'_, i32> { Box::new(step(o)) })
                .collect();

            let expected = offsets.iter().rev().fold(x, |acc, &o| step(o)(acc));
            prop_assert_eq!(compose(functions)(x), expected);
        }

        /// Property: get_field finds exactly the keys that were inserted
        #[test]
        fn prop_get_field_matches_contains(
            keys in prop::collection::btree_set("[a-z]{1,4}", 0..8),
            key in "[a-z]{1,4}",
        ) {
            let record: BTreeMap<String, usize> =
                keys.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();

            match get_field(&key, &record) {
                Ok(v) => {
                    prop_assert_eq!(Some(v), record.get(&key));
                }
                Err(e) => {
                    prop_assert!(!keys.contains(&key));
                    prop_assert_eq!(e.field, key);
                }
            }
        }
    }
}
