//! Stores computed from other stores.

use std::sync::{Arc, Mutex};

use crate::store::writable::{Readable, Writable};

/// A store whose value is `combine` applied to the current values of
/// `sources`, recomputed whenever any source changes.
pub fn derived<T, U, F>(sources: &[Readable<T>], combine: F) -> Readable<U>
where
    T: Clone + PartialEq + Send + 'static,
    U: Clone + PartialEq + Send + 'static,
    F: Fn(&[T]) -> U + Send + Sync + 'static,
{
    let values: Vec<T> = sources.iter().map(Readable::get).collect();
    let target = Writable::new(combine(values.as_slice()));
    let values = Arc::new(Mutex::new(values));
    let combine = Arc::new(combine);

    let upstream = sources
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let values = values.clone();
            let combine = combine.clone();
            let target = target.clone();
            source.subscribe(move |value: &T| {
                let next = {
                    let mut values = values.lock().expect("derived store mutex poisoned");
                    values[index] = value.clone();
                    combine(values.as_slice())
                };
                target.set(next);
            })
        })
        .collect();

    Readable::with_upstream(target, upstream)
}

/// [`derived`] over two sources of different types.
pub fn derived2<A, B, U, F>(a: &Readable<A>, b: &Readable<B>, combine: F) -> Readable<U>
where
    A: Clone + PartialEq + Send + 'static,
    B: Clone + PartialEq + Send + 'static,
    U: Clone + PartialEq + Send + 'static,
    F: Fn(&A, &B) -> U + Send + Sync + 'static,
{
    let pair = (a.get(), b.get());
    let target = Writable::new(combine(&pair.0, &pair.1));
    let pair = Arc::new(Mutex::new(pair));
    let combine = Arc::new(combine);

    let on_a = {
        let (pair, combine, target) = (pair.clone(), combine.clone(), target.clone());
        a.subscribe(move |value: &A| {
            let next = {
                let mut pair = pair.lock().expect("derived store mutex poisoned");
                pair.0 = value.clone();
                combine(&pair.0, &pair.1)
            };
            target.set(next);
        })
    };
    let on_b = {
        let (pair, combine, target) = (pair.clone(), combine.clone(), target.clone());
        b.subscribe(move |value: &B| {
            let next = {
                let mut pair = pair.lock().expect("derived store mutex poisoned");
                pair.1 = value.clone();
                combine(&pair.0, &pair.1)
            };
            target.set(next);
        })
    };

    Readable::with_upstream(target, vec![on_a, on_b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_sum() {
        let a = Writable::new(1);
        let b = Writable::new(2);
        let sum = derived(&[a.readable(), b.readable()], |v| v.iter().sum::<i32>());
        assert_eq!(sum.get(), 3);

        a.set(10);
        assert_eq!(sum.get(), 12);
        b.set(5);
        assert_eq!(sum.get(), 15);
    }

    #[test]
    fn test_derived_notifies_subscribers() {
        let a = Writable::new(1);
        let doubled = derived(&[a.readable()], |v| v[0] * 2);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = doubled.subscribe(move |v| sink.lock().unwrap().push(*v));

        a.set(2);
        a.set(2);
        a.set(3);
        assert_eq!(*seen.lock().unwrap(), vec![2, 4, 6]);
    }

    #[test]
    fn test_derived2_mixed_types() {
        let name = Writable::new("post".to_string());
        let count = Writable::new(1usize);
        let label = derived2(&name.readable(), &count.readable(), |n, c| format!("{n} x{c}"));
        assert_eq!(label.get(), "post x1");

        count.set(3);
        assert_eq!(label.get(), "post x3");
    }

    #[test]
    fn test_dropping_derived_releases_sources() {
        let a = Writable::new(1);
        let doubled = derived(&[a.readable()], |v| v[0] * 2);
        assert_eq!(a.subscriber_count(), 1);

        let clone = doubled.clone();
        drop(doubled);
        assert_eq!(a.subscriber_count(), 1);

        drop(clone);
        assert_eq!(a.subscriber_count(), 0);
    }

    #[test]
    fn test_chained_derivations() {
        let a = Writable::new(2);
        let squared = derived(&[a.readable()], |v| v[0] * v[0]);
        let plus_one = derived(&[squared.clone()], |v| v[0] + 1);

        a.set(3);
        assert_eq!(plus_one.get(), 10);
    }
}
