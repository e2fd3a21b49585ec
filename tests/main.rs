use std::cmp::Ordering;

use keyed_heap::{HeapError, KeyedHeap, MaxHeap, MinHeap, MinOrder};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

fn sorted<T: Clone, K: Clone + PartialOrd, F, O>(heap: &KeyedHeap<T, K, F, O>) -> Vec<T> {
    heap.iter().collect::<Result<_, _>>().unwrap()
}

#[test]
fn test_min_scenario() {
    let mut heap = MinHeap::from_items([5, 1, 3]).unwrap();
    assert_eq!(heap.peek(), Some(&1));
    assert_eq!(heap.pop(), Ok(1));
    assert_eq!(heap.pop(), Ok(3));
    assert_eq!(heap.pop(), Ok(5));
    assert!(heap.is_empty());
    assert_eq!(heap.pop(), Err(HeapError::Empty));
}

#[test]
fn test_max_scenario() {
    let mut heap = MaxHeap::from_items([5, 1, 3]).unwrap();
    assert_eq!(heap.peek(), Some(&5));
    assert_eq!(heap.pop(), Ok(5));
    assert_eq!(heap.pop(), Ok(3));
    assert_eq!(heap.pop(), Ok(1));
    assert_eq!(heap.pop(), Err(HeapError::Empty));
}

#[test]
fn test_key_by_length() {
    let heap = MinHeap::from_items_with_key(["bb", "a", "ccc"], |s: &&str| s.len()).unwrap();
    assert_eq!(sorted(&heap), ["a", "bb", "ccc"]);
    assert_eq!(heap.size(), 3);
}

#[test]
fn test_pushpop_on_empty() {
    let mut heap = MinHeap::new();
    assert_eq!(heap.pushpop(10), Ok(10));
    assert_eq!(heap.size(), 0);

    let mut heap = MaxHeap::new();
    assert_eq!(heap.pushpop(10), Ok(10));
    assert_eq!(heap.size(), 0);
}

#[test]
fn test_peek_and_pop() {
    let data = vec![2, 4, 6, 2, 1, 8, 10, 3, 5, 7, 0, 9, 1];
    let mut sorted = data.clone();
    sorted.sort();
    sorted.reverse();
    let mut heap = MinHeap::from_items(data).unwrap();
    while !heap.is_empty() {
        let len = heap.len();
        assert_eq!(heap.peek().copied(), sorted.last().copied());
        assert_eq!(heap.len(), len);
        assert_eq!(heap.pop().ok(), sorted.pop());
    }
}

#[test]
fn test_empty_peek() {
    let empty = MinHeap::<i32>::new();
    assert!(empty.peek().is_none());
    let empty = MaxHeap::<i32>::default();
    assert!(empty.peek().is_none());
}

#[test]
fn test_push() {
    let mut heap = MaxHeap::from_items(vec![2, 4, 9]).unwrap();
    assert_eq!(heap.len(), 3);
    assert!(*heap.peek().unwrap() == 9);
    heap.push(11).unwrap();
    assert_eq!(heap.len(), 4);
    assert!(*heap.peek().unwrap() == 11);
    heap.push(5).unwrap();
    assert_eq!(heap.len(), 5);
    assert!(*heap.peek().unwrap() == 11);
    heap.push(27).unwrap();
    assert_eq!(heap.len(), 6);
    assert!(*heap.peek().unwrap() == 27);
    heap.push(3).unwrap();
    assert_eq!(heap.len(), 7);
    assert!(*heap.peek().unwrap() == 27);
    heap.push(103).unwrap();
    assert_eq!(heap.len(), 8);
    assert!(*heap.peek().unwrap() == 103);
    assert!(heap.check_integrity());
}

#[test]
fn test_push_unique() {
    let mut heap = MinHeap::from_items(vec![Box::new(9), Box::new(4), Box::new(2)]).unwrap();
    assert_eq!(heap.len(), 3);
    assert!(**heap.peek().unwrap() == 2);
    heap.push(Box::new(1)).unwrap();
    assert_eq!(heap.len(), 4);
    assert!(**heap.peek().unwrap() == 1);
    heap.push(Box::new(5)).unwrap();
    assert_eq!(heap.len(), 5);
    assert!(**heap.peek().unwrap() == 1);
    heap.push(Box::new(-3)).unwrap();
    assert_eq!(heap.len(), 6);
    assert!(**heap.peek().unwrap() == -3);
}

fn check_to_vec(mut data: Vec<i32>) {
    let heap = MinHeap::from_items(data.clone()).unwrap();
    let mut v: Vec<i32> = heap.clone().into_vec();
    v.sort();
    data.sort();

    assert_eq!(v, data);
    assert_eq!(sorted(&heap), data);
    assert_eq!(heap.into_sorted_vec().unwrap(), data);
}

#[test]
fn test_to_vec() {
    check_to_vec(vec![]);
    check_to_vec(vec![5]);
    check_to_vec(vec![3, 2]);
    check_to_vec(vec![2, 3]);
    check_to_vec(vec![5, 1, 2]);
    check_to_vec(vec![1, 100, 2, 3]);
    check_to_vec(vec![1, 3, 5, 7, 9, 2, 4, 6, 8, 0]);
    check_to_vec(vec![2, 4, 6, 2, 1, 8, 10, 3, 5, 7, 0, 9, 1]);
    check_to_vec(vec![9, 11, 9, 9, 9, 9, 11, 2, 3, 4, 11, 9, 0, 0, 0, 0]);
    check_to_vec(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    check_to_vec(vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    check_to_vec(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 0, 0, 1, 2]);
    check_to_vec(vec![5, 4, 3, 2, 1, 5, 4, 3, 2, 1, 5, 4, 3, 2, 1]);
}

#[test]
fn test_iter_is_repeatable() {
    let mut heap = MinHeap::from_items([7, 3, 9, 1]).unwrap();

    let mut it = heap.iter();
    assert_eq!(it.size_hint(), (1, Some(4)));
    assert_eq!(it.next(), Some(Ok(1)));
    assert_eq!(it.next(), Some(Ok(3)));

    heap.push(0).unwrap();

    // The first snapshot does not see the push.
    assert_eq!(it.collect::<Vec<_>>(), [Ok(7), Ok(9)]);
    assert_eq!(sorted(&heap), [0, 1, 3, 7, 9]);
    assert_eq!(sorted(&heap), [0, 1, 3, 7, 9]);
    assert_eq!(heap.size(), 5);
}

#[test]
fn test_iter_ref() {
    let heap = MaxHeap::from_items([2, 8, 5]).unwrap();
    let mut out = vec![];
    for x in &heap {
        out.push(x.unwrap());
    }
    assert_eq!(out, [8, 5, 2]);
}

#[test]
fn test_into_iter_sorted_collect() {
    let heap = MaxHeap::from_items(vec![2, 4, 6, 2, 1, 8, 10, 3, 5, 7, 0, 9, 1]).unwrap();
    let it = heap.into_iter_sorted();
    let sorted = it.collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(sorted, vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 2, 1, 1, 0]);
}

#[test]
fn test_capacity() {
    let mut heap = MinHeap::with_capacity(16);
    assert!(heap.capacity() >= 16);
    heap.try_extend(0..10).unwrap();
    assert_eq!(heap.len(), 10);
    heap.shrink_to_fit();
    assert!(heap.capacity() >= 10);
    heap.reserve(3);
    assert!(heap.capacity() >= 13);
    assert_eq!(heap.len(), 10);
}

#[test]
fn test_equal_keys_keep_insertion_order() {
    #[derive(Debug, Clone, PartialEq)]
    struct Job {
        name: &'static str,
        prio: u8,
    }

    // `Job` has no ordering of its own; only its key is compared.
    let jobs = [
        Job { name: "a", prio: 2 },
        Job { name: "b", prio: 1 },
        Job { name: "c", prio: 2 },
        Job { name: "d", prio: 1 },
        Job { name: "e", prio: 2 },
    ];
    let heap = MinHeap::from_items_with_key(jobs.clone(), |j: &Job| j.prio).unwrap();
    let names: Vec<_> = sorted(&heap).into_iter().map(|j| j.name).collect();
    assert_eq!(names, ["b", "d", "a", "c", "e"]);

    let heap = MaxHeap::from_items_with_key(jobs, |j: &Job| i16::from(j.prio)).unwrap();
    let names: Vec<_> = sorted(&heap).into_iter().map(|j| j.name).collect();
    assert_eq!(names, ["a", "c", "e", "b", "d"]);
}

#[test]
fn test_incomparable_keys() {
    let mut heap = MinHeap::from_items([2.0, 1.0, 3.0]).unwrap();
    assert_eq!(heap.push(f64::NAN), Err(HeapError::Incomparable));
    assert_eq!(heap.pushpop(f64::NAN), Err(HeapError::Incomparable));
    assert_eq!(heap.len(), 3);
    assert!(heap.check_integrity());
    assert_eq!(sorted(&heap), [1.0, 2.0, 3.0]);
}

// `Base` sits below both branches, which have no order between them.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Fork {
    Base,
    Left,
    Right,
}

impl PartialOrd for Fork {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (a, b) if a == b => Some(Ordering::Equal),
            (Fork::Base, _) => Some(Ordering::Less),
            (_, Fork::Base) => Some(Ordering::Greater),
            _ => None,
        }
    }
}

#[test]
fn test_incomparable_pop() {
    let mut heap = MinHeap::from_items([Fork::Base, Fork::Left, Fork::Right]).unwrap();
    assert_eq!(format!("{:?}", heap), "[Base, Left, Right]");

    // The snapshot fails on its first step and then stays exhausted.
    let mut it = heap.iter();
    assert_eq!(it.next(), Some(Err(HeapError::Incomparable)));
    assert_eq!(it.next(), None);
    assert_eq!(heap.iter().collect::<Vec<_>>(), [Err(HeapError::Incomparable)]);

    assert_eq!(heap.pop(), Err(HeapError::Incomparable));
    assert_eq!(format!("{:?}", heap), "[Base, Left, Right]");
    assert_eq!(heap.len(), 3);
    assert_eq!(heap.peek(), Some(&Fork::Base));
    assert!(heap.check_integrity());

    let mut sorted = heap.into_iter_sorted();
    assert_eq!(sorted.next(), Some(Err(HeapError::Incomparable)));
    assert_eq!(sorted.next(), None);
}

#[test]
fn test_incomparable_during_construction() {
    let res = MinHeap::from_items([1.0, f64::NAN]);
    assert_eq!(res.map(|h| h.len()), Err(HeapError::Incomparable));

    let mut heap = MinHeap::new();
    assert_eq!(heap.try_extend([1.0, 2.0, f64::NAN, 0.5]), Err(HeapError::Incomparable));
    assert_eq!(heap.len(), 2);
}

#[test]
fn test_unnegatable_key() {
    let mut heap = MaxHeap::from_items([1, -4]).unwrap();
    assert_eq!(heap.push(i32::MIN), Err(HeapError::Unnegatable));
    assert_eq!(heap.pushpop(i32::MIN), Err(HeapError::Unnegatable));
    assert_eq!(heap.len(), 2);

    // The same key is fine in a min-heap.
    let mut heap = MinHeap::from_items([1, -4]).unwrap();
    heap.push(i32::MIN).unwrap();
    assert_eq!(heap.pop(), Ok(i32::MIN));
}

#[test]
fn test_max_float_keys() {
    let heap = MaxHeap::from_items_with_key(
        vec![("x", 0.5), ("y", -1.25), ("z", 3.0)],
        |p: &(&str, f64)| p.1,
    )
    .unwrap();
    let names: Vec<_> = sorted(&heap).into_iter().map(|p| p.0).collect();
    assert_eq!(names, ["z", "x", "y"]);
}

#[test]
fn test_clone_is_independent() {
    let mut a = MinHeap::from_items([3, 1, 2]).unwrap();
    let b = a.clone();
    a.pop().unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 3);
    assert_eq!(b.peek(), Some(&1));
}

#[test]
fn test_debug_lists_elements() {
    let heap = MinHeap::from_items([1]).unwrap();
    assert_eq!(format!("{:?}", heap), "[1]");
}

fn last_digit(x: &u32) -> u32 {
    x % 10
}

#[test]
fn test_explicit_order_parameter() {
    let mut heap: KeyedHeap<u32, u32, fn(&u32) -> u32, MinOrder> =
        KeyedHeap::with_key(last_digit as fn(&u32) -> u32);
    heap.try_extend([21, 13, 5, 40]).unwrap();
    assert_eq!(sorted(&heap), [40, 21, 13, 5]);
}

#[test]
fn test_random_workload() {
    let mut rng = XorShiftRng::seed_from_u64(0x5eed);
    let mut heap = MaxHeap::new();
    let mut model: Vec<i64> = Vec::new();

    for _ in 0..2000 {
        match rng.gen_range(0, 3) {
            0 => {
                let x = rng.gen_range(-1000, 1000);
                heap.push(x).unwrap();
                model.push(x);
            }
            1 => {
                model.sort();
                assert_eq!(heap.pop().ok(), model.pop());
            }
            _ => {
                let x = rng.gen_range(-1000, 1000);
                model.push(x);
                model.sort();
                assert_eq!(heap.pushpop(x).ok(), model.pop());
            }
        }
        assert_eq!(heap.len(), model.len());
        assert!(heap.check_integrity());
    }

    model.sort();
    model.reverse();
    assert_eq!(sorted(&heap), model);
}
