//! Tests for the lane ring buffer

use std::collections::VecDeque;

use prometheus_event_queue::core::SchedulerError;
use prometheus_event_queue::infra::queue::ring_buffer::RingBuffer;
use rand::Rng;

#[test]
fn test_shift_is_fifo_and_pop_is_lifo_for_remainder() {
    let mut ring = RingBuffer::new(5);
    ring.push_many(["a", "b", "c", "d", "e"]).unwrap();

    assert_eq!(ring.shift(), Some("a"));
    assert_eq!(ring.shift(), Some("b"));
    assert_eq!(ring.pop(), Some("e"));
    assert_eq!(ring.pop(), Some("d"));
    assert_eq!(ring.pop(), Some("c"));
    assert_eq!(ring.pop(), None);
}

#[test]
fn test_overflow_leaves_contents_unchanged() {
    let mut ring = RingBuffer::new(2);
    ring.push(1).unwrap();
    ring.push(2).unwrap();

    assert!(matches!(ring.push(3), Err(SchedulerError::Overflow { .. })));
    assert_eq!(ring.len(), 2);
    assert_eq!(ring.get(0), Some(&1));
    assert_eq!(ring.get(1), Some(&2));
}

#[test]
fn test_empty_reads_are_none() {
    let mut ring = RingBuffer::<String>::new(3);
    assert_eq!(ring.shift(), None);
    assert_eq!(ring.pop(), None);
    assert!(ring.get(0).is_none());
    assert!(ring.is_empty());
}

/// Random push/shift/pop sequences agree with a `VecDeque` model.
#[test]
fn test_matches_vecdeque_model() {
    let mut rng = rand::rng();

    for _ in 0..200 {
        let capacity = rng.random_range(1..8);
        let mut ring = RingBuffer::new(capacity);
        let mut model = VecDeque::new();

        for step in 0..100_u32 {
            match rng.random_range(0..4) {
                0 => {
                    let count = rng.random_range(0..3);
                    let items: Vec<u32> = (0..count).map(|i| step * 10 + i).collect();
                    let fits = model.len() + items.len() <= capacity;
                    let result = ring.push_many(items.clone());
                    assert_eq!(result.is_ok(), fits);
                    if fits {
                        model.extend(items);
                        assert_eq!(result.unwrap(), model.len());
                    }
                }
                1 => assert_eq!(ring.shift(), model.pop_front()),
                2 => assert_eq!(ring.pop(), model.pop_back()),
                _ => {
                    let index = rng.random_range(0..capacity);
                    assert_eq!(ring.get(index), model.get(index));
                }
            }
            assert_eq!(ring.len(), model.len());
            assert!(ring.len() <= ring.capacity());
        }

        assert!(ring.iter().eq(model.iter()));
    }
}
