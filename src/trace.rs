//! Bounded trail of recent distal-bob positions.

use std::collections::VecDeque;

use crate::basic_structs::Vector2D;

/// Trail length kept per trajectory.
pub const TRACE_CAPACITY: usize = 200;

/// FIFO of the most recent points, oldest first.
///
/// Only [`push`](Self::push) and [`clear`](Self::clear) mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceBuffer {
    capacity: usize,
    points: VecDeque<Vector2D>,
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new(TRACE_CAPACITY)
    }
}

impl TraceBuffer {
    /// Capacity is at least one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends `point`, evicting the oldest entry once over capacity.
    pub fn push(&mut self, point: Vector2D) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Points in chronological order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Vector2D> + '_ {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<Vector2D> {
        self.points.back().copied()
    }

    pub fn to_vec(&self) -> Vec<Vector2D> {
        self.points.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(i: usize) -> Vector2D {
        Vector2D::new(i as f64, -(i as f64))
    }

    #[test]
    fn keeps_last_two_hundred_in_order() {
        let mut trace = TraceBuffer::default();
        for i in 0..500 {
            trace.push(point(i));
        }
        assert_eq!(trace.len(), 200);
        let expected: Vec<_> = (300..500).map(point).collect();
        assert_eq!(trace.to_vec(), expected);
        assert_eq!(trace.latest(), Some(point(499)));
    }

    #[test]
    fn below_capacity_nothing_is_evicted() {
        let mut trace = TraceBuffer::new(5);
        for i in 0..3 {
            trace.push(point(i));
        }
        assert_eq!(trace.iter().copied().collect::<Vec<_>>(), vec![point(0), point(1), point(2)]);
    }

    #[test]
    fn clear_empties() {
        let mut trace = TraceBuffer::default();
        trace.push(point(1));
        trace.clear();
        assert!(trace.is_empty());
        assert_eq!(trace.latest(), None);
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut trace = TraceBuffer::new(0);
        trace.push(point(1));
        trace.push(point(2));
        assert_eq!(trace.capacity(), 1);
        assert_eq!(trace.to_vec(), vec![point(2)]);
    }
}
