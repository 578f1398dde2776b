use std::fmt;

use ringbuffer::{ConstGenericRingBuffer, RingBuffer};

use super::types::Direction;

pub const MAX_PENDING_TURNS: usize = 2;

/// Turns requested between ticks, applied one per tick in arrival order.
pub struct DirectionBuffer {
    pending: ConstGenericRingBuffer<Direction, MAX_PENDING_TURNS>,
}

impl DirectionBuffer {
    pub fn new() -> Self {
        Self {
            pending: ConstGenericRingBuffer::new(),
        }
    }

    /// Queues `direction` unless the buffer is full or the turn would be a
    /// no-op or a reversal relative to the last direction the snake will face.
    pub fn request(&mut self, direction: Direction, current: Direction) -> bool {
        if self.pending.is_full() {
            return false;
        }

        let last = self.last_or(current);
        if direction == last || direction.is_opposite(&last) {
            return false;
        }

        let _ = self.pending.enqueue(direction);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.dequeue()
    }

    pub fn last_or(&self, current: Direction) -> Direction {
        self.pending.back().copied().unwrap_or(current)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Clone for DirectionBuffer {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        for direction in self.pending.iter() {
            let _ = copy.pending.enqueue(*direction);
        }
        copy
    }
}

impl fmt::Debug for DirectionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pending.iter()).finish()
    }
}

impl Default for DirectionBuffer {
    fn default() -> Self {
        Self::new()
    }
}
