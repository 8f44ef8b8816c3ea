use crate::color::Rgb;
use nalgebra::Vector2;
use std::collections::VecDeque;

pub const MAX_TRAIL_LENGTH: usize = 10000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSegment {
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
    pub color: Rgb,
}

/// Most recent trail segments, oldest first. Pushing past capacity evicts
/// from the front.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailBuffer {
    segments: VecDeque<TrailSegment>,
    capacity: usize,
}

impl Default for TrailBuffer {
    fn default() -> Self {
        TrailBuffer::with_capacity(MAX_TRAIL_LENGTH)
    }
}

impl TrailBuffer {
    pub fn with_capacity(capacity: usize) -> TrailBuffer {
        TrailBuffer {
            // Grows on demand; a full default trail is ~10k segments.
            segments: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Appends a segment, returning the evicted one if the buffer was full.
    pub fn push(&mut self, segment: TrailSegment) -> Option<TrailSegment> {
        self.segments.push_back(segment);
        if self.segments.len() > self.capacity {
            return self.segments.pop_front();
        }
        None
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn latest(&self) -> Option<&TrailSegment> {
        self.segments.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailSegment> + '_ {
        self.segments.iter()
    }
}
