use std::ops::{Deref, DerefMut};

/// A byte region handed to the vision engine.
///
/// Direct buffers have a fixed address for their whole lifetime, so the engine
/// may read and write them in place. Growable storage such as `Vec<u8>` is not
/// direct and is refused by the entry points that require zero-copy access.
pub trait FrameBuffer {
    fn capacity(&self) -> usize;

    fn is_direct(&self) -> bool;

    fn bytes(&self) -> &[u8];

    fn bytes_mut(&mut self) -> &mut [u8];
}

/// Fixed-size, zero-initialized buffer allocated once and reused across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectBuffer {
    data: Box<[u8]>,
}

impl DirectBuffer {
    pub fn allocate(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
        }
    }
}

impl Deref for DirectBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for DirectBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl FrameBuffer for DirectBuffer {
    fn capacity(&self) -> usize {
        self.data.len()
    }

    fn is_direct(&self) -> bool {
        true
    }

    fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl FrameBuffer for Vec<u8> {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn is_direct(&self) -> bool {
        false
    }

    fn bytes(&self) -> &[u8] {
        self
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}
