//! Bounded double-ended queue over fixed storage.

/// Ring buffer holding at most `N` values.
///
/// Values are moved into a slot on [`push_back`] and moved out (or dropped) on
/// [`pop_front`]. The front is always the oldest value still queued.
///
/// [`push_back`]: StaticDeque::push_back
/// [`pop_front`]: StaticDeque::pop_front
pub struct StaticDeque<T, const N: usize> {
    slots: [Option<T>; N],
    head: usize,
    len: usize,
}

impl<T, const N: usize> StaticDeque<T, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            head: 0,
            len: 0,
        }
    }

    /// Appends a value at the back.
    ///
    /// # Errors
    /// Returns the value unchanged when the queue is full.
    pub fn push_back(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        let index = self.wrap(self.head + self.len);
        self.slots[index] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the oldest value.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = self.slots[self.head].take();
        self.head = self.wrap(self.head + 1);
        self.len -= 1;
        value
    }

    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.wrap(self.head + self.len - 1)].as_ref()
    }

    /// Iterates from front to back.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter {
            deque: self,
            offset: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drops every queued value.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
        self.head = 0;
    }

    fn wrap(&self, index: usize) -> usize {
        if index >= N { index - N } else { index }
    }
}

impl<T, const N: usize> Default for StaticDeque<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over a [`StaticDeque`].
pub struct Iter<'a, T, const N: usize> {
    deque: &'a StaticDeque<T, N>,
    offset: usize,
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.deque.len {
            return None;
        }

        let index = self.deque.wrap(self.deque.head + self.offset);
        self.offset += 1;
        self.deque.slots[index].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.deque.len - self.offset;
        (remaining, Some(remaining))
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a StaticDeque<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
