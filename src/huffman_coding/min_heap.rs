//! A 0-indexed binary min-heap. Only used while a Huffman tree is being built, so it is kept
//! deliberately small: no decrease-key, no iteration.

/// Binary min-heap ordered by `T: Ord`. The smallest element sits at index 0; the parent of
/// index `i` is `(i - 1) / 2` and its children are `2i + 1` and `2i + 2`.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    /// Create an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Build a heap from an arbitrary vec with a bottom-up heapify, starting at the last parent.
    pub fn build(source: Vec<T>) -> Self {
        let mut heap = MinHeap { elements: source };
        let n = heap.len();
        if n > 1 {
            for i in (0..=parent(n - 1)).rev() {
                heap.sift_down(i);
            }
        }
        debug_assert!(heap.is_valid());
        heap
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The smallest element, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Append the element and sift it up past every larger parent.
    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let mut i = self.len() - 1;
        while i > 0 {
            let p = parent(i);
            if self.elements[i] >= self.elements[p] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    /// Remove and return the smallest element: swap the root with the last element, shrink,
    /// then sift the new root down.
    pub fn pop_min(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let last = self.len() - 1;
        self.elements.swap(0, last);
        let result = self.elements.pop();
        self.sift_down(0);
        result
    }

    /// Push the element at `i` down until neither child is smaller, promoting the smaller child.
    fn sift_down(&mut self, mut i: usize) {
        let n = self.len();
        loop {
            let l = 2 * i + 1;
            let r = l + 1;
            let mut smallest = i;
            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    /// True when every element is no smaller than its parent.
    pub fn is_valid(&self) -> bool {
        (1..self.len()).all(|i| self.elements[parent(i)] <= self.elements[i])
    }
}

#[inline(always)]
fn parent(i: usize) -> usize {
    assert!(i > 0, "the root has no parent");
    (i - 1) / 2
}
