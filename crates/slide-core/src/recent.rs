/// Fixed-capacity ring buffer of recently visited empty-tile coordinates.
///
/// Inserting a coordinate that is already present is a no-op; once the
/// buffer is full, inserting a new coordinate evicts the oldest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCoords {
    slots: Box<[usize]>,
    /// Index of the oldest entry
    head: usize,
    len: usize,
}

impl RecentCoords {
    /// Smallest capacity drawn for a fresh arrangement
    pub const MIN_CAPACITY: usize = 4;
    /// Largest capacity drawn for a fresh arrangement
    pub const MAX_CAPACITY: usize = 10;

    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity.max(1)].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, coord: usize) -> bool {
        self.iter().any(|c| c == coord)
    }

    /// Record `coord`. Returns false if it was already present.
    pub fn push(&mut self, coord: usize) -> bool {
        if self.contains(coord) {
            return false;
        }
        let cap = self.capacity();
        if self.len == cap {
            self.slots[self.head] = coord;
            self.head = (self.head + 1) % cap;
        } else {
            self.slots[(self.head + self.len) % cap] = coord;
            self.len += 1;
        }
        true
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let cap = self.capacity();
        (0..self.len).map(move |i| self.slots[(self.head + i) % cap])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_contains() {
        let mut recent = RecentCoords::with_capacity(4);
        assert!(recent.is_empty());
        assert!(recent.push(3));
        assert!(recent.push(7));
        assert!(recent.contains(3));
        assert!(recent.contains(7));
        assert!(!recent.contains(5));
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_dedup_on_insert() {
        let mut recent = RecentCoords::with_capacity(4);
        recent.push(1);
        recent.push(2);
        assert!(!recent.push(1));
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut recent = RecentCoords::with_capacity(4);
        for coord in 1..=6 {
            recent.push(coord);
        }
        assert_eq!(recent.len(), 4);
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
        assert!(!recent.contains(1));
        assert!(!recent.contains(2));

        // A duplicate does not refresh its position
        recent.push(4);
        recent.push(9);
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec![4, 5, 6, 9]);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut recent = RecentCoords::with_capacity(0);
        assert_eq!(recent.capacity(), 1);
        recent.push(5);
        recent.push(6);
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec![6]);
    }

    #[test]
    fn test_clear() {
        let mut recent = RecentCoords::with_capacity(5);
        recent.push(1);
        recent.push(2);
        recent.clear();
        assert!(recent.is_empty());
        assert!(!recent.contains(1));
        assert!(recent.push(1));
    }
}
