// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Slot arena backing the mesh's vertex, edge and face collections.
//
// Records refer to each other by u32 slot index instead of by pointer.
// Freed slots are tombstoned (set to None) and recycled through a free list,
// so indices of live records never move.

use std::ops::{Index, IndexMut};

/// A Vec-backed arena with slot recycling.
#[derive(Clone, Debug)]
pub struct Arena<T> {
    items: Vec<Option<T>>,
    free_list: Vec<u32>,
    live: usize,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Store `value`, reusing the most recently freed slot if there is one.
    pub fn alloc(&mut self, value: T) -> u32 {
        self.live += 1;
        if let Some(idx) = self.free_list.pop() {
            self.items[idx as usize] = Some(value);
            idx
        } else {
            let idx = self.items.len() as u32;
            self.items.push(Some(value));
            idx
        }
    }

    /// Free a slot, handing back its value. Freeing a dead slot is a no-op.
    pub fn free(&mut self, idx: u32) -> Option<T> {
        let value = self.items.get_mut(idx as usize)?.take()?;
        self.free_list.push(idx);
        self.live -= 1;
        Some(value)
    }

    pub fn get(&self, idx: u32) -> Option<&T> {
        self.items.get(idx as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut T> {
        self.items.get_mut(idx as usize)?.as_mut()
    }

    #[inline]
    pub fn contains(&self, idx: u32) -> bool {
        self.get(idx).is_some()
    }

    /// Number of live slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Number of slots ever allocated, live or dead. Slot indices are below this.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.items.len()
    }

    /// Live slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i as u32, v)))
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<u32> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: u32) -> &T {
        match self.items.get(idx as usize) {
            Some(Some(v)) => v,
            _ => panic!("arena slot {} is not live", idx),
        }
    }
}

impl<T> IndexMut<u32> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, idx: u32) -> &mut T {
        match self.items.get_mut(idx as usize) {
            Some(Some(v)) => v,
            _ => panic!("arena slot {} is not live", idx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_free() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(10);
        let b = arena.alloc(20);
        assert_ne!(a, b);
        assert_eq!(arena.free(a), Some(10));
        let c = arena.alloc(30);
        // c should reuse a's slot
        assert_eq!(c, a);
        assert_eq!(arena[c], 30);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn double_free_is_noop() {
        let mut arena: Arena<i32> = Arena::new();
        let idx = arena.alloc(1);
        assert!(arena.free(idx).is_some());
        assert!(arena.free(idx).is_none());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn get_after_free_returns_none() {
        let mut arena: Arena<i32> = Arena::new();
        let idx = arena.alloc(5);
        arena.free(idx);
        assert!(arena.get(idx).is_none());
        assert!(!arena.contains(idx));
    }

    #[test]
    fn iter_skips_dead_slots() {
        let mut arena: Arena<char> = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        let c = arena.alloc('c');
        arena.free(b);
        let live: Vec<_> = arena.iter().collect();
        assert_eq!(live, vec![(a, &'a'), (c, &'c')]);
    }

    #[test]
    #[should_panic(expected = "not live")]
    fn index_dead_slot_panics() {
        let mut arena: Arena<i32> = Arena::new();
        let idx = arena.alloc(0);
        arena.free(idx);
        let _ = arena[idx];
    }
}
