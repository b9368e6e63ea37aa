// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node registry.
//!
//! ## Overview
//!
//! The [`Manager`] owns every [`SortableNode`] of one sortable scope. Nodes
//! register on mount and unregister on unmount. Removal is keyed by the
//! [`NodeKey`] handed out at registration, never by position, so siblings
//! unmounting in any order cannot make a later removal hit the wrong node.
//!
//! ## Invariants
//!
//! - Keys are unique and never reused for a different node (generational slots).
//! - `(collection, index)` is unique across live nodes.
//! - At most one node is active; unregistering it clears the active entry.
//!
//! Positions are indexed, so [`Manager::register`] and [`Manager::find`] never
//! scan the slots.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::node::SortableNode;
use crate::types::{Collection, NodeKey};

/// The node currently being dragged.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Active {
    /// Key of the node.
    pub key: NodeKey,
    /// Its collection.
    pub collection: Collection,
    /// Its index when it became active.
    pub index: usize,
}

/// Rejected registry update.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// Another live node already occupies this position.
    #[error("collection {collection:?} already has a node at index {index}")]
    DuplicateIndex {
        /// Collection of the conflicting node.
        collection: Collection,
        /// Conflicting index.
        index: usize,
    },
    /// The key no longer refers to a registered node.
    #[error("stale node key {0:?}")]
    StaleKey(NodeKey),
}

#[derive(Clone, Debug)]
struct Slot<N> {
    generation: u32,
    node: SortableNode<N>,
}

/// Registry of sortable nodes for one scope.
#[derive(Clone, Debug)]
pub struct Manager<N> {
    slots: Vec<Option<Slot<N>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    positions: BTreeMap<(Collection, usize), NodeKey>,
    len: usize,
    active: Option<Active>,
}

impl<N> Default for Manager<N> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            positions: BTreeMap::new(),
            len: 0,
            active: None,
        }
    }
}

impl<N: Copy + PartialEq> Manager<N> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node. Fails if its `(collection, index)` is taken.
    pub fn register(&mut self, node: SortableNode<N>) -> Result<NodeKey, RegistryError> {
        let position = (node.collection(), node.index());
        if self.positions.contains_key(&position) {
            return Err(RegistryError::DuplicateIndex {
                collection: position.0,
                index: position.1,
            });
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot { generation, node });
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot { generation, node }));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        let key = key_at(idx, generation);
        self.positions.insert(position, key);
        self.len += 1;
        Ok(key)
    }

    /// Remove a node by identity. Stale keys are ignored.
    pub fn unregister(&mut self, key: NodeKey) -> Option<SortableNode<N>> {
        self.slot(key)?;
        let slot = self.slots[key.idx()].take()?;
        self.free_list.push(key.idx());
        self.positions.remove(&(slot.node.collection(), slot.node.index()));
        self.len -= 1;
        if self.active.is_some_and(|a| a.key == key) {
            self.active = None;
        }
        Some(slot.node)
    }

    /// Whether `key` refers to a registered node.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.slot(key).is_some()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no node is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered node for `key`.
    pub fn get(&self, key: NodeKey) -> Option<&SortableNode<N>> {
        self.slot(key).map(|s| &s.node)
    }

    /// Registered node for `key`, mutably.
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut SortableNode<N>> {
        let s = self.slots.get_mut(key.idx())?.as_mut()?;
        if s.generation != key.1 {
            return None;
        }
        Some(&mut s.node)
    }

    /// All registered nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SortableNode<N>)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            let s = s.as_ref()?;
            Some((key_at(i, s.generation), &s.node))
        })
    }

    /// All registered nodes in slot order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeKey, &mut SortableNode<N>)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let s = s.as_mut()?;
            Some((key_at(i, s.generation), &mut s.node))
        })
    }

    /// Key of the node at `index` in `collection`.
    pub fn find(&self, collection: Collection, index: usize) -> Option<NodeKey> {
        self.positions.get(&(collection, index)).copied()
    }

    /// Keys of `collection`, sorted by index.
    pub fn ordered(&self, collection: Collection) -> Vec<NodeKey> {
        self.positions
            .range((collection, 0)..=(collection, usize::MAX))
            .map(|(_, k)| *k)
            .collect()
    }

    /// Mark `key` as the active node, or clear with `None`.
    ///
    /// Returns false (and clears) if the key is stale.
    pub fn set_active(&mut self, key: Option<NodeKey>) -> bool {
        self.active = key.and_then(|key| {
            self.get(key).map(|n| Active {
                key,
                collection: n.collection(),
                index: n.index(),
            })
        });
        self.active.is_some() == key.is_some()
    }

    /// The active entry and its node.
    pub fn get_active(&self) -> Option<(Active, &SortableNode<N>)> {
        let active = self.active?;
        Some((active, self.get(active.key)?))
    }

    /// Whether a node is active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Enable or disable dragging of a node.
    pub fn set_disabled(&mut self, key: NodeKey, disabled: bool) -> Result<(), RegistryError> {
        let node = self.get_mut(key).ok_or(RegistryError::StaleKey(key))?;
        node.set_disabled(disabled);
        Ok(())
    }

    /// Move a node to a new index. Fails if the target is taken by another node.
    pub fn set_index(&mut self, key: NodeKey, index: usize) -> Result<(), RegistryError> {
        let collection = self
            .get(key)
            .ok_or(RegistryError::StaleKey(key))?
            .collection();
        if self.find(collection, index).is_some_and(|other| other != key) {
            return Err(RegistryError::DuplicateIndex { collection, index });
        }
        if let Some(node) = self.get_mut(key) {
            let old = node.index();
            node.set_index(index);
            self.positions.remove(&(collection, old));
            self.positions.insert((collection, index), key);
        }
        Ok(())
    }

    /// Shift indices as if the item at `from` was removed and reinserted at `to`.
    ///
    /// Applied to all nodes of `collection` at once, so uniqueness holds throughout.
    /// Returns false if no node sits at `from`.
    pub fn apply_move(&mut self, collection: Collection, from: usize, to: usize) -> bool {
        if self.find(collection, from).is_none() {
            return false;
        }
        let mut moved_keys = Vec::new();
        for (key, node) in self.iter_mut() {
            if node.collection() != collection {
                continue;
            }
            let i = node.index();
            let moved = if i == from {
                to
            } else if from < to && i > from && i <= to {
                i - 1
            } else if to < from && i >= to && i < from {
                i + 1
            } else {
                i
            };
            node.set_index(moved);
            moved_keys.push((moved, key));
        }
        self.positions.retain(|(c, _), _| *c != collection);
        self.positions.extend(moved_keys.into_iter().map(|(i, k)| ((collection, i), k)));
        if let Some(active) = self.active.as_mut() {
            if let Some(node) = self.slots[active.key.idx()].as_ref() {
                active.index = node.node.index();
            }
        }
        true
    }

    fn slot(&self, key: NodeKey) -> Option<&Slot<N>> {
        let s = self.slots.get(key.idx())?.as_ref()?;
        (s.generation == key.1).then_some(s)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "NodeKey stores 32-bit slot indices."
)]
fn key_at(idx: usize, generation: u32) -> NodeKey {
    NodeKey::new(idx as u32, generation)
}
