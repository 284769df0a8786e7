//! Endless tile sequence
//!
//! Tiles are kept in a contiguous window ordered by index. New tiles are
//! appended as the head advances; old tiles are evicted only once they are
//! behind both the head and the camera.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Tile, TileKind};

/// Source of tile kinds. Any `rand::Rng` draws a fair coin per tile.
pub trait TileSource {
    fn next_kind(&mut self, index: u32) -> TileKind;
}

impl<R: Rng + ?Sized> TileSource for R {
    fn next_kind(&mut self, _index: u32) -> TileKind {
        if self.random_bool(0.5) {
            TileKind::Enemy
        } else {
            TileKind::Gap
        }
    }
}

/// Replays a fixed pattern of kinds, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedTiles {
    kinds: Vec<TileKind>,
    cursor: usize,
}

impl ScriptedTiles {
    /// An empty pattern yields `Enemy` forever
    pub fn new(kinds: impl Into<Vec<TileKind>>) -> Self {
        Self {
            kinds: kinds.into(),
            cursor: 0,
        }
    }
}

impl TileSource for ScriptedTiles {
    fn next_kind(&mut self, _index: u32) -> TileKind {
        if self.kinds.is_empty() {
            return TileKind::Enemy;
        }
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor += 1;
        kind
    }
}

/// Camera-relative facts the window needs to decide what is safe to drop
#[derive(Debug, Clone, Copy)]
pub struct WindowView {
    /// Tile the player must resolve next
    pub head: u32,
    /// Current (interpolated) camera depth
    pub camera_depth: f32,
    pub tile_spacing: f32,
    pub fov: f32,
    pub lookahead: u32,
    pub cap: usize,
}

/// The active tile window
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileSequencer {
    tiles: VecDeque<Tile>,
    last_spawned: Option<u32>,
}

impl TileSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the tile for `index` without inserting it
    pub fn generate_next(index: u32, source: &mut dyn TileSource) -> Tile {
        Tile::new(index, source.next_kind(index))
    }

    /// Drop everything and pre-populate indices `0..lookahead`
    pub fn seed(&mut self, source: &mut dyn TileSource, lookahead: u32) {
        self.tiles.clear();
        self.last_spawned = None;
        for index in 0..lookahead {
            self.spawn(index, source);
        }
    }

    fn spawn(&mut self, index: u32, source: &mut dyn TileSource) {
        let tile = Self::generate_next(index, source);
        self.tiles.push_back(tile);
        self.last_spawned = Some(index);
    }

    /// Top up tiles ahead of the head, then evict stale tiles past the cap
    pub fn maintain_window(&mut self, view: WindowView, source: &mut dyn TileSource) {
        let wanted_last = view.head + view.lookahead.saturating_sub(1);
        loop {
            let next = match self.last_spawned {
                Some(last) if last >= wanted_last => break,
                Some(last) => last + 1,
                None => 0,
            };
            self.spawn(next, source);
        }

        while self.tiles.len() > view.cap {
            let Some(front) = self.tiles.front() else {
                break;
            };
            let behind_head = front.index < view.head;
            let behind_view = front.depth(view.tile_spacing) - view.camera_depth <= -view.fov;
            if !(behind_head && behind_view) {
                log::debug!(
                    "Window over cap ({} tiles) but tile {} is still in view",
                    self.tiles.len(),
                    front.index
                );
                break;
            }
            if let Some(evicted) = self.tiles.pop_front() {
                debug_assert!(
                    evicted.index < view.head,
                    "evicted tile {} at or ahead of head {}",
                    evicted.index,
                    view.head
                );
            }
        }
    }

    /// Tile at `index`, if it is in the window
    pub fn get(&self, index: u32) -> Option<&Tile> {
        let front = self.tiles.front()?.index;
        let offset = index.checked_sub(front)? as usize;
        self.tiles.get(offset).filter(|t| t.index == index)
    }

    pub fn last_spawned_index(&self) -> Option<u32> {
        self.last_spawned
    }

    pub fn front_index(&self) -> Option<u32> {
        self.tiles.front().map(|t| t.index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
