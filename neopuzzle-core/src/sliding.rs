use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A size x size sliding-tile board. Tiles are a permutation of 0..size^2
/// with 0 as the gap; the goal ordering is [1, 2, .., size^2 - 1, 0].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlidingBoard {
    size: usize,
    tiles: Vec<u8>,
    empty: usize,
}

impl SlidingBoard {
    /// The solved board. `size` must be in 2..=10.
    pub fn goal(size: usize) -> Self {
        debug_assert!((2..=10).contains(&size));
        let n = size * size;
        let mut tiles: Vec<u8> = (1..n as u8).collect();
        tiles.push(0);
        Self { size, tiles, empty: n - 1 }
    }

    pub fn from_tiles(size: usize, tiles: Vec<u8>) -> anyhow::Result<Self> {
        if !(2..=10).contains(&size) { anyhow::bail!("size must be in 2..=10, got {size}"); }
        let n = size * size;
        if tiles.len() != n { anyhow::bail!("expected {n} tiles, got {}", tiles.len()); }
        let mut seen = vec![false; n];
        for &t in &tiles {
            let t = t as usize;
            if t >= n { anyhow::bail!("tile {t} out of range for a {size}x{size} board"); }
            if seen[t] { anyhow::bail!("duplicate tile {t}"); }
            seen[t] = true;
        }
        let empty = tiles.iter().position(|&t| t == 0).unwrap();
        Ok(Self { size, tiles, empty })
    }

    /// Whitespace- or comma-separated tile list, 0 for the gap.
    pub fn parse(size: usize, text: &str) -> anyhow::Result<Self> {
        let mut tiles = Vec::new();
        for tok in text.split(|ch: char| ch.is_whitespace() || ch == ',') {
            if tok.is_empty() { continue; }
            let t: u8 = tok.parse().map_err(|_| anyhow::anyhow!("invalid tile {tok:?}"))?;
            tiles.push(t);
        }
        Self::from_tiles(size, tiles)
    }

    pub fn size(&self) -> usize { self.size }
    pub fn tiles(&self) -> &[u8] { &self.tiles }
    pub fn empty_index(&self) -> usize { self.empty }

    pub fn is_solved(&self) -> bool {
        let n = self.tiles.len();
        self.tiles[n - 1] == 0
            && self.tiles[..n - 1].iter().enumerate().all(|(i, &t)| t as usize == i + 1)
    }

    /// Orthogonal neighbors of a cell index, in up/right/down/left order.
    pub fn neighbors(size: usize, index: usize) -> Vec<usize> {
        let (r, c) = (index / size, index % size);
        let mut out = Vec::with_capacity(4);
        if r > 0 { out.push(index - size); }
        if c + 1 < size { out.push(index + 1); }
        if r + 1 < size { out.push(index + size); }
        if c > 0 { out.push(index - 1); }
        out
    }

    /// Indices that may legally slide into the gap right now.
    pub fn possible_moves(&self) -> Vec<usize> {
        Self::neighbors(self.size, self.empty)
    }

    pub fn can_slide(&self, index: usize) -> bool {
        index < self.tiles.len() && Self::neighbors(self.size, self.empty).contains(&index)
    }

    /// Slide the tile at `index` into the gap. Illegal moves are rejected
    /// and leave the board untouched.
    pub fn slide(&mut self, index: usize) -> bool {
        if !self.can_slide(index) { return false; }
        self.tiles.swap(index, self.empty);
        self.empty = index;
        true
    }

    pub fn to_line(&self) -> String {
        let mut s = String::new();
        for (i, &t) in self.tiles.iter().enumerate() {
            if i > 0 { s.push(' '); }
            s.push_str(&t.to_string());
        }
        s
    }
}

impl Display for SlidingBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = if self.size * self.size > 10 { 2 } else { 1 };
        for r in 0..self.size {
            for c in 0..self.size {
                let t = self.tiles[r * self.size + c];
                if t == 0 {
                    write!(f, "{:>width$} ", "·", width = width)?;
                } else {
                    write!(f, "{:>width$} ", t, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
