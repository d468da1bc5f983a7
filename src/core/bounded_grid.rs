use serde::{Deserialize, Serialize};

use crate::core::errors::OutOfBounds;
use crate::core::models::Vec2;

/// Extent of a grid anchored at (0,0), in rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub rows: i32,
    pub cols: i32,
}

impl GridBounds {
    pub fn new(rows: i32, cols: i32) -> GridBounds {
        GridBounds { rows, cols }
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        pos.i >= 0 && pos.i < self.rows && pos.j >= 0 && pos.j < self.cols
    }

    pub fn area(&self) -> i32 {
        self.rows * self.cols
    }

    pub fn out_of_bounds(&self, pos: Vec2) -> OutOfBounds {
        OutOfBounds {
            row: pos.i,
            col: pos.j,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Vec2> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |i| (0..cols).map(move |j| Vec2 { i, j }))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedGrid<T> {
    bounds: GridBounds,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    pub fn new(bounds: GridBounds, default: T) -> Self
    where
        T: Clone,
    {
        let cells = vec![default; bounds.area().max(0) as usize];
        BoundedGrid { bounds, cells }
    }

    pub fn size(&self) -> GridBounds {
        self.bounds
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        self.bounds.contains(pos)
    }

    pub fn get(&self, pos: &Vec2) -> Option<&T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(&self.cells[self.index_of(pos)])
    }

    pub fn get_mut(&mut self, pos: &Vec2) -> Option<&mut T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        let index = self.index_of(pos);
        Some(&mut self.cells[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    fn index_of(&self, pos: &Vec2) -> usize {
        (pos.i * self.bounds.cols + pos.j) as usize
    }
}
