//! Uniform cell grid used to prune candidate pairs during bond inference.
//!
//! Items are binned into cubic cells through intrusive linked lists (`head`/`next`), so
//! construction is a single pass and a fixed-radius query only visits the cells overlapping
//! the query cube.

use super::types::Point;
use nalgebra::Vector3;

const SENTINEL: u32 = u32::MAX;

/// Spatial hash over a static point set.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    cell_size: f64,
    origin: Point,
    dims: Vector3<usize>,
    head: Vec<u32>,
    next: Vec<u32>,
    items: Vec<(Point, T)>,
}

impl<T> Grid<T> {
    /// Bins every `(position, item)` pair into cells of side `cell_size`.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not strictly positive.
    pub fn new(items: impl IntoIterator<Item = (Point, T)>, cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "Cell size must be positive");

        let items: Vec<_> = items.into_iter().collect();
        if items.is_empty() {
            return Self {
                cell_size,
                origin: Point::origin(),
                dims: Vector3::zeros(),
                head: Vec::new(),
                next: Vec::new(),
                items,
            };
        }

        let (min, max) = items.iter().fold(
            (
                Point::new(f64::MAX, f64::MAX, f64::MAX),
                Point::new(f64::MIN, f64::MIN, f64::MIN),
            ),
            |(lo, hi), (pos, _)| (lo.inf(pos), hi.sup(pos)),
        );

        let extent = (max - min).add_scalar(1e-6);
        let dims = extent.map(|e| ((e / cell_size).ceil() as usize).max(1));

        let mut head = vec![SENTINEL; dims.x * dims.y * dims.z];
        let mut next = vec![SENTINEL; items.len()];

        for (i, (pos, _)) in items.iter().enumerate() {
            let cell = Self::cell_coords(pos, &min, cell_size, &dims);
            let cell_idx = cell.x + cell.y * dims.x + cell.z * dims.x * dims.y;
            next[i] = head[cell_idx];
            head[cell_idx] = i as u32;
        }

        Self {
            cell_size,
            origin: min,
            dims,
            head,
            next,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn cell_coords(
        pos: &Point,
        origin: &Point,
        cell_size: f64,
        dims: &Vector3<usize>,
    ) -> Vector3<usize> {
        let offset = pos - origin;
        Vector3::new(
            Self::clamp_axis(offset.x / cell_size, dims.x),
            Self::clamp_axis(offset.y / cell_size, dims.y),
            Self::clamp_axis(offset.z / cell_size, dims.z),
        )
    }

    fn clamp_axis(scaled: f64, dim: usize) -> usize {
        (scaled.floor() as isize).clamp(0, dim as isize - 1) as usize
    }

    /// Visits every item stored in cells overlapping the cube of half-width `radius`.
    ///
    /// The result is a superset of the items within `radius`; chain [`GridNeighborhood::exact`]
    /// to keep only those within the Euclidean ball.
    pub fn neighbors<'a>(&'a self, center: &Point, radius: f64) -> GridNeighborhood<'a, T> {
        let reach = Vector3::new(radius, radius, radius);
        let (lo, hi) = if self.items.is_empty() {
            (Vector3::zeros(), Vector3::zeros())
        } else {
            (
                Self::cell_coords(&(center - reach), &self.origin, self.cell_size, &self.dims),
                Self::cell_coords(&(center + reach), &self.origin, self.cell_size, &self.dims),
            )
        };

        GridNeighborhood {
            grid: self,
            lo,
            hi,
            cursor: lo,
            done: self.items.is_empty(),
            item: SENTINEL,
            center: *center,
            radius_sq: radius * radius,
        }
    }
}

/// Cell-level neighbourhood walk produced by [`Grid::neighbors`].
pub struct GridNeighborhood<'a, T> {
    grid: &'a Grid<T>,
    lo: Vector3<usize>,
    hi: Vector3<usize>,
    cursor: Vector3<usize>,
    done: bool,
    item: u32,
    center: Point,
    radius_sq: f64,
}

impl<'a, T> GridNeighborhood<'a, T> {
    /// Restricts the walk to items whose distance to the centre is at most the radius.
    pub fn exact(self) -> impl Iterator<Item = &'a T> + 'a {
        let center = self.center;
        let radius_sq = self.radius_sq;
        let grid = self.grid;
        self.with_index()
            .filter(move |&i| nalgebra::distance_squared(&grid.items[i].0, &center) <= radius_sq)
            .map(move |i| &grid.items[i].1)
    }

    fn with_index(mut self) -> impl Iterator<Item = usize> + 'a {
        std::iter::from_fn(move || self.advance())
    }

    fn advance(&mut self) -> Option<usize> {
        loop {
            if self.item != SENTINEL {
                let current = self.item as usize;
                self.item = self.grid.next[current];
                return Some(current);
            }
            if self.done {
                return None;
            }

            let dims = &self.grid.dims;
            let cell_idx =
                self.cursor.x + self.cursor.y * dims.x + self.cursor.z * dims.x * dims.y;
            self.item = self.grid.head[cell_idx];

            if self.cursor.x < self.hi.x {
                self.cursor.x += 1;
            } else if self.cursor.y < self.hi.y {
                self.cursor.x = self.lo.x;
                self.cursor.y += 1;
            } else if self.cursor.z < self.hi.z {
                self.cursor.x = self.lo.x;
                self.cursor.y = self.lo.y;
                self.cursor.z += 1;
            } else {
                self.done = true;
            }
        }
    }
}

impl<'a, T> Iterator for GridNeighborhood<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(|i| &self.grid.items[i].1)
    }
}
