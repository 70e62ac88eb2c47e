/// Precomputed Moore neighborhoods for every lattice location.
///
/// Locations are flat indices `y * width + x`. The neighbor lists are stored
/// back to back in one array, with `offsets[loc]..offsets[loc + 1]` spanning
/// the entries of `loc` (the "offset array" layout of compressed sparse rows).
/// Bounded grids simply have shorter lists at the edges.
///
/// On a torus smaller than the neighborhood (a side below `2r + 1`) wrapped
/// coordinates can repeat or land on the location itself. Those entries are
/// kept as generated, so the neighborhood is a multiset and every count is
/// taken over it.
///
/// # Examples
/// ```
/// use lif_core::topology::Topology;
///
/// let bounded = Topology::new(4, 3, false, 1);
/// assert_eq!(bounded.neighbors(bounded.index(0, 0)).len(), 3);
///
/// let torus = Topology::new(4, 3, true, 1);
/// assert_eq!(torus.neighbors(torus.index(0, 0)).len(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    width: usize,
    height: usize,
    toroidal: bool,
    radius: usize,
    offsets: Vec<usize>,
    neighbors: Vec<usize>,
}

impl Topology {
    pub fn new(width: usize, height: usize, toroidal: bool, radius: usize) -> Self {
        let cell_count = width * height;
        let span = 2 * radius + 1;
        let mut offsets = Vec::with_capacity(cell_count + 1);
        let mut neighbors = Vec::with_capacity(cell_count * (span * span - 1));

        let r = radius as i64;
        let (w, h) = (width as i64, height as i64);
        for y in 0..h {
            for x in 0..w {
                offsets.push(neighbors.len());
                for dy in -r..=r {
                    for dx in -r..=r {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let (mut nx, mut ny) = (x + dx, y + dy);
                        if toroidal {
                            nx = nx.rem_euclid(w);
                            ny = ny.rem_euclid(h);
                        } else if nx < 0 || nx >= w || ny < 0 || ny >= h {
                            continue;
                        }
                        neighbors.push((ny * w + nx) as usize);
                    }
                }
            }
        }
        offsets.push(neighbors.len());

        Self {
            width,
            height,
            toroidal,
            radius,
            offsets,
            neighbors,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_toroidal(&self) -> bool {
        self.toroidal
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Size of a full interior neighborhood, `(2r + 1)^2 - 1`.
    pub fn neighborhood_size(&self) -> usize {
        let span = 2 * self.radius + 1;
        span * span - 1
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn coords(&self, loc: usize) -> (usize, usize) {
        (loc % self.width, loc / self.width)
    }

    #[inline]
    pub fn neighbors(&self, loc: usize) -> &[usize] {
        &self.neighbors[self.offsets[loc]..self.offsets[loc + 1]]
    }
}
