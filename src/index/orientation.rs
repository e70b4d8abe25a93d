use std::fmt;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (`x = 0`, `y = 1`, `z = 2`).
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The orientation facing along the positive direction of this axis.
    #[must_use]
    pub fn positive(self) -> Orientation {
        Orientation::new(self, true)
    }

    /// The orientation facing along the negative direction of this axis.
    #[must_use]
    pub fn negative(self) -> Orientation {
        Orientation::new(self, false)
    }

    /// The two axes spanning the plane perpendicular to this axis,
    /// in ascending index order.
    #[must_use]
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

/// Direction a voxel face points to.
///
/// Closed set of six values, grouped into three axis pairs. The
/// discriminant doubles as the index into per-orientation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Orientation {
    /// All orientations in index order.
    pub const ALL: [Orientation; 6] = [
        Orientation::PosX,
        Orientation::NegX,
        Orientation::PosY,
        Orientation::NegY,
        Orientation::PosZ,
        Orientation::NegZ,
    ];

    /// Builds the orientation facing along `axis` in the given direction.
    #[must_use]
    pub fn new(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Orientation::PosX,
            (Axis::X, false) => Orientation::NegX,
            (Axis::Y, true) => Orientation::PosY,
            (Axis::Y, false) => Orientation::NegY,
            (Axis::Z, true) => Orientation::PosZ,
            (Axis::Z, false) => Orientation::NegZ,
        }
    }

    /// Index into per-orientation tables (`0..6`).
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Orientation::index`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Orientation::PosX | Orientation::NegX => Axis::X,
            Orientation::PosY | Orientation::NegY => Axis::Y,
            Orientation::PosZ | Orientation::NegZ => Axis::Z,
        }
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            Orientation::PosX | Orientation::PosY | Orientation::PosZ
        )
    }

    /// The orientation pointing the other way along the same axis.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::new(self.axis(), !self.is_positive())
    }

    /// Unit offset of the neighbor cell this orientation points to.
    #[must_use]
    pub fn offset(self) -> [i32; 3] {
        let mut offset = [0; 3];
        offset[self.axis().index()] = if self.is_positive() { 1 } else { -1 };
        offset
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_positive() { '+' } else { '-' };
        let axis = match self.axis() {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        };
        write!(f, "{sign}{axis}")
    }
}
