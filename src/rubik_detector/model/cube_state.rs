use crate::rubik_detector::codec::STICKER_COUNT;

/// Cube face, in the canonical order used for sticker positions and colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Up = 0,
    Front = 1,
    Right = 2,
    Down = 3,
    Left = 4,
    Back = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::Up, Face::Front, Face::Right, Face::Down, Face::Left, Face::Back];

    pub fn from_wire(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Front => 'F',
            Face::Right => 'R',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }
}

// Sticker positions in U R F D L B order, as the two-phase solver reads them.
#[rustfmt::skip]
const SOLVER_ORDER: [usize; STICKER_COUNT] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8,
    18, 19, 20, 21, 22, 23, 24, 25, 26,
    9, 10, 11, 12, 13, 14, 15, 16, 17,
    33, 30, 27, 34, 31, 28, 35, 32, 29,
    44, 43, 42, 41, 40, 39, 38, 37, 36,
    53, 52, 51, 50, 49, 48, 47, 46, 45,
];

#[rustfmt::skip]
const VISUALIZER_ORDER: [usize; STICKER_COUNT] = [
    6, 7, 8, 3, 4, 5, 0, 1, 2,
    33, 34, 35, 30, 31, 32, 27, 28, 29,
    9, 12, 15, 10, 13, 16, 11, 14, 17,
    53, 50, 47, 52, 49, 46, 51, 48, 45,
    42, 43, 44, 39, 40, 41, 36, 37, 38,
    18, 21, 24, 19, 22, 25, 20, 23, 26,
];

/// Full cube state: which face each of the 54 stickers belongs to, and the
/// measured color of each physical face.
///
/// Sticker `i` sits on face `i / 9` (U, F, R, D, L, B), `i % 9` row-major
/// within that face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeState {
    facelets: [Face; STICKER_COUNT],
    colors: [u32; 6],
}

impl CubeState {
    pub fn new(facelets: [Face; STICKER_COUNT], colors: [u32; 6]) -> Self {
        Self { facelets, colors }
    }

    pub fn facelets(&self) -> &[Face; STICKER_COUNT] {
        &self.facelets
    }

    /// Opaque ARGB colors, indexed by [`Face::index`].
    pub fn colors(&self) -> &[u32; 6] {
        &self.colors
    }

    pub fn color_of(&self, face: Face) -> u32 {
        self.colors[face.index()]
    }

    pub fn to_solver_scramble(&self) -> String {
        SOLVER_ORDER
            .iter()
            .map(|&i| self.facelets[i].letter())
            .collect()
    }

    pub fn to_visualizer_state(&self) -> String {
        VISUALIZER_ORDER
            .iter()
            .map(|&i| char::from(b'0' + self.facelets[i] as u8))
            .collect()
    }
}
