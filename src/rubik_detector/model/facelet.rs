use std::fmt;
use std::ops::Index;

/// Sticker color as classified by the vision engine. Discriminants are the wire indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceletColor {
    Red = 0,
    Orange = 1,
    Yellow = 2,
    Green = 3,
    Blue = 4,
    White = 5,
}

impl FaceletColor {
    pub const ALL: [FaceletColor; 6] = [
        FaceletColor::Red,
        FaceletColor::Orange,
        FaceletColor::Yellow,
        FaceletColor::Green,
        FaceletColor::Blue,
        FaceletColor::White,
    ];

    pub fn from_wire(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn as_wire(self) -> i32 {
        self as i32
    }

    /// Opaque ARGB value used when drawing this color.
    pub fn display_argb(self) -> u32 {
        match self {
            FaceletColor::Red => 0xFFFF_0000,
            FaceletColor::Orange => 0xFFFF_7F00,
            FaceletColor::Yellow => 0xFFFF_FF00,
            FaceletColor::Green => 0xFF00_FF00,
            FaceletColor::Blue => 0xFF00_00FF,
            FaceletColor::White => 0xFFFF_FFFF,
        }
    }

    pub fn code(self) -> char {
        match self {
            FaceletColor::Red => 'r',
            FaceletColor::Orange => 'o',
            FaceletColor::Yellow => 'y',
            FaceletColor::Green => 'g',
            FaceletColor::Blue => 'b',
            FaceletColor::White => 'w',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FaceletColor::Red => "RED",
            FaceletColor::Orange => "ORANGE",
            FaceletColor::Yellow => "YELLOW",
            FaceletColor::Green => "GREEN",
            FaceletColor::Blue => "BLUE",
            FaceletColor::White => "WHITE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2d {
    pub x: f32,
    pub y: f32,
}

impl Point2d {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One detected sticker: an oriented rectangle plus its classified color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubikFacelet {
    pub color: FaceletColor,
    pub center: Point2d,
    pub width: f32,
    pub height: f32,
    /// Rotation of the rectangle, in radians
    pub angle: f32,
}

impl RubikFacelet {
    pub fn new(color: FaceletColor, center: Point2d, width: f32, height: f32, angle: f32) -> Self {
        Self {
            color,
            center,
            width,
            height,
            angle,
        }
    }

    pub fn inner_circle_radius(&self) -> f32 {
        self.width.min(self.height) / 2.0
    }
}

/// The 3x3 facelets of one cube face, indexed `grid[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceletGrid {
    rows: [[RubikFacelet; 3]; 3],
}

impl FaceletGrid {
    pub fn new(rows: [[RubikFacelet; 3]; 3]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[RubikFacelet; 3]; 3] {
        &self.rows
    }

    /// Facelets in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &RubikFacelet> {
        self.rows.iter().flatten()
    }

    pub fn map(&self, mut f: impl FnMut(&RubikFacelet) -> RubikFacelet) -> Self {
        Self {
            rows: self.rows.map(|row| row.map(|facelet| f(&facelet))),
        }
    }
}

impl Index<usize> for FaceletGrid {
    type Output = [RubikFacelet; 3];

    fn index(&self, row: usize) -> &Self::Output {
        &self.rows[row]
    }
}

impl fmt::Display for FaceletGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Colors: {{")?;
        for row in &self.rows {
            write!(f, " {{")?;
            for facelet in row {
                write!(f, "{} , {}, ", facelet.color.name(), facelet.angle)?;
            }
            write!(f, "}} ")?;
        }
        write!(f, "}}")
    }
}
