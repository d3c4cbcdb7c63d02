//! Deck construction: paired faces, shuffled.

use std::fmt;

use clap::ValueEnum;
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Swatches used by the color face set, in draw order.
pub const COLORS: [&str; 16] = [
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FFA500", "#800080",
    "#008000", "#000080", "#808000", "#FFC0CB", "#A52A2A", "#8B4513", "#808080", "#000000",
];

/// Largest number printed on a tile by the numeric face set.
pub const MAX_NUMBER: u8 = 16;

/// Total tile count of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum GameMode {
    #[default]
    Four,
    Sixteen,
    ThirtyTwo,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Four, GameMode::Sixteen, GameMode::ThirtyTwo];

    pub fn tile_count(self) -> usize {
        match self {
            GameMode::Four => 4,
            GameMode::Sixteen => 16,
            GameMode::ThirtyTwo => 32,
        }
    }

    pub fn pair_count(self) -> usize {
        self.tile_count() / 2
    }

    /// Next mode in selection order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            GameMode::Four => GameMode::Sixteen,
            GameMode::Sixteen => GameMode::ThirtyTwo,
            GameMode::ThirtyTwo => GameMode::Four,
        }
    }
}

impl TryFrom<u32> for GameMode {
    type Error = GameError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(GameMode::Four),
            16 => Ok(GameMode::Sixteen),
            32 => Ok(GameMode::ThirtyTwo),
            other => Err(GameError::InvalidMode(other)),
        }
    }
}

impl From<GameMode> for u32 {
    fn from(mode: GameMode) -> Self {
        mode.tile_count() as u32
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tile_count())
    }
}

/// Which palette tile faces are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FaceSet {
    #[default]
    Colors,
    Numbers,
}

impl FaceSet {
    pub fn palette_len(self) -> usize {
        match self {
            FaceSet::Colors => COLORS.len(),
            FaceSet::Numbers => MAX_NUMBER as usize,
        }
    }

    /// Face at `index` in draw order. Callers stay below `palette_len`.
    fn face(self, index: usize) -> Face {
        match self {
            FaceSet::Colors => Face::Color(COLORS[index]),
            FaceSet::Numbers => Face::Number(index as u8 + 1),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            FaceSet::Colors => FaceSet::Numbers,
            FaceSet::Numbers => FaceSet::Colors,
        }
    }
}

impl fmt::Display for FaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FaceSet::Colors => "colors",
            FaceSet::Numbers => "numbers",
        };
        write!(f, "{}", s)
    }
}

/// The value two tiles must share to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Color(&'static str),
    Number(u8),
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Color(hex) => write!(f, "{}", hex),
            Face::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: usize,
    pub face: Face,
}

/// Parse a `#RRGGBB` string.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn ensure_palette(mode: GameMode, available: usize) -> Result<(), GameError> {
    if mode.pair_count() > available {
        return Err(GameError::InvalidMode(mode.into()));
    }
    Ok(())
}

/// Build a shuffled deck of `mode` tiles, each face appearing exactly twice.
///
/// Faces are taken from the start of the palette in order; only their
/// positions are random.
pub fn build_deck<R: Rng + ?Sized>(
    mode: GameMode,
    face_set: FaceSet,
    rng: &mut R,
) -> Result<Vec<Tile>, GameError> {
    ensure_palette(mode, face_set.palette_len())?;

    let mut faces: Vec<Face> = (0..mode.pair_count())
        .map(|i| face_set.face(i))
        .flat_map(|face| [face, face])
        .collect();

    faces.shuffle(rng);

    Ok(faces
        .into_iter()
        .enumerate()
        .map(|(id, face)| Tile { id, face })
        .collect())
}
