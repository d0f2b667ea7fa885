use serde::{Deserialize, Serialize};

/// Floor texture for rooms whose label has no entry in the table.
pub const DEFAULT_FLOOR_TEXTURE: &str = "/textures/4.jpg";

const ROOM_TEXTURES: [(&str, &str); 9] = [
    ("bedroom", "/textures/4.jpg"),
    ("kitchen", "/textures/7.jpg"),
    ("bathroom", "/textures/9.jpg"),
    ("livingroom", "/textures/6.jpg"),
    ("lawn", "/textures/grass.jpg"),
    ("balcony", "/textures/5.jpg"),
    ("garage", "/textures/2.jpg"),
    ("washroom", "/textures/1.jpg"),
    ("study", "/textures/8.jpg"),
];

/// Looks up the floor texture for a room label (case-insensitive).
#[must_use]
pub fn floor_texture_for_label(label: &str) -> &'static str {
    let key = label.to_lowercase();
    ROOM_TEXTURES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(DEFAULT_FLOOR_TEXTURE, |(_, path)| *path)
}

/// Wall surface choices offered by the customization panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallFinish {
    /// Flat color, no texture.
    #[default]
    Paint,
    Brick,
    Wallpaper,
    Stone,
    Matte,
}

impl WallFinish {
    pub const ALL: [Self; 5] = [
        Self::Paint,
        Self::Brick,
        Self::Wallpaper,
        Self::Stone,
        Self::Matte,
    ];

    /// Returns the display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Paint => "Paint (Color Only)",
            Self::Brick => "Brick",
            Self::Wallpaper => "Wallpaper",
            Self::Stone => "Stone",
            Self::Matte => "Matte",
        }
    }

    /// Returns the wall texture, or `None` for plain paint.
    #[must_use]
    pub fn texture(self) -> Option<&'static str> {
        match self {
            Self::Paint => None,
            Self::Brick => Some("/textures/walls/brick.jpg"),
            Self::Wallpaper => Some("/textures/walls/wallpaper.jpg"),
            Self::Stone => Some("/textures/walls/stone.jpg"),
            Self::Matte => Some("/textures/walls/matte.jpg"),
        }
    }
}

/// Floor surface choices offered by the customization panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorFinish {
    /// Pick the texture from the room label.
    #[default]
    ByRoomType,
    Wood,
    Marble,
    Tiles,
    Concrete,
    Matte,
    Lawn,
}

impl FloorFinish {
    pub const ALL: [Self; 7] = [
        Self::ByRoomType,
        Self::Wood,
        Self::Marble,
        Self::Tiles,
        Self::Concrete,
        Self::Matte,
        Self::Lawn,
    ];

    /// Returns the display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ByRoomType => "By Room Type",
            Self::Wood => "Wood",
            Self::Marble => "Marble",
            Self::Tiles => "Tiles",
            Self::Concrete => "Concrete",
            Self::Matte => "Matte",
            Self::Lawn => "Lawn",
        }
    }

    /// Returns the floor texture this finish forces, if any.
    #[must_use]
    pub fn texture(self) -> Option<&'static str> {
        match self {
            Self::ByRoomType => None,
            Self::Wood => Some("/textures/floors/wood.jpg"),
            Self::Marble => Some("/textures/floors/marble.jpg"),
            Self::Tiles => Some("/textures/floors/tiles.jpg"),
            Self::Concrete => Some("/textures/floors/concrete.jpg"),
            Self::Matte => Some("/textures/floors/matte.jpg"),
            Self::Lawn => Some("/textures/grass.jpg"),
        }
    }
}
