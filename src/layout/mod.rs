//! Room layouts produced by the design service.
//!
//! A [`Layout`] is a static snapshot: rooms are parsed once, receive a
//! stable [`RoomId`], and are never mutated afterwards. Visibility rules
//! live in [`filter`], texture lookups in [`texture`].

pub mod filter;
pub mod texture;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LayoutError;
use crate::math::{Point2, Rect2};

pub use filter::{RoomFilter, RoomKind};
pub use texture::{floor_texture_for_label, FloorFinish, WallFinish, DEFAULT_FLOOR_TEXTURE};

/// Stable identifier of a room within a loaded layout.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Returns the identifier used for a room without an explicit id.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(format!("room-{index}"))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A semantic room rectangle as delivered by the layout endpoint.
///
/// `x`/`y` locate the room's minimum corner in plan units and
/// `width`/`height` give its extents along plan X and plan Y (world Z).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_height: Option<f64>,
}

impl Room {
    /// Creates a room without an id or wall height override.
    #[must_use]
    pub fn new(label: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: None,
            label: Some(label.to_owned()),
            x,
            y,
            width,
            height,
            wall_height: None,
        }
    }

    /// Sets an explicit id.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Sets a wall height override.
    #[must_use]
    pub fn with_wall_height(mut self, wall_height: f64) -> Self {
        self.wall_height = Some(wall_height);
        self
    }

    /// Returns the label as given, or an empty string.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    /// Returns the lower-cased label used for category lookups.
    #[must_use]
    pub fn category(&self) -> String {
        self.label().to_lowercase()
    }

    /// Returns the room's footprint in plan units.
    #[must_use]
    pub fn footprint(&self) -> Rect2 {
        Rect2::from_origin_size(self.x, self.y, self.width, self.height)
    }
}

/// Layout ids may arrive as strings or numbers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

/// A room paired with its resolved id.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRoom {
    pub id: RoomId,
    pub room: Room,
}

/// An ordered, immutable set of rooms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    rooms: Vec<PlacedRoom>,
}

impl Layout {
    /// Builds a layout, assigning `room-{index}` ids to rooms without one.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NonFinite` if any coordinate, extent or wall
    /// height is NaN or infinite.
    pub fn new(rooms: Vec<Room>) -> Result<Self, LayoutError> {
        let mut placed = Vec::with_capacity(rooms.len());
        for (index, room) in rooms.into_iter().enumerate() {
            let fields = [
                ("x", room.x),
                ("y", room.y),
                ("width", room.width),
                ("height", room.height),
                ("wallHeight", room.wall_height.unwrap_or(0.0)),
            ];
            if let Some((field, _)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
                return Err(LayoutError::NonFinite { index, field });
            }
            let id = room
                .id
                .as_deref()
                .map_or_else(|| RoomId::from_index(index), RoomId::from);
            placed.push(PlacedRoom { id, room });
        }
        Ok(Self { rooms: placed })
    }

    /// Parses a layout JSON document.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NotAnArray` if the top-level value is not an
    /// array, `LayoutError::Malformed` if it is not valid JSON or a room is
    /// missing a required field, and `LayoutError::NonFinite` as for
    /// [`Layout::new`].
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_array() {
            return Err(LayoutError::NotAnArray);
        }
        let rooms: Vec<Room> = serde_json::from_value(value)?;
        Self::new(rooms)
    }

    /// Returns every room in load order.
    #[must_use]
    pub fn rooms(&self) -> &[PlacedRoom] {
        &self.rooms
    }

    /// Returns the number of rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if the layout has no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Looks up a room by id.
    #[must_use]
    pub fn get(&self, id: &RoomId) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    /// Returns the rooms that pass `filter`, in load order.
    #[must_use]
    pub fn visible(&self, filter: RoomFilter) -> Vec<&PlacedRoom> {
        self.rooms.iter().filter(|r| filter.admits(&r.room)).collect()
    }

    /// Returns the plan-space rectangle enclosing all rooms, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect2> {
        self.rooms
            .iter()
            .map(|r| r.room.footprint())
            .reduce(|acc, r| acc.union(&r))
    }

    /// Returns the plan-space center of [`Layout::bounds`]. The camera presets
    /// orbit around it.
    #[must_use]
    pub fn center(&self) -> Option<Point2> {
        self.bounds().map(|b| b.center())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_layout_and_assigns_missing_ids() {
        let layout = Layout::from_json(
            r#"[
                {"id": "r1", "label": "Bedroom", "x": 0, "y": 0, "width": 4, "height": 3},
                {"label": "Kitchen", "x": 4, "y": 0, "width": 2, "height": 3, "wallHeight": 2.4},
                {"id": 7, "label": "Study", "x": 0, "y": 3, "width": 2, "height": 2}
            ]"#,
        )
        .unwrap();
        assert_eq!(layout.len(), 3);
        let ids: Vec<_> = layout.rooms().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r1", "room-1", "7"]);
        assert_eq!(layout.rooms()[1].room.wall_height, Some(2.4));
    }

    #[test]
    fn non_array_payload_is_rejected() {
        let err = Layout::from_json(r#"{"rooms": []}"#).unwrap_err();
        assert!(matches!(err, LayoutError::NotAnArray));
    }

    #[test]
    fn missing_fields_are_malformed() {
        let err = Layout::from_json(r#"[{"label": "Bedroom", "x": 0}]"#).unwrap_err();
        assert!(matches!(err, LayoutError::Malformed(_)));
        let err = Layout::from_json("not json").unwrap_err();
        assert!(matches!(err, LayoutError::Malformed(_)));
    }

    #[test]
    fn non_finite_rooms_are_rejected() {
        let err = Layout::new(vec![Room::new("Bedroom", f64::NAN, 0.0, 1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, LayoutError::NonFinite { index: 0, field: "x" }));
    }

    #[test]
    fn missing_label_is_empty() {
        let layout = Layout::from_json(r#"[{"label": null, "x": 0, "y": 0, "width": 1, "height": 1}]"#)
            .unwrap();
        assert_eq!(layout.rooms()[0].room.label(), "");
    }

    #[test]
    fn ids_survive_filtering() {
        let layout = Layout::new(vec![
            Room::new("Garage", 0.0, 0.0, 2.0, 2.0),
            Room::new("Bedroom", 2.0, 0.0, 2.0, 2.0),
        ])
        .unwrap();
        let visible = layout.visible(RoomFilter { show_garage: false });
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "room-1");
    }

    #[test]
    fn bounds_cover_all_rooms() {
        let layout = Layout::new(vec![
            Room::new("Bedroom", 0.0, 0.0, 4.0, 3.0),
            Room::new("Kitchen", 4.0, 1.0, 2.0, 4.0),
        ])
        .unwrap();
        let b = layout.bounds().unwrap();
        assert_relative_eq!(b.width(), 6.0);
        assert_relative_eq!(b.height(), 5.0);
        let c = layout.center().unwrap();
        assert_relative_eq!(c.x, 3.0);
        assert_relative_eq!(c.y, 2.5);
        assert!(Layout::default().bounds().is_none());
    }
}
