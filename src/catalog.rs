// Room catalog: the fixed set of rooms the hotel can sell

use std::{collections::HashSet, fmt};

use rand::{seq::SliceRandom, Rng};

use crate::error::{BookingError, CatalogError};

// Room numbers of the default hotel: four floors, four rooms each
pub const ROOM_NUMBERS: [&str; 16] = [
    "101", "102", "103", "104", "201", "202", "203", "204", "301", "302", "303", "304", "401",
    "402", "403", "404",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    Executive,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Standard,
        RoomType::Deluxe,
        RoomType::Suite,
        RoomType::Executive,
    ];

    // Nightly base rate
    pub fn base_rate(&self) -> f64 {
        match self {
            RoomType::Standard => 100.0,
            RoomType::Deluxe => 200.0,
            RoomType::Suite => 350.0,
            RoomType::Executive => 500.0,
        }
    }

    pub fn max_occupancy(&self) -> u32 {
        match self {
            RoomType::Standard => 2,
            RoomType::Deluxe => 3,
            RoomType::Suite => 4,
            RoomType::Executive => 2,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomType::Standard => "STANDARD",
            RoomType::Deluxe => "DELUXE",
            RoomType::Suite => "SUITE",
            RoomType::Executive => "EXECUTIVE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    pub room_type: RoomType,
}

impl Room {
    pub fn new(id: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            room_type,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for room in &rooms {
            if !seen.insert(room.id.as_str()) {
                return Err(CatalogError::DuplicateRoom(room.id.clone()));
            }
        }
        Ok(Self { rooms })
    }

    // Default hotel with the room type picked by position on the floor:
    // x01 Standard, x02 Deluxe, x03 Suite, x04 Executive
    pub fn standard_layout() -> Self {
        let rooms = ROOM_NUMBERS
            .iter()
            .enumerate()
            .map(|(i, number)| Room::new(*number, RoomType::ALL[i % RoomType::ALL.len()]))
            .collect();
        Self { rooms }
    }

    // Default hotel with each room type drawn from the given random source
    pub fn randomized<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let rooms = ROOM_NUMBERS
            .iter()
            .map(|number| {
                let room_type = *RoomType::ALL
                    .choose(rng)
                    .unwrap_or(&RoomType::Standard);
                Room::new(*number, room_type)
            })
            .collect();
        Self { rooms }
    }

    pub fn find_room(&self, id: &str) -> Result<&Room, BookingError> {
        self.rooms
            .iter()
            .find(|room| room.id == id)
            .ok_or_else(|| BookingError::RoomNotFound(id.to_string()))
    }

    pub fn list_rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
