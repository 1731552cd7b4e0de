//! Fixed-capacity registry of known rooms.

use linechat_proto::RoomId;

/// Number of rooms the client tracks at once.
pub const ROOM_CAPACITY: usize = 20;

/// A room announced by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEntry {
    /// Server-assigned id.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Owner's user name.
    pub owner: String,
    /// Whether we are currently inside the room.
    pub entered: bool,
    /// Known members, in arrival order.
    pub members: Vec<String>,
}

impl RoomEntry {
    /// A room we have not entered and whose roster is unknown.
    pub fn new(id: RoomId, name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self { id, name: name.into(), owner: owner.into(), entered: false, members: Vec::new() }
    }

    /// Registered implicitly by a message, before any announcement.
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty() && self.owner.is_empty()
    }

    /// One-line listing: `<id> <name> <owner>`, suffixed with `entered`.
    pub fn display_line(&self) -> String {
        if self.entered {
            format!("{} {} {} entered", self.id, self.name, self.owner)
        } else {
            format!("{} {} {}", self.id, self.name, self.owner)
        }
    }
}

/// Slot table of rooms.
///
/// Rooms keep their slot until removed; a freed slot is reused by the next
/// append. At most one entry exists per room id.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    slots: Vec<Option<RoomEntry>>,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(ROOM_CAPACITY)
    }
}

impl RoomRegistry {
    /// Create a registry with `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self { slots: vec![None; capacity] }
    }

    /// Register a room and return the slot it landed in.
    ///
    /// Returns `None` without changes if the id is already registered or
    /// every slot is taken.
    pub fn append(&mut self, entry: RoomEntry) -> Option<usize> {
        if self.slot_of(entry.id).is_some() {
            tracing::warn!(room_id = entry.id, "room already registered");
            return None;
        }
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            tracing::warn!(room_id = entry.id, capacity = self.capacity(), "room registry full");
            return None;
        };
        self.slots[slot] = Some(entry);
        Some(slot)
    }

    /// Forget a room.
    pub fn remove(&mut self, id: RoomId) {
        match self.slot_of(id) {
            Some(slot) => self.slots[slot] = None,
            None => tracing::warn!(room_id = id, "remove of unknown room"),
        }
    }

    /// Mark whether we are inside the room.
    pub fn set_entered(&mut self, id: RoomId, entered: bool) {
        if let Some(entry) = self.get_mut(id) {
            entry.entered = entered;
        }
    }

    /// Record that `name` is in the room.
    pub fn add_member(&mut self, id: RoomId, name: &str) {
        if let Some(entry) = self.get_mut(id)
            && !entry.members.iter().any(|member| member == name)
        {
            entry.members.push(name.to_owned());
        }
    }

    /// Record that `name` left the room.
    pub fn remove_member(&mut self, id: RoomId, name: &str) {
        if let Some(entry) = self.get_mut(id) {
            entry.members.retain(|member| member != name);
        }
    }

    /// Look up a room by id.
    pub fn get(&self, id: RoomId) -> Option<&RoomEntry> {
        self.entries().find(|entry| entry.id == id)
    }

    /// Look up a room by id for modification.
    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut RoomEntry> {
        self.slots.iter_mut().flatten().find(|entry| entry.id == id)
    }

    /// Slot index holding `id`.
    pub fn slot_of(&self, id: RoomId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.as_ref().is_some_and(|entry| entry.id == id))
    }

    /// Registered rooms in slot order.
    pub fn entries(&self) -> impl Iterator<Item = &RoomEntry> {
        self.slots.iter().flatten()
    }

    /// Listing line for slot `n`; `""` for an empty or out-of-range slot.
    pub fn line(&self, n: usize) -> String {
        self.slots.get(n).and_then(Option::as_ref).map(RoomEntry::display_line).unwrap_or_default()
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of registered rooms.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// No room is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
