//! Per-room chat logs.
//!
//! [`ChatLogs`] pairs every registry slot with a [`RingLog`] and tracks which
//! room is selected and whether its log or its member list is shown.

use linechat_proto::RoomId;

use crate::{
    RingLog,
    rooms::{ROOM_CAPACITY, RoomEntry, RoomRegistry},
};

/// Lines kept per room.
pub const CHAT_LOG_LINES: usize = 30;

/// Room registry plus one ring log per slot.
#[derive(Debug, Clone)]
pub struct ChatLogs {
    registry: RoomRegistry,
    /// Indexed like the registry slots.
    logs: Vec<RingLog>,
    current_room: Option<RoomId>,
    show_members: bool,
}

impl Default for ChatLogs {
    fn default() -> Self {
        Self::new(ROOM_CAPACITY, CHAT_LOG_LINES)
    }
}

impl ChatLogs {
    /// Create logs for `rooms` rooms of `lines` lines each.
    pub fn new(rooms: usize, lines: usize) -> Self {
        Self {
            registry: RoomRegistry::new(rooms),
            logs: (0..rooms).map(|_| RingLog::new(lines)).collect(),
            current_room: None,
            show_members: false,
        }
    }

    /// Register a room. A reused slot starts with an empty log.
    ///
    /// An announcement for a room that so far only had messages fills in
    /// its name and owner and keeps the log.
    pub fn add_room(&mut self, entry: RoomEntry) -> Option<usize> {
        if let Some(existing) = self.registry.get_mut(entry.id)
            && existing.is_placeholder()
        {
            existing.name = entry.name;
            existing.owner = entry.owner;
            return self.registry.slot_of(entry.id);
        }
        let slot = self.registry.append(entry)?;
        if let Some(log) = self.logs.get_mut(slot) {
            log.clear();
        }
        Some(slot)
    }

    /// Append a chat line to `room`, registering an unnamed entry for rooms
    /// not seen before.
    pub fn append_text(&mut self, room: RoomId, line: impl Into<String>) {
        let slot = match self.registry.slot_of(room) {
            Some(slot) => slot,
            None => match self.add_room(RoomEntry::new(room, "", "")) {
                Some(slot) => slot,
                None => {
                    tracing::warn!(room_id = room, "dropping message for untracked room");
                    return;
                },
            },
        };
        if let Some(log) = self.logs.get_mut(slot) {
            log.append(line);
        }
    }

    /// Select the room whose log is shown.
    pub fn set_current_room(&mut self, room: Option<RoomId>) {
        self.current_room = room;
    }

    /// Selected room.
    pub fn current_room(&self) -> Option<RoomId> {
        self.current_room
    }

    /// Show the member list instead of the log.
    pub fn set_show_members(&mut self, show: bool) {
        self.show_members = show;
    }

    /// Whether the member list is shown.
    pub fn show_members(&self) -> bool {
        self.show_members
    }

    /// Room registry.
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Mutable room registry.
    pub fn registry_mut(&mut self) -> &mut RoomRegistry {
        &mut self.registry
    }

    /// Line `n` of the selected room: a member name when members are shown,
    /// otherwise the `n`-th most recent message.
    pub fn line(&self, n: usize) -> &str {
        let Some(room) = self.current_room else {
            return "";
        };
        let Some(slot) = self.registry.slot_of(room) else {
            return "";
        };
        if self.show_members {
            return self
                .registry
                .get(room)
                .and_then(|entry| entry.members.get(n))
                .map_or("", String::as_str);
        }
        self.logs.get(slot).map_or("", |log| log.get(n))
    }

    /// Addressable lines: the log capacity, or the roster size if that is
    /// larger and members are shown.
    pub fn line_count(&self) -> usize {
        let capacity = self.logs.first().map_or(0, RingLog::capacity);
        if !self.show_members {
            return capacity;
        }
        let members = self
            .current_room
            .and_then(|room| self.registry.get(room))
            .map_or(0, |entry| entry.members.len());
        capacity.max(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_shown_without_current_room() {
        let mut logs = ChatLogs::default();
        logs.append_text(1, "hello");

        assert_eq!(logs.line(0), "");
    }

    #[test]
    fn unknown_room_gets_placeholder() {
        let mut logs = ChatLogs::default();
        logs.append_text(8, "first");
        logs.append_text(8, "second");
        logs.set_current_room(Some(8));

        assert_eq!(logs.registry().get(8), Some(&RoomEntry::new(8, "", "")));
        assert_eq!(logs.line(0), "second");
        assert_eq!(logs.line(1), "first");
    }

    #[test]
    fn reused_slot_starts_empty() {
        let mut logs = ChatLogs::default();
        logs.add_room(RoomEntry::new(1, "a", "x"));
        logs.append_text(1, "old");
        logs.registry_mut().remove(1);

        assert_eq!(logs.add_room(RoomEntry::new(2, "b", "y")), Some(0));
        logs.set_current_room(Some(2));

        assert_eq!(logs.line(0), "");
    }

    #[test]
    fn members_view() {
        let mut logs = ChatLogs::default();
        logs.add_room(RoomEntry::new(3, "c", "z"));
        logs.registry_mut().add_member(3, "ann");
        logs.append_text(3, "hi");
        logs.set_current_room(Some(3));

        assert_eq!(logs.line(0), "hi");

        logs.set_show_members(true);
        assert_eq!(logs.line(0), "ann");
        assert_eq!(logs.line(1), "");
    }

    #[test]
    fn announcement_names_placeholder_room() {
        let mut logs = ChatLogs::default();
        logs.append_text(4, "early bird");

        assert_eq!(logs.add_room(RoomEntry::new(4, "lobby", "bob")), Some(0));
        logs.set_current_room(Some(4));

        assert_eq!(logs.registry().line(0), "4 lobby bob");
        assert_eq!(logs.registry().len(), 1);
        assert_eq!(logs.line(0), "early bird");
    }

    #[test]
    fn named_room_is_not_renamed() {
        let mut logs = ChatLogs::default();
        logs.add_room(RoomEntry::new(4, "lobby", "bob"));

        assert_eq!(logs.add_room(RoomEntry::new(4, "other", "eve")), None);
        assert_eq!(logs.registry().line(0), "4 lobby bob");
    }

    #[test]
    fn large_roster_is_fully_addressable() {
        let mut logs = ChatLogs::new(2, 3);
        logs.add_room(RoomEntry::new(1, "a", "x"));
        for n in 0..5 {
            logs.registry_mut().add_member(1, &format!("user{n}"));
        }
        logs.set_current_room(Some(1));
        assert_eq!(logs.line_count(), 3);

        logs.set_show_members(true);
        assert_eq!(logs.line_count(), 5);
        assert_eq!(logs.line(4), "user4");
    }

    #[test]
    fn full_registry_drops_text() {
        let mut logs = ChatLogs::new(1, 4);
        logs.append_text(1, "kept");
        logs.append_text(2, "dropped");

        assert!(logs.registry().get(2).is_none());
        assert_eq!(logs.line_count(), 4);
    }
}
