//! Session & membership registry.
//!
//! Single source of truth for "who is connected, as whom, in which room".
//! Rooms are not allocated separately: a room exists while at least one
//! session references it and disappears with its last member.
//!
//! All state sits behind one `RwLock`. Critical sections are short and never
//! cross an `.await`, so a synchronous lock is used instead of the tokio one.
//!
//! Presence lists go out through [`SessionRegistry::publish_active_rooms`] and
//! [`SessionRegistry::publish_members`]. Those read the state at publish time
//! and take turns, so the last list a client receives reflects the last
//! membership change.

use std::{
    collections::{BTreeSet, HashMap},
    sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use super::{
    entity::{Member, Session},
    value_object::{ConnectionId, DisplayName, RoomName, Timestamp},
};

/// Membership of one room at a single point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room: RoomName,
    pub members: Vec<Member>,
}

/// Result of [`SessionRegistry::join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Room that was vacated, with the members that remain in it
    pub previous: Option<RoomSnapshot>,
    /// Room that was entered, including the joining session
    pub current: RoomSnapshot,
    /// Active rooms after the join
    pub active_rooms: BTreeSet<RoomName>,
}

/// Result of [`SessionRegistry::leave`] and [`SessionRegistry::disconnect`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Departure {
    /// Display name the session last used, if it ever joined a room
    pub display_name: Option<DisplayName>,
    /// Room that was vacated, with the members that remain in it
    pub previous: Option<RoomSnapshot>,
    /// Active rooms after the departure
    pub active_rooms: BTreeSet<RoomName>,
}

#[derive(Debug, Default)]
struct RegistryState {
    sessions: HashMap<ConnectionId, Session>,
    rooms: HashMap<RoomName, BTreeSet<ConnectionId>>,
}

impl RegistryState {
    fn members_of(&self, room: &RoomName) -> Vec<Member> {
        let Some(ids) = self.rooms.get(room) else {
            return Vec::new();
        };
        let mut members: Vec<Member> = ids
            .iter()
            .filter_map(|id| {
                let session = self.sessions.get(id)?;
                let name = session.display_name.clone()?;
                Some(Member::new(*id, name))
            })
            .collect();
        members.sort();
        members
    }

    fn active_rooms(&self) -> BTreeSet<RoomName> {
        self.rooms
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(room, _)| room.clone())
            .collect()
    }

    /// Remove `id` from whatever room it is in and report what remains there.
    fn vacate(&mut self, id: &ConnectionId) -> Option<RoomSnapshot> {
        let room = self.sessions.get_mut(id)?.room.take()?;
        if let Some(ids) = self.rooms.get_mut(&room) {
            ids.remove(id);
            if ids.is_empty() {
                self.rooms.remove(&room);
            }
        }
        let members = self.members_of(&room);
        Some(RoomSnapshot { room, members })
    }
}

/// Registry of live sessions and the rooms they occupy.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    state: RwLock<RegistryState>,
    /// Held while a presence list is read and handed to the publisher
    publishing: Mutex<()>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a freshly opened connection with no name and no room.
    ///
    /// Returns `false` if the connection is already registered.
    pub fn connect(&self, id: ConnectionId, connected_at: Timestamp) -> bool {
        let mut state = self.write();
        if state.sessions.contains_key(&id) {
            return false;
        }
        state.sessions.insert(id, Session::new(id, connected_at));
        true
    }

    /// Move a connection into `room` under `name`.
    ///
    /// Any prior room is vacated in the same critical section, so the
    /// connection is never observed in two rooms or in none. Re-entering the
    /// current room only refreshes the display name and reports no previous
    /// room. An unknown connection is registered implicitly.
    pub fn join(&self, id: ConnectionId, name: DisplayName, room: RoomName) -> JoinOutcome {
        let mut state = self.write();

        let session = state
            .sessions
            .entry(id)
            .or_insert_with(|| Session::new(id, Timestamp::now()));
        let already_here = session.room.as_ref() == Some(&room);
        session.display_name = Some(name);

        let previous = if already_here {
            None
        } else {
            let previous = state.vacate(&id);
            if let Some(session) = state.sessions.get_mut(&id) {
                session.room = Some(room.clone());
            }
            state.rooms.entry(room.clone()).or_default().insert(id);
            previous
        };

        let members = state.members_of(&room);
        JoinOutcome {
            previous,
            current: RoomSnapshot { room, members },
            active_rooms: state.active_rooms(),
        }
    }

    /// Take a connection out of its current room while keeping it connected.
    pub fn leave(&self, id: &ConnectionId) -> Departure {
        let mut state = self.write();
        let display_name = state
            .sessions
            .get(id)
            .and_then(|session| session.display_name.clone());
        let previous = state.vacate(id);
        Departure {
            display_name,
            previous,
            active_rooms: state.active_rooms(),
        }
    }

    /// Remove a connection entirely: leave its room and drop the session.
    pub fn disconnect(&self, id: &ConnectionId) -> Departure {
        let mut state = self.write();
        let previous = state.vacate(id);
        let display_name = state
            .sessions
            .remove(id)
            .and_then(|session| session.display_name);
        Departure {
            display_name,
            previous,
            active_rooms: state.active_rooms(),
        }
    }

    /// Snapshot of a room's members ordered by display name, then connection id.
    pub fn members_of(&self, room: &RoomName) -> Vec<Member> {
        self.read().members_of(room)
    }

    /// Names of rooms with at least one member.
    pub fn active_room_names(&self) -> BTreeSet<RoomName> {
        self.read().active_rooms()
    }

    pub fn session(&self, id: &ConnectionId) -> Option<Session> {
        self.read().sessions.get(id).cloned()
    }

    /// Name and room of a connection that is currently in a room.
    pub fn current_room(&self, id: &ConnectionId) -> Option<(DisplayName, RoomName)> {
        let state = self.read();
        let session = state.sessions.get(id)?;
        Some((session.display_name.clone()?, session.room.clone()?))
    }

    pub fn connection_count(&self) -> usize {
        self.read().sessions.len()
    }

    /// Hand the current set of active rooms to `publish`.
    ///
    /// Publishers take turns and each one reads the state after the previous
    /// one finished, so lists cannot be delivered out of order. `publish` must
    /// not publish again itself.
    pub fn publish_active_rooms<R>(&self, publish: impl FnOnce(BTreeSet<RoomName>) -> R) -> R {
        let _turn = self.publishing.lock().unwrap_or_else(PoisonError::into_inner);
        publish(self.active_room_names())
    }

    /// Hand the current members of `room` to `publish`, in turn with other publishers.
    pub fn publish_members<R>(
        &self,
        room: &RoomName,
        publish: impl FnOnce(Vec<Member>) -> R,
    ) -> R {
        let _turn = self.publishing.lock().unwrap_or_else(PoisonError::into_inner);
        publish(self.members_of(room))
    }
}
