//! Collaborators shared by every relay use case.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use serde::Serialize;

use crate::domain::{
    ActivityLog, ConnectionId, DisplayName, LanguageCode, Member, MessageStore, Notifier,
    OutboundEvent, RoomDirectory, RoomName, SessionRegistry, UserDirectory, UserProfile,
};

use super::translation_gateway::TranslationGateway;

/// Tunables for the fan-out coordinator.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Number of stored messages replayed on room entry
    pub history_limit: usize,
    /// Target language for recipients missing from the user directory
    pub default_language: LanguageCode,
}

/// Operator-facing counters.
///
/// A persistence failure means a message was seen live but is missing from
/// history, so it is counted as well as logged.
#[derive(Debug, Default)]
pub struct RelayMetrics {
    persistence_failures: AtomicU64,
    messages_relayed: AtomicU64,
    untranslated_deliveries: AtomicU64,
}

/// Point-in-time copy of [`RelayMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub persistence_failures: u64,
    pub messages_relayed: u64,
    pub untranslated_deliveries: u64,
}

impl RelayMetrics {
    pub fn record_persistence_failure(&self) {
        self.persistence_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_relayed(&self) {
        self.messages_relayed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_untranslated(&self, count: u64) {
        self.untranslated_deliveries
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            persistence_failures: self.persistence_failures.load(Ordering::Relaxed),
            messages_relayed: self.messages_relayed.load(Ordering::Relaxed),
            untranslated_deliveries: self.untranslated_deliveries.load(Ordering::Relaxed),
        }
    }
}

/// Everything the relay use cases depend on, cheap to clone.
#[derive(Clone)]
pub struct RelayContext {
    pub registry: Arc<SessionRegistry>,
    pub notifier: Arc<dyn Notifier>,
    pub gateway: Arc<TranslationGateway>,
    pub users: Arc<dyn UserDirectory>,
    pub rooms: Arc<dyn RoomDirectory>,
    pub messages: Arc<dyn MessageStore>,
    pub activity: Arc<dyn ActivityLog>,
    pub metrics: Arc<RelayMetrics>,
    pub settings: RelaySettings,
}

impl RelayContext {
    /// Look a user up by display name, treating directory errors as "unknown".
    pub async fn find_user(&self, name: &DisplayName) -> Option<UserProfile> {
        match self.users.lookup_by_name(name.as_str()).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("User directory lookup for '{}' failed: {}", name, e);
                None
            }
        }
    }

    /// Preferred language label of a user, or the default language if unknown.
    pub async fn preferred_language(&self, name: &DisplayName) -> String {
        match self.find_user(name).await {
            Some(profile) => profile.preferred_language,
            None => {
                tracing::debug!(
                    "'{}' is not in the user directory, using default language '{}'",
                    name,
                    self.settings.default_language
                );
                self.settings.default_language.to_string()
            }
        }
    }

    /// Fire-and-forget audit entry for a user action. Failures are swallowed.
    pub fn record_activity(&self, name: &DisplayName, description: String) {
        let users = self.users.clone();
        let activity = self.activity.clone();
        let name = name.clone();
        tokio::spawn(async move {
            let user_id = match users.lookup_by_name(name.as_str()).await {
                Ok(Some(profile)) => profile.id,
                Ok(None) => {
                    tracing::debug!("Skipping activity for unknown user '{}'", name);
                    return;
                }
                Err(e) => {
                    tracing::debug!("Skipping activity for '{}': {}", name, e);
                    return;
                }
            };
            if let Err(e) = activity.record(user_id, description).await {
                tracing::debug!("Activity log write for '{}' failed: {}", name, e);
            }
        });
    }

    /// Send `event` to each member, optionally skipping one connection.
    pub fn notify_members(
        &self,
        members: &[Member],
        event: &OutboundEvent,
        except: Option<&ConnectionId>,
    ) -> usize {
        let mut delivered = 0;
        for member in members {
            if Some(&member.connection_id) == except {
                continue;
            }
            if self.notifier.send(&member.connection_id, event.clone()) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Send the current member list of a room to everyone in it.
    ///
    /// The list is read when it is published, not taken from an earlier
    /// snapshot, so a concurrent change cannot be overwritten by a stale list.
    pub fn publish_user_list(&self, room: &RoomName) {
        self.registry.publish_members(room, |members| {
            let event = OutboundEvent::UserList {
                room: room.clone(),
                users: members
                    .iter()
                    .map(|member| member.display_name.clone())
                    .collect(),
            };
            self.notify_members(&members, &event, None);
        });
    }

    /// Room existence is global state: every connection gets the current list.
    pub fn publish_room_list(&self) {
        self.registry.publish_active_rooms(|rooms| {
            self.notifier.broadcast(OutboundEvent::RoomList {
                rooms: rooms.into_iter().collect(),
            });
        });
    }
}
