//! Shared fixtures for UseCase tests.

use std::{
    collections::HashSet,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    domain::{
        ChatDelivery, ConnectionId, ConnectionIdFactory, LanguageCode, Notifier, OutboundEvent,
        RoomName, SessionRegistry, Timestamp, TranslationError, TranslationProvider,
    },
    infrastructure::repository::{
        ActivityEntry, InMemoryActivityLog, InMemoryMessageStore, InMemoryRoomDirectory,
        InMemoryUserDirectory,
    },
};

use super::{
    context::{RelayContext, RelayMetrics, RelaySettings},
    enter_room::EnterRoomUseCase,
    translation_gateway::{GatewayConfig, TranslationGateway},
};

type NoticeHook = Box<dyn FnOnce() + Send>;

/// Records every event instead of writing to sockets.
#[derive(Default)]
pub struct RecordingNotifier {
    log: Mutex<Vec<(Option<ConnectionId>, OutboundEvent)>>,
    closed: Mutex<HashSet<ConnectionId>>,
    hook: Mutex<Option<(String, NoticeHook)>>,
}

impl RecordingNotifier {
    /// Direct sends to `id` plus broadcasts, in order.
    pub fn events_for(&self, id: &ConnectionId) -> Vec<OutboundEvent> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to.is_none() || to.as_ref() == Some(id))
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub fn chats_for(&self, id: &ConnectionId) -> Vec<ChatDelivery> {
        self.events_for(id)
            .into_iter()
            .filter_map(|event| match event {
                OutboundEvent::Chat(delivery) => Some(delivery),
                _ => None,
            })
            .collect()
    }

    pub fn broadcasts(&self) -> Vec<OutboundEvent> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to.is_none())
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Room names carried by the most recent room-list broadcast.
    pub fn last_room_list(&self) -> Option<Vec<String>> {
        self.broadcasts().into_iter().rev().find_map(|event| match event {
            OutboundEvent::RoomList { rooms } => {
                Some(rooms.into_iter().map(RoomName::into_string).collect())
            }
            _ => None,
        })
    }

    /// Simulate a socket that went away.
    pub fn close(&self, id: ConnectionId) {
        self.closed.lock().unwrap().insert(id);
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }

    /// Run `hook` once, right after a notice with `text` has been recorded.
    ///
    /// Lets a test slip another operation in between two steps of a use case.
    pub fn on_notice(&self, text: &str, hook: impl FnOnce() + Send + 'static) {
        *self.hook.lock().unwrap() = Some((text.to_string(), Box::new(hook)));
    }

    fn take_hook_for(&self, event: &OutboundEvent) -> Option<NoticeHook> {
        let OutboundEvent::Notice { text, .. } = event else {
            return None;
        };
        let mut slot = self.hook.lock().unwrap();
        if slot.as_ref().is_some_and(|(trigger, _)| trigger == text) {
            slot.take().map(|(_, hook)| hook)
        } else {
            None
        }
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, to: &ConnectionId, event: OutboundEvent) -> bool {
        if self.closed.lock().unwrap().contains(to) {
            return false;
        }
        let hook = self.take_hook_for(&event);
        self.log.lock().unwrap().push((Some(*to), event));
        if let Some(hook) = hook {
            hook();
        }
        true
    }

    fn broadcast(&self, event: OutboundEvent) {
        self.log.lock().unwrap().push((None, event));
    }
}

/// Deterministic translator: prefixes the text with the target code.
#[derive(Default)]
pub struct PrefixTranslator {
    calls: AtomicUsize,
    failing_targets: Mutex<HashSet<String>>,
}

impl PrefixTranslator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_for(&self, target: &str) {
        self.failing_targets
            .lock()
            .unwrap()
            .insert(target.to_string());
    }
}

#[async_trait]
impl TranslationProvider for PrefixTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_targets.lock().unwrap().contains(target.as_str()) {
            return Err(TranslationError::Network("simulated outage".to_string()));
        }
        Ok(format!("[{target}] {text}"))
    }
}

/// A relay wired to in-memory collaborators.
pub struct TestRelay {
    pub context: RelayContext,
    pub notifier: Arc<RecordingNotifier>,
    pub translator: Arc<PrefixTranslator>,
    pub users: Arc<InMemoryUserDirectory>,
    pub rooms: Arc<InMemoryRoomDirectory>,
    pub messages: Arc<InMemoryMessageStore>,
    pub activity: Arc<InMemoryActivityLog>,
}

impl TestRelay {
    /// Seed `(name, preferred_language)` users and the rooms Green, Blue and New.
    pub async fn new(users: &[(&str, &str)]) -> Self {
        let notifier = Arc::new(RecordingNotifier::default());
        let translator = Arc::new(PrefixTranslator::default());
        let users = Arc::new(InMemoryUserDirectory::with_users(users.iter().copied()).await);
        let rooms = Arc::new(
            InMemoryRoomDirectory::with_rooms(["Green", "Blue", "New"].map(room)).await,
        );
        let messages = Arc::new(InMemoryMessageStore::new());
        let activity = Arc::new(InMemoryActivityLog::new());

        let context = RelayContext {
            registry: Arc::new(SessionRegistry::new()),
            notifier: notifier.clone(),
            gateway: Arc::new(TranslationGateway::new(
                translator.clone(),
                GatewayConfig::default(),
            )),
            users: users.clone(),
            rooms: rooms.clone(),
            messages: messages.clone(),
            activity: activity.clone(),
            metrics: Arc::new(RelayMetrics::default()),
            settings: RelaySettings {
                history_limit: 50,
                default_language: LanguageCode::new("en".to_string()).unwrap(),
            },
        };

        Self {
            context,
            notifier,
            translator,
            users,
            rooms,
            messages,
            activity,
        }
    }

    /// Replace the translation provider behind the gateway.
    pub fn use_translator(&mut self, provider: Arc<dyn TranslationProvider>) {
        self.context.gateway = Arc::new(TranslationGateway::new(
            provider,
            GatewayConfig {
                timeout: Duration::from_millis(100),
                ..GatewayConfig::default()
            },
        ));
    }

    pub fn connect(&self) -> ConnectionId {
        let id = ConnectionIdFactory::generate();
        self.context.registry.connect(id, Timestamp::now());
        id
    }

    /// Connect and enter a room in one step.
    pub async fn join(&self, name: &str, room_name: &str) -> ConnectionId {
        let id = self.connect();
        EnterRoomUseCase::new(self.context.clone())
            .execute(id, name.to_string(), room_name.to_string())
            .await
            .unwrap();
        id
    }

    /// Wait until the fire-and-forget activity log holds at least `count` entries.
    pub async fn wait_for_activity(&self, count: usize) -> Vec<ActivityEntry> {
        for _ in 0..100 {
            let entries = self.activity.entries().await;
            if entries.len() >= count {
                return entries;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.activity.entries().await
    }
}

pub fn room(name: &str) -> RoomName {
    RoomName::new(name.to_string()).unwrap()
}

pub fn notice_texts(events: &[OutboundEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            OutboundEvent::Notice { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

pub fn user_lists(events: &[OutboundEvent]) -> Vec<Vec<String>> {
    events
        .iter()
        .filter_map(|event| match event {
            OutboundEvent::UserList { users, .. } => Some(
                users
                    .iter()
                    .map(|name| name.as_str().to_string())
                    .collect(),
            ),
            _ => None,
        })
        .collect()
}
