#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Connection and destination configuration for the chat client.
///
/// Provided via Leptos context by the hosting application; [`ChatView`]
/// falls back to `Default`, which matches the development broker.
///
/// [`ChatView`]: crate::components::chat_view::ChatView
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// WebSocket endpoint used to bootstrap the STOMP session.
    pub endpoint: String,
    /// Broker topic carrying the public room feed.
    pub topic: String,
    /// Application destination announcing a user joining the room.
    pub join_destination: String,
    /// Application destination for outgoing chat messages.
    pub chat_destination: String,
    /// localStorage keys tried in order when resolving the session username.
    ///
    /// Deployments disagree on whether the auth module writes `username` or
    /// `name`; both are accepted until that settles at integration time.
    pub username_keys: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://localhost:8090/ws".to_owned(),
            topic: "/topic/public".to_owned(),
            join_destination: "/app/chat.addUser".to_owned(),
            chat_destination: "/app/chat.sendMessage".to_owned(),
            username_keys: vec!["username".to_owned(), "name".to_owned()],
        }
    }
}

impl ChatConfig {
    /// Resolve the session username with `lookup`, trying the configured keys
    /// in order and skipping missing or empty values.
    pub fn resolve_username<F>(&self, mut lookup: F) -> Option<String>
    where
        F: FnMut(&str) -> Option<String>,
    {
        self.username_keys
            .iter()
            .find_map(|key| lookup(key).filter(|value| !value.is_empty()))
    }
}
