//! Chat room view: connection placeholder, message history, and send box.

use leptos::prelude::*;

use crate::config::ChatConfig;
use crate::net::socket;
use crate::state::chat::ChatState;
use crate::state::connection::ConnectionStatus;
use crate::util::storage;

/// Real-time chat view backed by one STOMP session per mount.
///
/// Shows a placeholder until the session reaches `Connected`, then the room
/// with message history and a send box. The session is instance-owned:
/// mounting connects, unmounting deactivates. A connect that never succeeds
/// leaves the placeholder up; there is no retry.
#[component]
pub fn ChatView() -> impl IntoView {
    let config = use_context::<ChatConfig>().unwrap_or_default();
    let status = RwSignal::new(ConnectionStatus::default());
    let chat = RwSignal::new(ChatState::default());
    let input = RwSignal::new(String::new());

    // Absent username means an empty sender; the auth module owns the keys.
    let username = storage::read_username(&config).unwrap_or_default();
    let handle = StoredValue::new(socket::connect(config, username, status, chat));
    on_cleanup(move || handle.get_value().deactivate());

    let messages_ref = NodeRef::<leptos::html::Div>::new();
    Effect::new(move || {
        let _ = chat.get().messages.len();

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let do_send = move || {
        let text = input.get();
        if text.trim().is_empty() {
            return;
        }
        handle.get_value().send_chat(text);
        input.set(String::new());
    };

    let on_click = move |_| do_send();

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    view! {
        <div class="chat-container">
            {move || {
                if status.get() != ConnectionStatus::Connected {
                    return view! {
                        <div class="chat-form">
                            <h1>"Not connected"</h1>
                        </div>
                    }
                        .into_any();
                }

                view! {
                    <div class="chat-room">
                        <div class="chat-messages" node_ref=messages_ref>
                            {move || {
                                chat.get()
                                    .messages
                                    .iter()
                                    .map(|msg| {
                                        let sender = msg.sender.clone();
                                        let content = msg.content.clone();
                                        view! {
                                            <div class="chat-message">
                                                <b>{sender}":"</b>
                                                " "
                                                {content}
                                            </div>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </div>
                        <div class="chat-send">
                            <input
                                type="text"
                                class="chat-input"
                                placeholder="Message..."
                                prop:value=move || input.get()
                                on:input=move |ev| input.set(event_target_value(&ev))
                                on:keydown=on_keydown
                            />
                            <button class="chat-btn" on:click=on_click>
                                "Send"
                            </button>
                        </div>
                    </div>
                }
                    .into_any()
            }}
        </div>
    }
}
