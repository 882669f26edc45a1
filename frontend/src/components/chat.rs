use faq_widget_core::{ChatMessage, FaqEntry};
use leptos::ev;
use leptos::prelude::*;

use crate::state::AppState;

/// Chat panel with transcript, related FAQs, feedback and input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (matching_only, set_matching_only) = signal(false);

    let messages = move || {
        state.panel_state.with(|s| {
            if matching_only.get() {
                s.visible_messages().to_vec()
            } else {
                s.transcript.clone()
            }
        })
    };

    let related_faqs = move || {
        state
            .panel_state
            .with(|s| s.filter.as_ref().map(|f| f.faqs.clone()).unwrap_or_default())
    };

    view! {
        <main class="chat-area">
            <div class="chat-toolbar">
                <label>
                    <input
                        type="checkbox"
                        prop:checked=matching_only
                        on:change=move |ev| set_matching_only.set(event_target_checked(&ev))
                    />
                    " Only show messages matching my last question"
                </label>
                <button class="clear-btn" on:click=move |_| state.clear()>
                    "Clear"
                </button>
            </div>

            // Messages
            <div class="messages-container">
                {move || {
                    messages()
                        .into_iter()
                        .map(|msg| view! { <MessageBubble msg=msg /> })
                        .collect_view()
                }}
                {move || {
                    state.panel_state.with(|s| s.busy).then(|| {
                        view! { <div class="message assistant typing">"Looking that up…"</div> }
                    })
                }}
            </div>

            <RelatedFaqs faqs=Signal::derive(related_faqs) />

            <ChatInput />
        </main>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(msg: ChatMessage) -> impl IntoView {
    let css_class = format!("message {}", msg.role);
    let label = msg.role.to_string();

    view! {
        <div class=css_class class:error=msg.error>
            <div class="role-label">{label}</div>
            <div class="content">{msg.content}</div>
        </div>
    }
}

#[component]
fn RelatedFaqs(faqs: Signal<Vec<FaqEntry>>) -> impl IntoView {
    view! {
        <Show when=move || !faqs.with(Vec::is_empty)>
            <section class="related-faqs">
                <h3>"Related FAQs"</h3>
                {move || {
                    faqs.get()
                        .into_iter()
                        .map(|faq| {
                            view! {
                                <details>
                                    <summary>{faq.title}</summary>
                                    <p>{faq.content}</p>
                                </details>
                            }
                        })
                        .collect_view()
                }}
            </section>
        </Show>
    }
}

/// Chat input with textarea and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let is_sending = move || state.panel_state.with(|s| s.busy);

    let send = move || {
        if is_sending() {
            return;
        }
        state.submit(input.get());
        set_input.set(String::new());
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="input-area">
            {move || {
                state
                    .panel_state
                    .with(|s| s.feedback.clone())
                    .map(|text| view! { <div class="feedback">{text}</div> })
            }}
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Ask a question… (Enter to send, Shift+Enter for newline)"
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                    disabled=is_sending
                />
                <button class="send-btn" on:click=move |_| send() disabled=is_sending>
                    {move || if is_sending() { "Sending…" } else { "Send" }}
                </button>
            </div>
        </div>
    }
}
