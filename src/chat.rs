use gloo_console::error as console_error;
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, InputEvent};
use yew::prelude::*;

use crate::api;
use crate::{icon_message_circle, icon_send, icon_x};

const TUTORIAL_STEPS: [&str; 6] = [
    "Hi! I'm your financial assistant. Would you like a quick tour of your dashboard, or do you prefer to ask me about your finances right away?",
    "This is your profile. Everything about you lives there, laid out simply so it's easy to check and change.",
    "Here is your total balance. Big numbers and clear colors so you can read it at a glance.",
    "This section shows your income. It's grouped by source so you can see where money comes from.",
    "And these are your expenses. Color codes help you spot the heavy ones quickly.",
    "Finally, the transactions summary. One line per movement, nothing to decode.",
];

const QUICK_TIPS: [&str; 6] = [
    "💡 Set clear, predictable money routines",
    "📊 Use charts to understand where money goes",
    "🎯 Pick specific, measurable saving goals",
    "⏰ Schedule reminders for payments and reviews",
    "💰 Automate savings and recurring payments",
    "🏦 Keep one consistent system for tracking spending",
];

const FALLBACK_REPLY: &str =
    "Sorry, I couldn't reach the advisor right now. Please try again in a moment.";

#[derive(Clone, Copy, PartialEq)]
enum Sender {
    Bot,
    User,
}

#[derive(Clone, PartialEq)]
struct ChatMessage {
    text: String,
    sender: Sender,
}

fn bot(text: &str) -> ChatMessage {
    ChatMessage {
        text: text.to_string(),
        sender: Sender::Bot,
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    user_message: String,
    language: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatReply {
    advisor_response: String,
}

/// Floating helper widget: a scripted dashboard tour first, free chat with
/// the remote advisor once the tour is done.
#[function_component(ChatWidget)]
pub fn chat_widget() -> Html {
    let is_open = use_state(|| false);
    let messages = use_state(|| vec![bot(TUTORIAL_STEPS[0])]);
    let tutorial_step = use_state(|| 0usize);
    let tutorial_mode = use_state(|| true);
    let input = use_state(|| "".to_string());
    let sending = use_state(|| false);

    let on_toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_| is_open.set(!*is_open))
    };

    let on_close = {
        let is_open = is_open.clone();
        let messages = messages.clone();
        let tutorial_step = tutorial_step.clone();
        let tutorial_mode = tutorial_mode.clone();
        Callback::from(move |_| {
            is_open.set(false);
            messages.set(vec![bot(TUTORIAL_STEPS[0])]);
            tutorial_step.set(0);
            tutorial_mode.set(true);
        })
    };

    let on_next = {
        let messages = messages.clone();
        let tutorial_step = tutorial_step.clone();
        let tutorial_mode = tutorial_mode.clone();
        Callback::from(move |_| {
            let mut next = (*messages).clone();
            if *tutorial_step + 1 < TUTORIAL_STEPS.len() {
                tutorial_step.set(*tutorial_step + 1);
                next.push(bot(TUTORIAL_STEPS[*tutorial_step + 1]));
            } else {
                tutorial_mode.set(false);
                next.push(bot(
                    "That's the tour! Ask me anything about budgeting, saving or your spending habits.",
                ));
            }
            messages.set(next);
        })
    };

    let on_tip = {
        let messages = messages.clone();
        Callback::from(move |tip: &'static str| {
            let mut next = (*messages).clone();
            next.push(bot(tip));
            messages.set(next);
        })
    };

    let on_send = {
        let messages = messages.clone();
        let input = input.clone();
        let sending = sending.clone();
        Callback::from(move |_| {
            let text = input.trim().to_string();
            if text.is_empty() || *sending {
                return;
            }

            let mut next = (*messages).clone();
            next.push(ChatMessage {
                text: text.clone(),
                sender: Sender::User,
            });
            messages.set(next.clone());
            input.set("".to_string());
            sending.set(true);

            let messages = messages.clone();
            let sending = sending.clone();
            spawn_local(async move {
                let request = ChatRequest {
                    user_message: text.to_lowercase(),
                    language: "en",
                };
                match api::post_json::<ChatRequest, ChatReply>("/chat", &request).await {
                    Ok(reply) => next.push(bot(&reply.advisor_response)),
                    Err(err) => {
                        console_error!(format!("advisor call failed: {}", err));
                        next.push(bot(FALLBACK_REPLY));
                    }
                }
                messages.set(next);
                sending.set(false);
            });
        })
    };

    html! {
        <div class="fixed bottom-6 right-6 z-50 flex flex-col items-end gap-3">
            {
                if *is_open {
                    html! {
                        <div class="w-80 bg-card border border-border rounded-2xl shadow-lg overflow-hidden flex flex-col">
                            <div class="px-4 py-3 bg-primary text-primary-foreground flex items-center justify-between">
                                <span class="text-sm font-bold">{"FinWell Assistant"}</span>
                                <button onclick={on_close} aria-label="Close chat">{ icon_x() }</button>
                            </div>

                            <div class="h-72 overflow-y-auto px-3 py-3 space-y-2">
                                { for messages.iter().enumerate().map(|(idx, message)| {
                                    let class_name = match message.sender {
                                        Sender::Bot => "max-w-[85%] bg-secondary text-secondary-foreground rounded-xl px-3 py-2 text-xs",
                                        Sender::User => "max-w-[85%] bg-primary text-primary-foreground rounded-xl px-3 py-2 text-xs ml-auto",
                                    };
                                    html! { <div key={idx} class={class_name}>{ message.text.clone() }</div> }
                                }) }
                                {
                                    if *sending {
                                        html! { <div class="max-w-[85%] bg-secondary text-muted-foreground rounded-xl px-3 py-2 text-xs italic">{"Thinking..."}</div> }
                                    } else { html! {} }
                                }
                            </div>

                            {
                                if *tutorial_mode {
                                    html! {
                                        <div class="px-3 pb-3">
                                            <button onclick={on_next} class="w-full bg-primary text-primary-foreground py-2 rounded-xl text-xs font-bold">
                                                { if *tutorial_step + 1 < TUTORIAL_STEPS.len() { "Next" } else { "Finish tour" } }
                                            </button>
                                        </div>
                                    }
                                } else {
                                    html! {
                                        <>
                                            <div class="px-3 pb-2 flex flex-wrap gap-1">
                                                { for QUICK_TIPS.iter().take(3).map(|tip| {
                                                    let on_tip = on_tip.clone();
                                                    let tip: &'static str = *tip;
                                                    html! {
                                                        <button
                                                            onclick={Callback::from(move |_| on_tip.emit(tip))}
                                                            class="bg-secondary text-secondary-foreground px-2 py-1 rounded-full text-[10px]"
                                                        >
                                                            { tip.chars().take(24).collect::<String>() }{ "…" }
                                                        </button>
                                                    }
                                                }) }
                                            </div>
                                            <div class="px-3 pb-3 flex gap-2">
                                                <input
                                                    placeholder="Ask about your money..."
                                                    value={(*input).clone()}
                                                    oninput={{
                                                        let input = input.clone();
                                                        Callback::from(move |e: InputEvent| {
                                                            let field: HtmlInputElement = e.target_unchecked_into();
                                                            input.set(field.value());
                                                        })
                                                    }}
                                                    class="flex-1 bg-input rounded-xl px-3 py-2 text-xs text-foreground border-none"
                                                />
                                                <button onclick={on_send} disabled={*sending} class="bg-primary text-primary-foreground px-3 rounded-xl" aria-label="Send">
                                                    { icon_send() }
                                                </button>
                                            </div>
                                        </>
                                    }
                                }
                            }
                        </div>
                    }
                } else { html! {} }
            }

            <button
                onclick={on_toggle}
                class="w-14 h-14 bg-primary text-primary-foreground rounded-full shadow-lg flex items-center justify-center hover:opacity-90 transition-all"
                aria-label="Financial assistant"
            >
                { icon_message_circle() }
            </button>
        </div>
    }
}
