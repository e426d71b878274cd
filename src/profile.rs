use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use web_sys::{HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::prelude::*;

use crate::api::Session;
use crate::finance::format_currency;
use crate::page_shell;
use crate::settings::{currency_symbol_for, save_settings, AppSettings};

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneySource {
    pub label: String,
    pub amount: Decimal,
}

fn load_sources(key: &str) -> Vec<MoneySource> {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(key) {
                if let Ok(items) = serde_json::from_str::<Vec<MoneySource>>(&raw) {
                    return items;
                }
            }
        }
    }
    vec![]
}

fn save_sources(key: &str, items: &Vec<MoneySource>) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(raw) = serde_json::to_string(items) {
                let _ = storage.set_item(key, &raw);
            }
        }
    }
}

#[derive(Properties, PartialEq)]
struct SourceListProps {
    title: &'static str,
    storage_key: &'static str,
    placeholder: &'static str,
    accent: &'static str,
    currency_symbol: String,
}

/// Editable label+amount list persisted to localStorage, used for both the
/// income-sources and fixed-expenses cards.
#[function_component(SourceList)]
fn source_list(props: &SourceListProps) -> Html {
    let items = use_state({
        let key = props.storage_key;
        move || load_sources(key)
    });
    let form_label = use_state(|| "".to_string());
    let form_amount = use_state(|| "".to_string());
    let form_error = use_state(|| None::<String>);

    let total: Decimal = items.iter().map(|i| i.amount).sum();

    let on_add = {
        let items = items.clone();
        let form_label = form_label.clone();
        let form_amount = form_amount.clone();
        let form_error = form_error.clone();
        let key = props.storage_key;
        Callback::from(move |_| {
            let label = form_label.trim().to_string();
            let amount = form_amount.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);
            if label.is_empty() || amount <= Decimal::ZERO {
                form_error.set(Some("Enter a name and a positive amount.".to_string()));
                return;
            }

            let mut next = (*items).clone();
            match next.iter_mut().find(|i| i.label.eq_ignore_ascii_case(&label)) {
                Some(existing) => existing.amount = amount,
                None => next.push(MoneySource { label, amount }),
            }
            save_sources(key, &next);
            items.set(next);
            form_label.set("".to_string());
            form_amount.set("".to_string());
            form_error.set(None);
        })
    };

    let on_remove = {
        let items = items.clone();
        let key = props.storage_key;
        Callback::from(move |label: String| {
            let next: Vec<MoneySource> = (*items)
                .clone()
                .into_iter()
                .filter(|i| i.label != label)
                .collect();
            save_sources(key, &next);
            items.set(next);
        })
    };

    html! {
        <div class="bg-card rounded-[10px] p-6 border border-border">
            <div class="flex items-center justify-between mb-3">
                <h3 class="font-bold text-foreground text-lg">{ props.title }</h3>
                <span class="text-sm font-bold" style={format!("color: {}", props.accent)}>
                    { format_currency(total, &props.currency_symbol) }
                </span>
            </div>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-3 mb-4">
                <input placeholder={props.placeholder} value={(*form_label).clone()} oninput={{
                    let form_label = form_label.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        form_label.set(input.value());
                    })
                }} class="p-2 bg-input border-none rounded text-xs text-foreground" />
                <input placeholder={format!("Amount ({})", props.currency_symbol)} value={(*form_amount).clone()} oninput={{
                    let form_amount = form_amount.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        form_amount.set(input.value());
                    })
                }} class="p-2 bg-input border-none rounded text-xs text-foreground" />
                <button onclick={on_add} class="bg-primary text-primary-foreground px-4 rounded text-xs font-bold">{"Save"}</button>
            </div>
            {
                if let Some(msg) = &*form_error {
                    html! { <p class="text-sm text-red-500 mb-3">{ msg.clone() }</p> }
                } else { html! {} }
            }
            { if items.is_empty() {
                html! { <p class="text-sm text-muted-foreground">{"Nothing recorded yet."}</p> }
            } else {
                html! {
                    <ul class="space-y-2">
                        { for items.iter().map(|item| {
                            let remove = {
                                let on_remove = on_remove.clone();
                                let label = item.label.clone();
                                Callback::from(move |_| on_remove.emit(label.clone()))
                            };
                            html! {
                                <li class="flex items-center justify-between text-sm p-2 border border-border rounded">
                                    <span class="text-foreground">{ item.label.clone() }</span>
                                    <span class="flex items-center gap-3">
                                        <span class="font-semibold" style={format!("color: {}", props.accent)}>
                                            { format_currency(item.amount, &props.currency_symbol) }
                                        </span>
                                        <button onclick={remove} class="text-xs font-bold text-red-500">{"Remove"}</button>
                                    </span>
                                </li>
                            }
                        }) }
                    </ul>
                }
            }}
        </div>
    }
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let session = use_context::<Session>();
    let settings = use_context::<UseStateHandle<AppSettings>>();

    let currency_symbol = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| "€".to_string());
    let current_currency = settings
        .as_ref()
        .map(|s| s.currency_code.clone())
        .unwrap_or_else(|| "EUR".to_string());
    let display_name = settings
        .as_ref()
        .map(|s| s.display_name.clone())
        .unwrap_or_default();

    let name_draft = use_state(|| display_name.clone());
    let name_saved = use_state(|| false);

    let email_alerts = use_state(|| true);
    let push_alerts = use_state(|| true);
    let monthly_report = use_state(|| false);

    let on_save_name = {
        let settings = settings.clone();
        let name_draft = name_draft.clone();
        let name_saved = name_saved.clone();
        Callback::from(move |_| {
            if let Some(settings) = settings.as_ref() {
                let mut next = (**settings).clone();
                next.display_name = name_draft.trim().to_string();
                save_settings(&next);
                settings.set(next);
                name_saved.set(true);
            }
        })
    };

    let on_currency_change = {
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            if let Some(settings) = settings.as_ref() {
                let input: HtmlSelectElement = e.target_unchecked_into();
                let code = input.value();
                let symbol = currency_symbol_for(&code).to_string();
                let mut next = (**settings).clone();
                next.currency_code = code;
                next.currency_symbol = symbol;
                save_settings(&next);
                settings.set(next);
            }
        })
    };

    let toggle = |label: &'static str, hint: &'static str, handle: &UseStateHandle<bool>| {
        let handle = handle.clone();
        let checked = *handle;
        html! {
            <div class="flex items-start gap-3 pb-4 border-b border-border last:border-b-0">
                <div class="flex-1 pt-1">
                    <p class="font-medium text-foreground">{ label }</p>
                    <p class="text-sm text-muted-foreground">{ hint }</p>
                </div>
                <input type="checkbox" checked={checked} onclick={Callback::from(move |_| handle.set(!*handle))} />
            </div>
        }
    };

    html! {
        { page_shell(
            "Profile",
            html! {},
            html! {
                <>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <h2 class="text-xl font-bold text-foreground mb-4">{"Your details"}</h2>
                            <p class="text-sm text-muted-foreground mb-4">
                                { session.as_ref().map(|s| s.email.clone()).unwrap_or_else(|| "Not signed in".to_string()) }
                            </p>
                            <label class="block text-sm font-medium text-foreground mb-2">{"Display name"}</label>
                            <div class="flex gap-2">
                                <input value={(*name_draft).clone()} oninput={{
                                    let name_draft = name_draft.clone();
                                    let name_saved = name_saved.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        name_draft.set(input.value());
                                        name_saved.set(false);
                                    })
                                }} class="flex-1 px-4 py-2 bg-input border border-input rounded-lg text-foreground" placeholder="How should we greet you?" />
                                <button onclick={on_save_name} class="bg-primary text-primary-foreground px-4 rounded-lg text-sm font-bold">{"Save"}</button>
                            </div>
                            {
                                if *name_saved {
                                    html! { <p class="text-sm text-green-600 mt-2">{"Saved."}</p> }
                                } else { html! {} }
                            }

                            <div class="mt-6">
                                <label class="block text-sm font-medium text-foreground mb-2">{"Currency"}</label>
                                <select value={current_currency} onchange={on_currency_change} class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground">
                                    <option value="EUR">{"EUR (€)"}</option>
                                    <option value="USD">{"USD ($)"}</option>
                                    <option value="GBP">{"GBP (£)"}</option>
                                    <option value="JPY">{"JPY (¥)"}</option>
                                    <option value="MXN">{"MXN ($)"}</option>
                                </select>
                                <p class="text-xs text-muted-foreground mt-2">{"Applied across the dashboard and reports."}</p>
                            </div>
                        </div>

                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <h2 class="text-xl font-bold text-foreground mb-6">{"Notifications"}</h2>
                            <div class="space-y-4">
                                { toggle("Email alerts", "A heads-up when something needs your attention", &email_alerts) }
                                { toggle("Push alerts", "Instant notifications on this device", &push_alerts) }
                                { toggle("Monthly report", "A summary of your spending every month", &monthly_report) }
                            </div>
                        </div>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                        <SourceList
                            title="Income sources"
                            storage_key="income_sources"
                            placeholder="e.g. Salary"
                            accent="#4CAF50"
                            currency_symbol={currency_symbol.clone()}
                        />
                        <SourceList
                            title="Fixed expenses"
                            storage_key="fixed_expenses"
                            placeholder="e.g. Housing"
                            accent="#f47067"
                            currency_symbol={currency_symbol.clone()}
                        />
                    </div>
                </>
            }
        ) }
    }
}
