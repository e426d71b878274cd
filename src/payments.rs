use gloo_console::error as console_error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::prelude::*;

use crate::api::{self, Session};
use crate::finance::format_currency;
use crate::settings::AppSettings;
use crate::{icon_plus, page_shell};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Yearly,
}

impl Frequency {
    fn label(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default)]
    pub subscription_id: Option<String>,
    pub service_name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    #[serde(default)]
    pub last_payment_day: Option<String>,
    pub status: bool,
    pub cancel_url: String,
}

/// What an active subscription costs per month, yearly plans spread evenly.
fn monthly_equivalent(subscriptions: &[Subscription]) -> Decimal {
    subscriptions
        .iter()
        .filter(|s| s.status)
        .map(|s| match s.frequency {
            Frequency::Monthly => s.amount,
            Frequency::Yearly => s.amount / Decimal::from(12),
        })
        .sum()
}

#[function_component(PaymentsPage)]
pub fn payments_page() -> Html {
    let session = use_context::<Session>();
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let currency_symbol = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| "€".to_string());

    let payments = use_state(Vec::<Subscription>::new);
    let loading = use_state(|| true);
    let banner_error = use_state(|| None::<String>);
    let banner_success = use_state(|| None::<String>);

    let form_service = use_state(|| "".to_string());
    let form_amount = use_state(|| "".to_string());
    let form_frequency = use_state(|| Frequency::Monthly);
    let form_last_day = use_state(|| "".to_string());
    let form_cancel_url = use_state(|| "".to_string());
    let editing = use_state(|| None::<String>);
    let saving = use_state(|| false);

    {
        let payments = payments.clone();
        let loading = loading.clone();
        let banner_error = banner_error.clone();
        let user_id = session.as_ref().map(|s| s.user_id.clone());

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    if let Some(user_id) = user_id {
                        let path = format!("/subscriptions/{}", user_id);
                        match api::get_json::<Vec<Subscription>>(&path).await {
                            Ok(list) => payments.set(list),
                            Err(err) => {
                                console_error!(format!("could not load subscriptions: {}", err));
                                banner_error.set(Some(err.to_string()));
                            }
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let reset_form = {
        let form_service = form_service.clone();
        let form_amount = form_amount.clone();
        let form_frequency = form_frequency.clone();
        let form_last_day = form_last_day.clone();
        let form_cancel_url = form_cancel_url.clone();
        let editing = editing.clone();
        Callback::from(move |_: ()| {
            form_service.set("".to_string());
            form_amount.set("".to_string());
            form_frequency.set(Frequency::Monthly);
            form_last_day.set("".to_string());
            form_cancel_url.set("".to_string());
            editing.set(None);
        })
    };

    let on_submit = {
        let payments = payments.clone();
        let form_service = form_service.clone();
        let form_amount = form_amount.clone();
        let form_frequency = form_frequency.clone();
        let form_last_day = form_last_day.clone();
        let form_cancel_url = form_cancel_url.clone();
        let editing = editing.clone();
        let saving = saving.clone();
        let banner_error = banner_error.clone();
        let banner_success = banner_success.clone();
        let reset_form = reset_form.clone();
        let session = session.clone();

        Callback::from(move |_| {
            let service = form_service.trim().to_string();
            let amount = form_amount.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);

            if service.is_empty() {
                banner_error.set(Some("Enter the service name.".to_string()));
                return;
            }
            if amount <= Decimal::ZERO {
                banner_error.set(Some("Amount must be a positive number.".to_string()));
                return;
            }

            banner_error.set(None);
            banner_success.set(None);
            saving.set(true);

            let entry = Subscription {
                subscription_id: (*editing).clone(),
                service_name: service,
                amount,
                frequency: *form_frequency,
                last_payment_day: if form_last_day.trim().is_empty() {
                    None
                } else {
                    Some(form_last_day.trim().to_string())
                },
                status: true,
                cancel_url: form_cancel_url.trim().to_string(),
            };

            let payments = payments.clone();
            let saving = saving.clone();
            let banner_error = banner_error.clone();
            let banner_success = banner_success.clone();
            let reset_form = reset_form.clone();
            let editing_id = (*editing).clone();
            let user_id = session.as_ref().map(|s| s.user_id.clone()).unwrap_or_default();

            spawn_local(async move {
                let result = match &editing_id {
                    Some(id) => {
                        api::put_json::<Subscription, Subscription>(
                            &format!("/subscriptions/{}", id),
                            &entry,
                        )
                        .await
                    }
                    None => {
                        let mut created = entry.clone();
                        created.subscription_id = None;
                        let body = serde_json::json!({
                            "userId": user_id,
                            "subscription": created,
                        });
                        api::post_json::<serde_json::Value, Subscription>("/subscriptions", &body)
                            .await
                    }
                };

                match result {
                    Ok(saved) => {
                        let mut next = (*payments).clone();
                        match &editing_id {
                            Some(id) => {
                                if let Some(slot) = next
                                    .iter_mut()
                                    .find(|p| p.subscription_id.as_deref() == Some(id.as_str()))
                                {
                                    *slot = saved;
                                }
                                banner_success.set(Some("Subscription updated.".to_string()));
                            }
                            None => {
                                next.insert(0, saved);
                                banner_success.set(Some("Subscription added.".to_string()));
                            }
                        }
                        payments.set(next);
                        reset_form.emit(());
                    }
                    Err(err) => {
                        console_error!(format!("could not save subscription: {}", err));
                        banner_error.set(Some(err.to_string()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_edit = {
        let form_service = form_service.clone();
        let form_amount = form_amount.clone();
        let form_frequency = form_frequency.clone();
        let form_last_day = form_last_day.clone();
        let form_cancel_url = form_cancel_url.clone();
        let editing = editing.clone();
        Callback::from(move |subscription: Subscription| {
            form_service.set(subscription.service_name.clone());
            form_amount.set(subscription.amount.to_string());
            form_frequency.set(subscription.frequency);
            form_last_day.set(subscription.last_payment_day.clone().unwrap_or_default());
            form_cancel_url.set(subscription.cancel_url.clone());
            editing.set(subscription.subscription_id.clone());
        })
    };

    let on_toggle_status = {
        let payments = payments.clone();
        let banner_error = banner_error.clone();
        Callback::from(move |subscription: Subscription| {
            let Some(id) = subscription.subscription_id.clone() else {
                return;
            };
            let mut flipped = subscription.clone();
            flipped.status = !flipped.status;

            let payments = payments.clone();
            let banner_error = banner_error.clone();
            spawn_local(async move {
                match api::put_json::<Subscription, Subscription>(
                    &format!("/subscriptions/{}", id),
                    &flipped,
                )
                .await
                {
                    Ok(saved) => {
                        let mut next = (*payments).clone();
                        if let Some(slot) = next
                            .iter_mut()
                            .find(|p| p.subscription_id.as_deref() == Some(id.as_str()))
                        {
                            *slot = saved;
                        }
                        payments.set(next);
                    }
                    Err(err) => {
                        console_error!(format!("could not update subscription: {}", err));
                        banner_error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    let on_delete = {
        let payments = payments.clone();
        let banner_error = banner_error.clone();
        let banner_success = banner_success.clone();
        Callback::from(move |subscription: Subscription| {
            let Some(id) = subscription.subscription_id.clone() else {
                return;
            };
            let payments = payments.clone();
            let banner_error = banner_error.clone();
            let banner_success = banner_success.clone();
            spawn_local(async move {
                match api::delete(&format!("/subscriptions/{}", id)).await {
                    Ok(()) => {
                        let next = (*payments)
                            .clone()
                            .into_iter()
                            .filter(|p| p.subscription_id.as_deref() != Some(id.as_str()))
                            .collect();
                        payments.set(next);
                        banner_success.set(Some("Subscription removed.".to_string()));
                    }
                    Err(err) => {
                        console_error!(format!("could not remove subscription: {}", err));
                        banner_error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    let monthly_total = monthly_equivalent(&payments);

    html! {
        { page_shell(
            "Recurring Payments",
            html! {},
            html! {
                <>
                    <div class="grid grid-cols-1 lg:grid-cols-12 gap-4 items-stretch">
                        <div class="lg:col-span-4 bg-card p-5 rounded-[10px] shadow-sm border border-border flex flex-col justify-center">
                            <span class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{"Monthly Commitment"}</span>
                            <h3 class="text-2xl font-bold text-[#4CAF50] tracking-tight">{ format_currency(monthly_total, &currency_symbol) }</h3>
                            <p class="text-xs text-muted-foreground mt-2">{"Active subscriptions, yearly plans averaged per month"}</p>
                        </div>

                        <div class="lg:col-span-8 bg-card p-5 rounded-[10px] shadow-sm border border-border">
                            <h4 class="text-foreground font-bold text-[15px] mb-3 tracking-wider">
                                { if editing.is_some() { "Edit Subscription" } else { "Add Subscription" } }
                            </h4>
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-3 mb-4">
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Service"}</label>
                                    <input type="text" placeholder="e.g. Streaming" value={(*form_service).clone()} oninput={{
                                        let form_service = form_service.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            form_service.set(input.value());
                                        })
                                    }} class="w-full bg-input rounded-[10px] px-3 py-2 text-[11px] text-foreground border-none" />
                                </div>
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{ format!("Amount ({})", currency_symbol) }</label>
                                    <input type="number" placeholder="0.00" value={(*form_amount).clone()} oninput={{
                                        let form_amount = form_amount.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            form_amount.set(input.value());
                                        })
                                    }} class="w-full bg-input rounded-[10px] px-3 py-2 text-[11px] text-foreground border-none" />
                                </div>
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Frequency"}</label>
                                    <select onchange={{
                                        let form_frequency = form_frequency.clone();
                                        Callback::from(move |e: Event| {
                                            let input: HtmlSelectElement = e.target_unchecked_into();
                                            form_frequency.set(if input.value() == "yearly" {
                                                Frequency::Yearly
                                            } else {
                                                Frequency::Monthly
                                            });
                                        })
                                    }} class="w-full bg-input rounded-[10px] px-3 py-2 text-[11px] text-foreground border-none">
                                        <option value="monthly" selected={*form_frequency == Frequency::Monthly}>{"Monthly"}</option>
                                        <option value="yearly" selected={*form_frequency == Frequency::Yearly}>{"Yearly"}</option>
                                    </select>
                                </div>
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Last payment"}</label>
                                    <input type="date" value={(*form_last_day).clone()} oninput={{
                                        let form_last_day = form_last_day.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            form_last_day.set(input.value());
                                        })
                                    }} class="w-full bg-input rounded-[10px] px-3 py-2 text-[11px] text-foreground border-none" />
                                </div>
                            </div>
                            <div class="grid grid-cols-1 md:grid-cols-2 gap-3 mb-4">
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Cancellation page"}</label>
                                    <input type="url" placeholder="https://" value={(*form_cancel_url).clone()} oninput={{
                                        let form_cancel_url = form_cancel_url.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            form_cancel_url.set(input.value());
                                        })
                                    }} class="w-full bg-input rounded-[10px] px-3 py-2 text-[11px] text-foreground border-none" />
                                </div>
                                <div class="flex items-end gap-3">
                                    <button onclick={on_submit} class="flex-1 bg-primary text-primary-foreground py-2 rounded-[10px] text-[11px] font-bold flex items-center justify-center gap-2" disabled={*saving}>
                                        { icon_plus() }
                                        { if *saving { "Saving..." } else if editing.is_some() { "Save changes" } else { "Add" } }
                                    </button>
                                    <button onclick={{
                                        let reset_form = reset_form.clone();
                                        Callback::from(move |_| reset_form.emit(()))
                                    }} class="flex-1 bg-secondary text-secondary-foreground py-2 rounded-[10px] text-[11px] font-bold">
                                        {"Clear"}
                                    </button>
                                </div>
                            </div>
                            {
                                if let Some(msg) = &*banner_error {
                                    html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                                } else if let Some(msg) = &*banner_success {
                                    html! { <p class="text-sm text-green-600">{ msg.clone() }</p> }
                                } else { html! {} }
                            }
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-5 border-b border-border">
                            <h3 class="font-bold text-lg text-foreground">{"Your Subscriptions"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold">{"Service"}</th>
                                        <th class="px-6 py-4 font-bold">{"Frequency"}</th>
                                        <th class="px-6 py-4 font-bold">{"Last payment"}</th>
                                        <th class="px-6 py-4 font-bold">{"Status"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="6" class="px-6 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr> }
                                    } else if payments.is_empty() {
                                        html! { <tr><td colspan="6" class="px-6 py-6 text-center text-muted-foreground">{"No recurring payments yet."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for payments.iter().enumerate().map(|(idx, subscription)| {
                                                    let edit = {
                                                        let on_edit = on_edit.clone();
                                                        let subscription = subscription.clone();
                                                        Callback::from(move |_| on_edit.emit(subscription.clone()))
                                                    };
                                                    let toggle = {
                                                        let on_toggle_status = on_toggle_status.clone();
                                                        let subscription = subscription.clone();
                                                        Callback::from(move |_| on_toggle_status.emit(subscription.clone()))
                                                    };
                                                    let remove = {
                                                        let on_delete = on_delete.clone();
                                                        let subscription = subscription.clone();
                                                        Callback::from(move |_| on_delete.emit(subscription.clone()))
                                                    };

                                                    html! {
                                                        <tr key={idx} class="text-sm hover:bg-muted/40 transition-colors">
                                                            <td class="px-6 py-4 text-foreground font-semibold">
                                                                { subscription.service_name.clone() }
                                                                { if !subscription.cancel_url.is_empty() {
                                                                    html! {
                                                                        <a href={subscription.cancel_url.clone()} target="_blank" class="ml-2 text-xs text-primary underline">{"manage"}</a>
                                                                    }
                                                                } else { html! {} } }
                                                            </td>
                                                            <td class="px-6 py-4 text-muted-foreground">{ subscription.frequency.label() }</td>
                                                            <td class="px-6 py-4 text-muted-foreground">{ subscription.last_payment_day.clone().unwrap_or_else(|| "—".to_string()) }</td>
                                                            <td class="px-6 py-4">
                                                                <span class={if subscription.status {
                                                                    "bg-green-100 text-green-700 px-3 py-1 rounded-full text-[10px] font-bold"
                                                                } else {
                                                                    "bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold"
                                                                }}>
                                                                    { if subscription.status { "Active" } else { "Paused" } }
                                                                </span>
                                                            </td>
                                                            <td class="px-6 py-4 text-right font-semibold text-foreground">{ format_currency(subscription.amount, &currency_symbol) }</td>
                                                            <td class="px-6 py-4 text-right space-x-2">
                                                                <button onclick={edit} class="text-xs font-bold text-primary">{"Edit"}</button>
                                                                <button onclick={toggle} class="text-xs font-bold text-amber-600">
                                                                    { if subscription.status { "Pause" } else { "Resume" } }
                                                                </button>
                                                                <button onclick={remove} class="text-xs font-bold text-red-500">{"Delete"}</button>
                                                            </td>
                                                        </tr>
                                                    }
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>
                </>
            }
        ) }
    }
}
