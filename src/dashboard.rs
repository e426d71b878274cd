use gloo_console::error as console_error;
use gloo_net::http::Request;
use rust_decimal::Decimal;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, Session};
use crate::avatar::{status_color, AvatarCard};
use crate::chart::TransactionsChart;
use crate::finance::{
    aggregate_by_date, format_currency, top_sources, totals, FinancialHealth, Transaction,
    TransactionKind,
};
use crate::settings::AppSettings;
use crate::{icon_arrow_up_right, icon_credit_card, icon_map_pin, icon_wallet, page_shell};

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    UpRight,
    CreditCard,
    Wallet,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub amount: Decimal,
    pub icon: StatIcon,
    pub currency_symbol: String,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class="text-2xl font-bold text-[#4CAF50] tracking-tight">{ format_currency(props.amount, &props.currency_symbol) }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::UpRight => icon_arrow_up_right(),
                        StatIcon::CreditCard => icon_credit_card(),
                        StatIcon::Wallet => icon_wallet(),
                    }
                }
            </div>
        </div>
    }
}

#[derive(Deserialize)]
struct GeoResponse {
    country_name: Option<String>,
    currency: Option<String>,
    timezone: Option<String>,
}

#[derive(Clone, PartialEq)]
struct LocationInfo {
    country: String,
    currency: String,
    timezone: String,
}

fn fallback_location() -> LocationInfo {
    LocationInfo {
        country: "Spain".to_string(),
        currency: "EUR".to_string(),
        timezone: "Europe/Madrid".to_string(),
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let transactions = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);
    let location = use_state(|| None::<LocationInfo>);

    let session = use_context::<Session>();
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let currency_symbol = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| "€".to_string());
    // prefer the name the user picked, fall back to what the auth API knows
    let display_name = settings
        .as_ref()
        .map(|s| s.display_name.clone())
        .filter(|name| !name.trim().is_empty())
        .or_else(|| session.as_ref().and_then(|s| s.name.clone()))
        .unwrap_or_default();

    {
        let transactions = transactions.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::get_json::<Vec<Transaction>>("/balance/transactions").await {
                        Ok(list) => transactions.set(list),
                        Err(err) => {
                            console_error!(format!("could not load transactions: {}", err));
                            load_error.set(Some(err.to_string()));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    {
        let location = location.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let fetched = match Request::get("https://ipapi.co/json/").send().await {
                        Ok(resp) if resp.ok() => resp.json::<GeoResponse>().await.ok(),
                        _ => None,
                    };
                    let info = match fetched {
                        Some(geo) => LocationInfo {
                            country: geo.country_name.unwrap_or_else(|| fallback_location().country),
                            currency: geo.currency.unwrap_or_else(|| fallback_location().currency),
                            timezone: geo.timezone.unwrap_or_else(|| fallback_location().timezone),
                        },
                        None => {
                            console_error!("location lookup failed, using defaults");
                            fallback_location()
                        }
                    };
                    location.set(Some(info));
                });
                || ()
            },
            (),
        );
    }

    // recomputed from the current list on every render
    let aggregates = aggregate_by_date(&transactions);
    let health = FinancialHealth::assess(&transactions);
    let (total_income, total_expenses) = totals(&transactions);
    let balance = total_income - total_expenses;
    let top_income = top_sources(&transactions, TransactionKind::Income, 3);
    let top_expense = top_sources(&transactions, TransactionKind::Expense, 3);
    let score = health.score().clamp(0.0, 100.0);

    let greeting = if display_name.trim().is_empty() {
        "Welcome to FinWell".to_string()
    } else {
        format!("Welcome back, {}", display_name.trim())
    };

    html! {
        { page_shell(
            "Dashboard",
            html! {},
            html! {
                <>
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h2 class="text-xl font-bold text-foreground">{ greeting }</h2>
                        <p class="text-sm text-muted-foreground mt-1">{"Your personal finance overview."}</p>
                        {
                            if let Some(info) = &*location {
                                html! {
                                    <div class="flex flex-wrap gap-2 mt-3">
                                        <span class="flex items-center gap-1 bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[11px] font-bold">
                                            { icon_map_pin() }{ info.country.clone() }
                                        </span>
                                        <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[11px] font-bold">
                                            { format!("Currency: {}", info.currency) }
                                        </span>
                                        <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[11px] font-bold">
                                            { format!("Zone: {}", info.timezone) }
                                        </span>
                                    </div>
                                }
                            } else { html! {} }
                        }
                    </div>

                    {
                        if let Some(err) = &*load_error {
                            html! {
                                <div class="bg-red-50 border border-red-200 text-red-700 rounded-[10px] p-4 text-sm">
                                    { format!("Transactions unavailable: {}", err) }
                                </div>
                            }
                        } else { html! {} }
                    }

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <StatCard title="Total Income" amount={total_income} icon={StatIcon::UpRight} currency_symbol={currency_symbol.clone()} />
                        <StatCard title="Total Expenses" amount={total_expenses} icon={StatIcon::CreditCard} currency_symbol={currency_symbol.clone()} />
                        <StatCard title="Balance" amount={balance} icon={StatIcon::Wallet} currency_symbol={currency_symbol.clone()} />
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <div class="flex items-center justify-between mb-3">
                                <h3 class="font-bold text-foreground text-lg">{"Financial Health"}</h3>
                                <span
                                    class="px-3 py-1 rounded-full text-[11px] font-bold text-[#173E63]"
                                    style={format!("background-color: {}", status_color(health.status))}
                                >
                                    { health.status.label() }
                                </span>
                            </div>
                            <div class="flex items-end gap-2 mb-2">
                                <span class="text-3xl font-black text-foreground">{ format!("{:.0}", score) }</span>
                                <span class="text-sm text-muted-foreground mb-1">{"/ 100 savings score"}</span>
                            </div>
                            <div class="h-2 w-full bg-secondary rounded-full overflow-hidden mb-3">
                                <div
                                    class="h-full"
                                    style={format!("width: {}%; background-color: {}", score as i32, status_color(health.status))}
                                ></div>
                            </div>
                            <p class="text-sm text-muted-foreground">{ health.message }</p>
                        </div>

                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <h3 class="font-bold text-foreground text-lg mb-3">{"Your Financial Avatar"}</h3>
                            <AvatarCard status={health.status} />
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-4">{"How is my money doing?"}</h3>
                        <TransactionsChart aggregates={aggregates} currency_symbol={currency_symbol.clone()} />
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <p class="text-sm text-muted-foreground mb-2">{"Top income sources"}</p>
                            { if top_income.is_empty() {
                                html! { <p class="text-sm text-muted-foreground">{"Nothing here yet."}</p> }
                            } else {
                                html! {
                                    <ul class="space-y-1">
                                        { for top_income.iter().map(|(name, amount)| html! {
                                            <li class="flex items-center justify-between text-sm">
                                                <span class="text-foreground">{ name.clone() }</span>
                                                <span class="font-semibold text-[#4CAF50]">{ format_currency(*amount, &currency_symbol) }</span>
                                            </li>
                                        }) }
                                    </ul>
                                }
                            }}
                        </div>
                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <p class="text-sm text-muted-foreground mb-2">{"Top expenses"}</p>
                            { if top_expense.is_empty() {
                                html! { <p class="text-sm text-muted-foreground">{"Nothing here yet."}</p> }
                            } else {
                                html! {
                                    <ul class="space-y-1">
                                        { for top_expense.iter().map(|(name, amount)| html! {
                                            <li class="flex items-center justify-between text-sm">
                                                <span class="text-foreground">{ name.clone() }</span>
                                                <span class="font-semibold text-red-500">{ format_currency(*amount, &currency_symbol) }</span>
                                            </li>
                                        }) }
                                    </ul>
                                }
                            }}
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-6 flex justify-between items-center border-b border-border">
                            <h3 class="font-bold text-foreground text-lg">{"Recent Transactions"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Description"}</th>
                                        <th class="px-8 py-4 font-bold">{"Type"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="4" class="px-8 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr> }
                                    } else if transactions.is_empty() {
                                        html! { <tr><td colspan="4" class="px-8 py-6 text-center text-muted-foreground">{"No transactions yet."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for transactions.iter().enumerate().map(|(idx, tx)| {
                                                    let (badge, amount_class, amount_label) = match tx.category {
                                                        TransactionKind::Income => (
                                                            "Income",
                                                            "px-8 py-4 text-right font-semibold text-[#4CAF50]",
                                                            format!("+ {}", format_currency(tx.amount, &currency_symbol)),
                                                        ),
                                                        TransactionKind::Expense => (
                                                            "Expense",
                                                            "px-8 py-4 text-right font-semibold text-red-500",
                                                            format!("- {}", format_currency(tx.amount, &currency_symbol)),
                                                        ),
                                                    };
                                                    html! {
                                                        <tr key={idx} class="text-sm hover:bg-muted/30 transition-colors">
                                                            <td class="px-8 py-4 text-muted-foreground">{ tx.date.clone() }</td>
                                                            <td class="px-8 py-4 text-foreground">{ tx.name.clone() }</td>
                                                            <td class="px-8 py-4">
                                                                <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ badge }</span>
                                                            </td>
                                                            <td class={amount_class}>{ amount_label }</td>
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
