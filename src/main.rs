use gloo_console::error as console_error;
use gloo_net::http::Request;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::{InputEvent, RequestCredentials};
use yew::prelude::*;

mod api;
mod avatar;
mod chart;
mod chat;
mod dashboard;
mod finance;
mod game;
mod payments;
mod profile;
mod settings;

use api::{AuthResponse, Session};
use chat::ChatWidget;
use dashboard::DashboardPage;
use game::GamePage;
use payments::PaymentsPage;
use profile::ProfilePage;
use settings::{load_settings, save_settings, AppSettings};

#[derive(Clone, Copy, PartialEq)]
enum AuthStatus {
    Checking,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Dashboard,
    Profile,
    Payments,
    Game,
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let dark = settings.as_ref().map(|s| s.dark_mode).unwrap_or(true);

    html! {
        <div class={if dark { "flex h-screen bg-[#1a1a1a] dark" } else { "flex h-screen bg-background" }}>
            <div class="hidden md:flex">
                <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>

            <ChatWidget />
        </div>
    }
}

#[function_component(Header)]
fn header() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let dark = settings.as_ref().map(|s| s.dark_mode).unwrap_or(true);

    let show_notifications = use_state(|| false);
    let toggle_notifications = {
        let show_notifications = show_notifications.clone();
        Callback::from(move |_| show_notifications.set(!*show_notifications))
    };

    let toggle_theme = {
        let settings = settings.clone();
        Callback::from(move |_| {
            if let Some(settings) = settings.as_ref() {
                let mut next = (**settings).clone();
                next.dark_mode = !next.dark_mode;
                save_settings(&next);
                settings.set(next);
            }
        })
    };

    let notifications = vec![
        (
            "Savings milestone!",
            "Your savings rate crossed 30% this month.",
            "Just now",
        ),
        (
            "Subscription due",
            "A recurring payment renews in 3 days.",
            "2h ago",
        ),
    ];

    html! {
        <header class="bg-[#121f16] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex-1"></div>
            <div class="relative flex items-center gap-4">
                <button class="p-2 hover:bg-secondary rounded-full transition-colors" aria-label="Toggle theme" onclick={toggle_theme}>
                    { if dark { icon_sun() } else { icon_moon() } }
                </button>
                <button class="p-2 hover:bg-secondary rounded-full transition-colors relative" aria-label="Notifications" onclick={toggle_notifications}>
                    { icon_bell() }
                    <span class="absolute top-1 right-1 w-2 h-2 bg-red-500 rounded-full"></span>
                </button>
                {
                    if *show_notifications {
                        html! {
                            <div class="absolute right-0 top-12 w-80 bg-card border border-border rounded-xl shadow-lg overflow-hidden z-50">
                                <div class="px-4 py-3 border-b border-border">
                                    <h4 class="text-sm font-bold text-foreground">{"Notifications"}</h4>
                                </div>
                                <div class="divide-y divide-border">
                                    { for notifications.iter().map(|(title, message, time)| html! {
                                        <div class="px-4 py-3 hover:bg-muted/40">
                                            <div class="flex items-center justify-between">
                                                <p class="text-sm font-bold text-foreground">{ *title }</p>
                                                <span class="text-[10px] text-muted-foreground font-bold uppercase tracking-tighter">{ *time }</span>
                                            </div>
                                            <p class="text-xs text-muted-foreground mt-1">{ *message }</p>
                                        </div>
                                    }) }
                                </div>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Dashboard",
            page: Page::Dashboard,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Profile",
            page: Page::Profile,
            icon: icon_user,
        },
        NavItem {
            label: "Recurring Payments",
            page: Page::Payments,
            icon: icon_repeat,
        },
        NavItem {
            label: "Money Game",
            page: Page::Game,
            icon: icon_gamepad,
        },
    ];

    let on_logout = Callback::from(move |_| {
        spawn_local(async move {
            if let Err(err) = api::post_empty("/auth/signout").await {
                console_error!(format!("sign-out call failed: {}", err));
            }
            api::clear_session();
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        });
    });

    html! {
        <div class="w-[220px] h-screen bg-[#121f16] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-12 h-12 bg-[#4CAF50] rounded-full flex items-center justify-center text-white text-xl font-black">
                    {"F"}
                </div>
                <span class="text-[#4CAF50] text-2xl font-black tracking-tight">{"FinWell"}</span>
            </div>

            <div class="flex-1 bg-[#1c2223] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let is_active = item.page == props.active_page;
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#4CAF50]/20 text-[#4CAF50] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                        { icon_log_out() }
                        <span>{"Log Out"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

pub(crate) fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let active_page = use_state(|| Page::Dashboard);
    let auth_status = use_state(|| AuthStatus::Checking);
    let session = use_state(|| None::<Session>);
    let settings = use_state(load_settings);
    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    {
        let auth_status = auth_status.clone();
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let url = format!("{}/auth/refresh", api::API_BASE_URL);
                    let response = Request::post(&url)
                        .credentials(RequestCredentials::Include)
                        .send()
                        .await;

                    match response {
                        Ok(resp) if resp.ok() => {
                            if let Ok(auth) = resp.json::<AuthResponse>().await {
                                api::store_token(&auth.access_token);
                                api::store_session(&auth.user);
                                session.set(Some(auth.user));
                                auth_status.set(AuthStatus::Authenticated);
                            } else {
                                auth_status.set(AuthStatus::Unauthenticated);
                            }
                        }
                        _ => {
                            // fall back to whatever is still in storage so a
                            // page refresh does not log the user out
                            match (api::access_token(), api::load_session()) {
                                (Some(_), Some(stored)) => {
                                    session.set(Some(stored));
                                    auth_status.set(AuthStatus::Authenticated);
                                }
                                _ => auth_status.set(AuthStatus::Unauthenticated),
                            }
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let content = match *active_page {
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Profile => html! { <ProfilePage /> },
        Page::Payments => html! { <PaymentsPage /> },
        Page::Game => html! { <GamePage /> },
    };

    if *auth_status == AuthStatus::Checking {
        return html! {
            <div class="min-h-screen flex items-center justify-center bg-[#1a1a1a] text-muted-foreground">
                {"Checking session..."}
            </div>
        };
    }

    let authenticated_session = match (*auth_status, (*session).clone()) {
        (AuthStatus::Authenticated, Some(current)) => Some(current),
        _ => None,
    };

    match authenticated_session {
        Some(current) => html! {
            <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
                <ContextProvider<Session> context={current}>
                    <Layout active_page={*active_page} on_select={on_select}>
                        { content }
                    </Layout>
                </ContextProvider<Session>>
            </ContextProvider<UseStateHandle<AppSettings>>>
        },
        None => {
            let session = session.clone();
            let auth_status = auth_status.clone();
            html! {
                <AuthScreen on_authenticated={Callback::from(move |signed_in: Session| {
                    session.set(Some(signed_in));
                    auth_status.set(AuthStatus::Authenticated);
                })} />
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum AuthMode {
    SignIn,
    SignUp,
    Confirm,
}

#[derive(Properties, PartialEq)]
struct AuthScreenProps {
    on_authenticated: Callback<Session>,
}

#[derive(Deserialize)]
struct Acknowledgement {
    #[serde(default)]
    #[allow(dead_code)]
    message: Option<String>,
}

#[function_component(AuthScreen)]
fn auth_screen(props: &AuthScreenProps) -> Html {
    let mode = use_state(|| AuthMode::SignIn);
    let email = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let confirm_password = use_state(|| "".to_string());
    let code = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let info = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let mode = mode.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let code = code.clone();
        let error = error.clone();
        let info = info.clone();
        let loading = loading.clone();
        let on_authenticated = props.on_authenticated.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();
            let confirm_val = (*confirm_password).clone();
            let code_val = code.trim().to_string();
            let current_mode = *mode;

            if email_val.is_empty() {
                error.set(Some("Email is required".to_string()));
                return;
            }

            match current_mode {
                AuthMode::Confirm => {
                    if code_val.is_empty() {
                        error.set(Some("Enter the confirmation code from your email".to_string()));
                        return;
                    }
                }
                _ => {
                    if password_val.is_empty() {
                        error.set(Some("Email and password are required".to_string()));
                        return;
                    }
                    if password_val.len() < 8 {
                        error.set(Some("Password must be at least 8 characters".to_string()));
                        return;
                    }
                    if current_mode == AuthMode::SignUp && password_val != confirm_val {
                        error.set(Some("Passwords do not match".to_string()));
                        return;
                    }
                }
            }

            loading.set(true);
            error.set(None);
            info.set(None);

            let mode = mode.clone();
            let error = error.clone();
            let info = info.clone();
            let loading = loading.clone();
            let on_authenticated = on_authenticated.clone();

            spawn_local(async move {
                match current_mode {
                    AuthMode::SignIn => {
                        let body = serde_json::json!({
                            "email": email_val,
                            "password": password_val,
                        });
                        match api::post_json::<serde_json::Value, AuthResponse>(
                            "/auth/signin",
                            &body,
                        )
                        .await
                        {
                            Ok(auth) => {
                                api::store_token(&auth.access_token);
                                api::store_session(&auth.user);
                                on_authenticated.emit(auth.user);
                            }
                            Err(err) => error.set(Some(err.to_string())),
                        }
                    }
                    AuthMode::SignUp => {
                        let body = serde_json::json!({
                            "email": email_val,
                            "password": password_val,
                        });
                        match api::post_json::<serde_json::Value, Acknowledgement>(
                            "/auth/signup",
                            &body,
                        )
                        .await
                        {
                            Ok(_) => {
                                mode.set(AuthMode::Confirm);
                                info.set(Some(
                                    "We emailed you a confirmation code.".to_string(),
                                ));
                            }
                            Err(err) => error.set(Some(err.to_string())),
                        }
                    }
                    AuthMode::Confirm => {
                        let body = serde_json::json!({
                            "email": email_val,
                            "code": code_val,
                        });
                        match api::post_json::<serde_json::Value, Acknowledgement>(
                            "/auth/confirm",
                            &body,
                        )
                        .await
                        {
                            Ok(_) => {
                                mode.set(AuthMode::SignIn);
                                info.set(Some(
                                    "Account confirmed. You can sign in now.".to_string(),
                                ));
                            }
                            Err(err) => error.set(Some(err.to_string())),
                        }
                    }
                }
                loading.set(false);
            });
        })
    };

    let toggle_mode = {
        let mode = mode.clone();
        let error = error.clone();
        Callback::from(move |_| {
            mode.set(match *mode {
                AuthMode::SignIn => AuthMode::SignUp,
                _ => AuthMode::SignIn,
            });
            error.set(None);
        })
    };

    let (title, subtitle, submit_label) = match *mode {
        AuthMode::SignIn => ("Welcome back", "Sign in to continue.", "Sign in"),
        AuthMode::SignUp => (
            "Create account",
            "Start managing your finances.",
            "Sign up",
        ),
        AuthMode::Confirm => (
            "Confirm your email",
            "Enter the code we sent you.",
            "Confirm",
        ),
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-[#1a1a1a]">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                    <p class="text-sm text-muted-foreground mt-2">{ subtitle }</p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email"}</label>
                        <input
                            type="email"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                            value={(*email).clone()}
                            oninput={{
                                let email = email.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    email.set(input.value());
                                })
                            }}
                        />
                    </div>

                    if *mode != AuthMode::Confirm {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Password"}</label>
                            <input
                                type="password"
                                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                value={(*password).clone()}
                                oninput={{
                                    let password = password.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        password.set(input.value());
                                    })
                                }}
                            />
                        </div>
                    }

                    if *mode == AuthMode::SignUp {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Confirm Password"}</label>
                            <input
                                type="password"
                                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                value={(*confirm_password).clone()}
                                oninput={{
                                    let confirm_password = confirm_password.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        confirm_password.set(input.value());
                                    })
                                }}
                            />
                        </div>
                    }

                    if *mode == AuthMode::Confirm {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Confirmation code"}</label>
                            <input
                                type="text"
                                inputmode="numeric"
                                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                value={(*code).clone()}
                                oninput={{
                                    let code = code.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        code.set(input.value());
                                    })
                                }}
                            />
                        </div>
                    }

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }
                    if let Some(msg) = &*info {
                        <div class="text-sm text-green-600">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else { submit_label } }
                    </button>
                </form>

                if *mode != AuthMode::Confirm {
                    <div class="mt-6 text-center text-sm text-muted-foreground">
                        { if *mode == AuthMode::SignIn { "No account?" } else { "Already have an account?" } }
                        <button class="ml-2 text-primary font-semibold" onclick={toggle_mode}>
                            { if *mode == AuthMode::SignIn { "Sign up" } else { "Sign in" } }
                        </button>
                    </div>
                }
            </div>
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-foreground">
            <path d={path}></path>
        </svg>
    }
}

pub(crate) fn icon_bell() -> Html {
    icon_base("M18 8a6 6 0 10-12 0c0 7-3 7-3 7h18s-3 0-3-7")
}
pub(crate) fn icon_moon() -> Html {
    icon_base("M21 12.79A9 9 0 1111.21 3a7 7 0 109.79 9.79z")
}
pub(crate) fn icon_sun() -> Html {
    icon_base("M12 1v3M12 20v3M4.2 4.2l2.1 2.1M17.7 17.7l2.1 2.1M1 12h3M20 12h3M4.2 19.8l2.1-2.1M17.7 6.3l2.1-2.1M12 8a4 4 0 100 8 4 4 0 100-8")
}
pub(crate) fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
pub(crate) fn icon_user() -> Html {
    icon_base("M20 21v-2a4 4 0 00-4-4H8a4 4 0 00-4 4v2M12 3a4 4 0 110 8 4 4 0 010-8")
}
pub(crate) fn icon_repeat() -> Html {
    icon_base("M17 1l4 4-4 4M21 5H7a4 4 0 00-4 4v2M7 23l-4-4 4-4M3 19h14a4 4 0 004-4v-2")
}
pub(crate) fn icon_gamepad() -> Html {
    icon_base("M6 12h4M8 10v4M15 11h.01M18 13h.01M17.32 5H6.68a4 4 0 00-3.98 3.59L2 17a2 2 0 003.5 1.5L8 16h8l2.5 2.5A2 2 0 0022 17l-.7-8.41A4 4 0 0017.32 5")
}
pub(crate) fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
pub(crate) fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub(crate) fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub(crate) fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub(crate) fn icon_arrow_up_right() -> Html {
    icon_base("M7 17L17 7M7 7h10v10")
}
pub(crate) fn icon_message_circle() -> Html {
    icon_base("M21 11.5a8.38 8.38 0 01-.9 3.8 8.5 8.5 0 01-7.6 4.7 8.38 8.38 0 01-3.8-.9L3 21l1.9-5.7a8.38 8.38 0 01-.9-3.8 8.5 8.5 0 014.7-7.6 8.38 8.38 0 013.8-.9h.5a8.48 8.48 0 018 8v.5z")
}
pub(crate) fn icon_send() -> Html {
    icon_base("M22 2L11 13M22 2l-7 20-4-9-9-4 20-7")
}
pub(crate) fn icon_x() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}
pub(crate) fn icon_map_pin() -> Html {
    icon_base("M21 10c0 7-9 13-9 13s-9-6-9-13a9 9 0 0118 0zM15 10a3 3 0 11-6 0 3 3 0 016 0z")
}

fn main() {
    yew::Renderer::<App>::new().render();
}
