use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::finance::HealthStatus;
use crate::settings::{save_settings, AppSettings};

pub const SKIN_TONES: [(&str, &str); 3] = [
    ("Light", "#F2C9A0"),
    ("Tan", "#D9A066"),
    ("Deep", "#8C5A2B"),
];

pub const HAIR_COLORS: [(&str, &str); 4] = [
    ("Brown", "#6B4A2F"),
    ("Black", "#23211F"),
    ("Blonde", "#C9A24B"),
    ("Red", "#A14A2A"),
];

/// Background tint per health status. Purely cosmetic, mirrored by the
/// dashboard health card.
pub fn status_color(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent => "#75DD7F",
        HealthStatus::Good => "#95B8D1",
        HealthStatus::Regular => "#F8D347",
        HealthStatus::Poor => "#F88B7E",
    }
}

fn mouth_path(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent => "M46 78 Q60 92 74 78",
        HealthStatus::Good => "M48 80 Q60 88 72 80",
        HealthStatus::Regular => "M48 82 H72",
        HealthStatus::Poor => "M48 86 Q60 76 72 86",
    }
}

#[derive(Properties, PartialEq)]
pub struct UserAvatarProps {
    pub status: HealthStatus,
    pub skin: String,
    pub hair: String,
    #[prop_or(180)]
    pub size: u32,
}

#[function_component(UserAvatar)]
pub fn user_avatar(props: &UserAvatarProps) -> Html {
    let happy_eyes = matches!(props.status, HealthStatus::Excellent | HealthStatus::Good);

    html! {
        <svg
            width={props.size.to_string()}
            height={props.size.to_string()}
            viewBox="0 0 120 120"
            role="img"
            aria-label={format!("Financial avatar, {} health", props.status.label())}
        >
            <rect x="0" y="0" width="120" height="120" rx="16" fill={status_color(props.status)} />
            <rect x="34" y="96" width="52" height="24" rx="10" fill="#173E63" />
            <circle cx="60" cy="62" r="32" fill={props.skin.clone()} />
            <path
                d="M28 62 Q28 26 60 26 Q92 26 92 62 Q92 46 76 42 Q60 38 44 42 Q28 46 28 62"
                fill={props.hair.clone()}
            />
            {
                if happy_eyes {
                    html! {
                        <>
                            <path d="M44 60 Q48 54 52 60" stroke="#23211F" stroke-width="3" fill="none" stroke-linecap="round" />
                            <path d="M68 60 Q72 54 76 60" stroke="#23211F" stroke-width="3" fill="none" stroke-linecap="round" />
                        </>
                    }
                } else {
                    html! {
                        <>
                            <circle cx="48" cy="60" r="3" fill="#23211F" />
                            <circle cx="72" cy="60" r="3" fill="#23211F" />
                        </>
                    }
                }
            }
            <path
                d={mouth_path(props.status)}
                stroke="#23211F"
                stroke-width="3"
                fill="none"
                stroke-linecap="round"
            />
        </svg>
    }
}

#[derive(Properties, PartialEq)]
pub struct AvatarCardProps {
    pub status: HealthStatus,
}

/// Avatar plus the customizer selects. Choices live in the shared settings
/// context and persist on save.
#[function_component(AvatarCard)]
pub fn avatar_card(props: &AvatarCardProps) -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let (skin, hair) = settings
        .as_ref()
        .map(|s| (s.avatar_skin.clone(), s.avatar_hair.clone()))
        .unwrap_or_else(|| {
            let defaults = crate::settings::default_settings();
            (defaults.avatar_skin, defaults.avatar_hair)
        });

    let on_skin_change = {
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            if let Some(settings) = settings.as_ref() {
                let input: HtmlSelectElement = e.target_unchecked_into();
                let mut next = (**settings).clone();
                next.avatar_skin = input.value();
                settings.set(next);
            }
        })
    };

    let on_hair_change = {
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            if let Some(settings) = settings.as_ref() {
                let input: HtmlSelectElement = e.target_unchecked_into();
                let mut next = (**settings).clone();
                next.avatar_hair = input.value();
                settings.set(next);
            }
        })
    };

    let on_save = {
        let settings = settings.clone();
        Callback::from(move |_| {
            if let Some(settings) = settings.as_ref() {
                save_settings(settings);
            }
        })
    };

    html! {
        <div class="flex flex-col items-center gap-4">
            <UserAvatar status={props.status} skin={skin.clone()} hair={hair.clone()} />
            <div class="grid grid-cols-2 gap-3 w-full">
                <div class="space-y-1">
                    <label class="text-[10px] font-bold text-muted-foreground uppercase tracking-widest">{"Skin tone"}</label>
                    <select value={skin} onchange={on_skin_change} class="w-full bg-input border border-input rounded-lg px-3 py-2 text-xs text-foreground">
                        { for SKIN_TONES.iter().map(|(label, hex)| html! {
                            <option value={*hex}>{ *label }</option>
                        }) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class="text-[10px] font-bold text-muted-foreground uppercase tracking-widest">{"Hair color"}</label>
                    <select value={hair} onchange={on_hair_change} class="w-full bg-input border border-input rounded-lg px-3 py-2 text-xs text-foreground">
                        { for HAIR_COLORS.iter().map(|(label, hex)| html! {
                            <option value={*hex}>{ *label }</option>
                        }) }
                    </select>
                </div>
            </div>
            <button onclick={on_save} class="w-full bg-primary text-primary-foreground py-2 rounded-xl text-xs font-bold hover:opacity-90 transition-all">
                {"Save avatar"}
            </button>
        </div>
    }
}
