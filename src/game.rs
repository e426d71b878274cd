use gloo_timers::callback::{Interval, Timeout};
use yew::prelude::*;

use crate::page_shell;

const MOLE_COUNT: usize = 4;
// percent offsets inside the field
const MOLE_POSITIONS: [(u32, u32); MOLE_COUNT] = [(12, 55), (36, 62), (60, 55), (82, 62)];

/// The little life-sim economy behind the buttons. All the number rules live
/// here so the component only wires clicks to state.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GameStats {
    pub money: i64,
    pub health: i64,
    pub happiness: i64,
    pub knowledge: i64,
}

impl GameStats {
    pub fn new() -> GameStats {
        GameStats {
            money: 1000,
            health: 100,
            happiness: 100,
            knowledge: 0,
        }
    }

    pub fn work(self) -> (GameStats, &'static str) {
        (
            GameStats {
                money: self.money + 100,
                health: (self.health - 10).max(0),
                happiness: (self.happiness - 5).max(0),
                ..self
            },
            "You earned 100 working! 💰",
        )
    }

    pub fn study(self) -> (GameStats, &'static str) {
        (
            GameStats {
                knowledge: (self.knowledge + 10).min(100),
                happiness: (self.happiness - 5).max(0),
                ..self
            },
            "You learned something new! 📚",
        )
    }

    pub fn rest(self) -> (GameStats, &'static str) {
        (
            GameStats {
                money: (self.money - 50).max(0),
                health: (self.health + 15).min(100),
                happiness: (self.happiness + 10).min(100),
                ..self
            },
            "You recovered, but rest cost you 50 😴",
        )
    }

    /// Needs 200 on hand; a coin flip decides the outcome.
    pub fn invest(self, win: bool) -> Option<(GameStats, &'static str)> {
        if self.money < 200 {
            return None;
        }
        if win {
            Some((
                GameStats {
                    money: self.money + 100,
                    ..self
                },
                "Your investment paid off! +100 🎉",
            ))
        } else {
            Some((
                GameStats {
                    money: self.money - 200,
                    ..self
                },
                "The investment went south. -200 📉",
            ))
        }
    }

    pub fn whack(self) -> (GameStats, &'static str) {
        (
            GameStats {
                money: self.money + 50,
                happiness: (self.happiness + 5).min(100),
                ..self
            },
            "You caught the mole! +50 🎯",
        )
    }
}

#[function_component(GamePage)]
pub fn game_page() -> Html {
    let stats = use_state(GameStats::new);
    let message = use_state(|| None::<String>);
    let moles = use_state(|| [false; MOLE_COUNT]);
    let moles_live = use_mut_ref(|| [false; MOLE_COUNT]);

    let notify = {
        let message = message.clone();
        Callback::from(move |text: String| {
            message.set(Some(text));
            let message = message.clone();
            Timeout::new(2500, move || message.set(None)).forget();
        })
    };

    // mole spawner: every 2s pick a hidden slot, show it, hide it again after
    // 1-2.5s
    {
        let moles = moles.clone();
        let moles_live = moles_live.clone();
        use_effect_with_deps(
            move |_| {
                let interval = Interval::new(2000, move || {
                    let hidden: Vec<usize> = moles_live
                        .borrow()
                        .iter()
                        .enumerate()
                        .filter(|(_, visible)| !**visible)
                        .map(|(i, _)| i)
                        .collect();
                    if hidden.is_empty() {
                        return;
                    }
                    let pick = hidden[(js_sys::Math::random() * hidden.len() as f64) as usize
                        % hidden.len()];
                    moles_live.borrow_mut()[pick] = true;
                    moles.set(*moles_live.borrow());

                    let delay = (1000.0 + js_sys::Math::random() * 1500.0) as u32;
                    let moles = moles.clone();
                    let moles_live = moles_live.clone();
                    Timeout::new(delay, move || {
                        moles_live.borrow_mut()[pick] = false;
                        moles.set(*moles_live.borrow());
                    })
                    .forget();
                });
                move || drop(interval)
            },
            (),
        );
    }

    let on_work = {
        let stats = stats.clone();
        let notify = notify.clone();
        Callback::from(move |_| {
            let (next, msg) = stats.work();
            stats.set(next);
            notify.emit(msg.to_string());
        })
    };

    let on_study = {
        let stats = stats.clone();
        let notify = notify.clone();
        Callback::from(move |_| {
            let (next, msg) = stats.study();
            stats.set(next);
            notify.emit(msg.to_string());
        })
    };

    let on_rest = {
        let stats = stats.clone();
        let notify = notify.clone();
        Callback::from(move |_| {
            let (next, msg) = stats.rest();
            stats.set(next);
            notify.emit(msg.to_string());
        })
    };

    let on_invest = {
        let stats = stats.clone();
        let notify = notify.clone();
        Callback::from(move |_| {
            match stats.invest(js_sys::Math::random() > 0.5) {
                Some((next, msg)) => {
                    stats.set(next);
                    notify.emit(msg.to_string());
                }
                None => notify.emit("You need at least 200 to invest.".to_string()),
            }
        })
    };

    let on_whack = {
        let stats = stats.clone();
        let notify = notify.clone();
        let moles = moles.clone();
        let moles_live = moles_live.clone();
        Callback::from(move |index: usize| {
            if !moles[index] {
                return;
            }
            moles_live.borrow_mut()[index] = false;
            moles.set(*moles_live.borrow());
            let (next, msg) = stats.whack();
            stats.set(next);
            notify.emit(msg.to_string());
        })
    };

    let bar = |label: &'static str, value: i64, color: &'static str| {
        html! {
            <div class="space-y-1">
                <div class="flex items-center justify-between text-xs text-muted-foreground">
                    <span>{ label }</span>
                    <span class="font-bold text-foreground">{ value.to_string() }</span>
                </div>
                <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                    <div class="h-full" style={format!("width: {}%; background-color: {}", value.clamp(0, 100), color)}></div>
                </div>
            </div>
        }
    };

    html! {
        { page_shell(
            "Money Game",
            html! {},
            html! {
                <>
                    {
                        if let Some(msg) = &*message {
                            html! {
                                <div class="bg-card border border-border rounded-[10px] p-3 text-sm font-bold text-foreground shadow-md">
                                    { msg.clone() }
                                </div>
                            }
                        } else { html! {} }
                    }

                    <div class="grid grid-cols-1 lg:grid-cols-12 gap-6 items-stretch">
                        <div class="lg:col-span-4 bg-card p-6 rounded-[10px] border border-border space-y-4">
                            <div>
                                <p class="text-muted-foreground text-[10px] font-bold tracking-widest">{"Pocket Money"}</p>
                                <h3 class="text-3xl font-black text-[#4CAF50]">{ stats.money.to_string() }</h3>
                            </div>
                            { bar("Health", stats.health, "#4CAF50") }
                            { bar("Happiness", stats.happiness, "#F8D347") }
                            { bar("Knowledge", stats.knowledge, "#95B8D1") }
                        </div>

                        <div class="lg:col-span-8 bg-card p-6 rounded-[10px] border border-border">
                            <h4 class="text-foreground font-bold text-[15px] mb-3 tracking-wider">{"Make a move"}</h4>
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                                <button onclick={on_work} class="bg-primary text-primary-foreground py-3 rounded-[10px] text-xs font-bold">{"Work (+100)"}</button>
                                <button onclick={on_study} class="bg-primary text-primary-foreground py-3 rounded-[10px] text-xs font-bold">{"Study (+10 📚)"}</button>
                                <button onclick={on_rest} class="bg-primary text-primary-foreground py-3 rounded-[10px] text-xs font-bold">{"Rest (-50)"}</button>
                                <button onclick={on_invest} class="bg-primary text-primary-foreground py-3 rounded-[10px] text-xs font-bold">{"Invest (200)"}</button>
                            </div>
                            <p class="text-xs text-muted-foreground mt-3">
                                {"Working pays but wears you down. Resting costs money. Investing is a coin flip."}
                            </p>
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] border border-border p-6">
                        <div class="flex items-center justify-between mb-3">
                            <h3 class="font-bold text-foreground text-lg">{"Catch the money mole!"}</h3>
                            <span class="text-xs text-muted-foreground">{"+50 per catch"}</span>
                        </div>
                        <div class="relative w-full h-64 rounded-[10px] overflow-hidden" style="background-color: #1f3d2b;">
                            { for MOLE_POSITIONS.iter().enumerate().map(|(index, (x, y))| {
                                let on_whack = on_whack.clone();
                                let visible = moles[index];
                                html! {
                                    <button
                                        key={index}
                                        onclick={Callback::from(move |_| on_whack.emit(index))}
                                        class={if visible {
                                            "absolute w-14 h-14 rounded-full bg-[#8C5A2B] border-4 border-[#6B4A2F] text-2xl transition-transform scale-100"
                                        } else {
                                            "absolute w-14 h-14 rounded-full bg-black/30 border-4 border-transparent text-2xl transition-transform scale-75"
                                        }}
                                        style={format!("left: {}%; top: {}%;", x, y)}
                                    >
                                        { if visible { "🐹" } else { "" } }
                                    </button>
                                }
                            }) }
                        </div>
                    </div>
                </>
            }
        ) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_trades_health_for_money() {
        let (next, _) = GameStats::new().work();
        assert_eq!(next.money, 1100);
        assert_eq!(next.health, 90);
        assert_eq!(next.happiness, 95);
    }

    #[test]
    fn stats_never_leave_their_bounds() {
        let mut stats = GameStats::new();
        for _ in 0..30 {
            stats = stats.work().0;
        }
        assert_eq!(stats.health, 0);
        assert_eq!(stats.happiness, 0);

        for _ in 0..30 {
            stats = stats.rest().0;
        }
        assert_eq!(stats.health, 100);
        assert_eq!(stats.happiness, 100);

        for _ in 0..30 {
            stats = stats.study().0;
        }
        assert_eq!(stats.knowledge, 100);
    }

    #[test]
    fn resting_cannot_go_below_zero_money() {
        let broke = GameStats {
            money: 20,
            ..GameStats::new()
        };
        assert_eq!(broke.rest().0.money, 0);
    }

    #[test]
    fn investing_needs_a_stake() {
        let broke = GameStats {
            money: 150,
            ..GameStats::new()
        };
        assert!(broke.invest(true).is_none());

        let flush = GameStats::new();
        assert_eq!(flush.invest(true).unwrap().0.money, 1100);
        assert_eq!(flush.invest(false).unwrap().0.money, 800);
    }

    #[test]
    fn whacking_pays_and_cheers_up() {
        let glum = GameStats {
            happiness: 40,
            ..GameStats::new()
        };
        let (next, _) = glum.whack();
        assert_eq!(next.money, 1050);
        assert_eq!(next.happiness, 45);
    }
}
