use crate::channel::use_controller;
use crate::config::ClientConfig;
use crate::state::matching::{PairOutcome, Selection};
use crate::state::MatchingGame;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[function_component]
pub fn MatchingView() -> Html {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let game = use_controller(MatchingGame::new);
    let last_outcome = use_state(|| None::<PairOutcome>);

    let on_select = {
        let game = game.clone();
        let last_outcome = last_outcome.clone();
        let reveal_ms = config.match_reveal_ms;
        Callback::from(move |index: usize| {
            let mut pending = false;
            game.act(|g| {
                pending = g.select(index) == Selection::Pending;
                Vec::new()
            });
            if !pending {
                return;
            }
            // Both cards stay face up for a moment before they are compared.
            let game = game.clone();
            let last_outcome = last_outcome.clone();
            Timeout::new(reveal_ms, move || {
                game.act(|g| {
                    let (outcome, replies) = g.resolve();
                    last_outcome.set(outcome);
                    replies
                });
            })
            .forget();
        })
    };

    let g = game.borrow();
    let outcome_text = match *last_outcome {
        Some(PairOutcome::Matched) => "Match!",
        Some(PairOutcome::Mismatched) => "Try again",
        None => "",
    };

    html! {
        <div style="display:flex; flex-direction:column; gap:12px; padding:16px;">
            <h2 style="margin:0;">{"Match each character with its sound"}</h2>
            <p style="margin:0;">{ format!("Score: {}   Decks cleared: {}", g.score(), g.rounds_completed()) }</p>
            if g.is_loading() {
                <p style="color:#8b949e;">{"Dealing cards..."}</p>
            } else {
                <div style="display:grid; grid-template-columns:repeat(5, 80px); gap:10px;">
                    { for g.cards().iter().enumerate().map(|(i, card)| {
                        let face_up = g.is_face_up(i);
                        let onclick = {
                            let on_select = on_select.clone();
                            Callback::from(move |_| on_select.emit(i))
                        };
                        let border = if card.disabled { "#7ee787" } else if face_up { "#58a6ff" } else { "#30363d" };
                        html! {
                            <button
                                onclick={onclick}
                                disabled={card.disabled}
                                style={format!("height:80px; font-size:22px; border:2px solid {border}; border-radius:8px; background:#161b22; color:#e6edf3;")}
                            >
                                { if face_up { card.face.clone() } else { "?".to_string() } }
                            </button>
                        }
                    }) }
                </div>
            }
            <p style="margin:0; color:#8b949e;">{ outcome_text }</p>
        </div>
    }
}
