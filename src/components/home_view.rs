use crate::channel::use_controller;
use crate::state::Leaderboard;
use yew::prelude::*;

#[function_component]
pub fn HomeView() -> Html {
    let board = use_controller(Leaderboard::new);
    let b = board.borrow();
    html! {
        <div style="display:flex; flex-direction:column; gap:12px; padding:16px; max-width:420px;">
            <h2 style="margin:0;">{"Leaderboard"}</h2>
            <table style="border-collapse:collapse;">
                { for b.rows().iter().map(|row| html! {
                    <tr>
                        <td style="padding:4px 8px; color:#8b949e;">{ format!("#{}", row.rank) }</td>
                        <td style="padding:4px 8px;">{ row.username.clone() }</td>
                        <td style="padding:4px 8px; text-align:right;">{ row.points }</td>
                    </tr>
                }) }
            </table>
        </div>
    }
}
