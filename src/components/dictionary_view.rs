use crate::channel::use_controller;
use crate::state::DictionarySearch;
use crate::util::input_value;
use yew::prelude::*;

#[function_component]
pub fn DictionaryView() -> Html {
    let dict = use_controller(DictionarySearch::new);
    let term = use_state(String::new);

    let on_input = {
        let term = term.clone();
        Callback::from(move |e: InputEvent| term.set(input_value(&e)))
    };
    let on_submit = {
        let dict = dict.clone();
        let term = term.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            dict.act(|d| d.search(&term));
        })
    };

    let d = dict.borrow();
    html! {
        <div style="display:flex; flex-direction:column; gap:12px; padding:16px;">
            <h2 style="margin:0;">{"Dictionary"}</h2>
            <form onsubmit={on_submit} style="display:flex; gap:8px;">
                <input value={(*term).clone()} oninput={on_input} placeholder="English, kana or romaji" style="flex:1;" />
                <button type="submit">{"Search"}</button>
            </form>
            if d.nothing_found() {
                <p style="color:#8b949e;">{ format!("No results for \"{}\"", d.last_term().unwrap_or_default()) }</p>
            }
            if !d.rows().is_empty() {
                <table style="border-collapse:collapse;">
                    <tr><th>{"Reading"}</th><th>{"Meanings"}</th><th>{"Also read"}</th></tr>
                    { for d.rows().iter().map(|row| html! {
                        <tr>
                            <td style="padding:4px 8px; font-size:18px;">{ row.reading.clone() }</td>
                            <td style="padding:4px 8px;">{ row.meanings.clone() }</td>
                            <td style="padding:4px 8px; color:#8b949e;">{ row.other_readings.clone() }</td>
                        </tr>
                    }) }
                </table>
            }
        </div>
    }
}
