use crate::channel::use_controller;
use crate::state::ChatRoom;
use crate::util::input_value;
use yew::prelude::*;

#[function_component]
pub fn ChatView() -> Html {
    let chat = use_controller(ChatRoom::new);
    let draft = use_state(String::new);

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| draft.set(input_value(&e)))
    };
    let send = {
        let chat = chat.clone();
        let draft = draft.clone();
        Callback::from(move |_: ()| {
            chat.act(|c| c.send(&draft));
            draft.set(String::new());
        })
    };
    let on_key = {
        let send = send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                send.emit(());
            }
        })
    };
    let on_click = Callback::from(move |_: MouseEvent| send.emit(()));

    let c = chat.borrow();
    html! {
        <div style="display:flex; flex-direction:column; gap:12px; padding:16px; max-width:520px;">
            <h2 style="margin:0;">{"Chat"}</h2>
            <div style="display:flex; flex-direction:column; gap:6px; min-height:240px; border:1px solid #30363d; border-radius:8px; padding:8px;">
                { for c.rows().into_iter().map(|row| {
                    let align = if row.mine { "flex-end" } else { "flex-start" };
                    let bg = if row.mine { "#1f6feb" } else { "#21262d" };
                    html! {
                        <div style={format!("align-self:{align}; background:{bg}; border-radius:8px; padding:4px 10px; max-width:75%;")}>
                            <span>{ row.text }</span>
                            <span style="margin-left:8px; font-size:11px; color:#8b949e;">{ row.time }</span>
                        </div>
                    }
                }) }
            </div>
            <div style="display:flex; gap:8px;">
                <input
                    value={(*draft).clone()}
                    oninput={on_input}
                    onkeydown={on_key}
                    disabled={c.identities().is_none()}
                    style="flex:1;"
                />
                <button onclick={on_click}>{"Send"}</button>
            </div>
        </div>
    }
}
