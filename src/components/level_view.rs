use crate::channel::use_controller;
use crate::state::LevelLesson;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LevelViewProps {
    pub level: u32,
}

#[function_component]
pub fn LevelView(props: &LevelViewProps) -> Html {
    let level = props.level;
    let lesson = use_controller(move || LevelLesson::new(level));
    let finish = {
        let lesson = lesson.clone();
        Callback::from(move |_| lesson.act(LevelLesson::finish))
    };

    let l = lesson.borrow();
    if !l.is_loaded() {
        return html! { <p style="padding:16px; color:#8b949e;">{ format!("Loading level {}...", l.level()) }</p> };
    }
    html! {
        <div style="display:flex; flex-direction:column; gap:12px; padding:16px; max-width:720px;">
            <h2 style="margin:0;">{ format!("Level {}", l.level()) }</h2>
            { for l.paragraphs().iter().map(|p| html! { <p style="margin:0;">{ p.clone() }</p> }) }
            <div style="display:flex; flex-wrap:wrap; gap:12px;">
                { for l.cards().iter().map(|card| html! {
                    <div style="border:1px solid #30363d; border-radius:8px; padding:8px; text-align:center; width:160px;">
                        <div style="font-size:40px;">{ card.kana.clone() }</div>
                        <div style="color:#8b949e;">{ card.sound.clone() }</div>
                        if let Some(gif) = &card.animation_url {
                            <img src={gif.clone()} alt={card.sound.clone()} style="width:120px;" />
                        }
                        if let Some(audio) = &card.audio_url {
                            <audio controls={true} src={audio.clone()} style="width:140px;" />
                        }
                    </div>
                }) }
            </div>
            <button onclick={finish} style="align-self:flex-start;">{ format!("Finish level (+{} pts)", l.points()) }</button>
        </div>
    }
}
