use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct OverlayProps {
    pub show: bool,
    pub title: AttrValue,
    #[prop_or_default]
    pub message: Option<AttrValue>,
    /// Where the only way out leads; blocking overlays offer nothing else.
    #[prop_or_default]
    pub exit_href: Option<AttrValue>,
}

#[function_component]
pub fn Overlay(props: &OverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    html! {
        <div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.65); z-index:40;">
            <div style="background:#161b22; border:2px solid #30363d; padding:24px 32px; border-radius:12px; text-align:center; min-width:300px;">
                <h2 style="margin:0 0 12px 0;">{ props.title.clone() }</h2>
                if let Some(msg) = &props.message {
                    <p style="margin:4px 0; color:#8b949e;">{ msg.clone() }</p>
                }
                if let Some(href) = &props.exit_href {
                    <a href={href.clone()} style="display:inline-block; margin-top:16px; color:#58a6ff;">{"Back"}</a>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ErrorListProps {
    pub errors: Vec<String>,
}

/// Server validation messages, shown as sent.
#[function_component]
pub fn ErrorList(props: &ErrorListProps) -> Html {
    if props.errors.is_empty() {
        return html! {};
    }
    html! {
        <ul style="margin:8px 0; padding-left:18px; color:#f85149;">
            { for props.errors.iter().map(|e| html! { <li>{ e.clone() }</li> }) }
        </ul>
    }
}
