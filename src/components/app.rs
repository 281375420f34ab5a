use super::account_form::AccountFormView;
use super::chat_view::ChatView;
use super::dictionary_view::DictionaryView;
use super::duel_view::DuelView;
use super::home_view::HomeView;
use super::level_view::LevelView;
use super::matching_view::MatchingView;
use super::profile_view::ProfileView;
use super::solo_view::SoloView;
use crate::config::ClientConfig;
use crate::route::Route;
use crate::state::{FormKind, ProfileTab, SoloMode};
use crate::util::{clog, set_debug_logging};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(|| {
        let config = ClientConfig::load();
        set_debug_logging(config.debug_log);
        config
    });
    let route = use_state(Route::current);
    {
        let route = (*route).clone();
        use_effect_with((), move |_| {
            clog(&format!("page {route:?}"));
            || ()
        });
    }

    // Navigation is a full page load, so the route is fixed for this mount.
    let page = match (*route).clone() {
        Route::Home => html! { <HomeView /> },
        Route::Login => html! { <AccountFormView kind={FormKind::Login} /> },
        Route::Signup => html! { <AccountFormView kind={FormKind::Signup} /> },
        Route::ChangePassword => html! { <AccountFormView kind={FormKind::ChangePassword} /> },
        Route::Profile => html! { <ProfileView tab={ProfileTab::Progress(None)} /> },
        Route::OtherProfile(name) => html! { <ProfileView tab={ProfileTab::Progress(Some(name))} /> },
        Route::Friends => html! { <ProfileView tab={ProfileTab::Friends} /> },
        Route::Settings => html! { <ProfileView tab={ProfileTab::Settings} /> },
        Route::Dictionary => html! { <DictionaryView /> },
        Route::SoloDrawing => html! { <SoloView mode={SoloMode::Game} /> },
        Route::Training => html! { <SoloView mode={SoloMode::Training} /> },
        Route::Matching => html! { <MatchingView /> },
        Route::Duel(room) => html! { <DuelView {room} /> },
        Route::Level(level) => html! { <LevelView {level} /> },
        Route::Chat(_) => html! { <ChatView /> },
        Route::NotFound => html! {
            <div style="padding:16px;">
                <h2>{"Page not found"}</h2>
                <a href="/home">{"Go home"}</a>
            </div>
        },
    };

    html! {
        <ContextProvider<ClientConfig> context={(*config).clone()}>
            <div style="min-height:100vh; background:#0d1117; color:#e6edf3; font-family:sans-serif;">
                <nav style="display:flex; gap:16px; padding:10px 16px; border-bottom:1px solid #30363d;">
                    <a href="/home">{"Home"}</a>
                    <a href="/games/single/drawing">{"Draw"}</a>
                    <a href="/single/match">{"Match"}</a>
                    <a href="/dictionary">{"Dictionary"}</a>
                    <a href="/profile">{"Profile"}</a>
                </nav>
                { page }
            </div>
        </ContextProvider<ClientConfig>>
    }
}
