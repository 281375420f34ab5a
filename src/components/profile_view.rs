use super::overlay::ErrorList;
use crate::channel::{use_controller, ControllerHandle};
use crate::model::{ProfileData, UserRef};
use crate::state::profile::SettingsDraft;
use crate::state::{ProfilePage, ProfileTab};
use crate::util::{input_checked, input_value};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProfileViewProps {
    pub tab: ProfileTab,
}

#[function_component]
pub fn ProfileView(props: &ProfileViewProps) -> Html {
    let tab = props.tab.clone();
    let page = use_controller(move || ProfilePage::new(tab));

    let body = match props.tab {
        ProfileTab::Progress(_) => progress_tab(&page),
        ProfileTab::Friends => html! { <FriendsTab page={Handle(page.clone())} /> },
        ProfileTab::Settings => html! { <SettingsTab page={Handle(page.clone())} /> },
    };
    let own = page.borrow().viewing().is_none();
    html! {
        <div style="display:flex; flex-direction:column; gap:12px; padding:16px;">
            if own {
                <nav style="display:flex; gap:12px;">
                    <a href="/profile/progress">{"Progress"}</a>
                    <a href="/profile/friends">{"Friends"}</a>
                    <a href="/profile/settings">{"Settings"}</a>
                </nav>
            }
            { body }
        </div>
    }
}

fn progress_tab(page: &ControllerHandle<ProfilePage>) -> Html {
    let p = page.borrow();
    let heading = match p.viewing() {
        Some(name) => format!("{name}'s progress"),
        None => "Your progress".to_string(),
    };
    let Some(data) = p.data() else {
        return html! { <h2 style="margin:0;">{ heading }</h2> };
    };
    html! {
        <>
            <h2 style="margin:0;">{ heading }</h2>
            { stats(data) }
        </>
    }
}

fn stats(data: &ProfileData) -> Html {
    html! {
        <div style="display:flex; flex-direction:column; gap:6px;">
            <p style="margin:0;">{ format!("Points: {}   Streak: {} days", data.points, data.streak) }</p>
            <p style="margin:0;">{ format!("Characters learned: {}", data.characters) }</p>
            <p style="margin:0;">{ format!("Questions answered: {}", data.questions) }</p>
            <p style="margin:0; color:#8b949e;">{ data.next_steps.clone() }</p>
            if !data.awards.is_empty() {
                <ul style="margin:0; padding-left:18px;">
                    { for data.awards.iter().map(|a| html! { <li>{ a.clone() }</li> }) }
                </ul>
            }
        </div>
    }
}

/// Lets tab components take the page as a prop. Never equal, so a tab re-renders
/// whenever the page does.
#[derive(Clone)]
pub struct Handle(ControllerHandle<ProfilePage>);

impl PartialEq for Handle {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

#[derive(Properties, PartialEq, Clone)]
struct TabProps {
    page: Handle,
}

#[function_component]
fn FriendsTab(props: &TabProps) -> Html {
    let page = props.page.0.clone();
    let query = use_state(String::new);

    let on_query = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| query.set(input_value(&e)))
    };
    let on_search = {
        let page = page.clone();
        let query = query.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            page.act(|p| p.look_for(&query));
        })
    };

    let p = page.borrow();
    let (friends, requests) = p
        .data()
        .map(|d| (d.friends.clone(), d.friend_requests.clone()))
        .unwrap_or_default();

    let friend_row = |user: &UserRef| {
        let view = {
            let page = page.clone();
            let name = user.username().to_string();
            Callback::from(move |_| page.act(|p| p.view_other_profile(&name)))
        };
        html! {
            <li>
                <span>{ user.username().to_string() }</span>
                <button onclick={view} style="margin-left:8px;">{"View"}</button>
            </li>
        }
    };
    let request_row = |user: &UserRef| {
        let id = user.id();
        let accept = {
            let page = page.clone();
            Callback::from(move |_| page.act(|p| p.accept(id)))
        };
        let reject = {
            let page = page.clone();
            Callback::from(move |_| page.act(|p| p.reject(id)))
        };
        html! {
            <li>
                <span>{ user.username().to_string() }</span>
                <button onclick={accept} style="margin-left:8px;">{"Accept"}</button>
                <button onclick={reject} style="margin-left:4px;">{"Reject"}</button>
            </li>
        }
    };
    let found_row = |user: &UserRef| {
        let id = user.id();
        let requested = p.already_requested(id);
        let request = {
            let page = page.clone();
            Callback::from(move |_| page.act(|p| p.request_user(id)))
        };
        html! {
            <li>
                <span>{ user.username().to_string() }</span>
                <button onclick={request} disabled={requested} style="margin-left:8px;">
                    { if requested { "Requested" } else { "Add friend" } }
                </button>
            </li>
        }
    };

    html! {
        <div style="display:flex; flex-direction:column; gap:10px;">
            <h3 style="margin:0;">{"Friends"}</h3>
            <ul style="margin:0;">{ for friends.iter().map(friend_row) }</ul>
            if !requests.is_empty() {
                <h3 style="margin:0;">{"Requests"}</h3>
                <ul style="margin:0;">{ for requests.iter().map(request_row) }</ul>
            }
            <form onsubmit={on_search} style="display:flex; gap:8px;">
                <input value={(*query).clone()} oninput={on_query} placeholder="Find people" />
                <button type="submit">{"Search"}</button>
            </form>
            <ul style="margin:0;">{ for p.found_users().iter().map(found_row) }</ul>
        </div>
    }
}

#[function_component]
fn SettingsTab(props: &TabProps) -> Html {
    let page = props.page.0.clone();
    let draft = use_state(SettingsDraft::default);

    // Prefill once the current settings arrive.
    {
        let draft = draft.clone();
        let current = page.borrow().settings().cloned();
        use_effect_with(current, move |current| {
            if let Some(current) = current {
                draft.set(SettingsDraft::from(current));
            }
            || ()
        });
    }

    let text_field = |apply: fn(&mut SettingsDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*draft).clone();
            apply(&mut next, input_value(&e));
            draft.set(next);
        })
    };
    let toggle = |apply: fn(&mut SettingsDraft, bool)| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let mut next = (*draft).clone();
            apply(&mut next, input_checked(&e));
            draft.set(next);
        })
    };
    let on_save = {
        let page = page.clone();
        let draft = draft.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let submitted = (*draft).clone();
            page.act(|p| p.save_settings(submitted));
        })
    };

    let errors = page.borrow().errors().to_vec();
    let d = (*draft).clone();
    html! {
        <form onsubmit={on_save} style="display:flex; flex-direction:column; gap:8px; max-width:360px;">
            <h3 style="margin:0;">{"Account settings"}</h3>
            <ErrorList errors={errors} />
            <label>{"Username"}<input value={d.username} oninput={text_field(|s, v| s.username = v)} /></label>
            <label>{"Email"}<input value={d.email} oninput={text_field(|s, v| s.email = v)} /></label>
            <label>{"New password"}<input type="password" value={d.password} oninput={text_field(|s, v| s.password = v)} /></label>
            <label>{"Current password"}<input type="password" value={d.c_password} oninput={text_field(|s, v| s.c_password = v)} /></label>
            <label><input type="checkbox" checked={d.reminder} onchange={toggle(|s, v| s.reminder = v)} />{" Practice reminders"}</label>
            <label><input type="checkbox" checked={d.info} onchange={toggle(|s, v| s.info = v)} />{" Progress emails"}</label>
            <label><input type="checkbox" checked={d.promo} onchange={toggle(|s, v| s.promo = v)} />{" News and offers"}</label>
            <button type="submit">{"Save"}</button>
        </form>
    }
}
