use super::overlay::ErrorList;
use crate::channel::use_controller;
use crate::state::{AccountForm, FormKind};
use crate::util::input_value;
use yew::prelude::*;

#[derive(Clone, Debug, Default, PartialEq)]
struct Fields {
    username: String,
    email: String,
    password: String,
    c_password: String,
    otp: String,
}

#[derive(Properties, PartialEq, Clone)]
pub struct AccountFormViewProps {
    pub kind: FormKind,
}

#[function_component]
pub fn AccountFormView(props: &AccountFormViewProps) -> Html {
    let kind = props.kind;
    let form = use_controller(move || AccountForm::new(kind));
    let fields = use_state(Fields::default);

    let field = |apply: fn(&mut Fields, String)| {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*fields).clone();
            apply(&mut next, input_value(&e));
            fields.set(next);
        })
    };
    let on_submit = {
        let form = form.clone();
        let fields = fields.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let f = (*fields).clone();
            form.act(|a| match a.kind() {
                FormKind::Login if a.pin_sent_to().is_some() => a.login_with_pin(&f.otp),
                FormKind::Login => a.login(&f.username, &f.password),
                FormKind::Signup => a.sign_up(&f.username, &f.email, &f.password, &f.c_password),
                FormKind::ChangePassword => a.change_password(&f.password),
            });
        })
    };
    let on_forgot = {
        let form = form.clone();
        let fields = fields.clone();
        Callback::from(move |_| form.act(|a| a.forgot_password(&fields.username)))
    };

    let a = form.borrow();
    let f = (*fields).clone();
    let errors = a.errors().to_vec();
    let body = match kind {
        FormKind::Login => match a.pin_sent_to() {
            Some(user) => html! {
                <>
                    <p style="margin:0; color:#8b949e;">{ format!("A one-time PIN was emailed to {user}.") }</p>
                    <label>{"PIN"}<input value={f.otp} oninput={field(|s, v| s.otp = v)} /></label>
                    <button type="submit">{"Log in with PIN"}</button>
                </>
            },
            None => html! {
                <>
                    <label>{"Username"}<input value={f.username} oninput={field(|s, v| s.username = v)} /></label>
                    <label>{"Password"}<input type="password" value={f.password} oninput={field(|s, v| s.password = v)} /></label>
                    <button type="submit">{"Log in"}</button>
                    <button type="button" onclick={on_forgot}>{"Forgot password?"}</button>
                    <a href="/signup">{"Create an account"}</a>
                </>
            },
        },
        FormKind::Signup => html! {
            <>
                <label>{"Username"}<input value={f.username} oninput={field(|s, v| s.username = v)} /></label>
                <label>{"Email"}<input type="email" value={f.email} oninput={field(|s, v| s.email = v)} /></label>
                <label>{"Password"}<input type="password" value={f.password} oninput={field(|s, v| s.password = v)} /></label>
                <label>{"Confirm password"}<input type="password" value={f.c_password} oninput={field(|s, v| s.c_password = v)} /></label>
                <button type="submit">{"Sign up"}</button>
            </>
        },
        FormKind::ChangePassword => html! {
            <>
                <label>{"New password"}<input type="password" value={f.password} oninput={field(|s, v| s.password = v)} /></label>
                <button type="submit">{"Change password"}</button>
            </>
        },
    };
    let title = match kind {
        FormKind::Login => "Log in",
        FormKind::Signup => "Sign up",
        FormKind::ChangePassword => "Choose a new password",
    };

    html! {
        <form onsubmit={on_submit} style="display:flex; flex-direction:column; gap:8px; padding:16px; max-width:360px;">
            <h2 style="margin:0;">{ title }</h2>
            <ErrorList errors={errors} />
            { body }
        </form>
    }
}
