//! Account forms: login (with the one-time pin fallback), signup and password change.
//!
//! Validation happens on the server only. Its error messages are shown verbatim and a
//! successful submission answers with `move_user`, handled by the channel hook.

use crate::protocol::{ClientEvent, Reply, ServerEvent};
use crate::state::Controller;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Signup,
    ChangePassword,
}

#[derive(Clone, Debug)]
pub struct AccountForm {
    kind: FormKind,
    errors: Vec<String>,
    /// Set after a pin was requested; the login form then asks for the pin.
    pin_sent_to: Option<String>,
}

impl AccountForm {
    pub fn new(kind: FormKind) -> Self {
        Self { kind, errors: Vec::new(), pin_sent_to: None }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn pin_sent_to(&self) -> Option<&str> {
        self.pin_sent_to.as_deref()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Vec<Reply> {
        self.submit(ClientEvent::LoginData {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    pub fn sign_up(&mut self, username: &str, email: &str, password: &str, c_password: &str) -> Vec<Reply> {
        self.submit(ClientEvent::SignUpData {
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            c_password: c_password.to_owned(),
        })
    }

    /// Mails a one-time pin to the account's address.
    pub fn forgot_password(&mut self, username: &str) -> Vec<Reply> {
        let username = username.trim();
        if username.is_empty() {
            self.errors = vec!["Enter your username first".to_owned()];
            return Vec::new();
        }
        self.pin_sent_to = Some(username.to_owned());
        self.submit(ClientEvent::ForgotPassword { username: username.to_owned() })
    }

    pub fn login_with_pin(&mut self, otp: &str) -> Vec<Reply> {
        let Some(username) = self.pin_sent_to.clone() else {
            return Vec::new();
        };
        self.submit(ClientEvent::LoginOtp { username, otp: otp.trim().to_owned() })
    }

    pub fn change_password(&mut self, password: &str) -> Vec<Reply> {
        self.submit(ClientEvent::SubmitChange { password: password.to_owned() })
    }

    fn submit(&mut self, event: ClientEvent) -> Vec<Reply> {
        self.errors.clear();
        vec![Reply::send(event)]
    }
}

impl Controller for AccountForm {
    fn on_open(&mut self) -> Vec<Reply> {
        match self.kind {
            // The server moves the user away unless they arrived through a pin login.
            FormKind::ChangePassword => vec![Reply::send(ClientEvent::CheckPwordChange)],
            FormKind::Login | FormKind::Signup => Vec::new(),
        }
    }

    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply> {
        match (self.kind, event) {
            (FormKind::Login, ServerEvent::LoginError { errors })
            | (FormKind::Signup, ServerEvent::SignupErrors { errors })
            | (FormKind::ChangePassword, ServerEvent::PasswordErrors { errors }) => {
                self.errors = errors;
            }
            _ => {}
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_errors_are_kept_verbatim() {
        let mut form = AccountForm::new(FormKind::Login);
        assert!(form.on_open().is_empty());
        form.login("kenji", "");
        form.on_event(ServerEvent::LoginError {
            errors: vec!["Incorrect username or password".into(), "Fields cannot be blank!".into()],
        });
        assert_eq!(form.errors(), ["Incorrect username or password", "Fields cannot be blank!"]);

        // A fresh attempt clears the previous list.
        let replies = form.login("kenji", "hunter2");
        assert!(form.errors().is_empty());
        assert_eq!(
            replies,
            vec![Reply::send(ClientEvent::LoginData { username: "kenji".into(), password: "hunter2".into() })]
        );
    }

    #[test]
    fn errors_for_other_forms_are_ignored() {
        let mut form = AccountForm::new(FormKind::Signup);
        form.on_event(ServerEvent::LoginError { errors: vec!["nope".into()] });
        assert!(form.errors().is_empty());
        form.on_event(ServerEvent::SignupErrors { errors: vec!["Passwords must match!".into()] });
        assert_eq!(form.errors(), ["Passwords must match!"]);
    }

    #[test]
    fn pin_login_reuses_the_requested_username() {
        let mut form = AccountForm::new(FormKind::Login);
        assert!(form.login_with_pin("1234").is_empty());
        form.forgot_password(" yuki ");
        assert_eq!(form.pin_sent_to(), Some("yuki"));
        assert_eq!(
            form.login_with_pin(" 4821 "),
            vec![Reply::send(ClientEvent::LoginOtp { username: "yuki".into(), otp: "4821".into() })]
        );
    }

    #[test]
    fn forgot_password_needs_a_username() {
        let mut form = AccountForm::new(FormKind::Login);
        assert!(form.forgot_password("").is_empty());
        assert_eq!(form.errors().len(), 1);
        assert!(form.pin_sent_to().is_none());
    }

    #[test]
    fn change_password_checks_access_on_open() {
        let mut form = AccountForm::new(FormKind::ChangePassword);
        assert_eq!(form.on_open(), vec![Reply::send(ClientEvent::CheckPwordChange)]);
        form.change_password("short");
        form.on_event(ServerEvent::PasswordErrors { errors: vec!["Too short".into()] });
        assert_eq!(form.errors(), ["Too short"]);
    }
}
