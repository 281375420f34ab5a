//! Profile pages: progress (own or another user's), friends and account settings.

use std::collections::BTreeSet;

use crate::model::{AccountSettings, ProfileData, UserId, UserRef};
use crate::protocol::{ClientEvent, Reply, ServerEvent};
use crate::state::Controller;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileTab {
    /// `None` is the signed-in user's own progress.
    Progress(Option<String>),
    Friends,
    Settings,
}

/// Editable copy of the account settings. Passwords are never prefilled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub c_password: String,
    pub reminder: bool,
    pub info: bool,
    pub promo: bool,
}

impl From<&AccountSettings> for SettingsDraft {
    fn from(current: &AccountSettings) -> Self {
        Self {
            username: current.username.clone(),
            email: current.email.clone(),
            reminder: current.remind,
            info: current.info,
            promo: current.promo,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProfilePage {
    tab: ProfileTab,
    data: Option<ProfileData>,
    found: Vec<UserRef>,
    requested: BTreeSet<UserId>,
    settings: Option<AccountSettings>,
    errors: Vec<String>,
}

impl ProfilePage {
    pub fn new(tab: ProfileTab) -> Self {
        Self {
            tab,
            data: None,
            found: Vec::new(),
            requested: BTreeSet::new(),
            settings: None,
            errors: Vec::new(),
        }
    }

    pub fn tab(&self) -> &ProfileTab {
        &self.tab
    }

    pub fn data(&self) -> Option<&ProfileData> {
        self.data.as_ref()
    }

    pub fn found_users(&self) -> &[UserRef] {
        &self.found
    }

    pub fn already_requested(&self, user: UserId) -> bool {
        self.requested.contains(&user)
    }

    pub fn settings(&self) -> Option<&AccountSettings> {
        self.settings.as_ref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Whose progress is shown, for the page heading.
    pub fn viewing(&self) -> Option<&str> {
        match &self.tab {
            ProfileTab::Progress(other) => other.as_deref(),
            _ => None,
        }
    }

    pub fn look_for(&mut self, name: &str) -> Vec<Reply> {
        let name = name.trim();
        if name.is_empty() {
            self.found.clear();
            return Vec::new();
        }
        vec![Reply::send(ClientEvent::LookFor { name: name.to_owned() })]
    }

    pub fn request_user(&mut self, user: UserId) -> Vec<Reply> {
        if !self.requested.insert(user) {
            return Vec::new();
        }
        vec![Reply::send(ClientEvent::RequestUser { user_id: user })]
    }

    /// The server does not answer accept/reject, so the friend lists are refetched.
    pub fn accept(&mut self, user: UserId) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::Accept { user_id: user }), Self::refresh()]
    }

    pub fn reject(&mut self, user: UserId) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::Reject { user_id: user }), Self::refresh()]
    }

    pub fn view_other_profile(&self, username: &str) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::ViewOtherProfile { other_username: username.to_owned() })]
    }

    pub fn save_settings(&mut self, draft: SettingsDraft) -> Vec<Reply> {
        self.errors.clear();
        vec![Reply::send(ClientEvent::SettingsChange {
            username: draft.username,
            email: draft.email,
            password: draft.password,
            c_password: draft.c_password,
            reminder: draft.reminder,
            info: draft.info,
            promo: draft.promo,
        })]
    }

    fn refresh() -> Reply {
        Reply::send(ClientEvent::GetProfileData { other_username: None })
    }
}

impl Controller for ProfilePage {
    fn on_open(&mut self) -> Vec<Reply> {
        let request = match &self.tab {
            ProfileTab::Progress(other) => ClientEvent::GetProfileData { other_username: other.clone() },
            ProfileTab::Friends => ClientEvent::GetProfileData { other_username: None },
            ProfileTab::Settings => ClientEvent::GetSettings,
        };
        vec![Reply::send(request)]
    }

    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply> {
        match event {
            ServerEvent::UserData(data) => self.data = Some(data),
            ServerEvent::FoundUsers { people } => self.found = people,
            ServerEvent::CurrentSettings(settings) => self.settings = Some(settings),
            ServerEvent::ChangeErrors { errors } => self.errors = errors,
            _ => {}
        }
        Vec::new()
    }
}
