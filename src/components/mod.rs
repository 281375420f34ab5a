pub mod account_form;
pub mod app;
pub mod chat_view;
pub mod dictionary_view;
pub mod drawing_pad;
pub mod duel_view;
pub mod home_view;
pub mod level_view;
pub mod matching_view;
pub mod overlay;
pub mod profile_view;
pub mod solo_view;

pub use app::App;
