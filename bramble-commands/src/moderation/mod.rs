pub mod ban;
pub mod list_warns;
pub mod mute;
pub mod unmute;
pub mod warn;

pub(crate) mod embeds;
