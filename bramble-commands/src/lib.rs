pub mod moderation;
pub mod utility;

use bramble_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    moderation::mute::META,
    moderation::unmute::META,
    moderation::ban::META,
    moderation::warn::META,
    moderation::list_warns::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        moderation::mute::mute(),
        moderation::unmute::unmute(),
        moderation::ban::ban(),
        moderation::warn::warn(),
        moderation::list_warns::list_warns(),
    ]
}
