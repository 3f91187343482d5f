use std::sync::Arc;

use poise::serenity_prelude as serenity;

use bramble_ledger::Ledger;
use bramble_utils::scheduler::UnmuteScheduler;

pub type Error = anyhow::Error;

/// Shared state handed to every command and event handler.
#[derive(Clone, Debug)]
pub struct Data {
    pub ledger: Ledger,
    pub unmutes: Arc<UnmuteScheduler>,
    /// Destination for deleted/edited message logs; `None` disables them.
    pub userlog_channel: Option<serenity::ChannelId>,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
