use bramble_core::{Context, Error};

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Replies with the round-trip gateway latency.",
    category: "utility",
    usage: ".ping",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await.as_millis();

    // The shard reports zero until the first heartbeat round-trip completes.
    if latency == 0 {
        ctx.say("Pong! (latency not measured yet, try again shortly)")
            .await?;
    } else {
        ctx.say(format!("Pong! {}ms", latency)).await?;
    }

    Ok(())
}
