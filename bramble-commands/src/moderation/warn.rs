use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::embeds::{
    guild_only_message, moderation_action_embed, target_profile_from_user, usage_message,
};
use bramble_core::{Context, Error};
use bramble_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "warn",
    desc: "Issue a warning to a user and record it in the ledger.",
    category: "moderation",
    usage: ".warn <user> <reason>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "The user to warn"] user: Option<serenity::User>,
    #[description = "Reason for warning"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::MANAGE_MESSAGES,
    )
    .await?
    {
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    // The reason is required, unlike the other moderation commands.
    let Some(reason) = reason.map(|raw| raw.trim().to_owned()).filter(|r| !r.is_empty()) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let recorded = ctx.data().ledger.warn(user.id.get(), &reason).await?;

    let action = format!("warned #{}", recorded.warn_number);
    let target_profile = target_profile_from_user(&user);
    let embed =
        moderation_action_embed(&target_profile, user.id, &action, Some(&reason), None);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
