use tracing::{debug, error};

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::embeds::{
    guild_only_message, is_missing_permissions_error, moderation_action_embed,
    target_profile_from_user, usage_message,
};
use bramble_core::{Context, Error};
use bramble_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "unmute",
    desc: "Remove a voice mute from a user.",
    category: "moderation",
    usage: ".unmute <user>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "The user to unmute"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::MUTE_MEMBERS,
    )
    .await?
    {
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    // A manual un-mute supersedes any scheduled one.
    if ctx.data().unmutes.cancel(user.id.get()).await {
        debug!(user_id = user.id.get(), "cancelled scheduled un-mute");
    }

    let edit = serenity::EditMember::new().mute(false);
    if let Err(source) = guild_id.edit_member(ctx.http(), user.id, edit).await {
        if is_missing_permissions_error(&source) {
            ctx.say("I don't have enough permissions to unmute that user.")
                .await?;
        } else {
            error!(?source, "unmute request failed");
            ctx.say("I couldn't unmute that user. Check role hierarchy and permissions.")
                .await?;
        }
        return Ok(());
    }

    let target_profile = target_profile_from_user(&user);
    let embed = moderation_action_embed(&target_profile, user.id, "unmuted", None, None);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
