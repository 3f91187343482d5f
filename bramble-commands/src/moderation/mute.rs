use std::time::Duration;

use tracing::error;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::embeds::{
    guild_only_message, is_missing_permissions_error, moderation_action_embed,
    target_profile_from_user, usage_message,
};
use bramble_core::{Context, Error};
use bramble_utils::formatting::format_compact_duration;
use bramble_utils::parse::parse_mute_seconds;
use bramble_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "mute",
    desc: "Voice-mute a user, optionally for a number of seconds.",
    category: "moderation",
    usage: ".mute <user> [seconds]",
};

enum MuteDuration {
    Unlimited,
    Seconds(u64),
    Invalid(String),
}

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "The user to mute"] user: Option<serenity::User>,
    #[description = "Duration in seconds"] duration: Option<String>,
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

    let duration = match duration.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match parse_mute_seconds(raw) {
            Some(seconds) => MuteDuration::Seconds(seconds),
            None => MuteDuration::Invalid(raw.to_owned()),
        },
        _ => MuteDuration::Unlimited,
    };

    // The mute is applied before the duration is even looked at; a bad
    // duration leaves it in place.
    let edit = serenity::EditMember::new().mute(true);
    if let Err(source) = guild_id.edit_member(ctx.http(), user.id, edit).await {
        if is_missing_permissions_error(&source) {
            ctx.say("I don't have enough permissions to mute that user.")
                .await?;
        } else {
            error!(?source, "mute request failed");
            ctx.say("I couldn't mute that user. Check role hierarchy and permissions.")
                .await?;
        }
        return Ok(());
    }

    let duration_label = match &duration {
        MuteDuration::Seconds(seconds) => {
            let seconds = *seconds;
            let http = ctx.serenity_context().http.clone();
            let target = user.id;

            ctx.data()
                .unmutes
                .schedule(target.get(), Duration::from_secs(seconds), async move {
                    let edit = serenity::EditMember::new().mute(false);
                    if let Err(source) = guild_id.edit_member(&http, target, edit).await {
                        error!(?source, user_id = target.get(), "scheduled un-mute failed");
                    }
                })
                .await;

            Some(format_compact_duration(seconds))
        }
        _ => None,
    };

    let target_profile = target_profile_from_user(&user);
    let embed = moderation_action_embed(
        &target_profile,
        user.id,
        "muted",
        None,
        duration_label.as_deref(),
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    if let MuteDuration::Invalid(raw) = duration {
        ctx.say(format!(
            "`{}` is not a whole number of seconds, so the mute stays until `{}unmute`.",
            raw,
            bramble_utils::DEFAULT_COMMAND_PREFIX,
        ))
        .await?;
    }

    Ok(())
}
