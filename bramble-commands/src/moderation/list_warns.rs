use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::embeds::{guild_only_message, target_profile_from_user, usage_message};
use bramble_core::{Context, Error};
use bramble_ledger::model::warnings::WarningRecord;
use bramble_utils::embed::DEFAULT_EMBED_COLOR;
use bramble_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "list_warns",
    desc: "List the warnings recorded for a user.",
    category: "moderation",
    usage: ".list_warns <user>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn list_warns(
    ctx: Context<'_>,
    #[description = "The user to check"] user: Option<serenity::User>,
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

    let target_profile = target_profile_from_user(&user);

    let Some(entries) = ctx.data().ledger.warnings_for(user.id.get()).await else {
        let embed = serenity::CreateEmbed::new()
            .color(DEFAULT_EMBED_COLOR)
            .title("No Warnings")
            .description(format!("{} has no warnings.", target_profile.display_name));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title(format!("Warnings for {}", target_profile.display_name))
        .description(warning_lines(&entries));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

fn warning_lines(entries: &[WarningRecord]) -> String {
    let mut lines = format!("Total warnings: **{}**\n\n", entries.len());

    for (index, entry) in entries.iter().enumerate() {
        lines.push_str(&format!(
            "#{idx} • **Reason :** {reason}\n**When :** <t:{ts}:R> • <t:{ts}:f>\n\n",
            idx = index + 1,
            reason = entry.reason.replace('@', "@\u{200B}"),
            ts = entry.timestamp,
        ));
    }

    lines.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::warning_lines;
    use bramble_ledger::model::warnings::WarningRecord;

    #[test]
    fn lines_number_warnings_and_neutralize_mentions() {
        let entries = vec![
            WarningRecord {
                timestamp: 1_700_000_000,
                reason: "spam".to_owned(),
            },
            WarningRecord {
                timestamp: 1_700_000_100,
                reason: "pinging @everyone".to_owned(),
            },
        ];

        let lines = warning_lines(&entries);
        assert!(lines.starts_with("Total warnings: **2**"));
        assert!(lines.contains("#1 • **Reason :** spam"));
        assert!(lines.contains("<t:1700000000:R>"));
        assert!(lines.contains("#2 • **Reason :** pinging @\u{200B}everyone"));
        assert!(!lines.contains("pinging @everyone"));
    }
}
