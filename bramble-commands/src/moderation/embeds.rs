use poise::serenity_prelude as serenity;

use bramble_utils::embed::DEFAULT_EMBED_COLOR;

#[derive(Clone, Debug)]
pub struct TargetProfile {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

pub fn target_profile_from_user(user: &serenity::User) -> TargetProfile {
    TargetProfile {
        display_name: user
            .global_name
            .clone()
            .unwrap_or_else(|| user.name.clone()),
        avatar_url: Some(user.face()),
    }
}

pub fn moderation_action_embed(
    target_profile: &TargetProfile,
    target_user_id: serenity::UserId,
    action_past_tense: &str,
    reason: Option<&str>,
    duration: Option<&str>,
) -> serenity::CreateEmbed {
    let mut lines = vec![format!("**Target :** <@{}>", target_user_id.get())];

    if let Some(reason) = reason {
        lines.push(format!("**Reason :** {}", reason.replace('@', "@\u{200B}")));
    }

    if let Some(duration) = duration {
        lines.push(format!("**Duration :** {}", duration));
    }

    let mut embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .description(lines.join("\n"));

    if let Some(url) = target_profile.avatar_url.as_deref() {
        embed = embed.author(
            serenity::CreateEmbedAuthor::new(format!(
                "{} has been {}",
                target_profile.display_name, action_past_tense
            ))
            .icon_url(url),
        );
    } else {
        embed = embed.title(format!(
            "{} has been {}",
            target_profile.display_name, action_past_tense
        ));
    }

    embed
}

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn is_missing_permissions_error(source: &serenity::Error) -> bool {
    matches!(
        source,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 403 || response.error.code == 50013
    )
}
