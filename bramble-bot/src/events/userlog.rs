use poise::serenity_prelude as serenity;
use tracing::error;

use bramble_core::Data;
use bramble_utils::embed::DEFAULT_EMBED_COLOR;

/// Forward a deleted message to the configured userlog channel.
///
/// The deleted content is only available through the gateway cache; an
/// uncached message is still logged, with placeholders.
pub async fn handle_message_delete_userlog(
    ctx: &serenity::Context,
    data: &Data,
    channel_id: serenity::ChannelId,
    message_id: serenity::MessageId,
) {
    let Some(log_channel) = data.userlog_channel else {
        return;
    };

    let cached = ctx
        .cache
        .message(channel_id, message_id)
        .map(|message| message.clone());

    if cached.as_ref().is_some_and(|message| message.author.bot) {
        return;
    }

    let channel_name = channel_label(ctx, channel_id).await;
    let description = match cached.as_ref() {
        Some(message) => format!(
            "Message deleted in #{} by {}",
            channel_name, message.author.name
        ),
        None => format!("Message deleted in #{}", channel_name),
    };
    let content = cached
        .as_ref()
        .map(|message| message.content.as_str())
        .unwrap_or("(content unavailable, message was not cached)");

    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title("Message Deleted")
        .description(description)
        .field("Content", field_text(content), false)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Channel ID: {}",
            channel_id.get()
        )));

    if let Err(source) = log_channel
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        error!(?source, "failed to send delete log");
    }
}

/// Forward an edited message to the configured userlog channel, skipping
/// edits that leave the content unchanged (embed resolution, pins and the
/// like also arrive as updates).
pub async fn handle_message_update_userlog(
    ctx: &serenity::Context,
    data: &Data,
    old_if_available: Option<&serenity::Message>,
    new: Option<&serenity::Message>,
    event: &serenity::MessageUpdateEvent,
) {
    let Some(log_channel) = data.userlog_channel else {
        return;
    };

    if event.guild_id.is_none() {
        return;
    }

    let author = new.map(|message| &message.author).or(event.author.as_ref());
    if author.is_some_and(|author| author.bot) {
        return;
    }

    let old_content = old_if_available.map(|message| message.content.as_str());
    let new_content = new
        .map(|message| message.content.as_str())
        .or(event.content.as_deref());

    let Some((old_content, new_content)) = genuine_edit(old_content, new_content) else {
        return;
    };

    let channel_name = channel_label(ctx, event.channel_id).await;
    let description = match author {
        Some(author) => format!("Message edited in #{} by {}", channel_name, author.name),
        None => format!("Message edited in #{}", channel_name),
    };

    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title("Message Edited")
        .description(description)
        .field("Original Content", field_text(&old_content), false)
        .field("Edited Content", field_text(&new_content), false)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Channel ID: {}",
            event.channel_id.get()
        )));

    if let Err(source) = log_channel
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        error!(?source, "failed to send edit log");
    }
}

/// Both sides must be known to prove the content actually changed; an
/// unavailable old version logs nothing rather than a false positive.
fn genuine_edit(old: Option<&str>, new: Option<&str>) -> Option<(String, String)> {
    let old = old?;
    let new = new?;

    (old != new).then(|| (old.to_owned(), new.to_owned()))
}

async fn channel_label(ctx: &serenity::Context, channel_id: serenity::ChannelId) -> String {
    channel_id
        .name(ctx)
        .await
        .unwrap_or_else(|_| format!("channel-{}", channel_id.get()))
}

fn field_text(content: &str) -> String {
    if content.trim().is_empty() {
        "(no text content)".to_owned()
    } else {
        content.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{field_text, genuine_edit};

    #[test]
    fn unchanged_content_is_not_an_edit() {
        assert_eq!(genuine_edit(Some("hello"), Some("hello")), None);
    }

    #[test]
    fn changed_content_yields_both_versions() {
        assert_eq!(
            genuine_edit(Some("hello"), Some("hallo")),
            Some(("hello".to_owned(), "hallo".to_owned()))
        );
    }

    #[test]
    fn unknown_sides_log_nothing() {
        assert_eq!(genuine_edit(None, Some("hallo")), None);
        assert_eq!(genuine_edit(Some("hello"), None), None);
        assert_eq!(genuine_edit(None, None), None);
    }

    #[test]
    fn empty_content_gets_a_placeholder() {
        assert_eq!(field_text("  "), "(no text content)");
        assert_eq!(field_text("hi"), "hi");
    }
}
