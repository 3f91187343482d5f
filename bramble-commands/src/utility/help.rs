use poise::serenity_prelude as serenity;

use crate::{COMMANDS, CommandMeta};
use bramble_core::{Context, Error};
use bramble_utils::embed::DEFAULT_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: ".help",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title("Available Commands")
        .description(grouped_help_description(COMMANDS));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

fn grouped_help_description(commands: &[CommandMeta]) -> String {
    let mut sorted: Vec<&CommandMeta> = commands.iter().collect();
    sorted.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    let mut lines = String::new();
    let mut current_category: Option<&str> = None;

    for command in sorted {
        if current_category != Some(command.category) {
            if current_category.is_some() {
                lines.push('\n');
            }
            lines.push_str(&format!("**{}**\n", title_case(command.category)));
            current_category = Some(command.category);
        }

        lines.push_str(&format!("`{}` — {}\n", command.usage, command.desc));
    }

    lines.trim_end().to_owned()
}

fn title_case(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::grouped_help_description;
    use crate::COMMANDS;

    #[test]
    fn description_groups_by_category_and_lists_every_command() {
        let description = grouped_help_description(COMMANDS);

        assert!(description.contains("**Moderation**"));
        assert!(description.contains("**Utility**"));
        for command in COMMANDS {
            assert!(description.contains(command.usage), "missing {}", command.name);
        }

        let moderation = description.find("**Moderation**").expect("moderation");
        let utility = description.find("**Utility**").expect("utility");
        assert!(moderation < utility);
    }
}
