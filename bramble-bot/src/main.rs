mod events;

use std::env;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use bramble_core::{Data, Error};
use bramble_ledger::Ledger;
use bramble_utils::DEFAULT_COMMAND_PREFIX;
use bramble_utils::scheduler::UnmuteScheduler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let prefix =
        env::var("COMMAND_PREFIX").unwrap_or_else(|_| DEFAULT_COMMAND_PREFIX.to_string());
    let warnings_file =
        env::var("WARNINGS_FILE").unwrap_or_else(|_| "warnings.json".to_owned());
    let userlog_channel = env_channel_id("USERLOG_CHANNEL_ID");
    let guild_id = env_u64("DISCORD_GUILD_ID");

    let ledger = Ledger::load(&warnings_file)?;
    info!(
        path = %ledger.path().display(),
        users = ledger.user_count().await,
        "Warning ledger loaded."
    );

    if userlog_channel.is_none() {
        info!("Userlog disabled (set USERLOG_CHANNEL_ID to log deleted/edited messages).");
    }

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: bramble_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let ledger = ledger.clone();
            Box::pin(async move {
                info!("Bramble has taken root!");

                match guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                    }
                }

                Ok(Data {
                    ledger,
                    unmutes: UnmuteScheduler::new(),
                    userlog_channel,
                })
            })
        })
        .build();

    info!("Bramble is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn env_u64(key: &str) -> Option<u64> {
    match env::var(key) {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(key, value, "ignoring unparseable numeric variable");
                None
            }
        },
        Err(_) => None,
    }
}

fn env_channel_id(key: &str) -> Option<serenity::ChannelId> {
    env_u64(key)
        .filter(|id| *id != 0)
        .map(serenity::ChannelId::new)
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(bramble_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!(
                "Usage: `{}{}`",
                DEFAULT_COMMAND_PREFIX,
                ctx.command().qualified_name
            );
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!(user = %data_about_bot.user.name, "Logged in.");
        }
        serenity::FullEvent::MessageUpdate {
            old_if_available,
            new,
            event,
        } => {
            events::userlog::handle_message_update_userlog(
                ctx,
                data,
                old_if_available.as_ref(),
                new.as_ref(),
                event,
            )
            .await;
        }
        serenity::FullEvent::MessageDelete {
            channel_id,
            deleted_message_id,
            guild_id: Some(_),
            ..
        } => {
            events::userlog::handle_message_delete_userlog(
                ctx,
                data,
                *channel_id,
                *deleted_message_id,
            )
            .await;
        }
        serenity::FullEvent::MessageDeleteBulk {
            channel_id,
            multiple_deleted_messages_ids,
            guild_id: Some(_),
            ..
        } => {
            for message_id in multiple_deleted_messages_ids {
                events::userlog::handle_message_delete_userlog(
                    ctx,
                    data,
                    *channel_id,
                    *message_id,
                )
                .await;
            }
        }
        _ => {}
    }

    Ok(())
}
