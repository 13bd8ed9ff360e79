//! The command router: parses inbound messages into an enumerated command,
//! checks permissions, dispatches to the handlers, and renders replies.
//! All Discord I/O for command traffic happens here.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use serenity::async_trait;
use serenity::client::Context;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::model::mention::Mentionable;
use serenity::prelude::EventHandler;
use tracing::{error, info};

use crate::commands::{self, Reply};
use crate::error::BotError;
use crate::identity::{self, ResolvedMember, UsernameToken};
use crate::model::AppState;
use crate::reconciler;

pub const COMMAND_PREFIX: &str = "!pp";

/// Every inbound command the router understands. Dispatch is a total match,
/// so adding a variant without a handler fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Del,
    Stop,
    List,
    Help,
    UserAdd,
    UserDel,
    UserStop,
    UserList,
    Send,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "add" => Command::Add,
            "del" => Command::Del,
            "stop" => Command::Stop,
            "list" => Command::List,
            "help" => Command::Help,
            "useradd" => Command::UserAdd,
            "userdel" => Command::UserDel,
            "userstop" => Command::UserStop,
            "userlist" => Command::UserList,
            "send" => Command::Send,
            _ => Command::Unknown,
        })
    }
}

impl Command {
    /// Capability predicate evaluated before dispatch: the `user*` family
    /// and `send` act on other members and need the configured role.
    pub fn requires_moderator(self) -> bool {
        matches!(
            self,
            Command::UserAdd
                | Command::UserDel
                | Command::UserStop
                | Command::UserList
                | Command::Send
        )
    }
}

pub struct Handler {
    reconciler_started: AtomicBool,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            reconciler_started: AtomicBool::new(false),
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(guild_id) = msg.guild_id else {
            return;
        };
        let Some(command_body) = msg.content.strip_prefix(COMMAND_PREFIX) else {
            return;
        };
        let mut words = command_body.split_whitespace();
        let Some(command_word) = words.next() else {
            return;
        };
        let command = Command::from_str(command_word).unwrap_or(Command::Unknown);
        let args: Vec<&str> = words.collect();

        let Some(state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        if !channel_allowed(&ctx, &msg, &state.config.command_channels) {
            return;
        }

        let result = if command.requires_moderator()
            && !has_moderator_role(&ctx, &msg, &state.config.moderator_role)
        {
            Err(BotError::PermissionDenied)
        } else {
            dispatch(&ctx, &msg, guild_id, &state, command, &args).await
        };

        match result {
            Ok(Reply::Text(text)) => reply(&ctx, &msg, &text).await,
            Ok(Reply::Chunks(chunks)) => {
                for chunk in chunks {
                    send(&ctx, &msg, chunk).await;
                }
            }
            Err(err) => {
                if err.is_internal() {
                    error!(?command, error = ?err, "command failed");
                }
                reply(&ctx, &msg, &err.user_message()).await;
            }
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "connected to Discord");
        let Some(state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        // Spawn the reconciliation timer once; reconnects fire ready again.
        if !self.reconciler_started.swap(true, Ordering::SeqCst) {
            reconciler::spawn(ctx.clone(), state);
        }
    }
}

async fn dispatch(
    ctx: &Context,
    msg: &Message,
    guild_id: GuildId,
    state: &AppState,
    command: Command,
    args: &[&str],
) -> Result<Reply, BotError> {
    let pool = &state.db;
    let cfg = &state.config;
    let invoker_id = msg.author.id.to_string();
    let invoker_mention = msg.author.mention().to_string();

    match command {
        Command::Add => {
            let username = identity::display_name(&msg.author);
            commands::registration::add(pool, &invoker_id, &username, args, cfg.max_fsas_per_command)
                .await?;
            Ok(Reply::Text("You've been added to those areas!".to_string()))
        }
        Command::Del => {
            commands::registration::remove(pool, &invoker_id, args, cfg.max_fsas_per_command)
                .await?;
            Ok(Reply::Text("You've been removed from those areas.".to_string()))
        }
        Command::Stop => {
            commands::registration::purge(pool, &invoker_id).await?;
            Ok(Reply::Text("You've been purged from the list.".to_string()))
        }
        Command::List => {
            let chunks = commands::registration::list(
                pool,
                &invoker_id,
                &invoker_mention,
                cfg.message_length_limit,
            )
            .await?;
            Ok(list_reply(chunks, "You aren't registered for any areas."))
        }
        Command::Help => Ok(Reply::Text(cfg.help_text.clone())),
        Command::UserAdd => {
            let (target, rest) = resolve_target(ctx, guild_id, args).await?;
            commands::registration::add(
                pool,
                &target.user_id.to_string(),
                &target.display,
                rest,
                cfg.max_fsas_per_command,
            )
            .await?;
            Ok(Reply::Text("User added to those areas.".to_string()))
        }
        Command::UserDel => {
            let (target, rest) = resolve_target(ctx, guild_id, args).await?;
            commands::registration::remove(
                pool,
                &target.user_id.to_string(),
                rest,
                cfg.max_fsas_per_command,
            )
            .await?;
            Ok(Reply::Text("User has been removed from those areas.".to_string()))
        }
        Command::UserStop => {
            let (target, _) = resolve_target(ctx, guild_id, args).await?;
            commands::registration::purge(pool, &target.user_id.to_string()).await?;
            Ok(Reply::Text("User has been purged from the list.".to_string()))
        }
        Command::UserList => {
            let (target, _) = resolve_target(ctx, guild_id, args).await?;
            let chunks = commands::registration::list(
                pool,
                &target.user_id.to_string(),
                &invoker_mention,
                cfg.message_length_limit,
            )
            .await?;
            Ok(list_reply(chunks, "User isn't registered for any areas."))
        }
        Command::Send => {
            let chunks = commands::send::run(
                pool,
                &invoker_mention,
                args,
                cfg.max_fsas_per_command,
                cfg.max_fsas_per_send,
                cfg.message_length_limit,
            )
            .await?;
            if chunks.is_empty() {
                Ok(Reply::Text("No one to ping.".to_string()))
            } else {
                Ok(Reply::Chunks(chunks))
            }
        }
        Command::Unknown => Err(BotError::UnknownCommand),
    }
}

fn list_reply(chunks: Vec<String>, empty_text: &str) -> Reply {
    if chunks.is_empty() {
        Reply::Text(empty_text.to_string())
    } else {
        Reply::Chunks(chunks)
    }
}

/// Pulls the username argument off the front of `args` and resolves it to a
/// guild member. Returns the remaining arguments for the FSA parser.
async fn resolve_target<'a>(
    ctx: &Context,
    guild_id: GuildId,
    args: &'a [&'a str],
) -> Result<(ResolvedMember, &'a [&'a str]), BotError> {
    let Some((raw_username, rest)) = args.split_first() else {
        return Err(BotError::MissingArgument("a username (ex: user1#1001)"));
    };
    let token = UsernameToken::parse(raw_username)?;
    let member = identity::resolve(ctx, guild_id, &token).await?;
    Ok((member, rest))
}

/// Commands are honored everywhere when the allowlist is empty, otherwise
/// only in channels whose name is listed. Elsewhere they are ignored
/// silently rather than rejected.
fn channel_allowed(ctx: &Context, msg: &Message, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let Some(channel) = ctx.cache.channel(msg.channel_id) else {
        return false;
    };
    allowed.iter().any(|name| *name == channel.name)
}

/// Checks the invoking member's roles against the configured moderator role
/// by name. Data is copied out of the cache guard before any await.
fn has_moderator_role(ctx: &Context, msg: &Message, role_name: &str) -> bool {
    let Some(guild_id) = msg.guild_id else {
        return false;
    };
    let Some(role_id) = ctx
        .cache
        .guild(guild_id)
        .and_then(|guild| guild.role_by_name(role_name).map(|role| role.id))
    else {
        return false;
    };
    msg.member
        .as_ref()
        .is_some_and(|member| member.roles.contains(&role_id))
}

async fn reply(ctx: &Context, msg: &Message, text: &str) {
    send(ctx, msg, format!("{} {}", msg.author.mention(), text)).await;
}

async fn send(ctx: &Context, msg: &Message, content: String) {
    if let Err(e) = msg.channel_id.say(&ctx.http, content).await {
        error!(error = ?e, "failed to send reply");
    }
}
