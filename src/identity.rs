//! Username token parsing and member resolution.
//!
//! Moderator commands and the spreadsheet import address members by the
//! legacy `name#NNNN` form. The name portion is 1-30 characters, may not
//! contain `@`, `#` or backticks, and may not start or end with whitespace;
//! the discriminator is exactly four digits.

use std::fmt;
use std::num::NonZeroU16;
use std::sync::LazyLock;

use regex::Regex;
use serenity::client::Context;
use serenity::model::id::{GuildId, UserId};
use serenity::model::user::User;

use crate::error::BotError;

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^@#`\s]|[^@#`\s][^@#`]{0,28}[^@#`\s])#([0-9]{4})$").expect("valid regex")
});

/// A syntactically valid `name#NNNN` token, not yet resolved to a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernameToken {
    name: String,
    discriminator: u16,
}

impl UsernameToken {
    pub fn parse(raw: &str) -> Result<Self, BotError> {
        let caps = USERNAME_RE
            .captures(raw)
            .ok_or(BotError::InvalidUsernameFormat)?;
        let discriminator = caps[2]
            .parse()
            .map_err(|_| BotError::InvalidUsernameFormat)?;
        Ok(Self {
            name: caps[1].to_string(),
            discriminator,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discriminator(&self) -> u16 {
        self.discriminator
    }

    /// Whether this token names the given user account.
    pub fn matches(&self, user: &User) -> bool {
        user.name == self.name
            && user.discriminator.map_or(0, NonZeroU16::get) == self.discriminator
    }
}

impl fmt::Display for UsernameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:04}", self.name, self.discriminator)
    }
}

/// The stable `name#NNNN` string snapshot stored alongside registrations.
///
/// Captured at write time and never re-resolved, so later name changes do
/// not retroactively update stored rows. Accounts migrated off the legacy
/// discriminator system render as the bare name.
pub fn display_name(user: &User) -> String {
    match user.discriminator {
        Some(d) => format!("{}#{:04}", user.name, d),
        None => user.name.clone(),
    }
}

/// A member resolved within a guild: the stable id plus the display
/// snapshot captured at resolution time.
#[derive(Debug, Clone)]
pub struct ResolvedMember {
    pub user_id: UserId,
    pub display: String,
}

/// Resolves a token to a member of `guild_id`.
///
/// The cached member list is checked first; on a miss the gateway may simply
/// not have chunked the guild yet, so a REST member search on the name
/// portion is tried before giving up with `UserNotFound`.
pub async fn resolve(
    ctx: &Context,
    guild_id: GuildId,
    token: &UsernameToken,
) -> Result<ResolvedMember, BotError> {
    if let Some(found) = find_in_cache(ctx, guild_id, token) {
        return Ok(found);
    }

    let candidates = guild_id
        .search_members(&ctx.http, token.name(), None)
        .await?;
    candidates
        .iter()
        .find(|member| token.matches(&member.user))
        .map(|member| ResolvedMember {
            user_id: member.user.id,
            display: display_name(&member.user),
        })
        .ok_or(BotError::UserNotFound)
}

// Copies the match out of the cache guard; the guard must not be held across
// an await point.
fn find_in_cache(ctx: &Context, guild_id: GuildId, token: &UsernameToken) -> Option<ResolvedMember> {
    let guild = ctx.cache.guild(guild_id)?;
    let member = guild.members.values().find(|m| token.matches(&m.user))?;
    Some(ResolvedMember {
        user_id: member.user.id,
        display: display_name(&member.user),
    })
}
