//! Error taxonomy for the bot core.
//!
//! User-correctable errors (bad FSA, bad username, missing permission) carry
//! their reply text in their `Display` form. Infrastructure errors keep their
//! full detail for the logs and surface to users only as a generic failure.

/// Every way a command can fail.
///
/// Validation messages never echo the raw token back; replies are rendered
/// straight into a chat message and the input may be malicious.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("One of the given area codes is too short.")]
    FsaTooShort,

    #[error("One of the given area codes is too long.")]
    FsaTooLong,

    #[error("One of the given area codes is invalid. It should look like 'K1P' (no quotes).")]
    FsaInvalid,

    #[error("No area codes provided.")]
    NoCodesProvided,

    #[error("That's too many codes at once.")]
    TooManyCodes,

    #[error("Sorry, you're trying to ping too many area codes at once.")]
    TooManyPingTargets,

    #[error("Invalid username. It should look like 'user1#1001' (no quotes).")]
    InvalidUsernameFormat,

    #[error("User not found.")]
    UserNotFound,

    #[error("Sorry, you don't have the correct role for this command.")]
    PermissionDenied,

    #[error("Sorry, that command doesn't exist.")]
    UnknownCommand,

    #[error("Please provide {0}.")]
    MissingArgument(&'static str),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("discord error: {0}")]
    Discord(#[from] serenity::Error),
}

impl BotError {
    /// True for failures whose detail stays server-side.
    pub fn is_internal(&self) -> bool {
        matches!(self, BotError::Store(_) | BotError::Discord(_))
    }

    /// The reply text shown to the invoking user.
    pub fn user_message(&self) -> String {
        if self.is_internal() {
            "Sorry, something went wrong. Please try again later.".to_string()
        } else {
            self.to_string()
        }
    }
}
