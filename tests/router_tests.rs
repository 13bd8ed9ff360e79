//! Command parsing totality and the moderator capability matrix.

use std::str::FromStr;

use postal_pinger_bot::handler::{Command, COMMAND_PREFIX};

#[test]
fn known_command_words_parse() {
    let cases = [
        ("add", Command::Add),
        ("del", Command::Del),
        ("stop", Command::Stop),
        ("list", Command::List),
        ("help", Command::Help),
        ("useradd", Command::UserAdd),
        ("userdel", Command::UserDel),
        ("userstop", Command::UserStop),
        ("userlist", Command::UserList),
        ("send", Command::Send),
    ];
    for (word, expected) in cases {
        assert_eq!(Command::from_str(word), Ok(expected), "word {word:?}");
    }
}

#[test]
fn anything_else_falls_back_to_unknown() {
    for word in ["", "ADD", "frobnicate", "user", "sendall"] {
        assert_eq!(Command::from_str(word), Ok(Command::Unknown), "word {word:?}");
    }
}

#[test]
fn moderator_capability_matrix() {
    let moderator_only = [
        Command::UserAdd,
        Command::UserDel,
        Command::UserStop,
        Command::UserList,
        Command::Send,
    ];
    let self_service = [
        Command::Add,
        Command::Del,
        Command::Stop,
        Command::List,
        Command::Help,
        Command::Unknown,
    ];
    for command in moderator_only {
        assert!(command.requires_moderator(), "{command:?}");
    }
    for command in self_service {
        assert!(!command.requires_moderator(), "{command:?}");
    }
}

#[test]
fn prefix_matches_the_documented_invocations() {
    // "!ppadd K1P" strips to "add K1P".
    assert_eq!("!ppadd K1P".strip_prefix(COMMAND_PREFIX), Some("add K1P"));
}
