//! Username token grammar: the legacy `name#NNNN` form.

use postal_pinger_bot::error::BotError;
use postal_pinger_bot::identity::UsernameToken;

#[test]
fn parses_the_documented_example() {
    let token = UsernameToken::parse("user1#1001").expect("valid token");
    assert_eq!(token.name(), "user1");
    assert_eq!(token.discriminator(), 1001);
    assert_eq!(token.to_string(), "user1#1001");
}

#[test]
fn single_character_names_are_allowed() {
    let token = UsernameToken::parse("a#0042").expect("valid token");
    assert_eq!(token.name(), "a");
    assert_eq!(token.discriminator(), 42);
    // Leading zeros survive the round trip.
    assert_eq!(token.to_string(), "a#0042");
}

#[test]
fn name_length_is_capped_at_thirty() {
    let name = "n".repeat(30);
    assert!(UsernameToken::parse(&format!("{name}#1234")).is_ok());

    let too_long = "n".repeat(31);
    assert!(matches!(
        UsernameToken::parse(&format!("{too_long}#1234")),
        Err(BotError::InvalidUsernameFormat)
    ));
}

#[test]
fn interior_spaces_are_allowed_but_edges_are_not() {
    assert!(UsernameToken::parse("mr rogers#5678").is_ok());
    assert!(UsernameToken::parse(" rogers#5678").is_err());
    assert!(UsernameToken::parse("rogers #5678").is_err());
}

#[test]
fn rejects_forbidden_characters_and_shapes() {
    for raw in [
        "user1",
        "user1#",
        "user1#12",
        "user1#12345",
        "user1#abcd",
        "us@er#1001",
        "us`er#1001",
        "user##1001",
        "#1001",
        "user1#1001extra",
    ] {
        assert!(
            matches!(
                UsernameToken::parse(raw),
                Err(BotError::InvalidUsernameFormat)
            ),
            "expected {raw:?} to be rejected"
        );
    }
}
