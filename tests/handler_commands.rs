//! Command token parsing: recognized names, bot mentions, maintenance
//! arguments, and everything else falling through to free-text dispatch.

use pantry_bot::handler::Command;

#[test]
fn recognizes_every_command() {
    assert_eq!(Command::parse("/new"), Some(Command::New));
    assert_eq!(Command::parse("/list"), Some(Command::List));
    assert_eq!(Command::parse("/listexpired"), Some(Command::ListExpired));
    assert_eq!(Command::parse("/inventory"), Some(Command::Inventory));
    assert_eq!(Command::parse("/invite"), Some(Command::Invite));
    assert_eq!(Command::parse("/acceptinvite"), Some(Command::AcceptInvite));
    assert_eq!(Command::parse("/cancel"), Some(Command::Cancel));
}

#[test]
fn tolerates_a_bot_mention_suffix() {
    assert_eq!(Command::parse("/list@PantryBot"), Some(Command::List));
    assert_eq!(Command::parse("/new@PantryBot"), Some(Command::New));
}

#[test]
fn maintenance_commands_carry_their_secret() {
    assert_eq!(
        Command::parse("/notifyexpired s3cr3t"),
        Some(Command::NotifyExpired("s3cr3t".to_string()))
    );
    assert_eq!(
        Command::parse("/purgewithdrawn s3cr3t"),
        Some(Command::PurgeWithdrawn("s3cr3t".to_string()))
    );
    // A missing argument parses to an empty secret, which can never match.
    assert_eq!(
        Command::parse("/notifyexpired"),
        Some(Command::NotifyExpired(String::new()))
    );
}

#[test]
fn everything_else_is_free_text() {
    assert_eq!(Command::parse("hello"), None);
    assert_eq!(Command::parse("10001234"), None);
    assert_eq!(Command::parse("/unknown"), None);
    assert_eq!(Command::parse("/NEW"), None);
    assert_eq!(Command::parse(""), None);
}
