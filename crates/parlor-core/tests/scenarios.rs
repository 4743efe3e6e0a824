//! End-to-end scenarios exercising the store the way the HTTP layer does:
//! login for a token, authenticate, then operate.

use parlor_core::{Error, Store};

#[test]
fn login_then_authenticate_round_trip() {
    let store = Store::new();

    let alice_id = store.login("alice").unwrap();
    let bob_id = store.login("bob").unwrap();
    assert_ne!(alice_id, bob_id);

    assert_eq!(store.authenticate(&alice_id.to_string()).unwrap(), "alice");
    assert_eq!(store.authenticate("not-a-token"), Err(Error::Unauthorized));

    // A second login reuses the identifier and keeps the token valid.
    assert_eq!(store.login("alice").unwrap(), alice_id);
    assert_eq!(store.authenticate(&alice_id.to_string()).unwrap(), "alice");
}

#[test]
fn first_message_creates_conversation_and_forward_needs_target_membership() {
    let store = Store::new();
    store.login("alice").unwrap();
    store.login("bob").unwrap();

    let (cid, mid) = store.send_message("alice", None, "hi", false).unwrap();
    let conversation = store.get_conversation("alice", cid).unwrap();
    assert_eq!(conversation.participants, vec!["alice"]);
    assert_eq!(conversation.messages[0].text, "hi");

    // Bob's group is invisible to alice, so forwarding into it reads as a
    // missing conversation rather than a permissions failure.
    let (bob_group, _) = store.send_message("bob", None, "welcome", true).unwrap();
    assert_eq!(
        store.forward_message("alice", mid, bob_group),
        Err(Error::NotFound)
    );
}

#[test]
fn group_membership_lifecycle() {
    let store = Store::new();
    store.login("alice").unwrap();
    store.login("bob").unwrap();

    let (gid, _) = store.send_message("alice", None, "welcome", true).unwrap();
    store.add_to_group("alice", gid, "bob").unwrap();
    assert_eq!(store.list_conversations("bob").unwrap(), vec![gid]);

    store.leave_group("bob", gid).unwrap();
    assert!(store.list_conversations("bob").unwrap().is_empty());
    assert_eq!(
        store.get_conversation("alice", gid).unwrap().participants,
        vec!["alice"]
    );
}

#[test]
fn rename_carries_conversations_and_access_over() {
    let store = Store::new();
    let alice_token = store.login("alice").unwrap().to_string();
    store.login("bob").unwrap();

    let (cid, _) = store.send_message("alice", None, "hi", false).unwrap();
    let (gid, _) = store.send_message("bob", None, "group", true).unwrap();
    store.add_to_group("bob", gid, "alice").unwrap();
    let before = store.list_conversations("alice").unwrap();
    assert_eq!(before, vec![cid, gid]);

    store.rename_user("alice", "alicia").unwrap();

    // The token now authenticates as the new name, which sees exactly the
    // conversations the old name saw.
    assert_eq!(store.authenticate(&alice_token).unwrap(), "alicia");
    assert_eq!(store.list_conversations("alicia").unwrap(), before);
    assert!(store.list_conversations("alice").unwrap().is_empty());

    // Participant lists were re-keyed too: access still works under the new
    // name, and a later group roster shows it.
    store.send_message("alicia", Some(cid), "still me", false).unwrap();
    assert!(
        store
            .get_conversation("bob", gid)
            .unwrap()
            .participants
            .contains(&"alicia".to_string())
    );

    // Old name is free again; a new login under it is a different user.
    let second_alice = store.login("alice").unwrap();
    assert_ne!(second_alice.to_string(), alice_token);
}

#[test]
fn rename_conflicts_with_existing_user() {
    let store = Store::new();
    store.login("alice").unwrap();
    store.login("bob").unwrap();

    assert_eq!(
        store.rename_user("alice", "bob"),
        Err(Error::Conflict("name already taken"))
    );
    // Renaming to yourself is fine.
    store.rename_user("alice", "alice").unwrap();
}

#[test]
fn deleted_messages_stay_visible_but_inert() {
    let store = Store::new();
    store.login("alice").unwrap();

    let (cid, mid) = store.send_message("alice", None, "regret", false).unwrap();
    store.delete_message("alice", mid).unwrap();

    let messages = store.get_conversation("alice", cid).unwrap().messages;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].deleted);

    assert_eq!(
        store.comment_message("alice", mid, "post mortem"),
        Err(Error::Conflict("message is deleted"))
    );
    assert_eq!(
        store.forward_message("alice", mid, cid),
        Err(Error::Conflict("message is deleted"))
    );
}
