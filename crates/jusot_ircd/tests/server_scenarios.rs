use std::sync::Arc;

use tokio::sync::mpsc;

use jusot_ircd::config::Config;
use jusot_ircd::handlers::request::handle_request;
use jusot_ircd::message::Message;
use jusot_ircd::message_models::IrcMessage;
use jusot_ircd::server_state::ServerState;
use jusot_ircd::types::ClientId;
use jusot_ircd::user_state::{UserState, UserStatus, next_client_id};

/// A fake connection: the outbound queue end the writer task would drain.
struct TestClient {
    id: ClientId,
    user_state: UserState,
    rx: mpsc::Receiver<IrcMessage>,
}

impl TestClient {
    fn connect(server: &ServerState) -> Self {
        let (tx, rx) = mpsc::channel(256);
        let id = next_client_id();
        let user_state = UserState::new(id, tx);
        server.add_connecting_user(id, &user_state);
        TestClient { id, user_state, rx }
    }

    async fn send_line(&self, server: &ServerState, line: &str) -> UserStatus {
        handle_request(line, self.id, server, &self.user_state)
            .await
            .expect("outbound queue stays open in tests")
    }

    fn next_line(&mut self) -> String {
        self.rx.try_recv().expect("expected a queued reply").raw_line
    }

    fn next_command(&mut self) -> String {
        Message::parse(&self.next_line()).command
    }

    fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }

    fn assert_silent(&mut self) {
        assert!(self.rx.try_recv().is_err(), "expected no reply");
    }
}

fn test_server() -> ServerState {
    let mut config = Config::default();
    // point the MOTD somewhere that cannot exist so the bundle ends in 422
    config.server.motd = "./no_such_motd_file.txt".to_owned();
    ServerState::new(Arc::new(config))
}

async fn register(server: &ServerState, client: &mut TestClient, nick: &str) {
    client.send_line(server, &format!("NICK {nick}\r\n")).await;
    client
        .send_line(server, &format!("USER {nick} 0 * :{nick} Real\r\n"))
        .await;
    client.drain();
}

// Scenario 1: NICK then USER produces the welcome bundle in order.
#[tokio::test]
async fn registration_sends_the_welcome_bundle() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);

    alice.send_line(&server, "NICK alice\r\n").await;
    alice.assert_silent();
    alice.send_line(&server, "USER alice 0 * :Alice A\r\n").await;

    assert_eq!(
        alice.next_line(),
        ":jusot.com 001 alice :Welcome to the Internet Relay Network alice!alice@.jusot.com\r\n"
    );
    assert_eq!(
        alice.next_line(),
        ":jusot.com 002 alice :Your host is jusot.com, running version 2\r\n"
    );
    let created = alice.next_line();
    assert!(created.starts_with(":jusot.com 003 alice :This server was created "));
    assert_eq!(alice.next_line(), ":jusot.com 004 alice jusot.com 2 ao mtov\r\n");

    for expected in ["251", "252", "253", "254", "255", "422"] {
        assert_eq!(alice.next_command(), expected);
    }
    alice.assert_silent();
}

// USER-first order registers too.
#[tokio::test]
async fn user_first_handshake_also_registers() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);

    alice.send_line(&server, "USER alice 0 * :Alice A\r\n").await;
    alice.assert_silent();
    alice.send_line(&server, "NICK alice\r\n").await;
    assert_eq!(alice.next_command(), "001");
    assert!(alice.user_state.is_registered().await);
    assert_eq!(*server.nick_to_client.get("alice").unwrap(), alice.id);
}

// Scenario 2: the second claimant of a nickname is refused.
#[tokio::test]
async fn nick_collision_draws_433() {
    let server = test_server();
    let mut first = TestClient::connect(&server);
    let mut second = TestClient::connect(&server);

    first.send_line(&server, "NICK bob\r\n").await;
    first.assert_silent();

    second.send_line(&server, "NICK bob\r\n").await;
    assert_eq!(
        second.next_line(),
        ":jusot.com 433 * bob :Nickname is already in use\r\n"
    );
    assert_eq!(*server.nick_to_client.get("bob").unwrap(), first.id);
}

// Scenario 3: channel fan-out reaches everyone but the sender.
#[tokio::test]
async fn channel_privmsg_fans_out_without_echo() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut carol = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut carol, "carol").await;

    alice.send_line(&server, "JOIN #x\r\n").await;
    carol.send_line(&server, "JOIN #x\r\n").await;
    alice.drain();
    carol.drain();

    alice.send_line(&server, "PRIVMSG #x :hi\r\n").await;
    assert_eq!(carol.next_line(), ":alice!alice@jusot.com PRIVMSG #x :hi\r\n");
    carol.assert_silent();
    alice.assert_silent();
}

// Scenario 4: only operators set +m; the flag stays off after a refusal.
#[tokio::test]
async fn non_operator_cannot_set_moderated() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    alice.send_line(&server, "JOIN #x\r\n").await;
    bob.send_line(&server, "JOIN #x\r\n").await;
    alice.drain();
    bob.drain();

    bob.send_line(&server, "MODE #x +m\r\n").await;
    assert_eq!(
        bob.next_line(),
        ":jusot.com 482 bob #x :You're not channel operator\r\n"
    );

    bob.send_line(&server, "MODE #x\r\n").await;
    assert_eq!(bob.next_line(), ":jusot.com 324 bob #x +\r\n");
}

// Scenario 5: PRIVMSG to an away user answers the sender instead.
#[tokio::test]
async fn away_interception_returns_the_stored_message() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    alice.send_line(&server, "AWAY :lunch\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 306 alice :You have been marked as being away\r\n"
    );

    bob.send_line(&server, "PRIVMSG alice :yo\r\n").await;
    assert_eq!(bob.next_line(), ":jusot.com 301 bob alice :lunch\r\n");
    alice.assert_silent();

    // coming back erases the stored message and delivery resumes
    alice.send_line(&server, "AWAY\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 305 alice :You are no longer marked as being away\r\n"
    );
    bob.send_line(&server, "PRIVMSG alice :yo again\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":bob!bob@jusot.com PRIVMSG alice :yo again\r\n"
    );
}

// Scenario 6: the last PART destroys the channel.
#[tokio::test]
async fn parting_the_last_member_destroys_the_channel() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;

    alice.send_line(&server, "JOIN #x\r\n").await;
    alice.drain();

    alice.send_line(&server, "PART #x\r\n").await;
    assert_eq!(alice.next_line(), ":alice!alice@jusot.com PART #x\r\n");
    assert!(server.get_channel("#x").is_none());

    alice.send_line(&server, "LIST\r\n").await;
    assert_eq!(alice.next_line(), ":jusot.com 323 alice :End of LIST\r\n");
    alice.assert_silent();
}

#[tokio::test]
async fn join_bundle_lists_adorned_members() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    alice.send_line(&server, "JOIN #x\r\n").await;
    assert_eq!(alice.next_line(), ":alice!alice@jusot.com JOIN #x\r\n");
    assert_eq!(alice.next_line(), ":jusot.com 353 alice = #x :@alice\r\n");
    assert_eq!(
        alice.next_line(),
        ":jusot.com 366 alice #x :End of NAMES list\r\n"
    );

    alice.send_line(&server, "TOPIC #x :general chatter\r\n").await;
    alice.drain();

    bob.send_line(&server, "JOIN #x\r\n").await;
    // the join relay reaches the sitting member too
    assert_eq!(alice.next_line(), ":bob!bob@jusot.com JOIN #x\r\n");
    assert_eq!(bob.next_line(), ":bob!bob@jusot.com JOIN #x\r\n");
    assert_eq!(
        bob.next_line(),
        ":jusot.com 332 bob #x :general chatter\r\n"
    );
    assert_eq!(bob.next_line(), ":jusot.com 353 bob = #x :@alice bob\r\n");
    assert_eq!(
        bob.next_line(),
        ":jusot.com 366 bob #x :End of NAMES list\r\n"
    );
}

#[tokio::test]
async fn operator_grants_and_privilege_invariants() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    alice.send_line(&server, "JOIN #x\r\n").await;
    bob.send_line(&server, "JOIN #x\r\n").await;
    alice.drain();
    bob.drain();

    alice.send_line(&server, "MODE #x +v bob\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":alice!alice@jusot.com MODE #x +v bob\r\n"
    );
    assert_eq!(bob.next_line(), ":alice!alice@jusot.com MODE #x +v bob\r\n");

    alice.send_line(&server, "MODE #x +o bob\r\n").await;
    alice.drain();
    bob.drain();

    // voicing someone absent is refused
    alice.send_line(&server, "MODE #x +v mallory\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 441 alice mallory #x :They aren't on that channel\r\n"
    );

    let channel = server.get_channel("#x").unwrap();
    let members = channel.member_snapshot().await;
    for operator in channel.operators.iter() {
        assert!(members.contains(&operator));
    }
    for voiced in channel.voiced.iter() {
        assert!(members.contains(&voiced));
    }
    assert!(channel.is_operator("bob"));

    // adornment: operator wins over voiced
    assert_eq!(channel.adorned_names().await, ["@alice", "@bob"]);
}

#[tokio::test]
async fn clearing_a_flag_answers_the_sender_only() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    alice.send_line(&server, "JOIN #x\r\n").await;
    bob.send_line(&server, "JOIN #x\r\n").await;
    alice.drain();
    bob.drain();

    alice.send_line(&server, "MODE #x +t\r\n").await;
    assert_eq!(alice.next_line(), ":alice!alice@jusot.com MODE #x +t\r\n");
    assert_eq!(bob.next_line(), ":alice!alice@jusot.com MODE #x +t\r\n");

    alice.send_line(&server, "MODE #x -t\r\n").await;
    assert_eq!(alice.next_line(), ":alice!alice@jusot.com MODE #x -t\r\n");
    bob.assert_silent();

    alice.send_line(&server, "MODE #x +q\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 472 alice q :is unknown mode char to me\r\n"
    );
}

#[tokio::test]
async fn commands_before_registration_draw_451_or_silence() {
    let server = test_server();
    let mut client = TestClient::connect(&server);

    client.send_line(&server, "JOIN #x\r\n").await;
    assert_eq!(
        client.next_line(),
        ":jusot.com 451 * :You have not registered\r\n"
    );

    // unknown commands are dropped silently before registration
    client.send_line(&server, "BOGUS\r\n").await;
    client.assert_silent();

    // PING is answered even before registration
    client.send_line(&server, "PING jusot.com\r\n").await;
    assert_eq!(client.next_line(), ":jusot.com PONG :jusot.com\r\n");

    register(&server, &mut client, "dave").await;
    client.send_line(&server, "BOGUS\r\n").await;
    assert_eq!(
        client.next_line(),
        ":jusot.com 421 dave BOGUS :Unknown command\r\n"
    );
}

#[tokio::test]
async fn user_command_arity_and_reregistration_errors() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);

    alice.send_line(&server, "NICK alice\r\n").await;
    alice.send_line(&server, "USER alice 0\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 461 alice USER :Not enough parameters\r\n"
    );

    alice.send_line(&server, "USER alice 0 * :Alice A\r\n").await;
    alice.drain();

    alice.send_line(&server, "USER alice 0 * :Alice A\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 462 alice :Unauthorized command (already registered)\r\n"
    );
}

#[tokio::test]
async fn whois_and_oper_paths() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    bob.send_line(&server, "WHOIS alice\r\n").await;
    assert_eq!(
        bob.next_line(),
        ":jusot.com 311 bob alice alice jusot.com * :alice Real\r\n"
    );
    assert_eq!(
        bob.next_line(),
        ":jusot.com 312 bob alice jusot.com :jusot.com\r\n"
    );
    assert_eq!(bob.next_line(), ":jusot.com 318 bob alice :End of WHOIS list\r\n");

    bob.send_line(&server, "WHOIS mallory\r\n").await;
    assert_eq!(
        bob.next_line(),
        ":jusot.com 401 bob mallory :No such nick/channel\r\n"
    );

    // two-argument WHOIS is ignored
    bob.send_line(&server, "WHOIS alice alice\r\n").await;
    bob.assert_silent();

    bob.send_line(&server, "OPER bob wrong\r\n").await;
    assert_eq!(bob.next_line(), ":jusot.com 464 bob :Password incorrect\r\n");
    bob.send_line(&server, "OPER bob foobar\r\n").await;
    assert_eq!(
        bob.next_line(),
        ":jusot.com 381 bob :You are now an IRC operator\r\n"
    );
}

#[tokio::test]
async fn notice_routing_stays_silent_on_failure() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    alice.send_line(&server, "NOTICE mallory :hello\r\n").await;
    alice.assert_silent();
    alice.send_line(&server, "NOTICE\r\n").await;
    alice.assert_silent();

    alice.send_line(&server, "NOTICE bob :hello\r\n").await;
    assert_eq!(bob.next_line(), ":alice!alice@jusot.com NOTICE bob :hello\r\n");
}

#[tokio::test]
async fn quit_emits_error_line_and_cleanup_broadcasts() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    alice.send_line(&server, "JOIN #x\r\n").await;
    bob.send_line(&server, "JOIN #x\r\n").await;
    alice.drain();
    bob.drain();

    let status = alice.send_line(&server, "QUIT :gone fishing\r\n").await;
    assert_eq!(status, UserStatus::Leaving(Some("gone fishing".to_owned())));
    assert_eq!(
        alice.next_line(),
        ":jusot.com ERROR :Closing Link: jusot.com (gone fishing)\r\n"
    );

    // what the reader task runs after Leaving
    server.disconnect_cleanup(alice.id, "gone fishing").await;

    assert_eq!(
        bob.next_line(),
        ":alice!alice@jusot.com QUIT :gone fishing\r\n"
    );
    assert!(!server.nick_exists("alice"));
    assert!(server.user_state_of(alice.id).is_none());
    assert!(!server.get_channel("#x").unwrap().is_member("alice").await);

    // the vacated nickname is claimable again
    let mut eve = TestClient::connect(&server);
    eve.send_line(&server, "NICK alice\r\n").await;
    eve.assert_silent();
}

#[tokio::test]
async fn registered_rename_rebinds_and_notifies() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    alice.send_line(&server, "JOIN #x\r\n").await;
    bob.send_line(&server, "JOIN #x\r\n").await;
    alice.drain();
    bob.drain();

    alice.send_line(&server, "NICK alicia\r\n").await;
    assert_eq!(alice.next_line(), ":alice!alice@jusot.com NICK alicia\r\n");
    assert_eq!(bob.next_line(), ":alice!alice@jusot.com NICK alicia\r\n");

    assert!(!server.nick_exists("alice"));
    assert_eq!(*server.nick_to_client.get("alicia").unwrap(), alice.id);
    let channel = server.get_channel("#x").unwrap();
    assert!(channel.is_member("alicia").await);
    assert!(channel.is_operator("alicia"));

    // fan-out still reaches the renamed member
    bob.send_line(&server, "PRIVMSG #x :hi\r\n").await;
    assert_eq!(alice.next_line(), ":bob!bob@jusot.com PRIVMSG #x :hi\r\n");
}

#[tokio::test]
async fn names_lists_channels_and_strays() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    let mut bob = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;
    register(&server, &mut bob, "bob").await;

    alice.send_line(&server, "JOIN #x\r\n").await;
    alice.drain();

    alice.send_line(&server, "NAMES\r\n").await;
    assert_eq!(alice.next_line(), ":jusot.com 353 alice = #x :@alice\r\n");
    assert_eq!(alice.next_line(), ":jusot.com 353 alice = * :bob\r\n");
    assert_eq!(
        alice.next_line(),
        ":jusot.com 366 alice * :End of NAMES list\r\n"
    );

    alice.send_line(&server, "NAMES #x\r\n").await;
    assert_eq!(alice.next_line(), ":jusot.com 353 alice = #x :@alice\r\n");
    assert_eq!(
        alice.next_line(),
        ":jusot.com 366 alice #x :End of NAMES list\r\n"
    );

    bob.send_line(&server, "LIST\r\n").await;
    assert_eq!(bob.next_line(), ":jusot.com 322 bob #x 1 :\r\n");
    assert_eq!(bob.next_line(), ":jusot.com 323 bob :End of LIST\r\n");
}

#[tokio::test]
async fn privmsg_error_ladder() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;

    alice.send_line(&server, "PRIVMSG\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 411 alice :No recipient given (PRIVMSG)\r\n"
    );

    alice.send_line(&server, "PRIVMSG bob\r\n").await;
    assert_eq!(alice.next_line(), ":jusot.com 412 alice :No text to send\r\n");

    alice.send_line(&server, "PRIVMSG mallory :hi\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 401 alice mallory :No such nick/channel\r\n"
    );

    // messaging a channel from outside is refused
    let mut bob = TestClient::connect(&server);
    register(&server, &mut bob, "bob").await;
    bob.send_line(&server, "JOIN #x\r\n").await;
    bob.drain();
    alice.send_line(&server, "PRIVMSG #x :knock knock\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 404 alice #x :Cannot send to channel\r\n"
    );
    bob.assert_silent();
}

#[tokio::test]
async fn user_mode_quirks() {
    let server = test_server();
    let mut alice = TestClient::connect(&server);
    register(&server, &mut alice, "alice").await;

    alice.send_line(&server, "MODE bob +i\r\n").await;
    assert_eq!(
        alice.next_line(),
        ":jusot.com 502 alice :Cannot change mode for other users\r\n"
    );

    // deopping yourself is always granted and echoed
    alice.send_line(&server, "MODE alice -o\r\n").await;
    assert_eq!(alice.next_line(), ":alice MODE alice :-o\r\n");

    // gaining +o this way is ignored
    alice.send_line(&server, "MODE alice +o\r\n").await;
    alice.assert_silent();

    alice.send_line(&server, "MODE alice +z\r\n").await;
    assert_eq!(alice.next_line(), ":jusot.com 501 alice :Unknown MODE flag\r\n");
}
