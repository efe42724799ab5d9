//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port, then drives
//! `UserClient<UreqTransport>` over real HTTP. Servers do not share state, so
//! tests stay independent when run in parallel.

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;

use user_core::{ApiError, ClientConfig, CommentsExport, NewUser, User, UserClient};

/// Start a seeded mock server on a random port and return its root URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Answer every request with `200` and the given raw bytes as the body.
fn spawn_raw_responder(body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let mut stream = stream.unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let head = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();
        }
    });

    format!("http://{addr}")
}

fn client() -> UserClient<user_core::UreqTransport> {
    UserClient::from_config(&ClientConfig::new(&spawn_server()))
}

#[test]
fn crud_lifecycle() {
    let client = client();

    // Step 1: list the seeded users.
    let users = client.list_all().unwrap();
    assert_eq!(users.len(), 3);

    // Step 2: create a user; the server assigns the next id.
    let input = NewUser::new("Alex", "alex123", "alex@example.com");
    let created = client.create(&input).unwrap();
    assert_eq!(created.id, 4);
    assert_eq!(created.name, input.name);
    assert_eq!(created.username, input.username);
    assert_eq!(created.email, input.email);

    // Step 3: fetch it back.
    let fetched = client.get_by_id(created.id).unwrap();
    assert_eq!(fetched, created);

    // Step 4: update the email; the server echoes the stored record.
    let changed = User {
        email: "new@example.com".to_string(),
        ..created.clone()
    };
    let updated = client.update(&changed).unwrap();
    assert_eq!(updated, changed);

    // Step 5: delete, then delete again.
    assert!(client.delete(created.id).unwrap());
    assert!(!client.delete(created.id).unwrap());

    // Step 6: get after delete is a decode failure, not a special kind.
    let err = client.get_by_id(created.id).unwrap_err();
    assert!(matches!(err, ApiError::DeserializationError(_)));

    // Step 7: list is back to the seed.
    assert_eq!(client.list_all().unwrap().len(), 3);
}

#[test]
fn update_of_unknown_user_returns_input() {
    let client = client();
    let ghost = User {
        id: 42,
        name: "Ghost".to_string(),
        username: "ghost".to_string(),
        email: "ghost@example.com".to_string(),
    };
    assert_eq!(client.update(&ghost).unwrap(), ghost);
}

#[test]
fn find_by_username() {
    let client = client();
    let users = client.find_by_username("Bret").unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "Bret");

    assert!(client.find_by_username("nobody").unwrap().is_empty());
}

#[test]
fn find_by_username_with_special_characters() {
    let client = client();
    let odd = "o'brien & co?";
    let created = client.create(&NewUser::new("Odd", odd, "odd@example.com")).unwrap();

    let users = client.find_by_username(odd).unwrap();
    assert_eq!(users, vec![created]);
    assert!(users.iter().all(|u| u.username == odd));
}

#[test]
fn save_comments_of_latest_post() {
    let client = client();
    let dir = tempfile::tempdir().unwrap();

    let outcome = client.save_last_post_comments_in(1, dir.path()).unwrap();
    let CommentsExport::Saved { post_id, path, comments } = outcome else {
        panic!("user 1 has posts");
    };
    assert_eq!(post_id, 3);
    assert_eq!(path.file_name().unwrap(), "user-1-post-3-comments.json");
    assert_eq!(comments.len(), 2);

    let written: Vec<user_core::Comment> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, comments);
}

#[test]
fn save_comments_for_user_without_posts() {
    let client = client();
    let dir = tempfile::tempdir().unwrap();

    let outcome = client.save_last_post_comments_in(3, dir.path()).unwrap();
    assert_eq!(outcome, CommentsExport::NoPosts);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn print_open_todos() {
    let client = client();
    let mut out = Vec::new();
    client.print_open_todos(1, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec!["ID: 2 | quis ut nam facilis", "ID: 3 | fugiat veniam minus"]
    );
}

#[test]
fn invalid_utf8_body_is_judged_by_the_parser() {
    let client = UserClient::from_config(&ClientConfig::new(&spawn_raw_responder(b"\xff\xfe oops")));
    let user = User {
        id: 1,
        name: "Leanne Graham".to_string(),
        username: "Bret".to_string(),
        email: "new@example.com".to_string(),
    };

    assert_eq!(client.update(&user).unwrap(), user);
    assert!(matches!(
        client.get_by_id(1).unwrap_err(),
        ApiError::DeserializationError(_)
    ));
    assert!(matches!(
        client.find_by_username("Bret").unwrap_err(),
        ApiError::DeserializationError(_)
    ));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let config = ClientConfig {
        api_root: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
    };
    let client = UserClient::from_config(&config);
    assert!(matches!(client.list_all().unwrap_err(), ApiError::TransportError(_)));
    assert!(matches!(client.delete(1).unwrap_err(), ApiError::TransportError(_)));
}
