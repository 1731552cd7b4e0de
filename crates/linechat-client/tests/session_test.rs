//! Session behavior over in-memory streams.
//!
//! Each test plays the server on the far end of a [`tokio::io::duplex`] pipe.

use std::time::Duration;

use linechat_client::{
    CancellationToken, ConnectionSession, Inbound, SessionConfig, SessionError, UserProfile,
};
use linechat_proto::ClientCommand;
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, DuplexStream},
    time::Instant,
};

fn session() -> (ConnectionSession, DuplexStream) {
    let (client, server) = tokio::io::duplex(4096);
    (ConnectionSession::new(client, SessionConfig::default()), server)
}

async fn read_lines(server: &mut BufReader<DuplexStream>, count: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(count);
    for _ in 0..count {
        let mut line = String::new();
        server.read_line(&mut line).await.unwrap();
        lines.push(line);
    }
    lines
}

#[tokio::test]
async fn stream_closure_yields_exactly_one_closed() {
    let (mut session, server) = session();
    let mut inbound = session.receive(CancellationToken::new()).unwrap();

    drop(server);

    assert_eq!(inbound.recv().await, Some(Inbound::Closed));
    assert_eq!(inbound.recv().await, None);
}

#[tokio::test]
async fn one_read_with_several_messages_yields_each_line() {
    let (mut session, mut server) = session();
    let mut inbound = session.receive(CancellationToken::new()).unwrap();

    server.write_all(b"SVR_PING\r\nMESSAGE 1 hi there\r\nOK PI").await.unwrap();
    assert_eq!(inbound.recv().await, Some(Inbound::Line("SVR_PING".into())));
    assert_eq!(inbound.recv().await, Some(Inbound::Line("MESSAGE 1 hi there".into())));

    server.write_all(b"NG\r\n").await.unwrap();
    assert_eq!(inbound.recv().await, Some(Inbound::Line("OK PING".into())));
}

#[tokio::test]
async fn pending_partial_line_is_flushed_before_closed() {
    let (mut session, mut server) = session();
    let mut inbound = session.receive(CancellationToken::new()).unwrap();

    server.write_all(b"quit").await.unwrap();
    drop(server);

    assert_eq!(inbound.recv().await, Some(Inbound::Line("quit".into())));
    assert_eq!(inbound.recv().await, Some(Inbound::Closed));
    assert_eq!(inbound.recv().await, None);
}

#[tokio::test]
async fn receive_cannot_be_started_twice() {
    let (mut session, _server) = session();
    let cancel = CancellationToken::new();

    assert!(session.receive(cancel.clone()).is_ok());
    assert!(matches!(session.receive(cancel), Err(SessionError::AlreadyReceiving)));
}

#[tokio::test]
async fn cancellation_stops_receive() {
    let (mut session, _server) = session();
    let cancel = CancellationToken::new();
    let mut inbound = session.receive(cancel.clone()).unwrap();

    cancel.cancel();

    assert_eq!(inbound.recv().await, None);
}

#[tokio::test]
async fn send_appends_line_terminator() {
    let (session, server) = session();
    let mut server = BufReader::new(server);

    session.send(&ClientCommand::Shout { room_id: 2, text: "hi".into() }).await.unwrap();

    assert_eq!(read_lines(&mut server, 1).await, ["SHOUT 2 hi\r\n"]);
}

#[tokio::test]
async fn send_to_closed_stream_returns_error() {
    let (session, server) = session();
    drop(server);

    let result = session.send(&ClientCommand::Logout).await;

    assert!(matches!(result, Err(SessionError::Io(_))));
}

#[tokio::test]
async fn login_sends_conversation_in_order() {
    let (session, server) = session();
    let mut server = BufReader::new(server);
    let profile = UserProfile {
        user: "alice".into(),
        id: 7,
        introduction: "hello".into(),
        level: "2".into(),
        client_info: "linechat".into(),
    };

    session.login(&profile).await.unwrap();

    assert_eq!(read_lines(&mut server, 5).await, [
        "LOGIN alice\r\n",
        "SET_INTRO hello\r\n",
        "SET_LEVEL 2\r\n",
        "CLIENT_INFO linechat\r\n",
        "SET_ID 7\r\n",
    ]);
}

#[tokio::test]
async fn concurrent_senders_never_interleave() {
    let (session, server) = session();
    let mut server = BufReader::new(server);
    let mut tasks = Vec::new();

    for room_id in 0..4u64 {
        let sink = session.sink();
        tasks.push(tokio::spawn(async move {
            for n in 0..25 {
                let text = format!("message number {n} from writer {room_id}");
                sink.send(&ClientCommand::Shout { room_id, text }).await.unwrap();
            }
        }));
    }

    let lines = read_lines(&mut server, 100).await;
    for task in tasks {
        task.await.unwrap();
    }

    for line in lines {
        let body = line.strip_suffix("\r\n").unwrap();
        let mut tokens = body.splitn(3, ' ');
        assert_eq!(tokens.next(), Some("SHOUT"));
        let room_id = tokens.next().unwrap();
        let text = tokens.next().unwrap();
        assert!(text.starts_with("message number "));
        assert!(text.ends_with(&format!("from writer {room_id}")));
    }
}

#[tokio::test(start_paused = true)]
async fn heartbeat_pings_and_extends_deadlines() {
    let (session, mut server) = session();
    let start = Instant::now();
    let config = SessionConfig::default();
    let cancel = CancellationToken::new();
    let heartbeat = session.ping(cancel.clone());

    let mut buf = [0u8; 9];
    server.read_exact(&mut buf).await.unwrap();

    assert_eq!(&buf, b"PING -1\r\n");
    assert!(Instant::now() >= start + config.heartbeat_interval);
    tokio::task::yield_now().await;
    assert!(
        session.deadlines().read_deadline()
            >= start + config.heartbeat_interval + config.deadline_extension
    );

    cancel.cancel();
    heartbeat.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn expired_read_deadline_ends_receive_silently() {
    let (mut session, _server) = session();
    let start = Instant::now();
    let mut inbound = session.receive(CancellationToken::new()).unwrap();

    assert_eq!(inbound.recv().await, None);
    assert!(Instant::now() >= start + Duration::from_secs(400));
}

#[tokio::test(start_paused = true)]
async fn extending_deadlines_keeps_receive_alive() {
    let (mut session, mut server) = session();
    let mut inbound = session.receive(CancellationToken::new()).unwrap();

    tokio::time::sleep(Duration::from_secs(300)).await;
    session.extend_deadlines();
    tokio::time::sleep(Duration::from_secs(300)).await;

    server.write_all(b"OK PING\r\n").await.unwrap();
    assert_eq!(inbound.recv().await, Some(Inbound::Line("OK PING".into())));
}

#[tokio::test]
async fn overlong_line_ends_receive() {
    let config = SessionConfig { max_line: 16, read_chunk: 8, ..SessionConfig::default() };
    let (client, mut server) = tokio::io::duplex(4096);
    let mut session = ConnectionSession::new(client, config);
    let mut inbound = session.receive(CancellationToken::new()).unwrap();

    server.write_all(b"OK PING\r\n").await.unwrap();
    server.write_all(&[b'x'; 32]).await.unwrap();

    assert_eq!(inbound.recv().await, Some(Inbound::Line("OK PING".into())));
    assert_eq!(inbound.recv().await, None);
}

#[test]
fn session_can_be_shared_across_tasks() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConnectionSession>();
}
