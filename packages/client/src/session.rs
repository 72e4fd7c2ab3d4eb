//! WebSocket client session management.

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use hiroba_server::domain::{DisplayName, MessageText};
use hiroba_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{
    error::ClientError,
    formatter::MessageFormatter,
    typing::TypingDebouncer,
    ui::{InputChannels, redisplay_prompt},
    view::ChatView,
};

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

async fn send(write: &mut WsWriter, message: &ClientMessage) -> Result<(), ClientError> {
    let json = serde_json::to_string(message)
        .map_err(|e| ClientError::ConnectionLost(format!("failed to encode event: {}", e)))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionLost(e.to_string()))
}

fn print_and_prompt(text: &str, name: &DisplayName) {
    if !text.is_empty() {
        print!("{}", text);
    }
    redisplay_prompt(name.as_str());
}

/// Run one connection: join, then relay input and render events until the
/// connection drops (`Err`) or the user quits (`Ok`).
pub async fn run_client_session(
    url: &str,
    name: &DisplayName,
    input: &mut InputChannels,
    view: &mut ChatView,
    reconnecting: bool,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectFailed(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    if reconnecting {
        print_and_prompt(
            &MessageFormatter::format_local_notice("Reconnected to server!"),
            name,
        );
    } else {
        println!(
            "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
            name
        );
    }

    let (mut write, mut read) = ws_stream.split();

    send(
        &mut write,
        &ClientMessage::Join {
            username: name.as_str().to_string(),
        },
    )
    .await?;

    // Edits made while disconnected must not start a typing signal
    while input.keystrokes.try_recv().is_ok() {}
    let mut debouncer = TypingDebouncer::default();

    loop {
        tokio::select! {
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let rendered = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(message) => view.render(message),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print_and_prompt(&rendered, name);
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionLost("server closed the connection".to_string()));
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost(e.to_string()));
                }
                Some(Ok(_)) => {}
            },
            line = input.lines.recv() => {
                let Some(line) = line else {
                    tracing::info!("Input closed, leaving the chat");
                    write.close().await.ok();
                    return Ok(());
                };
                match MessageText::new(line) {
                    Ok(text) => {
                        send(&mut write, &ClientMessage::ChatMessage { message: text.into_string() }).await?;
                        if let Some(is_typing) = debouncer.submitted() {
                            send(&mut write, &ClientMessage::Typing { is_typing }).await?;
                        }
                    }
                    Err(e) => {
                        print_and_prompt(&MessageFormatter::format_local_notice(&e.to_string()), name);
                    }
                }
            },
            Some(()) = input.keystrokes.recv() => {
                if let Some(is_typing) = debouncer.keystroke() {
                    send(&mut write, &ClientMessage::Typing { is_typing }).await?;
                }
            },
            _ = debouncer.expired() => {
                if let Some(is_typing) = debouncer.stop() {
                    send(&mut write, &ClientMessage::Typing { is_typing }).await?;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;
    use tokio_tungstenite::accept_async;

    use super::*;

    type StubSocket = WebSocketStream<TcpStream>;

    /// Client session wired to a stub server, with hand-fed input channels
    struct Fixture {
        server: StubSocket,
        lines: mpsc::UnboundedSender<String>,
        keystrokes: mpsc::UnboundedSender<()>,
        session: JoinHandle<Result<(), ClientError>>,
    }

    /// Start a session; `before_connect` keystrokes are queued before it dials.
    async fn start_session(before_connect: usize) -> Fixture {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}/ws", listener.local_addr().unwrap());
        let (line_tx, lines) = mpsc::unbounded_channel();
        let (keystroke_tx, keystrokes) = mpsc::unbounded_channel();
        for _ in 0..before_connect {
            keystroke_tx.send(()).unwrap();
        }

        let session = tokio::spawn(async move {
            let name = DisplayName::new("Alice".to_string()).unwrap();
            let mut input = InputChannels { lines, keystrokes };
            let mut view = ChatView::new("Alice");
            run_client_session(&url, &name, &mut input, &mut view, false).await
        });

        let (stream, _) = listener.accept().await.unwrap();
        let server = accept_async(stream).await.unwrap();

        Fixture {
            server,
            lines: line_tx,
            keystrokes: keystroke_tx,
            session,
        }
    }

    async fn next_frame(ws: &mut StubSocket) -> Value {
        loop {
            let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
                .await
                .expect("timed out waiting for a frame")
                .expect("stream ended")
                .unwrap();
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).unwrap();
            }
        }
    }

    /// Assert that no text frame arrives for a short while
    async fn assert_no_frame(ws: &mut StubSocket) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(Duration::from_millis(200), ws.next()).await
        {
            panic!("unexpected frame: {}", text.as_str());
        }
    }

    #[tokio::test]
    async fn test_join_then_message_then_typing_stop() {
        // テスト項目: join 後、入力開始で typing(true)、送信で chat-message と typing(false) が順に届く
        // given (前提条件):
        let mut fixture = start_session(0).await;
        let join = next_frame(&mut fixture.server).await;

        // when (操作):
        fixture.keystrokes.send(()).unwrap();
        let typing_started = next_frame(&mut fixture.server).await;
        fixture.lines.send("hello".to_string()).unwrap();
        let chat = next_frame(&mut fixture.server).await;
        let typing_stopped = next_frame(&mut fixture.server).await;

        // then (期待する結果):
        assert_eq!(join, json!({"type": "join", "username": "Alice"}));
        assert_eq!(typing_started, json!({"type": "typing", "isTyping": true}));
        assert_eq!(chat, json!({"type": "chat-message", "message": "hello"}));
        assert_eq!(typing_stopped, json!({"type": "typing", "isTyping": false}));
    }

    #[tokio::test]
    async fn test_too_long_message_is_not_sent() {
        // テスト項目: 501 文字のメッセージは送信されず、次の有効なメッセージだけが届く
        // given (前提条件):
        let mut fixture = start_session(0).await;
        next_frame(&mut fixture.server).await;

        // when (操作):
        fixture.lines.send("a".repeat(501)).unwrap();
        fixture.lines.send("short".to_string()).unwrap();
        let frame = next_frame(&mut fixture.server).await;

        // then (期待する結果):
        assert_eq!(frame, json!({"type": "chat-message", "message": "short"}));
        assert_no_frame(&mut fixture.server).await;
    }

    #[tokio::test]
    async fn test_keystrokes_before_connect_are_discarded() {
        // テスト項目: 接続前に溜まったキー入力では typing が送られない
        // given (前提条件):
        let mut fixture = start_session(3).await;
        next_frame(&mut fixture.server).await;

        // when (操作):
        fixture.lines.send("hi".to_string()).unwrap();
        let frame = next_frame(&mut fixture.server).await;

        // then (期待する結果): typing(true) も typing(false) も届かない
        assert_eq!(frame, json!({"type": "chat-message", "message": "hi"}));
        assert_no_frame(&mut fixture.server).await;
    }

    #[tokio::test]
    async fn test_server_close_reports_connection_lost() {
        // テスト項目: サーバーが接続を閉じると ConnectionLost で終了する
        // given (前提条件):
        let mut fixture = start_session(0).await;
        next_frame(&mut fixture.server).await;

        // when (操作):
        fixture.server.close(None).await.unwrap();
        let result = tokio::time::timeout(Duration::from_secs(2), fixture.session)
            .await
            .unwrap()
            .unwrap();

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::ConnectionLost(_))));
    }

    #[tokio::test]
    async fn test_input_closed_ends_session_normally() {
        // テスト項目: 入力が閉じられるとセッションは正常終了する
        // given (前提条件):
        let mut fixture = start_session(0).await;
        next_frame(&mut fixture.server).await;

        // when (操作):
        drop(fixture.lines);
        let result = tokio::time::timeout(Duration::from_secs(2), fixture.session)
            .await
            .unwrap()
            .unwrap();

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
