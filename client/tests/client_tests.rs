//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Client tests against a running dispatcher

use lineecho_client::{ClientConfig, ClientError, EchoClient, PROMPT};
use lineecho_service::{ConnectionDispatcher, ServerConfig, Terminator};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

async fn start_server(config: ServerConfig) -> SocketAddr {
    let dispatcher = ConnectionDispatcher::bind(config).await.unwrap();
    let addr = dispatcher.local_addr();
    tokio::spawn(dispatcher.serve());
    addr
}

fn server_config() -> ServerConfig {
    ServerConfig::new("127.0.0.1:0".parse().unwrap()).with_idle_timeout(Duration::from_secs(30))
}

fn client_config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(addr.ip().to_string(), addr.port())
}

#[tokio::test]
async fn test_echo() {
    let addr = start_server(server_config()).await;
    let mut client = EchoClient::connect(client_config(addr)).await.unwrap();
    assert_eq!(client.peer_addr().unwrap(), addr);

    assert_eq!(client.echo("hello").await.unwrap(), "hello");
    assert_eq!(client.echo("").await.unwrap(), "");
    assert_eq!(client.echo(String::from("again")).await.unwrap(), "again");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_crlf_echo() {
    let addr = start_server(server_config().with_terminator(Terminator::CrLf)).await;
    let config = client_config(addr).with_terminator(Terminator::CrLf);
    let mut client = EchoClient::connect(config).await.unwrap();

    assert_eq!(client.echo("over crlf").await.unwrap(), "over crlf");
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_interactive_session_until_quit() {
    let addr = start_server(server_config()).await;
    let mut client = EchoClient::connect(client_config(addr)).await.unwrap();

    let input: &[u8] = b"one\ntwo words\nq\nnever sent\n";
    let mut output = Vec::new();
    client.run_interactive(input, &mut output).await.unwrap();

    let expected = format!(
        "{p}Echo response: one\n{p}Echo response: two words\n{p}",
        p = PROMPT
    );
    assert_eq!(String::from_utf8(output).unwrap(), expected);
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_interactive_session_until_end_of_input() {
    let addr = start_server(server_config()).await;
    let mut client = EchoClient::connect(client_config(addr)).await.unwrap();

    let input: &[u8] = b"only line\r\n";
    let mut output = Vec::new();
    client.run_interactive(input, &mut output).await.unwrap();

    let expected = format!("{p}Echo response: only line\n{p}", p = PROMPT);
    assert_eq!(String::from_utf8(output).unwrap(), expected);
}

#[tokio::test]
async fn test_idle_server_notice_reaches_client() {
    let addr = start_server(server_config().with_idle_timeout(Duration::from_millis(100))).await;
    let mut client = EchoClient::connect(client_config(addr)).await.unwrap();

    let notice = tokio::time::timeout(Duration::from_secs(5), client.receive_line())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(notice, "Timeout - closing connection.");

    let err = client.receive_line().await.unwrap_err();
    assert!(err.is_closed());
}

#[tokio::test]
async fn test_connect_refused() {
    // Reserve a port, then free it so nothing listens there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = EchoClient::connect(client_config(addr)).await;
    assert!(matches!(result, Err(ClientError::Connect { .. })));
}

#[tokio::test]
async fn test_connect_rejects_invalid_config() {
    let result = EchoClient::connect(ClientConfig::new("", 7)).await;
    assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
}
