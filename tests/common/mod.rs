//! Shared utilities for integration testing.

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use stx_faucet::chain::ClarityValue;
use stx_faucet::config::FaucetConfig;
use stx_faucet::faucet::{FaucetContext, FaucetViewModel};
use stx_faucet::wallet::{ContractCall, TxId, WalletAddress, WalletAdapter, WalletError};

pub const ADDR_A: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";
pub const ADDR_B: &str = "SP3FBR2AGK5H9QBDH3EEN6DF8EK8JY7RX8QJ5SVTE";

/// Start a programmable mock of the Stacks API on an ephemeral port.
///
/// The handler receives the request method and path and returns a status
/// and JSON body. The request body is consumed before responding so the
/// client never sees a reset mid-write.
#[allow(dead_code)]
pub async fn start_mock_chain_api<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 16384];
                        let mut total = 0;
                        let mut expected = usize::MAX;
                        while total < expected {
                            match socket.read(&mut buf[total..]).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => {
                                    total += n;
                                    if expected == usize::MAX {
                                        if let Some(end) = find_header_end(&buf[..total]) {
                                            let head = String::from_utf8_lossy(&buf[..end]);
                                            expected = end + 4 + content_length(&head);
                                        }
                                    }
                                    if total == buf.len() {
                                        break;
                                    }
                                }
                            }
                        }

                        let head = String::from_utf8_lossy(&buf[..total]);
                        let mut parts = head.split_whitespace();
                        let method = parts.next().unwrap_or("").to_string();
                        let path = parts.next().unwrap_or("").to_string();

                        let (status, body) = f(method, path).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

/// Balances response body for the given micro-STX amount.
#[allow(dead_code)]
pub fn balances_body(micro_stx: u64) -> String {
    format!(
        r#"{{"stx":{{"balance":"{}","total_sent":"0","total_received":"0"}},"fungible_tokens":{{}},"non_fungible_tokens":{{}}}}"#,
        micro_stx
    )
}

/// Successful call-read body whose result is `(ok u<blocks>)`.
#[allow(dead_code)]
pub fn cooldown_body(blocks: u64) -> String {
    let hex = ClarityValue::ResponseOk(Box::new(ClarityValue::UInt(blocks as u128))).to_hex();
    format!(r#"{{"okay":true,"result":"{}"}}"#, hex)
}

/// Wallet whose connect address and submit results are scripted.
#[allow(dead_code)]
pub struct ScriptedWallet {
    address: Mutex<String>,
    submits: Mutex<VecDeque<Result<TxId, WalletError>>>,
    submit_delay: Mutex<Duration>,
}

#[allow(dead_code)]
impl ScriptedWallet {
    pub fn new(address: &str) -> Self {
        Self {
            address: Mutex::new(address.to_string()),
            submits: Mutex::new(VecDeque::new()),
            submit_delay: Mutex::new(Duration::ZERO),
        }
    }

    /// Change the address the next connect reports.
    pub fn set_address(&self, address: &str) {
        *self.address.lock().unwrap() = address.to_string();
    }

    /// Queue the result of the next submit call.
    pub fn queue_submit(&self, result: Result<TxId, WalletError>) {
        self.submits.lock().unwrap().push_back(result);
    }

    /// Delay every submit resolution, to hold the Submitting state open.
    pub fn set_submit_delay(&self, delay: Duration) {
        *self.submit_delay.lock().unwrap() = delay;
    }
}

impl WalletAdapter for ScriptedWallet {
    fn connect(&self) -> BoxFuture<'_, Result<Vec<WalletAddress>, WalletError>> {
        Box::pin(async move {
            Ok(vec![WalletAddress {
                symbol: "STX".to_string(),
                address: self.address.lock().unwrap().clone(),
            }])
        })
    }

    fn disconnect(&self) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }

    fn submit(&self, _call: ContractCall) -> BoxFuture<'_, Result<TxId, WalletError>> {
        Box::pin(async move {
            let delay = *self.submit_delay.lock().unwrap();
            if delay > Duration::ZERO {
                tokio::time::sleep(delay).await;
            }
            self.submits
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(WalletError::Submission("script exhausted".into())))
        })
    }
}

/// Build a view-model wired to a mock API address and a scripted wallet.
#[allow(dead_code)]
pub fn test_vm(api: SocketAddr, wallet: Arc<ScriptedWallet>) -> Arc<FaucetViewModel> {
    let mut config = FaucetConfig::default();
    config.network.api_url = format!("http://{}", api);
    config.network.request_timeout_secs = 2;
    config.polling.settle_delay_secs = 1;
    let ctx = FaucetContext::new(config, wallet).unwrap();
    Arc::new(FaucetViewModel::new(ctx))
}
