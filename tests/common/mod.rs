#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use portview::api::PortfolioSource;
use portview::app::App;
use portview::config::Config;
use portview::event::AppEvent;
use portview::ui::theme::Theme;

/// Serves exactly one canned HTTP response on an ephemeral port and returns
/// the base URL to point the client at.
pub fn serve_once(status: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}/api")
}

/// A base URL nothing is listening on.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn mounted_app(source: Arc<dyn PortfolioSource>) -> (App, mpsc::Receiver<AppEvent>) {
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(Config::default(), Theme::default(), source, tx);
    app.mount();
    (app, rx)
}

pub fn type_str(app: &mut App, text: &str, now: Instant) {
    for ch in text.chars() {
        app.handle_key(key(KeyCode::Char(ch)), now);
    }
}

/// Waits for the worker's reply and feeds it back through the app.
pub fn pump_response(app: &mut App, rx: &mpsc::Receiver<AppEvent>) {
    let event = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("no response from worker");
    app.handle_event(event, Instant::now());
}
