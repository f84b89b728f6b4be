//! Test utilities: a minimal in-process Riemann server.

#![allow(dead_code)]

use prost::Message;
use sandesh::proto::{self, Msg};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// Read one length-prefixed frame
pub fn read_frame(stream: &mut TcpStream) -> io::Result<Msg> {
    let mut len_buf = [0u8; 4];
    stream.read_exact(&mut len_buf)?;
    let mut payload = vec![0u8; u32::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut payload)?;
    Msg::decode(payload.as_slice()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write one length-prefixed frame
pub fn write_frame(stream: &mut TcpStream, msg: &Msg) -> io::Result<()> {
    let payload = msg.encode_to_vec();
    stream.write_all(&(payload.len() as u32).to_be_bytes())?;
    stream.write_all(&payload)?;
    stream.flush()
}

/// Successful reply carrying `events`
pub fn ok(events: Vec<proto::Event>) -> Msg {
    Msg {
        ok: Some(true),
        events,
        ..Default::default()
    }
}

/// Failed reply
pub fn failure(error: &str) -> Msg {
    Msg {
        ok: Some(false),
        error: Some(error.to_string()),
        ..Default::default()
    }
}

/// Accept one connection and answer every frame with `handler`.
///
/// The join handle yields every request received, in order, once the
/// client disconnects. A frame that fails to decode panics the server
/// thread, which surfaces as a join error.
pub fn spawn_server<F>(handler: F) -> (SocketAddr, JoinHandle<Vec<Msg>>)
where
    F: Fn(&Msg) -> Msg + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        loop {
            match read_frame(&mut stream) {
                Ok(request) => {
                    let reply = handler(&request);
                    received.push(request);
                    if write_frame(&mut stream, &reply).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) if e.kind() == io::ErrorKind::ConnectionReset => break,
                Err(e) => panic!("server failed to read frame: {}", e),
            }
        }
        received
    });

    (addr, handle)
}

/// Wire event with just a service name
pub fn service_event(service: &str) -> proto::Event {
    proto::Event {
        service: Some(service.to_string()),
        ..Default::default()
    }
}
