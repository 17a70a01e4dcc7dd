// SPDX-License-Identifier: Apache-2.0

//! TCP transport for a shared command-history device. Clients write
//! newline-terminated commands; after every chunk that completes at least
//! one command, the full accumulated history is streamed back, oldest
//! first. All connections feed one device behind one lock.

use std::io::{self, Read, Seek, Write};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::process::ExitCode;
use std::thread;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use cmdring::{CommandDevice, DeviceSession, SharedDevice, DEFAULT_CAPACITY};

/// Socket read chunk size. Also bounds how much an unterminated command can
/// grow per read, which is the transport's input-size policy for the
/// otherwise unbounded pending buffer.
const READ_CHUNK: usize = 1024;

#[derive(Parser)]
#[command(name = "cmdringd", about = "Newline-delimited command history over TCP")]
struct Args {
	/// Address to bind.
	#[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
	bind: IpAddr,
	/// Port to listen on.
	#[arg(short, long, default_value_t = 9000)]
	port: u16,
	/// Number of commands retained before the oldest is evicted.
	#[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
	capacity: usize,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
		)
		.init();

	let args = Args::parse();
	let device = CommandDevice::new(args.capacity).into_shared();

	let addr = SocketAddr::new(args.bind, args.port);
	let listener = match TcpListener::bind(addr) {
		Ok(listener) => listener,
		Err(error) => {
			error!(%addr, %error, "failed to bind");
			return ExitCode::FAILURE;
		}
	};
	info!(%addr, capacity = args.capacity, "listening");

	for connection in listener.incoming() {
		match connection {
			Ok(stream) => {
				let device = SharedDevice::clone(&device);
				thread::spawn(move || serve(stream, device));
			}
			Err(error) => error!(%error, "failed to accept connection"),
		}
	}
	ExitCode::SUCCESS
}

/// Feeds one connection's bytes into the device, echoing the full history
/// back after each chunk that completes a command.
fn serve(mut stream: TcpStream, device: SharedDevice) {
	let peer = stream
		.peer_addr()
		.map_or_else(|_| "unknown".into(), |addr| addr.to_string());
	info!(%peer, "accepted connection");

	let mut session = DeviceSession::open(device);
	let mut chunk = [0u8; READ_CHUNK];
	loop {
		let count = match stream.read(&mut chunk) {
			Ok(0) => break,
			Ok(count) => count,
			Err(error) => {
				error!(%peer, %error, "receive failed");
				break;
			}
		};

		if let Err(error) = session.write_all(&chunk[..count]) {
			error!(%peer, %error, "device write failed");
			break;
		}
		if chunk[..count].contains(&b'\n') {
			if let Err(error) = send_history(&mut stream, &mut session) {
				error!(%peer, %error, "reply failed");
				break;
			}
		}
	}

	info!(%peer, "closed connection");
}

/// Streams the whole live history from the start, one record-bounded read
/// at a time.
fn send_history(stream: &mut TcpStream, session: &mut DeviceSession) -> io::Result<()> {
	session.rewind()?;
	let mut chunk = [0u8; READ_CHUNK];
	loop {
		let count = session.read(&mut chunk)?;
		if count == 0 {
			return Ok(());
		}
		stream.write_all(&chunk[..count])?;
	}
}
