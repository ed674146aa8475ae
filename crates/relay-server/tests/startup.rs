//! Process-level startup tests.
//!
//! A bind failure is the one unrecoverable error: the binary must exit with a
//! non-zero status and must not report a listening server.

use std::net::TcpListener;
use std::process::{Command, Output};

fn run_relay(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_relay-server"))
        .args(args)
        .env("RUST_LOG", "info")
        .env_remove("RELAY_PORT")
        .env_remove("RELAY_BIND")
        .output()
        .expect("spawn relay-server binary")
}

#[test]
fn test_port_in_use_aborts_with_nonzero_exit() {
    // Arrange: another "process" already owns the port
    let holder = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = holder.local_addr().unwrap().port().to_string();

    // Act
    let output = run_relay(&["--bind", "127.0.0.1", "--port", &port]);

    // Assert
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success(), "relay must fail to start");
    assert!(
        stderr.contains("failed to bind"),
        "bind cause must be reported, stderr:\n{stderr}"
    );
    assert!(
        !stdout.contains("server listening"),
        "no listener may be reported, stdout:\n{stdout}"
    );
}

#[test]
fn test_unassigned_address_aborts_with_nonzero_exit() {
    // 192.0.2.0/24 (TEST-NET-1) is never assigned to a real host.
    let output = run_relay(&["--bind", "192.0.2.1", "--port", "0"]);
    assert!(!output.status.success());
}
