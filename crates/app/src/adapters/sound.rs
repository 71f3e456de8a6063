use std::io::{self, Write};
use tracing::debug;
use tzclock_core::ports::TickSound;

/// Rings the terminal bell
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TickSound for TerminalBell {
    fn tick(&self) {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            debug!("Failed to ring terminal bell: {}", e);
        }
    }
}
