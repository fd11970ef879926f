//! Spans wrapping individual CLI commands.

use tracing::Span;

use crate::init::build_sha;

/// Span carrying the command name and build identifier.
///
/// Enter it for the duration of a command so every event logged inside is
/// attributed to it.
#[must_use]
pub fn command_span(command: &'static str) -> Span {
    tracing::info_span!("command", command, build_sha = %build_sha())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_span_can_be_entered() {
        let span = command_span("show");
        let _guard = span.enter();
        tracing::info!("inside command span");
    }
}
