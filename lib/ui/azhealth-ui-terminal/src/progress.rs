use azhealth_domain::{Event, EventLevel};
use azhealth_ports::ProgressPort;

/// Prints progress to stdout and problems to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProgressPort;

impl TerminalProgressPort {
    pub fn format(event: &Event) -> String {
        match event.level {
            EventLevel::Info => event.message.clone(),
            EventLevel::Warn => format!("Warning: {}", event.message),
            EventLevel::Error => format!("Error: {}", event.message),
        }
    }
}

impl ProgressPort for TerminalProgressPort {
    fn emit(&self, event: Event) {
        let line = Self::format(&event);
        match event.level {
            EventLevel::Info => println!("{line}"),
            EventLevel::Warn | EventLevel::Error => eprintln!("{line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_prefixes_by_level() {
        assert_eq!(
            TerminalProgressPort::format(&Event::info("Collecting resource health data...")),
            "Collecting resource health data..."
        );
        assert_eq!(
            TerminalProgressPort::format(&Event::warn("Could not get logs for vm1")),
            "Warning: Could not get logs for vm1"
        );
        assert_eq!(
            TerminalProgressPort::format(&Event::error("boom")),
            "Error: boom"
        );
    }
}
