/// Fire-and-forget outcome reporting to the user. The surrounding shell
/// decides how a message is shown (toast, status bar, ...); the core only
/// hands over text.
pub trait Notifier {
    fn report_success(&mut self, message: &str);
    fn report_failure(&mut self, message: &str);
}

/// Routes reports to the `log` facade. Useful as a default when no UI
/// notifier is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn report_success(&mut self, message: &str) {
        log::info!("{}", message);
    }

    fn report_failure(&mut self, message: &str) {
        log::error!("{}", message);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Notifier;

    /// Records every report for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub successes: Vec<String>,
        pub failures: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn report_success(&mut self, message: &str) {
            self.successes.push(message.to_string());
        }

        fn report_failure(&mut self, message: &str) {
            self.failures.push(message.to_string());
        }
    }
}
