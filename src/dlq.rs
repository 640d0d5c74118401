use crate::domain::{DeadLetterQueue, Error};

/// Reports rejected instructions through the log on stderr.
#[derive(Default, Debug)]
pub struct StdErrDLQ {}

impl DeadLetterQueue for StdErrDLQ {
    fn report(&self, error: &Error) {
        tracing::warn!(%error, "DLQ Report");
    }
}
