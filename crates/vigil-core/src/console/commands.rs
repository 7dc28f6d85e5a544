use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::console::error::ConsoleSystemError;
use crate::console::{CommandArgs, ConsoleCommand};
use crate::kernel::constants;
use crate::messenger::manager::{ConsumeOptions, DefaultMessengerManager, MessengerManager};

/// `messenger:consume` — one bounded consumption cycle against a receiver.
///
/// Positional argument: the receiver name, defaulting to the stock receiver.
/// Options `limit` and `time-limit` are positive integers (both default to
/// 1); the `verbose` flag raises log output and never affects correctness.
/// A soft job failure does not change the exit status; only missing
/// messenger infrastructure does.
pub struct ConsumeMessagesCommand {
    messenger: Arc<DefaultMessengerManager>,
}

impl ConsumeMessagesCommand {
    pub fn new(messenger: Arc<DefaultMessengerManager>) -> Self {
        Self { messenger }
    }

    fn ensure_positive(value: u64, option: &str) -> Result<(), ConsoleSystemError> {
        if value == 0 {
            return Err(ConsoleSystemError::InvalidOption {
                option: option.to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ConsoleCommand for ConsumeMessagesCommand {
    fn name(&self) -> &'static str {
        constants::CONSUME_COMMAND
    }

    fn description(&self) -> &'static str {
        "Consume queued messages from a receiver, bounded by count and time"
    }

    async fn execute(&self, args: &CommandArgs) -> Result<i32, ConsoleSystemError> {
        let receiver = args.argument(0).unwrap_or(constants::DEFAULT_RECEIVER);
        let limit = args.option_parsed::<usize>("limit")?.unwrap_or(1);
        let time_limit = args.option_parsed::<u64>("time-limit")?.unwrap_or(1);
        Self::ensure_positive(limit as u64, "limit")?;
        Self::ensure_positive(time_limit, "time-limit")?;
        let verbose = args.flag("verbose");

        if verbose {
            log::info!(
                "consuming up to {} message(s) from '{}' within {}s",
                limit,
                receiver,
                time_limit
            );
        }

        let options = ConsumeOptions {
            limit,
            time_limit: Duration::from_secs(time_limit),
        };

        match self.messenger.consume(receiver, options).await {
            Ok(report) => {
                if verbose {
                    log::info!(
                        "processed {} message(s), {} soft failure(s)",
                        report.processed,
                        report.failed
                    );
                }
                Ok(0)
            }
            Err(e) => {
                // Reported, not retried; retry belongs to the queue
                // infrastructure.
                log::error!("consumption cycle failed: {}", e);
                Ok(1)
            }
        }
    }
}
