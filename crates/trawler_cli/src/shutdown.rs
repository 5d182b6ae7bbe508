use std::fmt;
use std::future::Future;

use console::Term;

/// A command was cancelled with Ctrl+C.
#[derive(Debug)]
pub(crate) struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interrupted; the running sync was rolled back")
    }
}

impl std::error::Error for Interrupted {}

/// Run `operation` until it finishes or Ctrl+C is pressed.
///
/// On Ctrl+C the operation's future is dropped, which rolls back its open
/// transaction.
pub(crate) async fn until_interrupted<F: Future>(operation: F) -> Result<F::Output, Interrupted> {
    tokio::pin!(operation);

    tokio::select! {
        output = &mut operation => Ok(output),
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => {
                if Term::stdout().is_term() {
                    eprintln!("\n\nShutdown requested, cancelling sync...");
                } else {
                    tracing::warn!("Shutdown requested, cancelling sync");
                }
                Err(Interrupted)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
                Ok(operation.await)
            }
        },
    }
}
