use colored::*;

/// Final status line for a run that completed.
pub fn success(msg: &str) {
    tracing::info!("{} {}", "✓".green(), msg.green());
}

/// Final status line for a failed run. The same text is in the outcome record.
pub fn error(msg: &str) {
    tracing::error!("{} {}", "Error:".red(), msg.red());
}
