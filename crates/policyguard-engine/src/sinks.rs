use crate::ports::PolicyValidationSink;
use futures::future::join_all;
use policyguard_types::PolicyValidationSummary;
use std::sync::Arc;
use tracing::warn;

/// Hand the summary to every sink concurrently. Sink failures are logged only.
pub(crate) async fn write_to_sinks(
    sinks: &[Arc<dyn PolicyValidationSink>],
    summary: &PolicyValidationSummary,
    include_compliances: bool,
) {
    let writes = sinks
        .iter()
        .map(|sink| sink.write(summary, include_compliances));

    for (index, result) in join_all(writes).await.into_iter().enumerate() {
        if let Err(err) = result {
            warn!(sink = index, error = %err, "failed to write validation summary");
        }
    }
}
