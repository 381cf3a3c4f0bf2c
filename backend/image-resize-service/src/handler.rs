/// Invocation boundary
///
/// Parses the raw runtime payload, runs the batch and converts the result into
/// the `{statusCode, body}` response. A payload without a `Records` array, or a
/// malformed record inside it, takes the same failure path as a processing
/// error.
use crate::models::{HandlerResponse, S3Event};
use crate::services::EventProcessor;

pub async fn handle_event(processor: &EventProcessor, payload: serde_json::Value) -> HandlerResponse {
    let event = match S3Event::from_value(payload) {
        Ok(event) => event,
        Err(e) => return processor.fail(&e).await.into_response(),
    };

    processor.process_event(event).await.into_response()
}
