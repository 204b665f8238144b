use async_stream::stream;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use log::*;
use service::AppState;
use sse::message::Frame;
use std::convert::Infallible;

/// SSE handler that establishes a long-lived connection carrying the
/// relayed event stream.
///
/// The subscription handle moves into the response stream; whichever side
/// closes the connection drops the stream, and dropping the handle
/// deregisters the subscriber from the hub exactly once.
pub(crate) async fn subscribe(
    State(app_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Establishing SSE connection");

    let mut subscription = app_state.sse_manager.subscribe();

    let stream = stream! {
        while let Some(frame) = subscription.recv().await {
            yield Ok(match frame {
                Frame::Ack => Event::default().comment("connected"),
                Frame::Data(payload) => Event::default().data(payload),
            });
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
