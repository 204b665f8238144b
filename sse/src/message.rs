/// Frames pushed into a subscriber's channel by the hub.
///
/// The hub decides *what* a subscriber receives; the transport layer (the
/// `web` crate) decides how each frame is encoded on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Connection acknowledgement. Always the first frame a subscriber
    /// receives, so the client can confirm the stream is open before any
    /// upstream event has arrived. Encoded as the comment `: connected`.
    Ack,
    /// One upstream payload, forwarded verbatim. Encoded as a `data:` frame.
    Data(String),
}
