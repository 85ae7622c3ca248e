//! WebSocket-backed [`SessionTransport`].
//!
//! The socket itself is owned by the connection's writer task; the registry
//! only holds the sending half of an unbounded channel feeding that task.
//! Pushing into the channel never blocks, which keeps every send
//! fire-and-forget while the lobby lock is held.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::mpsc;

use crate::domain::{ReadyState, SessionTransport, TransportError};

/// Frame queued for the writer task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    Text(String),
    /// Transport-level ping used for liveness
    Ping,
}

/// Sending half stored in the registry
pub type PusherChannel = mpsc::UnboundedSender<OutboundFrame>;

/// Receiving half drained by the writer task
pub type PusherReceiver = mpsc::UnboundedReceiver<OutboundFrame>;

pub struct WebSocketTransport {
    sender: PusherChannel,
    closing: Arc<AtomicBool>,
}

/// Handle kept by the connection handler to flag a close in progress
#[derive(Debug, Clone)]
pub struct CloseSignal {
    closing: Arc<AtomicBool>,
}

impl CloseSignal {
    pub fn mark_closing(&self) {
        self.closing.store(true, Ordering::SeqCst);
    }
}

impl WebSocketTransport {
    /// Create a transport and the receiver its writer task should drain
    pub fn channel() -> (Self, PusherReceiver, CloseSignal) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let closing = Arc::new(AtomicBool::new(false));
        let signal = CloseSignal {
            closing: closing.clone(),
        };
        (Self { sender, closing }, receiver, signal)
    }

    fn push(&self, frame: OutboundFrame) -> Result<(), TransportError> {
        if self.sender.is_closed() {
            return Err(TransportError::Closed);
        }
        self.sender
            .send(frame)
            .map_err(|e| TransportError::PushFailed(e.to_string()))
    }
}

impl SessionTransport for WebSocketTransport {
    fn ready_state(&self) -> ReadyState {
        if self.sender.is_closed() {
            ReadyState::Closed
        } else if self.closing.load(Ordering::SeqCst) {
            ReadyState::Closing
        } else {
            ReadyState::Open
        }
    }

    fn send_text(&self, text: &str) -> Result<(), TransportError> {
        self.push(OutboundFrame::Text(text.to_string()))
    }

    fn send_ping(&self) -> Result<(), TransportError> {
        self.push(OutboundFrame::Ping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transport_is_open() {
        // given:
        let (transport, _rx, _signal) = WebSocketTransport::channel();

        // when:
        let state = transport.ready_state();

        // then:
        assert_eq!(state, ReadyState::Open);
    }

    #[test]
    fn test_send_text_queues_frame() {
        // given:
        let (transport, mut rx, _signal) = WebSocketTransport::channel();

        // when:
        transport.send_text("hello").unwrap();
        transport.send_ping().unwrap();

        // then:
        assert_eq!(rx.try_recv(), Ok(OutboundFrame::Text("hello".to_string())));
        assert_eq!(rx.try_recv(), Ok(OutboundFrame::Ping));
    }

    #[test]
    fn test_close_signal_marks_closing() {
        // given:
        let (transport, _rx, signal) = WebSocketTransport::channel();

        // when:
        signal.mark_closing();

        // then:
        assert_eq!(transport.ready_state(), ReadyState::Closing);
    }

    #[test]
    fn test_dropped_receiver_closes_transport() {
        // given:
        let (transport, rx, _signal) = WebSocketTransport::channel();

        // when:
        drop(rx);

        // then:
        assert_eq!(transport.ready_state(), ReadyState::Closed);
        assert_eq!(transport.send_text("late"), Err(TransportError::Closed));
        assert_eq!(transport.send_ping(), Err(TransportError::Closed));
    }
}
