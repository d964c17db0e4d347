//! Wire envelope codec and typed event payloads.
//!
//! Frames are JSON text shaped `{"type": <string>, ...}` in both directions.
//! The server flattens payload fields beside `type`; the client nests its
//! own outbound payload under `payload`. Decoding accepts both shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use umami_core::error::DataError;
use umami_core::types::{OrderId, TemporaryId, Timestamp};

/// Known event-type strings on the wire.
pub mod event_type {
    /// Server acknowledgment after a successful connect.
    pub const CONNECTION_ESTABLISHED: &str = "connection_established";
    /// A new order was placed (delivered to admin sessions).
    pub const NEW_ORDER: &str = "new_order";
    /// A new guest order was placed (delivered to admin sessions).
    pub const NEW_GUEST_ORDER: &str = "new_guest_order";
    /// An order changed status (delivered to the owning session).
    pub const ORDER_STATUS_UPDATE: &str = "order_status_update";
    /// Keepalive request (outbound only).
    pub const PING: &str = "ping";
    /// Keepalive response.
    pub const PONG: &str = "pong";
    /// Server-side error report.
    pub const ERROR: &str = "error";
}

/// A decoded wire frame: the event-type string plus an opaque payload.
///
/// The payload stays opaque at this layer; subscribers interpret it with
/// [`Envelope::payload_as`].
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Event-type string selecting the dispatch target.
    pub kind: String,
    /// Payload fields, opaque to the dispatcher.
    pub payload: Value,
}

impl Envelope {
    /// Creates an envelope from a serializable payload.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the payload cannot be serialized.
    pub fn new(kind: impl Into<String>, payload: impl Serialize) -> Result<Self, DataError> {
        Ok(Self {
            kind: kind.into(),
            payload: serde_json::to_value(payload).map_err(DataError::decode)?,
        })
    }

    /// Decodes an envelope from a JSON text frame.
    ///
    /// Accepts both the flat server shape (`{"type": "new_order",
    /// "order_id": 42}`) and the nested client shape (`{"type": "ping",
    /// "payload": {...}}`).
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the frame is not a JSON object or lacks a
    /// string `type` field.
    pub fn decode(text: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(text).map_err(DataError::decode)?;

        let Value::Object(mut map) = value else {
            return Err(DataError::Decode {
                reason: "frame is not a JSON object".to_string(),
            });
        };

        let kind = match map.remove("type") {
            Some(Value::String(kind)) if !kind.is_empty() => kind,
            Some(_) => {
                return Err(DataError::InvalidValue {
                    field: "type".to_string(),
                    reason: "must be a non-empty string".to_string(),
                })
            }
            None => {
                return Err(DataError::MissingField {
                    field: "type".to_string(),
                })
            }
        };

        let payload = match map.remove("payload") {
            Some(payload @ Value::Object(_)) => payload,
            // Flat server shape: everything beside `type` is the payload.
            _ => Value::Object(map),
        };

        Ok(Self { kind, payload })
    }

    /// Encodes the envelope to a JSON text frame (nested payload shape).
    ///
    /// # Errors
    ///
    /// Returns `DataError` if serialization fails.
    pub fn encode(&self) -> Result<String, DataError> {
        serde_json::to_string(&serde_json::json!({
            "type": self.kind,
            "payload": self.payload,
        }))
        .map_err(DataError::decode)
    }

    /// Deserializes the payload into a typed event struct.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the payload does not match the target type.
    pub fn payload_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, DataError> {
        serde_json::from_value(self.payload.clone()).map_err(DataError::decode)
    }

    /// Builds the outbound keepalive frame.
    #[must_use]
    pub fn ping(now: Timestamp) -> Self {
        Self {
            kind: event_type::PING.to_string(),
            payload: serde_json::json!({ "timestamp": now.as_millis() }),
        }
    }
}

/// Server acknowledgment sent immediately after a successful connect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionEstablished {
    /// Human-readable acknowledgment.
    #[serde(default)]
    pub message: Option<String>,
    /// The authenticated user's id.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// The channel room the session joined.
    #[serde(default)]
    pub room: Option<String>,
}

/// A new order placed by a registered customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// Identifier of the new order.
    pub order_id: OrderId,
    /// Customer display name.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Restaurant display name.
    #[serde(default)]
    pub restaurant_name: Option<String>,
    /// Order total, serialized as a decimal string.
    #[serde(default)]
    pub total_amount: Option<String>,
    /// Server-side event time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A new order placed by a guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGuestOrder {
    /// Identifier of the new order.
    pub order_id: OrderId,
    /// Tracking identifier the guest can use to follow the order.
    #[serde(default)]
    pub temporary_id: Option<TemporaryId>,
    /// Customer display name, when the guest provided one.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Server-side event time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// An order transitioned between statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    /// Identifier of the order.
    pub order_id: OrderId,
    /// Status before the transition.
    pub old_status: String,
    /// Status after the transition.
    pub new_status: String,
    /// Restaurant display name.
    #[serde(default)]
    pub restaurant_name: Option<String>,
    /// Owner of the order.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Server-side event time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Keepalive response echoing the ping timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pong {
    /// Echoed client timestamp, when present.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Server-side error report (e.g. an unparseable outbound frame).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerError {
    /// Error description.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_flat_server_shape() {
        let frame = r#"{"type":"new_order","order_id":42,"customer_name":"Ann"}"#;
        let envelope = Envelope::decode(frame).unwrap();

        assert_eq!(envelope.kind, "new_order");
        let event: NewOrder = envelope.payload_as().unwrap();
        assert_eq!(event.order_id.as_i64(), 42);
        assert_eq!(event.customer_name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_decode_nested_payload_shape() {
        let frame = r#"{"type":"new_order","payload":{"order_id":42,"customer_name":"Ann"}}"#;
        let envelope = Envelope::decode(frame).unwrap();

        assert_eq!(envelope.kind, "new_order");
        let event: NewOrder = envelope.payload_as().unwrap();
        assert_eq!(event.order_id.as_i64(), 42);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(Envelope::decode("[1,2,3]").is_err());
        assert!(Envelope::decode("not json at all").is_err());
    }

    #[test]
    fn test_decode_requires_type() {
        let err = Envelope::decode(r#"{"order_id":42}"#).unwrap_err();
        assert!(matches!(err, DataError::MissingField { .. }));

        let err = Envelope::decode(r#"{"type":7}"#).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { .. }));
    }

    #[test]
    fn test_encode_roundtrip() {
        let envelope = Envelope::new(
            "order_status_update",
            serde_json::json!({"order_id": 7, "old_status": "pending", "new_status": "preparing"}),
        )
        .unwrap();

        let text = envelope.encode().unwrap();
        let decoded = Envelope::decode(&text).unwrap();
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_ping_frame() {
        let envelope = Envelope::ping(Timestamp::new_unchecked(1_700_000_000_000));
        assert_eq!(envelope.kind, "ping");
        let text = envelope.encode().unwrap();
        assert!(text.contains("1700000000000"));
    }

    #[test]
    fn test_order_status_update_full_frame() {
        let frame = r#"{
            "type": "order_status_update",
            "order_id": 15,
            "old_status": "preparing",
            "new_status": "delivering",
            "timestamp": "2025-08-01T10:30:00+00:00",
            "restaurant_name": "Spice House",
            "user_id": 12
        }"#;

        let envelope = Envelope::decode(frame).unwrap();
        let event: OrderStatusUpdate = envelope.payload_as().unwrap();

        assert_eq!(event.order_id.as_i64(), 15);
        assert_eq!(event.old_status, "preparing");
        assert_eq!(event.new_status, "delivering");
        assert_eq!(event.restaurant_name.as_deref(), Some("Spice House"));
        assert!(event.timestamp.is_some());
    }

    #[test]
    fn test_new_guest_order_frame() {
        let frame =
            r#"{"type":"new_guest_order","order_id":9,"temporary_id":"guest-8f3a"}"#;
        let envelope = Envelope::decode(frame).unwrap();
        assert_eq!(envelope.kind, event_type::NEW_GUEST_ORDER);

        let event: NewGuestOrder = envelope.payload_as().unwrap();
        assert_eq!(event.order_id.as_i64(), 9);
        assert_eq!(
            event.temporary_id.as_ref().map(TemporaryId::as_str),
            Some("guest-8f3a")
        );
    }

    #[test]
    fn test_payload_type_mismatch_is_data_error() {
        let envelope = Envelope::decode(r#"{"type":"new_order","order_id":"nope"}"#).unwrap();
        let result: Result<NewOrder, _> = envelope.payload_as();
        assert!(result.is_err());
    }
}
