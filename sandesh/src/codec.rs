//! Conversion between [`Event`] and its protobuf form.
//!
//! # Field mapping
//!
//! | `Event`       | `proto::Event`  | Wire type |
//! |---------------|-----------------|-----------|
//! | `ttl`         | `ttl`           | float     |
//! | `time`        | `time`          | int64     |
//! | `host`        | `host`          | string    |
//! | `state`       | `state`         | string    |
//! | `service`     | `service`       | string    |
//! | `description` | `description`   | string    |
//! | `float`       | `metric_f`      | float     |
//! | `int`         | `metric_sint64` | sint64    |
//! | `double`      | `metric_d`      | double    |
//!
//! Encoding is sparse: a field holding its type's zero value is left unset.
//! Decoding is total: an unset field becomes the zero value.

use crate::event::Event;
use crate::proto;

/// Encode one event, omitting zero-valued fields
pub fn encode(event: &Event) -> proto::Event {
    proto::Event {
        ttl: non_zero(event.ttl),
        time: non_zero(event.time),
        host: non_empty(&event.host),
        state: non_empty(&event.state),
        service: non_empty(&event.service),
        description: non_empty(&event.description),
        metric_f: non_zero(event.float),
        metric_sint64: non_zero(event.int),
        metric_d: non_zero(event.double),
    }
}

/// Encode a slice of events in order
pub fn encode_all(events: &[Event]) -> Vec<proto::Event> {
    events.iter().map(encode).collect()
}

/// Decode wire events, substituting zero values for absent fields
pub fn decode(events: Vec<proto::Event>) -> Vec<Event> {
    events.into_iter().map(decode_one).collect()
}

fn decode_one(event: proto::Event) -> Event {
    Event {
        ttl: event.ttl.unwrap_or_default(),
        time: event.time.unwrap_or_default(),
        host: event.host.unwrap_or_default(),
        state: event.state.unwrap_or_default(),
        service: event.service.unwrap_or_default(),
        description: event.description.unwrap_or_default(),
        float: event.metric_f.unwrap_or_default(),
        double: event.metric_d.unwrap_or_default(),
        int: event.metric_sint64.unwrap_or_default(),
    }
}

#[inline]
fn non_zero<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

#[inline]
fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
