//! Riemann protobuf messages.
//!
//! Mirrors `proto/riemann.proto`; `test_field_keys_match_schema` fails if
//! the two drift apart. Every scalar is `optional` so that an
//! absent field is distinguishable from a present zero on the wire.

/// Query carried by a [`Msg`]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Query {
    #[prost(string, optional, tag = "1")]
    pub string: Option<String>,
}

/// Wire form of an event
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(int64, optional, tag = "1")]
    pub time: Option<i64>,
    #[prost(string, optional, tag = "2")]
    pub state: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub service: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub host: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub description: Option<String>,
    #[prost(float, optional, tag = "8")]
    pub ttl: Option<f32>,
    #[prost(sint64, optional, tag = "13")]
    pub metric_sint64: Option<i64>,
    #[prost(double, optional, tag = "14")]
    pub metric_d: Option<f64>,
    #[prost(float, optional, tag = "15")]
    pub metric_f: Option<f32>,
}

/// Envelope exchanged with the server in both directions
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Msg {
    /// Set by the server on stream replies
    #[prost(bool, optional, tag = "2")]
    pub ok: Option<bool>,
    #[prost(string, optional, tag = "3")]
    pub error: Option<String>,
    #[prost(message, optional, tag = "5")]
    pub query: Option<Query>,
    #[prost(message, repeated, tag = "6")]
    pub events: Vec<Event>,
}

impl Msg {
    /// Message carrying the given events
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    /// Message carrying only a query
    pub fn with_query(query: &str) -> Self {
        Self {
            query: Some(Query {
                string: Some(query.to_string()),
            }),
            ..Default::default()
        }
    }
}
