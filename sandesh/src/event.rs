//! Caller-facing event record.

use serde::{Deserialize, Serialize};

/// A single Riemann event.
///
/// Fields left at their zero value (`0`, `0.0`, empty string) are not sent.
/// The flip side is that a metric, time or TTL of exactly zero cannot be
/// transmitted: the server sees the field as unset, and the event decoded
/// from a query result carries zero again. Callers that need to report a
/// literal zero should be aware that it is indistinguishable from "absent".
///
/// Only one of `float`, `double` and `int` is normally set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Time to live in seconds
    pub ttl: f32,
    /// Seconds since the UNIX epoch
    pub time: i64,
    pub host: String,
    pub state: String,
    pub service: String,
    pub description: String,
    /// 32-bit float metric (wire field `metric_f`)
    pub float: f32,
    /// 64-bit float metric (wire field `metric_d`)
    pub double: f64,
    /// Integer metric (wire field `metric_sint64`)
    pub int: i64,
}

/// Metric value of an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    I64(i64),
    F64(f64),
    F32(f32),
}

impl Event {
    /// Create an event for a service
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Default::default()
        }
    }

    /// True when no field would be encoded
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// First non-zero metric, checked as `int`, `double`, then `float`.
    ///
    /// Riemann resolves events carrying several metrics in the same order.
    pub fn metric(&self) -> Option<Metric> {
        if self.int != 0 {
            Some(Metric::I64(self.int))
        } else if self.double != 0.0 {
            Some(Metric::F64(self.double))
        } else if self.float != 0.0 {
            Some(Metric::F32(self.float))
        } else {
            None
        }
    }
}
