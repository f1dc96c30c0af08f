#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod bounds;
pub mod duration;
pub mod error;
pub mod format;
pub mod interval;
pub mod sequence;
pub mod timestamp;

pub use self::{
    bounds::Bounds,
    duration::Duration,
    error::{Error, Result},
    format::IntervalFormat,
    interval::Interval,
    sequence::Sequence,
    timestamp::Timestamp,
};
