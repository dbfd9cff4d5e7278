//! The subset of the GTFS-realtime schema this service reads.
//!
//! Field tags follow `gtfs-realtime.proto`. Messages and fields that are
//! not declared here (vehicle positions, alerts, vendor extensions) are
//! skipped by the decoder.

use prost::Message;

#[derive(Clone, PartialEq, Message)]
pub struct FeedMessage {
    #[prost(message, optional, tag = "1")]
    pub header: Option<FeedHeader>,

    #[prost(message, repeated, tag = "2")]
    pub entity: Vec<FeedEntity>,
}

#[derive(Clone, PartialEq, Message)]
pub struct FeedHeader {
    #[prost(string, optional, tag = "1")]
    pub gtfs_realtime_version: Option<String>,

    /// POSIX seconds at which the feed was generated.
    #[prost(uint64, optional, tag = "3")]
    pub timestamp: Option<u64>,
}

#[derive(Clone, PartialEq, Message)]
pub struct FeedEntity {
    #[prost(string, optional, tag = "1")]
    pub id: Option<String>,

    #[prost(bool, optional, tag = "2")]
    pub is_deleted: Option<bool>,

    #[prost(message, optional, tag = "3")]
    pub trip_update: Option<TripUpdate>,
}

#[derive(Clone, PartialEq, Message)]
pub struct TripUpdate {
    #[prost(message, optional, tag = "1")]
    pub trip: Option<TripDescriptor>,

    #[prost(message, repeated, tag = "2")]
    pub stop_time_update: Vec<StopTimeUpdate>,

    #[prost(uint64, optional, tag = "4")]
    pub timestamp: Option<u64>,
}

#[derive(Clone, PartialEq, Message)]
pub struct TripDescriptor {
    #[prost(string, optional, tag = "1")]
    pub trip_id: Option<String>,

    #[prost(string, optional, tag = "2")]
    pub start_time: Option<String>,

    #[prost(string, optional, tag = "3")]
    pub start_date: Option<String>,

    #[prost(string, optional, tag = "5")]
    pub route_id: Option<String>,

    #[prost(uint32, optional, tag = "6")]
    pub direction_id: Option<u32>,
}

#[derive(Clone, PartialEq, Message)]
pub struct StopTimeUpdate {
    #[prost(uint32, optional, tag = "1")]
    pub stop_sequence: Option<u32>,

    #[prost(message, optional, tag = "2")]
    pub arrival: Option<StopTimeEvent>,

    #[prost(message, optional, tag = "3")]
    pub departure: Option<StopTimeEvent>,

    #[prost(string, optional, tag = "4")]
    pub stop_id: Option<String>,
}

#[derive(Clone, PartialEq, Message)]
pub struct StopTimeEvent {
    #[prost(int32, optional, tag = "1")]
    pub delay: Option<i32>,

    /// POSIX seconds.
    #[prost(int64, optional, tag = "2")]
    pub time: Option<i64>,

    #[prost(int32, optional, tag = "3")]
    pub uncertainty: Option<i32>,
}
