//! NYC subway departures server.
//!
//! Answers "what trains leave this station soon, and where are they
//! going?" by merging the live trip-update feeds with the static timetable
//! and the station directory.

pub mod cache;
pub mod config;
pub mod departures;
pub mod domain;
pub mod feeds;
pub mod stations;
pub mod trips;
pub mod walking;
pub mod web;
