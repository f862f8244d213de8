//! Meeting Scheduler - Conversational Meeting Booking
//!
//! This crate collects meeting details from a user turn by turn, asks a
//! calendar service for slots where every attendee is free, and books the
//! slot the user picks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
