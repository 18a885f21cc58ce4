//! Complaint Compass - Conversational Complaint Intake
//!
//! This crate implements a multi-turn intake pipeline that collects
//! structured complaint data from free-form user text, classifies the
//! complaint to a handling department, and produces a submission-ready
//! package for outbound delivery.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
