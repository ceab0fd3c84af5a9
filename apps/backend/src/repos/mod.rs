//! Persistence seams: traits and records, no storage details.

pub mod games;
