//! Canada Post web services
//!
//! Each submodule implements one service as a [`CanadaPostOperation`](crate::CanadaPostOperation).

pub mod rating;
