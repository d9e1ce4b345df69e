//! Stripmap Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! stripmap line-diagram pipeline. It includes:
//!
//! - **Geometry**: Points, path points and polyline measurements ([`geometry`] module)
//! - **Colors**: CSS color parsing for styling ([`color::Color`])
//! - **Route**: The route model of stops and directional trips ([`route`] module)

pub mod color;
pub mod geometry;
pub mod route;
