//! HTTP gateway for the VisionBoard AI service.
//!
//! This crate wraps the `visionboard` library in an Axum server. The
//! `visionboard` binary is the intended entry point; the library exists so
//! tests can drive the router in-process.

pub mod gateway;
