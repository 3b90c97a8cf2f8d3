//! Raw transport types for the micro HTTP client.
//!
//! This crate holds the values that sit on either side of body conversion: the
//! [`protocol::RawResponse`] received from the network and the
//! [`protocol::body::RequestBody`] about to be sent. It does not perform any I/O itself;
//! the transport supplies the payload streams and the [`protocol::Release`] handle that
//! gives the connection back.
//!
//! # Resource contract
//!
//! - A raw response releases its connection exactly once, on [`protocol::RawResponse::close`]
//!   or on drop
//! - Reading the body is only valid before close
//! - Payloads are never drained eagerly by this crate

pub mod protocol;
