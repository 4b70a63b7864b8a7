// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image payload decoding and validation.
//!
//! Inbound reports carry the photo as base64 text, optionally wrapped in
//! data-URL framing (`data:image/png;base64,<payload>`). This crate strips
//! the framing, decodes the payload, and verifies the bytes parse as a
//! supported raster image before anything is sent downstream. The decoded
//! bytes are never re-encoded, so the classifier sees full fidelity and the
//! store keeps the submitted payload verbatim.

pub mod codec;

pub use codec::{decode, DecodedImage};
