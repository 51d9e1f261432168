//! JWT Authentication and Middleware
//!
//! This module provides authentication infrastructure for the basket API,
//! including JWT token generation/validation and Axum middleware.
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - Password hashing and JWT token encoding/decoding
//! - [`auth::middleware`](crate::auth::middleware) - Axum layer and extractor for bearer auth
//!
//! # Security Features
//!
//! - **Password Hashing**: Uses Argon2id (memory-hard) for secure password storage
//! - **JWT Tokens**: HS256 signed tokens with configured issuer, audience, and expiration
//! - **Claims**: Username subject plus a fixed `"User"` role claim

/// Password hashing and JWT issue/verify.
pub mod jwt;
/// Axum middleware and extractor for bearer authentication.
pub mod middleware;
