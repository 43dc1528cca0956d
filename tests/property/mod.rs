// Copyright 2025 Cowboy AI, LLC.

//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify
//! fundamental properties of the portfolio state fold.

mod event_application;
