//! # Airsight
//!
//! Client-side orchestration for an air-quality dashboard.
//!
//! This crate is the controller layer between a remote prediction service and
//! a set of dashboard views: it hydrates a user session, fetches live
//! environmental readings, requests predictions and forecasts, runs
//! exploratory-data-analysis queries, and projects the results onto view
//! models. Drawing itself is an external capability reached through the
//! [`views::chart::ChartBackend`] trait; this crate owns state, validation,
//! flow sequencing, and failure isolation.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for the remote API
//! - [`models`]: AQI severity domain and prediction inputs
//! - [`remote`]: gateway trait, HTTP implementation, error taxonomy
//! - [`notifier`]: transient, advisory user notices
//! - [`session`]: hydrate-once session and capability state
//! - [`controllers`]: user-triggered flows (prediction, forecast, EDA, auth)
//! - [`views`]: view models and chart instance ownership
//!
//! ## Failure model
//!
//! Remote failures surface exactly once to the notifier and once to the
//! triggering flow; each controller resets only its own view region, so a
//! failed forecast never disturbs a rendered prediction and vice versa.

pub mod api;
pub mod controllers;
pub mod models;
pub mod notifier;
pub mod remote;
pub mod session;
pub mod views;
