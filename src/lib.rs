// SPDX-License-Identifier: MPL-2.0
//! `model_lens` is a 3D model viewer built with the Iced GUI framework.
//!
//! It renders glTF models with a normal-visualization material, an orbit
//! camera, and a thumbnail gallery with hover previews for switching
//! between models.

#![doc(html_root_url = "https://docs.rs/model_lens/0.1.0")]

pub mod app;
pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod ui;
pub mod viewer;
