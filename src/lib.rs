// Library root
// -----------
// This crate exposes the pieces the `gmail-settings` binary is built
// from, plus an unrelated social-graph record.
//
// Module responsibilities:
// - `cli`: flag parsing, validation, setting selection and output.
// - `settings`: setting categories, change values and target users.
// - `defaults`: the fixed values every write sends.
// - `service`: the `SettingsService` trait and its error type.
// - `api`: HTTP implementation of `SettingsService` (ClientLogin + feeds).
// - `config`: endpoint configuration.
// - `graph`: the `Link` resource mirror.
pub mod api;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod graph;
pub mod service;
pub mod settings;
