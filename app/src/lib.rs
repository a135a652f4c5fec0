//! Taskboard: a single-table task tracker with a JSON API and HTML forms

pub mod bootstrap;
pub mod controllers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod views;
