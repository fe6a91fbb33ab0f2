pub mod config;

pub mod db;

pub mod rest;

pub mod openapi;

pub mod error_convert;

pub mod telemetry;

pub mod health;

pub mod auth;

pub mod repo;

pub mod service;

pub mod rate_limit;
