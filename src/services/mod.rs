pub mod chart_adapter;
pub mod dashboard_session;
pub mod data_source;
pub mod domain_store;
pub mod fetcher;
pub mod filter_engine;
pub mod modal_controller;
pub mod navigator;
pub mod notification_center;
pub mod settings_service;
pub mod view_renderer;
