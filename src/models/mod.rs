pub mod chart;
pub mod employee;
pub mod fragment;
pub mod metrics;
pub mod notification;
pub mod page;
pub mod recommendation;
pub mod settings;
