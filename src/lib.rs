//! Data pipeline behind a startup-investment analytics dashboard.
//!
//! The dashboard renders bubble, pie, bar, line and scatter charts plus
//! a world map over a static CSV of startups. This crate is the part
//! with the logic in it: normalize the rows once into an immutable
//! [`data::model::Dataset`], then on every control change run
//! filter → aggregate → derive and hand the chart-ready values in
//! [`state::DashboardView`] to a rendering surface. Renderers draw; they
//! never compute and never feed state back except through the control
//! setters on [`state::DashboardState`].

pub mod analytics;
pub mod data;
pub mod format;
pub mod state;
