//! Flutter bridge surface for the calorie tracker core.

pub mod api;
