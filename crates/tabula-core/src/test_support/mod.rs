//! Crate-internal test doubles: a scripted driver and fixture entities.

pub(crate) mod driver;
pub(crate) mod entity;
