//! Route handlers outside the estimator API

pub mod health;
