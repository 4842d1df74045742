//! User↔game relationship graph with collaborative-filtering recommendations.
//!
//! The graph holds `User` and `Game` nodes joined by directed, kind-labeled
//! edges whose `distance` weight encodes inverse affinity. Recommendations
//! walk weighted 2-hop paths through users with matching affinity and rank
//! candidate games by the cheapest path that reaches them.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
