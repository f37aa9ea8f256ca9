//! Iterated local search engines for veloroute.
//!
//! Two engines implement [`RouteSearch`](veloroute_core::RouteSearch):
//!
//! - [`CasSearch`] keeps a candidate arc set (CAS) for every arc of its
//!   route and repeatedly swaps a promising arc for a higher-scoring
//!   sub-route drawn from that set. [`CasEngine`] computes and maintains
//!   the sets, pruning the graph with an ellipse around each gap.
//! - [`BacktrackSearch`] cuts a sliding window out of a [`FlatRoute`] and
//!   searches the gap again with a depth-bounded randomized walk.
//!
//! Both engines are single-threaded and deterministic for a given graph,
//! configuration and seed.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod backtrack;
mod cas;
mod search;

pub use backtrack::{BacktrackSearch, FlatRoute};
pub use cas::{CasEngine, candidates_by_quality_ratio};
pub use search::CasSearch;
