// Candidate search: additive ranking of candidate records plus pagination
// for the listing endpoint.

pub mod handlers;
pub mod pagination;
pub mod ranker;
