// Post ingestion — the keyword feed client and the stream spool.
//
// Two ways posts reach the analyzer besides direct submission: a recent
// search against the feed API, and a line-delimited spool file kept fed
// by the stream listener process.

pub mod feed;
pub mod spool;
pub mod stream;
