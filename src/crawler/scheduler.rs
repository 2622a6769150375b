//! Scheduler for managing the crawl frontier
//!
//! This module handles:
//! - FIFO queue of requests waiting to be fetched
//! - Duplicate filtering by request fingerprint
//! - Dropping requests whose host is not an allowed domain

use crate::spider::FetchRequest;
use crate::url::{is_allowed, request_fingerprint};
use std::collections::{HashSet, VecDeque};

/// What happened to a request handed to [`Scheduler::enqueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Added to the frontier
    Queued,
    /// Fingerprint already seen
    Duplicate,
    /// Host outside the allowed domains
    Offsite,
    /// URL is not an absolute HTTP(S) URL
    Invalid,
}

/// Scheduler manages the frontier queue and the seen-fingerprint set
///
/// Requests built with `dont_filter` bypass the duplicate check and do not
/// record their fingerprint; the offsite check applies to every request.
pub struct Scheduler {
    /// Requests waiting to be fetched, oldest first
    frontier: VecDeque<FetchRequest>,

    /// Fingerprints of every filtered request admitted so far
    seen: HashSet<String>,

    allowed_domains: Vec<String>,
}

impl Scheduler {
    /// Creates an empty scheduler restricted to `allowed_domains`
    pub fn new(allowed_domains: Vec<String>) -> Self {
        Self {
            frontier: VecDeque::new(),
            seen: HashSet::new(),
            allowed_domains,
        }
    }

    /// Filters a new request and queues it if it passes
    pub fn enqueue(&mut self, request: FetchRequest) -> Admission {
        let Some(fingerprint) = request_fingerprint(&request.url) else {
            tracing::debug!("Skipping invalid URL {}", request.url);
            return Admission::Invalid;
        };

        if !is_allowed(&request.url, &self.allowed_domains) {
            tracing::debug!("Filtered offsite request to {}", request.url);
            return Admission::Offsite;
        }

        if !request.dont_filter && !self.seen.insert(fingerprint) {
            tracing::trace!("Filtered duplicate request to {}", request.url);
            return Admission::Duplicate;
        }

        self.frontier.push_back(request);
        Admission::Queued
    }

    /// Puts a retry attempt back on the frontier without filtering
    pub fn requeue(&mut self, request: FetchRequest) {
        self.frontier.push_back(request);
    }

    /// Takes the oldest waiting request
    pub fn next_request(&mut self) -> Option<FetchRequest> {
        self.frontier.pop_front()
    }

    /// Gets the number of requests in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }
}
