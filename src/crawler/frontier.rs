//! Crawl frontier
//!
//! Tracks which canonical URLs are waiting to be fetched and which have
//! already been claimed, and enforces the page budget.

use std::collections::{HashSet, VecDeque};

/// Pending and visited URL sets with a page budget
///
/// URLs are handed out in first-in, first-out order, which makes the crawl
/// breadth-first in discovery order. A URL is never pending and visited at
/// the same time, and is claimed at most once per crawl. Only the URL most
/// recently returned by [`Frontier::next`] can be claimed; if it is not
/// claimed before the next call, it is dropped.
#[derive(Debug)]
pub struct Frontier {
    /// URLs waiting to be fetched, in discovery order
    queue: VecDeque<String>,

    /// Membership index over `queue`
    pending: HashSet<String>,

    /// URLs already claimed
    visited: HashSet<String>,

    /// URL handed out by `next` and not yet claimed
    in_flight: Option<String>,

    /// Maximum number of URLs that may be claimed
    max_pages: usize,
}

impl Frontier {
    /// Creates an empty frontier with the given page budget
    pub fn new(max_pages: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            pending: HashSet::new(),
            visited: HashSet::new(),
            in_flight: None,
            max_pages,
        }
    }

    /// Enqueues every URL in `urls`, returning how many were new
    pub fn seed<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        urls.into_iter().filter(|url| self.enqueue(url.clone())).count()
    }

    /// Adds a URL to the pending set
    ///
    /// Returns false, leaving the frontier unchanged, if the URL is already
    /// pending or has been visited.
    pub fn enqueue(&mut self, url: String) -> bool {
        if self.visited.contains(&url) || self.pending.contains(&url) {
            return false;
        }

        self.pending.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Takes the next pending URL
    ///
    /// Returns `None` once nothing is pending or the page budget is spent.
    pub fn next(&mut self) -> Option<String> {
        if self.budget_spent() {
            return None;
        }

        let url = self.queue.pop_front()?;
        self.pending.remove(&url);
        self.in_flight = Some(url.clone());
        Some(url)
    }

    /// Claims the URL last returned by `next`, counting it against the page
    /// budget
    ///
    /// Returns false, leaving the frontier unchanged, if `url` is not the
    /// in-flight URL or has already been claimed.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.in_flight.as_deref() != Some(url) {
            return false;
        }

        self.in_flight = None;
        self.visited.insert(url.to_string())
    }

    /// Returns true if no further URL will be handed out
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty() || self.budget_spent()
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Number of budget slots used so far
    pub fn processed(&self) -> usize {
        self.visited.len().min(self.max_pages)
    }

    /// Returns true if `url` has been claimed
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    fn budget_spent(&self) -> bool {
        self.visited.len() >= self.max_pages
    }
}
