// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Submission ordering that maximizes source/destination number matches.
//!
//! The destination assigns numbers sequentially per repository, so the only
//! lever is the order in which tickets are submitted. [`plan`] walks the
//! slots from the repository cursor upwards and fills each one with, in
//! order of preference:
//! 1. the ticket whose id equals the slot number
//! 2. the oldest ticket whose id is already behind the cursor
//! 3. the highest remaining id, keeping lower ids available for lower slots

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::error::{Error, Result};

/// Anything that can be planned: a source ticket with a numeric id.
pub trait Ticket {
    fn ticket_id(&self) -> u64;
}

impl Ticket for u64 {
    fn ticket_id(&self) -> u64 {
        *self
    }
}

/// Orders one repository's batch and returns it with the expected numbers.
///
/// The expected numbers are always `next_number..next_number + len`.
pub fn plan<T: Ticket>(tickets: Vec<T>, next_number: u64) -> Result<(Vec<T>, Vec<u64>)> {
    let total = tickets.len();
    let mut seen = HashSet::with_capacity(total);
    let mut never_matchable = VecDeque::new();
    let mut candidates = BTreeMap::new();

    for ticket in tickets {
        let id = ticket.ticket_id();
        if !seen.insert(id) {
            return Err(Error::DuplicateTicket(id));
        }
        if id < next_number {
            never_matchable.push_back(ticket);
        } else {
            candidates.insert(id, ticket);
        }
    }

    let mut ordered = Vec::with_capacity(total);
    for slot in next_number.. {
        let next = match candidates.remove(&slot) {
            Some(exact) => Some(exact),
            None => never_matchable
                .pop_front()
                .or_else(|| candidates.pop_last().map(|(_, ticket)| ticket)),
        };
        match next {
            Some(ticket) => ordered.push(ticket),
            None => break,
        }
    }
    ordered.extend(never_matchable);

    let expected = (next_number..).take(ordered.len()).collect();
    Ok((ordered, expected))
}

/// Next number a repository will assign, given the highest number already
/// observed on the destination and the numbers recorded as migrated.
pub fn next_number_from(observed_max: u64, migrated: impl IntoIterator<Item = u64>) -> u64 {
    migrated.into_iter().fold(observed_max, u64::max) + 1
}

/// Fails when the destination assigned a different number than predicted.
pub fn confirm_number(ticket: u64, expected: u64, actual: u64) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::NumberMismatch {
            ticket,
            expected,
            actual,
        })
    }
}

/// One slot of a [`SubmissionPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedTicket<T> {
    pub repository: String,
    pub expected_number: u64,
    pub ticket: T,
}

impl<T: Ticket> PlannedTicket<T> {
    /// True when the ticket keeps its source number.
    pub fn is_match(&self) -> bool {
        self.ticket.ticket_id() == self.expected_number
    }
}

/// Tickets in submission order, paired with their expected numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPlan<T> {
    entries: Vec<PlannedTicket<T>>,
}

impl<T> Default for SubmissionPlan<T> {
    fn default() -> Self {
        SubmissionPlan {
            entries: Vec::new(),
        }
    }
}

impl<T: Ticket> SubmissionPlan<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlannedTicket<T>> {
        self.entries.iter()
    }

    /// Count of tickets expected to keep their source number.
    pub fn matched_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_match()).count()
    }

    /// The contiguous slice planned for `repository`.
    pub fn for_repository<'a>(
        &'a self,
        repository: &'a str,
    ) -> impl Iterator<Item = &'a PlannedTicket<T>> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.repository == repository)
    }

    pub fn into_entries(self) -> Vec<PlannedTicket<T>> {
        self.entries
    }

    fn push_batch(&mut self, repository: &str, ordered: Vec<T>, expected: Vec<u64>) {
        self.entries.extend(ordered.into_iter().zip(expected).map(
            |(ticket, expected_number)| PlannedTicket {
                repository: repository.to_string(),
                expected_number,
                ticket,
            },
        ));
    }
}

/// Per-run planner owning the repository cursors.
///
/// Each repository's cursor is set once and each repository is planned at
/// most once, so a cursor can never be advanced twice.
#[derive(Debug, Default)]
pub struct NumberPredictor {
    cursors: HashMap<String, u64>,
    planned: HashSet<String>,
}

impl NumberPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_next_number(&mut self, repository: &str, next_number: u64) -> Result<()> {
        if let Some(current) = self.cursors.get(repository) {
            return Err(Error::CursorAlreadySet {
                repository: repository.to_string(),
                current: *current,
            });
        }
        tracing::debug!(repository, next_number, "cursor set");
        self.cursors.insert(repository.to_string(), next_number);
        Ok(())
    }

    pub fn next_number(&self, repository: &str) -> Option<u64> {
        self.cursors.get(repository).copied()
    }

    /// Plans one repository's batch and advances its cursor past it.
    pub fn plan_repository<T: Ticket>(
        &mut self,
        repository: &str,
        tickets: Vec<T>,
    ) -> Result<SubmissionPlan<T>> {
        let mut out = SubmissionPlan::default();
        self.plan_into(&mut out, repository, tickets)?;
        Ok(out)
    }

    /// Plans every batch independently and concatenates the results.
    pub fn plan_all<T, I>(&mut self, batches: I) -> Result<SubmissionPlan<T>>
    where
        T: Ticket,
        I: IntoIterator<Item = (String, Vec<T>)>,
    {
        let mut out = SubmissionPlan::default();
        for (repository, tickets) in batches {
            self.plan_into(&mut out, &repository, tickets)?;
        }
        Ok(out)
    }

    fn plan_into<T: Ticket>(
        &mut self,
        out: &mut SubmissionPlan<T>,
        repository: &str,
        tickets: Vec<T>,
    ) -> Result<()> {
        if self.planned.contains(repository) {
            return Err(Error::RepositoryAlreadyPlanned(repository.to_string()));
        }
        let next_number = self
            .next_number(repository)
            .ok_or_else(|| Error::UnknownRepository(repository.to_string()))?;

        let (ordered, expected) = plan(tickets, next_number)?;
        let matched = ordered
            .iter()
            .zip(&expected)
            .filter(|(t, n)| t.ticket_id() == **n)
            .count();
        tracing::info!(
            repository,
            next_number,
            total = ordered.len(),
            matched,
            "planned repository"
        );

        self.cursors
            .insert(repository.to_string(), next_number + ordered.len() as u64);
        self.planned.insert(repository.to_string());
        out.push_batch(repository, ordered, expected);
        Ok(())
    }
}

#[cfg(test)]
#[path = "predict_tests.rs"]
mod tests;
