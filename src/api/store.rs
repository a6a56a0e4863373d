use std::{
    collections::BTreeSet,
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use log::debug;
use tokio::sync::{watch, Mutex, MutexGuard};

use super::query;
use super::student::{self, NewStudent, Student, StudentPatch};

struct Roster {
    students: Vec<Student>,
    // next id to hand out; only ever grows
    next_id: u64,
}

// which ticket may touch the roster next
struct Turns {
    serving: u64,
    // tickets dropped before their turn came
    abandoned: BTreeSet<u64>,
}

// a place in the queue, released on drop even if the call is cancelled
struct Turn<'store> {
    ticket: u64,
    turns: &'store watch::Sender<Turns>,
}

impl Drop for Turn<'_> {
    fn drop(&mut self) {
        let ticket = self.ticket;
        self.turns.send_modify(|turns| {
            if turns.serving == ticket {
                turns.serving += 1;
                while turns.abandoned.remove(&turns.serving) {
                    turns.serving += 1;
                }
            } else {
                turns.abandoned.insert(ticket);
            }
        });
    }
}

// roster access for one operation; the guard is released before the turn
struct RosterAccess<'store> {
    roster: MutexGuard<'store, Roster>,
    _turn: Turn<'store>,
}

impl Deref for RosterAccess<'_> {
    type Target = Roster;

    fn deref(&self) -> &Roster {
        &self.roster
    }
}

impl DerefMut for RosterAccess<'_> {
    fn deref_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
}

/// Owner of every student record.
///
/// Each operation waits `delay` to stand in for network latency. Concurrent calls wait out
/// their delays side by side; a ticket drawn when the call starts then lets them touch the
/// roster one at a time in issue order, so no caller ever sees a half-applied mutation.
pub struct StudentStore {
    roster: Mutex<Roster>,
    delay: Duration,
    next_ticket: AtomicU64,
    turns: watch::Sender<Turns>,
}

impl StudentStore {
    /// build an empty store
    pub fn new(delay: Duration) -> Self {
        Self::with_students(Vec::new(), delay)
    }

    /// build a store holding the seed collection
    pub fn seeded(delay: Duration) -> Self {
        Self::with_students(student::seed_students(), delay)
    }

    /// build a store from existing records
    ///
    /// Fresh ids start above the largest numeric id among `students`.
    pub fn with_students(students: Vec<Student>, delay: Duration) -> Self {
        let next_id = students
            .iter()
            .filter_map(|s| s.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let (turns, _) = watch::channel(Turns {
            serving: 0,
            abandoned: BTreeSet::new(),
        });
        Self {
            roster: Mutex::new(Roster { students, next_id }),
            delay,
            next_ticket: AtomicU64::new(0),
            turns,
        }
    }

    async fn lock(&self) -> RosterAccess<'_> {
        let turn = Turn {
            ticket: self.next_ticket.fetch_add(1, Ordering::SeqCst),
            turns: &self.turns,
        };
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut rx = self.turns.subscribe();
        // the sender lives as long as the store, so this only returns once it is our turn
        let _ = rx.wait_for(|turns| turns.serving == turn.ticket).await;

        RosterAccess {
            roster: self.roster.lock().await,
            _turn: turn,
        }
    }

    /// snapshot of every record in insertion order
    pub async fn list_all(&self) -> Vec<Student> {
        let roster = self.lock().await;
        debug!("listing {} students", roster.students.len());
        roster.students.clone()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Student> {
        let roster = self.lock().await;
        let found = roster.students.iter().find(|s| s.id == id).cloned();
        debug!("student {} found: {}", id, found.is_some());
        found
    }

    /// students whose course matches `course`, see [`query::by_course`]
    pub async fn filter_by_course(&self, course: &str) -> Vec<Student> {
        let roster = self.lock().await;
        let filtered = query::by_course(&roster.students, course);
        debug!(
            "found {} students in course \"{}\"",
            filtered.len(),
            course
        );
        filtered
    }

    /// store a new record under a freshly assigned id and return it
    pub async fn create(&self, fields: NewStudent) -> Student {
        let mut roster = self.lock().await;
        let id = roster.next_id.to_string();
        roster.next_id += 1;

        let mut created = Student::new(id, fields);
        if created.image_url.is_none() {
            created.image_url = Some(student::portrait_url(&created.id));
        }
        roster.students.push(created.clone());
        debug!("student {} created", created.id);
        created
    }

    /// merge `patch` into the record with `id`, `None` if there is no such record
    pub async fn update(&self, id: &str, patch: StudentPatch) -> Option<Student> {
        let mut roster = self.lock().await;
        let Some(student) = roster.students.iter_mut().find(|s| s.id == id) else {
            debug!("student {} not found for update", id);
            return None;
        };
        student.apply(patch);
        debug!("student {} updated", id);
        Some(student.clone())
    }

    /// remove the record with `id`, returning whether one was removed
    pub async fn delete(&self, id: &str) -> bool {
        let mut roster = self.lock().await;
        match roster.students.iter().position(|s| s.id == id) {
            Some(index) => {
                roster.students.remove(index);
                debug!("student {} deleted", id);
                true
            }
            None => {
                debug!("student {} not found for deletion", id);
                false
            }
        }
    }

    /// number of records held, without the simulated latency or waiting for queued calls
    pub async fn len(&self) -> usize {
        self.roster.lock().await.students.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
