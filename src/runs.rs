use crate::error::{Result, TupsError};
use crate::successor;
use crate::traits::Record;
use crate::tup::Tup;
use crate::tuplist::{field_at, TupList};
use crate::value::Value;
use std::fmt;
use tracing::{debug, trace};

type SuccessorFn = dyn Fn(&Value) -> Option<Value>;
type JoinFn = dyn Fn(&[Tup]) -> Tup;

/// Options for [`TupList::to_start_finish`].
///
/// `period` is the position of the period field (default 1). `successor`
/// returns the period that directly follows another (default
/// [`successor::next_int`]). `join` builds the output record from the records
/// of one run (default: the first record with the last period appended).
pub struct StartFinish {
    period: usize,
    successor: Box<SuccessorFn>,
    join: Option<Box<JoinFn>>,
}

impl StartFinish {
    pub fn new() -> Self {
        Self {
            period: 1,
            successor: Box::new(successor::next_int),
            join: None,
        }
    }

    pub fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    pub fn successor<F>(mut self, successor: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + 'static,
    {
        self.successor = Box::new(successor);
        self
    }

    /// Replaces the output record builder. `join` receives every record of
    /// the run, in input order, and is never called with an empty slice.
    ///
    /// ```
    /// use sovran_tups::{tup, StartFinish, Tup, TupList};
    ///
    /// let tl = TupList::from(vec![("A", 1), ("A", 2), ("B", 7)]);
    /// let counted = StartFinish::new().join(|run: &[Tup]| {
    ///     let mut out = run[0].clone();
    ///     out.push(run[run.len() - 1][1].clone()).push(run.len() as i64);
    ///     out
    /// });
    /// let runs = tl.to_start_finish(&counted)?;
    /// assert_eq!(runs.to_list(), vec![tup!["A", 1, 2, 2], tup!["B", 7, 7, 1]]);
    /// # Ok::<(), sovran_tups::TupsError>(())
    /// ```
    pub fn join<F>(mut self, join: F) -> Self
    where
        F: Fn(&[Tup]) -> Tup + 'static,
    {
        self.join = Some(Box::new(join));
        self
    }

    fn follows(&self, previous: &Value, current: &Value) -> bool {
        (self.successor)(previous).as_ref() == Some(current)
    }
}

impl Default for StartFinish {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StartFinish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartFinish")
            .field("period", &self.period)
            .field("custom_join", &self.join.is_some())
            .finish_non_exhaustive()
    }
}

struct Run {
    records: Vec<Tup>,
    group: Vec<Value>,
    last: Value,
}

impl Run {
    fn close(self, options: &StartFinish) -> Tup {
        if let Some(join) = &options.join {
            return join(&self.records);
        }
        let mut tup = self.records.into_iter().next().unwrap_or_default();
        tup.push(self.last);
        tup
    }
}

impl<T> TupList<T>
where
    T: Record,
{
    /// Collapses runs of consecutive periods into `(group…, start, finish)`
    /// records, or whatever [`StartFinish::join`] builds from each run.
    ///
    /// The group is every field except the period. A run continues while the
    /// group stays the same and each period is the successor of the one
    /// before. Each output record is the first record of its run with the last
    /// period appended.
    ///
    /// The list is expected to be sorted by group, then period. It is not
    /// sorted here, so unsorted input gives arbitrary run boundaries.
    ///
    /// ```
    /// use sovran_tups::{tup, StartFinish, TupList};
    ///
    /// let tl = TupList::from(vec![("A", 1), ("A", 2), ("A", 3), ("A", 5), ("B", 10), ("B", 11)]);
    /// let runs = tl.to_start_finish(&StartFinish::default())?;
    /// assert_eq!(runs.to_list(), vec![tup!["A", 1, 3], tup!["A", 5, 5], tup!["B", 10, 11]]);
    /// # Ok::<(), sovran_tups::TupsError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if a record has fewer than two
    /// fields or no field at the period position
    pub fn to_start_finish(&self, options: &StartFinish) -> Result<TupList<Tup>> {
        let mut out = TupList::new();
        let mut current: Option<Run> = None;

        for item in self.iter() {
            if item.arity() < 2 {
                return Err(TupsError::shape("to_start_finish", 2, item.arity()));
            }
            let period = field_at(item, options.period, "to_start_finish")?;
            let group: Vec<Value> = (0..item.arity())
                .filter(|&pos| pos != options.period)
                .filter_map(|pos| item.field(pos))
                .collect();

            match current.as_mut() {
                Some(run) if run.group == group && options.follows(&run.last, &period) => {
                    run.last = period;
                    run.records.push(item.to_tup());
                }
                _ => {
                    if let Some(run) = current.take() {
                        trace!(group = ?run.group, "closed run");
                        out.add(run.close(options));
                    }
                    current = Some(Run {
                        records: vec![item.to_tup()],
                        group,
                        last: period,
                    });
                }
            }
        }

        if let Some(run) = current {
            out.add(run.close(options));
        }
        debug!(rows = self.len(), runs = out.len(), "compressed periods");
        Ok(out)
    }
}
