//! Search producers: linear scan and binary search
//!
//! One step per probe.  A successful probe is terminal — the trace ends at
//! the comparison that finds the target.  A miss ends in a `Final` step
//! reporting that the target is absent.

use super::{push_step, ProduceError, DEFAULT_STEP_LIMIT};
use crate::input::InputError;
use crate::step::{DelayTable, ProbeOutcome, Snapshot, StepKind, StepRecorder, Trace};

fn searching_delays() -> DelayTable {
    DelayTable::uniform(600)
        .with(StepKind::Compare, 800)
        .with(StepKind::Final, 1200)
}

fn outcome_of(value: i64, target: i64) -> ProbeOutcome {
    if value < target {
        ProbeOutcome::Less
    } else if value > target {
        ProbeOutcome::Greater
    } else {
        ProbeOutcome::Equal
    }
}

fn outcome_text(outcome: ProbeOutcome) -> &'static str {
    match outcome {
        ProbeOutcome::Less => "less than",
        ProbeOutcome::Greater => "greater than",
        ProbeOutcome::Equal => "equal to",
    }
}

/// Linear search, probing left to right.
pub fn linear_search(values: &[i64], target: i64) -> Result<Trace, ProduceError> {
    if values.is_empty() {
        return Err(ProduceError::Input(InputError::Empty));
    }

    let n = values.len();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);

    for (i, &value) in values.iter().enumerate() {
        let outcome = outcome_of(value, target);
        push_step(
            &mut rec,
            StepKind::Compare,
            format!(
                "Probe a[{}]={}: {} target {}",
                i,
                value,
                outcome_text(outcome),
                target
            ),
            Snapshot::SearchScan {
                values: values.to_vec(),
                current: i,
                outcome,
            },
            (i + 1) as f64 / n as f64,
        )?;

        if outcome == ProbeOutcome::Equal {
            return Ok(rec.into_trace(searching_delays()));
        }
    }

    push_step(
        &mut rec,
        StepKind::Final,
        format!("Target {} is not in the array", target),
        Snapshot::SearchScan {
            values: values.to_vec(),
            current: n - 1,
            outcome: outcome_of(values[n - 1], target),
        },
        1.0,
    )?;
    Ok(rec.into_trace(searching_delays()))
}

/// Binary search over an ascending array.
///
/// The input must already be sorted; an unsorted array is a parameter error,
/// not something this producer silently sorts.
pub fn binary_search(values: &[i64], target: i64) -> Result<Trace, ProduceError> {
    if values.is_empty() {
        return Err(ProduceError::Input(InputError::Empty));
    }
    if values.windows(2).any(|w| w[0] > w[1]) {
        return Err(ProduceError::BadParameter {
            message: "binary search requires an ascending sorted array".to_string(),
        });
    }

    let n = values.len();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);

    let mut low = 0i64;
    let mut high = n as i64 - 1;
    let mut last_bracket = (0usize, n - 1, 0usize, outcome_of(values[0], target));

    while low <= high {
        let mid = low + (high - low) / 2;
        let value = values[mid as usize];
        let outcome = outcome_of(value, target);
        last_bracket = (low as usize, high as usize, mid as usize, outcome);

        push_step(
            &mut rec,
            StepKind::Compare,
            format!(
                "Probe mid a[{}]={}: {} target {}",
                mid,
                value,
                outcome_text(outcome),
                target
            ),
            Snapshot::SearchBracket {
                values: values.to_vec(),
                low: low as usize,
                high: high as usize,
                mid: mid as usize,
                outcome,
            },
            1.0 - (high - low + 1) as f64 / n as f64,
        )?;

        match outcome {
            // The successful probe is the terminal step
            ProbeOutcome::Equal => return Ok(rec.into_trace(searching_delays())),
            ProbeOutcome::Less => low = mid + 1,
            ProbeOutcome::Greater => high = mid - 1,
        }
    }

    let (low, high, mid, outcome) = last_bracket;
    push_step(
        &mut rec,
        StepKind::Final,
        format!("Bracket is empty: target {} is not in the array", target),
        Snapshot::SearchBracket {
            values: values.to_vec(),
            low,
            high,
            mid,
            outcome,
        },
        1.0,
    )?;
    Ok(rec.into_trace(searching_delays()))
}
