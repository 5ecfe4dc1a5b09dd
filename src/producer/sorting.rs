//! Sorting producers: bubble, selection, insertion, quicksort, merge sort
//!
//! Every comparison and every mutation is a distinct step.  The recursive
//! producers (quicksort, merge sort) record the active sub-range and the
//! recursion depth in each snapshot, so a renderer can show nested calls
//! without re-deriving them.

use super::{push_step, ProduceError, DEFAULT_STEP_LIMIT};
use crate::input::InputError;
use crate::step::{DelayTable, Snapshot, StepKind, StepRecorder, Trace};

/// Replay timing shared by the sorting producers.
///
/// Sub-steps (comparisons, "new minimum" probes) are faster than pass
/// boundaries (partitions, merges, the terminal step).
fn sorting_delays() -> DelayTable {
    DelayTable::uniform(500)
        .with(StepKind::Compare, 400)
        .with(StepKind::Swap, 650)
        .with(StepKind::Probe, 250)
        .with(StepKind::Partition, 900)
        .with(StepKind::Merge, 900)
        .with(StepKind::Final, 1200)
}

fn array_snapshot(
    values: &[i64],
    focus: Vec<usize>,
    region: Option<(usize, usize)>,
    sorted_region: Option<(usize, usize)>,
    depth: usize,
) -> Snapshot {
    Snapshot::Array {
        values: values.to_vec(),
        focus,
        region,
        sorted_region,
        depth,
    }
}

fn final_step(rec: &mut StepRecorder, values: &[i64]) -> Result<(), ProduceError> {
    let n = values.len();
    push_step(
        rec,
        StepKind::Final,
        "Array sorted".to_string(),
        array_snapshot(values, vec![], None, Some((0, n - 1)), 0),
        1.0,
    )
}

fn check_nonempty(values: &[i64]) -> Result<(), ProduceError> {
    if values.is_empty() {
        return Err(ProduceError::Input(InputError::Empty));
    }
    Ok(())
}

/// Bubble sort: adjacent comparisons with early exit on a clean pass.
pub fn bubble_sort(input: &[i64]) -> Result<Trace, ProduceError> {
    check_nonempty(input)?;

    let mut values = input.to_vec();
    let n = values.len();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        let sorted = (pass > 0).then(|| (n - pass, n - 1));

        for i in 0..n - 1 - pass {
            push_step(
                &mut rec,
                StepKind::Compare,
                format!(
                    "Compare a[{}]={} with a[{}]={}",
                    i,
                    values[i],
                    i + 1,
                    values[i + 1]
                ),
                array_snapshot(&values, vec![i, i + 1], None, sorted, 0),
                pass as f64 / n as f64,
            )?;

            if values[i] > values[i + 1] {
                values.swap(i, i + 1);
                swapped = true;
                push_step(
                    &mut rec,
                    StepKind::Swap,
                    format!("Swap a[{}] and a[{}]", i, i + 1),
                    array_snapshot(&values, vec![i, i + 1], None, sorted, 0),
                    pass as f64 / n as f64,
                )?;
            }
        }

        if !swapped {
            break;
        }
    }

    final_step(&mut rec, &values)?;
    Ok(rec.into_trace(sorting_delays()))
}

/// Selection sort: scans for the minimum of the unsorted suffix, recording a
/// short probe step whenever a new minimum is found.
pub fn selection_sort(input: &[i64]) -> Result<Trace, ProduceError> {
    check_nonempty(input)?;

    let mut values = input.to_vec();
    let n = values.len();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);

    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        let sorted = (i > 0).then(|| (0, i - 1));

        for j in i + 1..n {
            push_step(
                &mut rec,
                StepKind::Compare,
                format!(
                    "Compare a[{}]={} with current minimum a[{}]={}",
                    j, values[j], min, values[min]
                ),
                array_snapshot(&values, vec![j, min], None, sorted, 0),
                i as f64 / n as f64,
            )?;

            if values[j] < values[min] {
                min = j;
                push_step(
                    &mut rec,
                    StepKind::Probe,
                    format!("New minimum a[{}]={}", j, values[j]),
                    array_snapshot(&values, vec![j], None, sorted, 0),
                    i as f64 / n as f64,
                )?;
            }
        }

        if min != i {
            values.swap(i, min);
            push_step(
                &mut rec,
                StepKind::Swap,
                format!("Swap minimum into position: a[{}] and a[{}]", i, min),
                array_snapshot(&values, vec![i, min], None, Some((0, i)), 0),
                (i + 1) as f64 / n as f64,
            )?;
        }
    }

    final_step(&mut rec, &values)?;
    Ok(rec.into_trace(sorting_delays()))
}

/// Insertion sort: shifts the sorted prefix right to open a slot for each key.
pub fn insertion_sort(input: &[i64]) -> Result<Trace, ProduceError> {
    check_nonempty(input)?;

    let mut values = input.to_vec();
    let n = values.len();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);

    for i in 1..n {
        let key = values[i];
        let mut j = i;

        while j > 0 {
            push_step(
                &mut rec,
                StepKind::Compare,
                format!("Compare key {} with a[{}]={}", key, j - 1, values[j - 1]),
                array_snapshot(&values, vec![j - 1, i], None, Some((0, i - 1)), 0),
                i as f64 / n as f64,
            )?;

            if values[j - 1] <= key {
                break;
            }

            values[j] = values[j - 1];
            push_step(
                &mut rec,
                StepKind::Overwrite,
                format!("Shift a[{}]={} right to a[{}]", j - 1, values[j], j),
                array_snapshot(&values, vec![j], None, None, 0),
                i as f64 / n as f64,
            )?;
            j -= 1;
        }

        if j != i {
            values[j] = key;
            push_step(
                &mut rec,
                StepKind::Overwrite,
                format!("Insert key {} at a[{}]", key, j),
                array_snapshot(&values, vec![j], None, Some((0, i)), 0),
                (i + 1) as f64 / n as f64,
            )?;
        }
    }

    final_step(&mut rec, &values)?;
    Ok(rec.into_trace(sorting_delays()))
}

/// Quicksort with Lomuto partitioning (last element as pivot).
pub fn quicksort(input: &[i64]) -> Result<Trace, ProduceError> {
    check_nonempty(input)?;

    let mut values = input.to_vec();
    let n = values.len();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);
    let mut placed = 0usize;

    quicksort_rec(&mut values, 0, n - 1, 0, &mut placed, n, &mut rec)?;

    final_step(&mut rec, &values)?;
    Ok(rec.into_trace(sorting_delays()))
}

fn quicksort_rec(
    values: &mut [i64],
    lo: usize,
    hi: usize,
    depth: usize,
    placed: &mut usize,
    n: usize,
    rec: &mut StepRecorder,
) -> Result<(), ProduceError> {
    if lo >= hi {
        if lo == hi {
            *placed += 1;
        }
        return Ok(());
    }

    let region = Some((lo, hi));
    let pivot = values[hi];
    let mut i = lo;

    for j in lo..hi {
        push_step(
            rec,
            StepKind::Compare,
            format!("Compare a[{}]={} with pivot {}", j, values[j], pivot),
            array_snapshot(values, vec![j, hi], region, None, depth),
            *placed as f64 / n as f64,
        )?;

        if values[j] <= pivot {
            if i != j {
                values.swap(i, j);
                push_step(
                    rec,
                    StepKind::Swap,
                    format!("Swap a[{}] and a[{}] below pivot", i, j),
                    array_snapshot(values, vec![i, j], region, None, depth),
                    *placed as f64 / n as f64,
                )?;
            }
            i += 1;
        }
    }

    if i != hi {
        values.swap(i, hi);
    }
    *placed += 1;
    push_step(
        rec,
        StepKind::Partition,
        format!("Pivot {} placed at a[{}]", pivot, i),
        array_snapshot(values, vec![i], region, None, depth),
        *placed as f64 / n as f64,
    )?;

    if i > lo {
        quicksort_rec(values, lo, i - 1, depth + 1, placed, n, rec)?;
    }
    if i < hi {
        quicksort_rec(values, i + 1, hi, depth + 1, placed, n, rec)?;
    }
    Ok(())
}

/// Merge sort: top-down, recording the partially merged buffer at every
/// element taken so nested in-flight merges stay renderable.
pub fn merge_sort(input: &[i64]) -> Result<Trace, ProduceError> {
    check_nonempty(input)?;

    let mut values = input.to_vec();
    let n = values.len();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);

    // Total element writes across all merge levels, for progress reporting
    let mut levels = 0usize;
    let mut width = 1usize;
    while width < n {
        width *= 2;
        levels += 1;
    }
    let total_writes = (n * levels.max(1)) as f64;
    let mut writes = 0usize;

    merge_rec(&mut values, 0, n - 1, 0, &mut writes, total_writes, &mut rec)?;

    final_step(&mut rec, &values)?;
    Ok(rec.into_trace(sorting_delays()))
}

fn merge_rec(
    values: &mut [i64],
    lo: usize,
    hi: usize,
    depth: usize,
    writes: &mut usize,
    total_writes: f64,
    rec: &mut StepRecorder,
) -> Result<(), ProduceError> {
    if lo >= hi {
        return Ok(());
    }

    let mid = lo + (hi - lo) / 2;
    merge_rec(values, lo, mid, depth + 1, writes, total_writes, rec)?;
    merge_rec(values, mid + 1, hi, depth + 1, writes, total_writes, rec)?;

    let left = (lo, mid);
    let right = (mid + 1, hi);
    let mut buffer: Vec<i64> = Vec::with_capacity(hi - lo + 1);
    let mut i = lo;
    let mut j = mid + 1;

    let merge_snapshot = |values: &[i64], buffer: &[i64]| Snapshot::ArrayMerge {
        values: values.to_vec(),
        left,
        right,
        buffer: buffer.to_vec(),
        depth,
    };

    while i <= mid && j <= hi {
        push_step(
            rec,
            StepKind::Compare,
            format!(
                "Compare left a[{}]={} with right a[{}]={}",
                i, values[i], j, values[j]
            ),
            merge_snapshot(values, &buffer),
            *writes as f64 / total_writes,
        )?;

        let (taken, from) = if values[i] <= values[j] {
            i += 1;
            (values[i - 1], i - 1)
        } else {
            j += 1;
            (values[j - 1], j - 1)
        };
        buffer.push(taken);
        *writes += 1;

        push_step(
            rec,
            StepKind::Overwrite,
            format!("Take {} from a[{}] into the merge buffer", taken, from),
            merge_snapshot(values, &buffer),
            *writes as f64 / total_writes,
        )?;
    }

    for k in i..=mid {
        buffer.push(values[k]);
        *writes += 1;
        push_step(
            rec,
            StepKind::Overwrite,
            format!("Drain remaining left a[{}]={}", k, values[k]),
            merge_snapshot(values, &buffer),
            *writes as f64 / total_writes,
        )?;
    }
    for k in j..=hi {
        buffer.push(values[k]);
        *writes += 1;
        push_step(
            rec,
            StepKind::Overwrite,
            format!("Drain remaining right a[{}]={}", k, values[k]),
            merge_snapshot(values, &buffer),
            *writes as f64 / total_writes,
        )?;
    }

    values[lo..=hi].copy_from_slice(&buffer);
    push_step(
        rec,
        StepKind::Merge,
        format!("Merged a[{}..={}] and a[{}..={}]", lo, mid, mid + 1, hi),
        array_snapshot(values, vec![], Some((lo, hi)), Some((lo, hi)), depth),
        *writes as f64 / total_writes,
    )?;

    Ok(())
}
