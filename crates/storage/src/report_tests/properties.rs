// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

/// Outcome of one generated task: `None` leaves it open.
type TaskPlan = Option<(u64, bool)>;

#[derive(Debug, Clone)]
struct RunPlan {
    tasks: Vec<TaskPlan>,
    /// `Some(failed)` ends the run
    end: Option<bool>,
}

fn arb_run_plan() -> impl Strategy<Value = RunPlan> {
    (
        prop::collection::vec(prop::option::of((1u64..50, any::<bool>())), 0..5),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(tasks, end)| RunPlan { tasks, end })
}

/// Lay out each run's entries sequentially in time.
fn build_log(plans: &[RunPlan]) -> LogSnapshot {
    let mut entries = Vec::new();
    let mut time = 1_000;
    for (r, plan) in plans.iter().enumerate() {
        let run_id = format!("r{r}");
        entries.push(job_start_entry(&run_id, &format!("j{r}"), time));
        for (t, task) in plan.tasks.iter().enumerate() {
            let task_id = format!("r{r}-t{t}");
            entries.push(task_start_entry(&task_id, &run_id, time + t as u64 + 1));
            if let Some((offset, failed)) = task {
                let result = failed.then(|| error("VDI_IO_ERROR"));
                entries.push(task_end_entry(
                    &format!("{task_id}-end"),
                    &task_id,
                    time + 10 + offset,
                    result,
                    None,
                ));
            }
        }
        if let Some(failed) = plan.end {
            let run_error = failed.then(|| error("job failed"));
            entries.push(job_end_entry(&format!("{run_id}-end"), &run_id, time + 100, run_error));
        }
        time += 1_000;
    }
    log(entries)
}

fn all_records(record: &RunRecord) -> Vec<&RunRecord> {
    let mut out = vec![record];
    for task in &record.tasks {
        out.extend(all_records(task));
    }
    out
}

proptest! {
    #[test]
    fn every_run_appears_once(plans in prop::collection::vec(arb_run_plan(), 0..6)) {
        let report = jobs_only(build_log(&plans).into_values());
        prop_assert_eq!(report.len(), plans.len());
        for (id, record) in &report {
            prop_assert_eq!(id, &record.id);
        }
    }

    #[test]
    fn unended_records_stay_open(plans in prop::collection::vec(arb_run_plan(), 1..6)) {
        let report = jobs_only(build_log(&plans).into_values());
        for run in report.values() {
            for record in all_records(run) {
                prop_assert_eq!(record.end.is_none(), !record.status.is_terminal());
            }
        }
    }

    #[test]
    fn ended_runs_order_tasks_by_outcome(plans in prop::collection::vec(arb_run_plan(), 1..6)) {
        let report = jobs_only(build_log(&plans).into_values());
        for run in report.values().filter(|r| r.end.is_some()) {
            if run.status == RunStatus::Failure {
                for pair in run.tasks.windows(2) {
                    prop_assert!(pair[0].start < pair[1].start);
                }
                continue;
            }
            for pair in run.tasks.windows(2) {
                prop_assert_ne!(
                    pair[0].span().finish_then_start(&pair[1].span()),
                    std::cmp::Ordering::Greater
                );
            }
        }
    }

    #[test]
    fn failing_task_fails_its_run(plan in arb_run_plan()) {
        let report = jobs_only(build_log(std::slice::from_ref(&plan)).into_values());
        let run = &report["r0"];
        let task_failed = plan.tasks.iter().any(|t| matches!(t, Some((_, true))));
        if run.end.is_some() && task_failed {
            prop_assert_eq!(run.status, RunStatus::Failure);
        }
        if plan.end == Some(false) && !task_failed {
            prop_assert_eq!(run.status, RunStatus::Success);
        }
    }
}
