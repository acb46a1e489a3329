//! Job graph rendering
//!
//! The graph view lists one menu entry per job of the selected application.
//! Picking a job resolves its stage ids against the loaded stage list and
//! draws the stage chain for just that job. Resolution follows the job's
//! `stageIds` order; ids with no matching stage are silently skipped.

use crate::models::{JobSummary, StageSummary};

/// Menu labels for the job list, one per job.
#[must_use]
pub fn job_menu(jobs: &[JobSummary]) -> Vec<String> {
    jobs.iter().map(JobSummary::menu_label).collect()
}

/// Resolve a job's stage ids against the loaded stages.
///
/// Order follows the job's `stage_ids` array; an id with no matching stage
/// is dropped without comment.
#[must_use]
pub fn resolve_stage_ids(job: &JobSummary, stages: &[StageSummary]) -> Vec<u64> {
    job.stage_ids
        .iter()
        .copied()
        .filter(|id| stages.iter().any(|s| s.stage_id == *id))
        .collect()
}

/// Whether `scope` is exactly this job's resolved stage set, as produced by
/// picking the job in the graph view.
#[must_use]
pub fn job_is_scoped(job: &JobSummary, stages: &[StageSummary], scope: Option<&[u64]>) -> bool {
    scope.is_some_and(|ids| ids == resolve_stage_ids(job, stages).as_slice())
}

/// Text lines of the stage chain for one job.
///
/// Stages are drawn in `stage_ids` order, connected top to bottom.
#[must_use]
pub fn dag_lines(job: &JobSummary, stages: &[StageSummary]) -> Vec<String> {
    let mut lines = vec![format!("{} [{}]", job.menu_label(), job.status)];

    let resolved = resolve_stage_ids(job, stages);
    if resolved.is_empty() {
        lines.push("  (no stage data)".to_string());
        return lines;
    }

    for (i, stage_id) in resolved.iter().enumerate() {
        // resolve_stage_ids guarantees a match exists
        let Some(stage) = stages.iter().find(|s| s.stage_id == *stage_id) else {
            continue;
        };
        if i > 0 {
            lines.push("        │".to_string());
            lines.push("        ▼".to_string());
        }
        lines.push(format!(
            "  Stage {}  {}  [{}/{} tasks, {}]",
            stage.stage_id, stage.name, stage.num_complete_tasks, stage.num_tasks, stage.status
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: u64, stage_ids: Vec<u64>) -> JobSummary {
        JobSummary {
            job_id: id,
            status: "SUCCEEDED".to_string(),
            stage_ids,
            ..Default::default()
        }
    }

    fn stage(id: u64, name: &str) -> StageSummary {
        StageSummary {
            stage_id: id,
            name: name.to_string(),
            status: "COMPLETE".to_string(),
            num_tasks: 4,
            num_complete_tasks: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_job_menu_labels() {
        let jobs = vec![job(0, vec![]), job(3, vec![])];
        assert_eq!(job_menu(&jobs), vec!["Job 0", "Job 3"]);
    }

    #[test]
    fn test_resolution_follows_stage_ids_order() {
        let stages = vec![stage(0, "map"), stage(1, "reduce"), stage(2, "collect")];
        let j = job(1, vec![2, 0, 1]);
        assert_eq!(resolve_stage_ids(&j, &stages), vec![2, 0, 1]);
    }

    #[test]
    fn test_missing_stage_ids_silently_skipped() {
        let stages = vec![stage(0, "map"), stage(2, "collect")];
        let j = job(1, vec![0, 1, 2]);
        assert_eq!(resolve_stage_ids(&j, &stages), vec![0, 2]);
    }

    #[test]
    fn test_scoped_marker_survives_unresolvable_stage_ids() {
        // stage 1 never loaded; the scope holds only the resolved ids
        let stages = vec![stage(0, "map"), stage(2, "collect")];
        let j = job(5, vec![0, 1, 2]);
        let scope = resolve_stage_ids(&j, &stages);

        assert!(job_is_scoped(&j, &stages, Some(scope.as_slice())));
        assert!(!job_is_scoped(&j, &stages, Some([0].as_slice())));
        assert!(!job_is_scoped(&j, &stages, None));
    }

    #[test]
    fn test_dag_lines_include_each_resolved_stage() {
        let stages = vec![stage(0, "map"), stage(1, "reduce")];
        let lines = dag_lines(&job(4, vec![0, 1]), &stages);
        assert!(lines[0].starts_with("Job 4"));
        assert!(lines.iter().any(|l| l.contains("Stage 0")));
        assert!(lines.iter().any(|l| l.contains("Stage 1")));
    }

    #[test]
    fn test_dag_lines_with_no_resolvable_stages() {
        let lines = dag_lines(&job(4, vec![7]), &[]);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("no stage data"));
    }
}
