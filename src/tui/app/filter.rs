//! Row filtering for the TUI tables
//!
//! Two mechanisms narrow the tables:
//! - free-text: case-insensitive substring over the full rendered task row
//!   text (the applications table applies the same filter through `AppRow`)
//! - stage scope: a set of stage ids (from picking a job in the graph view)
//!   restricts the stage table, and cascades to the task table through each
//!   visible stage's task set
//!
//! Both are pure visibility toggles; the underlying data is untouched.

use crate::models::{StageSummary, TaskDetail};

use super::state::SelectionState;

/// Whether a rendered row matches the free-text filter.
///
/// An empty or absent filter matches every row.
#[must_use]
pub fn row_matches(row_text: &str, filter: &Option<String>) -> bool {
    match filter {
        Some(f) if !f.is_empty() => row_text.to_lowercase().contains(&f.to_lowercase()),
        _ => true,
    }
}

/// The full text of a task row, as the table renders it. The free-text
/// filter matches against this.
#[must_use]
pub fn task_row_text(task: &TaskDetail) -> String {
    format!(
        "{} {} {} {} {} {} {} {}",
        task.task_id,
        task.index,
        task.attempt,
        task.status,
        task.executor_id,
        task.host,
        task.task_locality,
        task.launch_time.display(),
    )
}

/// Whether a stage row is visible under the current stage scope.
#[must_use]
pub fn stage_in_scope(stage: &StageSummary, scope: &Option<Vec<u64>>) -> bool {
    match scope {
        Some(ids) => ids.contains(&stage.stage_id),
        None => true,
    }
}

/// Indices into `stages` that survive the stage scope.
#[must_use]
pub fn visible_stage_indices(stages: &[StageSummary], scope: &Option<Vec<u64>>) -> Vec<usize> {
    stages
        .iter()
        .enumerate()
        .filter(|(_, s)| stage_in_scope(s, scope))
        .map(|(i, _)| i)
        .collect()
}

/// Tasks visible in the task table: those belonging to in-scope stages whose
/// rendered row matches the free-text filter. Ordered by stage id, then task
/// id.
#[must_use]
pub fn visible_tasks<'a>(
    selection: &'a SelectionState,
    filter: &Option<String>,
) -> Vec<&'a TaskDetail> {
    let mut stage_ids: Vec<u64> = selection
        .stage_details
        .keys()
        .copied()
        .filter(|id| match &selection.stage_scope {
            Some(scope) => scope.contains(id),
            None => true,
        })
        .collect();
    stage_ids.sort_unstable();

    let mut tasks = Vec::new();
    for stage_id in stage_ids {
        if let Some(detail) = selection.stage_details.get(&stage_id) {
            let mut stage_tasks: Vec<&TaskDetail> = detail.tasks.values().collect();
            stage_tasks.sort_by_key(|t| t.task_id);
            tasks.extend(
                stage_tasks
                    .into_iter()
                    .filter(|t| row_matches(&task_row_text(t), filter)),
            );
        }
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StageDetail;
    use std::collections::HashMap;

    fn task(id: u64, host: &str, status: &str) -> TaskDetail {
        TaskDetail {
            task_id: id,
            index: id,
            attempt: 0,
            executor_id: "1".to_string(),
            host: host.to_string(),
            status: status.to_string(),
            task_locality: "NODE_LOCAL".to_string(),
            ..Default::default()
        }
    }

    fn selection_with_stages(stages: Vec<(u64, Vec<TaskDetail>)>) -> SelectionState {
        let mut sel = SelectionState::default();
        for (stage_id, tasks) in stages {
            let map: HashMap<String, TaskDetail> = tasks
                .into_iter()
                .map(|t| (t.task_id.to_string(), t))
                .collect();
            sel.stage_details.insert(
                stage_id,
                StageDetail {
                    stage_id,
                    tasks: map,
                    ..Default::default()
                },
            );
        }
        sel
    }

    #[test]
    fn test_empty_filter_shows_all_rows() {
        let sel = selection_with_stages(vec![(0, vec![task(1, "wn0", "SUCCESS")])]);
        assert_eq!(visible_tasks(&sel, &None).len(), 1);
        assert_eq!(visible_tasks(&sel, &Some(String::new())).len(), 1);
    }

    #[test]
    fn test_unmatched_filter_hides_all_rows() {
        let sel = selection_with_stages(vec![(0, vec![task(1, "wn0", "SUCCESS")])]);
        assert!(visible_tasks(&sel, &Some("zzz-no-match".to_string())).is_empty());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let sel = selection_with_stages(vec![(0, vec![task(1, "WN0", "SUCCESS")])]);
        assert_eq!(visible_tasks(&sel, &Some("wn0".to_string())).len(), 1);
        assert_eq!(visible_tasks(&sel, &Some("success".to_string())).len(), 1);
    }

    #[test]
    fn test_stage_scope_cascades_to_tasks() {
        let mut sel = selection_with_stages(vec![
            (0, vec![task(1, "wn0", "SUCCESS")]),
            (1, vec![task(2, "wn1", "SUCCESS")]),
        ]);
        sel.stage_scope = Some(vec![1]);

        let visible = visible_tasks(&sel, &None);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].task_id, 2);
    }

    #[test]
    fn test_tasks_ordered_by_stage_then_task_id() {
        let sel = selection_with_stages(vec![
            (1, vec![task(10, "wn1", "SUCCESS"), task(3, "wn1", "SUCCESS")]),
            (0, vec![task(5, "wn0", "SUCCESS")]),
        ]);
        let ids: Vec<u64> = visible_tasks(&sel, &None).iter().map(|t| t.task_id).collect();
        assert_eq!(ids, vec![5, 3, 10]);
    }

    #[test]
    fn test_visible_stage_indices() {
        let stages = vec![
            StageSummary {
                stage_id: 0,
                ..Default::default()
            },
            StageSummary {
                stage_id: 1,
                ..Default::default()
            },
        ];
        assert_eq!(visible_stage_indices(&stages, &None), vec![0, 1]);
        assert_eq!(visible_stage_indices(&stages, &Some(vec![1])), vec![1]);
        assert!(visible_stage_indices(&stages, &Some(vec![9])).is_empty());
    }
}
